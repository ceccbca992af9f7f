use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 每道题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 线上传输使用的字面值
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 界面展示用的标签
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢 Easy",
            Difficulty::Medium => "🟠 Medium",
            Difficulty::Hard => "🔴 Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::UnknownDifficulty {
                input: s.to_string(),
            }),
        }
    }
}

/// 经过校验的正确答案索引，取值范围 [0, OPTION_COUNT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrectAnswer(u8);

impl CorrectAnswer {
    pub fn new(index: i64) -> Result<Self, ValidationError> {
        if (0..OPTION_COUNT as i64).contains(&index) {
            Ok(Self(index as u8))
        } else {
            Err(ValidationError::CorrectAnswerOutOfRange {
                index,
                max_index: OPTION_COUNT - 1,
            })
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for CorrectAnswer {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 题目
///
/// `id` 为空表示尚未创建的新题；由题库服务在创建时分配，之后不再变化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub branch_id: String,
    #[serde(default)]
    pub test_id: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default = "blank_options", deserialize_with = "deserialize_options")]
    pub options: [String; OPTION_COUNT],
    /// 用户输入的原始值，提交前由 [`Question::validate`] 校验
    #[serde(default)]
    pub correct_answer: i64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, deserialize_with = "deserialize_difficulty")]
    pub difficulty: Difficulty,
}

impl Default for Question {
    fn default() -> Self {
        Self::blank()
    }
}

impl Question {
    /// 空白草稿：四个空选项、正确答案 0、难度 easy
    pub fn blank() -> Self {
        Self {
            id: None,
            branch_id: String::new(),
            test_id: String::new(),
            question_text: String::new(),
            options: blank_options(),
            correct_answer: 0,
            explanation: String::new(),
            difficulty: Difficulty::Easy,
        }
    }

    /// 是否为尚未创建的新题
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// 提交前校验
    pub fn validate(&self) -> Result<CorrectAnswer, ValidationError> {
        CorrectAnswer::new(self.correct_answer)
    }

    /// 正确答案索引（越界时为 None）
    pub fn correct_index(&self) -> Option<usize> {
        CorrectAnswer::new(self.correct_answer).ok().map(CorrectAnswer::index)
    }

    /// 替换指定位置的选项，其余三个保持不变
    pub fn set_option(&mut self, index: usize, text: impl Into<String>) -> Result<(), ValidationError> {
        let slot = self
            .options
            .get_mut(index)
            .ok_or(ValidationError::OptionIndex {
                index,
                max_index: OPTION_COUNT - 1,
            })?;
        *slot = text.into();
        Ok(())
    }
}

fn blank_options() -> [String; OPTION_COUNT] {
    Default::default()
}

// 服务端历史数据里 options 可能缺失、为 null 或长度不为 4，
// 不能因为一条记录就让整个列表加载失败
fn deserialize_options<'de, D>(deserializer: D) -> Result<[String; OPTION_COUNT], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    let raw = raw.unwrap_or_default();

    if raw.len() > OPTION_COUNT {
        tracing::warn!(
            "⚠️ 题目选项数量为 {}，只保留前 {} 个",
            raw.len(),
            OPTION_COUNT
        );
    }

    let mut options = blank_options();
    for (slot, value) in options.iter_mut().zip(raw) {
        *slot = value.unwrap_or_default();
    }
    Ok(options)
}

// 历史数据里的难度可能是 "Easy"、空值或未知标签，无法识别时按 easy 处理
fn deserialize_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(Difficulty::default());
    };

    match raw.parse() {
        Ok(difficulty) => Ok(difficulty),
        Err(_) => {
            tracing::warn!("⚠️ 无法识别的难度 '{}'，按 {} 处理", raw, Difficulty::default());
            Ok(Difficulty::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Question {
        Question {
            id: None,
            branch_id: "JEE".to_string(),
            test_id: "JEE-1".to_string(),
            question_text: "2+2?".to_string(),
            options: ["3", "4", "5", "6"].map(String::from),
            correct_answer: 1,
            explanation: "basic".to_string(),
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_blank_draft_shape() {
        let blank = Question::blank();
        assert!(blank.is_new());
        assert!(blank.options.iter().all(String::is_empty));
        assert_eq!(blank.correct_answer, 0);
        assert_eq!(blank.difficulty, Difficulty::Easy);
        assert_eq!(Question::default(), blank);
    }

    #[test]
    fn test_new_question_serializes_without_id() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "branchId": "JEE",
                "testId": "JEE-1",
                "questionText": "2+2?",
                "options": ["3", "4", "5", "6"],
                "correctAnswer": 1,
                "explanation": "basic",
                "difficulty": "easy"
            })
        );
    }

    #[test]
    fn test_existing_question_uses_underscore_id() {
        let mut q = sample();
        q.id = Some("q1".to_string());
        q.difficulty = Difficulty::Hard;
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["_id"], "q1");
        assert_eq!(value["difficulty"], "hard");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_deserialize_ignores_service_metadata() {
        let q: Question = serde_json::from_value(json!({
            "_id": "abc",
            "branchId": "NEET",
            "testId": "NEET-2",
            "questionText": "Q",
            "options": ["a", "b", "c", "d"],
            "correctAnswer": 3,
            "explanation": "",
            "difficulty": "medium",
            "createdAt": "2024-01-01T00:00:00Z",
            "__v": 0
        }))
        .unwrap();
        assert_eq!(q.id.as_deref(), Some("abc"));
        assert_eq!(q.difficulty, Difficulty::Medium);
        assert_eq!(q.correct_index(), Some(3));
    }

    #[test]
    fn test_deserialize_pads_and_truncates_options() {
        let short: Question = serde_json::from_value(json!({ "options": ["a", null] })).unwrap();
        assert_eq!(short.options, ["a", "", "", ""].map(String::from));

        let missing: Question = serde_json::from_value(json!({ "options": null })).unwrap();
        assert_eq!(missing.options, blank_options());

        let absent: Question = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.options, blank_options());

        let long: Question =
            serde_json::from_value(json!({ "options": ["a", "b", "c", "d", "e"] })).unwrap();
        assert_eq!(long.options, ["a", "b", "c", "d"].map(String::from));
    }

    #[test]
    fn test_legacy_difficulty_labels_do_not_fail_decode() {
        let legacy: Question = serde_json::from_value(json!({ "difficulty": "Hard" })).unwrap();
        assert_eq!(legacy.difficulty, Difficulty::Hard);

        let unknown: Question = serde_json::from_value(json!({ "difficulty": "extreme" })).unwrap();
        assert_eq!(unknown.difficulty, Difficulty::Easy);

        let null: Question = serde_json::from_value(json!({ "difficulty": null })).unwrap();
        assert_eq!(null.difficulty, Difficulty::Easy);

        let list: Vec<Question> = serde_json::from_value(json!([
            { "_id": "a", "difficulty": "medium" },
            { "_id": "b", "difficulty": "Extreme!" }
        ]))
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_correct_answer_bounds() {
        assert_eq!(CorrectAnswer::new(0).unwrap().index(), 0);
        assert_eq!(CorrectAnswer::try_from(3).unwrap().index(), 3);
        assert_eq!(
            CorrectAnswer::new(4),
            Err(ValidationError::CorrectAnswerOutOfRange {
                index: 4,
                max_index: 3
            })
        );
        assert!(CorrectAnswer::new(-1).is_err());

        let mut q = sample();
        q.correct_answer = 9;
        assert!(q.validate().is_err());
        assert_eq!(q.correct_index(), None);
    }

    #[test]
    fn test_set_option_touches_one_slot() {
        let mut q = sample();
        let before = q.clone();
        q.set_option(2, "five").unwrap();
        assert_eq!(q.options, ["3", "4", "five", "6"].map(String::from));
        assert_eq!(q.question_text, before.question_text);

        q.set_option(2, "five").unwrap();
        assert_eq!(q.options[2], "five");

        let err = q.set_option(4, "x").unwrap_err();
        assert_eq!(err, ValidationError::OptionIndex { index: 4, max_index: 3 });
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(" h ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
