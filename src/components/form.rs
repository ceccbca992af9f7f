//! 题目表单
//!
//! 持有一份草稿，新建或编辑都通过它完成。提交时根据草稿是否带 id
//! 决定调用 create 还是 update，成功后重置为空白草稿并通知上层切换视图。

use crate::clients::QuestionApi;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{Difficulty, Question};
use crate::utils::logging::truncate_text;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{error, info};

/// 表单字段（控制台按名称编辑时使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BranchId,
    TestId,
    QuestionText,
    CorrectAnswer,
    Explanation,
    Difficulty,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "branch" | "branchId" => Ok(FormField::BranchId),
            "test" | "testId" => Ok(FormField::TestId),
            "text" | "question" | "questionText" => Ok(FormField::QuestionText),
            "answer" | "correct" | "correctAnswer" => Ok(FormField::CorrectAnswer),
            "explanation" => Ok(FormField::Explanation),
            "difficulty" => Ok(FormField::Difficulty),
            other => Err(format!("未知字段: {other}")),
        }
    }
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 新建成功，携带服务端返回的记录
    Created(Question),
    /// 更新成功
    Updated(Question),
    /// 上一次提交尚未完成，本次忽略
    Busy,
}

/// 表单渲染所需的数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView<'a> {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub draft: &'a Question,
    pub error: Option<&'a str>,
}

type SuccessCallback = Box<dyn FnMut() + Send>;

/// 题目表单
pub struct QuestionForm {
    api: Arc<dyn QuestionApi>,
    draft: Question,
    submitting: Arc<AtomicBool>,
    last_error: Option<String>,
    on_success: Option<SuccessCallback>,
}

impl fmt::Debug for QuestionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionForm")
            .field("draft", &self.draft)
            .field("submitting", &self.is_submitting())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl QuestionForm {
    /// 创建表单；`editing` 为 Some 时进入编辑模式
    pub fn new(api: Arc<dyn QuestionApi>, editing: Option<Question>) -> Self {
        Self {
            api,
            draft: editing.unwrap_or_else(Question::blank),
            submitting: Arc::new(AtomicBool::new(false)),
            last_error: None,
            on_success: None,
        }
    }

    /// 设置提交成功后的回调（无参数）
    pub fn on_success(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// 外部传入待编辑的题目时整体覆盖草稿；None 不影响当前草稿
    pub fn set_editing(&mut self, editing: Option<Question>) {
        if let Some(question) = editing {
            self.draft = question;
        }
    }

    pub fn draft(&self) -> &Question {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_branch_id(&mut self, value: impl Into<String>) {
        self.draft.branch_id = value.into();
    }

    pub fn set_test_id(&mut self, value: impl Into<String>) {
        self.draft.test_id = value.into();
    }

    pub fn set_question_text(&mut self, value: impl Into<String>) {
        self.draft.question_text = value.into();
    }

    /// 修改第 `index` 个选项（0 起），其余选项不变
    pub fn set_option(&mut self, index: usize, value: impl Into<String>) -> Result<(), ValidationError> {
        self.draft.set_option(index, value)
    }

    /// 数值输入只做提示性约束，越界值在提交时才会被拒绝
    pub fn set_correct_answer(&mut self, value: i64) {
        self.draft.correct_answer = value;
    }

    pub fn set_explanation(&mut self, value: impl Into<String>) {
        self.draft.explanation = value.into();
    }

    pub fn set_difficulty(&mut self, value: Difficulty) {
        self.draft.difficulty = value;
    }

    /// 按字段名写入字符串输入
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), ValidationError> {
        match field {
            FormField::BranchId => self.set_branch_id(value),
            FormField::TestId => self.set_test_id(value),
            FormField::QuestionText => self.set_question_text(value),
            FormField::Explanation => self.set_explanation(value),
            FormField::CorrectAnswer => {
                let parsed = value.trim().parse().map_err(|_| ValidationError::NotANumber {
                    input: value.to_string(),
                })?;
                self.set_correct_answer(parsed);
            }
            FormField::Difficulty => self.set_difficulty(value.parse()?),
        }
        Ok(())
    }

    /// 提交草稿
    ///
    /// 成功后草稿重置为空白；失败时保留草稿，方便用户直接重试
    pub async fn submit(&mut self) -> AppResult<SubmitOutcome> {
        let Some(pending) = self.begin_submit()? else {
            return Ok(SubmitOutcome::Busy);
        };
        let result = pending.await;
        self.finish_submit(result)
    }

    /// 发起提交：校验草稿并返回独立的请求 future
    ///
    /// 返回 `Ok(None)` 表示上一次提交仍在进行。请求完成前表单保持
    /// "Saving..." 状态，完成后把结果交给 [`QuestionForm::finish_submit`]。
    pub fn begin_submit(&mut self) -> AppResult<Option<PendingSubmit>> {
        if self.is_submitting() {
            info!("⏳ 上一次提交尚未完成，忽略本次提交");
            return Ok(None);
        }

        if let Err(e) = self.draft.validate() {
            self.last_error = Some(e.to_string());
            return Err(e.into());
        }

        info!(
            "📤 正在{}题目: {}",
            if self.draft.is_new() { "创建" } else { "更新" },
            truncate_text(&self.draft.question_text, 40)
        );

        let api = self.api.clone();
        let draft = self.draft.clone();
        let request = async move {
            match draft.id.as_deref() {
                Some(id) => api.update(id, &draft).await.map(SubmitOutcome::Updated),
                None => api.create(&draft).await.map(SubmitOutcome::Created),
            }
        };
        Ok(Some(PendingSubmit::new(self.submitting.clone(), request.boxed())))
    }

    /// 处理请求结果：成功时重置草稿并触发回调，失败时记录错误
    pub fn finish_submit(&mut self, result: AppResult<SubmitOutcome>) -> AppResult<SubmitOutcome> {
        match result {
            Ok(SubmitOutcome::Busy) => Ok(SubmitOutcome::Busy),
            Ok(outcome) => {
                info!("✓ 题目保存成功");
                self.draft = Question::blank();
                self.last_error = None;
                if let Some(callback) = self.on_success.as_mut() {
                    callback();
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("❌ 保存题目失败: {}", e);
                self.last_error = Some(user_message(&e));
                Err(e)
            }
        }
    }

    pub fn view(&self) -> FormView<'_> {
        let editing = !self.draft.is_new();
        FormView {
            heading: if editing {
                "✏️ Update Question"
            } else {
                "➕ Add New Question"
            },
            submit_label: match (self.is_submitting(), editing) {
                (true, _) => "Saving...",
                (false, true) => "Update Question",
                (false, false) => "Add Question",
            },
            submit_disabled: self.is_submitting(),
            draft: &self.draft,
            error: self.last_error.as_deref(),
        }
    }
}

/// 进行中的提交请求
///
/// 存活期间表单处于提交中状态；完成或被丢弃时复位
pub struct PendingSubmit {
    submitting: Arc<AtomicBool>,
    request: BoxFuture<'static, AppResult<SubmitOutcome>>,
}

impl PendingSubmit {
    fn new(submitting: Arc<AtomicBool>, request: BoxFuture<'static, AppResult<SubmitOutcome>>) -> Self {
        submitting.store(true, Ordering::SeqCst);
        Self { submitting, request }
    }
}

impl fmt::Debug for PendingSubmit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSubmit").finish_non_exhaustive()
    }
}

impl Future for PendingSubmit {
    type Output = AppResult<SubmitOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.request.as_mut().poll(cx)
    }
}

impl Drop for PendingSubmit {
    fn drop(&mut self) {
        self.submitting.store(false, Ordering::SeqCst);
    }
}

fn user_message(e: &AppError) -> String {
    format!("Error saving question: {e}")
}
