//! 题目列表
//!
//! 挂载时拉取一次全部题目；删除成功后重新拉取，而不是在本地移除，
//! 以服务端的数据为准。

use crate::clients::QuestionApi;
use crate::components::lifecycle::{Confirm, LoadHandle};
use crate::error::AppResult;
use crate::models::{Difficulty, Question};
use futures::future::{AbortRegistration, Abortable};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 加载中显示的占位行数
pub const PLACEHOLDER_ROWS: usize = 3;

/// 删除确认提示
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this question?";

/// 拉取结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 拉取成功，携带题目数量
    Fetched(usize),
    /// 组件卸载，请求被取消
    Cancelled,
}

/// 删除结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 记录没有 id，什么都不做
    NoId,
    /// 用户取消了确认
    Declined,
    /// 删除成功，携带服务端的确认内容
    Deleted(serde_json::Value),
}

/// 列表中的一个选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow<'a> {
    pub text: &'a str,
    pub is_correct: bool,
}

/// 列表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow<'a> {
    pub id: Option<&'a str>,
    pub question_text: &'a str,
    pub branch_id: &'a str,
    pub test_id: &'a str,
    pub difficulty: Difficulty,
    pub options: Vec<OptionRow<'a>>,
}

/// 列表渲染状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading { placeholders: usize },
    Empty,
    Rows(Vec<QuestionRow<'a>>),
}

/// 题目列表
pub struct QuestionList {
    api: Arc<dyn QuestionApi>,
    questions: Vec<Question>,
    loading: bool,
    last_error: Option<String>,
}

impl std::fmt::Debug for QuestionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionList")
            .field("questions", &self.questions.len())
            .field("loading", &self.loading)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl QuestionList {
    pub fn new(api: Arc<dyn QuestionApi>) -> Self {
        Self {
            api,
            questions: Vec::new(),
            loading: false,
            last_error: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 挂载：返回取消句柄和执行加载的 future
    ///
    /// 返回时列表已处于加载状态；future 完成、被取消或被丢弃后复位
    pub fn mount(&mut self) -> (LoadHandle, impl Future<Output = AppResult<FetchOutcome>> + Send + '_) {
        let (handle, registration) = LoadHandle::new_pair();
        (handle, self.fetch_abortable(registration))
    }

    /// 拉取全部题目，整体替换当前列表
    pub async fn fetch(&mut self) -> AppResult<FetchOutcome> {
        let (_handle, registration) = LoadHandle::new_pair();
        self.fetch_abortable(registration).await
    }

    fn fetch_abortable(
        &mut self,
        registration: AbortRegistration,
    ) -> impl Future<Output = AppResult<FetchOutcome>> + Send + '_ {
        let Self {
            api,
            questions,
            loading,
            last_error,
        } = self;
        let loading = LoadingFlag::raise(loading);

        async move {
            let result = Abortable::new(api.list(), registration).await;
            drop(loading);

            match result {
                Err(_aborted) => {
                    debug!("列表加载已取消");
                    Ok(FetchOutcome::Cancelled)
                }
                Ok(Ok(fetched)) => {
                    info!("✓ 加载完成，共 {} 道题目", fetched.len());
                    *questions = fetched;
                    *last_error = None;
                    Ok(FetchOutcome::Fetched(questions.len()))
                }
                Ok(Err(e)) => {
                    error!("❌ 加载题目失败: {}", e);
                    *last_error = Some(format!("Failed to fetch questions: {e}"));
                    Err(e)
                }
            }
        }
    }

    /// 取出指定位置题目的副本，交给表单编辑
    pub fn edit(&self, index: usize) -> Option<Question> {
        self.questions.get(index).cloned()
    }

    /// 删除题目：需要用户确认，成功后重新拉取一次
    pub async fn delete(&mut self, id: Option<&str>, confirm: &mut dyn Confirm) -> AppResult<DeleteOutcome> {
        let Some(id) = id else {
            return Ok(DeleteOutcome::NoId);
        };

        if !confirm.confirm(DELETE_PROMPT) {
            debug!("用户取消删除 {}", id);
            return Ok(DeleteOutcome::Declined);
        }

        info!("🗑️ 正在删除题目 {}", id);
        let confirmation = match self.api.delete(id).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                error!("❌ 删除失败: {}", e);
                self.last_error = Some(format!("Delete failed: {e}"));
                return Err(e);
            }
        };

        // 删除已生效；重新拉取失败只影响展示，错误已记录在 last_error
        if let Err(e) = self.fetch().await {
            warn!("⚠️ 删除后刷新列表失败: {}", e);
        }

        Ok(DeleteOutcome::Deleted(confirmation))
    }

    pub fn view(&self) -> ListView<'_> {
        if self.loading {
            return ListView::Loading {
                placeholders: PLACEHOLDER_ROWS,
            };
        }
        if self.questions.is_empty() {
            return ListView::Empty;
        }

        let rows = self
            .questions
            .iter()
            .map(|q| {
                let correct = q.correct_index();
                QuestionRow {
                    id: q.id.as_deref(),
                    question_text: &q.question_text,
                    branch_id: &q.branch_id,
                    test_id: &q.test_id,
                    difficulty: q.difficulty,
                    options: q
                        .options
                        .iter()
                        .enumerate()
                        .map(|(i, text)| OptionRow {
                            text,
                            is_correct: correct == Some(i),
                        })
                        .collect(),
                }
            })
            .collect();
        ListView::Rows(rows)
    }
}

/// 加载期间置位，离开作用域时复位
struct LoadingFlag<'a>(&'a mut bool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
