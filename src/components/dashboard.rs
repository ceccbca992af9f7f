//! 视图协调器
//!
//! 两个状态：`Add`（表单，可携带待编辑的题目）与 `List`（列表）。
//! 切换视图时重新创建组件，相当于卸载旧组件并挂载新组件。

use crate::clients::QuestionApi;
use crate::components::form::{QuestionForm, SubmitOutcome};
use crate::components::lifecycle::Confirm;
use crate::components::list::{DeleteOutcome, FetchOutcome, QuestionList};
use crate::error::AppResult;
use crate::models::Question;
use std::sync::Arc;
use tracing::{debug, info};

/// 视图状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// 表单；`editing` 为从列表选中的题目
    Add { editing: Option<Question> },
    List,
}

impl ViewState {
    pub fn is_add(&self) -> bool {
        matches!(self, ViewState::Add { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ViewState::List)
    }
}

/// 当前挂载的组件
#[derive(Debug)]
pub enum Mounted {
    Form(QuestionForm),
    List(QuestionList),
}

/// 管理后台
pub struct Dashboard {
    api: Arc<dyn QuestionApi>,
    state: ViewState,
    mounted: Mounted,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &self.state)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// 初始状态为空白表单
    pub fn new(api: Arc<dyn QuestionApi>) -> Self {
        let mounted = Mounted::Form(QuestionForm::new(api.clone(), None));
        Self {
            api,
            state: ViewState::Add { editing: None },
            mounted,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mounted(&self) -> &Mounted {
        &self.mounted
    }

    pub fn form(&self) -> Option<&QuestionForm> {
        match &self.mounted {
            Mounted::Form(form) => Some(form),
            Mounted::List(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut QuestionForm> {
        match &mut self.mounted {
            Mounted::Form(form) => Some(form),
            Mounted::List(_) => None,
        }
    }

    pub fn list(&self) -> Option<&QuestionList> {
        match &self.mounted {
            Mounted::List(list) => Some(list),
            Mounted::Form(_) => None,
        }
    }

    /// 点击 "Add Question" 标签：总是回到空白的新建表单
    ///
    /// 只有已经处于新建模式时才保留当前草稿；编辑中的题目会被丢弃
    pub fn select_add(&mut self) {
        if self.state == (ViewState::Add { editing: None }) {
            return;
        }
        self.show_form(None);
    }

    /// 点击 "Manage Questions" 标签：挂载列表并加载
    pub async fn select_list(&mut self) -> AppResult<Option<FetchOutcome>> {
        if self.state.is_list() {
            return Ok(None);
        }
        self.show_list().await.map(Some)
    }

    /// 提交表单；成功后切换到列表
    pub async fn submit(&mut self) -> AppResult<Option<SubmitOutcome>> {
        let Mounted::Form(form) = &mut self.mounted else {
            return Ok(None);
        };

        let outcome = form.submit().await?;
        if matches!(outcome, SubmitOutcome::Busy) {
            return Ok(Some(outcome));
        }

        // 列表加载失败时错误保存在列表组件里，不影响已经成功的保存
        if let Err(e) = self.show_list().await {
            debug!("保存后加载列表失败: {}", e);
        }
        Ok(Some(outcome))
    }

    /// 列表中点击编辑：带着选中的题目切换到表单
    pub fn edit(&mut self, index: usize) -> Option<&Question> {
        let Mounted::List(list) = &self.mounted else {
            return None;
        };
        let question = list.edit(index)?;
        info!("✏️ 编辑题目 {:?}", question.id);
        self.show_form(Some(question));
        self.form().map(QuestionForm::draft)
    }

    /// 列表中点击删除
    pub async fn delete(&mut self, index: usize, confirm: &mut dyn Confirm) -> AppResult<Option<DeleteOutcome>> {
        let Mounted::List(list) = &mut self.mounted else {
            return Ok(None);
        };
        let Some(question) = list.questions().get(index) else {
            return Ok(None);
        };
        let id = question.id.clone();
        list.delete(id.as_deref(), confirm).await.map(Some)
    }

    fn show_form(&mut self, editing: Option<Question>) {
        debug!("切换到表单视图");
        self.mounted = Mounted::Form(QuestionForm::new(self.api.clone(), editing.clone()));
        self.state = ViewState::Add { editing };
    }

    async fn show_list(&mut self) -> AppResult<FetchOutcome> {
        debug!("切换到列表视图");
        let mut list = QuestionList::new(self.api.clone());
        let result = list.fetch().await;
        self.mounted = Mounted::List(list);
        self.state = ViewState::List;
        result
    }
}
