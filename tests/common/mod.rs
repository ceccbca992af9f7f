#![allow(dead_code)]

use futures::future::BoxFuture;
use question_admin::error::ApiError;
use question_admin::models::Difficulty;
use question_admin::{AppError, AppResult, Question, QuestionApi};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// 记录下来的一次调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(Question),
    Update(String, Question),
    Delete(String),
}

/// 让下一次某个操作失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
}

/// 内存版题库服务
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<Call>>,
    store: Mutex<Vec<Question>>,
    fail_next: Mutex<Option<Op>>,
    hang_list: AtomicBool,
}

impl MockApi {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let api = Self::default();
        *api.store.lock().unwrap() = questions;
        api
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (op, call),
                    (Op::List, Call::List)
                        | (Op::Create, Call::Create(_))
                        | (Op::Update, Call::Update(..))
                        | (Op::Delete, Call::Delete(_))
                )
            })
            .count()
    }

    pub fn stored(&self) -> Vec<Question> {
        self.store.lock().unwrap().clone()
    }

    /// 服务端数据被其他人修改
    pub fn replace_store(&self, questions: Vec<Question>) {
        *self.store.lock().unwrap() = questions;
    }

    pub fn fail_next(&self, op: Op) {
        *self.fail_next.lock().unwrap() = Some(op);
    }

    /// list 永远不返回
    pub fn hang_list(&self) {
        self.hang_list.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn should_fail(&self, op: Op) -> bool {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail == Some(op) {
            *fail = None;
            true
        } else {
            false
        }
    }
}

fn service_error(endpoint: &str) -> AppError {
    ApiError::Service {
        endpoint: endpoint.to_string(),
        status: 500,
        body: "internal error".to_string(),
    }
    .into()
}

impl QuestionApi for MockApi {
    fn list(&self) -> BoxFuture<'_, AppResult<Vec<Question>>> {
        self.record(Call::List);
        if self.hang_list.load(Ordering::SeqCst) {
            return Box::pin(futures::future::pending::<AppResult<Vec<Question>>>());
        }
        let result = if self.should_fail(Op::List) {
            Err(service_error("/questions"))
        } else {
            Ok(self.stored())
        };
        Box::pin(async move { result })
    }

    fn create<'a>(&'a self, question: &'a Question) -> BoxFuture<'a, AppResult<Question>> {
        self.record(Call::Create(question.clone()));
        let result = if self.should_fail(Op::Create) {
            Err(service_error("/questions"))
        } else {
            let mut store = self.store.lock().unwrap();
            let mut created = question.clone();
            created.id = Some(format!("q{}", store.len() + 1));
            store.push(created.clone());
            Ok(created)
        };
        Box::pin(async move { result })
    }

    fn update<'a>(&'a self, id: &'a str, question: &'a Question) -> BoxFuture<'a, AppResult<Question>> {
        self.record(Call::Update(id.to_string(), question.clone()));
        let result = if self.should_fail(Op::Update) {
            Err(service_error("/questions/{id}"))
        } else {
            let mut store = self.store.lock().unwrap();
            let updated = match store.iter_mut().find(|q| q.id.as_deref() == Some(id)) {
                Some(slot) => {
                    *slot = question.clone();
                    slot.id = Some(id.to_string());
                    Ok(slot.clone())
                }
                None => Err(ApiError::NotFound {
                    endpoint: format!("/questions/{id}"),
                    id: Some(id.to_string()),
                }
                .into()),
            };
            updated
        };
        Box::pin(async move { result })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<Value>> {
        self.record(Call::Delete(id.to_string()));
        let result = if self.should_fail(Op::Delete) {
            Err(service_error("/questions/{id}"))
        } else {
            let mut store = self.store.lock().unwrap();
            let before = store.len();
            store.retain(|q| q.id.as_deref() != Some(id));
            let removed = store.len() < before;
            drop(store);
            if removed {
                Ok(json!({ "message": "Question deleted" }))
            } else {
                Err(ApiError::NotFound {
                    endpoint: format!("/questions/{id}"),
                    id: Some(id.to_string()),
                }
                .into())
            }
        };
        Box::pin(async move { result })
    }
}

/// 示例题目
pub fn sample_question() -> Question {
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

pub fn stored_question(id: &str, text: &str) -> Question {
    Question {
        id: Some(id.to_string()),
        question_text: text.to_string(),
        ..sample_question()
    }
}
