pub mod question_client;

pub use question_client::{QuestionApi, QuestionClient, QUESTIONS_PATH};
