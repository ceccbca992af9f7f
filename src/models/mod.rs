pub mod question;

pub use question::{CorrectAnswer, Difficulty, Question, OPTION_COUNT};
