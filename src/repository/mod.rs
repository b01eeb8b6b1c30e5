pub mod loader;
pub mod types;

pub use loader::{load_csv, LoadOptions};
pub use types::{Answer, AnswerRepository, Question, QuestionNumber, StudentId, StudentResponses};
