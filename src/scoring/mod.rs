pub mod policy;
pub mod engine;
pub mod validation;

pub use policy::{ExamPolicies, SubjectPolicy};
pub use engine::{score_subject, score_total, QuestionMark, SubjectScore, SubjectTotal, TotalScore, Verdict};
pub use validation::{ensure_valid, validate_policies};
