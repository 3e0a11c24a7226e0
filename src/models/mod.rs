pub mod bank;
pub mod question;
pub mod question_type;

pub use bank::QuestionBank;
pub use question::{
    GradeResult, Question, QuestionOption, SubmittedAnswer, DEFAULT_QUESTION_SCORE, DEFAULT_SUBJECT,
};
pub use question_type::QuestionType;
