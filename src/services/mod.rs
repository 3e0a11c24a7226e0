pub mod grading_service;
pub mod import_service;

pub use grading_service::{AnswerRecord, ExamResult, GradingService};
pub use import_service::ImportService;
