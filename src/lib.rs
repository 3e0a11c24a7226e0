//! # Question Import Grade
//!
//! 题目导入与判分核心：把松散排版的人工题目文档解析成结构化题目，
//! 并对学生作答按题型规则判分。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 解析/评估核心（Core）
//! - `parser/` - 纯同步的文档解析：行分类 → 题头拆分 → 状态机累积 → 校验
//! - `evaluator/` - 单题判分，简答题按关键词匹配给部分分
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份文档/单份答卷
//! - `ImportService` - 读取文档、健全性检查、落盘题库
//! - `GradingService` - 整卷判分汇总
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档导入器，管理并发和统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{ImportError, ParseError};
pub use evaluator::{grade_answer, AnswerEvaluator, EssayPolicy};
pub use models::{
    GradeResult, Question, QuestionBank, QuestionOption, QuestionType, SubmittedAnswer,
};
pub use orchestrator::App;
pub use parser::parse_document;
pub use services::{ExamResult, GradingService, ImportService};
