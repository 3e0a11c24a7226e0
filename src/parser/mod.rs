//! 题目导入解析核心
//!
//! 纯同步计算：输入整份 UTF-8 文本，输出结构化题目序列。
//! 行分类、题头拆分、状态机累积、完整性校验各自独立成模块，
//! 便于对每个环节单独测试。

pub mod document;
pub mod header;
pub mod line;
pub mod normalize;
pub mod validate;

pub use document::{parse_document, Section};
pub use line::{classify, parse_option, LineRole};
pub use normalize::normalize;
pub use validate::validate;
