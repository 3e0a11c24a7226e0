//! 题目完整性校验
//!
//! 草稿收束前的最后一道闸门，不通过的草稿静默丢弃。

use crate::models::{Question, QuestionType};

/// 校验题目草稿的结构完整性
///
/// 标题与答案必须非空；单选/多选至少两个选项；判断题恰好两个选项。
/// 题型合法性由闭合枚举保证，无需运行时检查。
pub fn validate(question: &Question) -> bool {
    if question.title.is_empty() || question.correct_answer.is_empty() {
        return false;
    }
    match question.question_type {
        QuestionType::Single | QuestionType::Multiple => question.options.len() >= 2,
        QuestionType::TrueFalse => question.options.len() == 2,
        QuestionType::Essay | QuestionType::Fill => true,
    }
}
