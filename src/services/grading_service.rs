//! 判卷服务 - 业务能力层
//!
//! 把单题评估器组合成整卷判分：逐题评估、累计得分、产出汇总。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::evaluator::{AnswerEvaluator, EssayPolicy};
use crate::models::{Question, SubmittedAnswer};
use crate::utils::logging::truncate_text;

/// 单题判分记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_title: String,
    pub is_correct: bool,
    pub score: f64,
    pub max_score: f64,
}

/// 整卷判分结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub question_count: usize,
    pub correct_count: usize,
    pub total_score: f64,
    pub obtained_score: f64,
    pub records: Vec<AnswerRecord>,
}

/// 判卷服务
#[derive(Debug, Clone, Default)]
pub struct GradingService {
    evaluator: AnswerEvaluator,
}

impl GradingService {
    /// 创建使用默认简答题策略的判卷服务
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义简答题策略
    pub fn with_policy(policy: EssayPolicy) -> Self {
        Self {
            evaluator: AnswerEvaluator::with_policy(policy),
        }
    }

    /// 判一整卷
    ///
    /// 每个条目独立评估，未作答的题目以空答案传入即可（记零分）。
    pub fn grade_sheet(&self, sheet: &[(Question, SubmittedAnswer)]) -> ExamResult {
        let mut records = Vec::with_capacity(sheet.len());
        let mut total_score = 0.0;
        let mut obtained_score = 0.0;
        let mut correct_count = 0;

        for (question, answer) in sheet {
            let result = self.evaluator.evaluate(question, answer);
            debug!(
                "题目判分: {} -> 正确={} 得分={}",
                truncate_text(&question.title, 30),
                result.is_correct,
                result.score
            );

            total_score += question.max_score();
            obtained_score += result.score;
            if result.is_correct {
                correct_count += 1;
            }
            records.push(AnswerRecord {
                question_title: question.title.clone(),
                is_correct: result.is_correct,
                score: result.score,
                max_score: question.max_score(),
            });
        }

        info!(
            "判卷完成: 共 {} 题, 答对 {} 题, 得分 {:.2}/{:.2}",
            sheet.len(),
            correct_count,
            obtained_score,
            total_score
        );

        ExamResult {
            question_count: sheet.len(),
            correct_count,
            total_score,
            obtained_score,
            records,
        }
    }
}
