//! 答案评估核心
//!
//! 对照题目的标准答案给学生作答打分。除简答题外都是二值给分；
//! 简答题按关键词匹配率给部分分。与解析器完全独立，
//! 直接创建的题目同样可以评分。

pub mod policy;

pub use policy::{EssayPolicy, ScoreTier};

use tracing::debug;

use crate::models::{GradeResult, Question, QuestionType, SubmittedAnswer};

/// 答案评估器
#[derive(Debug, Clone, Default)]
pub struct AnswerEvaluator {
    policy: EssayPolicy,
}

impl AnswerEvaluator {
    /// 使用默认简答题策略创建评估器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义简答题策略创建评估器
    pub fn with_policy(policy: EssayPolicy) -> Self {
        Self { policy }
    }

    /// 评估一份作答
    ///
    /// 空作答（空串/空数组）一律判错零分，不进入题型逻辑。
    /// 得分始终落在 [0, 题目满分] 区间内。
    pub fn evaluate(&self, question: &Question, answer: &SubmittedAnswer) -> GradeResult {
        debug!(
            "评估答案 - 题型: {}, 正确答案: {}",
            question.question_type, question.correct_answer
        );

        if answer.is_empty() {
            debug!("评估答案 - 作答为空，判错");
            return GradeResult::zero();
        }

        let max_score = question.max_score();
        match question.question_type {
            QuestionType::Single | QuestionType::TrueFalse => {
                binary(check_exact(question, answer), max_score)
            }
            QuestionType::Multiple => binary(check_multiple(question, answer), max_score),
            QuestionType::Fill => binary(check_fill(question, answer), max_score),
            QuestionType::Essay => self.grade_essay(question, answer, max_score),
        }
    }

    /// 简答题：关键词匹配 + 长度合理性惩罚 + 分档给分
    fn grade_essay(
        &self,
        question: &Question,
        answer: &SubmittedAnswer,
        max_score: f64,
    ) -> GradeResult {
        let submitted = match answer {
            SubmittedAnswer::Single(s) => s.clone(),
            SubmittedAnswer::Multiple(items) => items.join("\n"),
        };
        let submitted = submitted.trim().to_lowercase();
        let correct = question.correct_answer.trim().to_lowercase();

        let submitted_len = submitted.chars().count();
        if submitted_len < self.policy.min_answer_chars {
            debug!("评估答案 - 简答题作答过短 ({} 字符)，判零分", submitted_len);
            return GradeResult::zero();
        }

        let keywords = extract_keywords(&correct, self.policy.min_keyword_chars);
        if keywords.is_empty() {
            return GradeResult::zero();
        }

        let mut matched = 0usize;
        let mut total_keyword_len = 0usize;
        let mut matched_keyword_len = 0usize;
        for keyword in &keywords {
            let len = keyword.chars().count();
            total_keyword_len += len;
            if submitted.contains(keyword.as_str()) {
                matched += 1;
                matched_keyword_len += len;
            }
        }

        let count_ratio = matched as f64 / keywords.len() as f64;
        let length_ratio = if total_keyword_len > 0 {
            matched_keyword_len as f64 / total_keyword_len as f64
        } else {
            0.0
        };
        let match_ratio =
            count_ratio * self.policy.count_weight + length_ratio * self.policy.length_weight;

        let answer_length_ratio = submitted_len as f64 / correct.chars().count() as f64;
        let penalty = self.policy.length_penalty(answer_length_ratio);
        let adjusted = match_ratio * penalty;

        let (is_correct, fraction) = self.policy.tier_for(adjusted);

        debug!(
            "评估答案 - 简答题: 关键词 {}/{}, 数量匹配率 {:.3}, 长度匹配率 {:.3}, 调整后 {:.3}",
            matched,
            keywords.len(),
            count_ratio,
            length_ratio,
            adjusted
        );

        GradeResult {
            is_correct,
            score: round2(fraction * max_score),
        }
    }
}

/// 使用默认策略评估一份作答
///
/// [`AnswerEvaluator::evaluate`] 的便捷入口
pub fn grade_answer(question: &Question, answer: &SubmittedAnswer) -> GradeResult {
    AnswerEvaluator::new().evaluate(question, answer)
}

/// 单选/判断：大小写不敏感的整串相等
fn check_exact(question: &Question, answer: &SubmittedAnswer) -> bool {
    let submitted = match answer {
        SubmittedAnswer::Single(s) => s.as_str(),
        // 单值题收到单元素数组时取其元素，其余数组形态判错
        SubmittedAnswer::Multiple(items) if items.len() == 1 => items[0].as_str(),
        SubmittedAnswer::Multiple(_) => return false,
    };
    submitted.trim().to_lowercase() == question.correct_answer.trim().to_lowercase()
}

/// 多选：两侧都化为有序的去空白标记序列后比较，顺序无关
fn check_multiple(question: &Question, answer: &SubmittedAnswer) -> bool {
    let mut submitted: Vec<String> = match answer {
        SubmittedAnswer::Multiple(items) => {
            items.iter().map(|item| item.trim().to_string()).collect()
        }
        SubmittedAnswer::Single(s) => s.split(',').map(|item| item.trim().to_string()).collect(),
    };
    submitted.sort();

    let mut correct: Vec<String> = question
        .correct_answer
        .split(',')
        .map(|item| item.trim().to_string())
        .collect();
    correct.sort();

    submitted == correct
}

/// 填空：按空拆分后逐空匹配，空与空之间顺序无关
fn check_fill(question: &Question, answer: &SubmittedAnswer) -> bool {
    let submitted_blanks = match answer {
        SubmittedAnswer::Single(s) => split_submitted_blanks(s),
        SubmittedAnswer::Multiple(items) => items
            .iter()
            .map(|item| item.trim().to_lowercase())
            .collect(),
    };
    let correct_blanks = split_correct_blanks(&question.correct_answer);

    if submitted_blanks.len() != correct_blanks.len() {
        return false;
    }
    submitted_blanks.iter().all(|submitted| {
        correct_blanks
            .iter()
            .any(|correct| submitted == correct || correct.contains(submitted.as_str()))
    })
}

/// 中文输入法下的｜折叠为半角
fn fold_fill_separators(raw: &str) -> String {
    raw.replace("｜｜", "||").replace('｜', "|")
}

/// 学生作答的拆空：|| → 中文逗号 → 半角逗号 → 单空
fn split_submitted_blanks(raw: &str) -> Vec<String> {
    let folded = fold_fill_separators(raw);
    if folded.contains("||") {
        folded
            .split("||")
            .map(|blank| blank.trim().to_lowercase())
            .collect()
    } else if folded.contains('，') {
        folded
            .split('，')
            .map(|blank| blank.trim().to_lowercase())
            .collect()
    } else if folded.contains(',') {
        folded
            .split(',')
            .map(|blank| blank.trim().to_lowercase())
            .collect()
    } else {
        vec![folded.trim().to_lowercase()]
    }
}

/// 标准答案的拆空：|| 分隔，兼容旧数据的逗号分隔
fn split_correct_blanks(raw: &str) -> Vec<String> {
    let folded = fold_fill_separators(raw);
    if folded.contains("||") {
        folded
            .split("||")
            .map(|blank| blank.trim().to_lowercase())
            .collect()
    } else {
        folded
            .split(',')
            .map(|blank| blank.trim().to_lowercase())
            .collect()
    }
}

/// 标准答案分词：剥除标点后按空白切分，保留达到最小长度的词
fn extract_keywords(correct: &str, min_chars: usize) -> Vec<String> {
    const PUNCTUATION: [char; 20] = [
        '：', ':', '；', ';', '，', ',', '。', '.', '！', '!', '？', '?', '（', '）', '(', ')',
        '【', '】', '[', ']',
    ];
    correct
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .filter(|word| word.chars().count() >= min_chars)
        .map(str::to_string)
        .collect()
}

fn binary(is_correct: bool, max_score: f64) -> GradeResult {
    GradeResult {
        is_correct,
        score: if is_correct { max_score } else { 0.0 },
    }
}

/// 保留两位小数
fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
