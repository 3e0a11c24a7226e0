use serde::{Deserialize, Serialize};

use crate::models::question_type::QuestionType;

/// 默认科目（文档未声明批量科目时使用）
pub const DEFAULT_SUBJECT: &str = "未分类";

/// 题目分值缺省值（试卷未配置分值时使用）
pub const DEFAULT_QUESTION_SCORE: f64 = 5.0;

/// 选项：键为 A-F 中的一个字母
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub key: char,
    pub value: String,
}

impl QuestionOption {
    pub fn new(key: char, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// 题目记录
///
/// 解析期间作为可变草稿逐行累积，通过校验后作为不可变记录输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 题型
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// 简短标题（由题干内容派生，非人工撰写）
    pub title: String,
    /// 题干内容，可跨多行（按源文档顺序以换行连接）
    pub content: String,
    /// 正确答案原文，语义随题型而变
    pub correct_answer: String,
    /// 解析说明，可为空
    #[serde(default)]
    pub explanation: String,
    /// 难度 1-5
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// 科目，默认取文档级批量科目
    pub subject: String,
    /// 章节，文本导入路径下恒为空
    #[serde(default)]
    pub chapter: String,
    /// 本题满分，由试卷配置提供；缺省时评分端按 5 分处理
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// 选项列表，键唯一；简答/填空题为空
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

fn default_difficulty() -> u8 {
    1
}

impl Question {
    /// 创建指定题型的空白草稿
    pub fn draft(question_type: QuestionType) -> Self {
        Self {
            question_type,
            title: String::new(),
            content: String::new(),
            correct_answer: String::new(),
            explanation: String::new(),
            difficulty: default_difficulty(),
            subject: DEFAULT_SUBJECT.to_string(),
            chapter: String::new(),
            score: None,
            options: Vec::new(),
        }
    }

    /// 本题满分，缺省按 [`DEFAULT_QUESTION_SCORE`] 计
    pub fn max_score(&self) -> f64 {
        self.score.unwrap_or(DEFAULT_QUESTION_SCORE)
    }

    /// 按键查找选项
    pub fn option(&self, key: char) -> Option<&QuestionOption> {
        self.options.iter().find(|opt| opt.key == key)
    }

    /// 追加选项，键已存在时丢弃（重复选项行不覆盖）
    pub fn push_option(&mut self, option: QuestionOption) {
        if self.option(option.key).is_none() {
            self.options.push(option);
        }
    }
}

/// 学生提交的答案
///
/// 前端对多选题提交数组，其余题型提交字符串；
/// 以闭合变体代替运行时类型探测
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    /// 单值答案（单选/判断/填空/简答）
    Single(String),
    /// 多值答案（多选）
    Multiple(Vec<String>),
}

impl SubmittedAnswer {
    /// 答案是否为空（缺失、空串、空数组均视为空）
    pub fn is_empty(&self) -> bool {
        match self {
            SubmittedAnswer::Single(s) => s.trim().is_empty(),
            SubmittedAnswer::Multiple(items) => items.is_empty(),
        }
    }
}

impl From<&str> for SubmittedAnswer {
    fn from(s: &str) -> Self {
        SubmittedAnswer::Single(s.to_string())
    }
}

impl From<Vec<String>> for SubmittedAnswer {
    fn from(items: Vec<String>) -> Self {
        SubmittedAnswer::Multiple(items)
    }
}

/// 单题评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// 是否判为正确
    pub is_correct: bool,
    /// 得分，始终落在 [0, 题目满分] 区间内
    pub score: f64,
}

impl GradeResult {
    /// 零分结果（空答案等场景）
    pub fn zero() -> Self {
        Self {
            is_correct: false,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_option_dedup() {
        let mut q = Question::draft(QuestionType::Single);
        q.push_option(QuestionOption::new('A', "蓝色"));
        q.push_option(QuestionOption::new('A', "红色"));
        q.push_option(QuestionOption::new('B', "红色"));
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.option('A').unwrap().value, "蓝色");
    }

    #[test]
    fn test_max_score_default() {
        let mut q = Question::draft(QuestionType::Essay);
        assert_eq!(q.max_score(), 5.0);
        q.score = Some(10.0);
        assert_eq!(q.max_score(), 10.0);
    }

    #[test]
    fn test_submitted_answer_empty() {
        assert!(SubmittedAnswer::Single("   ".to_string()).is_empty());
        assert!(SubmittedAnswer::Multiple(vec![]).is_empty());
        assert!(!SubmittedAnswer::Single("A".to_string()).is_empty());
    }

    #[test]
    fn test_question_toml_round_trip() {
        let mut q = Question::draft(QuestionType::Single);
        q.title = "天空是什么颜色?".to_string();
        q.content = "天空是什么颜色?".to_string();
        q.correct_answer = "A".to_string();
        q.push_option(QuestionOption::new('A', "蓝色"));
        q.push_option(QuestionOption::new('B', "红色"));

        let text = toml::to_string(&q).unwrap();
        let back: Question = toml::from_str(&text).unwrap();
        assert_eq!(back, q);
    }
}
