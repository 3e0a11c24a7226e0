use serde::{Deserialize, Serialize};

use crate::models::question::{Question, DEFAULT_SUBJECT};

/// 题库：一份导入文档解析出的全部题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// 题库名称，取自源文件名
    pub name: String,
    /// 科目（文档级批量科目）
    pub subject: String,
    /// 题目列表，保持源文档顺序
    pub questions: Vec<Question>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionBank {
    /// 由解析结果构建题库，科目取首题的批量科目
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        let subject = questions
            .first()
            .map(|q| q.subject.clone())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        Self {
            name: name.into(),
            subject,
            questions,
            file_path: None,
        }
    }

    /// 附带源文件路径
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
