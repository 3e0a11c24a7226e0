use serde::{Deserialize, Serialize};

/// 题型枚举
///
/// 闭合集合：除这五种题型外不做任何推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    Single,
    /// 多选题
    Multiple,
    /// 判断题
    TrueFalse,
    /// 简答题
    Essay,
    /// 填空题
    Fill,
}

impl QuestionType {
    /// 获取中文名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::Single => "单选题",
            QuestionType::Multiple => "多选题",
            QuestionType::TrueFalse => "判断题",
            QuestionType::Essay => "简答题",
            QuestionType::Fill => "填空题",
        }
    }

    /// 获取英文标记（导入文档中与中文标记等价）
    pub fn marker(self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::TrueFalse => "truefalse",
            QuestionType::Essay => "essay",
            QuestionType::Fill => "fill",
        }
    }

    /// 从标记字符串解析题型（精确匹配，中英文均可）
    pub fn from_marker(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "单选题" | "single" => Some(QuestionType::Single),
            "多选题" | "multiple" => Some(QuestionType::Multiple),
            "判断题" | "truefalse" => Some(QuestionType::TrueFalse),
            "简答题" | "essay" => Some(QuestionType::Essay),
            "填空题" | "fill" => Some(QuestionType::Fill),
            _ => None,
        }
    }

    /// 是否为选择类题型（需要选项）
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionType::Single | QuestionType::Multiple)
    }

    /// 全部题型
    pub fn all() -> [QuestionType; 5] {
        [
            QuestionType::Single,
            QuestionType::Multiple,
            QuestionType::TrueFalse,
            QuestionType::Essay,
            QuestionType::Fill,
        ]
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
