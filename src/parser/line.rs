//! 行级分类器
//!
//! 每一行恰好被赋予一个结构角色，优先级固定：
//! 科目声明 → 题目起始 → 选项 → 答案 → 解析 → 说明噪声 → 正文。
//! 分类只发生在这一处，状态机按角色穷尽匹配，不再做二次判定。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::QuestionOption;
use crate::parser::normalize::{normalize, strip_invisible};

/// 行的结构角色
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    /// 题目起始行（含题型标记），由题头解析器进一步拆分
    QuestionStart,
    /// 选项行；选项标记后无内容时 `value` 为空串
    Option { key: char, value: String },
    /// 答案行，携带关键字之后的答案文本（可为空，后续行继续累积）
    Answer(String),
    /// 解析行，携带关键字之后的解析文本
    Explanation(String),
    /// 标题/说明/科目声明等噪声行，跳过
    Noise,
    /// 普通正文行
    Content,
}

/// 模板文档中常见的说明性关键词
static INSTRUCTION_KEYWORDS: [&str; 16] = [
    "题库", "模板", "说明", "要求", "格式", "示例", "注意", "提示",
    "导入", "使用", "支持", "标准", "错误", "避免", "必须", "科目",
];

static SUBJECT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(科目|subject)[:\s]*").unwrap());

static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").unwrap());

/// 题型标记，可选地由方括号包裹（全角括号已在标准化时折叠）
static TYPE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[*(单选题|多选题|判断题|简答题|填空题|single|multiple|truefalse|essay|fill)\]*")
        .unwrap()
});

static OPTION_NORMALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-F])[.,:\s]+(.*)$").unwrap());

/// 原始行兜底：全角句号（U+FF0E）不在标准化映射表内
static OPTION_RAW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-F])[．.\s]+(.*)$").unwrap());

static ANSWER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(答案|正确答案|参考答案)[:\s]*").unwrap());

static ANSWER_PREFIX_RAW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(答案|正确答案|参考答案)[：:\s]*").unwrap());

static EXPLANATION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(解析|答案解析|解释|说明)[:\s]*").unwrap());

static EXPLANATION_PREFIX_RAW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(解析|答案解析|解释|说明)[：:\s]*").unwrap());

/// 对一行文本做唯一分类
pub fn classify(line: &str) -> LineRole {
    let normalized = normalize(line);

    // 科目声明行先于结构判定（文档内的科目行一律跳过，批量科目另行预扫描）
    if SUBJECT_PREFIX.is_match(&normalized) {
        return LineRole::Noise;
    }
    if is_question_start(&normalized) {
        return LineRole::QuestionStart;
    }
    if let Some((key, value)) = option_parts(line, &normalized) {
        return LineRole::Option { key, value };
    }
    if is_answer_line(line, &normalized) {
        return LineRole::Answer(parse_answer_text(line, &normalized));
    }
    if is_explanation_line(line, &normalized) {
        return LineRole::Explanation(parse_explanation_text(line, &normalized));
    }
    if is_noise(&normalized) {
        return LineRole::Noise;
    }
    LineRole::Content
}

/// 题目起始：数字序号 + 题型标记，或无序号文档中的裸题型标记行
fn is_question_start(normalized: &str) -> bool {
    let has_number_prefix = NUMBER_PREFIX.is_match(normalized);
    let has_type_marker = TYPE_MARKER.is_match(normalized);
    (has_number_prefix && has_type_marker)
        || (!has_number_prefix && has_type_marker && !normalized.is_empty())
}

/// 选项行拆分；选项标记后无内容时返回空值（状态机仍会切换分区）
fn option_parts(raw: &str, normalized: &str) -> Option<(char, String)> {
    let caps = OPTION_NORMALIZED
        .captures(normalized)
        .or_else(|| OPTION_RAW.captures(raw.trim()))?;
    let key = caps.get(1)?.as_str().chars().next()?;
    let value = caps.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
    Some((key, value))
}

/// 严格的选项解析：标记后必须有内容
pub fn parse_option(line: &str) -> Option<QuestionOption> {
    let normalized = normalize(line);
    let (key, value) = option_parts(line, &normalized)?;
    if value.is_empty() {
        return None;
    }
    Some(QuestionOption::new(key, value))
}

fn is_answer_line(raw: &str, normalized: &str) -> bool {
    ANSWER_PREFIX.is_match(normalized) || ANSWER_PREFIX_RAW.is_match(&strip_invisible(raw))
}

fn is_explanation_line(raw: &str, normalized: &str) -> bool {
    EXPLANATION_PREFIX.is_match(normalized)
        || EXPLANATION_PREFIX_RAW.is_match(&strip_invisible(raw))
}

/// 答案关键字之后的文本；标准化行取不到时回退到原始行
fn parse_answer_text(raw: &str, normalized: &str) -> String {
    let answer = ANSWER_PREFIX.replace(normalized, "").trim().to_string();
    if !answer.is_empty() {
        return answer;
    }
    ANSWER_PREFIX_RAW
        .replace(&strip_invisible(raw), "")
        .trim()
        .to_string()
}

fn parse_explanation_text(raw: &str, normalized: &str) -> String {
    let explanation = EXPLANATION_PREFIX.replace(normalized, "").trim().to_string();
    if !explanation.is_empty() {
        return explanation;
    }
    EXPLANATION_PREFIX_RAW
        .replace(&strip_invisible(raw), "")
        .trim()
        .to_string()
}

/// 标题/说明行：过短，或包含模板文档的说明性关键词
fn is_noise(normalized: &str) -> bool {
    if normalized.chars().count() < 3 {
        return true;
    }
    INSTRUCTION_KEYWORDS.iter().any(|kw| normalized.contains(kw))
}

/// 科目声明行的声明内容（批量科目预扫描使用）
pub(crate) fn subject_declaration(line: &str) -> Option<String> {
    let normalized = normalize(line);
    if !SUBJECT_PREFIX.is_match(&normalized) {
        return None;
    }
    Some(SUBJECT_PREFIX.replace(&normalized, "").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_question_start_requires_type_marker() {
        assert_eq!(classify("1.【单选题】天空是什么颜色？"), LineRole::QuestionStart);
        assert_eq!(classify("１２.（多选题）以下正确的是"), LineRole::QuestionStart);
        // 裸题型标记行（无序号文档）
        assert_eq!(classify("判断题：地球是圆的"), LineRole::QuestionStart);
        // 有序号但无题型标记的行不是题目起始
        assert!(!matches!(classify("3. 这只是普通的编号段落，很长很长很长"), LineRole::QuestionStart));
    }

    #[test]
    fn test_option_line() {
        assert_eq!(
            classify("A. 蓝色"),
            LineRole::Option { key: 'A', value: "蓝色".to_string() }
        );
        assert_eq!(
            classify("Ｂ、红色"),
            LineRole::Option { key: 'B', value: "红色".to_string() }
        );
        // 全角句号 U+FF0E 只能被原始行兜底捕获
        assert_eq!(
            classify("C．绿色"),
            LineRole::Option { key: 'C', value: "绿色".to_string() }
        );
        // 标记后无内容：角色成立但值为空
        assert_eq!(classify("D."), LineRole::Option { key: 'D', value: String::new() });
    }

    #[test]
    fn test_answer_and_explanation_line() {
        assert_eq!(classify("答案：A"), LineRole::Answer("A".to_string()));
        assert_eq!(classify("参考答案: B,C"), LineRole::Answer("B,C".to_string()));
        assert_eq!(
            classify("\u{FEFF}答案\u{200B}：D"),
            LineRole::Answer("D".to_string())
        );
        assert_eq!(
            classify("解析：天空因瑞利散射呈蓝色。"),
            LineRole::Explanation("天空因瑞利散射呈蓝色.".to_string())
        );
        // 答案判定优先于解析："答案解析"前缀落入答案分支
        assert!(matches!(classify("答案解析：略"), LineRole::Answer(_)));
    }

    #[test]
    fn test_noise_line() {
        assert_eq!(classify("科目：数学"), LineRole::Noise);
        assert_eq!(classify("一"), LineRole::Noise);
        assert_eq!(classify("请按照模板格式填写题目内容"), LineRole::Noise);
        // 结构行即使包含说明性关键词也不算噪声
        assert!(matches!(classify("B. 必须遵守的规定"), LineRole::Option { .. }));
    }

    #[test]
    fn test_content_line() {
        assert_eq!(classify("这道题考察光的散射原理与大气现象"), LineRole::Content);
    }

    #[test]
    fn test_parse_option_strict() {
        let opt = parse_option("A. 蓝色").unwrap();
        assert_eq!((opt.key, opt.value.as_str()), ('A', "蓝色"));
        assert!(parse_option("A.").is_none());
        assert!(parse_option("G. 超出范围").is_none());
    }

    #[test]
    fn test_subject_declaration() {
        assert_eq!(subject_declaration("科目：物理"), Some("物理".to_string()));
        assert_eq!(subject_declaration("subject: 化学"), Some("化学".to_string()));
        assert_eq!(subject_declaration("第一章 概述"), None);
    }

    proptest! {
        /// 选项行解析往返：A-F 键 + 无分隔符的非空值
        #[test]
        fn prop_option_round_trip(key in 0u8..6, value in "[\u{4e00}-\u{4eff}a-z0-9]{1,12}") {
            let key = (b'A' + key) as char;
            let line = format!("{}. {}", key, value);
            let opt = parse_option(&line).unwrap();
            prop_assert_eq!(opt.key, key);
            prop_assert_eq!(opt.value, value);
        }
    }
}
