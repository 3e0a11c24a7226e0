//! 题头解析
//!
//! 题目起始行同时承载题号、题型标记、题干，偶尔还内联选项、
//! 答案和解析（整题写在一行的文档），在这里一次拆分完。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Question, QuestionOption, QuestionType};
use crate::parser::document::Section;
use crate::parser::line::parse_option;
use crate::parser::normalize::normalize;

/// 题头解析结果：草稿 + 状态机应进入的分区
#[derive(Debug)]
pub struct HeaderParse {
    pub draft: Question,
    pub section: Section,
}

/// 题型标记剥离模式，按固定顺序探测
static TYPE_PATTERNS: Lazy<[(QuestionType, Regex); 5]> = Lazy::new(|| {
    [
        (QuestionType::Single, Regex::new(r"(?i)\[*(单选题|single)\]*").unwrap()),
        (QuestionType::Multiple, Regex::new(r"(?i)\[*(多选题|multiple)\]*").unwrap()),
        (QuestionType::TrueFalse, Regex::new(r"(?i)\[*(判断题|truefalse)\]*").unwrap()),
        (QuestionType::Essay, Regex::new(r"(?i)\[*(简答题|essay)\]*").unwrap()),
        (QuestionType::Fill, Regex::new(r"(?i)\[*(填空题|fill)\]*").unwrap()),
    ]
});

/// 题号前缀：1.  1、 1。 1,（标准化后仅剩 . , 和空白）
static NUMBER_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.,\s]*").unwrap());

/// 内联选项（值不能以另一个选项键或句点开头）
static INLINE_OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-F]\.\s*[^A-F.]+").unwrap());

/// 首个内联选项标记的位置
static INLINE_OPTION_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-F]\.\s*").unwrap());

static INLINE_ANSWER_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"答案[:\s]*").unwrap());

static INLINE_ANSWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"答案[:\s]*(\S+)").unwrap());

static INLINE_EXPLANATION_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"解析[:\s]*").unwrap());

static INLINE_EXPLANATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"解析[:\s]*(.+)$").unwrap());

/// 句子终止符（标准化后全角句号/问号/叹号已折叠，保留全集以防万一）
static SENTENCE_END: [char; 6] = ['。', '？', '！', '.', '?', '!'];

/// 解析题目起始行
pub fn parse_header(line: &str) -> HeaderParse {
    let normalized = normalize(line);

    // 1. 剥离题型标记，缺省单选题
    let mut rest = normalized.clone();
    let mut question_type = QuestionType::Single;
    for (ty, pattern) in TYPE_PATTERNS.iter() {
        if pattern.is_match(&rest) {
            question_type = *ty;
            rest = pattern.replace_all(&rest, "").trim().to_string();
            break;
        }
    }

    // 2. 剥离题号
    let rest = NUMBER_STRIP.replace(&rest, "").trim().to_string();

    // 3. 题干截断：内联选项优先，其次内联答案/解析标记
    let mut content = split_content(&rest);

    // 4. 派生标题
    let title = if content.is_empty() {
        content = rest.clone();
        rest.chars().take(50).collect()
    } else {
        derive_title(&content)
    };

    let mut draft = Question::draft(question_type);
    draft.title = title;
    draft.content = content;

    // 判断题预置两个选项，文档自带 A/B 行时会被替换
    if question_type == QuestionType::TrueFalse {
        draft.options = vec![
            QuestionOption::new('A', "正确"),
            QuestionOption::new('B', "错误"),
        ];
    }

    // 5. 内联选项/答案/解析（扫描完整的标准化行）
    let mut section = Section::Content;

    let inline_options: Vec<&str> = INLINE_OPTION
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .collect();
    if inline_options.len() >= 2 {
        section = Section::Options;
        draft.options.clear();
        for fragment in inline_options {
            if let Some(option) = parse_option(fragment.trim()) {
                draft.push_option(option);
            }
        }
    }

    if let Some(caps) = INLINE_ANSWER.captures(&normalized) {
        draft.correct_answer = caps[1].trim().to_string();
        section = Section::Answer;
    }

    if let Some(caps) = INLINE_EXPLANATION.captures(&normalized) {
        draft.explanation = caps[1].trim().to_string();
        section = Section::Explanation;
    }

    HeaderParse { draft, section }
}

/// 题干在首个内联选项/答案/解析标记处截断
fn split_content(rest: &str) -> String {
    if INLINE_OPTION.is_match(rest) {
        if let Some(m) = INLINE_OPTION_START.find(rest) {
            if m.start() > 0 {
                return rest[..m.start()].trim().to_string();
            }
        }
        return String::new();
    }

    let answer_at = INLINE_ANSWER_MARK.find(rest).map(|m| m.start());
    let explanation_at = INLINE_EXPLANATION_MARK.find(rest).map(|m| m.start());
    let cut = match (answer_at, explanation_at) {
        (Some(a), Some(e)) => Some(a.min(e)),
        (Some(a), None) => Some(a),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    };
    match cut {
        Some(at) if at > 0 => rest[..at].trim().to_string(),
        Some(_) => rest.to_string(),
        None => rest.to_string(),
    }
}

/// 标题取题干的第一句；过长时截断，过短时全取
fn derive_title(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let sentence_end = chars.iter().position(|c| SENTENCE_END.contains(c));
    if let Some(end) = sentence_end {
        if end > 5 && end < 50 {
            return chars[..=end].iter().collect();
        }
    }
    if chars.len() > 50 {
        let mut title: String = chars[..47].iter().collect();
        title.push_str("...");
        return title;
    }
    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_marker_and_numbering_stripped() {
        let parsed = parse_header("1.【单选题】天空是什么颜色？");
        assert_eq!(parsed.draft.question_type, QuestionType::Single);
        assert_eq!(parsed.draft.content, "天空是什么颜色?");
        assert_eq!(parsed.section, Section::Content);
    }

    #[test]
    fn test_default_type_is_single() {
        let parsed = parse_header("7. 没有题型标记的行");
        assert_eq!(parsed.draft.question_type, QuestionType::Single);
    }

    #[test]
    fn test_english_marker_case_insensitive() {
        let parsed = parse_header("2.[MULTIPLE]下列说法正确的有哪些");
        assert_eq!(parsed.draft.question_type, QuestionType::Multiple);
        assert_eq!(parsed.draft.content, "下列说法正确的有哪些");
    }

    #[test]
    fn test_truefalse_preseeds_options() {
        let parsed = parse_header("3.【判断题】地球是太阳系中最大的行星。");
        assert_eq!(parsed.draft.question_type, QuestionType::TrueFalse);
        assert_eq!(parsed.draft.options.len(), 2);
        assert_eq!(parsed.draft.options[0].value, "正确");
        assert_eq!(parsed.draft.options[1].value, "错误");
    }

    #[test]
    fn test_inline_options_split_content() {
        let parsed = parse_header("4.【单选题】最大的海洋是 A. 大西洋 B. 太平洋 C. 印度洋");
        assert_eq!(parsed.draft.content, "最大的海洋是");
        assert_eq!(parsed.section, Section::Options);
        assert_eq!(parsed.draft.options.len(), 3);
        assert_eq!(parsed.draft.option('B').unwrap().value, "太平洋");
    }

    #[test]
    fn test_inline_answer_and_explanation() {
        let parsed = parse_header("5.【填空题】1+1=___ 答案：2 解析：基本算术");
        assert_eq!(parsed.draft.content, "1+1=___");
        assert_eq!(parsed.draft.correct_answer, "2");
        assert_eq!(parsed.draft.explanation, "基本算术");
        assert_eq!(parsed.section, Section::Explanation);
    }

    #[test]
    fn test_title_first_sentence() {
        let parsed = parse_header("6.【简答题】什么是光合作用？请结合叶绿体的结构详细说明其过程与意义。");
        assert_eq!(parsed.draft.title, "什么是光合作用?");
    }

    #[test]
    fn test_title_truncated_when_long() {
        let long_stem = "甲".repeat(60);
        let parsed = parse_header(format!("8.【简答题】{}", long_stem).as_str());
        assert_eq!(parsed.draft.title.chars().count(), 50);
        assert!(parsed.draft.title.ends_with("..."));
    }
}
