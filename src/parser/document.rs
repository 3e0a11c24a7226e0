//! 文档解析状态机
//!
//! 逐行驱动分类器与题头解析器，跨行累积题目草稿。
//! 状态显式地随折叠传递：每一步 `(state, line) -> state`，
//! 没有环境可变量，便于对单个转移做确定性测试。

use tracing::debug;

use crate::error::ParseError;
use crate::models::{Question, QuestionOption, DEFAULT_SUBJECT};
use crate::parser::header::parse_header;
use crate::parser::line::{classify, subject_declaration, LineRole};
use crate::parser::validate::validate;
use crate::utils::logging::truncate_text;

/// 批量科目声明只在文档开头的若干非空行内生效
const SUBJECT_SCAN_LINES: usize = 10;

/// 文档级失败时随错误返回的文本预览长度
const SNIPPET_CHARS: usize = 500;

/// 当前行归属的题目分区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Content,
    Options,
    Answer,
    Explanation,
}

/// 解析状态：已完成的题目 + 正在累积的草稿
#[derive(Debug)]
struct ParserState {
    batch_subject: String,
    draft: Option<Draft>,
    questions: Vec<Question>,
    dropped: usize,
}

#[derive(Debug)]
struct Draft {
    question: Question,
    section: Section,
}

impl ParserState {
    fn new(batch_subject: String) -> Self {
        Self {
            batch_subject,
            draft: None,
            questions: Vec::new(),
            dropped: 0,
        }
    }

    /// 单行状态转移
    fn step(mut self, line: &str) -> Self {
        match classify(line) {
            LineRole::Noise => self,
            LineRole::QuestionStart => {
                self.seal();
                let parsed = parse_header(line);
                let mut question = parsed.draft;
                question.subject = self.batch_subject.clone();
                self.draft = Some(Draft {
                    question,
                    section: parsed.section,
                });
                self
            }
            role => {
                let Some(draft) = self.draft.as_mut() else {
                    // 尚未遇到任何题目起始行，忽略
                    return self;
                };
                draft.apply(role, line);
                self
            }
        }
    }

    /// 校验并收束当前草稿
    fn seal(&mut self) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        if validate(&draft.question) {
            debug!(
                "保存题目 {}: {}",
                self.questions.len() + 1,
                truncate_text(&draft.question.title, 40)
            );
            self.questions.push(draft.question);
        } else {
            debug!("丢弃无效题目草稿: {}", truncate_text(&draft.question.title, 40));
            self.dropped += 1;
        }
    }

    fn finish(mut self) -> (Vec<Question>, usize) {
        self.seal();
        (self.questions, self.dropped)
    }
}

impl Draft {
    /// 非题目起始行在当前分区内的转移
    fn apply(&mut self, role: LineRole, line: &str) {
        match (self.section, role) {
            (Section::Content, LineRole::Option { key, value }) => {
                self.section = Section::Options;
                self.clear_preset_options();
                self.record_option(key, value);
            }
            (Section::Content, LineRole::Answer(text)) => {
                self.section = Section::Answer;
                self.question.correct_answer = text;
            }
            (Section::Content, LineRole::Explanation(text)) => {
                self.section = Section::Explanation;
                self.question.explanation = text;
            }
            (Section::Content, LineRole::Content) => {
                append_line(&mut self.question.content, line);
            }

            (Section::Options, LineRole::Option { key, value }) => {
                self.record_option(key, value);
            }
            (Section::Options, LineRole::Answer(text)) => {
                self.section = Section::Answer;
                self.question.correct_answer = text;
            }
            (Section::Options, LineRole::Explanation(text)) => {
                self.section = Section::Explanation;
                self.question.explanation = text;
            }
            // 选项之间的描述性文字不属于任何字段
            (Section::Options, LineRole::Content) => {}

            (Section::Answer, LineRole::Explanation(text)) => {
                self.section = Section::Explanation;
                self.question.explanation = text;
            }
            // 重复的答案行跳过，其余行都视为答案续行
            (Section::Answer, LineRole::Answer(_)) => {}
            (Section::Answer, LineRole::Option { .. } | LineRole::Content) => {
                append_line(&mut self.question.correct_answer, line);
            }

            // 重复的解析行跳过，其余行都视为解析续行
            (Section::Explanation, LineRole::Explanation(_)) => {}
            (
                Section::Explanation,
                LineRole::Option { .. } | LineRole::Answer(_) | LineRole::Content,
            ) => {
                append_line(&mut self.question.explanation, line);
            }

            // 题目起始与噪声行在进入分区匹配前已被上层消化
            (_, LineRole::QuestionStart | LineRole::Noise) => {}
        }
    }

    /// 判断题的预置选项在文档给出真实选项行时整体让位
    fn clear_preset_options(&mut self) {
        let preset = self.question.options.len() == 2
            && self.question.options[0].key == 'A'
            && self.question.options[0].value == "正确";
        if preset {
            self.question.options.clear();
        }
    }

    fn record_option(&mut self, key: char, value: String) {
        if value.is_empty() {
            return;
        }
        self.question.push_option(QuestionOption::new(key, value));
    }
}

fn append_line(field: &mut String, line: &str) {
    if !field.is_empty() {
        field.push('\n');
    }
    field.push_str(line);
}

/// 批量科目预扫描：文档前若干非空行内的 `科目: X` 声明
fn scan_batch_subject(lines: &[&str]) -> String {
    for line in lines.iter().take(SUBJECT_SCAN_LINES) {
        if let Some(subject) = subject_declaration(line) {
            if !subject.is_empty() {
                return subject;
            }
        }
    }
    DEFAULT_SUBJECT.to_string()
}

/// 解析整份导入文档
///
/// 返回按源文档顺序排列的有效题目；单题缺陷静默丢弃，
/// 整份文档颗粒无收时报告文档级失败并附文本预览。
pub fn parse_document(text: &str) -> Result<Vec<Question>, ParseError> {
    debug!("开始解析导入文档，文本长度: {}", text.chars().count());

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    debug!("总行数: {}", lines.len());

    let batch_subject = scan_batch_subject(&lines);

    let state = lines
        .iter()
        .fold(ParserState::new(batch_subject), |state, line| state.step(line));
    let (questions, dropped) = state.finish();

    debug!("解析完成: 有效 {} 题, 丢弃 {} 题", questions.len(), dropped);

    if questions.is_empty() {
        return Err(ParseError::NoValidQuestions {
            snippet: text.chars().take(SNIPPET_CHARS).collect(),
        });
    }
    Ok(questions)
}
