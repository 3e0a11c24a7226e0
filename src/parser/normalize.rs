//! 文本标准化：统一全角半角符号
//!
//! 导入文档来自 Word/记事本等多种来源，常混杂全角标点、全角数字
//! 和不可见控制字符，各分类器统一在标准化后的行上做判定。

use phf::phf_map;

/// 全角标点 → 半角映射表（顿号并入逗号）
static PUNCT_MAP: phf::Map<char, char> = phf_map! {
    '。' => '.',
    '，' => ',',
    '：' => ':',
    '；' => ';',
    '？' => '?',
    '！' => '!',
    '（' => '(',
    '）' => ')',
    '【' => '[',
    '】' => ']',
    '、' => ',',
};

/// 零宽字符、方向标记、行/段分隔符
pub(crate) fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200D}'
            | '\u{FEFF}'
            | '\u{2060}'
            | '\u{180E}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// 全角数字/字母落在 FF01-FF5E 区间，与 ASCII 相差 0xFEE0
fn fold_char(c: char) -> char {
    match c {
        '０'..='９' | 'ａ'..='ｚ' | 'Ａ'..='Ｚ' => {
            char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
        }
        _ => PUNCT_MAP.get(&c).copied().unwrap_or(c),
    }
}

/// 标准化一行文本
///
/// 移除不可见字符、折叠全角数字/字母/标点、压缩空白并去除首尾空白。
/// 幂等：`normalize(normalize(s)) == normalize(s)`
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if is_invisible(c) {
            continue;
        }
        let c = fold_char(c);
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// 仅移除不可见字符并去除首尾空白（供原始行兜底匹配使用）
pub(crate) fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !is_invisible(*c)).collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fullwidth_digits_and_letters() {
        assert_eq!(normalize("１２３ＡＢｃ"), "123ABc");
    }

    #[test]
    fn test_punctuation_folding() {
        assert_eq!(normalize("你好。世界，测试：！？"), "你好.世界,测试:!?");
        assert_eq!(normalize("（１）【单选题】"), "(1)[单选题]");
        assert_eq!(normalize("甲、乙、丙"), "甲,乙,丙");
    }

    #[test]
    fn test_invisible_chars_removed() {
        assert_eq!(normalize("\u{FEFF}答案\u{200B}：A"), "答案:A");
        assert_eq!(normalize("\u{202A}解析\u{2060}：略"), "解析:略");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize("  1.   单选题\t测试  "), "1. 单选题 测试");
        assert_eq!(normalize("\u{2028}"), "");
    }

    #[test]
    fn test_idempotent_samples() {
        for s in [
            "１.【单选题】天空是什么颜色？",
            "Ａ．蓝色",
            "答案：Ａ",
            "  混 合　文 本。  ",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
