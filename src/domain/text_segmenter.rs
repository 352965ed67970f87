//! 文本分句
//!
//! 按句末标点切分文本，供本地抽取式问答和摘要使用

/// 检查是否为句末标点
#[inline]
fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '。' | '？' | '！' | '.' | '?' | '!')
}

/// 检查片段是否只包含引号或空白（应该合并到前一句）
#[inline]
fn is_trivial_segment(s: &str) -> bool {
    s.chars().all(|c| {
        matches!(
            c,
            '"' | '\u{201C}' | '\u{201D}' | '\'' | '\u{2018}' | '\u{2019}' | ')' | ' ' | '\t'
        )
    })
}

/// 句末标点之后可能紧跟的右引号/右括号
#[inline]
fn is_closing_mark(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '\u{201D}' | '\u{2019}' | ')' | '」' | '』')
}

/// 单行按句末标点切分
///
/// 连续的句末标点（如 `?!`、`...`）及其后的右引号归入同一句
fn split_line(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);

        if is_sentence_end(ch) && !chars.peek().copied().is_some_and(is_sentence_end) {
            while let Some(next) = chars.next_if(|c| is_closing_mark(*c)) {
                current.push(next);
            }

            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 对文本进行分句
///
/// 1. 按行分割（支持 \n 和 \r\n），跨行不合并
/// 2. 每行按句末标点分割
/// 3. 只有引号的片段合并到前一句
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();

    for line in text.lines().map(str::trim).filter(|s| !s.is_empty()) {
        for sentence in split_line(line) {
            if is_trivial_segment(&sentence) {
                if let Some(last) = sentences.last_mut() {
                    last.push_str(&sentence);
                    continue;
                }
            }
            sentences.push(sentence);
        }
    }

    sentences
}

/// 小写化的词序列，去掉首尾标点
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_english_sentences() {
        let sentences = split_sentences("The cat sat. The dog ran! Did it rain?");
        assert_eq!(
            sentences,
            vec!["The cat sat.", "The dog ran!", "Did it rain?"]
        );
    }

    #[test]
    fn test_consecutive_terminators_stay_together() {
        let sentences = split_sentences("Wait... what?! Fine.");
        assert_eq!(sentences, vec!["Wait...", "what?!", "Fine."]);
    }

    #[test]
    fn test_lines_do_not_merge() {
        let sentences = split_sentences("first line\nsecond line.");
        assert_eq!(sentences, vec!["first line", "second line."]);
    }

    #[test]
    fn test_chinese_punctuation() {
        let sentences = split_sentences("第一句。第二句？");
        assert_eq!(sentences, vec!["第一句。", "第二句？"]);
    }

    #[test]
    fn test_quote_only_segment_merged() {
        let sentences = split_sentences("He said \"stop.\" Then left.");
        assert_eq!(sentences, vec!["He said \"stop.\"", "Then left."]);
    }

    #[test]
    fn test_quote_only_line_merged() {
        let sentences = split_sentences("A long first line.\n\"\nNext line.");
        assert_eq!(sentences, vec!["A long first line.\"", "Next line."]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("  \n\n ").is_empty());
    }

    #[test]
    fn test_words() {
        assert_eq!(
            words("Where, exactly, is PARIS?"),
            vec!["where", "exactly", "is", "paris"]
        );
    }
}
