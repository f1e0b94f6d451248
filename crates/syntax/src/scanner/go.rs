use crate::token::{TokenKind, Tokens};

use super::LineScan;

const KEYWORDS: [&str; 25] = [
    "break",
    "default",
    "func",
    "interface",
    "select",
    "case",
    "defer",
    "go",
    "map",
    "struct",
    "chan",
    "else",
    "goto",
    "package",
    "switch",
    "const",
    "fallthrough",
    "if",
    "range",
    "type",
    "continue",
    "for",
    "import",
    "return",
    "var",
];

const DELIMITERS: [char; 11] = [' ', '\t', '(', ')', ':', ';', ',', '{', '}', '[', ']'];

/// Go scanner. Each line is judged on its own, block comments spanning
/// several lines are not tracked.
#[derive(Debug, Default)]
pub(crate) struct GoScanner;

impl GoScanner {
    fn is_keyword(word: &str) -> bool {
        KEYWORDS.contains(&word)
    }

    fn is_number(word: &str) -> bool {
        !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
    }

    /// Classify a word terminated by `delim`. A `(` ending the line does not
    /// make the word a function name.
    fn classify(word: &str, delim: char, line_end: bool) -> TokenKind {
        if Self::is_keyword(word) {
            TokenKind::Keyword
        } else if delim == '(' && !line_end {
            TokenKind::Function
        } else if Self::is_number(word) {
            TokenKind::Number
        } else {
            TokenKind::Plain
        }
    }
}

impl LineScan for GoScanner {
    fn scan_line(&mut self, line: &str, eol: &str, out: &mut Tokens) {
        if line.is_empty() {
            out.push_eol(eol);
            return;
        }

        if line.trim().starts_with("//") || line.contains("/*") {
            out.push_line(TokenKind::Comment, line, eol);
            return;
        }

        let mut start = 0;
        for (i, ch) in line.char_indices() {
            if !DELIMITERS.contains(&ch) {
                continue;
            }

            let end = i + ch.len_utf8();
            let word = &line[start..i];
            if !word.is_empty() {
                out.push(Self::classify(word, ch, end == line.len()), word);
            }

            out.push(TokenKind::Plain, &line[i..end]);
            start = end;
        }

        // Word running to the end of the line has no delimiter to look at
        let word = &line[start..];
        if !word.is_empty() {
            let kind = if Self::is_keyword(word) {
                TokenKind::Keyword
            } else {
                TokenKind::Plain
            };
            out.push(kind, word);
        }

        out.push_eol(eol);
    }
}
