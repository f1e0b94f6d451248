use crate::token::{TokenKind, Tokens};

use super::LineScan;

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "export",
    "extends", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "return", "super", "switch",
    "this", "throw", "try", "typeof", "var", "void", "while",
    "with", "yield", "let", "async", "await",
];

const TYPESCRIPT_KEYWORDS: &[&str] = &[
    "interface", "implements", "namespace", "module", "declare",
    "type", "enum", "private", "protected", "public", "readonly",
];

/// Whitespace separated word scanner shared by JavaScript and TypeScript.
#[derive(Debug)]
pub(crate) struct ScriptScanner {
    extra_keywords: &'static [&'static str],
}

impl ScriptScanner {
    pub fn javascript() -> ScriptScanner {
        ScriptScanner { extra_keywords: &[] }
    }

    pub fn typescript() -> ScriptScanner {
        ScriptScanner {
            extra_keywords: TYPESCRIPT_KEYWORDS,
        }
    }

    fn is_keyword(&self, word: &str) -> bool {
        JAVASCRIPT_KEYWORDS.contains(&word) || self.extra_keywords.contains(&word)
    }
}

/// Byte ranges of the whitespace separated words in `line`
fn words(line: &str) -> Vec<(usize, usize)> {
    let mut words = vec![];
    let mut start = None;

    for (i, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }

    if let Some(s) = start {
        words.push((s, line.len()));
    }

    words
}

impl LineScan for ScriptScanner {
    fn scan_line(&mut self, line: &str, eol: &str, out: &mut Tokens) {
        if line.is_empty() {
            out.push_eol(eol);
            return;
        }

        if line.trim().starts_with("//") {
            out.push_line(TokenKind::Comment, line, eol);
            return;
        }

        let words = words(line);
        let mut pos = 0;

        for (i, &(start, end)) in words.iter().enumerate() {
            if start > pos {
                out.push(TokenKind::Plain, &line[pos..start]);
            }

            let word = &line[start..end];
            let calls = words
                .get(i + 1)
                .map(|&(s, e)| line[s..e].starts_with('('))
                .unwrap_or(false);

            let kind = if self.is_keyword(word) {
                TokenKind::Keyword
            } else if calls {
                TokenKind::Function
            } else {
                TokenKind::Plain
            };
            out.push(kind, word);
            pos = end;
        }

        if pos < line.len() {
            out.push(TokenKind::Plain, &line[pos..]);
        }

        out.push_eol(eol);
    }
}
