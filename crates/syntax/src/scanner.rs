mod css;
mod go;
mod html;
mod script;

use crate::{
    token::{Token, Tokens},
    Language,
};

pub(crate) use css::CssScanner;
pub(crate) use go::GoScanner;
pub(crate) use script::ScriptScanner;

/// Scanning rules applied one line at a time.
///
/// `line` never contains the line terminator, `eol` is either `"\n"` or empty
/// for the last line of an input that does not end in a newline.
pub(crate) trait LineScan {
    fn scan_line(&mut self, line: &str, eol: &str, out: &mut Tokens);
}

/// Scanner for a single language, created fresh for every tokenize call.
#[derive(Debug)]
pub(crate) enum Scanner {
    Go(GoScanner),
    Script(ScriptScanner),
    Css(CssScanner),
    Html,
    Text,
}

impl Scanner {
    pub fn new(language: Language) -> Scanner {
        match language {
            Language::Go => Scanner::Go(GoScanner),
            Language::JavaScript => Scanner::Script(ScriptScanner::javascript()),
            Language::TypeScript => Scanner::Script(ScriptScanner::typescript()),
            Language::Css => Scanner::Css(CssScanner::default()),
            Language::Html => Scanner::Html,
            Language::Text => Scanner::Text,
        }
    }

    pub fn run(self, source: &str) -> Vec<Token> {
        match self {
            Scanner::Go(scanner) => scan_lines(scanner, source),
            Scanner::Script(scanner) => scan_lines(scanner, source),
            Scanner::Css(scanner) => scan_lines(scanner, source),
            Scanner::Html => html::scan(source),
            Scanner::Text => vec![Token::plain(source)],
        }
    }
}

fn scan_lines<S: LineScan>(mut scanner: S, source: &str) -> Vec<Token> {
    let mut out = Tokens::default();
    for (line, eol) in lines(source) {
        scanner.scan_line(line, eol, &mut out);
    }
    out.into_vec()
}

/// Split source into lines and their terminators. A trailing newline does not
/// produce an extra empty line.
fn lines(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source
        .split_inclusive('\n')
        .map(|line| match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        })
}
