use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// Coarse lexical category of a span of source text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter,
)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Number,
    Comment,
    Function,
    Tag,
    Attribute,
}

/// A labeled substring of the tokenized source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Token {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Token {
        Token::new(TokenKind::Plain, text)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Concatenate token texts back into source text.
pub fn reconstruct(tokens: &[Token]) -> String {
    let len = tokens.iter().map(Token::len).sum();
    let mut out = String::with_capacity(len);
    for token in tokens {
        out.push_str(&token.text);
    }
    out
}

/// Output sink the scanners push into. Empty texts are dropped.
#[derive(Debug, Default)]
pub(crate) struct Tokens {
    items: Vec<Token>,
}

impl Tokens {
    pub fn push(&mut self, kind: TokenKind, text: &str) {
        if !text.is_empty() {
            self.items.push(Token::new(kind, text));
        }
    }

    /// Push a whole line, newline included
    pub fn push_line(&mut self, kind: TokenKind, line: &str, eol: &str) {
        if line.is_empty() && eol.is_empty() {
            return;
        }

        let mut text = String::with_capacity(line.len() + eol.len());
        text.push_str(line);
        text.push_str(eol);
        self.items.push(Token::new(kind, text));
    }

    pub fn push_eol(&mut self, eol: &str) {
        self.push(TokenKind::Plain, eol);
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.items
    }
}
