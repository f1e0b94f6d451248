// Token classification for editor display. The rules are line based
// heuristics per language, not real lexers.

mod language;
mod markup;
mod scanner;
mod style;
mod token;

pub use language::Language;
pub use markup::render_markup;
pub use style::{Rgb, TokenStyle};
pub use token::{reconstruct, Token, TokenKind};

use scanner::Scanner;

/// Partition `source` into classified tokens. Concatenating the token texts
/// yields `source` again.
pub fn tokenize(source: &str, language: Language) -> Vec<Token> {
    Scanner::new(language).run(source)
}

/// Same as [`tokenize`] but takes a raw language tag. Unknown tags produce a
/// single plain token.
pub fn tokenize_tag(source: &str, tag: &str) -> Vec<Token> {
    tokenize(source, Language::from_tag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_is_one_plain_token() {
        let source = "IDENTIFICATION DIVISION.\n";
        assert_eq!(vec![Token::plain(source)], tokenize_tag(source, "cobol"));
    }

    #[test]
    fn text_language() {
        assert_eq!(vec![Token::plain("")], tokenize("", Language::Text));
    }

    #[test]
    fn tag_is_case_insensitive() {
        assert_eq!(
            tokenize("func", Language::Go),
            tokenize_tag("func", "Go")
        );
    }
}
