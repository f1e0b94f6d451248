use std::sync::OnceLock;

use regex::Regex;

use crate::token::{Token, TokenKind, Tokens};

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Scan the whole input for tags, the text between them is plain.
pub(crate) fn scan(source: &str) -> Vec<Token> {
    let mut out = Tokens::default();
    let mut last = 0;

    for mat in tag_pattern().find_iter(source) {
        if mat.start() > last {
            out.push(TokenKind::Plain, &source[last..mat.start()]);
        }

        let tag = mat.as_str();
        let kind = if tag.starts_with("<!--") {
            TokenKind::Comment
        } else {
            TokenKind::Tag
        };
        out.push(kind, tag);
        last = mat.end();
    }

    if last < source.len() {
        out.push(TokenKind::Plain, &source[last..]);
    }

    out.into_vec()
}

#[cfg(test)]
mod tests {
    use crate::{tokenize, Language, Token, TokenKind::*};

    fn html(source: &str) -> Vec<Token> {
        tokenize(source, Language::Html)
    }

    #[test]
    fn tags_and_text() {
        assert_eq!(
            vec![
                Token::new(Tag, "<b>"),
                Token::plain("hi"),
                Token::new(Tag, "</b>"),
            ],
            html("<b>hi</b>")
        );
    }

    #[test]
    fn comment() {
        assert_eq!(
            vec![
                Token::new(Comment, "<!-- note -->"),
                Token::plain("\n"),
            ],
            html("<!-- note -->\n")
        );
    }

    #[test]
    fn tag_spanning_lines() {
        assert_eq!(
            vec![Token::new(Tag, "<div\n  class=\"a\">"), Token::plain("x")],
            html("<div\n  class=\"a\">x")
        );
    }

    #[test]
    fn unclosed_and_empty() {
        assert_eq!(vec![Token::plain("a <b c")], html("a <b c"));
        assert_eq!(vec![Token::plain("<>")], html("<>"));
        assert!(html("").is_empty());
    }
}
