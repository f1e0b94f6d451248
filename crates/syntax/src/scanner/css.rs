use crate::token::{TokenKind, Tokens};

use super::LineScan;

/// Line based CSS scanner. Remembers whether a block comment is open between
/// lines. A line opening a comment keeps it open even if it also closes it.
#[derive(Debug, Default)]
pub(crate) struct CssScanner {
    in_comment: bool,
}

impl LineScan for CssScanner {
    fn scan_line(&mut self, line: &str, eol: &str, out: &mut Tokens) {
        if line.is_empty() {
            out.push_eol(eol);
            return;
        }

        if line.contains("/*") {
            self.in_comment = true;
            out.push_line(TokenKind::Comment, line, eol);
            return;
        }

        if line.contains("*/") {
            self.in_comment = false;
            out.push_line(TokenKind::Comment, line, eol);
            return;
        }

        if self.in_comment {
            out.push_line(TokenKind::Comment, line, eol);
            return;
        }

        // Selector opening a rule block
        if line.contains('{') && !line.contains('}') {
            out.push_line(TokenKind::Tag, line, eol);
            return;
        }

        if let Some(colon) = line.find(':') {
            let (property, rest) = line.split_at(colon + 1);
            out.push(TokenKind::Attribute, property);
            out.push_line(TokenKind::Plain, rest, eol);
            return;
        }

        out.push_line(TokenKind::Plain, line, eol);
    }
}

#[cfg(test)]
mod tests {
    use crate::{tokenize, Language, Token, TokenKind::*};

    fn css(source: &str) -> Vec<Token> {
        tokenize(source, Language::Css)
    }

    #[test]
    fn declaration() {
        assert_eq!(
            vec![
                Token::new(Attribute, "color:"),
                Token::plain(" red;\n")
            ],
            css("color: red;\n")
        );
    }

    #[test]
    fn declaration_splits_on_first_colon() {
        assert_eq!(
            vec![
                Token::new(Attribute, "  background:"),
                Token::plain(" url(http://x);"),
            ],
            css("  background: url(http://x);")
        );
    }

    #[test]
    fn rule_block() {
        let tokens = css("body {\n  margin: 0;\n}\n");
        assert_eq!(
            vec![
                Token::new(Tag, "body {\n"),
                Token::new(Attribute, "  margin:"),
                Token::plain(" 0;\n"),
                Token::plain("}\n"),
            ],
            tokens
        );
    }

    #[test]
    fn single_line_rule_is_plain_declaration() {
        let tokens = css("a { color: red }");
        assert_eq!(
            vec![
                Token::new(Attribute, "a { color:"),
                Token::plain(" red }"),
            ],
            tokens
        );
    }

    #[test]
    fn multi_line_comment() {
        let tokens = css("/* start\nmiddle: x\nend */\nb: c\n");
        assert_eq!(
            vec![
                Token::new(Comment, "/* start\n"),
                Token::new(Comment, "middle: x\n"),
                Token::new(Comment, "end */\n"),
                Token::new(Attribute, "b:"),
                Token::plain(" c\n"),
            ],
            tokens
        );
    }

    #[test]
    fn one_line_comment_stays_open() {
        let tokens = css("/* note */\np { \n");
        assert_eq!(
            vec![
                Token::new(Comment, "/* note */\n"),
                Token::new(Comment, "p { \n"),
            ],
            tokens
        );
    }

    #[test]
    fn empty_lines_do_not_close_comment() {
        let tokens = css("/*\n\nx\n");
        assert_eq!(
            vec![
                Token::new(Comment, "/*\n"),
                Token::plain("\n"),
                Token::new(Comment, "x\n"),
            ],
            tokens
        );
    }
}
