use crate::{Token, TokenKind};

/// Render tokens as bracket markup, `[Keyword]func[/Keyword]`. Only keywords,
/// strings and comments are marked, everything else is written as is.
pub fn render_markup(tokens: &[Token]) -> String {
    let mut out = String::new();

    for token in tokens {
        match token.kind {
            TokenKind::Keyword | TokenKind::String | TokenKind::Comment => {
                let name = token.kind.as_ref();
                out.push('[');
                out.push_str(name);
                out.push(']');
                out.push_str(&token.text);
                out.push_str("[/");
                out.push_str(name);
                out.push(']');
            }
            _ => out.push_str(&token.text),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tokenize, Language};

    #[test]
    fn marks_keywords_and_comments() {
        let tokens = tokenize("// hi\nfunc main()", Language::Go);
        assert_eq!(
            "[Comment]// hi\n[/Comment][Keyword]func[/Keyword] main()",
            render_markup(&tokens)
        );
    }

    #[test]
    fn plain_text_untouched() {
        let tokens = tokenize("<p>x</p>", Language::Html);
        assert_eq!("<p>x</p>", render_markup(&tokens));
    }
}
