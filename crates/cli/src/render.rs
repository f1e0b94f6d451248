use std::fmt::Write as _;

use clap::ValueEnum;
use netpad_syntax::{render_markup, Token, TokenStyle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Colored terminal output
    #[default]
    Ansi,
    /// `[Kind]text[/Kind]` markup
    Markup,
    /// One token per line
    Tokens,
}

pub(crate) fn render(tokens: &[Token], format: Format) -> String {
    match format {
        Format::Ansi => ansi(tokens),
        Format::Markup => render_markup(tokens),
        Format::Tokens => listing(tokens),
    }
}

fn ansi(tokens: &[Token]) -> String {
    let mut out = String::new();

    for token in tokens {
        let style = token.kind.style();
        if style == TokenStyle::default() {
            out.push_str(&token.text);
            continue;
        }

        let start = escape(&style);
        for line in token.text.split_inclusive('\n') {
            let (content, eol) = match line.strip_suffix('\n') {
                Some(content) => (content, "\n"),
                None => (line, ""),
            };

            // Reset before the newline so styles never bleed into the next line
            if !content.is_empty() {
                out.push_str(&start);
                out.push_str(content);
                out.push_str(RESET);
            }
            out.push_str(eol);
        }
    }

    out
}

const RESET: &str = "\x1b[0m";

fn escape(style: &TokenStyle) -> String {
    let mut codes = vec![];
    if style.bold {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    if let Some(rgb) = style.color {
        codes.push(format!("38;2;{};{};{}", rgb.red, rgb.green, rgb.blue));
    }

    format!("\x1b[{}m", codes.join(";"))
}

fn listing(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{}\t{:?}", token.kind, token.text);
    }
    out
}
