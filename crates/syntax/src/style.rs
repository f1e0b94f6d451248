use serde::{Deserialize, Serialize};

use crate::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }
}

/// Display hints for a token kind. Plain text uses the renderer defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenStyle {
    pub color: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
}

impl TokenKind {
    pub fn style(&self) -> TokenStyle {
        let (color, bold, italic) = match self {
            TokenKind::Plain => return TokenStyle::default(),
            TokenKind::Keyword => (Rgb::new(170, 13, 145), true, false),
            TokenKind::String => (Rgb::new(196, 26, 22), false, true),
            TokenKind::Number => (Rgb::new(28, 0, 207), false, false),
            TokenKind::Comment => (Rgb::new(63, 127, 95), false, true),
            TokenKind::Function => (Rgb::new(66, 113, 174), false, false),
            TokenKind::Tag => (Rgb::new(0, 104, 129), true, false),
            TokenKind::Attribute => (Rgb::new(156, 101, 0), false, false),
        };

        TokenStyle {
            color: Some(color),
            bold,
            italic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_plain_is_unstyled() {
        for kind in TokenKind::iter() {
            let style = kind.style();
            assert_eq!(kind == TokenKind::Plain, style.color.is_none(), "{kind}");
        }
    }
}
