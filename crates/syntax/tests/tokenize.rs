use netpad_syntax::{reconstruct, tokenize, tokenize_tag, Language, Token, TokenKind};
use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;

const GO: &str = r#"package main

import "fmt"

/* multi
   line */
// Entry point
func main() {
	for i := 0; i < 10; i++ {
		fmt.Println(i, "héllo")
	}
}"#;

const JAVASCRIPT: &str = "// util\nasync function load (url) {\n    const res = await fetch (url);\n\treturn res;\n}\n";

const HTML: &str = "<!DOCTYPE html>\n<html>\n<!-- c -->\n<body class=\"x\">a < b</body>\n</html>";

const CSS: &str = "/* theme */\nbody {\n  color: red;\n  background: url(a:b);\n}\n\n@media (max-width: 10px) { p { x: y } }";

/// Characters that trigger the interesting branches of every scanner
const ALPHABET: &[&str] = &[
    " ", "\t", "\n", "\n", "(", ")", ":", ";", ",", "{", "}", "[", "]", "<", ">", "!--", "/*",
    "*/", "//", "func", "return", "42", "x", "é", "\r", "interface", "color",
];

fn random_source(rng: &mut ChaCha8Rng) -> String {
    let len = rng.gen_range(0..64);
    let mut source = String::new();
    for _ in 0..len {
        let piece = ALPHABET[rng.gen_range(0..ALPHABET.len())];
        source.push_str(piece);
    }
    source
}

#[test]
fn samples_are_lossless() {
    for source in [GO, JAVASCRIPT, HTML, CSS, "", "\n", "no newline", "\n\n\n"] {
        for lang in Language::iter() {
            let tokens = tokenize(source, lang);
            assert_eq!(source, reconstruct(&tokens), "{lang}");
        }
    }
}

#[test]
fn random_inputs_are_lossless() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6e65_7470);
    for _ in 0..2000 {
        let source = random_source(&mut rng);
        for lang in Language::iter() {
            let tokens = tokenize(&source, lang);
            assert_eq!(source, reconstruct(&tokens), "{lang}: {source:?}");
        }
    }
}

#[test]
fn no_empty_tokens_except_empty_text() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        let source = random_source(&mut rng);
        for lang in Language::iter().filter(|l| *l != Language::Text) {
            let tokens = tokenize(&source, lang);
            assert!(tokens.iter().all(|t| !t.is_empty()), "{lang}: {source:?}");
        }
    }
}

#[test]
fn go_sample_kinds() {
    let tokens = tokenize(GO, Language::Go);
    let of_kind = |kind: TokenKind| -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.text.as_str())
            .collect()
    };

    assert_eq!(
        vec!["package", "import", "func", "for"],
        of_kind(TokenKind::Keyword)
    );
    assert_eq!(vec!["main", "fmt.Println"], of_kind(TokenKind::Function));
    assert_eq!(vec!["0", "10"], of_kind(TokenKind::Number));
    assert_eq!(
        vec!["/* multi\n", "// Entry point\n"],
        of_kind(TokenKind::Comment)
    );
}

#[test]
fn javascript_sample_kinds() {
    let tokens = tokenize(JAVASCRIPT, Language::JavaScript);
    let functions: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Function)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(vec!["load", "fetch"], functions);
    assert_eq!(Token::new(TokenKind::Comment, "// util\n"), tokens[0]);
}

#[test]
fn scenarios() {
    assert_eq!(
        vec![Token::new(TokenKind::Comment, "// hello\n")],
        tokenize_tag("// hello\n", "go")
    );
    assert_eq!(
        vec![
            Token::new(TokenKind::Attribute, "color:"),
            Token::plain(" red;\n"),
        ],
        tokenize_tag("color: red;\n", "css")
    );
    assert_eq!(
        vec![
            Token::new(TokenKind::Tag, "<b>"),
            Token::plain("hi"),
            Token::new(TokenKind::Tag, "</b>"),
        ],
        tokenize_tag("<b>hi</b>", "html")
    );
    assert_eq!(vec![Token::plain(GO)], tokenize_tag(GO, "cobol"));
}

#[test]
fn tokenize_from_threads() {
    let handles: Vec<_> = Language::iter()
        .map(|lang| std::thread::spawn(move || tokenize(CSS, lang)))
        .collect();

    for handle in handles {
        let tokens = handle.join().unwrap();
        assert_eq!(CSS, reconstruct(&tokens));
    }
}
