use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// Language tag selecting the scanning rules.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Go,
    JavaScript,
    TypeScript,
    Html,
    Css,
    #[default]
    Text,
}

impl Language {
    /// Parse a tag case-insensitively, None if the tag is not known.
    pub fn parse(tag: &str) -> Option<Language> {
        let tag = tag.trim().to_ascii_lowercase();
        let lang = match tag.as_str() {
            "go" => Language::Go,
            "javascript" | "js" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "html" => Language::Html,
            "css" => Language::Css,
            "text" => Language::Text,
            _ => return None,
        };
        Some(lang)
    }

    /// Parse a tag, unknown tags are treated as plain text.
    pub fn from_tag(tag: &str) -> Language {
        match Language::parse(tag) {
            Some(lang) => lang,
            None => {
                log::debug!("Unknown language tag {tag:?}, using text");
                Language::Text
            }
        }
    }

    /// Guess the language from a file name first and the content second.
    pub fn detect(file_name: &str, content: &str) -> Language {
        const SUFFIXES: [(&str, Language); 5] = [
            (".go", Language::Go),
            (".js", Language::JavaScript),
            (".ts", Language::TypeScript),
            (".html", Language::Html),
            (".css", Language::Css),
        ];

        for (suffix, lang) in SUFFIXES {
            if file_name.ends_with(suffix) {
                return lang;
            }
        }

        Self::detect_content(content)
    }

    pub fn detect_path(path: &Path, content: &str) -> Language {
        let name = path.as_os_str().to_string_lossy();
        Self::detect(&name, content)
    }

    fn detect_content(content: &str) -> Language {
        if content.contains("package ") && content.contains("import ") {
            return Language::Go;
        }

        if content.contains("<html") || content.contains("<!DOCTYPE html") {
            return Language::Html;
        }

        if content.contains('{') && content.contains('}') {
            if content.contains("interface ") || content.contains(": string") {
                return Language::TypeScript;
            }
            if content.contains("function") || content.contains("var ") {
                return Language::JavaScript;
            }
            if content.contains("@media") || content.contains("px") {
                return Language::Css;
            }
        }

        Language::Text
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Language::from_tag(value)
    }
}
