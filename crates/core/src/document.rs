use std::{
    fs, io,
    path::{Path, PathBuf},
};

use netpad_syntax::{tokenize, Language, Token};
use thiserror::Error;

use crate::History;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No file path specified")]
    NoPath,
}

/// Text being edited, where it lives on disk and how it got here.
#[derive(Debug, Default)]
pub struct Document {
    text: String,
    path: Option<PathBuf>,
    language: Language,
    history: History,
    revision: u64,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Create a document from text that is not backed by a file
    pub fn from_text(text: impl Into<String>, language: Language) -> Document {
        let text = text.into();
        Document {
            history: History::with_initial(text.clone()),
            text,
            path: None,
            language,
            revision: 0,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Document, DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let language = Language::detect_path(path, &text);
        log::info!("Opened {path:?} as {language}");

        let mut doc = Document::from_text(text, language);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Incremented every time the text changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace the text and record it as an undo point. Returns false if the
    /// text did not change.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }

        self.history.add(text.as_str());
        self.replace(text);
        true
    }

    fn replace(&mut self, text: String) {
        self.text = text;
        self.revision += 1;
    }

    pub fn undo(&mut self) -> bool {
        let (text, applied) = self.history.undo();
        if applied {
            let text = text.to_string();
            self.replace(text);
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let (text, applied) = self.history.redo();
        if applied {
            let text = text.to_string();
            self.replace(text);
        }
        applied
    }

    pub fn save(&self) -> Result<(), DocumentError> {
        let path = self.path.as_ref().ok_or(DocumentError::NoPath)?;
        self.write(path)
    }

    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), DocumentError> {
        let path = path.into();
        self.write(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, &self.text).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved {path:?}");
        Ok(())
    }

    /// Byte offset of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        self.text.find(needle)
    }

    /// Replace every occurrence of `from` with `to` and return how many were
    /// replaced.
    pub fn replace_all(&mut self, from: &str, to: &str) -> usize {
        if from.is_empty() {
            return 0;
        }

        let count = self.text.matches(from).count();
        if count != 0 {
            let text = self.text.replace(from, to);
            self.set_text(text);
        }
        count
    }

    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.text, self.language)
    }
}
