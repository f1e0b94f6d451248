pub(crate) mod document;
pub(crate) mod history;

pub use netpad_syntax;

pub use document::*;
pub use history::*;
