//! Source comment captured during preprocessing.
//!
//! Comments are extracted from the raw text before scanning and queued
//! by line number. The scanner consumes them strictly in order: each
//! comment attaches to the next declaration whose start line follows it,
//! and is consumed at most once.

/// A comment with its reflowed text and the line it ended on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    /// Reflowed comment body (markers and common indent stripped).
    pub text: String,
    /// Whether this was a `/* ... */` block comment.
    pub multiline: bool,
    /// 1-based line in the preprocessed text where the comment ended.
    pub line: usize,
}

impl Comment {
    /// Create a single-line (`//`) comment.
    pub fn single_line(text: impl Into<String>, line: usize) -> Self {
        Comment {
            text: text.into(),
            multiline: false,
            line,
        }
    }

    /// Create a block (`/* ... */`) comment.
    pub fn block(text: impl Into<String>, line: usize) -> Self {
        Comment {
            text: text.into(),
            multiline: true,
            line,
        }
    }
}
