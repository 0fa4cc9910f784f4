use serde::Serialize;

use crate::address::ChapterVerse;

/// A citation resolution error.
///
/// Syntax errors carry the byte offset of the offending token in the input
/// citation; catalog errors name the canonical book they were checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("unknown book '{token}' at offset {offset}")]
    UnknownBook { token: String, offset: usize },

    #[error("{book} has no chapter {chapter}")]
    InvalidChapter { book: String, chapter: u32 },

    #[error("{book} {chapter} has no verse {verse}")]
    InvalidVerse {
        book: String,
        chapter: u32,
        verse: u32,
    },

    /// Range whose start comes after its end, e.g. `Gen 1:5-3`.
    #[error("range {book} {start}-{end} ends before it starts")]
    InvalidRange {
        book: String,
        start: ChapterVerse,
        end: ChapterVerse,
    },

    /// Nothing left to resolve: blank input, or every item was skipped.
    #[error("citation does not resolve to any verses")]
    EmptyReference,
}

impl ReferenceError {
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        ReferenceError::Syntax {
            offset,
            message: message.into(),
        }
    }

    /// Stable snake_case tag for this error, matching the `kind` field of the
    /// serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            ReferenceError::Syntax { .. } => "syntax",
            ReferenceError::UnknownBook { .. } => "unknown_book",
            ReferenceError::InvalidChapter { .. } => "invalid_chapter",
            ReferenceError::InvalidVerse { .. } => "invalid_verse",
            ReferenceError::InvalidRange { .. } => "invalid_range",
            ReferenceError::EmptyReference => "empty_reference",
        }
    }

    /// True for errors produced by catalog checks, which the resolution
    /// policy may skip. Syntax and empty-reference errors always abort.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReferenceError::UnknownBook { .. }
                | ReferenceError::InvalidChapter { .. }
                | ReferenceError::InvalidVerse { .. }
                | ReferenceError::InvalidRange { .. }
        )
    }

    /// Serialize to a fixed-shape JSON object.
    /// Every key is always present (null when not applicable to the kind).
    pub fn to_json_value(&self) -> serde_json::Value {
        let (offset, token, book, chapter, verse) = match self {
            ReferenceError::Syntax { offset, .. } => (Some(*offset), None, None, None, None),
            ReferenceError::UnknownBook { token, offset } => {
                (Some(*offset), Some(token.as_str()), None, None, None)
            }
            ReferenceError::InvalidChapter { book, chapter } => {
                (None, None, Some(book.as_str()), Some(*chapter), None)
            }
            ReferenceError::InvalidVerse {
                book,
                chapter,
                verse,
            } => (None, None, Some(book.as_str()), Some(*chapter), Some(*verse)),
            ReferenceError::InvalidRange { book, start, .. } => (
                None,
                None,
                Some(book.as_str()),
                Some(start.chapter),
                Some(start.verse),
            ),
            ReferenceError::EmptyReference => (None, None, None, None, None),
        };
        // Only ranges have a second endpoint.
        let (end_chapter, end_verse) = match self {
            ReferenceError::InvalidRange { end, .. } => (Some(end.chapter), Some(end.verse)),
            _ => (None, None),
        };
        serde_json::json!({
            "book":        book,
            "chapter":     chapter,
            "end_chapter": end_chapter,
            "end_verse":   end_verse,
            "kind":        self.kind(),
            "message":     self.to_string(),
            "offset":      offset,
            "token":       token,
            "verse":       verse,
        })
    }
}

/// An error building a [`Catalog`](crate::catalog::Catalog) from configuration.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog '{0}' declares no books")]
    NoBooks(String),

    #[error("catalog declares more than 65535 books")]
    TooManyBooks,

    #[error("book '{book}' declares no chapters")]
    NoChapters { book: String },

    #[error("book '{book}' chapter {chapter} declares no verses")]
    EmptyChapter { book: String, chapter: u32 },

    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("book name '{0}' is empty after normalization")]
    BlankName(String),

    /// A name or alias no citation could spell, e.g. `Psalm 151` or `Bel-Dragon`.
    #[error("book name '{0}' cannot be written in a citation")]
    UnparseableName(String),
}
