//! Pass 2: Catalog validation -- resolve each qualified item's book token
//! and bounds against the catalog, producing concrete verse ranges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::address::{BookId, VerseAddress, VerseRange};
use crate::ast::{Bound, QualifiedItem};
use crate::catalog::Catalog;
use crate::error::ReferenceError;

/// What to do with an item that fails catalog validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// The first invalid item, in citation order, fails the whole citation.
    #[default]
    Strict,
    /// Invalid items are dropped; the citation fails only if none remain.
    SkipInvalid,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Strict => write!(f, "strict"),
            Policy::SkipInvalid => write!(f, "skip-invalid"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Policy::Strict),
            "skip-invalid" | "skip_invalid" | "skipInvalid" => Ok(Policy::SkipInvalid),
            other => Err(format!(
                "unknown policy '{}' (expected 'strict' or 'skip-invalid')",
                other
            )),
        }
    }
}

pub fn validate(
    items: &[QualifiedItem],
    catalog: &Catalog,
    policy: Policy,
) -> Result<Vec<VerseRange>, ReferenceError> {
    let mut ranges = Vec::with_capacity(items.len());
    for item in items {
        match validate_item(item, catalog) {
            Ok(range) => ranges.push(range),
            Err(e) if policy == Policy::SkipInvalid && e.is_validation() => {
                tracing::debug!(offset = item.offset, error = %e, "skipping invalid citation item");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(ranges)
}

/// Validate a single item: book first, then both chapters, then both
/// verses, then the order of the endpoints.
pub fn validate_item(item: &QualifiedItem, catalog: &Catalog) -> Result<VerseRange, ReferenceError> {
    let book = catalog
        .lookup_book(&item.book)
        .ok_or_else(|| ReferenceError::UnknownBook {
            token: item.book.clone(),
            offset: item.book_offset,
        })?;

    let start_count = check_chapter(catalog, book, item.start)?;
    let end_count = check_chapter(catalog, book, item.end)?;
    let start = resolve_start(catalog, book, item.start, start_count)?;
    let end = resolve_end(catalog, book, item.end, end_count)?;

    VerseRange::new(start, end).ok_or_else(|| ReferenceError::InvalidRange {
        book: catalog.book_name(book).to_string(),
        start: start.chapter_verse(),
        end: end.chapter_verse(),
    })
}

/// Verse count of the bound's chapter, or `None` for a book edge.
fn check_chapter(catalog: &Catalog, book: BookId, bound: Bound) -> Result<Option<u32>, ReferenceError> {
    let chapter = match bound {
        Bound::BookEdge => return Ok(None),
        Bound::ChapterEdge(c) | Bound::Verse(c, _) => c,
    };
    catalog
        .verse_count(book, chapter)
        .map(Some)
        .map_err(|_| ReferenceError::InvalidChapter {
            book: catalog.book_name(book).to_string(),
            chapter,
        })
}

fn check_verse(
    catalog: &Catalog,
    book: BookId,
    chapter: u32,
    verse: u32,
    count: u32,
) -> Result<VerseAddress, ReferenceError> {
    if verse == 0 || verse > count {
        return Err(ReferenceError::InvalidVerse {
            book: catalog.book_name(book).to_string(),
            chapter,
            verse,
        });
    }
    Ok(VerseAddress::new(book, chapter, verse))
}

fn resolve_start(
    catalog: &Catalog,
    book: BookId,
    bound: Bound,
    count: Option<u32>,
) -> Result<VerseAddress, ReferenceError> {
    match (bound, count) {
        (Bound::Verse(c, v), Some(n)) => check_verse(catalog, book, c, v, n),
        (Bound::ChapterEdge(c), _) => Ok(VerseAddress::new(book, c, 1)),
        _ => Ok(catalog.first_verse(book)),
    }
}

fn resolve_end(
    catalog: &Catalog,
    book: BookId,
    bound: Bound,
    count: Option<u32>,
) -> Result<VerseAddress, ReferenceError> {
    match (bound, count) {
        (Bound::Verse(c, v), Some(n)) => check_verse(catalog, book, c, v, n),
        (Bound::ChapterEdge(c), Some(n)) => Ok(VerseAddress::new(book, c, n)),
        _ => catalog
            .last_verse(book)
            .ok_or_else(|| ReferenceError::InvalidChapter {
                book: catalog.book_name(book).to_string(),
                chapter: catalog.chapter_count(book),
            }),
    }
}
