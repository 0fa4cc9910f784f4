//! Verse addressing: book ids, verse addresses and verse ranges.
//!
//! Ordering on every type here follows canonical catalog order: book first,
//! then chapter, then verse. Catalog bounds are not checked on construction;
//! values only come out of the validator once they have been checked.

use serde::Serialize;
use std::fmt;

/// Canonical identifier of a book: its index in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(pub(crate) u16);

impl BookId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A chapter/verse pair within a book, written `chapter:verse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ChapterVerse {
    pub chapter: u32,
    pub verse: u32,
}

impl ChapterVerse {
    pub fn new(chapter: u32, verse: u32) -> Self {
        ChapterVerse { chapter, verse }
    }
}

impl fmt::Display for ChapterVerse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseAddress {
    pub book: BookId,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseAddress {
    pub fn new(book: BookId, chapter: u32, verse: u32) -> Self {
        VerseAddress {
            book,
            chapter,
            verse,
        }
    }

    pub fn chapter_verse(&self) -> ChapterVerse {
        ChapterVerse::new(self.chapter, self.verse)
    }
}

/// An inclusive span of verses inside a single book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseRange {
    pub start: VerseAddress,
    pub end: VerseAddress,
}

impl VerseRange {
    /// Build a range, returning `None` when `start > end` or the endpoints
    /// lie in different books.
    pub fn new(start: VerseAddress, end: VerseAddress) -> Option<Self> {
        if start.book != end.book || start > end {
            return None;
        }
        Some(VerseRange { start, end })
    }

    pub fn single(addr: VerseAddress) -> Self {
        VerseRange {
            start: addr,
            end: addr,
        }
    }

    pub fn book(&self) -> BookId {
        self.start.book
    }

    pub fn contains(&self, addr: &VerseAddress) -> bool {
        self.start <= *addr && *addr <= self.end
    }
}
