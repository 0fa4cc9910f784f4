//! The canonical resolved value: a sorted set of disjoint, non-touching
//! verse ranges.

use serde::Serialize;
use std::fmt::Write;

use crate::address::{BookId, VerseAddress, VerseRange};
use crate::catalog::Catalog;

/// Normalized result of resolving a citation.
///
/// Ranges are sorted by start address, and consecutive ranges are separated
/// by at least one verse. Only [`pass3_normalize`](crate::pass3_normalize)
/// constructs values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    ranges: Vec<VerseRange>,
}

/// One range of a [`Reference`] in the shape storage queries consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub book: String,
    pub book_id: BookId,
    pub start_chapter: u32,
    pub start_verse: u32,
    pub end_chapter: u32,
    pub end_verse: u32,
}

impl Reference {
    pub(crate) fn from_normalized(ranges: Vec<VerseRange>) -> Self {
        Reference { ranges }
    }

    pub fn ranges(&self) -> &[VerseRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VerseRange> {
        self.ranges.iter()
    }

    pub fn contains(&self, addr: &VerseAddress) -> bool {
        // Ranges are sorted and disjoint: only the last range starting at or
        // before `addr` can contain it.
        let idx = self.ranges.partition_point(|r| r.start <= *addr);
        idx > 0 && self.ranges[idx - 1].contains(addr)
    }

    /// Total number of verses covered.
    pub fn verse_count(&self, catalog: &Catalog) -> u64 {
        self.ranges.iter().map(|r| catalog.verses_in(r)).sum()
    }

    pub fn segments(&self, catalog: &Catalog) -> Vec<Segment> {
        self.ranges
            .iter()
            .map(|r| Segment {
                book: catalog.book_name(r.book()).to_string(),
                book_id: r.book(),
                start_chapter: r.start.chapter,
                start_verse: r.start.verse,
                end_chapter: r.end.chapter,
                end_verse: r.end.verse,
            })
            .collect()
    }

    /// Canonical citation string, e.g. `Genesis 1:1-6; 2:1; Exodus 3:1-4:2`.
    ///
    /// The book name is written only when it changes. Parsing this string
    /// against the same catalog gives back an equal `Reference`.
    pub fn to_citation(&self, catalog: &Catalog) -> String {
        let mut out = String::new();
        let mut current_book: Option<BookId> = None;
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            if current_book != Some(r.book()) {
                out.push_str(catalog.book_name(r.book()));
                out.push(' ');
                current_book = Some(r.book());
            }
            let _ = write!(out, "{}:{}", r.start.chapter, r.start.verse);
            if r.end != r.start {
                if r.end.chapter == r.start.chapter {
                    let _ = write!(out, "-{}", r.end.verse);
                } else {
                    let _ = write!(out, "-{}:{}", r.end.chapter, r.end.verse);
                }
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Reference {
    type Item = &'a VerseRange;
    type IntoIter = std::slice::Iter<'a, VerseRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
