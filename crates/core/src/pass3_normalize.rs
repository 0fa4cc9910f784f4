//! Pass 3: Range normalization -- sort validated ranges by start address and
//! merge every pair that overlaps or touches into a canonical [`Reference`].

use std::collections::BTreeMap;

use crate::address::{VerseAddress, VerseRange};
use crate::catalog::Catalog;
use crate::reference::Reference;

pub fn normalize(ranges: Vec<VerseRange>, catalog: &Catalog) -> Reference {
    let input = ranges.len();

    // Keyed by start; a repeated start keeps the furthest end.
    let mut by_start: BTreeMap<VerseAddress, VerseAddress> = BTreeMap::new();
    for r in ranges {
        by_start
            .entry(r.start)
            .and_modify(|end| {
                if r.end > *end {
                    *end = r.end;
                }
            })
            .or_insert(r.end);
    }

    let mut merged: Vec<VerseRange> = Vec::with_capacity(by_start.len());
    for (start, end) in by_start {
        if let Some(last) = merged.last_mut() {
            if touches(last, &start, catalog) {
                if end > last.end {
                    last.end = end;
                }
                continue;
            }
        }
        merged.push(VerseRange { start, end });
    }

    tracing::trace!(input, output = merged.len(), "normalized verse ranges");
    Reference::from_normalized(merged)
}

/// Whether a range starting at `next` (with `next >= prev.start`) overlaps
/// `prev` or begins at the verse right after it. Never true across books.
fn touches(prev: &VerseRange, next: &VerseAddress, catalog: &Catalog) -> bool {
    if next.book != prev.end.book {
        return false;
    }
    if *next <= prev.end {
        return true;
    }
    catalog
        .successor(&prev.end)
        .is_some_and(|succ| *next <= succ)
}
