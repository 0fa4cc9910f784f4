//! Syntax tree types shared by the parser and the resolution passes.
//!
//! [`ParseNode`] is the raw tree the parser produces: structure only, with no
//! catalog knowledge and with chapters still implicit where the citation
//! omitted them. [`QualifiedItem`] is the pass-1 output, one per leaf, with
//! book and chapter context filled in.

// ──────────────────────────────────────────────
// Raw parse tree
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `,` -- continues within the current book and chapter
    Comma,
    /// `;` -- may introduce a new chapter
    Semicolon,
}

/// End of a range that started at a verse (`C:V-...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseRangeEnd {
    /// `C:V-V2`
    Verse(u32),
    /// `C:V-C2:V2`
    ChapterVerse(u32, u32),
    /// `C:Vff` -- through the last verse of the chapter
    ChapterEnd,
}

/// End of a range that started at a whole chapter (`C-...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterRangeEnd {
    /// `C-C2`
    Chapter(u32),
    /// `C-C2:V2`
    ChapterVerse(u32, u32),
}

/// Raw syntax tree node. Offsets are byte offsets into the citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// A book name as written. `whole` is set when no chapter or verse
    /// follows it, i.e. the mention cites the entire book.
    BookMention {
        token: String,
        offset: usize,
        whole: bool,
    },
    /// `C:V`, `C:V-...`, or a bare verse after `,` in verse mode, in which
    /// case `chapter` is `None` and is inherited from the previous item.
    ChapterVerseItem {
        chapter: Option<u32>,
        verse: u32,
        end: Option<VerseRangeEnd>,
        offset: usize,
    },
    /// `C` or `C-...`
    ChapterOnlyItem {
        chapter: u32,
        end: Option<ChapterRangeEnd>,
        offset: usize,
    },
    CompoundList {
        items: Vec<ParseNode>,
        separator: Separator,
    },
}

impl ParseNode {
    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&ParseNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ParseNode>) {
        match self {
            ParseNode::CompoundList { items, .. } => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
            leaf => out.push(leaf),
        }
    }
}

// ──────────────────────────────────────────────
// Qualified items (pass 1 output)
// ──────────────────────────────────────────────

/// One end of a qualified span. Which verse a `BookEdge` or `ChapterEdge`
/// denotes depends on whether it is the start or the end of the span, and
/// for ends, on the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    BookEdge,
    ChapterEdge(u32),
    Verse(u32, u32),
}

/// A fully-qualified citation item: book token plus start and end bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedItem {
    /// Book name exactly as written in the citation.
    pub book: String,
    pub book_offset: usize,
    /// Offset of the leaf this item came from.
    pub offset: usize,
    pub start: Bound,
    pub end: Bound,
}
