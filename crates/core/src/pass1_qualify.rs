//! Pass 1: Context qualification -- fold the parse-tree leaves left to right,
//! carrying the current book and chapter, and emit one fully-qualified item
//! per cited span.

use crate::ast::*;
use crate::error::ReferenceError;

/// Accumulator threaded through the fold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Book token as written, with its offset.
    pub book: Option<(String, usize)>,
    pub chapter: Option<u32>,
}

pub fn qualify(tree: &ParseNode) -> Result<Vec<QualifiedItem>, ReferenceError> {
    let (_, items) = tree.leaves().into_iter().try_fold(
        (Context::default(), Vec::new()),
        |(ctx, mut items), leaf| {
            let ctx = qualify_leaf(ctx, leaf, &mut items)?;
            Ok::<_, ReferenceError>((ctx, items))
        },
    )?;
    tracing::trace!(items = items.len(), "qualified citation items");
    Ok(items)
}

/// Apply one leaf to the context, pushing any item it cites.
pub fn qualify_leaf(
    mut ctx: Context,
    leaf: &ParseNode,
    items: &mut Vec<QualifiedItem>,
) -> Result<Context, ReferenceError> {
    match leaf {
        ParseNode::BookMention {
            token,
            offset,
            whole,
        } => {
            ctx.book = Some((token.clone(), *offset));
            ctx.chapter = None;
            if *whole {
                items.push(QualifiedItem {
                    book: token.clone(),
                    book_offset: *offset,
                    offset: *offset,
                    start: Bound::BookEdge,
                    end: Bound::BookEdge,
                });
            }
        }
        ParseNode::ChapterOnlyItem {
            chapter,
            end,
            offset,
        } => {
            let (book, book_offset) = book_in_scope(&ctx, *offset)?;
            let (end_bound, end_chapter) = match end {
                None => (Bound::ChapterEdge(*chapter), *chapter),
                Some(ChapterRangeEnd::Chapter(c)) => (Bound::ChapterEdge(*c), *c),
                Some(ChapterRangeEnd::ChapterVerse(c, v)) => (Bound::Verse(*c, *v), *c),
            };
            items.push(QualifiedItem {
                book,
                book_offset,
                offset: *offset,
                start: Bound::ChapterEdge(*chapter),
                end: end_bound,
            });
            ctx.chapter = Some(end_chapter);
        }
        ParseNode::ChapterVerseItem {
            chapter,
            verse,
            end,
            offset,
        } => {
            let (book, book_offset) = book_in_scope(&ctx, *offset)?;
            let chapter = chapter.or(ctx.chapter).ok_or_else(|| {
                ReferenceError::syntax(*offset, format!("verse {} has no chapter in scope", verse))
            })?;
            let (end_bound, end_chapter) = match end {
                None => (Bound::Verse(chapter, *verse), chapter),
                Some(VerseRangeEnd::Verse(v)) => (Bound::Verse(chapter, *v), chapter),
                Some(VerseRangeEnd::ChapterVerse(c, v)) => (Bound::Verse(*c, *v), *c),
                Some(VerseRangeEnd::ChapterEnd) => (Bound::ChapterEdge(chapter), chapter),
            };
            items.push(QualifiedItem {
                book,
                book_offset,
                offset: *offset,
                start: Bound::Verse(chapter, *verse),
                end: end_bound,
            });
            ctx.chapter = Some(end_chapter);
        }
        ParseNode::CompoundList { .. } => {}
    }
    Ok(ctx)
}

fn book_in_scope(ctx: &Context, offset: usize) -> Result<(String, usize), ReferenceError> {
    ctx.book
        .clone()
        .ok_or_else(|| ReferenceError::syntax(offset, "no book in scope"))
}
