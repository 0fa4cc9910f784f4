//! Book catalog: canonical books, their aliases, and per-chapter verse counts.
//!
//! A [`Catalog`] is built once from a [`CatalogConfig`] and never mutated.
//! It is passed by reference into every resolution call, so several catalogs
//! (different canons or versifications) can be used side by side.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::address::{BookId, VerseAddress, VerseRange};
use crate::error::CatalogError;
use crate::lexer::{self, Token};
use crate::parser::is_suffix_word;

static BUILTIN_CATALOG_JSON: &str = include_str!("../data/protestant.json");

// ──────────────────────────────────────────────
// Configuration (load interface)
// ──────────────────────────────────────────────

/// Static catalog configuration as supplied by the embedding service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub name: String,
    pub books: Vec<BookConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookConfig {
    /// Canonical name; always accepted as an alias.
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Verse count of each chapter, chapter 1 first.
    pub chapters: Vec<u32>,
}

// ──────────────────────────────────────────────
// Catalog
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BookEntry {
    pub id: BookId,
    pub name: String,
    /// Normalized alias keys, including the canonical name's key.
    pub aliases: BTreeSet<String>,
    pub chapter_verse_counts: Vec<u32>,
}

impl BookEntry {
    pub fn chapter_count(&self) -> u32 {
        self.chapter_verse_counts.len() as u32
    }

    pub fn verse_count(&self, chapter: u32) -> Option<u32> {
        if chapter == 0 {
            return None;
        }
        self.chapter_verse_counts
            .get(chapter as usize - 1)
            .copied()
    }

    pub fn total_verses(&self) -> u64 {
        self.chapter_verse_counts.iter().map(|&n| u64::from(n)).sum()
    }
}

/// Requested chapter does not exist in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("chapter {chapter} out of range (book has {chapter_count} chapters)")]
pub struct ChapterOutOfRange {
    pub chapter: u32,
    pub chapter_count: u32,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    books: Vec<BookEntry>,
    aliases: HashMap<String, BookId>,
}

impl Catalog {
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.books.is_empty() {
            return Err(CatalogError::NoBooks(config.name));
        }
        if config.books.len() > usize::from(u16::MAX) {
            return Err(CatalogError::TooManyBooks);
        }

        let mut books = Vec::with_capacity(config.books.len());
        let mut aliases: HashMap<String, BookId> = HashMap::new();

        for (idx, book) in config.books.into_iter().enumerate() {
            let id = BookId(idx as u16);
            if book.chapters.is_empty() {
                return Err(CatalogError::NoChapters { book: book.name });
            }
            if let Some(pos) = book.chapters.iter().position(|&n| n == 0) {
                return Err(CatalogError::EmptyChapter {
                    book: book.name,
                    chapter: pos as u32 + 1,
                });
            }

            let mut keys = BTreeSet::new();
            for alias in std::iter::once(&book.name).chain(book.aliases.iter()) {
                let key = normalize_book_token(alias);
                if key.is_empty() {
                    return Err(CatalogError::BlankName(alias.clone()));
                }
                if !has_book_shape(alias) {
                    return Err(CatalogError::UnparseableName(alias.clone()));
                }
                if let Some(&first) = aliases.get(&key) {
                    if first != id {
                        let first_book: &BookEntry = &books[first.index()];
                        return Err(CatalogError::DuplicateAlias {
                            alias: alias.clone(),
                            first: first_book.name.clone(),
                            second: book.name.clone(),
                        });
                    }
                }
                aliases.insert(key.clone(), id);
                keys.insert(key);
            }

            books.push(BookEntry {
                id,
                name: book.name,
                aliases: keys,
                chapter_verse_counts: book.chapters,
            });
        }

        tracing::debug!(
            catalog = %config.name,
            books = books.len(),
            aliases = aliases.len(),
            "built book catalog"
        );

        Ok(Catalog {
            name: config.name,
            books,
            aliases,
        })
    }

    pub fn from_json(src: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(src)?;
        Self::from_config(config)
    }

    /// The 66-book Protestant canon with KJV versification.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books in canonical order.
    pub fn books(&self) -> impl Iterator<Item = &BookEntry> {
        self.books.iter()
    }

    pub fn book(&self, id: BookId) -> Option<&BookEntry> {
        self.books.get(id.index())
    }

    /// Canonical name of `id`, or `"?"` for an id from a different catalog.
    pub fn book_name(&self, id: BookId) -> &str {
        self.book(id).map(|b| b.name.as_str()).unwrap_or("?")
    }

    /// Case-, diacritic-, space- and period-insensitive exact alias lookup.
    pub fn lookup_book(&self, token: &str) -> Option<BookId> {
        self.aliases.get(&normalize_book_token(token)).copied()
    }

    pub fn chapter_count(&self, id: BookId) -> u32 {
        self.book(id).map_or(0, BookEntry::chapter_count)
    }

    pub fn verse_count(&self, id: BookId, chapter: u32) -> Result<u32, ChapterOutOfRange> {
        self.book(id)
            .and_then(|b| b.verse_count(chapter))
            .ok_or(ChapterOutOfRange {
                chapter,
                chapter_count: self.chapter_count(id),
            })
    }

    pub fn first_verse(&self, id: BookId) -> VerseAddress {
        VerseAddress::new(id, 1, 1)
    }

    pub fn last_verse(&self, id: BookId) -> Option<VerseAddress> {
        let book = self.book(id)?;
        let chapter = book.chapter_count();
        let verse = book.verse_count(chapter)?;
        Some(VerseAddress::new(id, chapter, verse))
    }

    /// The verse right after `addr` in canonical order, staying inside the
    /// book. `None` at the last verse of a book or for an address the
    /// catalog does not know.
    pub fn successor(&self, addr: &VerseAddress) -> Option<VerseAddress> {
        let count = self.verse_count(addr.book, addr.chapter).ok()?;
        if addr.verse < count {
            Some(VerseAddress::new(addr.book, addr.chapter, addr.verse + 1))
        } else if addr.chapter < self.chapter_count(addr.book) {
            Some(VerseAddress::new(addr.book, addr.chapter + 1, 1))
        } else {
            None
        }
    }

    /// Number of verses covered by a validated range.
    pub fn verses_in(&self, range: &VerseRange) -> u64 {
        let Some(book) = self.book(range.book()) else {
            return 0;
        };
        let (start, end) = (range.start, range.end);
        if start.chapter == end.chapter {
            return u64::from(end.verse.saturating_sub(start.verse)) + 1;
        }
        let head = book
            .verse_count(start.chapter)
            .map_or(0, |n| u64::from(n.saturating_sub(start.verse)) + 1);
        let middle: u64 = (start.chapter + 1..end.chapter)
            .filter_map(|c| book.verse_count(c))
            .map(u64::from)
            .sum();
        head + middle + u64::from(end.verse)
    }
}

/// Normalize a book name or alias to its lookup key: compatibility
/// decomposition with combining marks dropped, lowercased, and everything but
/// letters and digits removed (`"1 Jn."` and `"1jn"` share a key).
pub fn normalize_book_token(token: &str) -> String {
    token
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `name` lexes to what the citation grammar reads as a book:
/// an optional number, then words, each optionally followed by one `.`.
fn has_book_shape(name: &str) -> bool {
    let Ok(lexed) = lexer::lex(name) else {
        return false;
    };
    let tokens: Vec<&Token> = lexed
        .iter()
        .map(|s| &s.token)
        .filter(|t| **t != Token::Eof)
        .collect();
    let body = match tokens.first() {
        Some(Token::Int(_)) => &tokens[1..],
        _ => &tokens[..],
    };

    let mut seen_word = false;
    let mut after_dot = false;
    for token in body {
        match token {
            Token::Word(_) if !is_suffix_word(token) => {
                seen_word = true;
                after_dot = false;
            }
            Token::Dot if seen_word && !after_dot => after_dot = true,
            _ => return false,
        }
    }
    seen_word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::from_config(CatalogConfig {
            name: "test".to_string(),
            books: vec![
                BookConfig {
                    name: "Alpha".to_string(),
                    aliases: vec!["Al".to_string()],
                    chapters: vec![3, 2],
                },
                BookConfig {
                    name: "Beta".to_string(),
                    aliases: vec![],
                    chapters: vec![4],
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn builtin_catalog_has_full_canon() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 66);
        let chapters: u32 = catalog.books().map(|b| b.chapter_count()).sum();
        assert_eq!(chapters, 1189);
        let verses: u64 = catalog.books().map(|b| b.total_verses()).sum();
        assert_eq!(verses, 31102);
    }

    #[test]
    fn lookup_is_case_and_alias_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        let gen = catalog.lookup_book("Genesis").unwrap();
        assert_eq!(catalog.lookup_book("gen"), Some(gen));
        assert_eq!(catalog.lookup_book("GE"), Some(gen));
        assert_eq!(catalog.lookup_book("Gen."), Some(gen));
        assert_eq!(catalog.lookup_book("Xyz"), None);
        assert_eq!(catalog.book_name(gen), "Genesis");
    }

    #[test]
    fn numbered_books_ignore_spacing() {
        let catalog = Catalog::builtin().unwrap();
        let first_john = catalog.lookup_book("1 John").unwrap();
        assert_eq!(catalog.lookup_book("1Jn"), Some(first_john));
        assert_eq!(catalog.lookup_book("I John"), Some(first_john));
        assert_ne!(catalog.lookup_book("John"), Some(first_john));
    }

    #[test]
    fn lookup_folds_diacritics() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.lookup_book("Génesis"),
            catalog.lookup_book("Genesis")
        );
    }

    #[test]
    fn canonical_order_is_book_id_order() {
        let catalog = Catalog::builtin().unwrap();
        let gen = catalog.lookup_book("Genesis").unwrap();
        let exo = catalog.lookup_book("Exodus").unwrap();
        let rev = catalog.lookup_book("Revelation").unwrap();
        assert!(gen < exo && exo < rev);
    }

    #[test]
    fn verse_counts() {
        let catalog = Catalog::builtin().unwrap();
        let gen = catalog.lookup_book("Gen").unwrap();
        assert_eq!(catalog.chapter_count(gen), 50);
        assert_eq!(catalog.verse_count(gen, 1), Ok(31));
        assert_eq!(
            catalog.verse_count(gen, 51),
            Err(ChapterOutOfRange {
                chapter: 51,
                chapter_count: 50
            })
        );
        assert!(catalog.verse_count(gen, 0).is_err());
    }

    #[test]
    fn successor_walks_chapters_but_not_books() {
        let catalog = small_catalog();
        let alpha = catalog.lookup_book("al").unwrap();
        let beta = catalog.lookup_book("beta").unwrap();
        assert_eq!(
            catalog.successor(&VerseAddress::new(alpha, 1, 2)),
            Some(VerseAddress::new(alpha, 1, 3))
        );
        assert_eq!(
            catalog.successor(&VerseAddress::new(alpha, 1, 3)),
            Some(VerseAddress::new(alpha, 2, 1))
        );
        assert_eq!(catalog.successor(&VerseAddress::new(alpha, 2, 2)), None);
        assert_eq!(catalog.successor(&VerseAddress::new(beta, 1, 4)), None);
    }

    #[test]
    fn verses_in_counts_across_chapters() {
        let catalog = small_catalog();
        let alpha = catalog.lookup_book("Alpha").unwrap();
        let range =
            VerseRange::new(VerseAddress::new(alpha, 1, 2), VerseAddress::new(alpha, 2, 2)).unwrap();
        assert_eq!(catalog.verses_in(&range), 4);
        let single = VerseRange::single(VerseAddress::new(alpha, 1, 1));
        assert_eq!(catalog.verses_in(&single), 1);
    }

    #[test]
    fn duplicate_alias_across_books_is_rejected() {
        let err = Catalog::from_config(CatalogConfig {
            name: "dup".to_string(),
            books: vec![
                BookConfig {
                    name: "Judges".to_string(),
                    aliases: vec!["Jud".to_string()],
                    chapters: vec![1],
                },
                BookConfig {
                    name: "Jude".to_string(),
                    aliases: vec!["jud.".to_string()],
                    chapters: vec![1],
                },
            ],
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateAlias { .. }), "{err}");
    }

    #[test]
    fn malformed_configs_are_rejected() {
        assert!(matches!(
            Catalog::from_json(r#"{"name": "empty", "books": []}"#),
            Err(CatalogError::NoBooks(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"name": "x", "books": [{"name": "A", "chapters": []}]}"#),
            Err(CatalogError::NoChapters { .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"name": "x", "books": [{"name": "A", "chapters": [3, 0]}]}"#),
            Err(CatalogError::EmptyChapter { chapter: 2, .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"name": "x", "books": [{"name": "...", "chapters": [1]}]}"#),
            Err(CatalogError::BlankName(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"{"name": "x", "books": "nope"}"#),
            Err(CatalogError::Json(_))
        ));
    }

    fn single_book(name: &str, alias: &str) -> Result<Catalog, CatalogError> {
        Catalog::from_config(CatalogConfig {
            name: "x".to_string(),
            books: vec![BookConfig {
                name: name.to_string(),
                aliases: vec![alias.to_string()],
                chapters: vec![7],
            }],
        })
    }

    #[test]
    fn names_the_grammar_cannot_read_are_rejected() {
        for name in ["Psalm 151", "Bel-Dragon", "Ps151", "Gen 1:1", "Acts ff", "1", "Odes.."] {
            assert!(
                matches!(single_book(name, "Ok"), Err(CatalogError::UnparseableName(ref n)) if n == name),
                "{name} should be rejected"
            );
        }
        assert!(matches!(
            single_book("Odes", "Od 2"),
            Err(CatalogError::UnparseableName(_))
        ));
    }

    #[test]
    fn book_shaped_names_are_accepted() {
        for name in ["Odes", "2 Esdras", "3Macc", "Song of the Three", "Bel. and Dr.", "Ésaïe"] {
            assert!(single_book(name, "Alt").is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize_book_token("1 Jn."), "1jn");
        assert_eq!(normalize_book_token("Song of Solomon"), "songofsolomon");
        assert_eq!(normalize_book_token("Éxodo"), "exodo");
    }
}
