//! verseref-core: scripture citation resolution engine.
//!
//! Turns human-written citations such as `"Gen 1:1-3, 5; 2:1"` into a
//! canonical [`Reference`]: sorted, merged verse ranges checked against a
//! book [`Catalog`].
//!
//! # Pipeline
//!
//! 1. [`lexer`] -- citation string to tokens with byte offsets
//! 2. [`parser`] -- tokens to a raw [`ParseNode`] tree
//! 3. [`pass1_qualify`] -- carry book/chapter context across list items
//! 4. [`pass2_validate`] -- check every item against the catalog under a [`Policy`]
//! 5. [`pass3_normalize`] -- sort and merge into a [`Reference`]
//!
//! [`parse_reference()`] runs the whole pipeline.
//!
//! ```
//! use verseref_core::{parse_reference, Catalog, Policy};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let reference = parse_reference("Gen 1:1-3,4-6", &catalog, Policy::Strict).unwrap();
//! assert_eq!(reference.to_citation(&catalog), "Genesis 1:1-6");
//! ```

pub mod address;
pub mod ast;
pub mod catalog;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pass1_qualify;
pub mod pass2_validate;
pub mod pass3_normalize;
pub mod reference;
pub mod resolve;

// ── Convenience re-exports: key types ────────────────────────────────

pub use address::{BookId, ChapterVerse, VerseAddress, VerseRange};
pub use ast::{Bound, ParseNode, QualifiedItem};
pub use catalog::{BookConfig, BookEntry, Catalog, CatalogConfig};
pub use error::{CatalogError, ReferenceError};
pub use pass2_validate::Policy;
pub use reference::{Reference, Segment};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use pass3_normalize::normalize;
pub use resolve::{parse_reference, qualify_citation};
