//! Citation resolver: citation string -> canonical [`Reference`].
//!
//! This is a thin orchestrator that runs the lexer, the parser and each pass
//! in order. Any stage's error is returned as-is.

use crate::ast::QualifiedItem;
use crate::catalog::Catalog;
use crate::error::ReferenceError;
use crate::lexer;
use crate::parser;
use crate::pass1_qualify;
use crate::pass2_validate::{self, Policy};
use crate::pass3_normalize;
use crate::reference::Reference;

/// Resolve `citation` against `catalog`.
///
/// Syntax errors always abort. Catalog validation errors abort under
/// [`Policy::Strict`] and drop the offending item under
/// [`Policy::SkipInvalid`]; [`ReferenceError::EmptyReference`] is returned
/// when the input is blank or no valid item remains.
pub fn parse_reference(
    citation: &str,
    catalog: &Catalog,
    policy: Policy,
) -> Result<Reference, ReferenceError> {
    // Lex, parse and qualify: structure only
    let items = qualify_citation(citation)?;

    // Pass 2: catalog validation
    let ranges = pass2_validate::validate(&items, catalog, policy)?;
    if ranges.is_empty() {
        return Err(ReferenceError::EmptyReference);
    }

    // Pass 3: normalization
    let reference = pass3_normalize::normalize(ranges, catalog);

    tracing::debug!(
        %policy,
        items = items.len(),
        ranges = reference.len(),
        "resolved citation"
    );
    Ok(reference)
}

/// Lex, parse and qualify a citation without consulting any catalog.
pub fn qualify_citation(citation: &str) -> Result<Vec<QualifiedItem>, ReferenceError> {
    let tokens = lexer::lex(citation)?;
    let tree = parser::parse(&tokens)?;
    pass1_qualify::qualify(&tree)
}
