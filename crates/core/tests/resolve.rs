//! End-to-end resolution scenarios against the built-in catalog.

use verseref_core::{parse_reference, Catalog, CatalogError, Policy, Reference, ReferenceError};

fn catalog() -> Catalog {
    Catalog::builtin().expect("builtin catalog")
}

/// Resolve and flatten to (book, start_chapter, start_verse, end_chapter, end_verse).
fn tuples(citation: &str, policy: Policy) -> Vec<(String, u32, u32, u32, u32)> {
    let catalog = catalog();
    let reference = parse_reference(citation, &catalog, policy)
        .unwrap_or_else(|e| panic!("'{}' failed: {}", citation, e));
    reference
        .segments(&catalog)
        .into_iter()
        .map(|s| {
            (
                s.book,
                s.start_chapter,
                s.start_verse,
                s.end_chapter,
                s.end_verse,
            )
        })
        .collect()
}

fn strict(citation: &str) -> Vec<(String, u32, u32, u32, u32)> {
    tuples(citation, Policy::Strict)
}

fn err(citation: &str, policy: Policy) -> ReferenceError {
    parse_reference(citation, &catalog(), policy).unwrap_err()
}

fn g(c1: u32, v1: u32, c2: u32, v2: u32) -> (String, u32, u32, u32, u32) {
    ("Genesis".to_string(), c1, v1, c2, v2)
}

// ──────────────────────────────────────────────
// 1. Grammar forms
// ──────────────────────────────────────────────

#[test]
fn single_verse() {
    assert_eq!(
        strict("Jn 3:16"),
        vec![("John".to_string(), 3, 16, 3, 16)]
    );
}

#[test]
fn verse_range() {
    assert_eq!(strict("Gen 1:1-3"), vec![g(1, 1, 1, 3)]);
}

#[test]
fn whole_chapter() {
    assert_eq!(strict("Gen 1"), vec![g(1, 1, 1, 31)]);
}

#[test]
fn chapter_range() {
    assert_eq!(strict("Gen 1-2"), vec![g(1, 1, 2, 25)]);
}

#[test]
fn list_within_chapter() {
    assert_eq!(
        strict("Gen 1:1,3,5-7"),
        vec![g(1, 1, 1, 1), g(1, 3, 1, 3), g(1, 5, 1, 7)]
    );
}

#[test]
fn multi_chapter_list() {
    assert_eq!(strict("Gen 1:1;2:1"), vec![g(1, 1, 1, 1), g(2, 1, 2, 1)]);
}

#[test]
fn multi_book_list() {
    assert_eq!(
        strict("Gen 1:1; Exo 2:1"),
        vec![g(1, 1, 1, 1), ("Exodus".to_string(), 2, 1, 2, 1)]
    );
}

#[test]
fn whitespace_around_separators_is_insignificant() {
    assert_eq!(strict("Gen 1 : 1 - 3 ,5"), strict("Gen 1:1-3,5"));
    assert_eq!(strict("  Gen1:1;2:1  "), strict("Gen 1:1; 2:1"));
}

#[test]
fn whole_book() {
    assert_eq!(strict("Ruth"), vec![("Ruth".to_string(), 1, 1, 4, 22)]);
}

#[test]
fn numbered_books() {
    assert_eq!(
        strict("1 Jn 1:9; 2 Kgs 2:11"),
        vec![
            ("2 Kings".to_string(), 2, 11, 2, 11),
            ("1 John".to_string(), 1, 9, 1, 9),
        ]
    );
}

#[test]
fn ff_runs_to_chapter_end() {
    assert_eq!(strict("Gen 1:29ff"), vec![g(1, 29, 1, 31)]);
}

#[test]
fn period_as_chapter_verse_separator() {
    assert_eq!(strict("Jn 3.16"), strict("Jn 3:16"));
}

// ──────────────────────────────────────────────
// 2. Context inheritance and merging
// ──────────────────────────────────────────────

#[test]
fn context_inheritance() {
    assert_eq!(strict("Gen 1:1,3"), vec![g(1, 1, 1, 1), g(1, 3, 1, 3)]);
    assert_eq!(strict("Gen 1:1;2:1"), vec![g(1, 1, 1, 1), g(2, 1, 2, 1)]);
}

#[test]
fn adjacent_merge() {
    assert_eq!(strict("Gen 1:1-3,4-6"), vec![g(1, 1, 1, 6)]);
}

#[test]
fn merge_across_chapters() {
    assert_eq!(strict("Gen 1:31; 2:1"), vec![g(1, 31, 2, 1)]);
}

#[test]
fn result_is_sorted_regardless_of_citation_order() {
    assert_eq!(
        strict("Exo 1:1; Gen 3:1; Gen 1:1"),
        vec![
            g(1, 1, 1, 1),
            g(3, 1, 3, 1),
            ("Exodus".to_string(), 1, 1, 1, 1)
        ]
    );
}

#[test]
fn book_boundaries_never_merge() {
    assert_eq!(
        strict("Gen 50:26; Exo 1:1"),
        vec![g(50, 26, 50, 26), ("Exodus".to_string(), 1, 1, 1, 1)]
    );
}

// ──────────────────────────────────────────────
// 3. Errors and policies
// ──────────────────────────────────────────────

#[test]
fn unknown_book() {
    assert!(matches!(
        err("Xyz 1:1", Policy::Strict),
        ReferenceError::UnknownBook { ref token, offset: 0 } if token == "Xyz"
    ));
}

#[test]
fn out_of_range_verse() {
    assert_eq!(
        err("Gen 1:32", Policy::Strict),
        ReferenceError::InvalidVerse {
            book: "Genesis".to_string(),
            chapter: 1,
            verse: 32
        }
    );
}

#[test]
fn out_of_range_chapter() {
    assert_eq!(
        err("Gen 51", Policy::Strict),
        ReferenceError::InvalidChapter {
            book: "Genesis".to_string(),
            chapter: 51
        }
    );
}

#[test]
fn backwards_range() {
    assert!(matches!(
        err("Gen 1:5-3", Policy::Strict),
        ReferenceError::InvalidRange { .. }
    ));
}

#[test]
fn skip_invalid_policy() {
    assert_eq!(tuples("Gen 1:1,999", Policy::SkipInvalid), vec![g(1, 1, 1, 1)]);
    assert!(matches!(
        err("Gen 1:1,999", Policy::Strict),
        ReferenceError::InvalidVerse { verse: 999, .. }
    ));
}

#[test]
fn strict_reports_first_failure_in_citation_order() {
    assert!(matches!(
        err("Gen 1:99; Xyz 1:1", Policy::Strict),
        ReferenceError::InvalidVerse { verse: 99, .. }
    ));
    assert!(matches!(
        err("Xyz 1:1; Gen 1:99", Policy::Strict),
        ReferenceError::UnknownBook { .. }
    ));
}

#[test]
fn skip_invalid_with_nothing_left_is_empty() {
    assert_eq!(
        err("Xyz 1:1; Gen 99", Policy::SkipInvalid),
        ReferenceError::EmptyReference
    );
}

#[test]
fn empty_input_is_empty_reference() {
    assert_eq!(err("", Policy::Strict), ReferenceError::EmptyReference);
    assert_eq!(err("   ", Policy::SkipInvalid), ReferenceError::EmptyReference);
}

#[test]
fn syntax_errors_abort_under_either_policy() {
    for policy in [Policy::Strict, Policy::SkipInvalid] {
        assert!(matches!(
            err("Gen 1:1, &", policy),
            ReferenceError::Syntax { offset: 9, .. }
        ));
        assert!(matches!(
            err("Gen 1::1", policy),
            ReferenceError::Syntax { offset: 6, .. }
        ));
    }
}

// ──────────────────────────────────────────────
// 4. Canonical form
// ──────────────────────────────────────────────

#[test]
fn canonical_citation_round_trips() {
    let catalog = catalog();
    for citation in [
        "Gen 1:1-3, 5; 2:1",
        "Jn 3:16",
        "Ps 23; Ps 100:1-3",
        "Song 2:1-3:4; 1 Cor 13",
        "Gen 50; Exo 1",
        "Obad; Jude",
    ] {
        let reference: Reference = parse_reference(citation, &catalog, Policy::Strict).unwrap();
        let canonical = reference.to_citation(&catalog);
        let reparsed = parse_reference(&canonical, &catalog, Policy::Strict)
            .unwrap_or_else(|e| panic!("'{}' did not reparse: {}", canonical, e));
        assert_eq!(reparsed, reference, "canonical form '{}'", canonical);
    }
}

#[test]
fn canonical_citation_text() {
    let catalog = catalog();
    let reference = parse_reference("Gen 1:1-3, 5; 2:1; Exo 3", &catalog, Policy::Strict).unwrap();
    assert_eq!(
        reference.to_citation(&catalog),
        "Genesis 1:1-3; 1:5; 2:1; Exodus 3:1-22"
    );
}

#[test]
fn catalog_rejects_names_citations_cannot_spell() {
    let err = Catalog::from_json(r#"{"name": "x", "books": [{"name": "Psalm 151", "chapters": [7]}]}"#)
        .unwrap_err();
    assert!(matches!(err, CatalogError::UnparseableName(ref n) if n == "Psalm 151"));
}

#[test]
fn custom_catalog_canonical_citation_round_trips() {
    let catalog = Catalog::from_json(
        r#"{"name": "apocrypha", "books": [
            {"name": "Prayer of Manasseh", "aliases": ["PrMan"], "chapters": [15]},
            {"name": "3 Maccabees", "aliases": ["3Macc"], "chapters": [29, 33]},
            {"name": "Bel. and Dr.", "chapters": [42]}
        ]}"#,
    )
    .unwrap();
    let reference = parse_reference("3Macc 1:29-2:3; PrMan; Bel 1:1", &catalog, Policy::SkipInvalid)
        .unwrap();
    let canonical = reference.to_citation(&catalog);
    assert_eq!(
        canonical,
        "Prayer of Manasseh 1:1-15; 3 Maccabees 1:29-2:3"
    );
    assert_eq!(parse_reference(&canonical, &catalog, Policy::Strict).unwrap(), reference);
    assert!(parse_reference("Bel. and Dr. 1:42", &catalog, Policy::Strict).is_ok());
}

#[test]
fn catalogs_coexist() {
    let tiny = Catalog::from_json(
        r#"{"name": "tiny", "books": [{"name": "Alpha", "aliases": ["Gen"], "chapters": [2]}]}"#,
    )
    .unwrap();
    let builtin = catalog();
    assert!(parse_reference("Gen 1:3", &tiny, Policy::Strict).is_err());
    assert!(parse_reference("Gen 1:3", &builtin, Policy::Strict).is_ok());
}

#[test]
fn catalog_is_shareable_across_threads() {
    let catalog = std::sync::Arc::new(catalog());
    let handles: Vec<_> = ["Gen 1:1", "Jn 3:16", "Rev 22"]
        .into_iter()
        .map(|citation| {
            let catalog = std::sync::Arc::clone(&catalog);
            std::thread::spawn(move || {
                parse_reference(citation, &catalog, Policy::Strict)
                    .map(|r| r.len())
                    .unwrap_or(0)
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
}
