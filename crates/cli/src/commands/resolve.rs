use std::process;

use verseref_core::{parse_reference, Catalog, Policy, Reference, ReferenceError};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_resolve(
    citation: &str,
    catalog: &Catalog,
    policy: Policy,
    output: OutputFormat,
    quiet: bool,
) {
    match parse_reference(citation, catalog, policy) {
        Ok(reference) => match output {
            OutputFormat::Text => print_text(&reference, catalog, quiet),
            OutputFormat::Json => {
                let json = resolution_json(citation, &reference, catalog);
                let pretty = serde_json::to_string_pretty(&json)
                    .unwrap_or_else(|e| format!("serialization error: {}", e));
                println!("{}", pretty);
            }
        },
        Err(e) => {
            report_reference_error(&e, output, quiet, true);
            process::exit(1);
        }
    }
}

/// `{citation, canonical, segments}` document for one resolved citation.
pub(crate) fn resolution_json(
    citation: &str,
    reference: &Reference,
    catalog: &Catalog,
) -> serde_json::Value {
    serde_json::json!({
        "citation": citation,
        "canonical": reference.to_citation(catalog),
        "segments": reference.segments(catalog),
    })
}

/// Canonical citation, then one line per segment unless `quiet`.
pub(crate) fn print_text(reference: &Reference, catalog: &Catalog, quiet: bool) {
    println!("{}", reference.to_citation(catalog));
    if quiet {
        return;
    }
    for (segment, range) in reference.segments(catalog).iter().zip(reference) {
        let verses = catalog.verses_in(range);
        println!(
            "  {} {}:{}-{}:{}  ({} {})",
            segment.book,
            segment.start_chapter,
            segment.start_verse,
            segment.end_chapter,
            segment.end_verse,
            verses,
            if verses == 1 { "verse" } else { "verses" }
        );
    }
}

/// Text errors go through `report_error`; JSON errors are always printed,
/// pretty or on one line.
pub(crate) fn report_reference_error(
    e: &ReferenceError,
    output: OutputFormat,
    quiet: bool,
    pretty: bool,
) {
    match output {
        OutputFormat::Text => report_error(&format!("error: {}", e), output, quiet),
        OutputFormat::Json => {
            let value = e.to_json_value();
            let rendered = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };
            eprintln!(
                "{}",
                rendered.unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e))
            );
        }
    }
}
