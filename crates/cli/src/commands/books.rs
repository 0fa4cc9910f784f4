use verseref_core::Catalog;

use crate::OutputFormat;

pub(crate) fn cmd_books(catalog: &Catalog, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Text => {
            if !quiet {
                println!("{} ({} books)", catalog.name(), catalog.len());
            }
            for book in catalog.books() {
                let aliases: Vec<&str> = book.aliases.iter().map(String::as_str).collect();
                println!(
                    "{:<20} {:>3} chapters  {}",
                    book.name,
                    book.chapter_count(),
                    aliases.join(", ")
                );
            }
        }
        OutputFormat::Json => {
            let books: Vec<serde_json::Value> = catalog
                .books()
                .map(|book| {
                    serde_json::json!({
                        "id": book.id,
                        "name": book.name,
                        "chapters": book.chapter_count(),
                        "verses": book.total_verses(),
                        "aliases": book.aliases,
                    })
                })
                .collect();
            let json = serde_json::json!({
                "name": catalog.name(),
                "books": books,
            });
            let pretty = serde_json::to_string_pretty(&json)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}
