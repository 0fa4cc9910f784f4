use std::io::{self, BufRead, Write};

use verseref_core::{parse_reference, Catalog, Policy};

use super::resolve::{print_text, report_reference_error, resolution_json};
use crate::OutputFormat;

/// Read citations from stdin one line at a time until EOF, `exit` or `quit`.
/// A line that fails to resolve is reported and the loop carries on.
pub(crate) fn cmd_repl(catalog: &Catalog, policy: Policy, output: OutputFormat, quiet: bool) {
    let stdin = io::stdin();
    run(stdin.lock(), catalog, policy, output, quiet);
}

fn run<R: BufRead>(
    mut reader: R,
    catalog: &Catalog,
    mut policy: Policy,
    output: OutputFormat,
    quiet: bool,
) {
    // Prompts and banners would corrupt a JSON stream.
    let interactive = !quiet && output == OutputFormat::Text;
    if interactive {
        println!("verseref: {} ({} books), policy {}", catalog.name(), catalog.len(), policy);
        println!("type a citation, 'help', or 'quit'");
    }

    let mut line = String::new();
    let mut resolved = 0usize;
    let mut failed = 0usize;

    loop {
        if interactive {
            print!("verseref> ");
            if io::stdout().flush().is_err() {
                break;
            }
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                if interactive {
                    println!();
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {}", e);
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut words = trimmed.split_whitespace();
        match words.next().map(str::to_lowercase).as_deref() {
            Some("exit") | Some("quit") if words.clone().next().is_none() => break,
            Some("help") if words.clone().next().is_none() => {
                print_info(output, HELP);
                continue;
            }
            Some(":policy") => {
                match words.next().map(str::parse::<Policy>) {
                    Some(Ok(p)) => {
                        policy = p;
                        if interactive {
                            println!("  policy set to {}", policy);
                        }
                    }
                    Some(Err(e)) => eprintln!("  {}", e),
                    None => print_info(output, &format!("  policy is {}", policy)),
                }
                continue;
            }
            _ => {}
        }

        match parse_reference(trimmed, catalog, policy) {
            Ok(reference) => {
                resolved += 1;
                match output {
                    OutputFormat::Text => print_text(&reference, catalog, quiet),
                    OutputFormat::Json => {
                        let json = resolution_json(trimmed, &reference, catalog);
                        println!(
                            "{}",
                            serde_json::to_string(&json)
                                .unwrap_or_else(|e| format!("serialization error: {}", e))
                        );
                    }
                }
            }
            Err(e) => {
                failed += 1;
                report_reference_error(&e, output, quiet, false);
            }
        }
    }

    tracing::debug!(resolved, failed, "repl finished");
}

const HELP: &str = "  <citation>              resolve a citation, e.g. Gen 1:1-3, 5; Exo 2
  :policy [strict|skip-invalid]
                          show or change the validation policy
  help                    show this help
  quit | exit             leave (Ctrl-D also works)";

/// Informational text for the user. Stdout carries only results in JSON
/// mode, so there it goes to stderr.
fn print_info(output: OutputFormat, text: &str) {
    match output {
        OutputFormat::Text => println!("{}", text),
        OutputFormat::Json => eprintln!("{}", text),
    }
}
