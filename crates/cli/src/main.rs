mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use verseref_core::Policy;

use config::Config;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Scripture citation resolver.
#[derive(Parser)]
#[command(name = "verseref", version, about = "Scripture citation resolver")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML config file (default: ./verseref.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to a catalog JSON file, overriding the config file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a citation into canonical verse ranges
    Resolve {
        /// Citation text, e.g. "Gen 1:1-3, 5; Exo 2"
        citation: String,
        /// Validation policy (strict or skip-invalid); overrides the config file
        #[arg(long)]
        policy: Option<Policy>,
    },

    /// List the books of the catalog
    Books,

    /// Resolve citations read line by line from stdin
    Repl {
        /// Validation policy (strict or skip-invalid); overrides the config file
        #[arg(long)]
        policy: Option<Policy>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&format!("error: {}", msg), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    logging::init(config.log_level.as_deref());

    let catalog = match config.catalog(cli.catalog.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&format!("error: {}", msg), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    tracing::debug!(catalog = catalog.name(), books = catalog.len(), "catalog ready");

    match cli.command {
        Commands::Resolve { citation, policy } => {
            let policy = policy.unwrap_or(config.policy);
            commands::resolve::cmd_resolve(&citation, &catalog, policy, cli.output, cli.quiet);
        }
        Commands::Books => {
            commands::books::cmd_books(&catalog, cli.output, cli.quiet);
        }
        Commands::Repl { policy } => {
            let policy = policy.unwrap_or(config.policy);
            commands::repl::cmd_repl(&catalog, policy, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
