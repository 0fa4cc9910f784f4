//! Optional TOML configuration for the `verseref` binary.
//!
//! # Example
//!
//! ```toml
//! catalog = "catalogs/catholic.json"
//! policy = "skip-invalid"
//! log_level = "debug"
//! ```
//!
//! A relative `catalog` path is taken relative to the directory holding the
//! config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use verseref_core::{Catalog, Policy};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "verseref.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to a catalog JSON file. The built-in catalog is used when absent.
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub policy: Policy,
    /// Default `tracing` filter when `VERSEREF_LOG` is unset.
    pub log_level: Option<String>,
}

impl Config {
    /// Load `explicit` if given, else `verseref.toml` from the working
    /// directory if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, String> {
        match explicit {
            Some(path) => read_config(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    read_config(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Build the catalog named by `override_path`, then by the config file,
    /// falling back to the built-in table.
    pub fn catalog(&self, override_path: Option<&Path>) -> Result<Catalog, String> {
        let path = override_path.or(self.catalog.as_deref());
        match path {
            None => Catalog::builtin()
                .map_err(|e| format!("internal error: built-in catalog is invalid: {}", e)),
            Some(path) => {
                let src = std::fs::read_to_string(path)
                    .map_err(|e| format!("error reading catalog '{}': {}", path.display(), e))?;
                let catalog = Catalog::from_json(&src)
                    .map_err(|e| format!("invalid catalog '{}': {}", path.display(), e))?;
                tracing::debug!(path = %path.display(), books = catalog.len(), "loaded catalog file");
                Ok(catalog)
            }
        }
    }
}

/// Read and parse a config file from `path`.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    let mut config: Config = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    if let Some(catalog) = config.catalog.take() {
        let resolved = match path.parent() {
            Some(dir) if catalog.is_relative() => dir.join(catalog),
            _ => catalog,
        };
        config.catalog = Some(resolved);
    }
    Ok(config)
}
