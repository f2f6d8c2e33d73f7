//! Subcommand implementations.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use docindex_core::Config;
use docindex_search::SearchIndexStore;

pub mod check;
pub mod export;
pub mod query;
pub mod stats;

/// Index file to use: the explicit path, or the configured default.
pub fn index_path(config: &Config, index: Option<&Path>) -> PathBuf {
    index
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.index.path))
}

/// Load an index file, attaching the path to any error.
pub fn load_index(path: &Path) -> Result<SearchIndexStore> {
    SearchIndexStore::load_file(path)
        .wrap_err_with(|| format!("Failed to load search index {}", path.display()))
}
