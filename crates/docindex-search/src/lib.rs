//! docindex Search Library
//!
//! Loading, querying and re-serializing the `search_index.js` files written by
//! Documenter-style documentation builds.
//!
//! # Features
//!
//! - **Strict loading**: malformed indexes are rejected before any store exists
//! - **Ranked substring search**: title matches first, then text-only matches
//! - **Lossless output**: re-serialization reproduces the generator's layout
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use docindex_search::{SearchIndexStore, SearchQuery};
//!
//! let store = SearchIndexStore::load_file(Path::new("docs/build/search_index.js")).unwrap();
//!
//! for hit in &store.query("newtonsolve") {
//!     println!("{} ({})", hit.record.title, hit.record.location);
//! }
//!
//! let top = store.search(&SearchQuery::new("cache").with_limit(3));
//! println!("{} matches", top.count());
//! ```

use std::path::PathBuf;

pub mod codec;
pub mod query;
pub mod stats;
pub mod store;

pub use codec::{DEFAULT_VARIABLE, DecodedIndex, IndexFormat};
pub use docindex_core::{Category, SearchRecord};
pub use query::{MatchField, Matches, QueryMatch, QueryResults, SearchQuery, snippet};
pub use stats::{CategoryCount, IndexStats, PageCount};
pub use store::SearchIndexStore;
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The input is not a well-formed search index.
    #[error("Malformed index{}: {message}", record_suffix(.record))]
    MalformedIndex {
        /// Zero-based position of the offending record, if known.
        record: Option<usize>,
        message: String,
    },

    /// I/O error.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SearchError {
    /// Create a malformed-index error not tied to a record.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedIndex {
            record: None,
            message: message.into(),
        }
    }

    /// Create a malformed-index error for the record at `position`.
    pub fn malformed_at(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedIndex {
            record: Some(position),
            message: message.into(),
        }
    }

    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error rejects the index content itself.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedIndex { .. })
    }
}

fn record_suffix(record: &Option<usize>) -> String {
    record
        .map(|position| format!(" at record {position}"))
        .unwrap_or_default()
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
