//! docindex CLI Library
//!
//! Command implementations for the `docindex` binary, exposed as a library so
//! they can be tested and reused.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (query, check, export, stats)
//!
//! # Example
//!
//! ```no_run
//! use docindex::{Config, cmd};
//!
//! let config = Config::default();
//! cmd::query::run(&config, None, "newtonsolve", &[], None, false).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use docindex_core::{Category, Config, SearchRecord};
pub use docindex_search::{IndexFormat, IndexStats, SearchIndexStore, SearchQuery};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// docindex::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
