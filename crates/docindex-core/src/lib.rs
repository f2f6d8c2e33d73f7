//! docindex Core Library
//!
//! Record types, configuration, and error handling shared by the docindex crates.

pub mod config;
pub mod error;
pub mod record;

pub use config::{Config, IndexConfig, SearchConfig, is_js_identifier};
pub use error::{CoreError, Result};
pub use record::{Category, SearchRecord, UnknownCategory};
