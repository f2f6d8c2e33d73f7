//! Check command - validate search index files

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, bail};
use docindex_core::{Category, Config};
use docindex_search::SearchIndexStore;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
    checked: usize,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates one index file, or every index file found under a directory.
pub fn run(config: &Config, path: Option<&Path>, strict: bool) -> Result<()> {
    let target = super::index_path(config, path);
    tracing::info!(?target, strict, "Checking search indexes");

    let result = check_target(config, &target);

    // Print summary
    println!();
    println!("Summary:");
    println!("  Files:    {}", result.checked);
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    // Determine exit status
    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn check_target(config: &Config, target: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    if target.is_dir() {
        let files = find_index_files(target, &config.index.path);
        if files.is_empty() {
            result.add_error(format!(
                "No index files named {} under {}",
                index_file_name(&config.index.path).to_string_lossy(),
                target.display()
            ));
        }
        println!("Checking {} index file(s)...", files.len());
        for file in files {
            check_index_file(&file, config, &mut result);
        }
    } else {
        println!("Checking index file...");
        check_index_file(target, config, &mut result);
    }

    result
}

fn index_file_name(configured: &str) -> &OsStr {
    Path::new(configured)
        .file_name()
        .unwrap_or_else(|| OsStr::new(configured))
}

/// Find all files named like the configured index file, in sorted order.
fn find_index_files(dir: &Path, configured: &str) -> Vec<PathBuf> {
    let name = index_file_name(configured);

    walkdir::WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == name)
        .map(|e| e.into_path())
        .collect()
}

/// Validate a single index file.
fn check_index_file(path: &Path, config: &Config, result: &mut ValidationResult) {
    result.checked += 1;

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            result.add_error(format!("{}: Failed to read file: {e}", path.display()));
            println!("  ✗ {}: unreadable", path.display());
            return;
        }
    };

    match SearchIndexStore::load(&raw) {
        Ok(store) => {
            println!("  ✓ {}: {} records", path.display(), store.len());
            for warning in index_warnings(&store, raw.len(), config.index.max_size) {
                result.add_warning(format!("{}: {warning}", path.display()));
            }
        }
        Err(e) => {
            result.add_error(format!("{}: {e}", path.display()));
            println!("  ✗ {}: malformed", path.display());
        }
    }
}

/// Non-fatal issues in a well-formed index.
fn index_warnings(store: &SearchIndexStore, size: usize, max_size: usize) -> Vec<String> {
    let mut warnings = Vec::new();

    if store.is_empty() {
        warnings.push("Index has no records".to_string());
    }

    if size > max_size {
        warnings.push(format!(
            "Index is {size} bytes, above the recommended {max_size} bytes"
        ));
    }

    for (position, record) in store.records().iter().enumerate() {
        if record.category == Category::Section && record.title.trim().is_empty() {
            warnings.push(format!("Record {position}: section without a title"));
        }
        if record.location.ends_with('#') {
            warnings.push(format!(
                "Record {position}: location {:?} has an empty fragment",
                record.location
            ));
        }
    }

    warnings
}
