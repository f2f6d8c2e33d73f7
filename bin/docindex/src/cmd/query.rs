//! Query command - search an index from the command line

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use docindex_core::{Category, Config, SearchRecord};
use docindex_search::{QueryMatch, SearchQuery, snippet};

use super::{index_path, load_index};

/// Run the query command.
///
/// Prints ranked matches, or a JSON array of the matching records.
pub fn run(
    config: &Config,
    index: Option<&Path>,
    term: &str,
    categories: &[Category],
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let path = index_path(config, index);
    tracing::info!(?path, term, ?categories, ?limit, "Running query");

    let store = load_index(&path)?;
    let query = SearchQuery::new(term)
        .with_categories(categories.iter().copied())
        .with_limit(limit.unwrap_or(config.search.limit));
    let results = store.search(&query);

    if json {
        let records: Vec<&SearchRecord> = results.collect_records();
        let out = serde_json::to_string_pretty(&records).wrap_err("Failed to serialize results")?;
        println!("{out}");
        return Ok(());
    }

    let mut shown = 0;
    for (rank, hit) in results.iter().enumerate() {
        for line in render_match(rank + 1, &hit, term, config.search.snippet_length) {
            println!("{line}");
        }
        shown += 1;
    }

    if shown == 0 {
        println!("No results for \"{term}\"");
    } else {
        println!();
        println!("  {shown} result(s) for \"{term}\"");
    }

    Ok(())
}

/// Format one match for terminal output.
fn render_match(rank: usize, hit: &QueryMatch<'_>, term: &str, snippet_length: usize) -> Vec<String> {
    let record = hit.record;
    let mut lines = vec![format!(
        "{rank:>3}. {} [{}] ({})",
        record.title, record.category, record.page
    )];

    let location = if record.location.is_empty() {
        "/"
    } else {
        record.location.as_str()
    };
    lines.push(format!("     {location}"));

    if let Some(excerpt) = snippet(&record.text, term, snippet_length) {
        lines.push(format!("     {excerpt}"));
    }

    lines
}
