//! Stats command - summarize an index

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use docindex_core::Config;
use docindex_search::IndexStats;

use super::{index_path, load_index};

/// Run the stats command.
pub fn run(config: &Config, index: Option<&Path>, json: bool) -> Result<()> {
    let path = index_path(config, index);
    let store = load_index(&path)?;
    let stats = IndexStats::from_store(&store);

    tracing::debug!(?stats, "Computed index statistics");

    if json {
        let out = serde_json::to_string_pretty(&stats).wrap_err("Failed to serialize stats")?;
        println!("{out}");
        return Ok(());
    }

    println!();
    println!("  Index:      {}", path.display());
    println!("  Variable:   {}", store.variable());
    println!("  Records:    {}", stats.records);
    println!("  Pages:      {}", stats.pages);
    println!("  Empty text: {}", stats.empty_text);
    println!();
    println!("  By category:");
    for entry in &stats.per_category {
        println!("    {:<10} {}", entry.category, entry.count);
    }
    println!();
    println!("  By page:");
    for entry in &stats.per_page {
        println!("    {:<10} {}", entry.page, entry.count);
    }
    println!();

    Ok(())
}
