//! Export command - re-serialize an index

use std::{io::Write, path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr, bail};
use docindex_core::{Config, is_js_identifier};
use docindex_search::IndexFormat;

use super::{index_path, load_index};

/// Run the export command.
///
/// Writes the index to `output`, or to stdout when no output is given.
pub fn run(
    config: &Config,
    index: Option<&Path>,
    format: IndexFormat,
    output: Option<&Path>,
    variable: Option<&str>,
) -> Result<()> {
    let start = Instant::now();
    let path = index_path(config, index);
    tracing::info!(?path, %format, ?output, ?variable, "Starting export");

    let mut store = load_index(&path)?;

    // CLI flag first, then index.variable from the configuration
    let name = variable.unwrap_or(&config.index.variable);
    if !is_js_identifier(name) {
        bail!("Invalid variable name: {name:?}");
    }
    if name != store.variable() {
        tracing::info!(from = store.variable(), to = name, "Renaming index variable");
        store = store.renamed(name);
    }

    let Some(output) = output else {
        let serialized = store
            .serialize(format)
            .wrap_err("Failed to serialize index")?;
        write_serialized(&mut std::io::stdout().lock(), &serialized)
            .wrap_err("Failed to write index to stdout")?;
        return Ok(());
    };

    let size = store
        .write_to_file(output, format, config.index.max_size)
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

    let duration = start.elapsed();

    // Print export statistics
    println!();
    println!("  Export completed successfully!");
    println!();
    println!("  Records:    {}", store.len());
    println!("  Format:     {format}");
    println!("  Size:       {size} bytes");
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(records = store.len(), size, ?duration, "Export completed successfully");

    Ok(())
}

/// Write serialized output exactly as produced, without a trailing newline.
fn write_serialized<W: Write>(out: &mut W, serialized: &str) -> std::io::Result<()> {
    out.write_all(serialized.as_bytes())?;
    out.flush()
}
