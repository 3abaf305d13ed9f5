//! Info command: detect version and summarize container structure

use anyhow::{Context, Result};
use console::style;
use prettytable::row;
use std::fs;
use std::path::PathBuf;

use aep_format::{ChunkReader, detect_version, downgrade_targets, extract_signature};

use crate::utils::table::create_table;

pub fn execute(path: PathBuf) -> Result<()> {
    let buffer =
        fs::read(&path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let reader = ChunkReader::new(&buffer)
        .with_context(|| format!("Not a valid project file: {}", path.display()))?;
    let container = *reader.container();

    let (label, detected) = detect_version(&buffer);

    println!("\n{}", style("AEP File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Size: {} bytes", style(buffer.len()).green());
    println!(
        "Container: {} ({})",
        style(container.signature).yellow(),
        style(container.format_tag).yellow()
    );
    println!("Declared size: {} bytes", style(container.declared_size).dim());
    println!("Version: {}", style(&label).yellow());
    if let Ok(sig) = extract_signature(&buffer) {
        println!("Signature: {}", style(sig).dim());
    }

    if detected > 0 {
        let targets = downgrade_targets(detected);
        if targets.is_empty() {
            println!("Downgrade targets: {}", style("none").dim());
        } else {
            let list = targets
                .iter()
                .map(|v| v.as_u32().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("Downgrade targets: {}", style(list).green());
        }
    }

    // Top-level chunk summary. The walk may stop early on a malformed
    // chunk; whatever was collected is still worth showing.
    let mut chunks = Vec::new();
    let mut walk_error = None;
    for item in reader {
        match item {
            Ok(chunk) => chunks.push(chunk),
            Err(err) => {
                walk_error = Some(err);
                break;
            }
        }
    }

    if !chunks.is_empty() {
        println!("\n{}", style("Top-Level Chunks").bold());
        let mut table = create_table(vec!["Tag", "Offset", "Size", "Padded"]);
        for chunk in &chunks {
            table.add_row(row![
                style(chunk.tag).cyan(),
                format!("0x{:08x}", chunk.offset),
                chunk.data.len(),
                if chunk.padded { "yes" } else { "" }
            ]);
        }
        table.printstd();
    }

    if let Some(err) = walk_error {
        println!(
            "\n{} chunk walk stopped early: {}",
            style("!").yellow().bold(),
            err
        );
    }

    Ok(())
}
