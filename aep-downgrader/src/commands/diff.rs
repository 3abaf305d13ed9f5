//! Diff command: chunk-by-chunk comparison of two project files

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::PathBuf;

use aep_format::{detect_version, diff_chunks};

pub fn execute(first: PathBuf, second: PathBuf) -> Result<()> {
    let buf_a =
        fs::read(&first).with_context(|| format!("Failed to read file: {}", first.display()))?;
    let buf_b =
        fs::read(&second).with_context(|| format!("Failed to read file: {}", second.display()))?;

    println!(
        "First:  {} ({})",
        style(first.display()).cyan(),
        detect_version(&buf_a).0
    );
    println!(
        "Second: {} ({})",
        style(second.display()).cyan(),
        detect_version(&buf_b).0
    );

    let report = diff_chunks(&buf_a, &buf_b).context("Failed to compare files")?;

    println!(
        "\nChunks walked: {} vs {}",
        style(report.first_chunk_count).green(),
        style(report.second_chunk_count).green()
    );
    if let Some(err) = &report.first_error {
        println!(
            "{} first file's walk stopped early: {err}",
            style("!").yellow().bold()
        );
    }
    if let Some(err) = &report.second_error {
        println!(
            "{} second file's walk stopped early: {err}",
            style("!").yellow().bold()
        );
    }

    if report.is_identical() {
        println!("{} files are identical at the chunk level", style("✓").green().bold());
        return Ok(());
    }

    if !report.differences.is_empty() {
        println!("\n{}", style("Differences").bold());
        for diff in &report.differences {
            println!("  {diff}");
        }
    }
    println!(
        "\n{} difference(s) found",
        style(report.differences.len()).yellow()
    );

    Ok(())
}
