//! Convert command: batch downgrade of project files

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

use aep_format::{ProgressSink, convert, detect_version, downgrade_targets};

use crate::utils::progress::create_progress_bar;

/// Sink that forwards engine progress messages to the logger, so they show
/// up under `-v` without cluttering normal output.
struct LogSink;

impl ProgressSink for LogSink {
    fn progress(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// Parse a target version string. Accepts "24", "24.x", and "AE 24.x".
fn parse_version(version_str: &str) -> Result<u32> {
    let trimmed = version_str
        .trim()
        .trim_start_matches("AE ")
        .trim_start_matches("ae ");
    let major = trimmed.split('.').next().unwrap_or("");
    major
        .parse::<u32>()
        .with_context(|| format!("Unknown version: {version_str}"))
}

/// Output path for a converted file: `{stem}_AE{target}x.aep` next to the
/// input, or inside `output_dir` when given.
fn output_path(input: &Path, target: u32, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "project".to_string(), |s| s.to_string_lossy().to_string());
    let file_name = format!("{stem}_AE{target}x.aep");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// One (file, target) conversion. Failures are isolated per unit.
fn convert_unit(input: &Path, target: u32, output_dir: Option<&Path>) -> Result<PathBuf> {
    let mut buffer =
        fs::read(input).with_context(|| format!("Failed to read file: {}", input.display()))?;

    let (label, detected) = detect_version(&buffer);
    if detected == 0 {
        anyhow::bail!("{}: version not recognized ({})", input.display(), label);
    }
    if !downgrade_targets(detected).iter().any(|v| v.as_u32() == target) {
        anyhow::bail!(
            "{}: target {} is not a downgrade from detected {} (valid targets: {})",
            input.display(),
            target,
            label,
            downgrade_targets(detected)
                .iter()
                .map(|v| v.as_u32().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let result = convert(&mut buffer, target, &mut LogSink)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    log::info!("{}", result.message);

    let out = output_path(input, target, output_dir);
    fs::write(&out, &buffer)
        .with_context(|| format!("Failed to write output file: {}", out.display()))?;
    Ok(out)
}

pub fn execute(files: Vec<PathBuf>, to: Vec<String>, output_dir: Option<PathBuf>) -> Result<()> {
    let targets = to
        .iter()
        .map(|s| parse_version(s))
        .collect::<Result<Vec<u32>>>()?;

    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let total = files.len() * targets.len();
    let pb = create_progress_bar(total as u64, "Converting");

    let mut succeeded = 0;
    let mut lines = Vec::new();
    for file in &files {
        for &target in &targets {
            match convert_unit(file, target, output_dir.as_deref()) {
                Ok(out) => {
                    succeeded += 1;
                    lines.push(format!(
                        "{} {} -> AE {}.x: {}",
                        style("✓").green().bold(),
                        file.display(),
                        target,
                        style(out.display()).cyan()
                    ));
                }
                Err(err) => {
                    lines.push(format!("{} {err:#}", style("✗").red().bold()));
                }
            }
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    for line in &lines {
        println!("{line}");
    }
    println!(
        "\n{}/{} conversions successful",
        style(succeeded).green(),
        total
    );

    if succeeded == 0 && total > 0 {
        anyhow::bail!("all conversions failed");
    }
    Ok(())
}
