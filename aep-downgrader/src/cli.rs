//! Root CLI structure for aep-downgrader

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aep-downgrader")]
#[command(about = "Downgrade After Effects project files to older versions", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about a project file
    Info {
        /// Path to the .aep file
        file: PathBuf,
    },

    /// Convert project files to older versions
    Convert {
        /// Paths to the input .aep files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target versions (e.g., "24", "24.x", "AE 24.x"; repeatable)
        #[arg(short = 't', long = "to", value_name = "VERSION", required = true)]
        to: Vec<String>,

        /// Directory for converted files (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Compare two project files chunk by chunk
    Diff {
        /// Path to the first .aep file
        first: PathBuf,

        /// Path to the second .aep file
        second: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
