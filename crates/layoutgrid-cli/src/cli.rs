use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use layoutgrid_core::LayoutOptions;

/// Lay out extracted document blocks on an overlap-free grid.
#[derive(Debug, Parser)]
#[command(name = "layoutgrid", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Place blocks and print every placed item
    Place {
        /// Path to the JSON file of extracted blocks
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Multiply output coordinates by this factor (points to pixels)
        #[arg(long, default_value_t = 1.0)]
        scale: f64,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Place blocks and print the rows of each page
    Rows {
        /// Path to the JSON file of extracted blocks
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Place blocks and print per-page layout statistics
    Analyze {
        /// Path to the JSON file of extracted blocks
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Engine tuning shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Grid unit that item tops snap to (default: 5.0)
    #[arg(long, default_value_t = 5.0)]
    pub grid_size: f64,

    /// Gap left between items pushed apart on one line (default: 10.0)
    #[arg(long, default_value_t = 10.0)]
    pub min_spacing: f64,
}

impl LayoutArgs {
    /// Convert to the core library's `LayoutOptions`.
    pub fn to_options(&self) -> LayoutOptions {
        LayoutOptions::new(self.grid_size, self.min_spacing)
    }
}

/// Output format for the place subcommand.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Output format for the rows and analyze subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum ReportFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}
