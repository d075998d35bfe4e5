//! CLI module for the research editor
//!
//! Provides command-line interface parsing for the research-editor binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Research Editor - plan a research outline and research every section
#[derive(Parser, Debug)]
#[command(
    name = "research-editor",
    version,
    about = "Research Editor - outline planning and parallel section research",
    long_about = "Plans a research outline through a remote agent-run service and\n\
                  researches every outline section concurrently.\n\n\
                  Results are written to stdout as JSON; progress and logs go to stderr.",
    after_help = "EXAMPLES:\n    \
                  research-editor plan --summary \"...\"          # Plan an outline\n    \
                  research-editor plan --summary-file notes.txt  # Plan from a file\n    \
                  research-editor run --state state.json         # Plan if needed, then research\n    \
                  research-editor config --validate              # Check editor.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "editor.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a research outline from a summary
    ///
    /// Prints the outline as JSON: title, date and section headers.
    Plan {
        /// Research summary the outline is derived from
        #[arg(short, long, conflicts_with = "summary_file")]
        summary: Option<String>,

        /// Read the research summary from a file
        #[arg(long)]
        summary_file: Option<PathBuf>,

        /// Maximum number of section headers
        #[arg(short = 'n', long)]
        max_sections: Option<usize>,
    },

    /// Research every section of an outline
    ///
    /// The state file is a JSON research state. When it already carries a
    /// title and sections those are used directly; otherwise an outline is
    /// planned first.
    Run {
        /// Path to the research state JSON
        #[arg(short, long)]
        state: PathBuf,
    },

    /// Show or validate the configuration
    Config {
        /// Only validate the configuration and report problems
        #[arg(long)]
        validate: bool,
    },
}
