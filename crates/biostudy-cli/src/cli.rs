//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "biostudy",
    version,
    about = "Biotechnology study companion - browse, search and revise topics",
    long_about = "Browse a knowledge base of biotechnology topics page by page.\n\n\
                  Search topic text and diagram text, collect a revision report,\n\
                  track mastered topics and run small DNA sequence utilities."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: biostudy.toml in the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Knowledge base file (.csv or .json); overrides settings and environment.
    #[arg(long = "source", short = 's', value_name = "PATH", global = true)]
    pub source: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every page of the knowledge base.
    Topics,

    /// Print one page.
    Show(ShowArgs),

    /// Search topics and diagram text.
    Search(SearchArgs),

    /// Build a revision report from the given pages.
    Report(ReportArgs),

    /// DNA sequence utilities.
    Dna(DnaArgs),

    /// Start the interactive study shell.
    Study,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Page number, starting at 1.
    #[arg(long = "page", default_value_t = 1)]
    pub page: usize,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive).
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Consult diagram text for every row, not only rows without a text match.
    #[arg(long = "images")]
    pub images: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Pages to include, in order. Repeats are kept.
    #[arg(value_name = "PAGES", required = true)]
    pub pages: Vec<usize>,

    /// Write to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DnaArgs {
    #[command(subcommand)]
    pub command: DnaCommand,
}

#[derive(Subcommand)]
pub enum DnaCommand {
    /// Base counts and GC content.
    Stats {
        #[arg(value_name = "SEQ")]
        sequence: String,

        #[arg(long = "format", value_enum, default_value = "table")]
        format: OutputFormatArg,
    },

    /// Reverse complement.
    Revcomp {
        #[arg(value_name = "SEQ")]
        sequence: String,
    },

    /// Translate reading frame 1 with the standard genetic code.
    Translate {
        #[arg(value_name = "SEQ")]
        sequence: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
