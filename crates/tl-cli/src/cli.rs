//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::commands::util::{RangeInput, parse_range};

/// Personal time log.
///
/// Record work sessions by hours or clock-in/clock-out ranges, then review
/// summaries and weekly analytics.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a new entry.
    Add(AddArgs),

    /// Delete an entry by ID (or unique ID prefix).
    Delete {
        /// ID shown by `tl list`.
        id: String,
    },

    /// List entries, newest first.
    List(ListArgs),

    /// Show totals for a date range and the most recent entries.
    Summary(SummaryArgs),

    /// Show hours by day, by project, and by week.
    Analytics {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show where entries are stored.
    Status,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("duration")
        .required(true)
        .args(["hours", "ranges"])
))]
pub struct AddArgs {
    /// What you worked on.
    #[arg(short, long)]
    pub description: String,

    /// Day the work applies to: YYYY-MM-DD, `today`, `yesterday`, or `N days ago`.
    #[arg(long)]
    pub date: Option<String>,

    /// Project or task name.
    #[arg(short, long, default_value = "")]
    pub project: String,

    /// Hours worked, entered directly.
    #[arg(long)]
    pub hours: Option<f64>,

    /// Clock-in/clock-out range such as `09:00-12:30` or `1:00 PM-5:00 PM`. Repeatable.
    #[arg(long = "range", value_parser = parse_range)]
    pub ranges: Vec<RangeInput>,
}

#[derive(Debug, Args, Default)]
pub struct ListArgs {
    /// Case-insensitive text to look for in projects and descriptions.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show oldest entries first.
    #[arg(long)]
    pub oldest_first: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Default)]
pub struct SummaryArgs {
    /// First day to include (defaults to the earliest entry).
    #[arg(long)]
    pub from: Option<String>,

    /// Last day to include (defaults to the latest entry).
    #[arg(long)]
    pub to: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
