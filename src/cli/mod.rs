pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::models::log_entry::LogContext;
use crate::core::services::query_engine::DEFAULT_RECENT_LIMIT;

/// Record, search and report on your work log.
#[derive(Parser, Debug)]
#[command(name = "worklog", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new work log entry
    Add {
        /// What was done
        content: String,
        /// Classification, e.g. 開発, 調査, ミーティング
        #[arg(short, long, default_value = "General")]
        category: String,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Search entries by keyword, date range and context
    Search {
        /// Matches content, category or tags
        keyword: Option<String>,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(short, long)]
        end: Option<String>,
        /// Substring of the file path
        #[arg(long)]
        file: Option<String>,
        /// Substring of the project path
        #[arg(long)]
        project: Option<String>,
        /// Exact git branch
        #[arg(long)]
        branch: Option<String>,
        /// Exact category
        #[arg(long)]
        category: Option<String>,
        /// Maximum number of entries (default from config: 10)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Show the most recent entries
    Recent {
        /// Number of entries
        #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT, allow_negative_numbers = true)]
        limit: i64,
    },

    /// Show entries in one category
    Category {
        /// Exact category name
        category: String,
        /// Maximum number of entries (default from config: 10)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Show a single entry
    Get {
        /// Entry id
        id: i64,
    },

    /// Change fields of an entry; omitted fields keep their value
    Update {
        /// Entry id
        id: i64,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// Replacement tags (comma-separated, "" clears them)
        #[arg(short, long)]
        tags: Option<String>,
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Delete an entry (a deletion record is kept)
    Delete {
        /// Entry id
        id: i64,
    },

    /// Print the log report for one day
    Show {
        /// Date (YYYY-MM-DD), default today
        date: Option<String>,
    },

    /// Print a report-writing prompt with the period's log attached
    Prompt {
        #[command(subcommand)]
        kind: PromptKind,
    },

    /// Count entries per category
    Stats,

    /// Inspect or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Optional location metadata shared by `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Related file path
    #[arg(long)]
    pub file: Option<String>,
    /// First related line
    #[arg(long)]
    pub line_start: Option<i64>,
    /// Last related line
    #[arg(long)]
    pub line_end: Option<i64>,
    /// Git branch
    #[arg(long)]
    pub branch: Option<String>,
    /// Git commit hash
    #[arg(long)]
    pub commit: Option<String>,
    /// Project root path
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PromptKind {
    /// Daily report for the anchor day
    Daily {
        /// Anchor date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// Weekly report, Monday to Sunday
    Weekly {
        /// Anchor date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
    /// Monthly report, first to last day
    Monthly {
        /// Anchor date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show config file and database locations
    Show,
    /// Store a custom database path
    SetDbPath {
        /// Database file (relative paths and ~ are expanded)
        path: String,
    },
    /// Go back to the default database path
    ResetDbPath,
}

impl ContextArgs {
    /// Convert to a `LogContext`, treating blank text as absent.
    pub fn into_context(self) -> LogContext {
        fn non_blank(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        LogContext {
            file_path: non_blank(self.file),
            line_start: self.line_start,
            line_end: self.line_end,
            git_branch: non_blank(self.branch),
            git_commit: non_blank(self.commit),
            project_path: non_blank(self.project),
        }
    }
}
