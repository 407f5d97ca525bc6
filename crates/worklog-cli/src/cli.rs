//! CLI argument definitions for the worklog diagnostic client.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ping` | Probe the server's health-check paths |
//! | `login` | Authenticate and record the session token |
//! | `range` | Fetch a trailing day-range of work entries |
//! | `show` | Fetch a single work entry by id |
//! | `create` | Create a work entry |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `$WORKLOG_BASE_URL` | API base URL |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! worklog ping
//! worklog login tech@example.test --password secret
//! worklog range --days 30 --filter acme --pretty
//! worklog show 7
//! worklog create --date 2026-08-25 --client Acme --start 08:30 --end 12:00
//! ```

use clap::{Parser, Subcommand};

/// Diagnostic client for the worklog time-tracking API.
#[derive(Debug, Parser)]
#[command(name = "worklog", version, about = "worklog diagnostic client")]
pub struct Cli {
    /// API base URL; overrides WORKLOG_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe the health-check paths in order.
    Ping,

    /// Authenticate and print the session outcome.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Fetch a trailing day-range of work entries.
    Range {
        /// Trailing window size in days.
        #[arg(long, default_value_t = worklog_core::DEFAULT_WINDOW_DAYS)]
        days: u16,

        /// Last day of the window (yyyy-MM-dd); defaults to today (UTC).
        #[arg(long)]
        end: Option<String>,

        /// Free-text filter applied to the merged result set.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Fetch a single work entry by id.
    Show { id: u64 },

    /// Create a work entry and patch the cached day list.
    Create {
        /// Entry date (yyyy-MM-dd).
        #[arg(long)]
        date: String,

        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        site: Option<String>,

        #[arg(long)]
        action: Option<String>,

        #[arg(long)]
        ticket: Option<String>,

        /// Start time (HH:MM).
        #[arg(long)]
        start: Option<String>,

        /// End time (HH:MM).
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}
