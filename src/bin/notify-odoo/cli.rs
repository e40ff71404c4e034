use std::path::PathBuf;

use clap::{ArgAction, Parser};

const DEFAULT_LOG_FILE: &str = "/tmp/checkmk_odoo_notification.log";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check_MK notification plugin that files Odoo helpdesk tickets",
    long_about = None
)]
pub struct Cli {
    /// TOML configuration file; the Check_MK plugin parameters override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append-only diagnostic log.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Explicit log filter (e.g. "notify_odoo=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Emit JSON log lines (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Allow plain HTTP Odoo URLs (also settable as `odoo.allow_http`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub insecure: bool,

    /// Look tickets up but only log creates and updates.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
