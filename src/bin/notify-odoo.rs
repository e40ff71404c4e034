#[path = "notify-odoo/app.rs"]
mod app;
#[path = "notify-odoo/cli.rs"]
mod cli;

use std::error::Error as StdError;
use std::process::ExitCode;

use notify_odoo::telemetry::init_tracing;
use tracing::error;

/// Always exits successfully: failures end up in the log, never in the
/// monitoring core's notification status.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse_args();
    let logging = match init_tracing(
        cli.log_filter.as_deref(),
        cli.json_logs,
        Some(cli.log_file.as_path()),
    ) {
        Ok(()) => true,
        Err(err) => {
            report_error(&err);
            false
        }
    };

    finish(app::run(&cli).await, logging)
}

fn finish<T>(result: notify_odoo::Result<T>, logging: bool) -> ExitCode {
    if let Err(err) = result {
        if logging {
            error!(error = %err, causes = %causes(&err), "notification failed");
        } else {
            report_error(&err);
        }
    }
    ExitCode::SUCCESS
}

fn causes(err: &notify_odoo::error::Error) -> String {
    let mut chain = Vec::new();
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain.join(": ")
}

fn report_error(err: &notify_odoo::error::Error) {
    eprintln!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
