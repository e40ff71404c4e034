#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod dry_run;
pub mod error;
pub mod event;
pub mod notifier;
pub mod odoo_client;
pub mod telemetry;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
