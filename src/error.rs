use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Odoo(#[from] OdooError),
    #[error(transparent)]
    Event(#[from] EventError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum OdooError {
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: reqwest::StatusCode },
    #[error("invalid JSON payload: {message}")]
    Json { message: String },
    #[error("Odoo API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("missing field in API response: {field}")]
    MissingField { field: &'static str },
}

/// Problems with the notification variables handed over by the monitoring core.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("environment variable {name} is not set")]
    MissingVariable { name: &'static str },
    #[error("unknown event kind {0:?}, expected HOST or SERVICE")]
    UnknownKind(String),
    #[error("invalid problem id in {field}: {value:?}")]
    InvalidProblemId {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

impl From<reqwest::Error> for OdooError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_status() {
            if let Some(status) = source.status() {
                return Self::HttpStatus { status };
            }
        }
        Self::Request { source }
    }
}
