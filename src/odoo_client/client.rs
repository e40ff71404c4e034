use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::config::OdooSettings;
use crate::error::{ConfigError, Error, OdooError};

use super::rpc::{RpcEnvelope, RpcRequest, body_preview};

const CORRELATION_HEADER: &str = "x-correlation-id";
const JSONRPC_PATH: &str = "jsonrpc";

/// JSON-RPC client for the Odoo external API.
///
/// Every call is a single `execute_kw` request authenticated with the
/// database, user id and API key; nothing is retried.
#[derive(Clone)]
pub struct OdooClient {
    http: reqwest::Client,
    endpoint: Url,
    database: String,
    uid: i64,
    api_key: SecretString,
    next_id: Arc<AtomicU64>,
}

impl OdooClient {
    /// Build an `OdooClient` for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL uses HTTP while neither `insecure_http`
    /// nor `odoo.allow_http` is set, if the endpoint URL cannot be derived,
    /// or if the HTTP client fails to build.
    pub fn new(settings: &OdooSettings, insecure_http: bool) -> Result<Self> {
        let allow_http = insecure_http || settings.allow_http;
        if settings.base_url.scheme() != "https" && !allow_http {
            return Err(Error::Config(ConfigError::InvalidField {
                field: "odoo.url",
                message: "only https URLs are accepted unless odoo.allow_http is set"
                    .to_string(),
            }));
        }
        let endpoint = jsonrpc_endpoint(&settings.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("notify-odoo/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if !allow_http {
            builder = builder.https_only(true);
        }

        let http = builder
            .build()
            .map_err(|err| OdooError::Client { source: err })?;

        Ok(Self {
            http,
            endpoint,
            database: settings.database.clone(),
            uid: settings.uid,
            api_key: settings.api_key.clone(),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub(super) async fn execute_kw<T>(&self, model: &str, method: &str, args: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let correlation_id = Uuid::now_v7().to_string();
        let started = Instant::now();
        let payload = RpcRequest::execute_kw(
            id,
            &self.database,
            self.uid,
            self.api_key.expose_secret(),
            model,
            method,
            args,
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CORRELATION_HEADER, &correlation_id)
            .json(&payload)
            .send()
            .await
            .map_err(OdooError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OdooError::HttpStatus { status }.into());
        }

        let body = response.bytes().await.map_err(OdooError::from)?;
        let envelope: RpcEnvelope<T> =
            serde_json::from_slice(&body).map_err(|err| OdooError::Json {
                message: format!(
                    "error decoding response body: {err}; body preview: {}",
                    body_preview(&body)
                ),
            })?;

        if let Some(err) = envelope.error {
            return Err(OdooError::Api {
                code: err.code,
                message: err.describe(),
            }
            .into());
        }

        let result = envelope
            .result
            .ok_or(OdooError::MissingField { field: "result" })?;
        debug!(
            model,
            method,
            %correlation_id,
            latency_ms = started.elapsed().as_millis(),
            "odoo call succeeded"
        );
        Ok(result)
    }
}

fn jsonrpc_endpoint(base: &Url) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(JSONRPC_PATH).map_err(|err| {
        Error::Config(ConfigError::InvalidField {
            field: "odoo.url",
            message: err.to_string(),
        })
    })
}
