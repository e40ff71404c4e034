use serde::{Deserialize, Serialize};
use serde_json::Value;

const BODY_PREVIEW_LIMIT: usize = 256;

#[derive(Debug, Deserialize)]
pub(super) struct RpcEnvelope<T> {
    pub(crate) result: Option<T>,
    pub(crate) error: Option<RpcError>,
    #[allow(dead_code)]
    #[serde(default)]
    pub(crate) id: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct RpcError {
    pub(crate) code: i64,
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) data: Option<RpcErrorData>,
}

/// Server-side exception details Odoo attaches to a failed call.
#[derive(Debug, Deserialize)]
pub(super) struct RpcErrorData {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl RpcError {
    pub(super) fn describe(self) -> String {
        let mut message = self.message;
        if let Some(data) = self.data {
            match (data.name, data.message) {
                (Some(name), Some(detail)) => message = format!("{message} - {name}: {detail}"),
                (None, Some(detail)) => message = format!("{message} - {detail}"),
                (Some(name), None) => message = format!("{message} - {name}"),
                (None, None) => {}
            }
        }
        message
    }
}

/// `execute_kw` call on the `object` service, the generic ORM entry point.
#[derive(Serialize)]
pub(super) struct RpcRequest<'a> {
    pub(crate) id: u64,
    pub(crate) jsonrpc: &'static str,
    pub(crate) method: &'static str,
    pub(crate) params: CallParams<'a>,
}

#[derive(Serialize)]
pub(super) struct CallParams<'a> {
    /// `[database, uid, api_key, model, method, args]`
    pub(crate) args: (&'a str, i64, &'a str, &'a str, &'a str, Value),
    pub(crate) method: &'static str,
    pub(crate) service: &'static str,
}

impl<'a> RpcRequest<'a> {
    pub(super) fn execute_kw(
        id: u64,
        database: &'a str,
        uid: i64,
        api_key: &'a str,
        model: &'a str,
        method: &'a str,
        args: Value,
    ) -> Self {
        Self {
            id,
            jsonrpc: "2.0",
            method: "call",
            params: CallParams {
                args: (database, uid, api_key, model, method, args),
                method: "execute_kw",
                service: "object",
            },
        }
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    let end = body.len().min(BODY_PREVIEW_LIMIT);
    let mut preview = String::from_utf8_lossy(&body[..end]).to_string();
    if body.len() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }
    preview.replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::{RpcEnvelope, body_preview};

    #[test]
    fn api_error_includes_exception_details() {
        let raw = r#"{
            "jsonrpc": "2.0",
            "id": 3,
            "error": {
                "code": 200,
                "message": "Odoo Server Error",
                "data": {
                    "name": "odoo.exceptions.AccessDenied",
                    "message": "Access Denied",
                    "debug": "Traceback ..."
                }
            }
        }"#;
        let envelope: RpcEnvelope<i64> = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse envelope: {err}"),
        };
        assert!(envelope.result.is_none());
        let Some(error) = envelope.error else {
            panic!("error member missing");
        };
        assert_eq!(error.code, 200);
        assert_eq!(
            error.describe(),
            "Odoo Server Error - odoo.exceptions.AccessDenied: Access Denied"
        );
    }

    #[test]
    fn body_preview_truncates_and_escapes() {
        assert_eq!(body_preview(b""), "<empty>");
        assert_eq!(body_preview(b"line1\nline2"), "line1\\nline2");
        let long = vec![b'a'; 300];
        let preview = body_preview(&long);
        assert_eq!(preview.len(), 256 + 3);
        assert!(preview.ends_with("..."));
    }
}
