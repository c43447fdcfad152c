//! Request/response envelope shared by every operator.
//!
//! The request carries raw `text` and optionally values computed by upstream
//! operators under `deps`. The response reports one fact under a fixed key.
//! `cache_hit` is always emitted as `false`; an external cache may rewrite it
//! before the response reaches the caller.

use serde::{Deserialize, Serialize};

use crate::operator::OperatorValue;

/// Values produced by upstream operators.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dependencies {
    /// Output of the normalizer operator.
    #[serde(default)]
    pub normalized: Option<String>,
}

/// Body of `POST /op`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "deps", alias = "dependencies")]
    pub dependencies: Option<Dependencies>,
}

impl OperationRequest {
    /// Effective input: non-empty `deps.normalized`, else `text`, else `""`.
    pub fn operand(&self) -> &str {
        let normalized = self
            .dependencies
            .as_ref()
            .and_then(|deps| deps.normalized.as_deref())
            .filter(|s| !s.is_empty());

        normalized.or(self.text.as_deref()).unwrap_or_default()
    }
}

/// Decode a request body, falling back to the empty request on any failure.
///
/// Garbage bodies, wrong shapes and wrong field types all produce the same
/// result as `{}`, so a malformed upstream never stalls the pipeline.
pub fn decode_request(body: &[u8]) -> OperationRequest {
    match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(
                error = %e,
                bytes = body.len(),
                "Undecodable request body, using empty input"
            );
            OperationRequest::default()
        }
    }
}

/// Body of a `POST /op` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResponse {
    pub key: &'static str,
    pub value: OperatorValue,
    pub cache_hit: bool,
}

impl OperationResponse {
    pub fn new(key: &'static str, value: OperatorValue) -> Self {
        Self {
            key,
            value,
            cache_hit: false,
        }
    }
}

/// Body of `GET /healthz`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
}

impl HealthStatus {
    pub const ALIVE: HealthStatus = HealthStatus { ok: true };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_prefers_normalized() {
        let request = decode_request(br#"{"text":"abc","deps":{"normalized":"xyz"}}"#);
        assert_eq!(request.operand(), "xyz");
    }

    #[test]
    fn test_operand_falls_back_to_text() {
        let request = decode_request(br#"{"text":"abc"}"#);
        assert_eq!(request.operand(), "abc");
    }

    #[test]
    fn test_operand_ignores_empty_normalized() {
        let request = decode_request(br#"{"text":"abc","deps":{"normalized":""}}"#);
        assert_eq!(request.operand(), "abc");
    }

    #[test]
    fn test_operand_empty_request() {
        assert_eq!(decode_request(b"{}").operand(), "");
    }

    #[test]
    fn test_operand_normalized_without_text() {
        let request = decode_request(br#"{"deps":{"normalized":"only"}}"#);
        assert_eq!(request.operand(), "only");
    }

    #[test]
    fn test_dependencies_alias() {
        let request = decode_request(br#"{"text":"abc","dependencies":{"normalized":"xyz"}}"#);
        assert_eq!(request.operand(), "xyz");
    }

    #[test]
    fn test_null_fields_are_absent() {
        let request = decode_request(br#"{"text":null,"deps":null}"#);
        assert_eq!(request, OperationRequest::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request = decode_request(br#"{"text":"abc","trace_id":"t-1"}"#);
        assert_eq!(request.operand(), "abc");
    }

    #[test]
    fn test_garbage_decodes_to_default() {
        assert_eq!(decode_request(b"not json at all"), OperationRequest::default());
        assert_eq!(decode_request(b""), OperationRequest::default());
        assert_eq!(decode_request(b"[1,2,3]"), OperationRequest::default());
        assert_eq!(decode_request(br#"{"text":42}"#), OperationRequest::default());
    }

    #[test]
    fn test_response_shape() {
        let response = OperationResponse::new("char_count", OperatorValue::Count(3));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "char_count", "value": 3, "cache_hit": false})
        );
    }

    #[test]
    fn test_health_shape() {
        let json = serde_json::to_value(HealthStatus::ALIVE).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true}));
    }
}
