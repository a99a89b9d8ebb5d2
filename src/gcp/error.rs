//! GCP API errors
//!
//! Typed failures produced by the REST layer. Callers propagate these through
//! `anyhow`; [`FailureClass::of`] recovers the class from any error chain.

use reqwest::StatusCode;
use serde_json::Value;

/// A failed GCP REST call
#[derive(Debug, thiserror::Error)]
pub enum GcpError {
    /// The referenced project, zone, bucket or rule does not exist
    #[error("404 Not Found: {0}")]
    NotFound(String),

    /// The caller lacks authorization for the requested resource
    #[error("403 Permission Denied: {0}")]
    PermissionDenied(String),

    /// Malformed request (bad project ID, bad zone, ...)
    #[error("400 Invalid Argument: {0}")]
    InvalidArgument(String),

    /// Any other non-success status (401, 429, 5xx, ...)
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },
}

impl GcpError {
    /// Build an error from an HTTP status and the (possibly empty) response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let envelope: Option<Value> = serde_json::from_str(body).ok();
        let message = envelope
            .as_ref()
            .map(extract_error_message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        let grpc_status = envelope
            .as_ref()
            .and_then(|v| v["error"]["status"].as_str())
            .filter(|s| !s.is_empty());
        let code = status.as_u16();

        if envelope.as_ref().is_some_and(is_quota_error) {
            return Self::Api { status: code, message };
        }

        match grpc_status {
            Some("NOT_FOUND") => Self::NotFound(message),
            Some("PERMISSION_DENIED") => Self::PermissionDenied(message),
            Some("INVALID_ARGUMENT") => Self::InvalidArgument(message),
            Some(_) => Self::Api { status: code, message },
            None => match code {
                404 => Self::NotFound(message),
                403 => Self::PermissionDenied(message),
                400 => Self::InvalidArgument(message),
                _ => Self::Api { status: code, message },
            },
        }
    }
}

/// Legacy `errors[].reason` values GCP sends with a 403 for quota or rate limits
const QUOTA_REASONS: &[&str] = &[
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "quotaExceeded",
    "dailyLimitExceeded",
];

/// Whether the envelope reports quota or rate-limit exhaustion
fn is_quota_error(body: &Value) -> bool {
    let err = &body["error"];
    if err["status"].as_str() == Some("RESOURCE_EXHAUSTED") {
        return true;
    }
    err["errors"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|e| e["reason"].as_str())
        .any(|reason| QUOTA_REASONS.contains(&reason))
}

/// Pull a readable message out of a GCP error envelope:
/// `{"error": {"code": 403, "status": "PERMISSION_DENIED", "message": "..."}}`
fn extract_error_message(body: &Value) -> String {
    let err = &body["error"];
    let message = err["message"].as_str().unwrap_or("unknown error");
    match err["status"].as_str() {
        Some(status) => format!("{}: {}", status, message),
        None => message.to_string(),
    }
}

/// The two failure kinds an agent can treat as "nothing to report"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    NotFound,
    PermissionDenied,
}

impl FailureClass {
    /// Classify an error by searching its cause chain for a [`GcpError`].
    /// Returns `None` for every unclassified failure.
    pub fn of(error: &anyhow::Error) -> Option<Self> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<GcpError>())
            .and_then(|gcp| match gcp {
                GcpError::NotFound(_) => Some(Self::NotFound),
                GcpError::PermissionDenied(_) => Some(Self::PermissionDenied),
                _ => None,
            })
    }

    /// Event name logged when a failure of this class is swallowed
    pub fn event(&self) -> &'static str {
        match self {
            Self::NotFound => "gcp_resource_not_found",
            Self::PermissionDenied => "gcp_permissions_denied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            GcpError::from_response(StatusCode::NOT_FOUND, ""),
            GcpError::NotFound(_)
        ));
        assert!(matches!(
            GcpError::from_response(StatusCode::FORBIDDEN, ""),
            GcpError::PermissionDenied(_)
        ));
        assert!(matches!(
            GcpError::from_response(StatusCode::BAD_REQUEST, ""),
            GcpError::InvalidArgument(_)
        ));
        assert!(matches!(
            GcpError::from_response(StatusCode::TOO_MANY_REQUESTS, ""),
            GcpError::Api { status: 429, .. }
        ));
    }

    #[test]
    fn test_envelope_message_is_kept() {
        let body = r#"{"error":{"code":403,"status":"PERMISSION_DENIED","message":"compute.firewalls.list denied"}}"#;
        let err = GcpError::from_response(StatusCode::FORBIDDEN, body);
        assert_eq!(
            err.to_string(),
            "403 Permission Denied: PERMISSION_DENIED: compute.firewalls.list denied"
        );
    }

    #[test]
    fn test_grpc_status_wins_over_generic_code() {
        // Storage sometimes answers 400 with a NOT_FOUND envelope status
        let body = r#"{"error":{"code":400,"status":"NOT_FOUND","message":"no such bucket"}}"#;
        assert!(matches!(
            GcpError::from_response(StatusCode::BAD_REQUEST, body),
            GcpError::NotFound(_)
        ));
    }

    #[test]
    fn test_resource_exhausted_403_is_not_permission_denied() {
        let body = r#"{"error":{"code":403,"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded for quota metric 'Read requests'"}}"#;
        let err = GcpError::from_response(StatusCode::FORBIDDEN, body);
        assert!(matches!(err, GcpError::Api { status: 403, .. }));
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_legacy_rate_limit_reason_403_is_not_permission_denied() {
        for reason in ["rateLimitExceeded", "quotaExceeded", "dailyLimitExceeded"] {
            let body = format!(
                r#"{{"error":{{"code":403,"message":"Rate Limit Exceeded","errors":[{{"domain":"usageLimits","reason":"{}","message":"Rate Limit Exceeded"}}]}}}}"#,
                reason
            );
            let err = GcpError::from_response(StatusCode::FORBIDDEN, &body);
            assert!(matches!(err, GcpError::Api { status: 403, .. }), "{}", reason);
            assert_eq!(FailureClass::of(&anyhow::Error::new(err)), None);
        }
    }

    #[test]
    fn test_legacy_forbidden_reason_stays_permission_denied() {
        let body = r#"{"error":{"code":403,"message":"Forbidden","errors":[{"domain":"global","reason":"forbidden","message":"Forbidden"}]}}"#;
        assert!(matches!(
            GcpError::from_response(StatusCode::FORBIDDEN, body),
            GcpError::PermissionDenied(_)
        ));
    }

    #[test]
    fn test_unknown_envelope_status_is_unclassified() {
        let body = r#"{"error":{"code":403,"status":"FAILED_PRECONDITION","message":"billing disabled"}}"#;
        assert!(matches!(
            GcpError::from_response(StatusCode::FORBIDDEN, body),
            GcpError::Api { status: 403, .. }
        ));
    }

    #[test]
    fn test_classification_through_context() {
        let err: anyhow::Error = Err::<(), _>(GcpError::NotFound("zone".into()))
            .context("Failed to list instances")
            .unwrap_err();
        assert_eq!(FailureClass::of(&err), Some(FailureClass::NotFound));

        let err = anyhow::Error::new(GcpError::InvalidArgument("bad".into()));
        assert_eq!(FailureClass::of(&err), None);

        let err = anyhow::anyhow!("connection reset");
        assert_eq!(FailureClass::of(&err), None);
    }
}
