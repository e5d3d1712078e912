use serde::Deserialize;
use thiserror::Error;

/// One field-level validation failure inside a problem body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProblemFieldError {
    pub field: String,
    pub message: String,
}

/// Structured problem body returned by the backend on non-success statuses.
///
/// Loosely RFC-7807 shaped; every field is optional because error paths in
/// the backend are not uniform (proxy errors carry none of them).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProblemDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default, rename = "errorCode")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<ProblemFieldError>>,
}

impl ProblemDetails {
    /// The preferred human message: `detail`, then `title`.
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.title.as_deref())
    }
}

/// Top-level error type for the `squall-api` crate.
///
/// `squall-core` maps these into user-facing diagnostics; callers that need
/// to branch (session expiry vs. validation vs. generic failure) use the
/// classification helpers instead of matching variants directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-success HTTP status with a (possibly absent) problem body.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Parsed problem body, or `None` if the body was not JSON.
        problem: Option<ProblemDetails>,
    },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON deserialization of a success body failed, with the raw body kept.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Build an `Api` error from a status and raw response body.
    ///
    /// The body is parsed as a problem description when possible; a body
    /// that is not JSON is passed through raw as the message rather than
    /// failing the call outright. Message precedence: `detail`, `title`,
    /// then a generic line carrying the status code.
    pub fn from_response(status: u16, raw: &str) -> Self {
        let problem = serde_json::from_str::<ProblemDetails>(raw).ok();
        let message = problem
            .as_ref()
            .and_then(ProblemDetails::message)
            .map(str::to_owned)
            .unwrap_or_else(|| {
                if raw.trim().is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    raw.trim().to_owned()
                }
            });
        Self::Api {
            status,
            message,
            problem,
        }
    }

    /// HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the backend rejected our credentials (401/403).
    ///
    /// The session store treats this during bootstrap as session expiry.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a validation failure with field errors.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Api {
                problem: Some(p), ..
            } => p.errors.as_ref().is_some_and(|e| !e.is_empty()),
            _ => false,
        }
    }

    /// The backend's machine-readable error code, if present.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api {
                problem: Some(p), ..
            } => p.error_code.as_deref(),
            _ => None,
        }
    }

    /// One-line message suitable for a transient user notice.
    ///
    /// Validation failures get the base message plus a parenthesized
    /// `field: message` list for every reported field error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message,
                problem: Some(p),
                ..
            } => match p.errors.as_deref() {
                Some(errors) if !errors.is_empty() => {
                    let fields = errors
                        .iter()
                        .map(|e| format!("{}: {}", e.field, e.message))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{message} ({fields})")
                }
                _ => message.clone(),
            },
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_message_prefers_detail_over_title() {
        let err = Error::from_response(409, r#"{"title":"Conflict","detail":"Duplicate rule"}"#);
        assert_eq!(err.user_message(), "Duplicate rule");

        let err = Error::from_response(409, r#"{"title":"Conflict"}"#);
        assert_eq!(err.user_message(), "Conflict");
    }

    #[test]
    fn empty_body_yields_generic_message() {
        let err = Error::from_response(502, "");
        assert_eq!(err.user_message(), "Request failed with status 502");
    }

    #[test]
    fn non_json_body_passes_through_raw() {
        let err = Error::from_response(500, "upstream exploded");
        assert_eq!(err.user_message(), "upstream exploded");
        match err {
            Error::Api { problem, .. } => assert!(problem.is_none()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_errors_append_field_list() {
        let body = r#"{
            "detail": "Invalid input",
            "errors": [{"field": "latitude", "message": "out of range"}]
        }"#;
        let err = Error::from_response(422, body);
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Invalid input (latitude: out of range)");
    }

    #[test]
    fn auth_statuses_classify_as_expired() {
        assert!(Error::from_response(401, "").is_auth_expired());
        assert!(Error::from_response(403, "").is_auth_expired());
        assert!(!Error::from_response(422, "").is_auth_expired());
    }
}
