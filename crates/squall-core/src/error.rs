// ── Core error types ──
//
// User-facing errors from squall-core. Consumers never see raw HTTP status
// codes or JSON parse failures directly; the `From<squall_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    /// Bootstrap could not load the account; the session has been cleared.
    #[error("Session expired. {reason}")]
    SessionExpired { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// An authenticated operation was attempted with no session.
    #[error("Not signed in")]
    NotAuthenticated,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// A second action on an entity whose previous action is in flight.
    #[error("Another action on '{id}' is still in progress")]
    Busy { id: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// One-line message for the transient notice channel.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<squall_api::Error> for CoreError {
    fn from(err: squall_api::Error) -> Self {
        if err.is_auth_expired() {
            return CoreError::AuthenticationFailed {
                message: err.user_message(),
            };
        }
        if err.is_validation() {
            return CoreError::ValidationFailed {
                message: err.user_message(),
            };
        }
        match err {
            squall_api::Error::Api { status, .. } => CoreError::Api {
                message: err.user_message(),
                status: Some(status),
            },
            squall_api::Error::Transport(ref e) => CoreError::Api {
                message: err.user_message(),
                status: e.status().map(|s| s.as_u16()),
            },
            squall_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            squall_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_status_translates_to_authentication_failed() {
        let api = squall_api::Error::from_response(401, r#"{"title":"Unauthorized"}"#);
        match CoreError::from(api) {
            CoreError::AuthenticationFailed { message } => assert_eq!(message, "Unauthorized"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn field_errors_translate_to_validation_failed() {
        let api = squall_api::Error::from_response(
            422,
            r#"{"detail":"Invalid input","errors":[{"field":"latitude","message":"out of range"}]}"#,
        );
        match CoreError::from(api) {
            CoreError::ValidationFailed { message } => {
                assert_eq!(message, "Invalid input (latitude: out of range)");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn business_failures_surface_verbatim() {
        let api = squall_api::Error::from_response(409, r#"{"detail":"Duplicate rule"}"#);
        match CoreError::from(api) {
            CoreError::Api { message, status } => {
                assert_eq!(message, "Duplicate rule");
                assert_eq!(status, Some(409));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
