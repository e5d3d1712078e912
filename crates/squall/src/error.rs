//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use squall_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(
        code(squall::not_signed_in),
        help("Sign in with: squall login <username>")
    )]
    NotSignedIn,

    #[error("Session expired: {reason}")]
    #[diagnostic(
        code(squall::session_expired),
        help("The stored token was rejected and has been discarded.\n\
             Sign in again with: squall login <username>")
    )]
    SessionExpired { reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(squall::auth_failed),
        help("Check the username and password and try again.")
    )]
    AuthFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(squall::validation))]
    Validation { field: String, reason: String },

    // ── Concurrency ──────────────────────────────────────────────────
    #[error("Another action on '{id}' is still in progress")]
    #[diagnostic(code(squall::busy))]
    Busy { id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(squall::api_error))]
    ApiError { message: String, status: Option<u16> },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(squall::config),
        help("Check the config file or the SQUALL_* environment overrides.")
    )]
    Config { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotSignedIn | Self::SessionExpired { .. } | Self::AuthFailed { .. } => {
                exit_code::AUTH
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::Busy { .. } => exit_code::CONFLICT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SessionExpired { reason } => CliError::SessionExpired { reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::NotAuthenticated => CliError::NotSignedIn,

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Busy { id } => CliError::Busy { id },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<squall_config::ConfigError> for CliError {
    fn from(err: squall_config::ConfigError) -> Self {
        CliError::Config {
            message: err.to_string(),
        }
    }
}

impl From<squall_api::Error> for CliError {
    fn from(err: squall_api::Error) -> Self {
        CliError::from(CoreError::from(err))
    }
}
