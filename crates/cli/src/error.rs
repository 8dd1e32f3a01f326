//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map configuration, setup and client errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - A configuration problem always maps to 5, whatever its source crate.

use estack_client::setup::VersionParseError;
use estack_client::{ClientError, ConfigurationError, SetupError};
use estack_config::ConfigError;

/// Structured exit codes for `estack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Invalid credentials (HTTP 401).
    AuthenticationFailed = 2,

    /// Network, timeout, TLS or DNS failure. Scripts may retry.
    ConnectionError = 3,

    /// Resource not found (HTTP 404 outside an existence probe).
    NotFound = 4,

    /// Invalid configuration or a mode the cluster cannot host. Nothing was sent.
    ConfigurationError = 5,

    /// Insufficient privileges (HTTP 403).
    PermissionDenied = 6,

    /// HTTP 429 after retries were exhausted.
    RateLimited = 7,

    /// HTTP 502/503/504 after retries were exhausted.
    ServiceUnavailable = 8,

    /// The cluster rejected a document (HTTP 400).
    Rejected = 9,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::ConnectionRefused(_) | ClientError::InvalidUrl(_) => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(_) => ExitCode::GeneralError,
            ClientError::ApiError { status, .. } => match status {
                400 => ExitCode::Rejected,
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                429 => ExitCode::RateLimited,
                502..=504 => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },
            ClientError::InvalidResponse(_) => ExitCode::GeneralError,
            ClientError::MaxRetriesExceeded(_, inner) => Self::from(inner.as_ref()),
        }
    }
}

impl From<&SetupError> for ExitCode {
    fn from(err: &SetupError) -> Self {
        if err.is_configuration_error() {
            return ExitCode::ConfigurationError;
        }
        err.client_error()
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns [`ExitCode::GeneralError`] when no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(setup_err) = cause.downcast_ref::<SetupError>() {
                return ExitCode::from(setup_err);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigurationError>().is_some()
                || cause.downcast_ref::<ConfigError>().is_some()
                || cause.downcast_ref::<VersionParseError>().is_some()
            {
                return ExitCode::ConfigurationError;
            }
        }

        ExitCode::GeneralError
    }
}
