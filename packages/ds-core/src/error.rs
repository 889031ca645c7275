//! Centralized error types for the DS core library.
//!
//! Every decoder and action returns exactly one [`DsError`] variant on
//! failure, so callers can tell "device said no" ([`DsError::NotFound`],
//! [`DsError::Status`]) from "could not understand the reply"
//! ([`DsError::Decode`]), "bad input" ([`DsError::Validation`]) and
//! "could not reach the device" ([`DsError::Transport`]).

use thiserror::Error;

use crate::openhome::soap::SoapError;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;
}

impl ErrorCode for SoapError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http_request_failed",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// Errors produced while invoking a device action or decoding its reply.
#[derive(Debug, Error)]
pub enum DsError {
    /// An expected field is absent from an otherwise well-formed reply.
    #[error("{0}")]
    NotFound(String),

    /// Malformed embedded XML or binary payload.
    ///
    /// `raw` keeps the offending fragment for diagnostics; it is not part of
    /// the display message because metadata documents can be large.
    #[error("Failed to decode {what}: {reason}")]
    Decode {
        /// Which payload was being decoded (e.g. "SourceList").
        what: String,
        /// Parser error description.
        reason: String,
        /// The raw fragment that failed to decode.
        raw: String,
    },

    /// The device answered with an unexpected HTTP status or a SOAP fault.
    #[error("{action}: Failed with status {status}{}", fault_suffix(.fault))]
    Status {
        /// The attempted action (task label for fire-and-check actions).
        action: String,
        /// HTTP status observed.
        status: u16,
        /// SOAP fault description, when the device sent one.
        fault: Option<String>,
    },

    /// Caller-supplied input failed local validation; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The transport could not complete the request.
    #[error(transparent)]
    Transport(#[from] SoapError),
}

fn fault_suffix(fault: &Option<String>) -> String {
    fault
        .as_deref()
        .map(|f| format!(" ({f})"))
        .unwrap_or_default()
}

impl DsError {
    /// Builds a [`DsError::Decode`] from any displayable parser error.
    pub(crate) fn decode(
        what: impl Into<String>,
        reason: impl std::fmt::Display,
        raw: impl Into<String>,
    ) -> Self {
        Self::Decode {
            what: what.into(),
            reason: reason.to_string(),
            raw: raw.into(),
        }
    }

    /// Builds a [`DsError::NotFound`] with the given reason.
    pub(crate) fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound(reason.into())
    }
}

impl ErrorCode for DsError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Decode { .. } => "decode_error",
            Self::Status { .. } => "status_error",
            Self::Validation(_) => "validation_error",
            Self::Transport(_) => "transport_error",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result Type Aliases
// ─────────────────────────────────────────────────────────────────────────────

pub use crate::openhome::soap::SoapResult;

/// Convenient Result alias for device actions and decoders.
pub type DsResult<T> = Result<T, DsError>;
