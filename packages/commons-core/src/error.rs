//! # Error Handling
//!
//! Error types for the community view core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Configuration Errors                                              │
//! │  │   ├── InvalidConfig         - Bad base URL / timeout                │
//! │  │   └── NoCommunity           - No community has been opened          │
//! │  │                                                                      │
//! │  ├── Decoding Errors                                                   │
//! │  │   └── MalformedEnvelope     - Body is not the expected shape        │
//! │  │                                                                      │
//! │  ├── Transport Errors                                                  │
//! │  │   ├── NetworkFailure        - Connection / read failure             │
//! │  │   ├── HttpStatus            - Non-success HTTP status               │
//! │  │   └── Timeout               - Request exceeded its deadline         │
//! │  │                                                                      │
//! │  └── Selection Errors                                                  │
//! │      ├── UnknownTab            - Tab value outside the known set       │
//! │      └── NoSuchPage            - No cursor in that direction           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding and transport errors never escape a channel: they are caught at
//! the channel boundary and stored in its [`FetchState`](crate::FetchState)
//! as a [`ChannelError`]. `NoSuchPage` is returned to the caller and leaves
//! the channel untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::envelope::PageDirection;

/// Result type alias for commons-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for commons-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Configuration Errors (100-199)
    // ========================================================================

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation needed a community but none has been opened
    #[error("No community selected. Open a community first.")]
    NoCommunity,

    // ========================================================================
    // Decoding Errors (200-299)
    // ========================================================================

    /// Response body does not match the expected pagination shape
    #[error("Malformed response: {0}")]
    MalformedEnvelope(String),

    // ========================================================================
    // Transport Errors (300-399)
    // ========================================================================

    /// Transport-level failure
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Server answered with a non-success status
    #[error("Request to {url} failed with HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Request exceeded the configured deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    // ========================================================================
    // Selection Errors (400-499)
    // ========================================================================

    /// Tab value outside the known set
    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    /// Navigation requested past an available cursor
    #[error("No {0} page available")]
    NoSuchPage(PageDirection),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Numeric error code, grouped by category:
    /// - 100-199: Configuration
    /// - 200-299: Decoding
    /// - 300-399: Transport
    /// - 400-499: Selection / navigation
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_) => 100,
            Error::NoCommunity => 101,

            Error::MalformedEnvelope(_) => 200,

            Error::NetworkFailure(_) => 300,
            Error::HttpStatus { .. } => 301,
            Error::Timeout(_) => 302,

            Error::UnknownTab(_) => 400,
            Error::NoSuchPage(_) => 401,

            Error::Internal(_) => 900,
        }
    }

    /// Check if this error is recoverable by retrying the same request.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::NetworkFailure(_) | Error::Timeout(_) => true,
            Error::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Coarse classification used by channel state and renderers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedEnvelope(_) => ErrorKind::MalformedEnvelope,
            Error::NetworkFailure(_) | Error::HttpStatus { .. } | Error::Timeout(_) => {
                ErrorKind::NetworkFailure
            }
            Error::UnknownTab(_) => ErrorKind::UnknownTab,
            Error::NoSuchPage(_) => ErrorKind::NoSuchPage,
            Error::InvalidConfig(_) | Error::NoCommunity | Error::Internal(_) => ErrorKind::Other,
        }
    }
}

// ============================================================================
// CHANNEL ERROR REPRESENTATION
// ============================================================================

/// Error classification shown to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Body did not match the expected shape
    MalformedEnvelope,
    /// Transport failure, timeout, or non-success status
    NetworkFailure,
    /// Invalid tab value
    UnknownTab,
    /// Navigation past an available cursor
    NoSuchPage,
    /// Anything else
    Other,
}

/// The error a channel holds while in the `error` status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelError {
    /// Classification
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
}

impl From<Error> for ChannelError {
    fn from(err: Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedEnvelope(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let target = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "request".to_string());
        if err.is_timeout() {
            Error::Timeout(target)
        } else if let Some(status) = err.status() {
            Error::HttpStatus {
                status: status.as_u16(),
                url: target,
            }
        } else {
            Error::NetworkFailure(err.to_string())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
