//! # Error Types
//!
//! This module defines error types used throughout the gafete library.

use thiserror::Error;

/// Failures reported by the print bridge.
///
/// Both `Unavailable` and `ConnectionFailed` need the operator to act (start
/// the local print service or grant it permission), so nothing retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No bridge is configured for this process.
    #[error("Print bridge is not available. Check that the local print service is installed and running")]
    Unavailable,

    /// The handshake with the local print service did not complete.
    #[error("Could not connect to the local print service: {0}")]
    ConnectionFailed(String),

    /// The bridge answered but refused the request.
    #[error("Print bridge rejected the request: {0}")]
    Rejected(String),
}

/// Main error type for gafete operations
#[derive(Debug, Error)]
pub enum GafeteError {
    /// Missing or malformed input, nothing was changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote call failed; the message is passed through unchanged
    #[error("{0}")]
    Transport(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Attendee was checked in before this request
    #[error("Attendee is already checked in (ticket #{ticket_no})")]
    AlreadyCheckedIn { ticket_no: u32 },

    /// Print bridge error
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Check-in was recorded but the badge did not print
    #[error("Checked in with ticket #{ticket_no}, but the label did not print: {source}")]
    PrintFailed {
        ticket_no: u32,
        #[source]
        source: BridgeError,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GafeteError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
