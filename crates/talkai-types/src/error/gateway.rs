//! Gateway-related errors.
//!
//! Every failure the gateway can surface to a client maps to exactly one
//! variant here, and every variant carries a fixed HTTP status. Upstream
//! transport failures are classified by the upstream client; request
//! validation failures are produced by the translator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while serving a gateway request.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum GatewayError {
    /// Request validation failed before contacting the upstream
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Client credential missing or not in the configured key set
    #[error("Invalid API key")]
    Unauthorized,

    /// TalkAI answered with a non-success HTTP status
    #[error("{message}")]
    UpstreamStatus { status: u16, message: String },

    /// Connection to TalkAI could not be established in time
    #[error("Connection timeout to TalkAI API - network issue or service unavailable")]
    ConnectTimeout,

    /// TalkAI accepted the connection but the response took too long
    #[error("Read timeout from TalkAI API - request took too long")]
    ReadTimeout,

    /// TCP/TLS connection to TalkAI failed outright
    #[error("Failed to connect to TalkAI API - network connectivity issue")]
    ConnectFailed,

    /// Any other transport-level failure talking to TalkAI
    #[error("Network request error: {message}")]
    Transport { message: String },

    /// Unexpected internal failure; the message stays in the logs
    #[error("Internal gateway error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    /// Classify a non-success upstream HTTP status into a gateway error.
    ///
    /// The outward status mirrors the upstream status; the message is a
    /// fixed human-readable description selected by status class.
    pub fn from_upstream_status(status: u16) -> Self {
        let message = match status {
            401 => "TalkAI API authentication failed - API key may be invalid or expired",
            403 => "TalkAI API access forbidden - API key may lack permissions",
            429 => "TalkAI API rate limit exceeded - please try again later",
            500..=599 => "TalkAI API server error - downstream service may be temporarily unavailable",
            _ => return Self::UpstreamStatus { status, message: format!("TalkAI API error (HTTP {status})") },
        };
        Self::UpstreamStatus { status, message: message.to_string() }
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::Unauthorized => 401,
            Self::UpstreamStatus { status, .. } => *status,
            Self::ConnectTimeout | Self::ReadTimeout => 504,
            Self::ConnectFailed | Self::Transport { .. } => 502,
            Self::Internal { .. } => 500,
        }
    }
}
