//! # TalkAI Types
//!
//! Shared types and error definitions for TalkAI Bridge.
//!
//! ```text
//! talkai-types/src/
//! ├── error/       # GatewayError, ConfigError, unified TypedError
//! └── models/      # Gateway configuration and model catalog entries
//! ```
//!
//! Everything here is plain data: no I/O, no HTTP, no runtime dependencies.
//! The `talkai-core` crate builds the gateway behavior on top of these types.

pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::{ConfigError, GatewayError, Result, TypedError};
pub use models::{AuthConfig, GatewayConfig, ModelInfo, ModelList, UpstreamConfig, DEFAULT_UPSTREAM_URL};
