//! Core domain models for TalkAI Bridge.
//!
//! This module contains the shared data structures used across the gateway:
//! runtime configuration and the model catalog entries exposed on the
//! OpenAI-compatible surface.

mod catalog;
mod config;

// Re-export all models
pub use catalog::{ModelInfo, ModelList};
pub use config::{AuthConfig, GatewayConfig, UpstreamConfig, DEFAULT_UPSTREAM_URL};
