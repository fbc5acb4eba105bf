//! Gateway runtime configuration.
//!
//! The whole configuration is assembled once at startup (CLI flags, env vars,
//! key files) and then shared immutably behind an `Arc`. Nothing mutates it
//! at runtime, so handlers never need locks to read it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Default TalkAI chat endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://claude.talkai.info/chat/send/";

/// Inbound authentication configuration.
///
/// An empty key set means open mode: every request is accepted without
/// credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Accepted client bearer credentials
    #[serde(default)]
    pub inbound_keys: HashSet<String>,
}

impl AuthConfig {
    /// Build from an explicit key set.
    pub fn new(inbound_keys: HashSet<String>) -> Self {
        Self { inbound_keys }
    }

    /// True when no keys are configured and every request is accepted.
    pub fn open_mode(&self) -> bool {
        self.inbound_keys.is_empty()
    }
}

/// Connection settings for the TalkAI upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Full URL of the TalkAI chat send endpoint
    pub base_url: String,
    /// Bearer credential attached to upstream requests, if any
    #[serde(default)]
    pub outbound_key: Option<String>,
    /// Overall request timeout (connect + read) in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            outbound_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Full gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Interface to bind the HTTP listener to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Inbound client authentication
    #[serde(default)]
    pub auth: AuthConfig,
    /// TalkAI upstream connection settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Listen address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
