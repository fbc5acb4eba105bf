//! Outbound TalkAI client.
//!
//! One client instance is built at startup and shared by all requests. It
//! owns the only outbound connection pool, attaches the browser-like headers
//! TalkAI expects, and classifies every transport failure into a
//! [`GatewayError`] so the rest of the gateway never touches reqwest errors.

use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, TryStreamExt};
use reqwest::header;
use reqwest::Client;
use talkai_types::{GatewayError, UpstreamConfig, DEFAULT_UPSTREAM_URL};
use tracing::{debug, error, info, warn};

use crate::mappers::models::TalkAiChatRequest;
use crate::sse;

/// TalkAI rejects requests without a browser-like User-Agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const ACCEPT_VALUE: &str = "application/json, text/event-stream";

/// Line stream of one upstream chat response, errors already classified.
pub type UpstreamLineStream = Pin<Box<dyn Stream<Item = Result<String, GatewayError>> + Send>>;

/// Resolve the chat endpoint URL: explicit value, else `TALKAI_UPSTREAM_URL`,
/// else the built-in default. Invalid overrides fall back with a warning.
pub fn resolve_base_url(explicit: Option<String>) -> String {
    resolve_from(explicit, std::env::var("TALKAI_UPSTREAM_URL").ok())
}

fn resolve_from(explicit: Option<String>, env_value: Option<String>) -> String {
    if let Some(url) = explicit {
        return url;
    }
    if let Some(raw) = env_value {
        let url = raw.trim().to_string();
        if url.is_empty() {
            warn!("TALKAI_UPSTREAM_URL is empty, using default");
            return DEFAULT_UPSTREAM_URL.to_string();
        }
        if url::Url::parse(&url).is_err() {
            warn!("TALKAI_UPSTREAM_URL is not a valid URL, using default");
            return DEFAULT_UPSTREAM_URL.to_string();
        }
        info!("Using custom upstream URL");
        return url;
    }
    DEFAULT_UPSTREAM_URL.to_string()
}

/// Map a reqwest failure onto the gateway error taxonomy.
fn classify_request_error(error: &reqwest::Error) -> GatewayError {
    if error.is_connect() {
        if error.is_timeout() {
            GatewayError::ConnectTimeout
        } else {
            GatewayError::ConnectFailed
        }
    } else if error.is_timeout() {
        GatewayError::ReadTimeout
    } else {
        GatewayError::Transport { message: error.to_string() }
    }
}

fn build_headers(outbound_key: Option<&str>) -> Result<header::HeaderMap, GatewayError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

    if let Some(key) = outbound_key {
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|e| {
                GatewayError::Internal { message: format!("Invalid outbound key: {}", e) }
            })?,
        );
    }

    Ok(headers)
}

/// HTTP client for the TalkAI chat endpoint.
pub struct TalkAiClient {
    http_client: Client,
    base_url: String,
}

impl TalkAiClient {
    /// Build the shared client from upstream configuration.
    ///
    /// A single overall timeout bounds connect and read together; connect
    /// failures are additionally bounded so they classify separately from
    /// read timeouts.
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let headers = build_headers(config.outbound_key.as_deref())?;

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http_client, base_url: config.base_url.clone() })
    }

    /// Send one chat payload and return the response as a line stream.
    ///
    /// A non-success upstream status is classified before any body is read;
    /// transport failures during the body read surface as classified errors
    /// inside the returned stream.
    pub async fn send_chat(
        &self,
        payload: &TalkAiChatRequest,
    ) -> Result<UpstreamLineStream, GatewayError> {
        debug!("Sending chat request to {}", self.base_url);

        let response = self
            .http_client
            .post(&self.base_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let classified = classify_request_error(&e);
                error!("TalkAI request failed: {}", classified);
                classified
            })?;

        let status = response.status();
        if !status.is_success() {
            let classified = GatewayError::from_upstream_status(status.as_u16());
            error!("TalkAI API error: {} - {}", status.as_u16(), classified);
            return Err(classified);
        }

        let lines = sse::lines(response.bytes_stream())
            .map_err(|e| classify_request_error(&e));
        Ok(Box::pin(lines))
    }
}
