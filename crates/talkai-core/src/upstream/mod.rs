// Upstream module - outbound TalkAI HTTP client

mod client;

pub use client::{resolve_base_url, TalkAiClient, UpstreamLineStream};
