//! # TalkAI Core
//!
//! Core gateway logic for TalkAI Bridge: an OpenAI-compatible facade over the
//! TalkAI conversational backend.
//!
//! ```text
//! talkai-core/src/
//! ├── mappers/          # Request translation + response adaptation
//! │   ├── models.rs     # OpenAI + TalkAI wire types
//! │   ├── request.rs    # ChatCompletionRequest -> TalkAI payload
//! │   ├── streaming.rs  # Upstream lines -> OpenAI SSE chunks
//! │   └── collector.rs  # Upstream lines -> aggregated completion
//! ├── sse.rs            # Byte stream -> line stream framing
//! ├── upstream/         # Outbound TalkAI HTTP client
//! ├── middleware/       # Bearer auth gate
//! ├── handlers/         # Axum endpoint handlers
//! ├── catalog.rs        # models.json -> /v1/models catalog
//! ├── keys.rs           # Inbound/outbound credential loading
//! └── server.rs         # Router assembly + Axum server
//! ```
//!
//! A request flows facade -> translator -> upstream client -> adapter
//! (streaming or collecting) -> facade. All shared state is immutable after
//! startup and handed to handlers through [`server::AppState`].

// Test-only lints: allow panic!, unwrap, etc. in test code
#![cfg_attr(
    test,
    allow(clippy::panic, clippy::unwrap_used, clippy::print_stdout, clippy::float_cmp)
)]

pub mod catalog;
pub mod handlers;
pub mod keys;
pub mod mappers;
pub mod middleware;
pub mod server;
pub mod sse;
pub mod upstream;

// Re-export commonly used types
pub use catalog::ModelCatalog;
pub use server::{build_router, AppState, GatewayServer};
pub use upstream::TalkAiClient;
