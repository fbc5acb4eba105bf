// Mappers module - OpenAI <-> TalkAI protocol converters

pub mod collector;
pub mod models;
pub mod request;
pub mod streaming;

pub use collector::collect_chat_response;
pub use models::*;
pub use request::translate_request;
pub use streaming::create_sse_stream;

/// Prefix of a payload-bearing TalkAI SSE line.
const EVENT_PREFIX: &str = "data:";

/// Token value TalkAI interleaves as a keep-alive; never forwarded.
const SKIP_SENTINEL: &str = "-1";

/// Extract the raw token from one upstream SSE line.
///
/// Returns `None` for non-event lines, blank payloads and the keep-alive
/// sentinel. The returned token is still escape-encoded.
fn event_token(line: &str) -> Option<&str> {
    let token = line.strip_prefix(EVENT_PREFIX)?.trim();
    if token.is_empty() || token == SKIP_SENTINEL {
        return None;
    }
    Some(token)
}

/// Decode TalkAI's two-character `\n` escape into real newlines.
fn decode_newlines(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_token_filters_noise() {
        assert_eq!(event_token("data: hello"), Some("hello"));
        assert_eq!(event_token("data:hello"), Some("hello"));
        assert_eq!(event_token("data:   spaced   "), Some("spaced"));
        assert_eq!(event_token("data: -1"), None);
        assert_eq!(event_token("data:"), None);
        assert_eq!(event_token("data:   "), None);
        assert_eq!(event_token("event: ping"), None);
        assert_eq!(event_token(""), None);
    }

    #[test]
    fn test_decode_newlines() {
        assert_eq!(decode_newlines("a\\nb"), "a\nb");
        assert_eq!(decode_newlines("no escapes"), "no escapes");
        assert_eq!(decode_newlines("\\n\\n"), "\n\n");
    }
}
