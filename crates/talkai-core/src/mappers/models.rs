//! Wire types for the OpenAI-compatible facade and the TalkAI upstream payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// OpenAI chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ChatCompletionRequest {
    /// Model identifier forwarded to TalkAI as-is.
    pub model: String,
    /// Conversation messages.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Enable streaming response.
    #[serde(default)]
    pub stream: bool,
    /// Sampling temperature forwarded to TalkAI.
    #[serde(default = "default_temperature")]
    pub temperature: Option<f64>,
}

fn default_temperature() -> Option<f64> {
    Some(0.7)
}

/// A single message in the inbound conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Message role: "system", "user" or "assistant".
    pub role: String,
    /// Message content (string or array of typed parts).
    pub content: MessageContent,
}

/// Content of a chat message (string or array of typed parts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Array of typed content parts.
    Parts(Vec<ContentPart>),
}

/// A typed content part. Only text parts contribute to the effective text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentPart {
    /// Text part.
    #[serde(rename = "text")]
    Text {
        /// Text payload; missing field reads as empty.
        #[serde(default)]
        text: String,
    },
    /// Any other part kind (images, audio, ...). Carried but never forwarded.
    #[serde(other)]
    Other,
}

impl MessageContent {
    /// Normalize content to the effective text forwarded upstream.
    ///
    /// Text parts are concatenated in order without separators; non-text
    /// parts contribute nothing. Callers never need to know which shape
    /// the client sent.
    pub fn effective_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::Other => None,
                })
                .collect(),
        }
    }
}

/// Sender tag of a TalkAI history entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistorySender {
    /// End-user turn.
    You,
    /// Model turn.
    Assistant,
}

/// One entry of the TalkAI `messagesHistory` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageHistoryEntry {
    /// Fresh UUID, regenerated for every translation.
    pub id: String,
    /// Sender tag; `from` on the wire.
    #[serde(rename = "from")]
    pub sender: HistorySender,
    /// Plain text content of the turn.
    pub content: String,
}

impl MessageHistoryEntry {
    /// Build an entry with a freshly generated id.
    pub fn new(sender: HistorySender, content: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), sender, content }
    }
}

/// Generation settings forwarded to TalkAI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSettings {
    /// Model identifier, passed through unchanged.
    pub model: String,
    /// Sampling temperature; serialized as `null` when absent.
    pub temperature: Option<f64>,
}

/// Full payload for the TalkAI chat send endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct TalkAiChatRequest {
    /// Always `"chat"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Conversation history in TalkAI shape.
    #[serde(rename = "messagesHistory")]
    pub messages_history: Vec<MessageHistoryEntry>,
    /// Generation settings.
    pub settings: ChatSettings,
}

impl TalkAiChatRequest {
    /// Assemble the payload with the fixed `"chat"` tag.
    pub fn new(messages_history: Vec<MessageHistoryEntry>, settings: ChatSettings) -> Self {
        Self { kind: "chat".to_string(), messages_history, settings }
    }
}

/// Generate a completion id in OpenAI's `chatcmpl-` format.
pub fn completion_id() -> String {
    format!("chatcmpl-{}", Uuid::new_v4().simple())
}

/// OpenAI chat completion response (non-streaming).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ChatCompletionResponse {
    /// Completion id (`chatcmpl-` prefix).
    pub id: String,
    /// Always `"chat.completion"`.
    pub object: String,
    /// Unix timestamp of response creation.
    pub created: i64,
    /// Model identifier echoed from the request.
    pub model: String,
    /// Exactly one choice.
    pub choices: Vec<ChatChoice>,
    /// Token usage; TalkAI reports none, so all counts are zero.
    pub usage: Usage,
}

impl ChatCompletionResponse {
    /// Wrap aggregated assistant text in the completion envelope.
    pub fn new(model: &str, content: String) -> Self {
        Self {
            id: completion_id(),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ResponseMessage { role: "assistant".to_string(), content },
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        }
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Choice index, always 0.
    pub index: u32,
    /// The assistant message.
    pub message: ResponseMessage,
    /// Always `"stop"`.
    pub finish_reason: String,
}

/// Assistant message in a non-streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Always `"assistant"`.
    pub role: String,
    /// Aggregated completion text.
    pub content: String,
}

/// Token usage block. TalkAI exposes no counts, so this is always zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt token count.
    pub prompt_tokens: u32,
    /// Completion token count.
    pub completion_tokens: u32,
    /// Total token count.
    pub total_tokens: u32,
}

/// One SSE chunk of a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StreamChunk {
    /// Completion id, shared by every chunk of one response.
    pub id: String,
    /// Always `"chat.completion.chunk"`.
    pub object: String,
    /// Unix timestamp, shared by every chunk of one response.
    pub created: i64,
    /// Model identifier echoed from the request.
    pub model: String,
    /// Exactly one choice.
    pub choices: Vec<StreamChoice>,
}

impl StreamChunk {
    fn new(id: &str, created: i64, model: &str, delta: Delta, finish_reason: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            object: "chat.completion.chunk".to_string(),
            created,
            model: model.to_string(),
            choices: vec![StreamChoice { index: 0, delta, finish_reason }],
        }
    }

    /// Opening chunk carrying only the assistant role.
    pub fn role_opener(id: &str, created: i64, model: &str) -> Self {
        Self::new(id, created, model, Delta { role: Some("assistant".to_string()), content: None }, None)
    }

    /// Incremental content chunk.
    pub fn content_delta(id: &str, created: i64, model: &str, token: String) -> Self {
        Self::new(id, created, model, Delta { role: None, content: Some(token) }, None)
    }

    /// Closing chunk with an empty delta and `finish_reason: "stop"`.
    pub fn finish(id: &str, created: i64, model: &str) -> Self {
        Self::new(id, created, model, Delta::default(), Some("stop".to_string()))
    }
}

/// A single streaming choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChoice {
    /// Choice index, always 0.
    pub index: u32,
    /// Incremental payload.
    pub delta: Delta,
    /// `null` until the closing chunk, then `"stop"`.
    pub finish_reason: Option<String>,
}

/// Incremental delta payload. Serializes to `{}` when both fields are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delta {
    /// Assistant role, present only in the opening chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content token, present only in content chunks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_deserializes_from_string_and_parts() {
        let plain: ChatMessage =
            serde_json::from_value(serde_json::json!({"role": "user", "content": "hi"})).unwrap();
        assert_eq!(plain.content, MessageContent::Text("hi".to_string()));

        let parts: ChatMessage = serde_json::from_value(serde_json::json!({
            "role": "user",
            "content": [
                {"type": "text", "text": "look at "},
                {"type": "image_url", "image_url": {"url": "http://x/1.png"}},
                {"type": "text", "text": "this"}
            ]
        }))
        .unwrap();
        assert_eq!(parts.content.effective_text(), "look at this");
    }

    #[test]
    fn test_effective_text_ignores_non_text_parts() {
        let content = MessageContent::Parts(vec![
            ContentPart::Other,
            ContentPart::Text { text: "only".to_string() },
            ContentPart::Other,
        ]);
        assert_eq!(content.effective_text(), "only");
    }

    #[test]
    fn test_temperature_defaults_when_absent() {
        let request: ChatCompletionRequest = serde_json::from_value(serde_json::json!({
            "model": "claude-3-5-sonnet",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .unwrap();
        assert_eq!(request.temperature, Some(0.7));
        assert!(!request.stream);
    }

    #[test]
    fn test_talkai_payload_wire_shape() {
        let payload = TalkAiChatRequest::new(
            vec![MessageHistoryEntry::new(HistorySender::You, "hello".to_string())],
            ChatSettings { model: "gpt-4o".to_string(), temperature: None },
        );
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["type"], "chat");
        assert_eq!(json["messagesHistory"][0]["from"], "you");
        assert_eq!(json["messagesHistory"][0]["content"], "hello");
        assert!(json["messagesHistory"][0]["id"].is_string());
        assert_eq!(json["settings"]["model"], "gpt-4o");
        assert!(json["settings"]["temperature"].is_null());
    }

    #[test]
    fn test_stream_chunk_shapes() {
        let opener = StreamChunk::role_opener("chatcmpl-abc", 1, "m");
        let json = serde_json::to_value(&opener).unwrap();
        assert_eq!(json["choices"][0]["delta"]["role"], "assistant");
        assert!(json["choices"][0]["delta"].get("content").is_none());
        assert!(json["choices"][0]["finish_reason"].is_null());

        let closing = StreamChunk::finish("chatcmpl-abc", 1, "m");
        let json = serde_json::to_value(&closing).unwrap();
        assert_eq!(json["choices"][0]["delta"], serde_json::json!({}));
        assert_eq!(json["choices"][0]["finish_reason"], "stop");
    }

    #[test]
    fn test_completion_id_format() {
        let id = completion_id();
        assert!(id.starts_with("chatcmpl-"));
        // uuid4 hex without dashes
        assert_eq!(id.len(), "chatcmpl-".len() + 32);
        assert!(!id[9..].contains('-'));
    }
}
