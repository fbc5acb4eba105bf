//! Inbound request translation: OpenAI chat completions -> TalkAI chat send.

use talkai_types::GatewayError;

use super::models::{
    ChatCompletionRequest, ChatSettings, HistorySender, MessageHistoryEntry, TalkAiChatRequest,
};

/// Translate an OpenAI-style request into the TalkAI payload.
///
/// Roles map as user -> `you`, assistant -> `assistant`. System messages are
/// collected separately (last one wins) and folded into the final user turn
/// as a `"{system}\n\n{content}"` prefix. When the conversation ends on an
/// assistant turn there is no user turn to fold into and the system prompt
/// is not sent.
pub fn translate_request(request: &ChatCompletionRequest) -> Result<TalkAiChatRequest, GatewayError> {
    if request.messages.is_empty() {
        return Err(GatewayError::InvalidRequest { message: "Messages required".to_string() });
    }

    let mut history: Vec<MessageHistoryEntry> = Vec::with_capacity(request.messages.len());
    let mut system_prompt = String::new();

    for message in &request.messages {
        let text = message.content.effective_text();
        match message.role.as_str() {
            "system" => system_prompt = text,
            "user" => history.push(MessageHistoryEntry::new(HistorySender::You, text)),
            "assistant" => history.push(MessageHistoryEntry::new(HistorySender::Assistant, text)),
            other => {
                tracing::debug!("Skipping message with unmapped role '{}'", other);
            }
        }
    }

    if !system_prompt.is_empty() {
        if let Some(last) = history.last_mut() {
            if last.sender == HistorySender::You {
                last.content = format!("{}\n\n{}", system_prompt, last.content);
            }
        }
    }

    Ok(TalkAiChatRequest::new(
        history,
        ChatSettings { model: request.model.clone(), temperature: request.temperature },
    ))
}
