//! Message conversion for the OpenAI API.

use lucid_protocols::provider::CompletionRequest;
use lucid_protocols::types::{Message, MessageRole};

use crate::api::ApiMessage;

/// Convert a request's system prompt and messages to OpenAI format.
///
/// The system prompt, when present, becomes the leading `system` message.
pub fn convert_messages(request: &CompletionRequest) -> Vec<ApiMessage> {
    let system = request.system.as_ref().map(|text| ApiMessage {
        role: "system".to_string(),
        content: text.clone(),
    });
    system
        .into_iter()
        .chain(request.messages.iter().map(convert_message))
        .collect()
}

fn convert_message(msg: &Message) -> ApiMessage {
    let role = match msg.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };
    ApiMessage {
        role: role.to_string(),
        content: msg.content.clone(),
    }
}
