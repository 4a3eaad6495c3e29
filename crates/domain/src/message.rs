//! Conversation transcript messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MessageId;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Renderable message body.
///
/// The state machine stays renderer-agnostic: plain text is carried as-is,
/// while richer fragments (uploaded-image echoes, setting choices, the
/// storefront-link card) travel as opaque structured payloads the client
/// knows how to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    Structured { payload: serde_json::Value },
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn structured(payload: serde_json::Value) -> Self {
        Self::Structured { payload }
    }
}

/// A single immutable entry in the append-only conversation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: MessageContent) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, MessageContent::text(text))
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, MessageContent::text(text))
    }

    pub fn system_text(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, MessageContent::text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_serializes_as_tagged_union() {
        let text = MessageContent::text("hello");
        let json = serde_json::to_value(&text).expect("serialize");
        assert_eq!(json["kind"], "text");
        assert_eq!(json["text"], "hello");

        let structured = MessageContent::structured(serde_json::json!({"type": "link"}));
        let json = serde_json::to_value(&structured).expect("serialize");
        assert_eq!(json["kind"], "structured");
        assert_eq!(json["payload"]["type"], "link");
    }

    #[test]
    fn constructors_set_role() {
        assert_eq!(ConversationMessage::user_text("a").role, MessageRole::User);
        assert_eq!(
            ConversationMessage::assistant_text("b").role,
            MessageRole::Assistant
        );
        assert_eq!(
            ConversationMessage::system_text("c").role,
            MessageRole::System
        );
    }
}
