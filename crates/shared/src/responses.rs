//! Response types for the wizard API.

use serde::{Deserialize, Serialize};

use artisan_domain::{
    ConversationMessage, ConversationStep, MessageContent, MessageRole, StorefrontResult,
};

/// One transcript entry as sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub role: MessageRole,
    pub content: MessageContent,
}

impl From<&ConversationMessage> for MessageDto {
    fn from(message: &ConversationMessage) -> Self {
        Self {
            id: message.id.to_string(),
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// Snapshot of a session: the active step plus the full transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub step: ConversationStep,
    pub messages: Vec<MessageDto>,
}

/// Outcome of submitting an event to a session.
///
/// A rejected input is a contract no-op, not an error: `accepted` is false
/// and `messages` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
    pub accepted: bool,
    pub step: ConversationStep,
    pub messages: Vec<MessageDto>,
}

/// What the storefront page renders for a `data=` parameter.
///
/// Malformed payloads are a recoverable display state, never a failure
/// status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StorefrontView {
    Ready { storefront: StorefrontResult },
    Corrupted { message: String },
}
