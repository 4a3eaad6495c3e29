//! Wizard session management.
//!
//! One session per client. Each session's conversation sits behind an async
//! mutex so events are handled strictly one at a time; the generation call
//! itself runs outside the lock, with the `Generating` step rejecting any
//! input that arrives meanwhile.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use artisan_domain::{ConversationMessage, ConversationStep, DataUri, SessionId};
use artisan_shared::share_link;

use super::conversation::{
    Conversation, ConversationEvent, GenerationFailure, GenerationOutcome,
};
use super::storefront::{GenerateStorefront, GENERATION_FAILURE_MESSAGE};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// What a session event produced, for the API layer to serialize.
#[derive(Debug)]
pub struct EventResult {
    pub accepted: bool,
    pub step: ConversationStep,
    pub messages: Vec<ConversationMessage>,
}

/// Point-in-time view of a session.
#[derive(Debug)]
pub struct SessionState {
    pub id: SessionId,
    pub step: ConversationStep,
    pub messages: Vec<ConversationMessage>,
}

struct Session {
    conversation: Mutex<Conversation>,
}

pub struct SessionOps {
    sessions: DashMap<SessionId, Arc<Session>>,
    generator: Arc<GenerateStorefront>,
    /// Prefix for generated storefront links ("" keeps them relative).
    public_base_url: String,
}

impl SessionOps {
    pub fn new(generator: Arc<GenerateStorefront>, public_base_url: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            generator,
            public_base_url: public_base_url.into(),
        }
    }

    /// Open a new session with the introduction transcript.
    pub async fn create(&self) -> SessionState {
        let id = SessionId::new();
        let conversation = Conversation::new();
        let state = SessionState {
            id,
            step: conversation.step(),
            messages: conversation.messages().to_vec(),
        };
        self.sessions.insert(
            id,
            Arc::new(Session {
                conversation: Mutex::new(conversation),
            }),
        );
        tracing::debug!(session_id = %id, "Session created");
        state
    }

    pub async fn snapshot(&self, id: SessionId) -> Result<SessionState, SessionError> {
        let session = self.get(id)?;
        let conversation = session.conversation.lock().await;
        Ok(SessionState {
            id,
            step: conversation.step(),
            messages: conversation.messages().to_vec(),
        })
    }

    pub async fn submit_text(&self, id: SessionId, text: String) -> Result<EventResult, SessionError> {
        self.apply_simple(id, ConversationEvent::TextSubmitted(text))
            .await
    }

    pub async fn upload_image(
        &self,
        id: SessionId,
        file_name: String,
        data_uri: DataUri,
    ) -> Result<EventResult, SessionError> {
        self.apply_simple(
            id,
            ConversationEvent::ImageUploaded {
                file_name,
                data_uri,
            },
        )
        .await
    }

    /// Select a setting and run generation to settlement.
    ///
    /// The caller suspends until the orchestration finishes; the returned
    /// messages cover both the kickoff and the settled outcome.
    pub async fn select_setting(
        &self,
        id: SessionId,
        setting: String,
    ) -> Result<EventResult, SessionError> {
        let session = self.get(id)?;

        let (mut messages, input) = {
            let mut conversation = session.conversation.lock().await;
            let transition = conversation.apply(ConversationEvent::SettingSelected(setting));
            if !transition.accepted {
                return Ok(EventResult {
                    accepted: false,
                    step: conversation.step(),
                    messages: Vec::new(),
                });
            }
            let Some(input) = transition.begin_generation else {
                // An accepted setting always starts generation.
                return Ok(EventResult {
                    accepted: true,
                    step: conversation.step(),
                    messages: transition.appended,
                });
            };
            (transition.appended, input)
        };
        // Lock released: inputs arriving while we generate are rejected by
        // the Generating step, not queued behind the call.

        let product_name = input.product_name.clone();
        let settled = match self.generator.execute(input).await {
            Ok(result) => match share_link::storefront_path(&result) {
                Ok(path) => Ok(GenerationOutcome {
                    product_name,
                    storefront_url: format!("{}{}", self.public_base_url, path),
                }),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode storefront share link");
                    Err(GenerationFailure {
                        message: GENERATION_FAILURE_MESSAGE.to_string(),
                    })
                }
            },
            Err(e) => Err(GenerationFailure {
                message: e.to_string(),
            }),
        };

        let mut conversation = session.conversation.lock().await;
        let transition = conversation.apply(ConversationEvent::GenerationSettled(settled));
        messages.extend(transition.appended);

        Ok(EventResult {
            accepted: true,
            step: conversation.step(),
            messages,
        })
    }

    async fn apply_simple(
        &self,
        id: SessionId,
        event: ConversationEvent,
    ) -> Result<EventResult, SessionError> {
        let session = self.get(id)?;
        let mut conversation = session.conversation.lock().await;
        let transition = conversation.apply(event);
        Ok(EventResult {
            accepted: transition.accepted,
            step: conversation.step(),
            messages: transition.appended,
        })
    }

    fn get(&self, id: SessionId) -> Result<Arc<Session>, SessionError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound(id))
    }
}
