//! Use cases: the conversation wizard and storefront generation.

pub mod conversation;
pub mod session;
pub mod storefront;

pub use conversation::{
    Conversation, ConversationEvent, GenerationFailure, GenerationOutcome, Transition,
    SETTING_PRESETS,
};
pub use session::{EventResult, SessionError, SessionOps, SessionState};
pub use storefront::{
    GenerateStorefront, GenerationError, GenerationInput, GENERATION_FAILURE_MESSAGE,
};
