//! Domain types for the ArtisanAI product wizard.
//!
//! Pure data and invariants only: no I/O, no async, no provider knowledge.

pub mod data_uri;
pub mod draft;
pub mod error;
pub mod ids;
pub mod message;
pub mod step;
pub mod storefront;

pub use data_uri::DataUri;
pub use draft::ProductDraft;
pub use error::DomainError;
pub use ids::{MessageId, SessionId};
pub use message::{ConversationMessage, MessageContent, MessageRole};
pub use step::ConversationStep;
pub use storefront::{
    EngagementInsights, EngagementScore, EnhancedImage, MarketingNarrative, StorefrontResult,
};
