//! Content generation flows.
//!
//! Each flow is one typed request/response contract against a model port:
//! inputs are validated before the call, outputs after. Flows never retry;
//! provider errors propagate directly to the orchestration layer.

pub mod engagement;
pub mod enhance_image;
pub mod model_output;
pub mod narrative;

pub use engagement::{EngagementFlow, EngagementInput};
pub use enhance_image::{EnhanceImageFlow, EnhanceImageInput};
pub use narrative::{NarrativeFlow, NarrativeInput};

use crate::infrastructure::ports::{ImageModelError, TextModelError};

/// Failure taxonomy shared by all flows.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Flow input failed structural validation before any call was made.
    #[error("Invalid flow input: {0}")]
    InvalidInput(String),
    /// Provider responded, but not with the declared output shape.
    #[error("Invalid flow output: {0}")]
    InvalidOutput(String),
    /// The image model completed without returning any media payload.
    #[error("Image model returned no media")]
    EmptyMedia,
    /// Transport or provider-side failure.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl From<TextModelError> for FlowError {
    fn from(error: TextModelError) -> Self {
        match error {
            TextModelError::RequestFailed(msg) => FlowError::Provider(msg),
            TextModelError::InvalidResponse(msg) => FlowError::InvalidOutput(msg),
        }
    }
}

impl From<ImageModelError> for FlowError {
    fn from(error: ImageModelError) -> Self {
        match error {
            ImageModelError::EmptyMedia => FlowError::EmptyMedia,
            ImageModelError::GenerationFailed(msg) => FlowError::Provider(msg),
            ImageModelError::Unavailable => FlowError::Provider("service unavailable".to_string()),
        }
    }
}
