//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Text model calls (could swap Ollama -> Claude/OpenAI)
//! - Image model calls (could swap ComfyUI -> other)
//!
//! Everything else is concrete types.

use async_trait::async_trait;

use artisan_domain::DataUri;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TextModelError {
    #[error("Text model request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ImageModelError {
    #[error("Image generation failed: {0}")]
    GenerationFailed(String),
    #[error("Image model returned no media")]
    EmptyMedia,
    #[error("Service unavailable")]
    Unavailable,
}

// =============================================================================
// Text Model Port
// =============================================================================

/// One free-form or instruction-following text generation request, with
/// optional image attachments for multimodal models.
#[derive(Debug, Clone)]
pub struct TextRequest {
    /// System prompt / role framing
    pub system_prompt: Option<String>,
    /// The user-turn prompt
    pub prompt: String,
    /// Images attached to the user turn
    pub images: Vec<ImageAttachment>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            images: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_image(mut self, image: &DataUri) -> Self {
        self.images.push(ImageAttachment {
            data: image.payload().to_string(),
            media_type: image.mime().to_string(),
        });
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Image data for multimodal requests
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// Base64-encoded image data
    pub data: String,
    /// MIME type (e.g., "image/png")
    pub media_type: String,
}

/// Response from the text model
#[derive(Debug, Clone)]
pub struct TextResponse {
    /// The generated text content
    pub content: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModelPort: Send + Sync {
    async fn generate(&self, request: TextRequest) -> Result<TextResponse, TextModelError>;
}

// =============================================================================
// Image Model Port
// =============================================================================

/// Request to re-render a source photo inside a described setting.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    /// The original product photo
    pub source: DataUri,
    /// Positive prompt describing the target setting
    pub prompt: String,
}

#[derive(Debug, Clone)]
pub struct ImageResult {
    pub image_data: Vec<u8>,
    /// Output format ("png" or "jpeg")
    pub format: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageModelPort: Send + Sync {
    async fn generate(&self, request: ImageEditRequest) -> Result<ImageResult, ImageModelError>;
    async fn check_health(&self) -> Result<bool, ImageModelError>;
}
