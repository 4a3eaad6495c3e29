//! Storefront generation orchestration.
//!
//! Composes the three flows: narrative and image enhancement run
//! concurrently and both always run to completion (no cancellation of the
//! other on first failure); engagement runs afterwards on the combined
//! narrative text. Any failure collapses into one generic user-safe error
//! and no partial result escapes.

use artisan_domain::{DataUri, StorefrontResult};

use crate::flows::{
    EngagementFlow, EngagementInput, EnhanceImageFlow, EnhanceImageInput, FlowError, NarrativeFlow,
    NarrativeInput,
};

/// The only generation failure text end users ever see. Original errors go
/// to the logs.
pub const GENERATION_FAILURE_MESSAGE: &str =
    "Failed to generate AI content. Please check the inputs and try again.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("{}", GENERATION_FAILURE_MESSAGE)]
    Failed,
}

#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub product_name: String,
    pub product_description: String,
    pub product_photo: DataUri,
    pub setting_description: String,
}

pub struct GenerateStorefront {
    narrative: NarrativeFlow,
    enhance_image: EnhanceImageFlow,
    engagement: EngagementFlow,
}

impl GenerateStorefront {
    pub fn new(
        narrative: NarrativeFlow,
        enhance_image: EnhanceImageFlow,
        engagement: EngagementFlow,
    ) -> Self {
        Self {
            narrative,
            enhance_image,
            engagement,
        }
    }

    pub async fn execute(&self, input: GenerationInput) -> Result<StorefrontResult, GenerationError> {
        if input.product_name.trim().is_empty() {
            return Err(collapse(
                "input",
                FlowError::InvalidInput("product name must not be empty".to_string()),
            ));
        }

        let narrative_call = self.narrative.run(NarrativeInput {
            product_description: input.product_description.clone(),
            product_photo: input.product_photo.clone(),
        });
        let enhance_call = self.enhance_image.run(EnhanceImageInput {
            product_photo: input.product_photo.clone(),
            setting_description: input.setting_description.clone(),
        });

        // Both calls settle before any success/failure decision.
        let (narrative, enhanced_image) = tokio::join!(narrative_call, enhance_call);
        let narrative = narrative.map_err(|e| collapse("narrative", e))?;
        let enhanced_image = enhanced_image.map_err(|e| collapse("enhance_image", e))?;

        let engagement_content = format!(
            "{} {} {}",
            narrative.product_description, narrative.short_story, narrative.social_media_content
        );
        let engagement_insights = self
            .engagement
            .run(EngagementInput {
                content: engagement_content,
                style_preferences: None,
            })
            .await
            .map_err(|e| collapse("engagement", e))?;

        Ok(StorefrontResult {
            product_name: input.product_name,
            marketing_narrative: narrative,
            enhanced_image,
            engagement_insights,
        })
    }
}

/// Log the real failure for diagnostics, hand back the generic error.
fn collapse(flow: &str, error: FlowError) -> GenerationError {
    tracing::error!(flow, error = %error, "Storefront generation failed");
    GenerationError::Failed
}
