//! Marketing narrative flow.
//!
//! One multimodal text-model call: product description plus photo in,
//! enhanced description, short story, and social copy out.

use std::sync::Arc;

use serde::Deserialize;

use artisan_domain::{DataUri, MarketingNarrative};

use super::model_output::parse_model_json;
use super::FlowError;
use crate::infrastructure::ports::{TextModelPort, TextRequest};

const SYSTEM_PROMPT: &str =
    "You are a marketing expert specializing in crafting compelling narratives for artisans.";

#[derive(Debug, Clone)]
pub struct NarrativeInput {
    pub product_description: String,
    pub product_photo: DataUri,
}

impl NarrativeInput {
    fn validate(&self) -> Result<(), FlowError> {
        if self.product_description.trim().is_empty() {
            return Err(FlowError::InvalidInput(
                "product description must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Raw model output before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNarrative {
    product_description: String,
    short_story: String,
    social_media_content: String,
}

pub struct NarrativeFlow {
    text_model: Arc<dyn TextModelPort>,
}

impl NarrativeFlow {
    pub fn new(text_model: Arc<dyn TextModelPort>) -> Self {
        Self { text_model }
    }

    pub async fn run(&self, input: NarrativeInput) -> Result<MarketingNarrative, FlowError> {
        input.validate()?;

        let request = TextRequest::new(build_prompt(&input.product_description))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_image(&input.product_photo)
            .with_temperature(0.8);

        let response = self.text_model.generate(request).await?;
        let raw: RawNarrative = parse_model_json(&response.content)?;
        validate_output(raw)
    }
}

fn build_prompt(product_description: &str) -> String {
    format!(
        "Given the following product description and the attached product image, generate:\n\
         1. An enhanced product description that highlights the unique qualities and benefits of the product.\n\
         2. A short story that features the product in an engaging and imaginative way.\n\
         3. Social media content (e.g., a tweet, an Instagram caption) designed to promote the product.\n\
         \n\
         Product Description: {product_description}\n\
         \n\
         Ensure each piece of content is distinct, tailored to its purpose, and less than 280 characters.\n\
         Respond with only a JSON object of this exact shape:\n\
         {{\"productDescription\": \"...\", \"shortStory\": \"...\", \"socialMediaContent\": \"...\"}}"
    )
}

fn validate_output(raw: RawNarrative) -> Result<MarketingNarrative, FlowError> {
    for (field, value) in [
        ("productDescription", &raw.product_description),
        ("shortStory", &raw.short_story),
        ("socialMediaContent", &raw.social_media_content),
    ] {
        if value.trim().is_empty() {
            return Err(FlowError::InvalidOutput(format!(
                "narrative field '{field}' is empty"
            )));
        }
    }

    Ok(MarketingNarrative {
        product_description: raw.product_description,
        short_story: raw.short_story,
        social_media_content: raw.social_media_content,
    })
}
