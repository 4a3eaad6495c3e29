//! Image enhancement flow.
//!
//! Places the product photo in the requested marketing setting via one
//! image-model call.

use std::sync::Arc;

use artisan_domain::{DataUri, EnhancedImage};

use super::FlowError;
use crate::infrastructure::ports::{ImageEditRequest, ImageModelPort};

#[derive(Debug, Clone)]
pub struct EnhanceImageInput {
    pub product_photo: DataUri,
    pub setting_description: String,
}

impl EnhanceImageInput {
    fn validate(&self) -> Result<(), FlowError> {
        if self.setting_description.trim().is_empty() {
            return Err(FlowError::InvalidInput(
                "setting description must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct EnhanceImageFlow {
    image_model: Arc<dyn ImageModelPort>,
}

impl EnhanceImageFlow {
    pub fn new(image_model: Arc<dyn ImageModelPort>) -> Self {
        Self { image_model }
    }

    pub async fn run(&self, input: EnhanceImageInput) -> Result<EnhancedImage, FlowError> {
        input.validate()?;

        let request = ImageEditRequest {
            source: input.product_photo,
            prompt: format!("this product {}", input.setting_description.trim()),
        };

        let result = self.image_model.generate(request).await?;

        let mime = match result.format.as_str() {
            "jpeg" => "image/jpeg",
            _ => "image/png",
        };
        let enhanced_photo_data_uri = DataUri::from_bytes(mime, &result.image_data)
            .map_err(|e| FlowError::InvalidOutput(format!("unusable image payload: {e}")))?;

        Ok(EnhancedImage {
            enhanced_photo_data_uri,
        })
    }
}
