//! ComfyUI image enhancement client
//!
//! Implements the ImageModelPort trait by uploading the source product photo,
//! queueing an img2img workflow that re-renders it in the requested setting,
//! and polling for the result.

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

use crate::infrastructure::ports::{ImageEditRequest, ImageModelError, ImageModelPort, ImageResult};

/// Client for ComfyUI API
#[derive(Clone)]
pub struct ComfyUIClient {
    client: Client,
    base_url: String,
}

impl ComfyUIClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300)) // 5 minute timeout for generation
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload the source image so the workflow's LoadImage node can read it.
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<UploadResponse, ImageModelError> {
        let extension = match mime {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        };
        let file_name = format!("artisan-{}.{}", uuid::Uuid::new_v4(), extension);

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(format!("{}/upload/image", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageModelError::GenerationFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))
    }

    /// Queue a workflow for execution
    async fn queue_prompt(
        &self,
        workflow: serde_json::Value,
    ) -> Result<QueueResponse, ImageModelError> {
        let client_id = uuid::Uuid::new_v4().to_string();
        let request = QueuePromptRequest {
            prompt: workflow,
            client_id,
        };

        let response = self
            .client
            .post(format!("{}/prompt", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageModelError::GenerationFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))
    }

    /// Get the history of a completed prompt
    async fn get_history(&self, prompt_id: &str) -> Result<HistoryResponse, ImageModelError> {
        let response = self
            .client
            .get(format!("{}/history/{}", self.base_url, prompt_id))
            .send()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageModelError::GenerationFailed(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))
    }

    /// Download a generated image
    async fn get_image(
        &self,
        filename: &str,
        subfolder: &str,
        folder_type: &str,
    ) -> Result<Vec<u8>, ImageModelError> {
        let response = self
            .client
            .get(format!("{}/view", self.base_url))
            .query(&[
                ("filename", filename),
                ("subfolder", subfolder),
                ("type", folder_type),
            ])
            .send()
            .await
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImageModelError::GenerationFailed(error_text));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ImageModelError::GenerationFailed(e.to_string()))
    }

    /// Wait for a prompt to complete and return the first image.
    ///
    /// A workflow that completes without producing an image is the
    /// empty-media failure, distinct from transport errors.
    async fn wait_for_completion(&self, prompt_id: &str) -> Result<ImageOutput, ImageModelError> {
        const MAX_ATTEMPTS: u32 = 120; // 2 minutes with 1 second intervals
        const POLL_INTERVAL: Duration = Duration::from_secs(1);

        for _ in 0..MAX_ATTEMPTS {
            let history = self.get_history(prompt_id).await?;

            if let Some(prompt_history) = history.prompts.get(prompt_id) {
                if prompt_history.status.completed {
                    for output in prompt_history.outputs.values() {
                        if let Some(images) = &output.images {
                            if let Some(image) = images.first() {
                                return Ok(image.clone());
                            }
                        }
                    }
                    return Err(ImageModelError::EmptyMedia);
                }
            }

            sleep(POLL_INTERVAL).await;
        }

        Err(ImageModelError::GenerationFailed(
            "Generation timed out".to_string(),
        ))
    }

    /// Build an img2img workflow around the uploaded source image.
    fn build_workflow(uploaded_name: &str, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "3": {
                "inputs": {
                    "seed": rand::random::<u32>(),
                    "steps": 20,
                    "cfg": 8.0,
                    "sampler_name": "euler",
                    "scheduler": "normal",
                    // Partial denoise keeps the product recognizable while
                    // repainting the surroundings.
                    "denoise": 0.6,
                    "model": ["4", 0],
                    "positive": ["6", 0],
                    "negative": ["7", 0],
                    "latent_image": ["12", 0]
                },
                "class_type": "KSampler"
            },
            "4": {
                "inputs": {
                    "ckpt_name": "v1-5-pruned-emaonly.ckpt"
                },
                "class_type": "CheckpointLoaderSimple"
            },
            "6": {
                "inputs": {
                    "text": prompt,
                    "clip": ["4", 1]
                },
                "class_type": "CLIPTextEncode"
            },
            "7": {
                "inputs": {
                    "text": "bad quality, blurry, ugly",
                    "clip": ["4", 1]
                },
                "class_type": "CLIPTextEncode"
            },
            "8": {
                "inputs": {
                    "samples": ["3", 0],
                    "vae": ["4", 2]
                },
                "class_type": "VAEDecode"
            },
            "9": {
                "inputs": {
                    "filename_prefix": "artisan",
                    "images": ["8", 0]
                },
                "class_type": "SaveImage"
            },
            "10": {
                "inputs": {
                    "image": uploaded_name
                },
                "class_type": "LoadImage"
            },
            "12": {
                "inputs": {
                    "pixels": ["10", 0],
                    "vae": ["4", 2]
                },
                "class_type": "VAEEncode"
            }
        })
    }
}

#[async_trait]
impl ImageModelPort for ComfyUIClient {
    async fn generate(&self, request: ImageEditRequest) -> Result<ImageResult, ImageModelError> {
        // Upload the source photo
        let uploaded = self
            .upload_image(request.source.to_bytes(), request.source.mime())
            .await?;

        // Queue the img2img workflow
        let workflow = Self::build_workflow(&uploaded.name, &request.prompt);
        let queue_response = self.queue_prompt(workflow).await?;

        // Wait for completion
        let image_output = self.wait_for_completion(&queue_response.prompt_id).await?;

        // Download the image
        let image_data = self
            .get_image(
                &image_output.filename,
                &image_output.subfolder,
                &image_output.r#type,
            )
            .await?;

        // Determine format from filename
        let format = if image_output.filename.ends_with(".jpg")
            || image_output.filename.ends_with(".jpeg")
        {
            "jpeg"
        } else {
            "png"
        }
        .to_string();

        Ok(ImageResult { image_data, format })
    }

    async fn check_health(&self) -> Result<bool, ImageModelError> {
        let response = self
            .client
            .get(format!("{}/system_stats", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|_| ImageModelError::Unavailable)?;

        Ok(response.status().is_success())
    }
}

// =============================================================================
// ComfyUI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct QueuePromptRequest {
    prompt: serde_json::Value,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct QueueResponse {
    prompt_id: String,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(flatten)]
    prompts: HashMap<String, PromptHistory>,
}

#[derive(Debug, Deserialize)]
struct PromptHistory {
    outputs: HashMap<String, NodeOutput>,
    status: PromptStatus,
}

#[derive(Debug, Deserialize)]
struct NodeOutput {
    images: Option<Vec<ImageOutput>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ImageOutput {
    filename: String,
    subfolder: String,
    r#type: String,
}

#[derive(Debug, Deserialize)]
struct PromptStatus {
    completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_wires_source_image_through_vae_encode() {
        let workflow = ComfyUIClient::build_workflow("upload.png", "on a rustic table");

        assert_eq!(workflow["10"]["inputs"]["image"], "upload.png");
        assert_eq!(workflow["12"]["inputs"]["pixels"][0], "10");
        assert_eq!(workflow["3"]["inputs"]["latent_image"][0], "12");
        assert_eq!(workflow["6"]["inputs"]["text"], "on a rustic table");
    }

    #[test]
    fn history_with_completed_but_no_images_parses() {
        let json = serde_json::json!({
            "abc": {
                "outputs": {"9": {}},
                "status": {"completed": true}
            }
        });
        let history: HistoryResponse = serde_json::from_value(json).expect("parse");
        let prompt = history.prompts.get("abc").expect("present");
        assert!(prompt.status.completed);
        assert!(prompt
            .outputs
            .values()
            .all(|output| output.images.is_none()));
    }
}
