//! Engagement simulation flow.
//!
//! Scores generated marketing content and suggests styles to improve it.

use std::sync::Arc;

use serde::Deserialize;

use artisan_domain::{EngagementInsights, EngagementScore};

use super::model_output::parse_model_json;
use super::FlowError;
use crate::infrastructure::ports::{TextModelPort, TextRequest};

const SYSTEM_PROMPT: &str = "You are a marketing expert analyzing content engagement.";

#[derive(Debug, Clone)]
pub struct EngagementInput {
    pub content: String,
    pub style_preferences: Option<String>,
}

impl EngagementInput {
    fn validate(&self) -> Result<(), FlowError> {
        if self.content.trim().is_empty() {
            return Err(FlowError::InvalidInput(
                "engagement content must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEngagement {
    suggested_styles: String,
    engagement_score: f64,
}

pub struct EngagementFlow {
    text_model: Arc<dyn TextModelPort>,
}

impl EngagementFlow {
    pub fn new(text_model: Arc<dyn TextModelPort>) -> Self {
        Self { text_model }
    }

    pub async fn run(&self, input: EngagementInput) -> Result<EngagementInsights, FlowError> {
        input.validate()?;

        let request = TextRequest::new(build_prompt(&input))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_temperature(0.4);

        let response = self.text_model.generate(request).await?;
        let raw: RawEngagement = parse_model_json(&response.content)?;
        validate_output(raw)
    }
}

fn build_prompt(input: &EngagementInput) -> String {
    let style_preferences = input.style_preferences.as_deref().unwrap_or("none");
    format!(
        "Based on the content provided and optional style preferences, simulate user engagement \
         and suggest content styles to improve performance.\n\
         \n\
         Content: {}\n\
         Style Preferences: {}\n\
         \n\
         Consider readability, emotional impact, and relevance to the target audience.\n\
         Give an engagementScore between 0 and 1 for how likely the content is to do well, then \
         suggest 1 to 3 styles to improve the content.\n\
         Respond with only a JSON object of this exact shape:\n\
         {{\"suggestedStyles\": \"...\", \"engagementScore\": 0.0}}",
        input.content, style_preferences
    )
}

fn validate_output(raw: RawEngagement) -> Result<EngagementInsights, FlowError> {
    if raw.suggested_styles.trim().is_empty() {
        return Err(FlowError::InvalidOutput(
            "suggestedStyles is empty".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&raw.engagement_score) {
        tracing::warn!(
            score = raw.engagement_score,
            "Model returned out-of-range engagement score, clamping"
        );
    }
    let engagement_score = EngagementScore::clamped(raw.engagement_score)
        .map_err(|e| FlowError::InvalidOutput(e.to_string()))?;

    Ok(EngagementInsights {
        suggested_styles: raw.suggested_styles,
        engagement_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockTextModelPort, TextResponse};

    #[tokio::test]
    async fn scores_content_within_bounds() {
        let mut mock = MockTextModelPort::new();
        mock.expect_generate()
            .withf(|request| request.prompt.contains("Content: great copy"))
            .returning(|_| {
                Ok(TextResponse {
                    content: r#"{"suggestedStyles": "Shorter sentences.", "engagementScore": 0.73}"#
                        .to_string(),
                })
            });

        let flow = EngagementFlow::new(Arc::new(mock));
        let insights = flow
            .run(EngagementInput {
                content: "great copy".to_string(),
                style_preferences: None,
            })
            .await
            .expect("flow succeeds");

        assert_eq!(insights.engagement_score.value(), 0.73);
        assert!((0.0..=100.0).contains(&insights.engagement_score.as_percent()));
    }

    #[tokio::test]
    async fn out_of_range_score_is_clamped() {
        let mut mock = MockTextModelPort::new();
        mock.expect_generate().returning(|_| {
            Ok(TextResponse {
                content: r#"{"suggestedStyles": "More emoji.", "engagementScore": 1.4}"#.to_string(),
            })
        });

        let flow = EngagementFlow::new(Arc::new(mock));
        let insights = flow
            .run(EngagementInput {
                content: "copy".to_string(),
                style_preferences: None,
            })
            .await
            .expect("flow succeeds");

        assert_eq!(insights.engagement_score.value(), 1.0);
    }

    #[tokio::test]
    async fn non_numeric_score_is_invalid_output() {
        let mut mock = MockTextModelPort::new();
        mock.expect_generate().returning(|_| {
            Ok(TextResponse {
                content: r#"{"suggestedStyles": "x", "engagementScore": "high"}"#.to_string(),
            })
        });

        let flow = EngagementFlow::new(Arc::new(mock));
        let result = flow
            .run(EngagementInput {
                content: "copy".to_string(),
                style_preferences: None,
            })
            .await;

        assert!(matches!(result, Err(FlowError::InvalidOutput(_))));
    }
}
