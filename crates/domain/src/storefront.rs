//! Generated storefront content.
//!
//! Wire field names keep the camelCase of the original storefront payload so
//! previously shared links stay decodable.

use serde::{Deserialize, Serialize};

use crate::data_uri::DataUri;
use crate::error::DomainError;

/// Simulated engagement score, guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EngagementScore(f64);

impl EngagementScore {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation("engagement score must be finite"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(DomainError::validation(format!(
                "engagement score {value} outside [0, 1]"
            )));
        }
        Ok(Self(value))
    }

    /// Clamp a finite value into range instead of rejecting it.
    pub fn clamped(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation("engagement score must be finite"));
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The score as a percentage in `[0, 100]`, for display.
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl TryFrom<f64> for EngagementScore {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EngagementScore> for f64 {
    fn from(value: EngagementScore) -> Self {
        value.0
    }
}

/// Marketing copy produced by the narrative flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingNarrative {
    pub product_description: String,
    pub short_story: String,
    pub social_media_content: String,
}

/// Enhanced product photo produced by the image flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedImage {
    pub enhanced_photo_data_uri: DataUri,
}

/// Output of the engagement simulation flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementInsights {
    pub suggested_styles: String,
    pub engagement_score: EngagementScore,
}

/// The complete generated marketing kit for one product.
///
/// Produced once per successful generation, serialized into the storefront
/// share link, and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontResult {
    pub product_name: String,
    pub marketing_narrative: MarketingNarrative,
    pub enhanced_image: EnhancedImage,
    pub engagement_insights: EngagementInsights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_bounds() {
        assert!(EngagementScore::new(0.0).is_ok());
        assert!(EngagementScore::new(1.0).is_ok());
        assert!(EngagementScore::new(0.73).is_ok());
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert!(EngagementScore::new(-0.1).is_err());
        assert!(EngagementScore::new(1.2).is_err());
        assert!(EngagementScore::new(f64::NAN).is_err());
        assert!(EngagementScore::new(f64::INFINITY).is_err());
    }

    #[test]
    fn clamped_pulls_into_range() {
        assert_eq!(EngagementScore::clamped(1.7).expect("finite").value(), 1.0);
        assert_eq!(EngagementScore::clamped(-3.0).expect("finite").value(), 0.0);
        assert!(EngagementScore::clamped(f64::NAN).is_err());
    }

    #[test]
    fn percent_is_renderable() {
        let score = EngagementScore::new(0.85).expect("valid");
        assert!((score.as_percent() - 85.0).abs() < f64::EPSILON);
        assert!((0.0..=100.0).contains(&score.as_percent()));
    }

    #[test]
    fn result_uses_camel_case_wire_names() {
        let result = StorefrontResult {
            product_name: "Handwoven Basket".to_string(),
            marketing_narrative: MarketingNarrative {
                product_description: "A sturdy reed basket.".to_string(),
                short_story: "Once upon a time.".to_string(),
                social_media_content: "Check it out!".to_string(),
            },
            enhanced_image: EnhancedImage {
                enhanced_photo_data_uri: DataUri::parse("data:image/png;base64,AAAA")
                    .expect("valid"),
            },
            engagement_insights: EngagementInsights {
                suggested_styles: "Warmer tone".to_string(),
                engagement_score: EngagementScore::new(0.8).expect("valid"),
            },
        };

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["productName"], "Handwoven Basket");
        assert_eq!(json["marketingNarrative"]["shortStory"], "Once upon a time.");
        assert_eq!(
            json["enhancedImage"]["enhancedPhotoDataUri"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(json["engagementInsights"]["engagementScore"], 0.8);
    }

    #[test]
    fn deserialization_enforces_score_invariant() {
        let json = serde_json::json!({
            "suggestedStyles": "s",
            "engagementScore": 1.5,
        });
        let parsed: Result<EngagementInsights, _> = serde_json::from_value(json);
        assert!(parsed.is_err());
    }
}
