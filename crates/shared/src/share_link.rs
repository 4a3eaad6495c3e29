//! Storefront share-link codec.
//!
//! A `StorefrontResult` travels to the storefront page as JSON, base64
//! encoded, in a single `data=` query parameter. Decoding failures are
//! expected input (hand-edited or truncated links) and surface as values,
//! never panics.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

use artisan_domain::StorefrontResult;

#[derive(Debug, Error)]
pub enum ShareLinkError {
    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("payload is not a valid storefront document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Encode a storefront result into the `data=` parameter value.
pub fn encode_storefront(result: &StorefrontResult) -> Result<String, ShareLinkError> {
    let json = serde_json::to_vec(result)?;
    Ok(BASE64.encode(json))
}

/// Decode a `data=` parameter value back into a storefront result.
///
/// Query-string form decoding turns `+` into a space before the value
/// reaches us, so spaces are mapped back first.
pub fn decode_storefront(encoded: &str) -> Result<StorefrontResult, ShareLinkError> {
    let encoded = encoded.trim().replace(' ', "+");
    let json = BASE64.decode(encoded)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Relative storefront path carrying the encoded payload.
pub fn storefront_path(result: &StorefrontResult) -> Result<String, ShareLinkError> {
    Ok(format!("/storefront?data={}", encode_storefront(result)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_domain::{
        DataUri, EngagementInsights, EngagementScore, EnhancedImage, MarketingNarrative,
    };

    fn sample() -> StorefrontResult {
        StorefrontResult {
            product_name: "Handwoven Basket".to_string(),
            marketing_narrative: MarketingNarrative {
                product_description: "A sturdy reed basket, woven by hand.".to_string(),
                short_story: "It began with a single reed.".to_string(),
                social_media_content: "Handmade. Built to last. #artisan".to_string(),
            },
            enhanced_image: EnhancedImage {
                enhanced_photo_data_uri: DataUri::parse("data:image/png;base64,AAAA")
                    .expect("valid"),
            },
            engagement_insights: EngagementInsights {
                suggested_styles: "Lean into the origin story.".to_string(),
                engagement_score: EngagementScore::new(0.85).expect("valid"),
            },
        }
    }

    #[test]
    fn round_trip_is_lossless() {
        let original = sample();
        let encoded = encode_storefront(&original).expect("encode");
        let decoded = decode_storefront(&encoded).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn corrupted_base64_is_an_error_value() {
        assert!(matches!(
            decode_storefront("%%%not-base64%%%"),
            Err(ShareLinkError::Decode(_))
        ));
    }

    #[test]
    fn valid_base64_of_garbage_is_a_parse_error() {
        let encoded = BASE64.encode(b"{\"not\": \"a storefront\"}");
        assert!(matches!(
            decode_storefront(&encoded),
            Err(ShareLinkError::Parse(_))
        ));
    }

    #[test]
    fn truncated_payload_is_an_error_not_a_panic() {
        let mut encoded = encode_storefront(&sample()).expect("encode");
        encoded.truncate(encoded.len() / 2);
        assert!(decode_storefront(&encoded).is_err());
    }

    #[test]
    fn out_of_range_score_fails_decoding() {
        let mut json = serde_json::to_value(sample()).expect("serialize");
        json["engagementInsights"]["engagementScore"] = serde_json::json!(7.0);
        let encoded = BASE64.encode(json.to_string());
        assert!(matches!(
            decode_storefront(&encoded),
            Err(ShareLinkError::Parse(_))
        ));
    }

    #[test]
    fn form_decoded_spaces_are_restored_to_plus() {
        // A run of six '>' bytes always covers one aligned base64 group,
        // which encodes to "Pj4+" and forces a '+' into the payload.
        let mut original = sample();
        original.product_name = "Basket >>>>>>".to_string();

        let encoded = encode_storefront(&original).expect("encode");
        assert!(encoded.contains('+'));

        let mangled = encoded.replace('+', " ");
        let decoded = decode_storefront(&mangled).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn path_embeds_data_parameter() {
        let path = storefront_path(&sample()).expect("encode");
        assert!(path.starts_with("/storefront?data="));
    }
}
