//! Structured output extraction from raw model text.
//!
//! Models asked for strict JSON still wrap it in code fences or prose often
//! enough that the flows parse defensively: strip fences, locate the
//! outermost object, then deserialize against the declared shape.

use regex_lite::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

use super::FlowError;

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex"));

/// Parse a JSON document of type `T` out of raw model output.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, FlowError> {
    let candidate = extract_json_candidate(raw);
    serde_json::from_str(candidate).map_err(|e| {
        tracing::warn!(error = %e, raw_len = raw.len(), "Model output failed JSON validation");
        FlowError::InvalidOutput(format!("model output is not the expected JSON shape: {e}"))
    })
}

/// Narrow raw output down to the most plausible JSON object.
fn extract_json_candidate(raw: &str) -> &str {
    // Prefer fenced content when present
    if let Some(caps) = CODE_FENCE_RE.captures(raw) {
        if let Some(inner) = caps.get(1) {
            return inner.as_str().trim();
        }
    }

    // Otherwise take the outermost brace span
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            return &raw[start..=end];
        }
    }

    raw.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        score: f64,
    }

    #[test]
    fn parses_bare_json() {
        let parsed: Sample =
            parse_model_json(r#"{"name": "basket", "score": 0.5}"#).expect("parse");
        assert_eq!(parsed.name, "basket");
    }

    #[test]
    fn strips_code_fences() {
        let raw = "Here you go:\n```json\n{\"name\": \"basket\", \"score\": 0.5}\n```\nEnjoy!";
        let parsed: Sample = parse_model_json(raw).expect("parse");
        assert_eq!(parsed.score, 0.5);
    }

    #[test]
    fn finds_object_inside_prose() {
        let raw = "Sure! {\"name\": \"basket\", \"score\": 1.0} Hope that helps.";
        let parsed: Sample = parse_model_json(raw).expect("parse");
        assert_eq!(parsed.name, "basket");
    }

    #[test]
    fn garbage_is_invalid_output() {
        let result: Result<Sample, _> = parse_model_json("I could not do that, sorry.");
        assert!(matches!(result, Err(FlowError::InvalidOutput(_))));
    }
}
