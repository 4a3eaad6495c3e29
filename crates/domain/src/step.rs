//! Wizard step enumeration.

use serde::{Deserialize, Serialize};

/// The single active stage of the conversation wizard.
///
/// Steps form a strict forward-only order; `Results` is terminal and is
/// reached only from `Generating`, on success or failure alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    ProductName,
    ProductDescription,
    ProductImage,
    ImageSetting,
    Generating,
    Results,
}

impl ConversationStep {
    /// Whether free-text input is accepted at this step.
    pub fn accepts_text(self) -> bool {
        matches!(self, Self::ProductName | Self::ProductDescription)
    }

    /// Whether an image upload is accepted at this step.
    pub fn accepts_image(self) -> bool {
        self == Self::ProductImage
    }

    /// Whether a setting selection is accepted at this step.
    pub fn accepts_setting(self) -> bool {
        self == Self::ImageSetting
    }

    /// Whether the wizard has finished (terminal step).
    pub fn is_terminal(self) -> bool {
        self == Self::Results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_strictly_ordered() {
        let order = [
            ConversationStep::ProductName,
            ConversationStep::ProductDescription,
            ConversationStep::ProductImage,
            ConversationStep::ImageSetting,
            ConversationStep::Generating,
            ConversationStep::Results,
        ];
        for pair in order.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn input_gating_matches_step() {
        assert!(ConversationStep::ProductName.accepts_text());
        assert!(ConversationStep::ProductDescription.accepts_text());
        assert!(!ConversationStep::ProductImage.accepts_text());
        assert!(!ConversationStep::Generating.accepts_text());
        assert!(!ConversationStep::Results.accepts_text());

        assert!(ConversationStep::ProductImage.accepts_image());
        assert!(!ConversationStep::ImageSetting.accepts_image());

        assert!(ConversationStep::ImageSetting.accepts_setting());
        assert!(!ConversationStep::Generating.accepts_setting());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&ConversationStep::ProductName).expect("serialize");
        assert_eq!(json, "\"product_name\"");
    }
}
