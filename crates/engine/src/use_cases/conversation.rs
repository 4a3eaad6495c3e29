//! Conversation wizard state machine.
//!
//! A pure `(state, event) -> transition` machine, independent of any
//! rendering or transport layer. It collects three pieces of user input in
//! a fixed order, then hands off to generation; the caller performs the
//! actual orchestration and feeds the settled outcome back in as an event.

use serde_json::json;

use artisan_domain::{
    ConversationMessage, ConversationStep, DataUri, MessageContent, MessageRole, ProductDraft,
};

use super::storefront::GenerationInput;

/// Preset marketing settings offered after the photo upload. Free-form
/// setting text is accepted too.
pub const SETTING_PRESETS: [&str; 5] = [
    "On a rustic wooden table with soft, warm lighting",
    "In a minimalist white studio with clean shadows",
    "On a cozy coffee shop counter next to a latte",
    "Displayed in a modern art gallery setting",
    "Against a backdrop of lush, natural greenery",
];

/// Successful generation, ready to render as a storefront-link card.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub product_name: String,
    pub storefront_url: String,
}

/// Failed generation; `message` is the generic user-safe text.
#[derive(Debug, Clone)]
pub struct GenerationFailure {
    pub message: String,
}

/// Everything that can happen to a conversation.
#[derive(Debug, Clone)]
pub enum ConversationEvent {
    TextSubmitted(String),
    ImageUploaded { file_name: String, data_uri: DataUri },
    SettingSelected(String),
    GenerationSettled(Result<GenerationOutcome, GenerationFailure>),
}

/// Result of applying one event.
///
/// A rejected event leaves the conversation untouched: no step change, no
/// draft mutation, no transcript entry.
#[derive(Debug)]
pub struct Transition {
    pub accepted: bool,
    /// Messages appended by this event, in order.
    pub appended: Vec<ConversationMessage>,
    /// Set when the event moved the wizard into `Generating`.
    pub begin_generation: Option<GenerationInput>,
}

impl Transition {
    fn rejected() -> Self {
        Self {
            accepted: false,
            appended: Vec::new(),
            begin_generation: None,
        }
    }
}

/// One wizard conversation: active step, accumulated draft, transcript.
#[derive(Debug)]
pub struct Conversation {
    step: ConversationStep,
    draft: ProductDraft,
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    /// Open a conversation with the introduction messages and the first
    /// step active.
    pub fn new() -> Self {
        let messages = vec![
            ConversationMessage::assistant_text(
                "Welcome to ArtisanAI! I'm here to help you craft a unique marketing story \
                 for your product.",
            ),
            ConversationMessage::assistant_text(
                "Let's start with the name of your product. What is it called?",
            ),
        ];
        Self {
            step: ConversationStep::ProductName,
            draft: ProductDraft::default(),
            messages,
        }
    }

    pub fn step(&self) -> ConversationStep {
        self.step
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Apply one event, returning what changed.
    pub fn apply(&mut self, event: ConversationEvent) -> Transition {
        match event {
            ConversationEvent::TextSubmitted(text) => self.on_text(text),
            ConversationEvent::ImageUploaded {
                file_name,
                data_uri,
            } => self.on_image(file_name, data_uri),
            ConversationEvent::SettingSelected(setting) => self.on_setting(setting),
            ConversationEvent::GenerationSettled(outcome) => self.on_settled(outcome),
        }
    }

    fn on_text(&mut self, text: String) -> Transition {
        let text = text.trim().to_string();
        if text.is_empty() || !self.step.accepts_text() {
            return Transition::rejected();
        }

        match self.step {
            ConversationStep::ProductName => {
                if self.draft.set_product_name(text.clone()).is_err() {
                    return Transition::rejected();
                }
                let appended = vec![
                    self.push(ConversationMessage::user_text(text.clone())),
                    self.push(ConversationMessage::assistant_text(format!(
                        "\"{text}\" is a great name! Now, please provide a detailed description \
                         of your product. What makes it special?"
                    ))),
                ];
                self.step = ConversationStep::ProductDescription;
                Transition {
                    accepted: true,
                    appended,
                    begin_generation: None,
                }
            }
            ConversationStep::ProductDescription => {
                if self.draft.set_product_description(text.clone()).is_err() {
                    return Transition::rejected();
                }
                let appended = vec![
                    self.push(ConversationMessage::user_text(text)),
                    self.push(ConversationMessage::assistant_text(
                        "Thank you. The final step is to upload a photo of your product. \
                         Please use a clear image with a plain background.",
                    )),
                ];
                self.step = ConversationStep::ProductImage;
                Transition {
                    accepted: true,
                    appended,
                    begin_generation: None,
                }
            }
            // accepts_text() already excluded the rest
            _ => Transition::rejected(),
        }
    }

    fn on_image(&mut self, file_name: String, data_uri: DataUri) -> Transition {
        if !self.step.accepts_image() {
            return Transition::rejected();
        }
        if self.draft.set_product_image(data_uri.clone()).is_err() {
            return Transition::rejected();
        }

        let appended = vec![
            self.push(ConversationMessage::new(
                MessageRole::User,
                MessageContent::structured(json!({
                    "type": "image_upload",
                    "fileName": file_name,
                    "dataUri": data_uri.to_string(),
                })),
            )),
            self.push(ConversationMessage::new(
                MessageRole::Assistant,
                MessageContent::structured(json!({
                    "type": "setting_options",
                    "prompt": "Wonderful! Now, pick a setting to place your product in for an \
                               enhanced image:",
                    "options": SETTING_PRESETS,
                })),
            )),
        ];
        self.step = ConversationStep::ImageSetting;
        Transition {
            accepted: true,
            appended,
            begin_generation: None,
        }
    }

    fn on_setting(&mut self, setting: String) -> Transition {
        let setting = setting.trim().to_string();
        if setting.is_empty() || !self.step.accepts_setting() {
            return Transition::rejected();
        }

        // All three draft fields were filled by earlier steps; a gap here
        // means the machine is out of order, so refuse the transition.
        let (Some(name), Some(description), Some(photo)) = (
            self.draft.product_name(),
            self.draft.product_description(),
            self.draft.product_image(),
        ) else {
            return Transition::rejected();
        };

        let input = GenerationInput {
            product_name: name.to_string(),
            product_description: description.to_string(),
            product_photo: photo.clone(),
            setting_description: setting.clone(),
        };

        let appended = vec![
            self.push(ConversationMessage::user_text(setting)),
            self.push(ConversationMessage::assistant_text(
                "Perfect! I have everything I need. Generating your marketing assets now. \
                 This might take a moment...",
            )),
        ];
        self.step = ConversationStep::Generating;
        Transition {
            accepted: true,
            appended,
            begin_generation: Some(input),
        }
    }

    fn on_settled(
        &mut self,
        outcome: Result<GenerationOutcome, GenerationFailure>,
    ) -> Transition {
        if self.step != ConversationStep::Generating {
            return Transition::rejected();
        }

        let appended = match outcome {
            Ok(success) => vec![self.push(ConversationMessage::new(
                MessageRole::Assistant,
                MessageContent::structured(json!({
                    "type": "storefront_link",
                    "title": "✨ Your AI-Generated Marketing Kit is Ready!",
                    "body": "I've created a complete set of marketing materials and a beautiful \
                             digital storefront for your product.",
                    "productName": success.product_name,
                    "url": success.storefront_url,
                })),
            ))],
            Err(failure) => vec![self.push(ConversationMessage::system_text(format!(
                "An error occurred: {}",
                failure.message
            )))],
        };
        self.step = ConversationStep::Results;
        Transition {
            accepted: true,
            appended,
            begin_generation: None,
        }
    }

    fn push(&mut self, message: ConversationMessage) -> ConversationMessage {
        self.messages.push(message.clone());
        message
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> DataUri {
        DataUri::parse("data:image/png;base64,AAAA").expect("valid")
    }

    fn advance_to_setting(conversation: &mut Conversation) {
        assert!(conversation
            .apply(ConversationEvent::TextSubmitted("Handwoven Basket".into()))
            .accepted);
        assert!(conversation
            .apply(ConversationEvent::TextSubmitted(
                "A sturdy reed basket.".into()
            ))
            .accepted);
        assert!(conversation
            .apply(ConversationEvent::ImageUploaded {
                file_name: "basket.png".into(),
                data_uri: photo(),
            })
            .accepted);
        assert_eq!(conversation.step(), ConversationStep::ImageSetting);
    }

    #[test]
    fn opens_with_introduction_and_first_step() {
        let conversation = Conversation::new();
        assert_eq!(conversation.step(), ConversationStep::ProductName);
        assert_eq!(conversation.messages().len(), 2);
        assert!(conversation
            .messages()
            .iter()
            .all(|m| m.role == MessageRole::Assistant));
    }

    #[test]
    fn full_valid_sequence_ends_in_results_with_one_link_message() {
        let mut conversation = Conversation::new();
        advance_to_setting(&mut conversation);

        let transition = conversation.apply(ConversationEvent::SettingSelected(
            SETTING_PRESETS[0].to_string(),
        ));
        assert!(transition.accepted);
        let input = transition.begin_generation.expect("generation starts");
        assert_eq!(input.product_name, "Handwoven Basket");
        assert_eq!(input.product_description, "A sturdy reed basket.");
        assert_eq!(input.setting_description, SETTING_PRESETS[0]);
        assert_eq!(conversation.step(), ConversationStep::Generating);

        let transition =
            conversation.apply(ConversationEvent::GenerationSettled(Ok(GenerationOutcome {
                product_name: "Handwoven Basket".into(),
                storefront_url: "/storefront?data=abc".into(),
            })));
        assert!(transition.accepted);
        assert_eq!(conversation.step(), ConversationStep::Results);

        let link_messages: Vec<_> = conversation
            .messages()
            .iter()
            .filter(|m| match &m.content {
                MessageContent::Structured { payload } => payload["type"] == "storefront_link",
                MessageContent::Text { .. } => false,
            })
            .collect();
        assert_eq!(link_messages.len(), 1);
        assert!(!conversation
            .messages()
            .iter()
            .any(|m| m.role == MessageRole::System));
    }

    #[test]
    fn failed_generation_ends_in_results_with_one_system_message() {
        let mut conversation = Conversation::new();
        advance_to_setting(&mut conversation);
        conversation.apply(ConversationEvent::SettingSelected("In a studio".into()));

        let transition = conversation.apply(ConversationEvent::GenerationSettled(Err(
            GenerationFailure {
                message: "Failed to generate AI content. Please check the inputs and try again."
                    .into(),
            },
        )));
        assert!(transition.accepted);
        assert_eq!(conversation.step(), ConversationStep::Results);

        let system_messages: Vec<_> = conversation
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .collect();
        assert_eq!(system_messages.len(), 1);
        match &system_messages[0].content {
            MessageContent::Text { text } => {
                assert!(text.contains("Failed to generate AI content"));
            }
            MessageContent::Structured { .. } => panic!("expected text content"),
        }
    }

    #[test]
    fn text_outside_text_steps_is_a_no_op() {
        let mut conversation = Conversation::new();
        advance_to_setting(&mut conversation);
        let before = conversation.messages().len();

        let transition =
            conversation.apply(ConversationEvent::TextSubmitted("ignore me".into()));
        assert!(!transition.accepted);
        assert!(transition.appended.is_empty());
        assert_eq!(conversation.messages().len(), before);
        assert_eq!(conversation.step(), ConversationStep::ImageSetting);
    }

    #[test]
    fn whitespace_text_is_a_no_op() {
        let mut conversation = Conversation::new();
        let transition = conversation.apply(ConversationEvent::TextSubmitted("   ".into()));
        assert!(!transition.accepted);
        assert_eq!(conversation.step(), ConversationStep::ProductName);
    }

    #[test]
    fn image_outside_image_step_leaves_draft_untouched() {
        let mut conversation = Conversation::new();
        let transition = conversation.apply(ConversationEvent::ImageUploaded {
            file_name: "early.png".into(),
            data_uri: photo(),
        });
        assert!(!transition.accepted);
        assert!(conversation.draft().product_image().is_none());
        assert_eq!(conversation.step(), ConversationStep::ProductName);
    }

    #[test]
    fn inputs_during_generating_are_ignored() {
        let mut conversation = Conversation::new();
        advance_to_setting(&mut conversation);
        conversation.apply(ConversationEvent::SettingSelected("In a gallery".into()));
        assert_eq!(conversation.step(), ConversationStep::Generating);
        let before = conversation.messages().len();

        assert!(!conversation
            .apply(ConversationEvent::TextSubmitted("hello?".into()))
            .accepted);
        assert!(!conversation
            .apply(ConversationEvent::SettingSelected("again".into()))
            .accepted);
        assert!(!conversation
            .apply(ConversationEvent::ImageUploaded {
                file_name: "again.png".into(),
                data_uri: photo(),
            })
            .accepted);
        assert_eq!(conversation.messages().len(), before);
    }

    #[test]
    fn results_step_is_terminal() {
        let mut conversation = Conversation::new();
        advance_to_setting(&mut conversation);
        conversation.apply(ConversationEvent::SettingSelected("In a studio".into()));
        conversation.apply(ConversationEvent::GenerationSettled(Err(
            GenerationFailure {
                message: "failed".into(),
            },
        )));
        assert_eq!(conversation.step(), ConversationStep::Results);

        assert!(!conversation
            .apply(ConversationEvent::TextSubmitted("restart?".into()))
            .accepted);
        assert!(!conversation
            .apply(ConversationEvent::GenerationSettled(Err(
                GenerationFailure {
                    message: "again".into(),
                }
            )))
            .accepted);
        assert_eq!(conversation.step(), ConversationStep::Results);
    }

    #[test]
    fn setting_before_image_is_rejected() {
        let mut conversation = Conversation::new();
        conversation.apply(ConversationEvent::TextSubmitted("Basket".into()));
        let transition =
            conversation.apply(ConversationEvent::SettingSelected("In a studio".into()));
        assert!(!transition.accepted);
        assert_eq!(conversation.step(), ConversationStep::ProductDescription);
    }
}
