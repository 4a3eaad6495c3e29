//! Service wiring.
//!
//! The engine binary builds concrete provider clients and hands them in as
//! `Arc<dyn Trait>`; everything below this point sees only the port traits.

use std::sync::Arc;

use crate::flows::{EngagementFlow, EnhanceImageFlow, NarrativeFlow};
use crate::infrastructure::ports::{ImageModelPort, TextModelPort};
use crate::use_cases::{GenerateStorefront, SessionOps};

pub struct App {
    pub sessions: SessionOps,
    pub image_model: Arc<dyn ImageModelPort>,
}

impl App {
    pub fn new(
        text_model: Arc<dyn TextModelPort>,
        image_model: Arc<dyn ImageModelPort>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let generator = Arc::new(GenerateStorefront::new(
            NarrativeFlow::new(text_model.clone()),
            EnhanceImageFlow::new(image_model.clone()),
            EngagementFlow::new(text_model),
        ));
        Self {
            sessions: SessionOps::new(generator, public_base_url),
            image_model,
        }
    }
}
