//! Product draft accumulated by the wizard.

use serde::{Deserialize, Serialize};

use crate::data_uri::DataUri;
use crate::error::DomainError;

/// The three pieces of user input the wizard collects, one per step.
///
/// Fields are set exactly once, in step order, and never mutated after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    product_name: Option<String>,
    product_description: Option<String>,
    product_image: Option<DataUri>,
}

impl ProductDraft {
    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn product_description(&self) -> Option<&str> {
        self.product_description.as_deref()
    }

    pub fn product_image(&self) -> Option<&DataUri> {
        self.product_image.as_ref()
    }

    pub fn set_product_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        if self.product_name.is_some() {
            return Err(DomainError::validation("product name is already set"));
        }
        self.product_name = Some(name.into());
        Ok(())
    }

    pub fn set_product_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), DomainError> {
        if self.product_description.is_some() {
            return Err(DomainError::validation("product description is already set"));
        }
        self.product_description = Some(description.into());
        Ok(())
    }

    pub fn set_product_image(&mut self, image: DataUri) -> Result<(), DomainError> {
        if self.product_image.is_some() {
            return Err(DomainError::validation("product image is already set"));
        }
        self.product_image = Some(image);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_set_once() {
        let mut draft = ProductDraft::default();
        draft.set_product_name("Basket").expect("first set");
        assert!(draft.set_product_name("Other").is_err());
        assert_eq!(draft.product_name(), Some("Basket"));
    }

    #[test]
    fn image_set_once() {
        let mut draft = ProductDraft::default();
        let uri = DataUri::parse("data:image/png;base64,AAAA").expect("valid");
        draft.set_product_image(uri.clone()).expect("first set");
        assert!(draft.set_product_image(uri).is_err());
    }
}
