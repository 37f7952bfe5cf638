use crate::error::{ModelError, Result};

/// Opaque display payload rendered by a carousel slide.
///
/// Owned by the item source; carousels only clone it into their padded
/// render sequence and never change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Image reference (URL or asset path). May be empty for text-only cards.
    pub image: String,
    /// Accessible label, used as the image alt text.
    pub label: String,
    /// Optional navigation target followed when the item is activated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: Option<String>,
}

impl Item {
    pub fn new(image: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            label: label.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Items need a label to be announced; the image may be a fallback.
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(ModelError::MissingField("label"));
        }
        Ok(())
    }
}
