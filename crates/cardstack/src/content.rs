//! Display payloads carried by cards.
//!
//! The stack never interprets what a card shows; it only moves content
//! between the data source and the card instances. [`CardContent`] is the
//! opaque handle for that payload.

use std::any::Any;
use std::sync::Arc;

/// The display payload of a single card.
#[derive(Clone, Default)]
pub enum CardContent {
    /// No content assigned (freshly constructed or pooled card).
    #[default]
    None,
    /// Plain text content.
    Text(String),
    /// Application-defined content. The host downcasts this to its own
    /// view-model type when rendering.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl CardContent {
    /// Build custom content from an application value.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// The text payload, if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Downcast custom content to a concrete type.
    pub fn custom_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Self::Custom(value) => value.downcast_ref(),
            _ => None,
        }
    }

    /// Returns `true` if no content is assigned.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl std::fmt::Debug for CardContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "CardContent::None"),
            Self::Text(text) => f.debug_tuple("CardContent::Text").field(text).finish(),
            Self::Custom(_) => write!(f, "CardContent::Custom(..)"),
        }
    }
}

impl From<&str> for CardContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for CardContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content() {
        let content = CardContent::from("hello");
        assert_eq!(content.as_text(), Some("hello"));
        assert!(!content.is_none());
    }

    #[test]
    fn test_custom_content_downcast() {
        #[derive(Debug, PartialEq)]
        struct Profile {
            name: &'static str,
        }

        let content = CardContent::custom(Profile { name: "sam" });
        assert_eq!(content.custom_ref::<Profile>().map(|p| p.name), Some("sam"));
        assert!(content.custom_ref::<String>().is_none());
        assert!(content.as_text().is_none());
    }

    #[test]
    fn test_default_is_none() {
        assert!(CardContent::default().is_none());
    }
}
