//! Data source contract for the card stack.
//!
//! A [`CardStackView`](crate::stack::CardStackView) does not own its data; it
//! queries an implementor of [`CardDataSource`] for the item count and the
//! content at each logical index, exactly like a view querying its model.
//!
//! # Example
//!
//! ```
//! use cardstack::content::CardContent;
//! use cardstack::source::CardDataSource;
//!
//! struct Names(Vec<String>);
//!
//! impl CardDataSource for Names {
//!     fn count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn content(&self, index: usize) -> CardContent {
//!         CardContent::Text(self.0[index].clone())
//!     }
//! }
//! ```

use crate::content::CardContent;

/// The reuse identifier used when a data source does not distinguish card
/// types.
pub const DEFAULT_REUSE_IDENTIFIER: &str = "card";

/// Supplies the deck's items to a card stack.
///
/// # Contract
///
/// `content` must return validly-initialized content for every index in
/// `[0, count())`. The stack only ever asks for in-range indices; a source
/// that reports a count and then fails to supply content for an in-range
/// index is a caller bug and is not defended against.
pub trait CardDataSource: Send + Sync {
    /// Total number of items in the deck.
    fn count(&self) -> usize;

    /// Content displayed by the card at the given logical index.
    fn content(&self, index: usize) -> CardContent;

    /// Reuse identifier grouping cards of the same visual type for pooling.
    ///
    /// The default groups every index under [`DEFAULT_REUSE_IDENTIFIER`];
    /// override when the deck mixes card types.
    fn reuse_identifier(&self, _index: usize) -> String {
        DEFAULT_REUSE_IDENTIFIER.to_string()
    }
}

/// A fixed, in-memory deck of content items.
///
/// Convenient for tests and for decks whose contents are known up front.
#[derive(Debug, Clone, Default)]
pub struct StaticDeck {
    items: Vec<CardContent>,
}

impl StaticDeck {
    /// Create a deck from pre-built content items.
    pub fn new(items: Vec<CardContent>) -> Self {
        Self { items }
    }

    /// Create a deck of text cards.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: texts
                .into_iter()
                .map(|text| CardContent::Text(text.into()))
                .collect(),
        }
    }
}

impl CardDataSource for StaticDeck {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn content(&self, index: usize) -> CardContent {
        self.items[index].clone()
    }
}
