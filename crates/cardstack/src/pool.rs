//! Card recycling pool and factory registry.
//!
//! Off-screen cards are not dropped: the stack retires them here, keyed by
//! reuse identifier, and hands them back out before constructing anything
//! new. Factories registered per identifier construct fresh instances when
//! the retired queue is empty.

use std::collections::{HashMap, VecDeque};

use crate::card::Card;
use crate::error::{CardStackError, Result};

/// Constructor for a fresh card of a given reuse identifier.
pub type CardFactory = Box<dyn Fn(&str) -> Card + Send + Sync>;

/// A keyed recycling pool of retired cards plus the factory registry.
#[derive(Default)]
pub struct CardPool {
    factories: HashMap<String, CardFactory>,
    retired: HashMap<String, VecDeque<Card>>,
}

impl CardPool {
    /// Create an empty pool with no registered factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for a reuse identifier.
    pub fn register<F>(&mut self, identifier: &str, factory: F)
    where
        F: Fn(&str) -> Card + Send + Sync + 'static,
    {
        self.factories
            .insert(identifier.to_string(), Box::new(factory));
    }

    /// Whether a factory is registered for the identifier.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Number of retired cards currently pooled under the identifier.
    pub fn retired_count(&self, identifier: &str) -> usize {
        self.retired.get(identifier).map_or(0, VecDeque::len)
    }

    /// Obtain a card for the identifier, reusing a retired instance when one
    /// exists (FIFO), otherwise constructing one via the registered factory.
    ///
    /// The card's logical index is assigned before it is returned.
    ///
    /// # Errors
    ///
    /// [`CardStackError::UnregisteredIdentifier`] if the retired queue is
    /// empty and no factory is registered. This is a fatal configuration
    /// mistake by the integrator.
    pub fn acquire(&mut self, identifier: &str, index: usize) -> Result<Card> {
        if let Some(mut card) = self
            .retired
            .get_mut(identifier)
            .and_then(VecDeque::pop_front)
        {
            tracing::trace!(
                target: "cardstack::pool",
                identifier,
                index,
                "reusing retired card"
            );
            card.set_index(index);
            return Ok(card);
        }

        let factory = self.factories.get(identifier).ok_or_else(|| {
            CardStackError::UnregisteredIdentifier {
                identifier: identifier.to_string(),
            }
        })?;

        tracing::trace!(target: "cardstack::pool", identifier, index, "constructing new card");
        let mut card = factory(identifier);
        card.set_index(index);
        Ok(card)
    }

    /// Retire a card into its identifier's queue, resetting its visual and
    /// gesture state first.
    pub fn release(&mut self, mut card: Card) {
        card.prepare_for_reuse();
        self.retired
            .entry(card.identifier().to_string())
            .or_default()
            .push_back(card);
    }

    /// Drop every retired instance (factories stay registered).
    pub fn clear(&mut self) {
        self.retired.clear();
    }
}

impl std::fmt::Debug for CardPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let retired: HashMap<&str, usize> = self
            .retired
            .iter()
            .map(|(identifier, queue)| (identifier.as_str(), queue.len()))
            .collect();
        f.debug_struct("CardPool")
            .field("factories", &self.factories.keys())
            .field("retired", &retired)
            .finish()
    }
}
