//! Error types for the card stack.

use thiserror::Error;

/// Errors that can occur during card stack operations.
///
/// All variants are integrator configuration mistakes; nothing here is
/// retryable. Empty-window operations are defined no-ops, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardStackError {
    /// A card was requested for a reuse identifier that has no registered
    /// factory and no pooled instance.
    #[error("no card factory registered for reuse identifier `{identifier}`")]
    UnregisteredIdentifier {
        /// The identifier that failed to resolve.
        identifier: String,
    },
}

/// A specialized Result type for card stack operations.
pub type Result<T> = std::result::Result<T, CardStackError>;
