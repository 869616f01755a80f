//! Cardstack - a swipeable card-stack widget core.
//!
//! Cardstack displays a deck of logical items as a stack of overlapping
//! cards: the front card is dragged to dismiss it left or right, off-screen
//! cards are recycled through a reuse pool, and observers are notified of
//! selection, movement, and removal through signals.
//!
//! The crate is headless: it owns the stack's state machine — the visible
//! window, layout poses, gesture interpretation, and the two-phase removal
//! sequence — while the host toolkit owns rendering, input recognition, and
//! frame scheduling.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cardstack::card::Card;
//! use cardstack::events::PanEvent;
//! use cardstack::geometry::{Point, Rect};
//! use cardstack::source::StaticDeck;
//! use cardstack::stack::CardStackView;
//!
//! let deck = StaticDeck::from_texts(["first", "second", "third"]);
//! let mut stack = CardStackView::new(Rect::new(0.0, 0.0, 400.0, 600.0))
//!     .with_data_source(Arc::new(deck));
//! stack.register("card", Card::new);
//! stack.reload(false)?;
//!
//! // Drag the front card past the removal threshold and release it.
//! stack.handle_pan(PanEvent::began())?;
//! stack.handle_pan(PanEvent::changed(Point::new(150.0, 10.0)))?;
//! stack.handle_pan(PanEvent::ended())?;
//!
//! assert_eq!(stack.current_top_index(), Some(1));
//! # Ok::<(), cardstack::error::CardStackError>(())
//! ```

pub mod animation;
pub mod card;
pub mod config;
pub mod content;
pub mod easing;
pub mod error;
pub mod events;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod pool;
pub mod source;
pub mod stack;

pub use animation::{Pose, PoseAnimation};
pub use card::{Card, CardId, CardSnapshot};
pub use config::StackConfig;
pub use content::CardContent;
pub use easing::{Easing, ease, lerp_eased};
pub use error::{CardStackError, Result};
pub use events::{GestureState, PanEvent, SwipeDirection};
pub use geometry::{Point, Rect, Size, Transform2D};
pub use interaction::{Interaction, InteractionState, PanOutcome, SwipeInteraction, SwipeLimits};
pub use pool::{CardFactory, CardPool};
pub use source::{CardDataSource, StaticDeck};
pub use stack::{CardStackView, FlyAway};
