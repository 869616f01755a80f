//! Gesture event types fed to the card stack by the host.
//!
//! Cardstack does not own a gesture recognizer. The host's input layer
//! detects a pan on the front card and forwards its phases here as
//! [`PanEvent`]s, carrying the translation delta since the previous event.
//! Deltas are incremental: each delta is consumed exactly once, never
//! re-read cumulatively.

use crate::geometry::Point;

/// Lifecycle phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// The gesture has been recognized and is starting.
    Started,
    /// The gesture produced new movement.
    Updated,
    /// The gesture finished normally (finger lifted).
    Ended,
    /// The gesture was cancelled or failed (e.g. interrupted by the system).
    Cancelled,
}

/// One phase of a pan gesture on the front card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    /// Which phase of the gesture this event represents.
    pub state: GestureState,
    /// Translation since the previous event, in surface coordinates.
    ///
    /// Only meaningful for [`GestureState::Updated`]; zero otherwise.
    pub delta: Point,
}

impl PanEvent {
    /// A gesture-start event.
    pub const fn began() -> Self {
        Self {
            state: GestureState::Started,
            delta: Point::ZERO,
        }
    }

    /// A movement event carrying the translation since the previous event.
    pub const fn changed(delta: Point) -> Self {
        Self {
            state: GestureState::Updated,
            delta,
        }
    }

    /// A normal gesture-end event.
    pub const fn ended() -> Self {
        Self {
            state: GestureState::Ended,
            delta: Point::ZERO,
        }
    }

    /// A cancellation event.
    pub const fn cancelled() -> Self {
        Self {
            state: GestureState::Cancelled,
            delta: Point::ZERO,
        }
    }
}

/// Horizontal direction of a swipe removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Card leaves toward the left edge.
    Left,
    /// Card leaves toward the right edge.
    Right,
}

impl SwipeDirection {
    /// The sign of the direction along the x axis: -1.0 for left, +1.0 for
    /// right.
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}
