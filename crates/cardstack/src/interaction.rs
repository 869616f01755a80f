//! Gesture-to-removal interaction strategies.
//!
//! Every [`Card`](crate::card::Card) owns one boxed [`Interaction`]: the
//! strategy that turns pan phases into a drag pose and decides, when the
//! finger lifts, whether the card is removed or restored. Injecting the
//! strategy per card keeps removal policy swappable without parameterizing
//! the whole widget API over it.

use crate::animation::Pose;
use crate::config::StackConfig;
use crate::events::SwipeDirection;
use crate::geometry::{Point, degrees_to_radians};

/// Lifecycle state of a card's interaction.
///
/// Transitions: `Idle → Dragging → {Restoring | Removing} → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A pan gesture is actively moving the card.
    Dragging,
    /// The card is animating back to its resting pose.
    Restoring,
    /// The card is being removed from the stack.
    Removing,
}

/// Gesture thresholds derived from the active [`StackConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeLimits {
    /// Maximum drag rotation, in radians.
    pub max_angle: f32,
    /// Horizontal distance the drag must exceed to remove the card.
    pub max_remove_distance: f32,
}

impl SwipeLimits {
    /// Derive limits from a stack configuration.
    pub fn from_config(config: &StackConfig) -> Self {
        Self {
            max_angle: degrees_to_radians(config.max_angle),
            max_remove_distance: config.max_remove_distance,
        }
    }
}

/// Decision produced when a gesture completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanOutcome {
    /// The card returns to its resting pose.
    Restore,
    /// The card is removed in the given direction.
    Remove(SwipeDirection),
}

/// Strategy converting pan phases into card poses and a removal decision.
///
/// Implementations own all transient gesture state. The owning card calls
/// the methods in gesture order and applies the returned poses; it never
/// inspects the accumulated drag directly except through [`translation`].
///
/// [`translation`]: Interaction::translation
pub trait Interaction: Send {
    /// A gesture started. Resets all accumulated drag state, including any
    /// state left over from an interrupted restore.
    fn begin(&mut self);

    /// The gesture moved by `delta` since the last event. Returns the pose
    /// to apply to the card.
    fn drag(&mut self, delta: Point, limits: &SwipeLimits) -> Pose;

    /// The gesture ended; decide removal or restore.
    fn finish(&mut self, limits: &SwipeLimits) -> PanOutcome;

    /// The gesture was cancelled or failed. Treated like a below-threshold
    /// end: the card restores.
    fn cancel(&mut self) -> PanOutcome;

    /// The card came to rest (restore finished, or the card was recycled).
    /// Clears transient state and returns to [`InteractionState::Idle`].
    fn settle(&mut self);

    /// Total drag translation accumulated since the gesture began.
    fn translation(&self) -> Point;

    /// Current lifecycle state.
    fn state(&self) -> InteractionState;
}

/// The default swipe interaction.
///
/// Accumulates the drag vector, tilts the card proportionally to horizontal
/// progress toward the removal threshold, and removes the card when the
/// gesture ends strictly beyond that threshold.
#[derive(Debug, Default)]
pub struct SwipeInteraction {
    accumulated: Point,
    state: InteractionState,
}

impl SwipeInteraction {
    /// Create an idle swipe interaction.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Interaction for SwipeInteraction {
    fn begin(&mut self) {
        self.accumulated = Point::ZERO;
        self.state = InteractionState::Dragging;
    }

    fn drag(&mut self, delta: Point, limits: &SwipeLimits) -> Pose {
        self.accumulated += delta;
        let ratio = if limits.max_remove_distance > 0.0 {
            (self.accumulated.x / limits.max_remove_distance).clamp(-1.0, 1.0)
        } else {
            self.accumulated.x.signum()
        };
        let angle = limits.max_angle * ratio;
        Pose::rotated_translation(angle, self.accumulated)
    }

    fn finish(&mut self, limits: &SwipeLimits) -> PanOutcome {
        // Strictly beyond the threshold; landing exactly on it restores.
        if self.accumulated.x.abs() > limits.max_remove_distance {
            self.state = InteractionState::Removing;
            let direction = if self.accumulated.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            PanOutcome::Remove(direction)
        } else {
            self.state = InteractionState::Restoring;
            PanOutcome::Restore
        }
    }

    fn cancel(&mut self) -> PanOutcome {
        self.state = InteractionState::Restoring;
        PanOutcome::Restore
    }

    fn settle(&mut self) {
        self.accumulated = Point::ZERO;
        self.state = InteractionState::Idle;
    }

    fn translation(&self) -> Point {
        self.accumulated
    }

    fn state(&self) -> InteractionState {
        self.state
    }
}
