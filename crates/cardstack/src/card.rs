//! The card: one visual, interactive unit of the deck.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::animation::{Pose, PoseAnimation};
use crate::content::CardContent;
use crate::easing::Easing;
use crate::events::{GestureState, PanEvent, SwipeDirection};
use crate::geometry::{Point, Rect, Transform2D};
use crate::interaction::{Interaction, InteractionState, PanOutcome, SwipeInteraction, SwipeLimits};

/// How long a below-threshold card takes to spring back to rest.
pub const DEFAULT_RESTORE_DURATION: Duration = Duration::from_millis(500);

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a card instance.
///
/// Assigned once at construction and kept across recycling: the same pooled
/// instance reports the same id through every reuse. Signals carry `CardId`s
/// so observers can correlate callbacks without borrowing the card itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(u64);

impl CardId {
    fn next() -> Self {
        Self(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a card did in response to a pan phase.
///
/// The owning stack interprets these; cards never reach back into their
/// owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEvent {
    /// Nothing observable happened.
    Ignored,
    /// The card moved to the given accumulated drag translation.
    Moved(Point),
    /// The card started animating back to rest.
    RestoreStarted,
    /// The card crossed the removal threshold and must be removed.
    RemovalStarted(SwipeDirection),
}

/// A static capture of a card's appearance at the moment of removal.
///
/// The live card is detached and recycled immediately; the snapshot is what
/// keeps flying off screen. Rendering is the host's job, so the snapshot
/// carries placement, not pixels.
#[derive(Debug, Clone)]
pub struct CardSnapshot {
    /// Identity of the card the snapshot was taken from.
    pub id: CardId,
    /// The card's reuse identifier.
    pub identifier: String,
    /// The card's frame at capture time.
    pub frame: Rect,
    /// The card's pose at capture time.
    pub pose: Pose,
}

/// One visual, interactive unit representing a single logical item.
///
/// Cards are owned exclusively by their stack, living either in the visible
/// window or in the reuse pool. Each card owns the [`Interaction`] strategy
/// that interprets its pan gestures.
pub struct Card {
    id: CardId,
    identifier: String,
    index: Option<usize>,
    content: CardContent,
    frame: Rect,
    pose: Pose,
    interaction: Box<dyn Interaction>,
    restore_animation: Option<PoseAnimation>,
    layout_animation: Option<PoseAnimation>,
}

impl Card {
    /// Create a card with the default [`SwipeInteraction`].
    pub fn new(identifier: &str) -> Self {
        Self::with_interaction(identifier, Box::new(SwipeInteraction::new()))
    }

    /// Create a card with a custom interaction strategy.
    pub fn with_interaction(identifier: &str, interaction: Box<dyn Interaction>) -> Self {
        Self {
            id: CardId::next(),
            identifier: identifier.to_string(),
            index: None,
            content: CardContent::None,
            frame: Rect::default(),
            pose: Pose::IDENTITY,
            interaction,
            restore_animation: None,
            layout_animation: None,
        }
    }

    /// Stable identity of this instance.
    #[inline]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The reuse identifier this card pools under.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Logical index of the item this card currently displays.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The card's display content.
    #[inline]
    pub fn content(&self) -> &CardContent {
        &self.content
    }

    /// The card's frame within the stack bounds.
    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The card's current visual pose.
    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The affine transform for the current pose.
    #[inline]
    pub fn transform(&self) -> Transform2D {
        self.pose.to_transform()
    }

    /// The card's current opacity.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.pose.alpha
    }

    /// Current state of the card's gesture interaction.
    #[inline]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Whether any pose animation is in flight.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.restore_animation.is_some() || self.layout_animation.is_some()
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub(crate) fn set_content(&mut self, content: CardContent) {
        self.content = content;
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub(crate) fn set_pose(&mut self, pose: Pose) {
        self.layout_animation = None;
        self.pose = pose;
    }

    /// Route one pan phase to the interaction strategy.
    ///
    /// The delta in `event` is consumed here exactly once; callers must not
    /// replay events.
    pub(crate) fn handle_pan(
        &mut self,
        event: &PanEvent,
        limits: &SwipeLimits,
        restore_duration: Duration,
    ) -> CardEvent {
        match event.state {
            GestureState::Started => {
                // A fresh grab supersedes any in-flight restore or layout
                // animation; snap to its target before accumulating again.
                self.interrupt_animations();
                self.interaction.begin();
                CardEvent::Ignored
            }
            GestureState::Updated => {
                self.pose = self.interaction.drag(event.delta, limits);
                CardEvent::Moved(self.interaction.translation())
            }
            GestureState::Ended => match self.interaction.finish(limits) {
                PanOutcome::Remove(direction) => CardEvent::RemovalStarted(direction),
                PanOutcome::Restore => {
                    self.start_restore(restore_duration);
                    CardEvent::RestoreStarted
                }
            },
            GestureState::Cancelled => {
                self.interaction.cancel();
                self.start_restore(restore_duration);
                CardEvent::RestoreStarted
            }
        }
    }

    /// Begin the removal exit sequence, gesture-driven or programmatic.
    ///
    /// Captures the card's appearance for the fly-away and resets the live
    /// card to rest so it can be recycled immediately.
    pub(crate) fn begin_removal(&mut self) -> CardSnapshot {
        let snapshot = CardSnapshot {
            id: self.id,
            identifier: self.identifier.clone(),
            frame: self.frame,
            pose: self.pose,
        };
        self.restore_animation = None;
        self.layout_animation = None;
        self.pose = Pose::IDENTITY;
        snapshot
    }

    /// Animate toward a new layout pose.
    pub(crate) fn animate_to(&mut self, target: Pose, duration: Duration, easing: Easing) {
        self.layout_animation = Some(PoseAnimation::new(self.pose, target, duration, easing));
    }

    /// Advance in-flight animations; returns whether any is still running.
    pub(crate) fn tick(&mut self) -> bool {
        let mut animating = false;

        if let Some(animation) = &self.layout_animation {
            let (pose, finished) = animation.sample();
            self.pose = pose;
            if finished {
                self.layout_animation = None;
            } else {
                animating = true;
            }
        }

        if let Some(animation) = &self.restore_animation {
            let (pose, finished) = animation.sample();
            self.pose = pose;
            if finished {
                self.restore_animation = None;
                self.interaction.settle();
            } else {
                animating = true;
            }
        }

        animating
    }

    /// Reset visual and gesture state for the reuse pool.
    pub(crate) fn prepare_for_reuse(&mut self) {
        self.restore_animation = None;
        self.layout_animation = None;
        self.pose = Pose::IDENTITY;
        self.index = None;
        self.content = CardContent::None;
        self.interaction.settle();
    }

    fn start_restore(&mut self, duration: Duration) {
        self.restore_animation = Some(PoseAnimation::new(
            self.pose,
            Pose::IDENTITY,
            duration,
            Easing::EaseOutBack,
        ));
    }

    fn interrupt_animations(&mut self) {
        if let Some(animation) = self.layout_animation.take() {
            self.pose = animation.target();
        }
        if let Some(animation) = self.restore_animation.take() {
            self.pose = animation.target();
            self.interaction.settle();
        }
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("id", &self.id)
            .field("identifier", &self.identifier)
            .field("index", &self.index)
            .field("pose", &self.pose)
            .field("interaction_state", &self.interaction.state())
            .finish()
    }
}
