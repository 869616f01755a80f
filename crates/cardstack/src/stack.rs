//! The card stack view: visible window, recycling, and removal lifecycle.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use cardstack_core::Signal;

use crate::animation::Timeline;
use crate::card::{Card, CardEvent, CardId, CardSnapshot};
use crate::config::StackConfig;
use crate::easing::{Easing, lerp_eased};
use crate::error::Result;
use crate::events::{PanEvent, SwipeDirection};
use crate::geometry::{Point, Rect};
use crate::interaction::SwipeLimits;
use crate::layout;
use crate::pool::CardPool;
use crate::source::CardDataSource;

/// Duration of layout transitions and fly-away animations.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(250);

/// The departing snapshot of a removed card.
///
/// Removal is two-phase: the live card detaches and recycles instantly while
/// its snapshot keeps sliding off screen. The host renders active fly-aways
/// above the stack each frame, reading the snapshot's placement and the
/// animated [`center_x`](FlyAway::center_x).
#[derive(Debug)]
pub struct FlyAway {
    snapshot: CardSnapshot,
    direction: SwipeDirection,
    from_center_x: f32,
    to_center_x: f32,
    timeline: Timeline,
}

impl FlyAway {
    fn new(
        snapshot: CardSnapshot,
        direction: SwipeDirection,
        to_center_x: f32,
        duration: Duration,
    ) -> Self {
        let from_center_x = snapshot.frame.center().x + snapshot.pose.translation.x;
        Self {
            snapshot,
            direction,
            from_center_x,
            to_center_x,
            timeline: Timeline::new(duration, Easing::EaseInOut),
        }
    }

    /// The captured appearance of the removed card.
    pub fn snapshot(&self) -> &CardSnapshot {
        &self.snapshot
    }

    /// Which way the card is leaving.
    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    /// The snapshot's current horizontal center.
    pub fn center_x(&self) -> f32 {
        let (t, _) = self.timeline.progress();
        lerp_eased(Easing::Linear, self.from_center_x, self.to_center_x, t)
    }

    /// The horizontal center the snapshot settles on, off screen.
    pub fn target_center_x(&self) -> f32 {
        self.to_center_x
    }

    fn is_finished(&self) -> bool {
        self.timeline.progress().1
    }
}

/// A swipeable stack of overlapping cards.
///
/// The view keeps at most `visible_count` cards instantiated (the visible
/// window), recycles removed cards through a [`CardPool`], and replenishes
/// the back of the window from its [`CardDataSource`] as the front is swiped
/// away.
///
/// # Host contract
///
/// The view is headless and single-threaded. Each frame the host:
///
/// 1. forwards pan phases on the front card via [`handle_pan`] and taps via
///    [`handle_tap`],
/// 2. calls [`tick`] to advance animations (keep scheduling frames while it
///    returns `true`),
/// 3. paints the deepest layer first (iterate [`cards`] in reverse) using
///    each card's pose, then paints [`fly_aways`] above everything.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cardstack::card::Card;
/// use cardstack::geometry::Rect;
/// use cardstack::source::StaticDeck;
/// use cardstack::stack::CardStackView;
///
/// let deck = StaticDeck::from_texts(["a", "b", "c"]);
/// let mut stack = CardStackView::new(Rect::new(0.0, 0.0, 400.0, 600.0))
///     .with_data_source(Arc::new(deck));
/// stack.register("card", Card::new);
///
/// stack.removed.connect(|(_, index)| {
///     println!("removed card at index {index}");
/// });
///
/// stack.reload(false).unwrap();
/// assert_eq!(stack.len(), 3);
/// ```
///
/// [`handle_pan`]: CardStackView::handle_pan
/// [`handle_tap`]: CardStackView::handle_tap
/// [`tick`]: CardStackView::tick
/// [`cards`]: CardStackView::cards
/// [`fly_aways`]: CardStackView::fly_aways
pub struct CardStackView {
    bounds: Rect,
    /// Configuration staged by `configure`; copied into `config` at reload.
    staged_config: StackConfig,
    /// The configuration in effect since the last reload.
    config: StackConfig,
    data_source: Option<Arc<dyn CardDataSource>>,
    pool: CardPool,
    /// Visible cards, front (interactive) to back (deepest layer).
    window: VecDeque<Card>,
    /// Highest logical index ever instantiated since the last reload.
    visible_max_index: usize,
    /// Completed swipe-removals since the last reload or window exhaustion.
    move_count: usize,
    fly_aways: Vec<FlyAway>,
    animation_duration: Duration,
    restore_duration: Duration,

    /// Emitted after a card is removed and recycled. Args: (card, logical
    /// index of the removed item).
    pub removed: Signal<(CardId, usize)>,
    /// Emitted when the removal of the last remaining card empties the
    /// window for good.
    pub removed_last: Signal<CardId>,
    /// Emitted by layout passes for the back-most card. Args: (card, logical
    /// index).
    pub finished_displaying: Signal<(CardId, usize)>,
    /// Emitted while the front card is dragged. Args: (card, accumulated
    /// drag translation).
    pub moved: Signal<(CardId, Point)>,
    /// Emitted when the front card is tapped. Args: logical index.
    pub selected: Signal<usize>,
}

impl CardStackView {
    /// Create a stack occupying `bounds`, with defaults derived from that
    /// surface (removal threshold = a quarter of the width).
    pub fn new(bounds: Rect) -> Self {
        let config = StackConfig::for_surface(bounds.size());
        Self {
            bounds,
            staged_config: config.clone(),
            config,
            data_source: None,
            pool: CardPool::new(),
            window: VecDeque::new(),
            visible_max_index: 0,
            move_count: 0,
            fly_aways: Vec::new(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            restore_duration: crate::card::DEFAULT_RESTORE_DURATION,
            removed: Signal::new(),
            removed_last: Signal::new(),
            finished_displaying: Signal::new(),
            moved: Signal::new(),
            selected: Signal::new(),
        }
    }

    /// Builder-style data source assignment.
    pub fn with_data_source(mut self, source: Arc<dyn CardDataSource>) -> Self {
        self.data_source = Some(source);
        self
    }

    /// Set the data source. Takes effect at the next [`reload`].
    ///
    /// [`reload`]: CardStackView::reload
    pub fn set_data_source(&mut self, source: Arc<dyn CardDataSource>) {
        self.data_source = Some(source);
    }

    /// Stage a configuration; it becomes active at the next [`reload`].
    ///
    /// [`reload`]: CardStackView::reload
    pub fn configure(&mut self, config: StackConfig) {
        self.staged_config = config;
    }

    /// The configuration currently in effect.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Register a card factory for a reuse identifier.
    pub fn register<F>(&mut self, identifier: &str, factory: F)
    where
        F: Fn(&str) -> Card + Send + Sync + 'static,
    {
        self.pool.register(identifier, factory);
    }

    /// Rebuild the visible window from the data source.
    ///
    /// Activates the staged configuration, resets the move counter, drops
    /// all pooled and visible cards, then instantiates cards for the first
    /// `min(count, visible_count)` items and lays them out.
    ///
    /// # Errors
    ///
    /// [`UnregisteredIdentifier`](crate::error::CardStackError) if the data
    /// source names an identifier no factory was registered for.
    pub fn reload(&mut self, animated: bool) -> Result<()> {
        self.config = self.staged_config.clone();
        self.move_count = 0;
        self.visible_max_index = 0;
        self.pool.clear();
        self.window.clear();
        self.fly_aways.clear();

        let count = self.data_source.as_ref().map_or(0, |source| source.count());
        let show_number = count.min(self.config.visible_count);
        tracing::debug!(
            target: "cardstack::stack",
            count,
            show_number,
            animated,
            "reloading card stack"
        );
        for index in 0..show_number {
            self.create_card(index)?;
        }
        self.update_layout(animated);
        Ok(())
    }

    /// Remove the front card as if it had been swiped in `direction`.
    ///
    /// A no-op when the window is empty.
    pub fn remove_top(&mut self, direction: SwipeDirection) -> Result<()> {
        if self.window.is_empty() {
            tracing::trace!(target: "cardstack::stack", "remove_top ignored: empty window");
            return Ok(());
        }
        self.remove_front_card(direction)
    }

    /// Route a pan phase to the front card.
    ///
    /// Gesture ownership is exclusive: only the front card is ever
    /// interactive, so there is nothing to route when the window is empty.
    pub fn handle_pan(&mut self, event: PanEvent) -> Result<()> {
        let limits = SwipeLimits::from_config(&self.config);
        let restore_duration = self.restore_duration;

        let (card_event, id) = match self.window.front_mut() {
            Some(card) => (card.handle_pan(&event, &limits, restore_duration), card.id()),
            None => {
                tracing::trace!(target: "cardstack::stack", "pan ignored: empty window");
                return Ok(());
            }
        };

        match card_event {
            CardEvent::Ignored | CardEvent::RestoreStarted => {}
            CardEvent::Moved(point) => self.moved.emit((id, point)),
            CardEvent::RemovalStarted(direction) => self.remove_front_card(direction)?,
        }
        Ok(())
    }

    /// Report a tap on the front card, emitting [`selected`].
    ///
    /// A no-op when the window is empty.
    ///
    /// [`selected`]: CardStackView::selected
    pub fn handle_tap(&mut self) {
        if let Some(index) = self.window.front().and_then(Card::index) {
            self.selected.emit(index);
        }
    }

    /// Recompute and apply the resting pose of every visible card,
    /// front-to-back, then emit [`finished_displaying`] for the back-most
    /// card.
    ///
    /// [`finished_displaying`]: CardStackView::finished_displaying
    pub fn update_layout(&mut self, animated: bool) {
        if self.window.is_empty() {
            return;
        }
        let config = self.config.clone();
        let bounds = self.bounds;
        let duration = self.animation_duration;

        for (depth, card) in self.window.iter_mut().enumerate() {
            let target = layout::layer_pose(depth, &config, bounds);
            if animated {
                card.animate_to(target, duration, Easing::EaseInOut);
            } else {
                card.set_pose(target);
            }
        }

        if let Some(back) = self.window.back() {
            self.finished_displaying
                .emit((back.id(), self.visible_max_index));
        }
    }

    /// Advance all in-flight animations (layout, restore, fly-away).
    ///
    /// Returns `true` while anything is still animating; the host keeps
    /// scheduling frames until it returns `false`.
    pub fn tick(&mut self) -> bool {
        let mut animating = false;
        for card in &mut self.window {
            animating |= card.tick();
        }

        let before = self.fly_aways.len();
        self.fly_aways.retain(|fly_away| !fly_away.is_finished());
        if self.fly_aways.len() != before {
            tracing::trace!(
                target: "cardstack::stack",
                discarded = before - self.fly_aways.len(),
                "fly-away snapshot discarded"
            );
        }

        animating || !self.fly_aways.is_empty()
    }

    /// The logical index a visible card currently displays.
    ///
    /// Computed from the card's position in the window; `None` for cards not
    /// in the window (e.g. pooled instances).
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        let position = self.window.iter().position(|card| card.id() == id)?;
        Some(self.visible_max_index + 1 + position - self.window.len())
    }

    /// The logical index of the front (interactive) card, or `None` when the
    /// window is empty.
    pub fn current_top_index(&self) -> Option<usize> {
        self.window.front().and_then(Card::index)
    }

    /// Visible cards, front (interactive) to back (deepest layer).
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.window.iter()
    }

    /// Look up a visible card by identity.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.window.iter().find(|card| card.id() == id)
    }

    /// Active fly-away snapshots, oldest first.
    pub fn fly_aways(&self) -> &[FlyAway] {
        &self.fly_aways
    }

    /// Number of currently visible cards.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether the visible window is empty.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Completed swipe-removals since the last reload (reset when the deck
    /// empties).
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// The stack's bounds on the rendering surface.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set the duration of layout and fly-away animations.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Set the duration of the below-threshold restore animation.
    pub fn set_restore_duration(&mut self, duration: Duration) {
        self.restore_duration = duration;
    }

    /// Instantiate the card for `index` and append it at the back of the
    /// window, resting at the deepest layer pose.
    fn create_card(&mut self, index: usize) -> Result<()> {
        let Some(source) = self.data_source.clone() else {
            return Ok(());
        };
        let identifier = source.reuse_identifier(index);
        let mut card = self.pool.acquire(&identifier, index)?;
        card.set_content(source.content(index));
        card.set_frame(layout::card_frame(&self.config, self.bounds));
        card.set_pose(layout::initial_pose(&self.config, self.bounds));
        tracing::debug!(
            target: "cardstack::stack",
            id = ?card.id(),
            index,
            identifier,
            "card joined window"
        );
        self.window.push_back(card);
        self.visible_max_index = index;
        Ok(())
    }

    /// The two-phase removal sequence: snapshot and detach the front card
    /// now, recycle it, replenish the window, and let the snapshot fly away
    /// on its own time.
    fn remove_front_card(&mut self, direction: SwipeDirection) -> Result<()> {
        let Some(mut card) = self.window.pop_front() else {
            return Ok(());
        };
        tracing::debug!(
            target: "cardstack::stack",
            id = ?card.id(),
            index = ?card.index(),
            ?direction,
            "card will detach"
        );

        let snapshot = card.begin_removal();
        let to_center_x =
            self.bounds.width / 2.0 + direction.sign() * snapshot.frame.width * 1.5;
        self.fly_aways.push(FlyAway::new(
            snapshot,
            direction,
            to_center_x,
            self.animation_duration,
        ));

        self.move_count += 1;
        let index = self.visible_max_index - self.window.len();
        let id = card.id();
        self.pool.release(card);
        tracing::debug!(
            target: "cardstack::stack",
            id = ?id,
            index,
            move_count = self.move_count,
            "card removed"
        );
        self.removed.emit((id, index));

        if self.window.is_empty() {
            self.move_count = 0;
            tracing::debug!(target: "cardstack::stack", "deck exhausted");
            self.removed_last.emit(id);
            return Ok(());
        }

        let count = self.data_source.as_ref().map_or(0, |source| source.count());
        if self.visible_max_index + 1 < count {
            self.create_card(self.visible_max_index + 1)?;
        }
        self.update_layout(true);
        Ok(())
    }
}

impl std::fmt::Debug for CardStackView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStackView")
            .field("bounds", &self.bounds)
            .field("config", &self.config)
            .field("window", &self.window)
            .field("visible_max_index", &self.visible_max_index)
            .field("move_count", &self.move_count)
            .field("fly_aways", &self.fly_aways.len())
            .finish()
    }
}
