//! Stack configuration.

use crate::geometry::Size;

/// Default number of simultaneously visible card layers.
pub const DEFAULT_VISIBLE_COUNT: usize = 3;

/// Default horizontal inset per receding layer, in logical units.
pub const DEFAULT_LINE_SPACING: f32 = 10.0;

/// Default vertical offset per receding layer, in logical units.
pub const DEFAULT_INTERITEM_SPACING: f32 = 10.0;

/// Default maximum rotation of a dragged card, in degrees.
pub const DEFAULT_MAX_ANGLE: f32 = 15.0;

/// Configuration of a [`CardStackView`](crate::stack::CardStackView).
///
/// A config is staged with [`CardStackView::configure`] and becomes active at
/// the next `reload`; it never changes mid-session. Defaults are derived from
/// the rendering surface the stack lives on via [`StackConfig::for_surface`]
/// rather than from any global display state.
///
/// [`CardStackView::configure`]: crate::stack::CardStackView::configure
#[derive(Debug, Clone, PartialEq)]
pub struct StackConfig {
    /// How many card layers are kept instantiated and visible at once.
    /// Clamped to at least 1.
    pub visible_count: usize,
    /// Horizontal inset per receding layer; controls how much narrower each
    /// deeper layer appears.
    pub line_spacing: f32,
    /// Vertical offset per receding layer; controls how far each deeper
    /// layer peeks out below the one above.
    pub interitem_spacing: f32,
    /// Maximum rotation of a dragged card in degrees, reached when the drag
    /// distance hits `max_remove_distance`.
    pub max_angle: f32,
    /// Horizontal drag distance beyond which releasing the card removes it.
    /// Dragging exactly this far restores instead.
    pub max_remove_distance: f32,
    /// Whether receding layers fade toward [`MIN_LAYER_ALPHA`].
    ///
    /// [`MIN_LAYER_ALPHA`]: crate::layout::MIN_LAYER_ALPHA
    pub need_alpha: bool,
}

impl StackConfig {
    /// Build a configuration with defaults derived from the rendering
    /// surface size.
    ///
    /// The removal threshold defaults to a quarter of the surface width.
    pub fn for_surface(surface: Size) -> Self {
        Self {
            visible_count: DEFAULT_VISIBLE_COUNT,
            line_spacing: DEFAULT_LINE_SPACING,
            interitem_spacing: DEFAULT_INTERITEM_SPACING,
            max_angle: DEFAULT_MAX_ANGLE,
            max_remove_distance: surface.width / 4.0,
            need_alpha: true,
        }
    }

    /// Set the visible layer count (clamped to at least 1).
    pub fn with_visible_count(mut self, count: usize) -> Self {
        self.visible_count = count.max(1);
        self
    }

    /// Set the horizontal inset per receding layer.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the vertical offset per receding layer.
    pub fn with_interitem_spacing(mut self, spacing: f32) -> Self {
        self.interitem_spacing = spacing;
        self
    }

    /// Set the maximum drag rotation in degrees.
    pub fn with_max_angle(mut self, degrees: f32) -> Self {
        self.max_angle = degrees;
        self
    }

    /// Set the removal threshold distance.
    pub fn with_max_remove_distance(mut self, distance: f32) -> Self {
        self.max_remove_distance = distance;
        self
    }

    /// Enable or disable depth fading of receding layers.
    pub fn with_need_alpha(mut self, need_alpha: bool) -> Self {
        self.need_alpha = need_alpha;
        self
    }

    /// Number of receding layers behind the front card.
    #[inline]
    pub(crate) fn show_count(&self) -> usize {
        self.visible_count.saturating_sub(1)
    }
}
