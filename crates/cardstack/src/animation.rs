//! Card poses and pose animations.
//!
//! A [`Pose`] is the decomposed visual transform of one card layer: rotation,
//! translation, per-axis scale, and opacity. Poses are what the layout math
//! produces, what drag gestures mutate, and what animations interpolate; the
//! host turns them into whatever its compositor needs via
//! [`Pose::to_transform`].

use std::time::{Duration, Instant};

use crate::easing::{Easing, ease};
use crate::geometry::{Point, Transform2D};

/// The decomposed visual transform of a card layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Rotation in radians, applied about the card origin.
    pub angle: f32,
    /// Translation, measured in the rotated and scaled frame.
    pub translation: Point,
    /// Horizontal scale factor.
    pub scale_x: f32,
    /// Vertical scale factor.
    pub scale_y: f32,
    /// Opacity from 0.0 (transparent) to 1.0 (opaque).
    pub alpha: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The resting pose: no rotation, no translation, unit scale, opaque.
    pub const IDENTITY: Self = Self {
        angle: 0.0,
        translation: Point::ZERO,
        scale_x: 1.0,
        scale_y: 1.0,
        alpha: 1.0,
    };

    /// A pose that only rotates and translates (drag pose).
    pub fn rotated_translation(angle: f32, translation: Point) -> Self {
        Self {
            angle,
            translation,
            ..Self::IDENTITY
        }
    }

    /// Returns whether this is the resting pose.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Linearly interpolate between this pose and `to`.
    ///
    /// `t` is the progress from 0.0 (`self`) to 1.0 (`to`). Values outside
    /// that range extrapolate, which is what overshooting easings rely on.
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            angle: mix(self.angle, to.angle),
            translation: Point::new(
                mix(self.translation.x, to.translation.x),
                mix(self.translation.y, to.translation.y),
            ),
            scale_x: mix(self.scale_x, to.scale_x),
            scale_y: mix(self.scale_y, to.scale_y),
            alpha: mix(self.alpha, to.alpha),
        }
    }

    /// Build the affine transform for this pose.
    ///
    /// Composition order is rotation, then scale, then translation, with the
    /// later operations applied first to the point: the translation is
    /// expressed in the rotated and scaled frame. This matches the natural
    /// "tilt then slide" feel of a dragged card, and lets layout offsets be
    /// stored pre-divided by the layer scale.
    pub fn to_transform(&self) -> Transform2D {
        Transform2D::rotate(self.angle)
            .then(&Transform2D::scale_xy(self.scale_x, self.scale_y))
            .then(&Transform2D::translate(self.translation.x, self.translation.y))
    }
}

/// Shared timing state for a running animation.
#[derive(Debug, Clone)]
pub struct Timeline {
    easing: Easing,
    duration: Duration,
    started: Instant,
}

impl Timeline {
    /// Start a timeline now.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            easing,
            duration,
            started: Instant::now(),
        }
    }

    /// Current eased progress and whether the timeline has completed.
    ///
    /// A zero duration completes immediately with progress 1.0.
    pub fn progress(&self) -> (f32, bool) {
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (self.started.elapsed().as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        (ease(self.easing, raw), raw >= 1.0)
    }
}

/// An in-flight interpolation between two poses.
///
/// Pose animations are sampled by polling: the owner calls [`sample`]
/// (typically once per frame from a `tick`) and drops the animation once it
/// reports completion. Nothing blocks while an animation runs.
///
/// [`sample`]: PoseAnimation::sample
#[derive(Debug, Clone)]
pub struct PoseAnimation {
    from: Pose,
    to: Pose,
    timeline: Timeline,
}

impl PoseAnimation {
    /// Start animating from `from` to `to` over `duration`.
    pub fn new(from: Pose, to: Pose, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            timeline: Timeline::new(duration, easing),
        }
    }

    /// The pose this animation settles on.
    pub fn target(&self) -> Pose {
        self.to
    }

    /// Sample the current pose; the flag reports completion.
    ///
    /// On completion the returned pose is exactly the target.
    pub fn sample(&self) -> (Pose, bool) {
        let (t, finished) = self.timeline.progress();
        if finished {
            (self.to, true)
        } else {
            (self.from.lerp(&self.to, t), false)
        }
    }
}
