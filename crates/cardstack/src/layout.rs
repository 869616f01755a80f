//! Stack layout math.
//!
//! Pure functions computing where each visible layer of the card stack
//! rests: deeper layers shrink toward a minimum scale and shift down so the
//! stack appears to recede behind the front card.

use crate::animation::Pose;
use crate::config::StackConfig;
use crate::geometry::{Point, Rect};

/// Opacity of the deepest visible layer when depth fading is enabled.
pub const MIN_LAYER_ALPHA: f32 = 0.5;

/// Compute the resting pose of the layer at `depth`.
///
/// `depth` counts back from the front card: 0 is the interactive card
/// (identity pose), `visible_count - 1` is the deepest layer. Scale
/// decreases linearly per axis toward the minimum implied by the configured
/// spacing; the vertical offset is stored pre-divided by the layer's scale so
/// that the on-screen offset comes out to `2 * depth * interitem_spacing`.
///
/// With a single visible layer (or degenerate bounds) every depth rests at
/// the identity pose.
pub fn layer_pose(depth: usize, config: &StackConfig, bounds: Rect) -> Pose {
    let show_count = config.show_count();
    if show_count == 0 || bounds.size().is_empty() {
        return Pose::IDENTITY;
    }

    let show_count_f = show_count as f32;
    let min_w_scale =
        (bounds.width - 2.0 * config.line_spacing * show_count_f) / bounds.width;
    let min_h_scale =
        (bounds.height - 2.0 * config.interitem_spacing * show_count_f) / bounds.height;

    let depth_f = depth as f32;
    let scale_x = 1.0 - depth_f * (1.0 - min_w_scale) / show_count_f;
    let scale_y = 1.0 - depth_f * (1.0 - min_h_scale) / show_count_f;
    let translate_y = (config.interitem_spacing / scale_y) * 2.0 * depth_f;

    let alpha = if config.need_alpha {
        1.0 - depth_f * (1.0 - MIN_LAYER_ALPHA) / show_count_f
    } else {
        1.0
    };

    Pose {
        angle: 0.0,
        translation: Point::new(0.0, translate_y),
        scale_x,
        scale_y,
        alpha,
    }
}

/// The resting pose of a freshly inserted back card.
///
/// New cards join at the deepest layer placement so that the subsequent
/// layout pass animates them forward instead of popping them in.
pub fn initial_pose(config: &StackConfig, bounds: Rect) -> Pose {
    layer_pose(config.show_count(), config, bounds)
}

/// The frame shared by every card in the stack.
///
/// Full stack width; height leaves room for the receding layers peeking out
/// below.
pub fn card_frame(config: &StackConfig, bounds: Rect) -> Rect {
    let show_count = config.show_count() as f32;
    Rect::new(
        0.0,
        0.0,
        bounds.width,
        bounds.height - show_count * config.interitem_spacing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn config() -> StackConfig {
        StackConfig::for_surface(Size::new(400.0, 800.0))
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 600.0)
    }

    #[test]
    fn test_front_layer_is_identity_scale() {
        let pose = layer_pose(0, &config(), bounds());
        assert_eq!(pose.scale_x, 1.0);
        assert_eq!(pose.scale_y, 1.0);
        assert_eq!(pose.translation, Point::ZERO);
        assert_eq!(pose.alpha, 1.0);
    }

    #[test]
    fn test_scale_monotonically_non_increasing_with_depth() {
        for visible_count in 1..=5 {
            let config = config().with_visible_count(visible_count);
            let mut previous = (f32::INFINITY, f32::INFINITY);
            for depth in 0..visible_count {
                let pose = layer_pose(depth, &config, bounds());
                assert!(pose.scale_x <= previous.0);
                assert!(pose.scale_y <= previous.1);
                previous = (pose.scale_x, pose.scale_y);
            }
        }
    }

    #[test]
    fn test_deepest_layer_hits_min_scale() {
        let config = config(); // visible_count 3, show_count 2
        let pose = layer_pose(2, &config, bounds());
        // min_w_scale = (400 - 2*10*2) / 400 = 0.9
        assert!((pose.scale_x - 0.9).abs() < 1e-6);
        // min_h_scale = (600 - 2*10*2) / 600
        assert!((pose.scale_y - 560.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_effective_vertical_offset() {
        let config = config();
        let pose = layer_pose(1, &config, bounds());
        // The stored offset is pre-divided by the layer scale; applying the
        // pose lands the layer at exactly 2 * depth * interitem_spacing.
        let p = pose.to_transform().transform_point(Point::ZERO);
        assert!((p.y - 20.0).abs() < 1e-4);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn test_single_visible_card_degenerate() {
        let config = config().with_visible_count(1);
        let pose = layer_pose(0, &config, bounds());
        assert_eq!(pose, Pose::IDENTITY);
    }

    #[test]
    fn test_alpha_fades_with_depth() {
        let config = config();
        assert_eq!(layer_pose(0, &config, bounds()).alpha, 1.0);
        let mid = layer_pose(1, &config, bounds()).alpha;
        let deep = layer_pose(2, &config, bounds()).alpha;
        assert!(mid < 1.0);
        assert!(deep < mid);
        assert!((deep - MIN_LAYER_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_disabled() {
        let config = config().with_need_alpha(false);
        assert_eq!(layer_pose(2, &config, bounds()).alpha, 1.0);
    }

    #[test]
    fn test_initial_pose_is_deepest_layer() {
        let config = config();
        assert_eq!(
            initial_pose(&config, bounds()),
            layer_pose(2, &config, bounds())
        );
    }

    #[test]
    fn test_card_frame_leaves_room_for_back_layers() {
        let frame = card_frame(&config(), bounds());
        assert_eq!(frame, Rect::new(0.0, 0.0, 400.0, 580.0));
    }
}
