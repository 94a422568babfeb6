//! Axis-aligned box overlap with shrink correction.
//!
//! [`box_overlap`] insets both boxes by a fraction of their own size before
//! running the separating-axis test, so grazing contacts do not register.

use glam::Vec2;

/// Shrink factor for player bullets against enemies.
pub const BULLET_SHRINK: f32 = 0.7;
/// Shrink factor for hazards against the player.
pub const PLAYER_SHRINK: f32 = 0.8;

/// Inset a (min, max) box so it keeps `shrink` of its width and height,
/// centred on the original box.
pub fn shrink_box(min: Vec2, max: Vec2, shrink: f32) -> (Vec2, Vec2) {
    let inset = (max - min) * ((1.0 - shrink) * 0.5);
    (min + inset, max - inset)
}

/// Returns true when box A and box B overlap after both are shrunk by `shrink`.
///
/// Edges that touch count as overlapping.
pub fn box_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2, shrink: f32) -> bool {
    let (a_min, a_max) = shrink_box(a_min, a_max, shrink);
    let (b_min, b_max) = shrink_box(b_min, b_max, shrink);
    !(a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_shrink_box_keeps_center() {
        let (min, max) = shrink_box(Vec2::ZERO, Vec2::new(10.0, 20.0), 0.5);
        assert!(approx_eq(min.x, 2.5));
        assert!(approx_eq(max.x, 7.5));
        assert!(approx_eq(min.y, 5.0));
        assert!(approx_eq(max.y, 15.0));
    }

    #[test]
    fn test_overlap_without_shrink() {
        assert!(box_overlap(
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::splat(0.5),
            Vec2::splat(1.5),
            1.0
        ));
    }

    #[test]
    fn test_disjoint_boxes_never_overlap() {
        assert!(!box_overlap(
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 1.0),
            1.0
        ));
    }

    #[test]
    fn test_shrink_removes_marginal_overlap() {
        // raw rectangles overlap by 0.1 on x
        let (a_min, a_max) = (Vec2::ZERO, Vec2::ONE);
        let (b_min, b_max) = (Vec2::new(0.9, 0.0), Vec2::new(1.9, 1.0));
        assert!(box_overlap(a_min, a_max, b_min, b_max, 1.0));
        assert!(!box_overlap(a_min, a_max, b_min, b_max, 0.5));
    }

    #[test]
    fn test_touching_edges_overlap() {
        assert!(box_overlap(
            Vec2::ZERO,
            Vec2::ONE,
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 1.0),
            1.0
        ));
    }
}
