//! Bounding boxes and the two overlap tests
//!
//! Asteroid placement uses an exact box overlap check. Anything in flight
//! collides as the circle inscribed in its box. The two tests are not
//! interchangeable.

use glam::Vec2;

/// Axis-aligned bounding box, stored as center + full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    /// Radius of the circle used by [`proximity_hit`]
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.size.x.min(self.size.y) / 2.0
    }
}

/// Anything with a bounding box on the playfield
pub trait HasBounds {
    fn bounds(&self) -> Bounds;
}

impl HasBounds for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Axis-aligned box overlap. Boxes that only touch along an edge do not overlap.
///
/// Used when placing asteroids, never for combat.
pub fn overlaps(a: &impl HasBounds, b: &impl HasBounds) -> bool {
    let (a, b) = (a.bounds(), b.bounds());
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Circular hit test used for every in-flight collision.
///
/// Each box becomes a circle of radius `min(w, h) / 2` at its center; the two
/// hit when their centers are closer than the sum of the radii.
pub fn proximity_hit(a: &impl HasBounds, b: &impl HasBounds) -> bool {
    let (a, b) = (a.bounds(), b.bounds());
    a.center.distance(b.center) < a.hit_radius() + b.hit_radius()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(x: f32, y: f32, size: f32) -> Bounds {
        Bounds::new(Vec2::new(x, y), Vec2::splat(size))
    }

    #[test]
    fn test_overlaps_detects_intersection() {
        assert!(overlaps(&square(100.0, 100.0, 70.0), &square(150.0, 120.0, 70.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Right edge of the first at x=135, left edge of the second at x=135
        assert!(!overlaps(&square(100.0, 100.0, 70.0), &square(170.0, 100.0, 70.0)));
    }

    #[test]
    fn test_overlaps_separated_on_one_axis() {
        assert!(!overlaps(&square(100.0, 100.0, 70.0), &square(110.0, 300.0, 70.0)));
    }

    #[test]
    fn test_proximity_uses_inscribed_circle() {
        // Box corners overlap but the inscribed circles (r=35) have centers ~89 apart
        let a = square(0.0, 0.0, 70.0);
        let b = square(63.0, 63.0, 70.0);
        assert!(overlaps(&a, &b));
        assert!(!proximity_hit(&a, &b));
    }

    #[test]
    fn test_proximity_radius_from_shorter_side() {
        // 80x100 ship -> radius 40; 40x40 shot -> radius 20
        let ship = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(80.0, 100.0));
        let shot = square(0.0, 59.0, 40.0);
        assert!(proximity_hit(&ship, &shot));
        let shot = square(0.0, 60.0, 40.0);
        assert!(!proximity_hit(&ship, &shot));
    }

    proptest! {
        #[test]
        fn prop_proximity_hit_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..300.0, ah in 1.0f32..300.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..300.0, bh in 1.0f32..300.0,
        ) {
            let a = Bounds::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Bounds::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(proximity_hit(&a, &b), proximity_hit(&b, &a));
        }

        #[test]
        fn prop_overlaps_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, asz in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bsz in 1.0f32..200.0,
        ) {
            let a = square(ax, ay, asz);
            let b = square(bx, by, bsz);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }
}
