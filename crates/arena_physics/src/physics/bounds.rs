//! Axis-aligned bounding box stored as center + size

use crate::foundation::math::constants::EPSILON;
use crate::foundation::math::{Axis, Vector};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// Only the center and the full size are stored; min, max and extents are
/// derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Center point in world space
    pub center: Vector,
    /// Full edge lengths along each axis
    pub size: Vector,
}

impl Bounds {
    /// Create bounds from a center and full size
    pub fn new(center: Vector, size: Vector) -> Self {
        Self { center, size }
    }

    /// Create bounds spanning two corners
    pub fn from_min_max(min: Vector, max: Vector) -> Self {
        Self {
            center: (min + max) * 0.5,
            size: max - min,
        }
    }

    /// Half of the size
    pub fn extents(&self) -> Vector {
        self.size * 0.5
    }

    /// Minimum corner
    pub fn min(&self) -> Vector {
        self.center - self.extents()
    }

    /// Maximum corner
    pub fn max(&self) -> Vector {
        self.center + self.extents()
    }

    /// Move the box
    pub fn set_center(&mut self, center: Vector) {
        self.center = center;
    }

    /// Resize the box around its center
    pub fn set_size(&mut self, size: Vector) {
        self.size = size;
    }

    /// Point containment, inclusive on all six faces
    pub fn contains(&self, point: Vector) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x &&
        point.y >= min.y && point.y <= max.y &&
        point.z >= min.z && point.z <= max.z
    }

    /// Inclusive per-axis interval overlap
    pub fn intersects(&self, other: &Bounds) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && a_max.x >= b_min.x &&
        a_min.y <= b_max.y && a_max.y >= b_min.y &&
        a_min.z <= b_max.z && a_max.z >= b_min.z
    }

    /// Closest point inside the box to `point` (per-axis clamp)
    pub fn closest_point(&self, point: Vector) -> Vector {
        let (min, max) = (self.min(), self.max());
        Vector::new(
            point.x.clamp(min.x, max.x),
            point.y.clamp(min.y, max.y),
            point.z.clamp(min.z, max.z),
        )
    }

    /// Overlap depth along `axis` between this box and a box of half-size
    /// `other_extent` centered at `other_center`. Negative when separated.
    pub fn penetration(&self, other_center: Vector, other_extent: f32, axis: Axis) -> f32 {
        let reach = self.extents().component(axis) + other_extent;
        reach - (other_center.component(axis) - self.center.component(axis)).abs()
    }

    /// Slab test: parameter interval `[t_enter, t_exit]` over which
    /// `origin + t * direction` is inside the box, or `None` when the
    /// interval is empty.
    pub fn slab_interval(&self, origin: Vector, direction: Vector) -> Option<(f32, f32)> {
        let (min, max) = (self.min(), self.max());
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let o = origin.component(axis);
            let d = direction.component(axis);
            let (lo, hi) = (min.component(axis), max.component(axis));

            if d.abs() < EPSILON {
                // Parallel to this slab: either always inside it or never
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t1, t2) = ((lo - o) * inv, (hi - o) * inv);
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));

            if t_enter > t_exit {
                return None;
            }
        }

        Some((t_enter, t_exit))
    }

    /// Ray test using the slab method.
    ///
    /// Returns the entry distance along `direction`, or 0 when the origin is
    /// already inside the box.
    pub fn intersect_ray(&self, origin: Vector, direction: Vector) -> Option<f32> {
        let (t_enter, t_exit) = self.slab_interval(origin, direction)?;
        if t_exit < 0.0 {
            return None;
        }
        Some(t_enter.max(0.0))
    }

    /// First point where the segment `start..end` touches the box
    pub fn intersect_segment(&self, start: Vector, end: Vector) -> Option<Vector> {
        let delta = end - start;
        let (t_enter, t_exit) = self.slab_interval(start, delta)?;
        let t_enter = t_enter.max(0.0);
        let t_exit = t_exit.min(1.0);
        if t_enter > t_exit {
            return None;
        }
        Some(start + delta * t_enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Bounds {
        Bounds::new(Vector::ZERO, Vector::splat(2.0))
    }

    #[test]
    fn test_derived_corners() {
        let b = Bounds::new(Vector::new(1.0, 2.0, 3.0), Vector::new(2.0, 4.0, 6.0));
        assert_eq!(b.min(), Vector::new(0.0, 0.0, 0.0));
        assert_eq!(b.max(), Vector::new(2.0, 4.0, 6.0));
        assert_eq!(b.extents(), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(Bounds::from_min_max(b.min(), b.max()), b);
    }

    #[test]
    fn test_contains_is_inclusive_on_faces() {
        let b = unit_box();
        assert!(b.contains(Vector::new(1.0, 0.0, 0.0)));
        assert!(b.contains(Vector::new(0.0, -1.0, 0.0)));
        assert!(b.contains(Vector::new(1.0, 1.0, 1.0)));
        assert!(!b.contains(Vector::new(1.0001, 0.0, 0.0)));
    }

    #[test]
    fn test_intersects_is_symmetric_and_inclusive() {
        let a = unit_box();
        let touching = Bounds::new(Vector::new(2.0, 0.0, 0.0), Vector::splat(2.0));
        let apart = Bounds::new(Vector::new(2.5, 0.0, 0.0), Vector::splat(2.0));
        let diagonal = Bounds::new(Vector::new(1.5, 1.5, -1.5), Vector::splat(2.0));

        for other in [touching, apart, diagonal] {
            assert_eq!(a.intersects(&other), other.intersects(&a));
        }
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
        assert!(a.intersects(&diagonal));
    }

    #[test]
    fn test_closest_point_clamps() {
        let b = unit_box();
        assert_eq!(b.closest_point(Vector::new(5.0, 0.5, -3.0)), Vector::new(1.0, 0.5, -1.0));
        assert_eq!(b.closest_point(Vector::new(0.2, 0.3, 0.4)), Vector::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_ray_slab() {
        let b = unit_box();
        let t = b.intersect_ray(Vector::new(0.0, 0.0, -5.0), Vector::UNIT_Z).unwrap();
        assert_relative_eq!(t, 4.0, epsilon = 1e-6);

        assert!(b.intersect_ray(Vector::new(0.0, 0.0, -5.0), -Vector::UNIT_Z).is_none());
        assert!(b.intersect_ray(Vector::new(3.0, 0.0, -5.0), Vector::UNIT_Z).is_none());
        assert_eq!(b.intersect_ray(Vector::ZERO, Vector::UNIT_X), Some(0.0));
    }

    #[test]
    fn test_segment_hits_top_face() {
        let b = unit_box();
        let hit = b.intersect_segment(Vector::new(0.0, 5.0, 0.0), Vector::new(0.0, -5.0, 0.0)).unwrap();
        assert_relative_eq!(hit, Vector::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_segment_too_short() {
        let b = unit_box();
        assert!(b.intersect_segment(Vector::new(0.0, 5.0, 0.0), Vector::new(0.0, 2.0, 0.0)).is_none());
    }

    #[test]
    fn test_penetration_per_axis() {
        let wall = Bounds::new(Vector::ZERO, Vector::new(2.0, 4.0, 10.0));
        let pen_x = wall.penetration(Vector::new(1.5, 0.0, 0.0), 1.0, Axis::X);
        let pen_z = wall.penetration(Vector::new(1.5, 0.0, 0.0), 1.0, Axis::Z);
        assert_relative_eq!(pen_x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(pen_z, 6.0, epsilon = 1e-6);
    }
}
