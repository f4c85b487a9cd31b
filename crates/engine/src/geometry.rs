//! Axis-aligned geometry primitives.

use nalgebra::Vector3;

/// Overlap length of two 1-D intervals.
pub fn axis_overlap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    (a_max.min(b_max) - a_min.max(b_min)).max(0.0)
}

/// Shared footprint area of two boxes in the (x, z) plane.
pub fn footprint_overlap(
    a_pos: &Vector3<f64>,
    a_ext: &Vector3<f64>,
    b_pos: &Vector3<f64>,
    b_ext: &Vector3<f64>,
) -> f64 {
    axis_overlap(a_pos.x, a_pos.x + a_ext.x, b_pos.x, b_pos.x + b_ext.x)
        * axis_overlap(a_pos.z, a_pos.z + a_ext.z, b_pos.z, b_pos.z + b_ext.z)
}

/// Axis-aligned box given by its minimum corner and maximum corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Maximum corner.
    pub max: Vector3<f64>,
}

impl Aabb {
    /// Creates a new AABB.
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from a minimum corner and axis extents.
    pub fn from_position_extent(position: Vector3<f64>, extent: Vector3<f64>) -> Self {
        Self {
            min: position,
            max: position + extent,
        }
    }

    /// Interior intersection test. Boxes are open: two items sharing a
    /// face do not overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Strict interior containment of a point.
    pub fn contains_point(&self, point: &Vector3<f64>) -> bool {
        point.x > self.min.x
            && point.x < self.max.x
            && point.y > self.min.y
            && point.y < self.max.y
            && point.z > self.min.z
            && point.z < self.max.z
    }

    /// Expands the box by a margin on all sides.
    pub fn expand(&self, margin: f64) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Volume of the box.
    pub fn volume(&self) -> f64 {
        let d = self.max - self.min;
        d.x * d.y * d.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_overlap() {
        assert_relative_eq!(axis_overlap(0.0, 10.0, 5.0, 15.0), 5.0);
        assert_relative_eq!(axis_overlap(0.0, 10.0, 10.0, 20.0), 0.0);
        assert_relative_eq!(axis_overlap(0.0, 10.0, 20.0, 30.0), 0.0);
        assert_relative_eq!(axis_overlap(0.0, 10.0, 2.0, 8.0), 6.0);
    }

    #[test]
    fn test_footprint_overlap() {
        let a_pos = Vector3::new(0.0, 0.0, 0.0);
        let a_ext = Vector3::new(100.0, 50.0, 80.0);
        let b_pos = Vector3::new(50.0, 0.0, 40.0);
        let b_ext = Vector3::new(100.0, 50.0, 80.0);

        // 50 along x, 40 along z; y plays no part.
        assert_relative_eq!(footprint_overlap(&a_pos, &a_ext, &b_pos, &b_ext), 2000.0);
    }

    #[test]
    fn test_aabb_intersects_is_strict() {
        let a = Aabb::from_position_extent(Vector3::zeros(), Vector3::new(10.0, 10.0, 10.0));
        let b = Aabb::from_position_extent(
            Vector3::new(5.0, 5.0, 5.0),
            Vector3::new(10.0, 10.0, 10.0),
        );
        let touching = Aabb::from_position_extent(
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(10.0, 10.0, 10.0),
        );

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Shared face only.
        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let a = Aabb::from_position_extent(Vector3::zeros(), Vector3::new(10.0, 10.0, 10.0));

        assert!(a.contains_point(&Vector3::new(5.0, 5.0, 5.0)));
        // Corners and faces are not interior.
        assert!(!a.contains_point(&Vector3::zeros()));
        assert!(!a.contains_point(&Vector3::new(10.0, 5.0, 5.0)));
        assert!(!a.contains_point(&Vector3::new(20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_expand() {
        let a = Aabb::from_position_extent(
            Vector3::new(5.0, 5.0, 5.0),
            Vector3::new(10.0, 10.0, 10.0),
        );
        let e = a.expand(1.0);

        assert_relative_eq!(e.min.x, 4.0);
        assert_relative_eq!(e.max.z, 16.0);
        assert_relative_eq!(a.volume(), 1000.0);
    }
}
