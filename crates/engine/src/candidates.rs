//! Candidate anchors and the floor slide.
//!
//! Anchors are candidate lower-rear corners for the next placement. The
//! set starts at the container origin and grows by three corners per
//! committed placement: the top corner, the far-side corner and the
//! far-front corner.

use crate::feasibility::is_valid;
use crate::geometry::Aabb;
use crate::grid::SpatialGrid;
use nalgebra::Vector3;
use stowage_core::{ContainerSpec, Placement};

/// The growing set of candidate corners, kept sorted by (x, y, z).
#[derive(Debug, Clone)]
pub struct AnchorSet {
    anchors: Vec<Vector3<f64>>,
}

impl AnchorSet {
    /// Creates the initial anchor set: the container origin.
    pub fn new() -> Self {
        Self {
            anchors: vec![Vector3::zeros()],
        }
    }

    /// Number of live anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if no anchors remain.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Iterates anchors in (x, y, z) order.
    pub fn iter(&self) -> impl Iterator<Item = &Vector3<f64>> {
        self.anchors.iter()
    }

    /// Registers a committed placement: derives its three corners, then
    /// re-sorts and prunes the whole set against the committed boxes and
    /// the usable interior.
    pub fn commit(
        &mut self,
        placement: &Placement,
        container: &ContainerSpec,
        placements: &[Placement],
    ) {
        let p = placement.position;
        let e = placement.extent;
        self.anchors.push(Vector3::new(p.x, p.y + e.y, p.z));
        self.anchors.push(Vector3::new(p.x, p.y, p.z + e.z));
        self.anchors.push(Vector3::new(p.x + e.x, p.y, p.z));

        self.anchors.sort_by(|a, b| {
            a.x.total_cmp(&b.x)
                .then(a.y.total_cmp(&b.y))
                .then(a.z.total_cmp(&b.z))
        });
        self.anchors.dedup();

        let boxes: Vec<Aabb> = placements
            .iter()
            .map(|q| Aabb::from_position_extent(q.position, q.extent))
            .collect();
        self.anchors.retain(|a| {
            a.x < container.usable_length()
                && a.y < container.usable_height()
                && a.z < container.usable_width()
                && !boxes.iter().any(|b| b.contains_point(a))
        });
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Slides a feasible floor candidate toward smaller z in 1 cm steps while
/// it stays feasible.
///
/// Only floor placements slide; sliding a stacked candidate would
/// introduce overhangs behind the support check's back.
pub fn slide_floor_z(
    position: Vector3<f64>,
    extent: Vector3<f64>,
    unstackable: bool,
    container: &ContainerSpec,
    placements: &[Placement],
    grid: &SpatialGrid,
) -> Vector3<f64> {
    let mut slid = position;
    while slid.z >= 1.0 {
        let candidate = Vector3::new(slid.x, slid.y, slid.z - 1.0);
        if is_valid(candidate, extent, unstackable, container, placements, grid) {
            slid = candidate;
        } else {
            break;
        }
    }
    slid
}
