//! Placement feasibility checks.
//!
//! [`is_valid`] composes the boundary, non-overlap, forklift-access,
//! support-fraction and unstackable-top predicates, cheapest first,
//! returning false on the first failure. Door admission is a per-spec
//! predicate tested before anchor enumeration and lives on
//! [`ContainerSpec::door_admits`].

use crate::access::has_forklift_access;
use crate::geometry::{footprint_overlap, Aabb};
use crate::grid::SpatialGrid;
use nalgebra::Vector3;
use stowage_core::constants::{SUPPORT_RATIO, SUPPORT_TOLERANCE};
use stowage_core::{ContainerSpec, Placement};

const EPS: f64 = 1e-9;

/// Aggregate support under a candidate's footprint.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportProfile {
    /// Sum of supporting contact areas in cm².
    pub area: f64,
    /// Footprint area of the largest single supporter in cm².
    pub largest: f64,
    /// Whether any supporter is marked unstackable.
    pub unstackable_support: bool,
}

/// Collects the support provided by placements whose top surface carries
/// the candidate's base.
pub fn support_profile(
    position: Vector3<f64>,
    extent: Vector3<f64>,
    placements: &[Placement],
    grid: &SpatialGrid,
) -> SupportProfile {
    let mut profile = SupportProfile::default();

    for id in grid.query(position.x, position.x + extent.x) {
        let p = &placements[id];
        if (p.top() - position.y).abs() > SUPPORT_TOLERANCE {
            continue;
        }
        let contact = footprint_overlap(&position, &extent, &p.position, &p.extent);
        if contact <= 0.0 {
            continue;
        }
        profile.area += contact;
        profile.largest = profile.largest.max(p.base_area());
        profile.unstackable_support |= p.unstackable;
    }

    profile
}

/// Whether a unit with the given oriented extents may be committed at
/// `position`.
pub fn is_valid(
    position: Vector3<f64>,
    extent: Vector3<f64>,
    unstackable: bool,
    container: &ContainerSpec,
    placements: &[Placement],
    grid: &SpatialGrid,
) -> bool {
    // Boundary, including the overhead lift margin.
    if position.x < 0.0 || position.y < 0.0 || position.z < 0.0 {
        return false;
    }
    if position.x + extent.x > container.usable_length() + EPS
        || position.z + extent.z > container.usable_width() + EPS
        || position.y + extent.y > container.usable_height() + EPS
    {
        return false;
    }

    // Non-overlap against everything sharing the candidate's x-range.
    let candidate = Aabb::from_position_extent(position, extent);
    for id in grid.query(position.x, position.x + extent.x) {
        let p = &placements[id];
        if candidate.intersects(&Aabb::from_position_extent(p.position, p.extent)) {
            return false;
        }
    }

    // A placement nobody can reach is not a placement.
    if !has_forklift_access(position, extent, container, placements, grid) {
        return false;
    }

    // Support, for anything above the floor.
    if position.y > SUPPORT_TOLERANCE {
        let profile = support_profile(position, extent, placements, grid);
        if profile.unstackable_support {
            return false;
        }
        if profile.area + EPS < SUPPORT_RATIO * (extent.x * extent.z) {
            return false;
        }
    }

    // An unstackable unit may not slide in underneath anything already
    // committed.
    if unstackable {
        let top = position.y + extent.y;
        for id in grid.query(position.x, position.x + extent.x) {
            let p = &placements[id];
            if (p.position.y - top).abs() <= SUPPORT_TOLERANCE
                && footprint_overlap(&position, &extent, &p.position, &p.extent) > 0.0
            {
                return false;
            }
        }
    }

    true
}
