//! Composite placement scoring.
//!
//! Every feasible (unit, anchor, orientation) triple gets a score; lower
//! is better. Terms are expressed in consistent units (roughly
//! centimetres) so they compare across candidates. Tie-breaking falls to
//! the packer's stable iteration order.

use crate::feasibility::support_profile;
use crate::geometry::{axis_overlap, Aabb};
use crate::grid::SpatialGrid;
use nalgebra::Vector3;
use stowage_core::constants::{
    ADHESION_BONUS, FLUSH_BONUS, LARGEST_SUPPORTER_RATIO, SCORE_SUPPORT_RATIO, SUPPORT_TOLERANCE,
    Z_ZONE_SIZE,
};
use stowage_core::{CargoUnit, ContainerSpec, Placement};

/// Neighbours within this distance count as touching.
const PROXIMITY: f64 = 1.0;

/// Top surfaces within this distance count as flush.
const FLUSH_TOLERANCE: f64 = 0.5;

/// Airspace above an unstackable item beyond which it counts as buried.
const TOP_GAP_LIMIT: f64 = 40.0;

/// Vertical slack below this is too small to matter.
const DEAD_GAP: f64 = 5.0;

/// Tolerance when matching a candidate's top against a cap slot height.
const PLATFORM_TOLERANCE: f64 = 5.0;

/// Shared inputs for scoring one packing pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    /// Container being filled.
    pub container: &'a ContainerSpec,
    /// Placements committed so far.
    pub placements: &'a [Placement],
    /// Spatial index over `placements`.
    pub grid: &'a SpatialGrid,
    /// Distinct heights of unstackable units still awaiting placement.
    pub unstackable_heights: &'a [f64],
}

/// Scores a feasible candidate at its final (post-slide) position.
pub fn score(
    unit: &CargoUnit,
    position: Vector3<f64>,
    extent: Vector3<f64>,
    ctx: &ScoreContext<'_>,
) -> f64 {
    let container = ctx.container;

    // Place deep, low, and to one side.
    let mut score = 10_000.0 * position.x + 10.0 * position.y + position.z;

    let top = position.y + extent.y;
    let top_gap = container.height - top;

    if unit.unstackable {
        // Top-only strategy: reward near-ceiling slots, strongly
        // discourage burying a cap item under unused airspace. The
        // stackable-first sort guarantees the columns exist first.
        if top_gap > TOP_GAP_LIMIT {
            score += 1_000_000.0;
        } else {
            score -= 500_000.0;
        }
    } else {
        // Fill the rear half first.
        if position.x < container.length / 2.0 {
            score -= 5_000.0;
        }

        // Terraced stacking: flat layers in the back, low fronts.
        let zone = (position.z / Z_ZONE_SIZE).floor();
        score += zone * position.y * 50.0;

        if position.y > SUPPORT_TOLERANCE {
            let profile = support_profile(position, extent, ctx.placements, ctx.grid);
            let base = extent.x * extent.z;
            if profile.area < SCORE_SUPPORT_RATIO * base {
                score += 500_000.0;
            }
            if profile.largest < LARGEST_SUPPORTER_RATIO * base {
                score += 200_000.0;
            }
        }

        // Platform preparation: the candidate's top forms a perfect slot
        // for some remaining cap item.
        if ctx
            .unstackable_heights
            .iter()
            .any(|&h| (top - (container.height - h)).abs() <= PLATFORM_TOLERANCE)
        {
            score -= 20_000.0;
        }

        // Kill-zone: vertical slack too small for any remaining cap item
        // yet large enough to waste.
        if let Some(min_cap) = ctx
            .unstackable_heights
            .iter()
            .copied()
            .min_by(f64::total_cmp)
        {
            if top_gap > DEAD_GAP && top_gap < min_cap {
                score += 100_000.0;
            }
        }
    }

    let (adhesion, flush) = neighbour_bonuses(unit, position, extent, ctx);
    if adhesion {
        score -= ADHESION_BONUS;
    }
    if flush {
        score -= FLUSH_BONUS;
    }

    score
}

/// Detects a touching neighbour (grouping adhesion) and a flush top with
/// a lateral neighbour.
///
/// At ground level adhesion requires a neighbour of the same cargo spec
/// (strict clustering); above the base any touching neighbour counts,
/// since stability and density outweigh purity there.
fn neighbour_bonuses(
    unit: &CargoUnit,
    position: Vector3<f64>,
    extent: Vector3<f64>,
    ctx: &ScoreContext<'_>,
) -> (bool, bool) {
    let reach = Aabb::from_position_extent(position, extent).expand(PROXIMITY);
    let top = position.y + extent.y;
    let grounded = position.y < SUPPORT_TOLERANCE;

    let mut adhesion = false;
    let mut flush = false;

    for id in ctx
        .grid
        .query(position.x - PROXIMITY, position.x + extent.x + PROXIMITY)
    {
        let p = &ctx.placements[id];

        if !adhesion
            && reach.intersects(&Aabb::from_position_extent(p.position, p.extent))
            && (!grounded || p.spec_id == unit.spec_id)
        {
            adhesion = true;
        }

        if !flush && (p.top() - top).abs() <= FLUSH_TOLERANCE {
            let x_touch = axis_overlap(
                position.x - PROXIMITY,
                position.x + extent.x + PROXIMITY,
                p.position.x,
                p.position.x + p.extent.x,
            ) > 0.0;
            let z_touch = axis_overlap(
                position.z - PROXIMITY,
                position.z + extent.z + PROXIMITY,
                p.position.z,
                p.position.z + p.extent.z,
            ) > 0.0;
            if x_touch && z_touch {
                flush = true;
            }
        }

        if adhesion && flush {
            break;
        }
    }

    (adhesion, flush)
}
