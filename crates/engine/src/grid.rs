//! Spatial bucket index along the loading axis.
//!
//! Packing clusters work by x (the container is loaded front-to-back), so
//! bucketing placements along the loading axis gives the best pruning per
//! unit of memory. A bucket typically carries 5-30 items and a candidate
//! query touches 1-3 buckets.

use std::collections::HashSet;
use stowage_core::constants::GRID_SIZE;

/// Append-only bucket index over placement ids.
///
/// Ids are indices into the owning container's placement list; they are
/// unique within one container, which is all the duplicate filtering
/// relies on. Placements are never moved or removed once committed.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    buckets: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid covering a container of the given length.
    pub fn new(container_length: f64) -> Self {
        let count = (container_length / GRID_SIZE).ceil().max(1.0) as usize;
        Self {
            buckets: vec![Vec::new(); count],
        }
    }

    fn bucket_of(&self, x: f64) -> usize {
        ((x.max(0.0) / GRID_SIZE) as usize).min(self.buckets.len() - 1)
    }

    /// Inserts a placement id into every bucket its x-extent crosses.
    pub fn insert(&mut self, id: usize, x_min: f64, x_max: f64) {
        if x_max <= x_min {
            return;
        }
        let lo = self.bucket_of(x_min);
        let hi = ((x_max / GRID_SIZE).ceil() as usize)
            .saturating_sub(1)
            .clamp(lo, self.buckets.len() - 1);
        for bucket in &mut self.buckets[lo..=hi] {
            bucket.push(id);
        }
    }

    /// Returns the ids of placements whose buckets touch the half-open
    /// x-range `[x_lo, x_hi)`, each id at most once.
    pub fn query(&self, x_lo: f64, x_hi: f64) -> Vec<usize> {
        if x_hi <= x_lo {
            return Vec::new();
        }
        let lo = self.bucket_of(x_lo);
        let hi = ((x_hi / GRID_SIZE).ceil() as usize)
            .saturating_sub(1)
            .clamp(lo, self.buckets.len() - 1);

        let mut seen: HashSet<usize> = HashSet::new();
        let mut ids = Vec::new();
        for bucket in &self.buckets[lo..=hi] {
            for &id in bucket {
                if seen.insert(id) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_spans_buckets() {
        let mut grid = SpatialGrid::new(580.0);

        // Crosses buckets 0 and 1.
        grid.insert(0, 30.0, 70.0);
        assert_eq!(grid.query(0.0, 50.0), vec![0]);
        assert_eq!(grid.query(50.0, 100.0), vec![0]);
        assert_eq!(grid.query(100.0, 150.0), Vec::<usize>::new());
    }

    #[test]
    fn test_extent_ending_on_boundary_stays_in_bucket() {
        let mut grid = SpatialGrid::new(580.0);

        // [0, 50) crosses bucket 0 only.
        grid.insert(0, 0.0, 50.0);
        assert_eq!(grid.query(50.0, 100.0), Vec::<usize>::new());
        assert_eq!(grid.query(0.0, 50.0), vec![0]);
    }

    #[test]
    fn test_query_deduplicates_across_buckets() {
        let mut grid = SpatialGrid::new(580.0);

        grid.insert(7, 10.0, 160.0);
        let ids = grid.query(0.0, 200.0);
        assert_eq!(ids, vec![7]);
    }

    #[test]
    fn test_query_clamps_to_container() {
        let mut grid = SpatialGrid::new(580.0);

        grid.insert(0, 560.0, 578.0);
        // Query past the wall still finds the last bucket.
        assert_eq!(grid.query(550.0, 900.0), vec![0]);
        // Empty range.
        assert_eq!(grid.query(100.0, 100.0), Vec::<usize>::new());
    }

    #[test]
    fn test_multiple_ids_keep_first_seen_order() {
        let mut grid = SpatialGrid::new(580.0);

        grid.insert(0, 0.0, 40.0);
        grid.insert(1, 45.0, 95.0);
        grid.insert(2, 10.0, 30.0);

        assert_eq!(grid.query(0.0, 100.0), vec![0, 1, 2]);
    }
}
