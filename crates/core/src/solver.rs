//! Strategy selection, planner configuration, and the progress surface.

use crate::container::ContainerType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Container selection strategy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Choose the container type per iteration by comparative simulation.
    #[default]
    SmartMix,
    /// Repeatedly pack containers of a single type.
    Uniform(ContainerType),
    /// Pack an explicit container sequence, piping residuals forward.
    Plan(Vec<ContainerType>),
}

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Container selection strategy.
    pub strategy: Strategy,

    /// Committed placements between cooperative yield points.
    pub yield_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            yield_interval: 5,
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container selection strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the cooperative yield interval.
    pub fn with_yield_interval(mut self, interval: usize) -> Self {
        self.yield_interval = interval.max(1);
        self
    }
}

/// Progress callback for long-running plans.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information, reported once per container decision.
#[derive(Debug, Clone, Default)]
pub struct ProgressInfo {
    /// Human-readable stage description.
    pub phase: String,
    /// Containers committed so far.
    pub containers_committed: usize,
    /// Units placed so far.
    pub items_placed: usize,
    /// Total units in the manifest.
    pub total_items: usize,
    /// Whether planning is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates a running progress info.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the phase description.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Sets the container counter.
    pub fn with_containers(mut self, committed: usize) -> Self {
        self.containers_committed = committed;
        self
    }

    /// Sets the placed/total counters.
    pub fn with_items(mut self, placed: usize, total: usize) -> Self {
        self.items_placed = placed;
        self.total_items = total;
        self
    }

    /// Marks planning as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_strategy(Strategy::Uniform(ContainerType::Hq40))
            .with_yield_interval(3);

        assert_eq!(config.strategy, Strategy::Uniform(ContainerType::Hq40));
        assert_eq!(config.yield_interval, 3);
    }

    #[test]
    fn test_yield_interval_floor() {
        let config = Config::new().with_yield_interval(0);
        assert_eq!(config.yield_interval, 1);
    }

    #[test]
    fn test_progress_info_builder() {
        let info = ProgressInfo::new()
            .with_phase("Packing container 1 (40HQ)")
            .with_containers(1)
            .with_items(12, 40);

        assert!(info.running);
        assert_eq!(info.phase, "Packing container 1 (40HQ)");
        assert_eq!(info.items_placed, 12);

        let done = info.finished();
        assert!(!done.running);
    }
}
