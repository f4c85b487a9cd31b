//! Shipment planning across containers.
//!
//! The planner expands the cargo manifest into a flat unit pool, sorts it
//! (stackable before unstackable, large bases first), and feeds the pool
//! through the single-container packer under the configured strategy,
//! piping residuals forward. `SmartMix` decides each container by
//! comparative simulation. Progress is reported once per container
//! decision; cancellation is cooperative and never an error.

use crate::packer::{ContainerOutcome, ContainerPacker};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use stowage_core::{
    expand_units, CargoSpec, CargoUnit, Config, ContainerType, Error, PackResult,
    ProgressCallback, ProgressInfo, Result, Shipment, Strategy,
};

/// Two near-equal base areas sort as a tie below this difference (cm²).
const SORT_BASE_EPSILON: f64 = 50.0;

/// Two near-equal spec quantities sort as a tie below this difference.
const SORT_QTY_EPSILON: usize = 10;

/// Volume margin (m³) by which a 40HQ simulation must beat a 40GP one to
/// justify the taller box at equal item counts.
const HQ_VOLUME_MARGIN_M3: f64 = 2.0;

/// Plans a shipment for a cargo manifest.
pub struct ShipmentPlanner {
    config: Config,
    cancelled: Arc<AtomicBool>,
}

impl ShipmentPlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a planner with the default configuration (`SmartMix`).
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Requests cooperative cancellation of an in-flight plan.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Plans the shipment.
    pub fn plan(&self, specs: &[CargoSpec]) -> Result<Shipment> {
        self.plan_inner(specs, None)
    }

    /// Plans the shipment, reporting progress between container
    /// decisions.
    pub fn plan_with_progress(
        &self,
        specs: &[CargoSpec],
        callback: ProgressCallback,
    ) -> Result<Shipment> {
        self.plan_inner(specs, Some(&callback))
    }

    fn plan_inner(
        &self,
        specs: &[CargoSpec],
        callback: Option<&ProgressCallback>,
    ) -> Result<Shipment> {
        let mut units = expand_units(specs)?;

        if let Strategy::Plan(sequence) = &self.config.strategy {
            if sequence.is_empty() && !units.is_empty() {
                return Err(Error::ConfigError(
                    "empty container plan with cargo remaining".into(),
                ));
            }
        }

        self.cancelled.store(false, Ordering::Relaxed);
        sort_units(&mut units, specs);
        let total = units.len();

        let mut shipment = Shipment::new();
        match self.config.strategy.clone() {
            Strategy::SmartMix => self.run_smart_mix(units, total, callback, &mut shipment),
            Strategy::Uniform(container) => {
                self.run_uniform(container, units, total, callback, &mut shipment)
            }
            Strategy::Plan(sequence) => {
                self.run_sequence(&sequence, units, total, callback, &mut shipment)
            }
        }

        self.report(
            callback,
            ProgressInfo::new()
                .with_phase("Complete")
                .with_containers(shipment.containers_used())
                .with_items(shipment.placed_count(), total)
                .finished(),
        );

        Ok(shipment)
    }

    fn run_uniform(
        &self,
        container: ContainerType,
        mut units: Vec<CargoUnit>,
        total: usize,
        callback: Option<&ProgressCallback>,
        shipment: &mut Shipment,
    ) {
        while !units.is_empty() {
            if self.is_cancelled() {
                shipment.cancelled = true;
                break;
            }

            self.report_phase(
                callback,
                format!(
                    "Packing container {} ({})",
                    shipment.containers_used() + 1,
                    container
                ),
                shipment,
                total,
            );

            let outcome = self.packer(container).pack(
                &units,
                shipment.containers_used(),
                &self.cancelled,
            );
            let placed = outcome.result.placed_count();
            shipment.results.push(outcome.result);
            units = outcome.residual;

            if outcome.cancelled {
                shipment.cancelled = true;
                break;
            }
            if placed == 0 {
                log::warn!(
                    "container {} accepted no cargo; {} unit(s) remain unplaced",
                    container,
                    units.len()
                );
                break;
            }
        }

        attach_residual(shipment, units, container);
    }

    fn run_sequence(
        &self,
        sequence: &[ContainerType],
        mut units: Vec<CargoUnit>,
        total: usize,
        callback: Option<&ProgressCallback>,
        shipment: &mut Shipment,
    ) {
        for &container in sequence {
            if units.is_empty() {
                break;
            }
            if self.is_cancelled() {
                shipment.cancelled = true;
                break;
            }

            self.report_phase(
                callback,
                format!(
                    "Packing container {} ({})",
                    shipment.containers_used() + 1,
                    container
                ),
                shipment,
                total,
            );

            let outcome = self.packer(container).pack(
                &units,
                shipment.containers_used(),
                &self.cancelled,
            );
            shipment.results.push(outcome.result);
            units = outcome.residual;

            if outcome.cancelled {
                shipment.cancelled = true;
                break;
            }
        }

        let fallback = sequence.last().copied().unwrap_or(ContainerType::Gp20);
        attach_residual(shipment, units, fallback);
    }

    fn run_smart_mix(
        &self,
        mut units: Vec<CargoUnit>,
        total: usize,
        callback: Option<&ProgressCallback>,
        shipment: &mut Shipment,
    ) {
        let mut last_attempt = ContainerType::Gp20;

        while !units.is_empty() {
            if self.is_cancelled() {
                shipment.cancelled = true;
                break;
            }

            self.report_phase(
                callback,
                "Simulating container candidates",
                shipment,
                total,
            );

            let Some((container, outcome)) = self.choose_container(&units, shipment) else {
                // Cancelled mid-simulation; nothing was committed this
                // round.
                shipment.cancelled = true;
                break;
            };
            last_attempt = container;

            self.report_phase(
                callback,
                format!(
                    "Packing container {} ({})",
                    shipment.containers_used() + 1,
                    container
                ),
                shipment,
                total,
            );

            let placed = outcome.result.placed_count();
            shipment.results.push(outcome.result);
            units = outcome.residual;

            if placed == 0 {
                log::warn!(
                    "no container type accepted any cargo; {} unit(s) remain unplaced",
                    units.len()
                );
                break;
            }
        }

        attach_residual(shipment, units, last_attempt);
    }

    /// Picks the container type for the next `SmartMix` iteration.
    ///
    /// A 20GP that swallows the whole residual wins outright. Otherwise
    /// extra-tall cargo forces a 40HQ; failing that, 40GP and 40HQ are
    /// both simulated and the high cube must earn its keep: strictly more
    /// items, or a completed manifest, or two cubic metres of extra
    /// volume at an equal count.
    fn choose_container(
        &self,
        units: &[CargoUnit],
        shipment: &Shipment,
    ) -> Option<(ContainerType, ContainerOutcome)> {
        let index = shipment.containers_used();

        let small = self
            .packer(ContainerType::Gp20)
            .pack(units, index, &self.cancelled);
        if small.cancelled {
            return None;
        }
        if small.residual.is_empty() {
            return Some((ContainerType::Gp20, small));
        }

        let gp40_headroom = ContainerType::Gp40.spec().usable_height();
        let has_extra_tall = units.iter().any(|u| u.extent.y > gp40_headroom);
        if has_extra_tall {
            let high = self
                .packer(ContainerType::Hq40)
                .pack(units, index, &self.cancelled);
            if high.cancelled {
                return None;
            }
            return Some((ContainerType::Hq40, high));
        }

        let standard = self
            .packer(ContainerType::Gp40)
            .pack(units, index, &self.cancelled);
        if standard.cancelled {
            return None;
        }
        let high = self
            .packer(ContainerType::Hq40)
            .pack(units, index, &self.cancelled);
        if high.cancelled {
            return None;
        }

        let high_count = high.result.placed_count();
        let standard_count = standard.result.placed_count();
        let prefer_high = high_count > standard_count
            || (high_count == standard_count
                && (high.residual.is_empty() && !standard.residual.is_empty()
                    || high.result.used_volume_m3
                        >= standard.result.used_volume_m3 + HQ_VOLUME_MARGIN_M3));

        if prefer_high {
            Some((ContainerType::Hq40, high))
        } else {
            Some((ContainerType::Gp40, standard))
        }
    }

    fn packer(&self, container: ContainerType) -> ContainerPacker {
        ContainerPacker::new(container).with_yield_interval(self.config.yield_interval)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn report_phase(
        &self,
        callback: Option<&ProgressCallback>,
        phase: impl Into<String>,
        shipment: &Shipment,
        total: usize,
    ) {
        self.report(
            callback,
            ProgressInfo::new()
                .with_phase(phase)
                .with_containers(shipment.containers_used())
                .with_items(shipment.placed_count(), total),
        );
    }

    fn report(&self, callback: Option<&ProgressCallback>, info: ProgressInfo) {
        if let Some(cb) = callback {
            cb(info);
        }
    }
}

/// Routes leftover units onto the last pack result, opening an empty
/// carrier result when nothing was committed at all.
fn attach_residual(shipment: &mut Shipment, residual: Vec<CargoUnit>, fallback: ContainerType) {
    if residual.is_empty() {
        return;
    }
    if shipment.results.is_empty() {
        shipment.results.push(PackResult::new(fallback));
    }
    if let Some(last) = shipment.results.last_mut() {
        last.unplaced = residual;
    }
}

/// Pre-sort of the unit pool.
///
/// Stackable before unstackable, then base area descending (near-equal
/// bases tie), then spec quantity descending (near-equal quantities tie),
/// then weight descending. The sort is stable, so ties preserve manifest
/// order.
fn sort_units(units: &mut [CargoUnit], specs: &[CargoSpec]) {
    let quantities: HashMap<&str, usize> = specs
        .iter()
        .map(|s| (s.id.as_str(), s.quantity))
        .collect();

    let base_bucket = |u: &CargoUnit| (u.base_area() / SORT_BASE_EPSILON).floor() as i64;
    let qty_bucket = |u: &CargoUnit| {
        quantities.get(u.spec_id.as_str()).copied().unwrap_or(1) / SORT_QTY_EPSILON.max(1)
    };

    units.sort_by(|a, b| {
        a.unstackable
            .cmp(&b.unstackable)
            .then_with(|| base_bucket(b).cmp(&base_bucket(a)))
            .then_with(|| qty_bucket(b).cmp(&qty_bucket(a)))
            .then_with(|| b.weight.total_cmp(&a.weight))
    });
}
