//! Telescope state and the two-phase scan protocol.
//!
//! Starting a scan charges energy and takes the telescope lock. Resolution is a
//! separate command delivered later by the scheduler; it reads the request back
//! from the live telescope rather than from anything captured at start time.

use carbon_quest_core::{ScanError, ScanMode, ScanRequest, SectorCoord};
use serde::{Deserialize, Serialize};

use crate::{
    random::RandomSource,
    rules::ScanRules,
    sectors::{clamp_density, Sector, MAX_DENSITY},
    World,
};

/// Scan progress reported once a scan resolves.
pub const SCAN_COMPLETE: u32 = 100;

/// Singleton scanning apparatus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Telescope {
    /// Radius of the scannable area.
    pub range: u32,
    /// Scan precision in percent.
    pub accuracy: u32,
    /// Energy shaved off every scan by the energy optimizer.
    pub energy_discount: u32,
    /// Scan in flight; `Some` doubles as the global scanning lock.
    pub active_scan: Option<ScanRequest>,
    /// Coordinate of the most recent scan request.
    pub scan_target: SectorCoord,
    /// Cosmetic progress indicator in percent.
    pub scan_progress: u32,
}

impl Telescope {
    pub(crate) fn commissioned(rules: &ScanRules) -> Self {
        Self {
            range: rules.starting_range,
            accuracy: rules.starting_accuracy,
            energy_discount: 0,
            active_scan: None,
            scan_target: SectorCoord::ORIGIN,
            scan_progress: 0,
        }
    }

    /// Reports whether a scan is in flight.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.active_scan.is_some()
    }

    /// Effective accuracy, as a fraction, for a sector at `distance` from the origin.
    #[must_use]
    pub fn effective_accuracy(&self, distance: f64, rules: &ScanRules) -> f64 {
        let base = f64::from(self.accuracy) / 100.0;
        (base - distance * rules.accuracy_falloff).max(rules.accuracy_floor)
    }

    /// Effective accuracy of a sweep reading a deposit `depth` levels down.
    ///
    /// Buried deposits read noisier on top of the distance falloff.
    #[must_use]
    pub fn sweep_accuracy(&self, distance: f64, depth: u32, rules: &ScanRules) -> f64 {
        let buried = f64::from(depth) * rules.depth_penalty;
        (self.effective_accuracy(distance, rules) - buried).max(rules.accuracy_floor)
    }

    pub(crate) fn normalise(&mut self, rules: &ScanRules) {
        self.accuracy = self.accuracy.min(100);
        self.energy_discount = self.energy_discount.min(rules.max_discount);
        self.scan_progress = self.scan_progress.min(SCAN_COMPLETE);
    }
}

/// Applies measurement noise to a true density.
///
/// `noise_draw` is a uniform draw from `[-0.5, 0.5)`; the spread shrinks as the
/// effective accuracy rises.
#[must_use]
pub fn measured_density(actual: f64, accuracy: f64, noise_draw: f64) -> f64 {
    let spread = MAX_DENSITY - accuracy * MAX_DENSITY;
    clamp_density(actual + noise_draw * spread)
}

impl World {
    /// Energy a scan started through `mode` would cost right now.
    pub(crate) fn scan_cost(&self, mode: ScanMode) -> u32 {
        let base = match mode {
            ScanMode::Sector => self.rules.scanning.sector_cost,
            ScanMode::Sweep => self.rules.scanning.sweep_cost,
        };
        base.saturating_sub(self.telescope.energy_discount)
    }

    /// Charges energy and takes the telescope lock. Returns the energy spent.
    pub(crate) fn start_scan(&mut self, request: ScanRequest) -> Result<u32, ScanError> {
        if self.telescope.is_scanning() {
            return Err(ScanError::TelescopeBusy);
        }

        let distance = request.target.chebyshev_from_origin();
        if distance > self.telescope.range {
            return Err(ScanError::OutOfRange {
                distance,
                range: self.telescope.range,
            });
        }

        if request.mode == ScanMode::Sector
            && self
                .sectors
                .get(&request.target)
                .is_some_and(|sector| sector.mining)
        {
            return Err(ScanError::SectorBusy);
        }

        let cost = self.scan_cost(request.mode);
        if self.energy < cost {
            return Err(ScanError::InsufficientEnergy {
                required: cost,
                available: self.energy,
            });
        }

        self.energy -= cost;
        self.telescope.active_scan = Some(request);
        self.telescope.scan_target = request.target;
        self.telescope.scan_progress = 0;
        Ok(cost)
    }

    /// Resolves the scan currently in flight, if any.
    pub(crate) fn resolve_scan(
        &mut self,
        rng: &mut dyn RandomSource,
    ) -> Option<(ScanRequest, Vec<SectorCoord>)> {
        let request = self.telescope.active_scan.take()?;
        let revealed = match request.mode {
            ScanMode::Sector => {
                self.read_single_sector(request.target, rng);
                vec![request.target]
            }
            ScanMode::Sweep => self.read_sweep(request.target, rng),
        };
        self.telescope.scan_progress = SCAN_COMPLETE;
        Some((request, revealed))
    }

    /// Resets the cosmetic progress indicator once no scan is running.
    pub(crate) fn clear_scan_progress(&mut self) -> bool {
        if self.telescope.is_scanning() || self.telescope.scan_progress == 0 {
            return false;
        }
        self.telescope.scan_progress = 0;
        true
    }

    fn read_single_sector(&mut self, coord: SectorCoord, rng: &mut dyn RandomSource) {
        let distance = f64::from(coord.chebyshev_from_origin());
        let accuracy = self
            .telescope
            .effective_accuracy(distance, &self.rules.scanning);
        let actual = rng.uniform(0.0, MAX_DENSITY);
        let measured = measured_density(actual, accuracy, rng.uniform(-0.5, 0.5));
        let depth = rng.int_inclusive(1, self.rules.generation.max_depth.max(1));
        self.write_reading(coord, measured, depth);
    }

    fn read_sweep(&mut self, center: SectorCoord, rng: &mut dyn RandomSource) -> Vec<SectorCoord> {
        let radius = self.telescope.range;
        let reach = i32::try_from(radius).unwrap_or(i32::MAX);
        let mut revealed = Vec::new();

        for x in center.x().saturating_sub(reach)..=center.x().saturating_add(reach) {
            for y in center.y().saturating_sub(reach)..=center.y().saturating_add(reach) {
                let coord = SectorCoord::new(x, y);
                if coord.euclidean_to(center) > f64::from(radius) {
                    continue;
                }
                if self
                    .sectors
                    .get(&coord)
                    .is_some_and(|sector| sector.mining || sector.mined)
                {
                    continue;
                }

                let deposit = self
                    .deposits
                    .get(&coord)
                    .map(|deposit| (deposit.density, deposit.depth));
                let (actual, depth) = match deposit {
                    Some(found) => found,
                    None => (
                        rng.uniform(0.0, MAX_DENSITY),
                        rng.int_inclusive(1, self.rules.generation.max_depth.max(1)),
                    ),
                };
                let accuracy = self.telescope.sweep_accuracy(
                    coord.euclidean_from_origin(),
                    depth,
                    &self.rules.scanning,
                );
                let measured = measured_density(actual, accuracy, rng.uniform(-0.5, 0.5));
                self.write_reading(coord, measured, depth);
                revealed.push(coord);
            }
        }

        revealed
    }

    fn write_reading(&mut self, coord: SectorCoord, density: f64, depth: u32) {
        self.sectors
            .entry(coord)
            .or_insert_with(|| Sector::revealed(coord, density, depth))
            .apply_reading(density, depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_accuracy_decays_with_distance_to_floor() {
        let rules = ScanRules::default();
        let telescope = Telescope::commissioned(&rules);
        assert!((telescope.effective_accuracy(0.0, &rules) - 0.6).abs() < 1e-9);
        assert!((telescope.effective_accuracy(2.0, &rules) - 0.5).abs() < 1e-9);
        assert!((telescope.effective_accuracy(20.0, &rules) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn sweep_accuracy_drops_with_depth() {
        let rules = ScanRules::default();
        let telescope = Telescope::commissioned(&rules);
        assert!((telescope.sweep_accuracy(0.0, 1, &rules) - 0.5).abs() < 1e-9);
        assert!((telescope.sweep_accuracy(0.0, 2, &rules) - 0.4).abs() < 1e-9);
        assert!((telescope.sweep_accuracy(0.0, 5, &rules) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn measured_density_is_clamped() {
        assert_eq!(measured_density(99.0, 0.3, 0.49), 100.0);
        assert_eq!(measured_density(1.0, 0.3, -0.5), 0.0);
        assert!((measured_density(50.0, 1.0, 0.4) - 50.0).abs() < 1e-9);
    }
}
