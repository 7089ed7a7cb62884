//! Mining missions: launch, progress, completion, recall and unloading.

use carbon_quest_core::{LaunchError, MissionError, RocketId, SectorCoord};

use crate::{
    fleet::{Rocket, FULL_PROGRESS},
    World,
};

/// Outcome of a mission that returned to the station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Landing {
    pub(crate) target: SectorCoord,
    pub(crate) carbon: u64,
}

/// Carbon extracted by a mission, `floor(density * completion * drill_power)`.
#[must_use]
pub fn mission_yield(density: f64, completion: f64, drill_power: u32) -> u64 {
    let raw = density * completion.clamp(0.0, 1.0) * f64::from(drill_power);
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    raw.floor() as u64
}

impl World {
    /// Launches a rocket against a scanned sector. Returns the rocket that flew.
    pub(crate) fn launch_mission(
        &mut self,
        rocket: Option<RocketId>,
        target: SectorCoord,
    ) -> Result<RocketId, LaunchError> {
        let fuel_cost = self.rules.missions.launch_fuel;
        let energy_cost = self.rules.missions.launch_energy;

        let chosen = match rocket {
            Some(id) => {
                let rocket = self.fleet.get(id).ok_or(LaunchError::UnknownRocket)?;
                if rocket.launched {
                    return Err(LaunchError::RocketBusy);
                }
                rocket
            }
            None => self.pick_idle_rocket(fuel_cost)?,
        };
        let (rocket_id, fuel) = (chosen.id, chosen.fuel);

        let sector = self.sectors.get(&target).ok_or(LaunchError::UnknownSector)?;
        if !sector.scanned {
            return Err(LaunchError::SectorNotScanned);
        }
        if sector.mining {
            return Err(LaunchError::SectorAlreadyMining);
        }
        if sector.mined {
            return Err(LaunchError::SectorAlreadyMined);
        }
        if sector.carbon_density <= 0.0 {
            return Err(LaunchError::SectorDepleted);
        }

        if self.energy < energy_cost {
            return Err(LaunchError::InsufficientEnergy {
                required: energy_cost,
                available: self.energy,
            });
        }
        if fuel < fuel_cost {
            return Err(LaunchError::InsufficientFuel {
                required: fuel_cost,
                available: fuel,
            });
        }

        self.energy -= energy_cost;
        if let Some(rocket) = self.fleet.get_mut(rocket_id) {
            rocket.fuel -= fuel_cost;
            rocket.launched = true;
            rocket.target_sector = Some(target);
            rocket.mission_progress = 0;
        }
        if let Some(sector) = self.sectors.get_mut(&target) {
            sector.mining = true;
            sector.marked = false;
        }
        Ok(rocket_id)
    }

    /// Banks the full yield of a finished mission and marks the sector mined.
    pub(crate) fn complete_mission(&mut self, rocket: RocketId) -> Result<Landing, MissionError> {
        let flying = self.flying_rocket(rocket)?;
        if flying.mission_progress < FULL_PROGRESS {
            return Err(MissionError::MissionInProgress {
                progress: flying.mission_progress,
            });
        }
        let target = flying.target_sector.unwrap_or(SectorCoord::ORIGIN);
        let drill_power = flying.drill_power;

        let density = self
            .sectors
            .get(&target)
            .map_or(0.0, |sector| sector.carbon_density);
        let carbon = mission_yield(density, 1.0, drill_power);

        self.carbon = self.carbon.saturating_add(carbon);
        if let Some(sector) = self.sectors.get_mut(&target) {
            sector.mined = true;
            sector.mining = false;
            sector.marked = false;
        }
        if let Some(rocket) = self.fleet.get_mut(rocket) {
            rocket.land();
        }
        Ok(Landing { target, carbon })
    }

    /// Calls a rocket home early, loading a partial yield into its hold.
    ///
    /// The sector keeps a fraction of its density and stays minable.
    pub(crate) fn recall_mission(&mut self, rocket: RocketId) -> Result<Landing, MissionError> {
        let flying = self.flying_rocket(rocket)?;
        let target = flying.target_sector.unwrap_or(SectorCoord::ORIGIN);
        let completion = f64::from(flying.mission_progress) / f64::from(FULL_PROGRESS);
        let drill_power = flying.drill_power;
        let room = flying.max_cargo.saturating_sub(flying.cargo);

        let density = self
            .sectors
            .get(&target)
            .map_or(0.0, |sector| sector.carbon_density);
        let extracted = mission_yield(density, completion, drill_power);
        let loaded = u32::try_from(extracted).unwrap_or(u32::MAX).min(room);

        let retained = self.rules.missions.recall_density_retained;
        if let Some(sector) = self.sectors.get_mut(&target) {
            sector.set_density(sector.carbon_density * retained);
            sector.mining = false;
        }
        if let Some(rocket) = self.fleet.get_mut(rocket) {
            rocket.cargo += loaded;
            rocket.land();
        }
        Ok(Landing {
            target,
            carbon: u64::from(loaded),
        })
    }

    /// Moves a rocket's cargo into the station store. Returns the amount moved.
    pub(crate) fn unload_cargo(&mut self, rocket: RocketId) -> Result<u32, MissionError> {
        let rocket = self
            .fleet
            .get_mut(rocket)
            .ok_or(MissionError::UnknownRocket)?;
        if rocket.cargo == 0 {
            return Err(MissionError::CargoEmpty);
        }
        let amount = std::mem::take(&mut rocket.cargo);
        self.carbon = self.carbon.saturating_add(u64::from(amount));
        Ok(amount)
    }

    /// Advances every unfinished mission by one tick.
    ///
    /// Returns `(rocket, progress)` for every mission that moved.
    pub(crate) fn progress_missions(&mut self) -> Vec<(RocketId, u32)> {
        let step = self.rules.missions.progress_step;
        let divisor = self.rules.missions.fuel_divisor.max(1);
        let mut moved = Vec::new();

        for rocket in self.fleet.iter_mut() {
            if !rocket.launched || rocket.mission_progress >= FULL_PROGRESS {
                continue;
            }
            rocket.mission_progress = rocket
                .mission_progress
                .saturating_add(step)
                .min(FULL_PROGRESS);
            let burn = rocket.max_fuel.div_ceil(divisor);
            rocket.fuel = rocket.fuel.saturating_sub(burn);
            moved.push((rocket.id, rocket.mission_progress));
        }

        moved
    }

    fn pick_idle_rocket(&self, fuel_cost: u32) -> Result<&Rocket, LaunchError> {
        let mut idle = self
            .fleet
            .as_slice()
            .iter()
            .filter(|rocket| rocket.is_idle())
            .peekable();
        let first_idle = idle.peek().copied().ok_or(LaunchError::NoRocketAvailable)?;
        Ok(idle
            .find(|rocket| rocket.fuel >= fuel_cost)
            .unwrap_or(first_idle))
    }

    fn flying_rocket(&self, rocket: RocketId) -> Result<&Rocket, MissionError> {
        let rocket = self.fleet.get(rocket).ok_or(MissionError::UnknownRocket)?;
        if !rocket.launched {
            return Err(MissionError::NotLaunched);
        }
        Ok(rocket)
    }
}

#[cfg(test)]
mod tests {
    use super::mission_yield;

    #[test]
    fn yield_floors_scaled_density() {
        assert_eq!(mission_yield(80.0, 1.0, 1), 80);
        assert_eq!(mission_yield(80.0, 0.4, 1), 32);
        assert_eq!(mission_yield(33.3, 1.0, 3), 99);
        assert_eq!(mission_yield(10.0, 0.0, 4), 0);
    }

    #[test]
    fn yield_ignores_invalid_inputs() {
        assert_eq!(mission_yield(f64::NAN, 1.0, 1), 0);
        assert_eq!(mission_yield(-5.0, 1.0, 1), 0);
        assert_eq!(mission_yield(50.0, 2.0, 1), 50);
    }
}
