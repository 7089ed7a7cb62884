//! Credit-spending actions: refuelling, selling carbon and buying upgrades.

use carbon_quest_core::{RefuelError, RocketId, SaleError, UpgradeError, UpgradeKind};

use crate::World;

/// How a rocket's tank should be paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FuelPricing {
    /// Fixed price regardless of how empty the tank is.
    Flat,
    /// Price proportional to the missing fuel.
    PerUnit,
}

/// Fuel added and credits charged by a refuel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Refill {
    pub(crate) fuel_added: u32,
    pub(crate) cost: f64,
}

/// Stat change produced by an upgrade purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Purchase {
    pub(crate) cost: f64,
    pub(crate) commissioned: Option<RocketId>,
}

impl World {
    pub(crate) fn refuel(
        &mut self,
        rocket: RocketId,
        pricing: FuelPricing,
    ) -> Result<Refill, RefuelError> {
        let target = self.fleet.get(rocket).ok_or(RefuelError::UnknownRocket)?;
        if target.launched {
            return Err(RefuelError::RocketBusy);
        }
        let needed = target.max_fuel.saturating_sub(target.fuel);
        if needed == 0 {
            return Err(RefuelError::TankFull);
        }

        let cost = match pricing {
            FuelPricing::Flat => self.rules.fuel.flat_refuel_cost,
            FuelPricing::PerUnit => (f64::from(needed) * self.rules.fuel.price_per_unit).ceil(),
        };
        if self.credits < cost {
            return Err(RefuelError::InsufficientCredits {
                required: cost,
                available: self.credits,
            });
        }

        self.credits -= cost;
        if let Some(target) = self.fleet.get_mut(rocket) {
            target.fuel = target.max_fuel;
        }
        Ok(Refill {
            fuel_added: needed,
            cost,
        })
    }

    /// Sells carbon at the current price. Returns the credits earned.
    pub(crate) fn sell_carbon(&mut self, amount: u64) -> Result<f64, SaleError> {
        if amount == 0 {
            return Err(SaleError::NothingToSell);
        }
        if amount > self.carbon {
            return Err(SaleError::InsufficientCarbon {
                requested: amount,
                available: self.carbon,
            });
        }

        let earned = amount as f64 * self.market.carbon_price;
        self.carbon -= amount;
        self.credits += earned;
        Ok(earned)
    }

    pub(crate) fn purchase_upgrade(
        &mut self,
        upgrade: UpgradeKind,
    ) -> Result<Purchase, UpgradeError> {
        if self.upgrade_maxed(upgrade) {
            return Err(UpgradeError::MaxLevel);
        }
        let cost = f64::from(upgrade.cost());
        if self.credits < cost {
            return Err(UpgradeError::InsufficientCredits {
                required: cost,
                available: self.credits,
            });
        }

        self.credits -= cost;
        let commissioned = self.apply_upgrade(upgrade);
        Ok(Purchase { cost, commissioned })
    }

    /// Reports whether another level of `upgrade` would exceed its cap.
    pub(crate) fn upgrade_maxed(&self, upgrade: UpgradeKind) -> bool {
        let scanning = &self.rules.scanning;
        match upgrade {
            UpgradeKind::TelescopeRange => self.telescope.range >= scanning.max_range,
            UpgradeKind::TelescopeAccuracy => self.telescope.accuracy >= scanning.max_accuracy,
            UpgradeKind::EnergyOptimizer => {
                self.telescope.energy_discount >= scanning.max_discount
            }
            UpgradeKind::RocketAssembly => self.fleet.len() >= self.rules.fleet.max_rockets,
            UpgradeKind::FuelTanks | UpgradeKind::CargoHold | UpgradeKind::DrillMatrix => false,
        }
    }

    fn apply_upgrade(&mut self, upgrade: UpgradeKind) -> Option<RocketId> {
        let scanning = &self.rules.scanning;
        let fleet_rules = &self.rules.fleet;
        match upgrade {
            UpgradeKind::TelescopeRange => {
                self.telescope.range = self
                    .telescope
                    .range
                    .saturating_add(scanning.range_step)
                    .min(scanning.max_range);
            }
            UpgradeKind::TelescopeAccuracy => {
                self.telescope.accuracy = self
                    .telescope
                    .accuracy
                    .saturating_add(scanning.accuracy_step)
                    .min(scanning.max_accuracy);
            }
            UpgradeKind::EnergyOptimizer => {
                self.telescope.energy_discount = self
                    .telescope
                    .energy_discount
                    .saturating_add(scanning.discount_step)
                    .min(scanning.max_discount);
            }
            UpgradeKind::FuelTanks => {
                let step = fleet_rules.fuel_tank_step;
                for rocket in self.fleet.iter_mut() {
                    rocket.max_fuel = rocket.max_fuel.saturating_add(step);
                    rocket.fuel = rocket.fuel.saturating_add(step).min(rocket.max_fuel);
                }
            }
            UpgradeKind::CargoHold => {
                let step = fleet_rules.cargo_hold_step;
                for rocket in self.fleet.iter_mut() {
                    rocket.max_cargo = rocket.max_cargo.saturating_add(step);
                }
            }
            UpgradeKind::DrillMatrix => {
                let step = fleet_rules.drill_step;
                for rocket in self.fleet.iter_mut() {
                    rocket.drill_power = rocket.drill_power.saturating_add(step);
                }
            }
            UpgradeKind::RocketAssembly => {
                let (max_fuel, max_cargo) = (fleet_rules.base_max_fuel, fleet_rules.base_max_cargo);
                return Some(self.fleet.commission(max_fuel, max_cargo));
            }
        }
        None
    }
}
