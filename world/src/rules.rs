//! Gameplay tuning knobs.
//!
//! [`Rules`] carries every constant the world consults while applying
//! commands. All tables default to the stock balance; configuration files may
//! override any subset since each struct is `#[serde(default)]`.

use serde::{Deserialize, Serialize};

/// Aggregated tuning knobs controlling every adjustable aspect of the world.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Station energy storage and regeneration.
    pub energy: EnergyRules,
    /// Telescope costs, caps and scan accuracy model.
    pub scanning: ScanRules,
    /// Launch costs, mission pacing and yields.
    pub missions: MissionRules,
    /// Market drift and history length.
    pub market: MarketRules,
    /// Refuelling prices.
    pub fuel: FuelRules,
    /// Fleet composition and starting hardware.
    pub fleet: FleetRules,
    /// Extent and richness of the generated galaxy.
    pub generation: GenerationRules,
}

/// Station energy storage and regeneration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyRules {
    /// Upper clamp for stored energy.
    pub max: u32,
    /// Energy restored by every tick.
    pub regen_per_tick: u32,
}

impl Default for EnergyRules {
    fn default() -> Self {
        Self {
            max: 100,
            regen_per_tick: 1,
        }
    }
}

/// Telescope costs, caps and scan accuracy model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanRules {
    /// Energy charged by a galaxy-view single-sector scan.
    pub sector_cost: u32,
    /// Energy charged by a telescope-view area sweep.
    pub sweep_cost: u32,
    /// Range the telescope starts with.
    pub starting_range: u32,
    /// Accuracy the telescope starts with, in percent.
    pub starting_accuracy: u32,
    /// Range cap enforced by the range upgrade.
    pub max_range: u32,
    /// Accuracy cap enforced by the accuracy upgrade.
    pub max_accuracy: u32,
    /// Range gained per range upgrade.
    pub range_step: u32,
    /// Accuracy gained per accuracy upgrade.
    pub accuracy_step: u32,
    /// Scan cost reduction granted by the energy optimizer.
    pub discount_step: u32,
    /// Cap on the accumulated scan cost reduction.
    pub max_discount: u32,
    /// Accuracy lost per sector of distance from the origin, as a fraction.
    pub accuracy_falloff: f64,
    /// Lowest effective accuracy, as a fraction.
    pub accuracy_floor: f64,
    /// Accuracy lost per depth level of a swept deposit, as a fraction.
    pub depth_penalty: f64,
}

impl Default for ScanRules {
    fn default() -> Self {
        Self {
            sector_cost: 10,
            sweep_cost: 20,
            starting_range: 3,
            starting_accuracy: 60,
            max_range: 6,
            max_accuracy: 90,
            range_step: 1,
            accuracy_step: 10,
            discount_step: 5,
            max_discount: 5,
            accuracy_falloff: 0.05,
            accuracy_floor: 0.3,
            depth_penalty: 0.1,
        }
    }
}

/// Launch costs, mission pacing and yields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionRules {
    /// Station energy charged per launch.
    pub launch_energy: u32,
    /// Rocket fuel burned per launch.
    pub launch_fuel: u32,
    /// Progress gained by an in-flight mission on every tick, in percent.
    pub progress_step: u32,
    /// Each tick burns `ceil(max_fuel / fuel_divisor)` fuel from flying rockets.
    pub fuel_divisor: u32,
    /// Fraction of a sector's density left behind after a recall.
    pub recall_density_retained: f64,
}

impl Default for MissionRules {
    fn default() -> Self {
        Self {
            launch_energy: 30,
            launch_fuel: 20,
            progress_step: 20,
            fuel_divisor: 20,
            recall_density_retained: 0.7,
        }
    }
}

/// Market drift and history length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketRules {
    /// Price a new game starts at.
    pub starting_price: f64,
    /// Price history a new game starts with, oldest first.
    pub starting_history: Vec<f64>,
    /// Lower price clamp.
    pub min_price: f64,
    /// Upper price clamp.
    pub max_price: f64,
    /// Probability that a tick moves the price.
    pub drift_chance: f64,
    /// Largest price change a single drift can apply.
    pub drift_amplitude: f64,
    /// Number of prices kept in the history.
    pub history_len: usize,
}

impl Default for MarketRules {
    fn default() -> Self {
        Self {
            starting_price: 10.0,
            starting_history: vec![10.0, 9.0, 11.0, 10.0, 12.0],
            min_price: 5.0,
            max_price: 20.0,
            drift_chance: 0.1,
            drift_amplitude: 1.0,
            history_len: 10,
        }
    }
}

/// Refuelling prices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelRules {
    /// Flat price of filling a tank regardless of how empty it is.
    pub flat_refuel_cost: f64,
    /// Price per missing unit when topping up.
    pub price_per_unit: f64,
}

impl Default for FuelRules {
    fn default() -> Self {
        Self {
            flat_refuel_cost: 50.0,
            price_per_unit: 0.5,
        }
    }
}

/// Fleet composition and starting hardware.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetRules {
    /// Fuel capacity of a freshly built rocket.
    pub base_max_fuel: u32,
    /// Cargo capacity of a freshly built rocket.
    pub base_max_cargo: u32,
    /// Largest fleet the assembly bay can build up to.
    pub max_rockets: usize,
    /// Fuel capacity added by the fuel tank upgrade.
    pub fuel_tank_step: u32,
    /// Cargo capacity added by the cargo hold upgrade.
    pub cargo_hold_step: u32,
    /// Drill power added by the drill upgrade.
    pub drill_step: u32,
}

impl Default for FleetRules {
    fn default() -> Self {
        Self {
            base_max_fuel: 100,
            base_max_cargo: 50,
            max_rockets: 5,
            fuel_tank_step: 20,
            cargo_hold_step: 25,
            drill_step: 1,
        }
    }
}

/// Extent and richness of the generated galaxy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRules {
    /// Half-width of the generated square; the square spans `-radius..=radius`.
    pub radius: i32,
    /// Density lost per sector of distance from the origin.
    pub density_falloff: f64,
    /// Deepest deposit the generator produces.
    pub max_depth: u32,
    /// Carbon a new game starts with.
    pub starting_carbon: u64,
    /// Energy a new game starts with.
    pub starting_energy: u32,
    /// Credits a new game starts with.
    pub starting_credits: f64,
}

impl Default for GenerationRules {
    fn default() -> Self {
        Self {
            radius: 7,
            density_falloff: 5.0,
            max_depth: 5,
            starting_carbon: 0,
            starting_energy: 100,
            starting_credits: 1_000.0,
        }
    }
}
