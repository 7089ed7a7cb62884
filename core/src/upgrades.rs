//! Fixed catalog of purchasable upgrades.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Upgrades offered by the station workshop.
///
/// Effects and caps are enforced by the world; the catalog only carries the
/// identity, display name and price of each entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Extends telescope range by one sector.
    TelescopeRange,
    /// Improves telescope accuracy by ten points.
    TelescopeAccuracy,
    /// Reduces the energy cost of scans by five.
    EnergyOptimizer,
    /// Adds twenty fuel capacity to every rocket.
    FuelTanks,
    /// Adds twenty-five cargo capacity to every rocket.
    CargoHold,
    /// Adds one drill power to every rocket.
    DrillMatrix,
    /// Commissions an additional rocket.
    RocketAssembly,
}

impl UpgradeKind {
    /// Every catalog entry in presentation order.
    pub const ALL: [UpgradeKind; 7] = [
        Self::TelescopeRange,
        Self::TelescopeAccuracy,
        Self::EnergyOptimizer,
        Self::FuelTanks,
        Self::CargoHold,
        Self::DrillMatrix,
        Self::RocketAssembly,
    ];

    /// Credits charged for the upgrade.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::TelescopeRange => 500,
            Self::TelescopeAccuracy => 750,
            Self::EnergyOptimizer => 600,
            Self::FuelTanks => 800,
            Self::CargoHold => 700,
            Self::DrillMatrix => 1_000,
            Self::RocketAssembly => 1_500,
        }
    }

    /// Human readable catalog name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TelescopeRange => "Extended Range Array",
            Self::TelescopeAccuracy => "Quantum Sensors",
            Self::EnergyOptimizer => "Energy Optimizer",
            Self::FuelTanks => "Advanced Fuel Tanks",
            Self::CargoHold => "Expanded Cargo Hold",
            Self::DrillMatrix => "Quantum Drill Matrix",
            Self::RocketAssembly => "Rocket Assembly Bay",
        }
    }

    /// Stable short identifier used by command-line adapters.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TelescopeRange => "range-1",
            Self::TelescopeAccuracy => "accuracy-1",
            Self::EnergyOptimizer => "efficiency-1",
            Self::FuelTanks => "fuel-1",
            Self::CargoHold => "cargo-1",
            Self::DrillMatrix => "drill-1",
            Self::RocketAssembly => "fleet-1",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for UpgradeKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown upgrade '{value}'"))
    }
}
