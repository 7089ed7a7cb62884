//! Reasons a player request may be rejected by the world.
//!
//! Every rejection leaves the world untouched. Each reason belongs to one
//! [`RejectionCategory`] so presentation layers can phrase the warning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classes of rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionCategory {
    /// Energy, fuel, credits or carbon fell short of the required amount.
    InsufficientResource,
    /// The named sector, rocket or upgrade cannot take part in the request.
    InvalidTarget,
}

/// Reasons a scan request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ScanError {
    /// Another scan is still in flight.
    #[error("the telescope is already scanning")]
    TelescopeBusy,
    /// The target lies beyond the telescope's range.
    #[error("sector is {distance} sectors out, beyond telescope range {range}")]
    OutOfRange {
        /// Chebyshev distance of the target from the origin.
        distance: u32,
        /// Current telescope range.
        range: u32,
    },
    /// The target sector is being mined and cannot be rescanned.
    #[error("sector is being mined")]
    SectorBusy,
    /// Not enough energy to power the telescope.
    #[error("scanning needs {required} energy, only {available} available")]
    InsufficientEnergy {
        /// Energy the scan costs.
        required: u32,
        /// Energy currently stored.
        available: u32,
    },
}

impl ScanError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        match self {
            Self::InsufficientEnergy { .. } => RejectionCategory::InsufficientResource,
            Self::TelescopeBusy | Self::OutOfRange { .. } | Self::SectorBusy => {
                RejectionCategory::InvalidTarget
            }
        }
    }
}

/// Reasons a mark toggle may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MarkError {
    /// No sector has been discovered at the coordinate.
    #[error("no sector has been discovered there")]
    UnknownSector,
    /// The sector exists but its density is unknown.
    #[error("sector has not been scanned")]
    SectorNotScanned,
    /// A rocket is currently mining the sector.
    #[error("sector is already being mined")]
    SectorAlreadyMining,
}

impl MarkError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        RejectionCategory::InvalidTarget
    }
}

/// Reasons a launch request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum LaunchError {
    /// Every rocket in the fleet is already flying.
    #[error("no rocket is available")]
    NoRocketAvailable,
    /// The named rocket does not exist.
    #[error("no such rocket")]
    UnknownRocket,
    /// The named rocket is already on a mission.
    #[error("rocket is already on a mission")]
    RocketBusy,
    /// No sector has been discovered at the target.
    #[error("no sector has been discovered there")]
    UnknownSector,
    /// The target's density is unknown.
    #[error("sector has not been scanned")]
    SectorNotScanned,
    /// Another rocket is mining the target.
    #[error("sector is already being mined")]
    SectorAlreadyMining,
    /// The target has been mined out.
    #[error("sector has already been mined")]
    SectorAlreadyMined,
    /// The target holds no carbon.
    #[error("sector holds no carbon")]
    SectorDepleted,
    /// Not enough station energy to launch.
    #[error("launching needs {required} energy, only {available} available")]
    InsufficientEnergy {
        /// Energy a launch costs.
        required: u32,
        /// Energy currently stored.
        available: u32,
    },
    /// The rocket lacks fuel for the launch burn.
    #[error("launching needs {required} fuel, rocket holds {available}")]
    InsufficientFuel {
        /// Fuel a launch burns.
        required: u32,
        /// Fuel currently in the rocket's tank.
        available: u32,
    },
}

impl LaunchError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        match self {
            Self::InsufficientEnergy { .. } | Self::InsufficientFuel { .. } => {
                RejectionCategory::InsufficientResource
            }
            _ => RejectionCategory::InvalidTarget,
        }
    }
}

/// Reasons a complete, recall or unload request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MissionError {
    /// The named rocket does not exist.
    #[error("no such rocket")]
    UnknownRocket,
    /// The rocket is not on a mission.
    #[error("rocket is not on a mission")]
    NotLaunched,
    /// The mission has not reached full progress yet.
    #[error("mission is only {progress}% complete")]
    MissionInProgress {
        /// Current mission progress in percent.
        progress: u32,
    },
    /// The rocket's cargo hold is empty.
    #[error("cargo hold is empty")]
    CargoEmpty,
}

impl MissionError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        match self {
            Self::CargoEmpty => RejectionCategory::InsufficientResource,
            _ => RejectionCategory::InvalidTarget,
        }
    }
}

/// Reasons a refuel or top-up request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Error)]
pub enum RefuelError {
    /// The named rocket does not exist.
    #[error("no such rocket")]
    UnknownRocket,
    /// The rocket is away on a mission.
    #[error("rocket is on a mission")]
    RocketBusy,
    /// The tank is already full.
    #[error("rocket is already fully fuelled")]
    TankFull,
    /// Not enough credits to pay for the fuel.
    #[error("refuelling costs {required} credits, only {available:.0} available")]
    InsufficientCredits {
        /// Credits the refuel costs.
        required: f64,
        /// Credits currently held.
        available: f64,
    },
}

impl RefuelError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        match self {
            Self::TankFull | Self::InsufficientCredits { .. } => {
                RejectionCategory::InsufficientResource
            }
            Self::UnknownRocket | Self::RocketBusy => RejectionCategory::InvalidTarget,
        }
    }
}

/// Reasons a sale may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SaleError {
    /// The requested amount rounds down to zero.
    #[error("nothing to sell")]
    NothingToSell,
    /// More carbon was requested than is held.
    #[error("cannot sell {requested} carbon, only {available} held")]
    InsufficientCarbon {
        /// Units requested.
        requested: u64,
        /// Units currently held.
        available: u64,
    },
}

impl SaleError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        RejectionCategory::InsufficientResource
    }
}

/// Reasons an upgrade purchase may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// The upgraded stat already sits at its cap.
    #[error("already at max level")]
    MaxLevel,
    /// Not enough credits to pay for the upgrade.
    #[error("upgrade costs {required} credits, only {available:.0} available")]
    InsufficientCredits {
        /// Credits the upgrade costs.
        required: f64,
        /// Credits currently held.
        available: f64,
    },
}

impl UpgradeError {
    /// Category the rejection belongs to.
    #[must_use]
    pub const fn category(&self) -> RejectionCategory {
        match self {
            Self::MaxLevel => RejectionCategory::InvalidTarget,
            Self::InsufficientCredits { .. } => RejectionCategory::InsufficientResource,
        }
    }
}
