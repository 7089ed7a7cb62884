#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Carbon Quest simulator.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Systems consume event streams and respond
//! exclusively with new command batches.

mod rejections;
mod upgrades;

use serde::{Deserialize, Serialize};

pub use rejections::{
    LaunchError, MarkError, MissionError, RefuelError, RejectionCategory, SaleError, ScanError,
    UpgradeError,
};
pub use upgrades::UpgradeKind;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Carbon Quest.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one fixed tick period.
    Tick,
    /// Starts a single-sector scan from the galaxy view.
    ScanSector {
        /// Sector the telescope should resolve.
        target: SectorCoord,
    },
    /// Starts an area sweep from the telescope view.
    SweepArea {
        /// Centre of the circular sweep.
        center: SectorCoord,
    },
    /// Resolves whichever scan is currently active, if any.
    ResolveScan,
    /// Resets the cosmetic scan progress indicator.
    ClearScanProgress,
    /// Flips the mining mark on a scanned sector.
    ToggleMark {
        /// Sector whose mark should be flipped.
        sector: SectorCoord,
    },
    /// Launches a mining mission against the provided sector.
    LaunchMission {
        /// Rocket to launch, or `None` to pick the first idle rocket.
        rocket: Option<RocketId>,
        /// Sector the rocket should mine.
        target: SectorCoord,
    },
    /// Confirms a mission that reached full progress.
    CompleteMission {
        /// Rocket whose mission should be completed.
        rocket: RocketId,
    },
    /// Calls a rocket home before its mission finished.
    RecallMission {
        /// Rocket to recall.
        rocket: RocketId,
    },
    /// Moves a rocket's cargo into the station carbon store.
    UnloadCargo {
        /// Rocket whose cargo should be unloaded.
        rocket: RocketId,
    },
    /// Fills a rocket's tank for a flat credit cost.
    Refuel {
        /// Rocket to refuel.
        rocket: RocketId,
    },
    /// Fills a rocket's tank paying per missing unit of fuel.
    TopUpFuel {
        /// Rocket to top up.
        rocket: RocketId,
    },
    /// Sells an exact amount of carbon at the current market price.
    SellCarbon {
        /// Units of carbon to sell.
        amount: u64,
    },
    /// Sells a fraction of the carbon held when the command is applied.
    SellShare {
        /// Fraction of current holdings to sell.
        share: SellShare,
    },
    /// Purchases an upgrade from the catalog.
    PurchaseUpgrade {
        /// Upgrade to purchase.
        upgrade: UpgradeKind,
    },
    /// Switches the panel presented to the player.
    SetView {
        /// Panel that should become active.
        view: ViewPanel,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that a tick was applied.
    Ticked {
        /// Number of ticks applied since the world was created.
        tick: u64,
    },
    /// Reports the new progress of an in-flight mission.
    MissionProgressed {
        /// Rocket flying the mission.
        rocket: RocketId,
        /// Progress after the tick, in percent.
        progress: u32,
    },
    /// Announces that a mission reached full progress and awaits confirmation.
    MissionReady {
        /// Rocket whose mission is ready.
        rocket: RocketId,
    },
    /// Announces a market price change.
    PriceChanged {
        /// New carbon price in credits per unit.
        price: f64,
    },
    /// Confirms that the telescope started a scan.
    ScanStarted {
        /// Request describing the scan in flight.
        request: ScanRequest,
        /// Energy deducted for the scan.
        energy_spent: u32,
    },
    /// Reports that a scan request was rejected.
    ScanRejected {
        /// Coordinate provided in the scan request.
        target: SectorCoord,
        /// Specific reason the scan failed.
        reason: ScanError,
    },
    /// Confirms that the active scan resolved.
    ScanResolved {
        /// Request that was resolved.
        request: ScanRequest,
        /// Sectors revealed or refreshed by the scan.
        sectors: Vec<SectorCoord>,
    },
    /// Confirms that the cosmetic scan progress was reset.
    ScanProgressCleared,
    /// Confirms that a sector's mining mark changed.
    SectorMarkToggled {
        /// Sector whose mark changed.
        sector: SectorCoord,
        /// Mark state after the toggle.
        marked: bool,
    },
    /// Reports that a mark toggle was rejected.
    MarkRejected {
        /// Sector named in the request.
        sector: SectorCoord,
        /// Specific reason the toggle failed.
        reason: MarkError,
    },
    /// Confirms that a rocket launched on a mining mission.
    MissionLaunched {
        /// Rocket that launched.
        rocket: RocketId,
        /// Sector being mined.
        target: SectorCoord,
    },
    /// Reports that a launch request was rejected.
    LaunchRejected {
        /// Rocket named in the request, if any.
        rocket: Option<RocketId>,
        /// Sector named in the request.
        target: SectorCoord,
        /// Specific reason the launch failed.
        reason: LaunchError,
    },
    /// Confirms that a mission completed and its yield was banked.
    MissionCompleted {
        /// Rocket that completed the mission.
        rocket: RocketId,
        /// Sector that is now mined out.
        target: SectorCoord,
        /// Carbon added to the station store.
        carbon_gained: u64,
    },
    /// Confirms that a mission was recalled early.
    MissionRecalled {
        /// Rocket that returned.
        rocket: RocketId,
        /// Sector the rocket was mining.
        target: SectorCoord,
        /// Carbon loaded into the rocket's cargo hold.
        cargo_gained: u32,
    },
    /// Confirms that a rocket's cargo was unloaded.
    CargoUnloaded {
        /// Rocket that was unloaded.
        rocket: RocketId,
        /// Carbon moved into the station store.
        amount: u32,
    },
    /// Reports that a mission-related request was rejected.
    MissionRejected {
        /// Rocket named in the request.
        rocket: RocketId,
        /// Specific reason the request failed.
        reason: MissionError,
    },
    /// Confirms that a rocket took on fuel.
    RocketRefueled {
        /// Rocket that was refuelled.
        rocket: RocketId,
        /// Units of fuel added.
        fuel_added: u32,
        /// Credits charged.
        cost: f64,
    },
    /// Reports that a refuel request was rejected.
    RefuelRejected {
        /// Rocket named in the request.
        rocket: RocketId,
        /// Specific reason the refuel failed.
        reason: RefuelError,
    },
    /// Confirms that carbon was sold.
    CarbonSold {
        /// Units of carbon sold.
        amount: u64,
        /// Credits received.
        credits: f64,
    },
    /// Reports that a sale was rejected.
    SaleRejected {
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Confirms that an upgrade was purchased and applied.
    UpgradePurchased {
        /// Upgrade that was applied.
        upgrade: UpgradeKind,
        /// Credits charged.
        cost: f64,
    },
    /// Announces that a new rocket joined the fleet.
    RocketCommissioned {
        /// Identifier allocated to the new rocket.
        rocket: RocketId,
    },
    /// Reports that an upgrade purchase was rejected.
    UpgradeRejected {
        /// Upgrade named in the request.
        upgrade: UpgradeKind,
        /// Specific reason the purchase failed.
        reason: UpgradeError,
    },
    /// Announces that the active panel changed.
    ViewChanged {
        /// Panel that became active.
        view: ViewPanel,
    },
}

impl Event {
    /// Reports whether the event describes a rejected request.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::ScanRejected { .. }
                | Self::MarkRejected { .. }
                | Self::LaunchRejected { .. }
                | Self::MissionRejected { .. }
                | Self::RefuelRejected { .. }
                | Self::SaleRejected { .. }
                | Self::UpgradeRejected { .. }
        )
    }
}

/// Location of a sector on the unbounded integer galaxy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorCoord {
    x: i32,
    y: i32,
}

impl SectorCoord {
    /// The sector at the centre of the galaxy where the station sits.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new sector coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the sector.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the sector.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Chessboard distance from the origin, `max(|x|, |y|)`.
    #[must_use]
    pub fn chebyshev_from_origin(self) -> u32 {
        self.x.unsigned_abs().max(self.y.unsigned_abs())
    }

    /// Straight-line distance from the origin.
    #[must_use]
    pub fn euclidean_from_origin(self) -> f64 {
        self.euclidean_to(Self::ORIGIN)
    }

    /// Straight-line distance between two sectors.
    #[must_use]
    pub fn euclidean_to(self, other: SectorCoord) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Unique identifier assigned to a rocket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RocketId(u32);

impl RocketId {
    /// Creates a new rocket identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Entry point used to start a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanMode {
    /// Galaxy-view scan resolving a single sector.
    Sector,
    /// Telescope-view sweep resolving every sector within range of a centre.
    Sweep,
}

/// Intent recorded while the telescope is busy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Coordinate the scan was aimed at.
    pub target: SectorCoord,
    /// Entry point that started the scan.
    pub mode: ScanMode,
}

/// Fractions offered by the quick-sell buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SellShare {
    /// A quarter of current holdings.
    Quarter,
    /// Half of current holdings.
    Half,
    /// Three quarters of current holdings.
    ThreeQuarters,
    /// Everything held.
    All,
}

impl SellShare {
    /// Number of whole units to sell out of the provided holdings.
    #[must_use]
    pub fn of(self, holdings: u64) -> u64 {
        match self {
            Self::Quarter => holdings / 4,
            Self::Half => holdings / 2,
            Self::ThreeQuarters => holdings.saturating_mul(3) / 4,
            Self::All => holdings,
        }
    }
}

/// Panels a presentation layer can show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewPanel {
    /// Galaxy map with scannable tiles.
    #[default]
    Galaxy,
    /// Telescope controls for area sweeps.
    Telescope,
    /// Fleet overview and mission controls.
    Rockets,
    /// Carbon market.
    Market,
    /// Upgrade catalog.
    Upgrades,
}
