//! Player actions shared by one-shot subcommands and the interactive prompt.

use carbon_quest_core::{Command, RocketId, SectorCoord, SellShare, UpgradeKind, ViewPanel};
use clap::{Subcommand, ValueEnum};

/// Game actions that map one-to-one onto world commands.
#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub(crate) enum Action {
    /// Scan a single sector within telescope range.
    Scan {
        /// Horizontal sector coordinate.
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Vertical sector coordinate.
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Sweep every sector within telescope range of a centre.
    Sweep {
        /// Horizontal coordinate of the sweep centre.
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Vertical coordinate of the sweep centre.
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Launch a mining mission.
    Launch {
        /// Horizontal coordinate of the target sector.
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Vertical coordinate of the target sector.
        #[arg(allow_negative_numbers = true)]
        y: i32,
        /// Rocket to launch; the first idle rocket when omitted.
        #[arg(long)]
        rocket: Option<u32>,
    },
    /// Confirm a finished mission and bank its carbon.
    Complete {
        /// Rocket identifier.
        rocket: u32,
    },
    /// Call a rocket home early.
    Recall {
        /// Rocket identifier.
        rocket: u32,
    },
    /// Move a rocket's cargo into the station store.
    Unload {
        /// Rocket identifier.
        rocket: u32,
    },
    /// Fill a rocket's tank for a flat fee.
    Refuel {
        /// Rocket identifier.
        rocket: u32,
    },
    /// Fill a rocket's tank paying per missing unit.
    TopUp {
        /// Rocket identifier.
        rocket: u32,
    },
    /// Sell an exact amount of carbon.
    Sell {
        /// Units of carbon to sell.
        amount: u64,
    },
    /// Sell a fraction of the carbon held.
    SellShare {
        /// Fraction of holdings to sell.
        #[arg(value_enum)]
        share: ShareArg,
    },
    /// Buy an upgrade by its catalog slug (range-1, accuracy-1, efficiency-1,
    /// fuel-1, cargo-1, drill-1, fleet-1).
    Upgrade {
        /// Catalog slug of the upgrade.
        kind: UpgradeKind,
    },
    /// Toggle the mining mark on a scanned sector.
    Mark {
        /// Horizontal sector coordinate.
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Vertical sector coordinate.
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Switch the active panel.
    View {
        /// Panel to show.
        #[arg(value_enum)]
        panel: PanelArg,
    },
}

/// Quick-sell fractions accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShareArg {
    /// A quarter of current holdings.
    Quarter,
    /// Half of current holdings.
    Half,
    /// Three quarters of current holdings.
    ThreeQuarters,
    /// Everything held.
    All,
}

/// Panels accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PanelArg {
    /// Galaxy map.
    Galaxy,
    /// Telescope controls.
    Telescope,
    /// Fleet overview.
    Rockets,
    /// Carbon market.
    Market,
    /// Upgrade catalog.
    Upgrades,
}

impl Action {
    /// Translates the action into the world command it requests.
    pub(crate) fn into_command(self) -> Command {
        match self {
            Self::Scan { x, y } => Command::ScanSector {
                target: SectorCoord::new(x, y),
            },
            Self::Sweep { x, y } => Command::SweepArea {
                center: SectorCoord::new(x, y),
            },
            Self::Launch { x, y, rocket } => Command::LaunchMission {
                rocket: rocket.map(RocketId::new),
                target: SectorCoord::new(x, y),
            },
            Self::Complete { rocket } => Command::CompleteMission {
                rocket: RocketId::new(rocket),
            },
            Self::Recall { rocket } => Command::RecallMission {
                rocket: RocketId::new(rocket),
            },
            Self::Unload { rocket } => Command::UnloadCargo {
                rocket: RocketId::new(rocket),
            },
            Self::Refuel { rocket } => Command::Refuel {
                rocket: RocketId::new(rocket),
            },
            Self::TopUp { rocket } => Command::TopUpFuel {
                rocket: RocketId::new(rocket),
            },
            Self::Sell { amount } => Command::SellCarbon { amount },
            Self::SellShare { share } => Command::SellShare {
                share: share.into(),
            },
            Self::Upgrade { kind } => Command::PurchaseUpgrade { upgrade: kind },
            Self::Mark { x, y } => Command::ToggleMark {
                sector: SectorCoord::new(x, y),
            },
            Self::View { panel } => Command::SetView { view: panel.into() },
        }
    }
}

impl From<ShareArg> for SellShare {
    fn from(value: ShareArg) -> Self {
        match value {
            ShareArg::Quarter => Self::Quarter,
            ShareArg::Half => Self::Half,
            ShareArg::ThreeQuarters => Self::ThreeQuarters,
            ShareArg::All => Self::All,
        }
    }
}

impl From<PanelArg> for ViewPanel {
    fn from(value: PanelArg) -> Self {
        match value {
            PanelArg::Galaxy => Self::Galaxy,
            PanelArg::Telescope => Self::Telescope,
            PanelArg::Rockets => Self::Rockets,
            PanelArg::Market => Self::Market,
            PanelArg::Upgrades => Self::Upgrades,
        }
    }
}
