#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Carbon Quest.
//!
//! The [`World`] aggregate is only ever mutated through [`apply`]. Every
//! handler validates its command completely before touching state, so a
//! command either takes full effect and emits its confirmation event, or
//! leaves the world untouched and emits a single `*Rejected` event.

mod economy;
mod fleet;
mod generation;
mod market;
mod missions;
mod random;
mod rules;
mod scanning;
mod sectors;
mod simulation;
mod snapshot;

use std::collections::BTreeMap;

use carbon_quest_core::{
    Command, Event, MarkError, MissionError, RocketId, ScanMode, ScanRequest, SectorCoord,
    ViewPanel,
};

pub use fleet::{pioneer_name, Rocket, FULL_PROGRESS};
pub use generation::{home_sector, initial_deposits, initial_fleet};
pub use market::Market;
pub use missions::mission_yield;
pub use random::{RandomSource, SeededSource, SequenceSource};
pub use rules::{
    EnergyRules, FleetRules, FuelRules, GenerationRules, MarketRules, MissionRules, Rules,
    ScanRules,
};
pub use scanning::{measured_density, Telescope, SCAN_COMPLETE};
pub use sectors::{clamp_density, Deposit, Sector, MAX_DENSITY, MIN_DENSITY};
pub use snapshot::WorldSnapshot;

use economy::FuelPricing;
use fleet::Fleet;

/// Represents the authoritative Carbon Quest game state.
#[derive(Clone, Debug)]
pub struct World {
    rules: Rules,
    carbon: u64,
    energy: u32,
    credits: f64,
    telescope: Telescope,
    fleet: Fleet,
    sectors: BTreeMap<SectorCoord, Sector>,
    deposits: BTreeMap<SectorCoord, Deposit>,
    market: Market,
    current_view: ViewPanel,
    tick_index: u64,
}

impl World {
    /// Creates a new game, rolling the galaxy from the provided random source.
    #[must_use]
    pub fn new(rules: Rules, rng: &mut dyn RandomSource) -> Self {
        let deposits = initial_deposits(&rules.generation, rng);
        let home = home_sector(&deposits);

        let mut sectors = BTreeMap::new();
        let _ = sectors.insert(home.coord, home);

        Self {
            carbon: rules.generation.starting_carbon,
            energy: rules.generation.starting_energy.min(rules.energy.max),
            credits: rules.generation.starting_credits,
            telescope: Telescope::commissioned(&rules.scanning),
            fleet: Fleet::from_rockets(initial_fleet(&rules.fleet)),
            sectors,
            deposits: deposits
                .into_iter()
                .map(|deposit| (deposit.coord, deposit))
                .collect(),
            market: Market::opening(&rules.market),
            current_view: ViewPanel::default(),
            tick_index: 0,
            rules,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// All randomness is drawn from `rng`, so replaying the same commands against
/// the same stream reproduces the same world.
pub fn apply(
    world: &mut World,
    command: Command,
    rng: &mut dyn RandomSource,
    out_events: &mut Vec<Event>,
) {
    match command {
        Command::Tick => world.tick(rng, out_events),
        Command::ScanSector { target } => start_scan(
            world,
            ScanRequest {
                target,
                mode: ScanMode::Sector,
            },
            out_events,
        ),
        Command::SweepArea { center } => start_scan(
            world,
            ScanRequest {
                target: center,
                mode: ScanMode::Sweep,
            },
            out_events,
        ),
        Command::ResolveScan => {
            if let Some((request, sectors)) = world.resolve_scan(rng) {
                out_events.push(Event::ScanResolved { request, sectors });
            }
        }
        Command::ClearScanProgress => {
            if world.clear_scan_progress() {
                out_events.push(Event::ScanProgressCleared);
            }
        }
        Command::ToggleMark { sector } => match world.toggle_mark(sector) {
            Ok(marked) => out_events.push(Event::SectorMarkToggled { sector, marked }),
            Err(reason) => {
                log::debug!("mark toggle on {sector:?} rejected: {reason}");
                out_events.push(Event::MarkRejected { sector, reason });
            }
        },
        Command::LaunchMission { rocket, target } => {
            match world.launch_mission(rocket, target) {
                Ok(launched) => out_events.push(Event::MissionLaunched {
                    rocket: launched,
                    target,
                }),
                Err(reason) => {
                    log::debug!("launch to {target:?} rejected: {reason}");
                    out_events.push(Event::LaunchRejected {
                        rocket,
                        target,
                        reason,
                    });
                }
            }
        }
        Command::CompleteMission { rocket } => match world.complete_mission(rocket) {
            Ok(landing) => out_events.push(Event::MissionCompleted {
                rocket,
                target: landing.target,
                carbon_gained: landing.carbon,
            }),
            Err(reason) => reject_mission(rocket, reason, out_events),
        },
        Command::RecallMission { rocket } => match world.recall_mission(rocket) {
            Ok(landing) => out_events.push(Event::MissionRecalled {
                rocket,
                target: landing.target,
                cargo_gained: u32::try_from(landing.carbon).unwrap_or(u32::MAX),
            }),
            Err(reason) => reject_mission(rocket, reason, out_events),
        },
        Command::UnloadCargo { rocket } => match world.unload_cargo(rocket) {
            Ok(amount) => out_events.push(Event::CargoUnloaded { rocket, amount }),
            Err(reason) => reject_mission(rocket, reason, out_events),
        },
        Command::Refuel { rocket } => refuel(world, rocket, FuelPricing::Flat, out_events),
        Command::TopUpFuel { rocket } => refuel(world, rocket, FuelPricing::PerUnit, out_events),
        Command::SellCarbon { amount } => sell(world, amount, out_events),
        Command::SellShare { share } => {
            let amount = share.of(world.carbon);
            sell(world, amount, out_events);
        }
        Command::PurchaseUpgrade { upgrade } => match world.purchase_upgrade(upgrade) {
            Ok(purchase) => {
                out_events.push(Event::UpgradePurchased {
                    upgrade,
                    cost: purchase.cost,
                });
                if let Some(rocket) = purchase.commissioned {
                    out_events.push(Event::RocketCommissioned { rocket });
                }
            }
            Err(reason) => {
                log::debug!("purchase of {upgrade} rejected: {reason}");
                out_events.push(Event::UpgradeRejected { upgrade, reason });
            }
        },
        Command::SetView { view } => {
            if world.current_view != view {
                world.current_view = view;
                out_events.push(Event::ViewChanged { view });
            }
        }
    }
}

fn start_scan(world: &mut World, request: ScanRequest, out_events: &mut Vec<Event>) {
    match world.start_scan(request) {
        Ok(energy_spent) => out_events.push(Event::ScanStarted {
            request,
            energy_spent,
        }),
        Err(reason) => {
            log::debug!("scan of {:?} rejected: {reason}", request.target);
            out_events.push(Event::ScanRejected {
                target: request.target,
                reason,
            });
        }
    }
}

fn reject_mission(rocket: RocketId, reason: MissionError, out_events: &mut Vec<Event>) {
    log::debug!("mission request for rocket {} rejected: {reason}", rocket.get());
    out_events.push(Event::MissionRejected { rocket, reason });
}

fn refuel(
    world: &mut World,
    rocket: RocketId,
    pricing: FuelPricing,
    out_events: &mut Vec<Event>,
) {
    match world.refuel(rocket, pricing) {
        Ok(refill) => out_events.push(Event::RocketRefueled {
            rocket,
            fuel_added: refill.fuel_added,
            cost: refill.cost,
        }),
        Err(reason) => {
            log::debug!("refuel of rocket {} rejected: {reason}", rocket.get());
            out_events.push(Event::RefuelRejected { rocket, reason });
        }
    }
}

fn sell(world: &mut World, amount: u64, out_events: &mut Vec<Event>) {
    match world.sell_carbon(amount) {
        Ok(credits) => out_events.push(Event::CarbonSold { amount, credits }),
        Err(reason) => {
            log::debug!("sale of {amount} carbon rejected: {reason}");
            out_events.push(Event::SaleRejected { reason });
        }
    }
}

impl World {
    fn toggle_mark(&mut self, coord: SectorCoord) -> Result<bool, MarkError> {
        let sector = self
            .sectors
            .get_mut(&coord)
            .ok_or(MarkError::UnknownSector)?;
        if !sector.scanned {
            return Err(MarkError::SectorNotScanned);
        }
        if sector.mining {
            return Err(MarkError::SectorAlreadyMining);
        }
        sector.marked = !sector.marked;
        Ok(sector.marked)
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use carbon_quest_core::{
        RocketId, ScanMode, SectorCoord, UpgradeKind, ViewPanel, WELCOME_BANNER,
    };

    use super::{Market, Rocket, Rules, Sector, Telescope, World, WorldSnapshot};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(_world: &World) -> &'static str {
        WELCOME_BANNER
    }

    /// Tuning knobs the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Carbon held at the station.
    #[must_use]
    pub fn carbon(world: &World) -> u64 {
        world.carbon
    }

    /// Station energy.
    #[must_use]
    pub fn energy(world: &World) -> u32 {
        world.energy
    }

    /// Spendable credits.
    #[must_use]
    pub fn credits(world: &World) -> f64 {
        world.credits
    }

    /// Provides read-only access to the telescope.
    #[must_use]
    pub fn telescope(world: &World) -> &Telescope {
        &world.telescope
    }

    /// Reports whether a scan is in flight.
    #[must_use]
    pub fn is_scanning(world: &World) -> bool {
        world.telescope.is_scanning()
    }

    /// Energy a scan of the given mode would cost right now.
    #[must_use]
    pub fn scan_cost(world: &World, mode: ScanMode) -> u32 {
        world.scan_cost(mode)
    }

    /// Every rocket in the fleet, ordered by identifier.
    #[must_use]
    pub fn rockets(world: &World) -> &[Rocket] {
        world.fleet.as_slice()
    }

    /// Looks up a single rocket.
    #[must_use]
    pub fn rocket(world: &World, id: RocketId) -> Option<&Rocket> {
        world.fleet.get(id)
    }

    /// Looks up a known sector.
    #[must_use]
    pub fn sector(world: &World, coord: SectorCoord) -> Option<&Sector> {
        world.sectors.get(&coord)
    }

    /// Iterates over every known sector in coordinate order.
    pub fn sectors(world: &World) -> impl Iterator<Item = &Sector> {
        world.sectors.values()
    }

    /// Coordinates of sectors flagged for mining.
    #[must_use]
    pub fn marked_sectors(world: &World) -> Vec<SectorCoord> {
        world
            .sectors
            .values()
            .filter(|sector| sector.marked)
            .map(|sector| sector.coord)
            .collect()
    }

    /// Every coordinate the galaxy view exposes, within telescope range of the origin.
    ///
    /// Rows run from the top (highest `y`) down, each from left to right.
    #[must_use]
    pub fn visible_coords(world: &World) -> Vec<SectorCoord> {
        let reach = i32::try_from(world.telescope.range).unwrap_or(i32::MAX);
        (-reach..=reach)
            .rev()
            .flat_map(|y| (-reach..=reach).map(move |x| SectorCoord::new(x, y)))
            .collect()
    }

    /// Carbon market.
    #[must_use]
    pub fn market(world: &World) -> &Market {
        &world.market
    }

    /// Panel presented to the player.
    #[must_use]
    pub fn current_view(world: &World) -> ViewPanel {
        world.current_view
    }

    /// Ticks applied since the game started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports whether another level of the upgrade can still be bought.
    #[must_use]
    pub fn upgrade_available(world: &World, upgrade: UpgradeKind) -> bool {
        !world.upgrade_maxed(upgrade)
    }

    /// Captures a serialisable copy of the whole world.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        world.to_snapshot()
    }
}
