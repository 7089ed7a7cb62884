//! Plain-text presentation of the world and its events.

use std::fmt::{self, Write as _};

use carbon_quest_core::{Event, RejectionCategory, ScanMode, SectorCoord, UpgradeKind, ViewPanel};
use carbon_quest_world::{query, World};

/// Renders the station summary followed by the active panel.
pub(crate) fn status(world: &World) -> String {
    let mut out = String::new();
    let telescope = query::telescope(world);
    let market = query::market(world);

    let _ = writeln!(
        out,
        "tick {:>5} | carbon {} | energy {}/{} | credits {:.2} | price {:.2}",
        query::tick_index(world),
        query::carbon(world),
        query::energy(world),
        query::rules(world).energy.max,
        query::credits(world),
        market.carbon_price,
    );
    let scan = match telescope.active_scan {
        Some(request) => format!(
            "scanning {} ({})",
            coord(request.target),
            match request.mode {
                ScanMode::Sector => "sector",
                ScanMode::Sweep => "sweep",
            }
        ),
        None if telescope.scan_progress > 0 => {
            format!("scan done at {}", coord(telescope.scan_target))
        }
        None => "idle".to_owned(),
    };
    let _ = writeln!(
        out,
        "telescope range {} accuracy {}% | {scan}",
        telescope.range, telescope.accuracy
    );
    out.push('\n');

    match query::current_view(world) {
        ViewPanel::Galaxy => galaxy(world, &mut out),
        ViewPanel::Telescope => self::telescope(world, &mut out),
        ViewPanel::Rockets => rockets(world, &mut out),
        ViewPanel::Market => self::market(world, &mut out),
        ViewPanel::Upgrades => upgrades(world, &mut out),
    }
    out
}

fn galaxy(world: &World, out: &mut String) {
    let width = usize::try_from(query::telescope(world).range).map_or(1, |range| 2 * range + 1);
    for row in query::visible_coords(world).chunks(width) {
        for at in row {
            out.push_str(&tile(world, *at));
        }
        out.push('\n');
    }
    out.push_str("legend: ?? unknown, nn density, ** marked, >> mining, -- mined\n");
}

fn tile(world: &World, at: SectorCoord) -> String {
    match query::sector(world, at) {
        None => " ?? ".to_owned(),
        Some(sector) if sector.mined => " -- ".to_owned(),
        Some(sector) if sector.mining => " >> ".to_owned(),
        Some(sector) if sector.marked => " ** ".to_owned(),
        Some(sector) => format!(" {:>2} ", (sector.carbon_density.round() as u32).min(99)),
    }
}

fn telescope(world: &World, out: &mut String) {
    let telescope = query::telescope(world);
    let range = f64::from(telescope.range);
    let covered = query::visible_coords(world)
        .into_iter()
        .filter(|at| at.euclidean_from_origin() <= range)
        .count();
    let _ = writeln!(out, "range {} | accuracy {}%", telescope.range, telescope.accuracy);
    let _ = writeln!(
        out,
        "sector scan cost {} | sweep cost {}",
        query::scan_cost(world, ScanMode::Sector),
        query::scan_cost(world, ScanMode::Sweep),
    );
    let _ = writeln!(out, "a sweep from the origin covers {covered} sectors");
}

fn rockets(world: &World, out: &mut String) {
    for rocket in query::rockets(world) {
        let state = match rocket.target_sector {
            Some(target) if rocket.mission_ready() => format!("ready at {}", coord(target)),
            Some(target) => format!("mining {} {}%", coord(target), rocket.mission_progress),
            None => "docked".to_owned(),
        };
        let _ = writeln!(
            out,
            "#{} {:<12} fuel {:>3}/{:<3} cargo {:>3}/{:<3} drill {} | {state}",
            rocket.id.get(),
            rocket.name,
            rocket.fuel,
            rocket.max_fuel,
            rocket.cargo,
            rocket.max_cargo,
            rocket.drill_power,
        );
    }

    let targets = query::marked_sectors(world)
        .into_iter()
        .filter_map(|at| query::sector(world, at))
        .filter(|sector| sector.is_minable())
        .map(|sector| format!("{} density {:.0}", coord(sector.coord), sector.carbon_density))
        .collect::<Vec<_>>();
    if targets.is_empty() {
        out.push_str("launch targets: none marked\n");
    } else {
        let _ = writeln!(out, "launch targets: {}", targets.join(", "));
    }
}

fn market(world: &World, out: &mut String) {
    let history = query::market(world)
        .price_history
        .iter()
        .map(|price| format!("{price:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "price history: {history}");
}

fn upgrades(world: &World, out: &mut String) {
    for upgrade in UpgradeKind::ALL {
        let state = if query::upgrade_available(world, upgrade) {
            format!("{} credits", upgrade.cost())
        } else {
            "maxed".to_owned()
        };
        let _ = writeln!(
            out,
            "{:<13} {:<22} {state}",
            upgrade.slug(),
            upgrade.display_name()
        );
    }
}

/// One-line description of an event, or `None` for routine noise.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::Ticked { .. } | Event::MissionProgressed { .. } | Event::ScanProgressCleared => {
            return None
        }
        Event::MissionReady { rocket } => format!("rocket #{} is ready to complete", rocket.get()),
        Event::PriceChanged { price } => format!("carbon price moved to {price:.2}"),
        Event::ScanStarted {
            request,
            energy_spent,
        } => format!(
            "scan of {} started ({energy_spent} energy)",
            coord(request.target)
        ),
        Event::ScanRejected { reason, .. } => rejected("scan", reason.category(), reason),
        Event::ScanResolved { sectors, .. } => format!("scan resolved {} sector(s)", sectors.len()),
        Event::SectorMarkToggled { sector, marked } => format!(
            "sector {} {}",
            coord(*sector),
            if *marked { "marked" } else { "unmarked" }
        ),
        Event::MarkRejected { reason, .. } => rejected("mark", reason.category(), reason),
        Event::MissionLaunched { rocket, target } => {
            format!("rocket #{} launched to {}", rocket.get(), coord(*target))
        }
        Event::LaunchRejected { reason, .. } => rejected("launch", reason.category(), reason),
        Event::MissionCompleted {
            rocket,
            carbon_gained,
            ..
        } => format!("rocket #{} returned with {carbon_gained} carbon", rocket.get()),
        Event::MissionRecalled {
            rocket,
            cargo_gained,
            ..
        } => format!("rocket #{} recalled carrying {cargo_gained} carbon", rocket.get()),
        Event::CargoUnloaded { rocket, amount } => {
            format!("unloaded {amount} carbon from rocket #{}", rocket.get())
        }
        Event::MissionRejected { reason, .. } => {
            rejected("mission request", reason.category(), reason)
        }
        Event::RocketRefueled {
            rocket,
            fuel_added,
            cost,
        } => format!(
            "rocket #{} took {fuel_added} fuel for {cost:.2} credits",
            rocket.get()
        ),
        Event::RefuelRejected { reason, .. } => rejected("refuel", reason.category(), reason),
        Event::CarbonSold { amount, credits } => {
            format!("sold {amount} carbon for {credits:.2} credits")
        }
        Event::SaleRejected { reason } => rejected("sale", reason.category(), reason),
        Event::UpgradePurchased { upgrade, cost } => {
            format!("purchased {upgrade} for {cost:.0}")
        }
        Event::RocketCommissioned { rocket } => {
            format!("rocket #{} joined the fleet", rocket.get())
        }
        Event::UpgradeRejected { upgrade, reason } => {
            rejected(&upgrade.to_string(), reason.category(), reason)
        }
        Event::ViewChanged { .. } => return None,
    };
    Some(line)
}

fn rejected(action: &str, category: RejectionCategory, reason: &impl fmt::Display) -> String {
    let class = match category {
        RejectionCategory::InsufficientResource => "insufficient resources",
        RejectionCategory::InvalidTarget => "invalid target",
    };
    format!("{action} rejected, {class}: {reason}")
}

fn coord(at: SectorCoord) -> String {
    format!("({}, {})", at.x(), at.y())
}

#[cfg(test)]
mod tests {
    use carbon_quest_core::{LaunchError, RocketId, SaleError};
    use carbon_quest_world::{Rules, Sector, SeededSource, WorldSnapshot};

    use super::*;

    fn world_with(edit: impl FnOnce(&mut WorldSnapshot)) -> World {
        let world = World::new(Rules::default(), &mut SeededSource::from_seed(4));
        let mut snapshot = query::snapshot(&world);
        edit(&mut snapshot);
        World::from_snapshot(snapshot, Rules::default())
    }

    #[test]
    fn status_shows_resources_and_unknown_tiles() {
        let world = World::new(Rules::default(), &mut SeededSource::from_seed(4));
        let text = status(&world);

        assert!(text.contains("carbon 0"));
        assert!(text.contains("energy 100/100"));
        assert!(text.contains("credits 1000.00"));
        assert!(text.contains(" ?? "));
        assert_eq!(text.lines().filter(|line| line.starts_with(" ")).count(), 7);
    }

    #[test]
    fn routine_events_are_silent() {
        assert_eq!(describe(&Event::Ticked { tick: 3 }), None);
        assert_eq!(
            describe(&Event::SaleRejected {
                reason: SaleError::NothingToSell
            })
            .as_deref(),
            Some("sale rejected, insufficient resources: nothing to sell")
        );
        assert_eq!(
            describe(&Event::MissionReady {
                rocket: RocketId::new(2)
            })
            .as_deref(),
            Some("rocket #2 is ready to complete")
        );
    }

    #[test]
    fn rejections_are_phrased_by_category() {
        let line = describe(&Event::LaunchRejected {
            rocket: None,
            target: SectorCoord::new(2, 2),
            reason: LaunchError::UnknownSector,
        })
        .expect("rejections are reported");
        assert!(line.starts_with("launch rejected, invalid target: "));
    }

    #[test]
    fn telescope_panel_reports_costs_and_sweep_coverage() {
        let world = world_with(|snapshot| snapshot.current_view = ViewPanel::Telescope);
        let text = status(&world);

        assert!(text.contains("range 3 | accuracy 60%"));
        assert!(text.contains("sector scan cost 10 | sweep cost 20"));
        assert!(text.contains("covers 29 sectors"));
        assert!(!text.contains(" ?? "));
    }

    #[test]
    fn rockets_panel_lists_marked_minable_sectors() {
        let world = world_with(|snapshot| {
            snapshot.current_view = ViewPanel::Rockets;
            let mut rich = Sector::revealed(SectorCoord::new(1, 2), 80.0, 2);
            rich.marked = true;
            let mut empty = Sector::revealed(SectorCoord::new(-1, 0), 0.0, 1);
            empty.marked = true;
            snapshot.sectors.extend([rich, empty]);
        });
        let text = status(&world);

        assert!(text.contains("docked"));
        assert!(text.contains("launch targets: (1, 2) density 80"));
        assert!(!text.contains("(-1, 0)"));
    }
}
