use carbon_quest_core::{Command, Event, RocketId, SectorCoord, SellShare, UpgradeKind};
use carbon_quest_world::{self as world, query, Rules, SeededSource, World, WorldSnapshot};

#[test]
fn deterministic_replay_produces_identical_worlds() {
    let first = replay(42, scripted_commands());
    let second = replay(42, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::ScanResolved { .. })));
}

#[test]
fn different_seeds_roll_different_galaxies() {
    let first = replay(1, Vec::new());
    let second = replay(2, Vec::new());

    assert_ne!(first.snapshot.deposits, second.snapshot.deposits);
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    snapshot: WorldSnapshot,
    events: Vec<Event>,
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let mut rng = SeededSource::from_seed(seed);
    let mut world = World::new(Rules::default(), &mut rng);
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut rng, &mut events);
        log.extend(events);
    }

    ReplayOutcome {
        snapshot: query::snapshot(&world),
        events: log,
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::SweepArea {
            center: SectorCoord::ORIGIN,
        },
        Command::Tick,
        Command::Tick,
        Command::ResolveScan,
        Command::ClearScanProgress,
        Command::LaunchMission {
            rocket: None,
            target: SectorCoord::new(1, 1),
        },
    ];
    commands.extend(std::iter::repeat(Command::Tick).take(6));
    commands.extend([
        Command::RecallMission {
            rocket: RocketId::new(1),
        },
        Command::UnloadCargo {
            rocket: RocketId::new(1),
        },
        Command::SellShare {
            share: SellShare::Half,
        },
        Command::PurchaseUpgrade {
            upgrade: UpgradeKind::TelescopeAccuracy,
        },
        Command::ScanSector {
            target: SectorCoord::new(-2, 1),
        },
        Command::ResolveScan,
    ]);
    commands.extend(std::iter::repeat(Command::Tick).take(30));
    commands
}
