use carbon_quest_core::{
    Command, Event, LaunchError, RejectionCategory, RocketId, SectorCoord, SellShare, UpgradeKind,
    ViewPanel,
};
use carbon_quest_world::{self as world, query, Rules, Sector, SeededSource, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn invariants_hold_under_random_command_streams() {
    for seed in 0..8_u64 {
        let mut rng = SeededSource::from_seed(seed);
        let mut world = World::new(Rules::default(), &mut rng);
        let mut chooser = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

        for _ in 0..400 {
            let command = random_command(&mut chooser);
            let before = query::snapshot(&world);
            let mut events = Vec::new();
            world::apply(&mut world, command.clone(), &mut rng, &mut events);

            if events.iter().any(Event::is_rejection) {
                assert_eq!(events.len(), 1, "{command:?} produced {events:?}");
                assert_eq!(
                    query::snapshot(&world),
                    before,
                    "rejected {command:?} changed state"
                );
            }
            assert_invariants(&world);
        }
    }
}

fn random_command(rng: &mut ChaCha8Rng) -> Command {
    let coord = SectorCoord::new(rng.gen_range(-4..=4), rng.gen_range(-4..=4));
    let rocket = RocketId::new(rng.gen_range(1..=3));
    match rng.gen_range(0..16) {
        0..=3 => Command::Tick,
        4 => Command::ScanSector { target: coord },
        5 => Command::SweepArea { center: coord },
        6 => Command::ResolveScan,
        7 => Command::ClearScanProgress,
        8 => Command::ToggleMark { sector: coord },
        9 => Command::LaunchMission {
            rocket: rng.gen_bool(0.5).then_some(rocket),
            target: coord,
        },
        10 => {
            if rng.gen_bool(0.5) {
                Command::CompleteMission { rocket }
            } else {
                Command::RecallMission { rocket }
            }
        }
        11 => Command::UnloadCargo { rocket },
        12 => {
            if rng.gen_bool(0.5) {
                Command::Refuel { rocket }
            } else {
                Command::TopUpFuel { rocket }
            }
        }
        13 => Command::SellShare {
            share: [SellShare::Quarter, SellShare::Half, SellShare::All][rng.gen_range(0..3)],
        },
        14 => Command::PurchaseUpgrade {
            upgrade: UpgradeKind::ALL[rng.gen_range(0..UpgradeKind::ALL.len())],
        },
        _ => Command::SetView {
            view: ViewPanel::Rockets,
        },
    }
}

fn assert_invariants(world: &World) {
    assert!(query::energy(world) <= 100);
    assert!(query::credits(world) >= 0.0);

    let market = query::market(world);
    assert!((5.0..=20.0).contains(&market.carbon_price));
    assert!(market.price_history.len() <= 10);

    for sector in query::sectors(world) {
        assert_sector(sector);
    }

    let rockets = query::rockets(world);
    assert!(rockets.len() <= 5);
    for rocket in rockets {
        assert!(rocket.fuel <= rocket.max_fuel);
        assert!(rocket.cargo <= rocket.max_cargo);
        assert!(rocket.mission_progress <= 100);
        assert!(rocket.drill_power >= 1);
        if rocket.launched {
            let target = rocket.target_sector.expect("launched rocket has a target");
            let sector = query::sector(world, target).expect("target sector is known");
            assert!(sector.mining);
        } else {
            assert_eq!(rocket.mission_progress, 0);
            assert_eq!(rocket.target_sector, None);
        }
    }

    let flying = rockets.iter().filter(|rocket| rocket.launched).count();
    let mining = query::sectors(world).filter(|sector| sector.mining).count();
    assert_eq!(flying, mining, "each mined sector has exactly one rocket");
}

fn assert_sector(sector: &Sector) {
    assert!((0.0..=100.0).contains(&sector.carbon_density));
    if sector.scanned {
        assert!(sector.discovered);
    }
    if sector.mining {
        assert!(sector.scanned && !sector.mined);
    }
}

#[test]
fn launch_rejections_are_distinct() {
    let target = SectorCoord::new(1, 0);
    let mut snapshot = query::snapshot(&World::new(
        Rules::default(),
        &mut SeededSource::from_seed(9),
    ));
    snapshot.sectors.push(Sector::revealed(target, 60.0, 1));
    let mut empty = Sector::revealed(SectorCoord::new(0, 1), 0.0, 1);
    empty.carbon_density = 0.0;
    snapshot.sectors.push(empty);
    let mut unscanned = Sector::revealed(SectorCoord::new(-1, 0), 40.0, 1);
    unscanned.scanned = false;
    snapshot.sectors.push(unscanned);

    let base = World::from_snapshot(snapshot.clone(), Rules::default());
    let reject = |world: &World, rocket: Option<RocketId>, target: SectorCoord| {
        let mut world = world.clone();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::LaunchMission { rocket, target },
            &mut SeededSource::from_seed(0),
            &mut events,
        );
        match events.as_slice() {
            [Event::LaunchRejected { reason, .. }] => *reason,
            other => panic!("expected a launch rejection, got {other:?}"),
        }
    };

    let mut reasons = vec![
        reject(&base, Some(RocketId::new(7)), target),
        reject(&base, None, SectorCoord::new(3, 3)),
        reject(&base, None, SectorCoord::new(-1, 0)),
        reject(&base, None, SectorCoord::new(0, 1)),
    ];

    let mut low_energy = snapshot.clone();
    low_energy.energy = 10;
    reasons.push(reject(
        &World::from_snapshot(low_energy, Rules::default()),
        None,
        target,
    ));

    let mut dry = snapshot.clone();
    dry.rockets[0].fuel = 5;
    reasons.push(reject(
        &World::from_snapshot(dry, Rules::default()),
        None,
        target,
    ));

    let mut busy = base.clone();
    let mut events = Vec::new();
    world::apply(
        &mut busy,
        Command::LaunchMission {
            rocket: None,
            target,
        },
        &mut SeededSource::from_seed(0),
        &mut events,
    );
    reasons.push(reject(&busy, Some(RocketId::new(1)), SectorCoord::new(-1, 0)));
    reasons.push(reject(&busy, None, target));

    assert_eq!(
        reasons,
        vec![
            LaunchError::UnknownRocket,
            LaunchError::UnknownSector,
            LaunchError::SectorNotScanned,
            LaunchError::SectorDepleted,
            LaunchError::InsufficientEnergy {
                required: 30,
                available: 10
            },
            LaunchError::InsufficientFuel {
                required: 20,
                available: 5
            },
            LaunchError::RocketBusy,
            LaunchError::NoRocketAvailable,
        ]
    );
    assert_eq!(
        reasons[4].category(),
        RejectionCategory::InsufficientResource
    );
    assert_eq!(reasons[1].category(), RejectionCategory::InvalidTarget);
}

#[test]
fn saved_snapshot_survives_json_round_trip() {
    let mut rng = SeededSource::from_seed(77);
    let mut world = World::new(Rules::default(), &mut rng);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SweepArea {
            center: SectorCoord::ORIGIN,
        },
        &mut rng,
        &mut events,
    );

    let snapshot = query::snapshot(&world);
    let json = serde_json::to_string(&snapshot).expect("serialise snapshot");
    let restored: world::WorldSnapshot = serde_json::from_str(&json).expect("parse snapshot");
    let rebuilt = World::from_snapshot(restored, Rules::default());

    assert!(query::is_scanning(&rebuilt));
    assert_eq!(query::energy(&rebuilt), query::energy(&world));
    assert_eq!(query::rockets(&rebuilt), query::rockets(&world));
    assert_eq!(
        query::sectors(&rebuilt).count(),
        query::sectors(&world).count()
    );
}
