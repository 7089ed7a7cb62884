use std::{cell::RefCell, path::PathBuf, rc::Rc, time::Duration};

use carbon_quest_core::{Command, Event, ScanError, SectorCoord, UpgradeKind};
use carbon_quest_runtime::{Session, SessionConfig};
use carbon_quest_storage::{DirectoryStore, SaveSlot};
use carbon_quest_world::query;

fn config() -> SessionConfig {
    SessionConfig {
        seed: Some(7),
        ..SessionConfig::default()
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "carbon-quest-session-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn position(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events
        .iter()
        .position(predicate)
        .unwrap_or_else(|| panic!("event missing from {events:?}"))
}

#[test]
fn scan_resolves_after_delay_and_progress_clears_later() {
    let mut session = Session::new(&config());
    let target = SectorCoord::new(1, 1);

    let events = session.dispatch(Command::ScanSector { target });
    assert!(matches!(events.as_slice(), [Event::ScanStarted { .. }]));
    assert_eq!(query::energy(session.world()), 90);
    assert!(query::is_scanning(session.world()));

    let _ = session.advance(Duration::from_millis(2_999));
    assert!(query::is_scanning(session.world()));

    let _ = session.advance(Duration::from_millis(1));
    assert!(!query::is_scanning(session.world()));
    let sector = query::sector(session.world(), target).expect("sector revealed");
    assert!(sector.scanned && sector.discovered);
    assert_eq!(query::telescope(session.world()).scan_progress, 100);

    let events = session.advance(Duration::from_secs(1));
    assert!(events.contains(&Event::ScanProgressCleared));
    assert_eq!(query::telescope(session.world()).scan_progress, 0);
}

#[test]
fn tick_and_resolution_due_together_both_apply() {
    let mut session = Session::new(&config());
    let _ = session.dispatch(Command::ScanSector {
        target: SectorCoord::new(0, 1),
    });

    let events = session.advance(Duration::from_secs(3));

    let third_tick = position(&events, |event| *event == Event::Ticked { tick: 3 });
    let resolved = position(&events, |event| {
        matches!(event, Event::ScanResolved { .. })
    });
    assert!(third_tick < resolved);
    assert_eq!(query::energy(session.world()), 93);
    assert_eq!(query::tick_index(session.world()), 3);
    assert_eq!(session.now(), Duration::from_secs(3));
}

#[test]
fn commands_during_scan_are_serialised_against_live_state() {
    let mut session = Session::new(&config());
    let _ = session.dispatch(Command::ScanSector {
        target: SectorCoord::new(1, 0),
    });
    let _ = session.advance(Duration::from_millis(1_500));

    let events = session.dispatch(Command::SweepArea {
        center: SectorCoord::ORIGIN,
    });
    assert!(matches!(
        events.as_slice(),
        [Event::ScanRejected {
            reason: ScanError::TelescopeBusy,
            ..
        }]
    ));

    let _ = session.dispatch(Command::PurchaseUpgrade {
        upgrade: UpgradeKind::TelescopeRange,
    });
    let _ = session.advance(Duration::from_millis(1_500));

    assert_eq!(query::credits(session.world()), 500.0);
    assert_eq!(query::telescope(session.world()).range, 4);
    assert!(query::sector(session.world(), SectorCoord::new(1, 0)).is_some());
}

#[test]
fn resumed_session_rearms_scan_in_flight() {
    let dir = scratch_dir("rearm");
    let target = SectorCoord::new(-1, 1);

    {
        let slot = SaveSlot::new(DirectoryStore::open(&dir).expect("open store"));
        let mut session = Session::resume(&config(), slot);
        let _ = session.dispatch(Command::ScanSector { target });
    }

    let slot = SaveSlot::new(DirectoryStore::open(&dir).expect("reopen store"));
    let mut session = Session::resume(&config(), slot);
    assert!(query::is_scanning(session.world()));
    assert_eq!(query::energy(session.world()), 90);

    let _ = session.advance(Duration::from_secs(3));
    assert!(!query::is_scanning(session.world()));
    assert!(query::sector(session.world(), target).is_some());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn resumed_seeded_stream_matches_an_uninterrupted_session() {
    let dir = scratch_dir("stream");
    let targets = [SectorCoord::new(1, 1), SectorCoord::new(-2, 0)];

    let mut continuous = Session::new(&config());
    for target in targets {
        let _ = continuous.dispatch(Command::ScanSector { target });
        let _ = continuous.advance(Duration::from_secs(3));
    }

    for target in targets {
        let slot = SaveSlot::new(DirectoryStore::open(&dir).expect("open store"));
        let mut session = Session::resume(&config(), slot);
        let _ = session.dispatch(Command::ScanSector { target });
        let _ = session.advance(Duration::from_secs(3));
    }

    let slot = SaveSlot::new(DirectoryStore::open(&dir).expect("reopen store"));
    let resumed = Session::resume(&config(), slot);
    assert_eq!(resumed.snapshot(), continuous.snapshot());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn reset_discards_progress() {
    let dir = scratch_dir("reset");
    let slot = SaveSlot::new(DirectoryStore::open(&dir).expect("open store"));
    let mut session = Session::resume(&config(), slot);

    let _ = session.dispatch(Command::PurchaseUpgrade {
        upgrade: UpgradeKind::TelescopeRange,
    });
    assert_eq!(query::credits(session.world()), 500.0);

    session.reset();
    assert_eq!(query::credits(session.world()), 1000.0);
    assert_eq!(query::telescope(session.world()).range, 3);

    let slot = SaveSlot::new(DirectoryStore::open(&dir).expect("reopen store"));
    let resumed = Session::resume(&config(), slot);
    assert_eq!(query::credits(resumed.world()), 1000.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn observers_receive_every_batch() {
    let mut session = Session::new(&config());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |world, events| {
        sink.borrow_mut()
            .push((query::tick_index(world), events.len()));
    });

    let _ = session.dispatch(Command::SellCarbon { amount: 1 });
    let _ = session.advance(Duration::from_secs(2));
    let _ = session.advance(Duration::from_millis(10));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], (0, 1));
    assert_eq!(seen[1].0, 2);
}

#[test]
fn seeded_sessions_replay_identically() {
    let run = || {
        let mut session = Session::new(&config());
        let _ = session.dispatch(Command::SweepArea {
            center: SectorCoord::ORIGIN,
        });
        let _ = session.advance(Duration::from_secs(5));
        let _ = session.dispatch(Command::LaunchMission {
            rocket: None,
            target: SectorCoord::new(1, 1),
        });
        let _ = session.advance(Duration::from_secs(40));
        session.snapshot()
    };

    assert_eq!(run(), run());
}
