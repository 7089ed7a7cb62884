use std::time::Duration;

use carbon_quest_core::{Command, Event, ScanMode, ScanRequest, SectorCoord};
use carbon_quest_system_scheduler::{Config, Scheduler};
use carbon_quest_world::{self as world, query, Rules, SeededSource, World};

fn scheduler() -> Scheduler {
    Scheduler::new(Config::new(Duration::from_secs(3), Duration::from_secs(1)))
}

fn scan_started() -> Event {
    Event::ScanStarted {
        request: ScanRequest {
            target: SectorCoord::new(1, 1),
            mode: ScanMode::Sector,
        },
        energy_spent: 10,
    }
}

#[test]
fn scan_start_schedules_resolution_after_delay() {
    let mut scheduler = scheduler();
    let mut out = Vec::new();

    scheduler.handle(Duration::from_millis(500), &[scan_started()], &mut out);
    assert!(out.is_empty());
    assert_eq!(scheduler.next_due(), Some(Duration::from_millis(3500)));

    scheduler.handle(Duration::from_millis(3499), &[], &mut out);
    assert!(out.is_empty());

    scheduler.handle(Duration::from_millis(3500), &[], &mut out);
    assert_eq!(out, vec![Command::ResolveScan]);
    assert_eq!(scheduler.pending(), 0);
    assert_eq!(scheduler.next_due(), None);
}

#[test]
fn resolution_schedules_progress_reset() {
    let mut scheduler = scheduler();
    let mut out = Vec::new();
    let resolved = Event::ScanResolved {
        request: ScanRequest {
            target: SectorCoord::ORIGIN,
            mode: ScanMode::Sweep,
        },
        sectors: vec![SectorCoord::ORIGIN],
    };

    scheduler.handle(Duration::from_secs(3), &[resolved], &mut out);
    assert!(out.is_empty());

    scheduler.handle(Duration::from_secs(4), &[], &mut out);
    assert_eq!(out, vec![Command::ClearScanProgress]);
}

#[test]
fn unrelated_events_schedule_nothing() {
    let mut scheduler = scheduler();
    let mut out = Vec::new();
    scheduler.handle(
        Duration::ZERO,
        &[Event::Ticked { tick: 1 }, Event::PriceChanged { price: 11.0 }],
        &mut out,
    );
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn clear_drops_pending_intents() {
    let mut scheduler = scheduler();
    scheduler.schedule_scan_resolution(Duration::ZERO);
    assert_eq!(scheduler.pending(), 1);
    scheduler.clear();
    assert_eq!(scheduler.next_due(), None);
}

#[test]
fn drives_a_world_scan_to_completion() {
    let mut rng = SeededSource::from_seed(12);
    let mut world = World::new(Rules::default(), &mut rng);
    let mut scheduler = scheduler();
    let mut commands = Vec::new();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ScanSector {
            target: SectorCoord::new(-1, 2),
        },
        &mut rng,
        &mut events,
    );
    scheduler.handle(Duration::ZERO, &events, &mut commands);
    assert!(query::is_scanning(&world));

    let mut now = Duration::ZERO;
    while let Some(due) = scheduler.next_due() {
        now = due;
        scheduler.handle(now, &[], &mut commands);
        for command in commands.drain(..) {
            let mut events = Vec::new();
            world::apply(&mut world, command, &mut rng, &mut events);
            let mut follow_up = Vec::new();
            scheduler.handle(now, &events, &mut follow_up);
            assert!(follow_up.is_empty());
        }
    }

    assert_eq!(now, Duration::from_secs(4));
    assert!(!query::is_scanning(&world));
    assert_eq!(query::telescope(&world).scan_progress, 0);
    assert!(query::sector(&world, SectorCoord::new(-1, 2)).is_some());
}
