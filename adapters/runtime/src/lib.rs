#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-writer session driving a Carbon Quest world in simulated time.
//!
//! A [`Session`] owns the world, its random stream, the scheduler and the
//! save slot. Ticks, scheduled intents and player commands are all applied
//! one at a time through the same queue, so no write can be lost.

mod config;

use std::{collections::VecDeque, time::Duration};

use carbon_quest_core::{Command, Event};
use carbon_quest_storage::SaveSlot;
use carbon_quest_system_scheduler::{Config as SchedulerConfig, Scheduler};
use carbon_quest_world::{self as world, query, Rules, SeededSource, World, WorldSnapshot};

pub use config::SessionConfig;

/// Callback notified after every batch of events.
pub type Observer = Box<dyn FnMut(&World, &[Event])>;

/// Owner of the live game state.
pub struct Session {
    world: World,
    rng: SeededSource,
    scheduler: Scheduler,
    rules: Rules,
    seed: Option<u64>,
    now: Duration,
    tick_interval: Duration,
    next_tick_at: Duration,
    slot: Option<SaveSlot>,
    observers: Vec<Observer>,
}

impl Session {
    /// Starts a fresh game without persistence.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        let mut rng = random_source(config.seed);
        let world = World::new(config.rules.clone(), &mut rng);
        log::info!("started a new game");
        Self::assemble(config, world, rng, None)
    }

    /// Resumes the game stored in `slot`, or starts a new one when none is stored.
    ///
    /// A scan that was in flight when the game was saved is re-armed so the
    /// telescope lock always clears. With a configured seed the random stream
    /// continues from the position recorded in the save.
    #[must_use]
    pub fn resume(config: &SessionConfig, slot: SaveSlot) -> Self {
        let (world, rng) = match slot.load() {
            Some(snapshot) => {
                log::info!("restored saved game at tick {}", snapshot.tick_index);
                let rng = match (config.seed, snapshot.random_position) {
                    (Some(seed), Some(position)) => SeededSource::resumed(seed, position),
                    _ => random_source(config.seed),
                };
                (World::from_snapshot(snapshot, config.rules.clone()), rng)
            }
            None => {
                log::info!("no saved game found, starting a new one");
                let mut rng = random_source(config.seed);
                (World::new(config.rules.clone(), &mut rng), rng)
            }
        };

        let mut session = Self::assemble(config, world, rng, Some(slot));
        session.rearm_pending_scan();
        session.save();
        session
    }

    fn assemble(
        config: &SessionConfig,
        world: World,
        rng: SeededSource,
        slot: Option<SaveSlot>,
    ) -> Self {
        let tick_interval = config.tick_interval();
        Self {
            world,
            rng,
            scheduler: Scheduler::new(SchedulerConfig::new(
                config.scan_delay(),
                config.scan_progress_linger(),
            )),
            rules: config.rules.clone(),
            seed: config.seed,
            now: Duration::ZERO,
            tick_interval,
            next_tick_at: tick_interval,
            slot,
            observers: Vec::new(),
        }
    }

    /// Registers a callback invoked with the world and every batch of events.
    pub fn subscribe(&mut self, observer: impl FnMut(&World, &[Event]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Read-only access to the live world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Simulated time elapsed since the session started.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        query::snapshot(&self.world)
    }

    /// Applies a player command immediately and returns every resulting event.
    pub fn dispatch(&mut self, command: Command) -> Vec<Event> {
        log::debug!("dispatching {command:?}");
        let mut events = Vec::new();
        self.run_queue(VecDeque::from([command]), &mut events);
        self.publish(&events);
        events
    }

    /// Moves simulated time forward, applying every tick and scheduled intent
    /// that falls due, in chronological order.
    ///
    /// At an instant where both a tick and an intent are due, the tick is
    /// applied first.
    pub fn advance(&mut self, dt: Duration) -> Vec<Event> {
        let target = self.now.saturating_add(dt);
        let mut events = Vec::new();

        loop {
            let next = match self.scheduler.next_due() {
                Some(due) => due.min(self.next_tick_at),
                None => self.next_tick_at,
            };
            if next > target {
                break;
            }
            self.now = self.now.max(next);

            let mut queue = VecDeque::new();
            if self.next_tick_at <= self.now {
                queue.push_back(Command::Tick);
                self.next_tick_at = self.next_tick_at.saturating_add(self.tick_interval);
            }
            let mut due = Vec::new();
            self.scheduler.handle(self.now, &[], &mut due);
            queue.extend(due);
            self.run_queue(queue, &mut events);
        }

        self.now = target;
        if !events.is_empty() {
            self.publish(&events);
        }
        events
    }

    /// Discards the current game and any save, then starts over.
    pub fn reset(&mut self) {
        if let Some(slot) = self.slot.as_mut() {
            slot.clear();
        }
        self.scheduler.clear();
        self.rng = random_source(self.seed);
        self.world = World::new(self.rules.clone(), &mut self.rng);
        log::info!("reset the game");
        self.save();
        self.publish(&[]);
    }

    /// Writes the current state to the save slot, if one is attached.
    pub fn save(&mut self) {
        if let Some(slot) = self.slot.as_mut() {
            let mut snapshot = query::snapshot(&self.world);
            snapshot.random_position = self.seed.map(|_| self.rng.position());
            let _ = slot.save(&snapshot);
        }
    }

    fn rearm_pending_scan(&mut self) {
        if query::is_scanning(&self.world) {
            log::info!("re-arming scan that was in flight when saved");
            self.scheduler.schedule_scan_resolution(self.now);
        }
    }

    fn run_queue(&mut self, mut queue: VecDeque<Command>, emitted: &mut Vec<Event>) {
        while let Some(command) = queue.pop_front() {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut self.rng, &mut events);

            let mut follow_up = Vec::new();
            self.scheduler.handle(self.now, &events, &mut follow_up);
            queue.extend(follow_up);
            emitted.extend(events);
        }
    }

    fn publish(&mut self, events: &[Event]) {
        if events.iter().any(|event| !event.is_rejection()) {
            self.save();
        }
        for observer in &mut self.observers {
            observer(&self.world, events);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("now", &self.now)
            .field("tick", &query::tick_index(&self.world))
            .field("pending_intents", &self.scheduler.pending())
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

fn random_source(seed: Option<u64>) -> SeededSource {
    match seed {
        Some(seed) => SeededSource::from_seed(seed),
        None => SeededSource::from_entropy(),
    }
}
