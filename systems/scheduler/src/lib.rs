#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic scheduler that turns world events into delayed one-shot commands.
//!
//! Scheduled entries carry only the intent ("resolve the active scan"); the
//! world re-derives everything from live state when the command arrives.

use std::time::Duration;

use carbon_quest_core::{Command, Event};

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    scan_delay: Duration,
    progress_linger: Duration,
}

impl Config {
    /// Creates a configuration from the scan duration and the time the
    /// completed progress indicator stays visible.
    #[must_use]
    pub const fn new(scan_delay: Duration, progress_linger: Duration) -> Self {
        Self {
            scan_delay,
            progress_linger,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    ResolveScan,
    ClearScanProgress,
}

impl Intent {
    fn command(self) -> Command {
        match self {
            Self::ResolveScan => Command::ResolveScan,
            Self::ClearScanProgress => Command::ClearScanProgress,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: Duration,
    sequence: u64,
    intent: Intent,
}

/// Pure system holding delayed intents against a simulated clock.
#[derive(Debug)]
pub struct Scheduler {
    scan_delay: Duration,
    progress_linger: Duration,
    pending: Vec<Entry>,
    next_sequence: u64,
}

impl Scheduler {
    /// Creates a new scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            scan_delay: config.scan_delay,
            progress_linger: config.progress_linger,
            pending: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Schedules intents for the provided events and emits every intent due at `now`.
    ///
    /// Emitted commands are ordered by due time, ties broken by scheduling order.
    pub fn handle(&mut self, now: Duration, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::ScanStarted { .. } => self.schedule_scan_resolution(now),
                Event::ScanResolved { .. } => self.schedule(
                    now.saturating_add(self.progress_linger),
                    Intent::ClearScanProgress,
                ),
                _ => {}
            }
        }

        self.pending.sort_by_key(|entry| (entry.due, entry.sequence));
        let ready = self.pending.partition_point(|entry| entry.due <= now);
        out.extend(self.pending.drain(..ready).map(|entry| entry.intent.command()));
    }

    /// Arms the resolution of a scan that started at `started_at`.
    ///
    /// Used when resuming a game whose telescope was mid-scan.
    pub fn schedule_scan_resolution(&mut self, started_at: Duration) {
        self.schedule(started_at.saturating_add(self.scan_delay), Intent::ResolveScan);
    }

    /// Earliest instant at which an intent becomes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// Number of intents waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops every scheduled intent.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn schedule(&mut self, due: Duration, intent: Intent) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.pending.push(Entry {
            due,
            sequence,
            intent,
        });
    }
}
