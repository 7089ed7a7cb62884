//! Rocket records and identifier allocation.

use carbon_quest_core::{RocketId, SectorCoord};
use serde::{Deserialize, Serialize};

/// Mission progress at which a rocket awaits completion.
pub const FULL_PROGRESS: u32 = 100;

/// Mining unit owned by the player's fleet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// Identifier allocated by the world.
    pub id: RocketId,
    /// Display name.
    pub name: String,
    /// Fuel in the tank.
    pub fuel: u32,
    /// Tank capacity.
    pub max_fuel: u32,
    /// Carbon carried in the hold.
    pub cargo: u32,
    /// Hold capacity.
    pub max_cargo: u32,
    /// Multiplier applied to mission yields.
    pub drill_power: u32,
    /// The rocket is away on a mission.
    pub launched: bool,
    /// Sector the current mission is mining.
    pub target_sector: Option<SectorCoord>,
    /// Mission progress in percent.
    pub mission_progress: u32,
}

impl Rocket {
    /// Builds a fully fuelled, empty, idle rocket.
    #[must_use]
    pub fn fresh(id: RocketId, name: String, max_fuel: u32, max_cargo: u32) -> Self {
        Self {
            id,
            name,
            fuel: max_fuel,
            max_fuel,
            cargo: 0,
            max_cargo,
            drill_power: 1,
            launched: false,
            target_sector: None,
            mission_progress: 0,
        }
    }

    /// Reports whether the rocket is parked at the station.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.launched
    }

    /// Reports whether the current mission awaits confirmation.
    #[must_use]
    pub fn mission_ready(&self) -> bool {
        self.launched && self.mission_progress >= FULL_PROGRESS
    }

    pub(crate) fn land(&mut self) {
        self.launched = false;
        self.target_sector = None;
        self.mission_progress = 0;
    }

    pub(crate) fn normalise(&mut self) {
        self.fuel = self.fuel.min(self.max_fuel);
        self.cargo = self.cargo.min(self.max_cargo);
        self.drill_power = self.drill_power.max(1);
        self.mission_progress = self.mission_progress.min(FULL_PROGRESS);
        if !self.launched || self.target_sector.is_none() {
            self.land();
        }
    }
}

/// Registry that stores rockets and manages identifier allocation.
#[derive(Clone, Debug)]
pub(crate) struct Fleet {
    rockets: Vec<Rocket>,
    next_rocket_id: RocketId,
}

impl Fleet {
    /// Creates a fleet from existing rockets, continuing identifiers after the highest one.
    pub(crate) fn from_rockets(mut rockets: Vec<Rocket>) -> Self {
        rockets.sort_by_key(|rocket| rocket.id);
        rockets.dedup_by_key(|rocket| rocket.id);
        let next = rockets
            .last()
            .map_or(1, |rocket| rocket.id.get().saturating_add(1));
        Self {
            rockets,
            next_rocket_id: RocketId::new(next),
        }
    }

    /// Adds a freshly built rocket named after its position in the fleet.
    pub(crate) fn commission(&mut self, max_fuel: u32, max_cargo: u32) -> RocketId {
        let id = self.next_rocket_id;
        self.next_rocket_id = RocketId::new(id.get().saturating_add(1));
        let name = pioneer_name(self.rockets.len() + 1);
        self.rockets
            .push(Rocket::fresh(id, name, max_fuel, max_cargo));
        id
    }

    pub(crate) fn get(&self, id: RocketId) -> Option<&Rocket> {
        self.rockets.iter().find(|rocket| rocket.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: RocketId) -> Option<&mut Rocket> {
        self.rockets.iter_mut().find(|rocket| rocket.id == id)
    }

    pub(crate) fn as_slice(&self) -> &[Rocket] {
        &self.rockets
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Rocket> {
        self.rockets.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.rockets.len()
    }
}

/// Display name of the n-th rocket, counted from one.
#[must_use]
pub fn pioneer_name(ordinal: usize) -> String {
    match ordinal {
        1 => "Pioneer I".to_owned(),
        n => format!("Pioneer {n}"),
    }
}
