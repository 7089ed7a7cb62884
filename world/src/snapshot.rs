//! Serialisable image of the whole world, used for persistence and replay.

use std::collections::{BTreeMap, BTreeSet};

use carbon_quest_core::{SectorCoord, ViewPanel};
use serde::{Deserialize, Serialize};

use crate::{
    fleet::{Fleet, Rocket},
    market::Market,
    rules::Rules,
    scanning::Telescope,
    sectors::{Deposit, Sector},
    World,
};

/// Plain-data copy of every field of a [`World`] except its rules.
///
/// Sectors and deposits are stored as lists ordered by coordinate so that the
/// snapshot serialises to formats whose map keys must be strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Carbon held at the station.
    pub carbon: u64,
    /// Station energy.
    pub energy: u32,
    /// Spendable credits.
    pub credits: f64,
    /// Telescope state including any scan in flight.
    pub telescope: Telescope,
    /// Every rocket, ordered by identifier.
    pub rockets: Vec<Rocket>,
    /// Every known sector, ordered by coordinate.
    pub sectors: Vec<Sector>,
    /// Hidden generated deposits, ordered by coordinate.
    #[serde(default)]
    pub deposits: Vec<Deposit>,
    /// Panel presented to the player.
    #[serde(default)]
    pub current_view: ViewPanel,
    /// Carbon market.
    pub market: Market,
    /// Ticks applied since the game started.
    #[serde(default)]
    pub tick_index: u64,
    /// Position of the session's seeded random stream when the game was saved.
    ///
    /// Written and read by the driver that owns the stream; the world ignores it.
    #[serde(default)]
    pub random_position: Option<u64>,
}

impl World {
    /// Rebuilds a world from a snapshot, re-clamping every bounded field.
    #[must_use]
    pub fn from_snapshot(snapshot: WorldSnapshot, rules: Rules) -> Self {
        let WorldSnapshot {
            carbon,
            energy,
            credits,
            mut telescope,
            rockets,
            sectors,
            deposits,
            current_view,
            mut market,
            tick_index,
            random_position: _,
        } = snapshot;

        telescope.normalise(&rules.scanning);
        market.normalise(&rules.market);

        let mut sectors: BTreeMap<SectorCoord, Sector> = sectors
            .into_iter()
            .map(|mut sector| {
                sector.normalise();
                (sector.coord, sector)
            })
            .collect();
        let deposits = deposits
            .into_iter()
            .map(|deposit| (deposit.coord, deposit))
            .collect();

        let mut fleet = Fleet::from_rockets(rockets);
        let mut targeted = BTreeSet::new();
        for rocket in fleet.iter_mut() {
            rocket.normalise();
            let Some(target) = rocket.target_sector else {
                continue;
            };
            let reachable = sectors
                .get(&target)
                .is_some_and(|sector| sector.scanned && !sector.mined);
            if reachable && targeted.insert(target) {
                continue;
            }
            rocket.land();
        }
        for (coord, sector) in &mut sectors {
            sector.mining = targeted.contains(coord);
        }

        let credits = if credits.is_finite() {
            credits.max(0.0)
        } else {
            0.0
        };

        Self {
            carbon,
            energy: energy.min(rules.energy.max),
            credits,
            telescope,
            fleet,
            sectors,
            deposits,
            market,
            current_view,
            tick_index,
            rules,
        }
    }

    pub(crate) fn to_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            carbon: self.carbon,
            energy: self.energy,
            credits: self.credits,
            telescope: self.telescope.clone(),
            rockets: self.fleet.as_slice().to_vec(),
            sectors: self.sectors.values().cloned().collect(),
            deposits: self.deposits.values().cloned().collect(),
            current_view: self.current_view,
            market: self.market.clone(),
            tick_index: self.tick_index,
            random_position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use carbon_quest_core::RocketId;

    use super::*;
    use crate::random::SeededSource;

    fn fresh_snapshot() -> WorldSnapshot {
        let mut rng = SeededSource::from_seed(5);
        World::new(Rules::default(), &mut rng).to_snapshot()
    }

    #[test]
    fn restore_clamps_out_of_range_values() {
        let mut snapshot = fresh_snapshot();
        snapshot.energy = 900;
        snapshot.credits = f64::NAN;
        snapshot.market.carbon_price = 42.0;
        snapshot.telescope.scan_progress = 300;

        let world = World::from_snapshot(snapshot, Rules::default());
        let restored = world.to_snapshot();

        assert_eq!(restored.energy, 100);
        assert_eq!(restored.credits, 0.0);
        assert_eq!(restored.market.carbon_price, 20.0);
        assert_eq!(restored.telescope.scan_progress, 100);
    }

    #[test]
    fn restore_lands_rockets_targeting_unknown_sectors() {
        let mut snapshot = fresh_snapshot();
        let rocket = &mut snapshot.rockets[0];
        rocket.launched = true;
        rocket.target_sector = Some(SectorCoord::new(4, 4));
        rocket.mission_progress = 40;

        let world = World::from_snapshot(snapshot, Rules::default());
        let restored = world.to_snapshot();

        assert_eq!(restored.rockets[0].id, RocketId::new(1));
        assert!(!restored.rockets[0].launched);
        assert_eq!(restored.rockets[0].mission_progress, 0);
    }

    #[test]
    fn restore_derives_mining_flags_from_fleet() {
        let mut snapshot = fresh_snapshot();
        snapshot.sectors[0].mining = true;

        let world = World::from_snapshot(snapshot, Rules::default());

        assert!(world.to_snapshot().sectors.iter().all(|sector| !sector.mining));
    }
}
