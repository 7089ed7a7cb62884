//! Fixed-period tick: energy regeneration, mission progress and market drift.

use carbon_quest_core::Event;

use crate::{fleet::FULL_PROGRESS, random::RandomSource, World};

impl World {
    pub(crate) fn tick(&mut self, rng: &mut dyn RandomSource, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);

        let energy = &self.rules.energy;
        self.energy = self
            .energy
            .saturating_add(energy.regen_per_tick)
            .min(energy.max);

        for (rocket, progress) in self.progress_missions() {
            out_events.push(Event::MissionProgressed { rocket, progress });
            if progress >= FULL_PROGRESS {
                out_events.push(Event::MissionReady { rocket });
            }
        }

        let market_rules = &self.rules.market;
        if rng.chance(market_rules.drift_chance) {
            let amplitude = market_rules.drift_amplitude;
            let delta = rng.uniform(-amplitude, amplitude);
            let price = self.market.drift(delta, market_rules);
            out_events.push(Event::PriceChanged { price });
        }

        out_events.push(Event::Ticked {
            tick: self.tick_index,
        });
    }
}
