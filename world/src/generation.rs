//! Initial-state generation for new games.

use carbon_quest_core::SectorCoord;

use crate::{
    fleet::Rocket,
    random::RandomSource,
    rules::{FleetRules, GenerationRules},
    sectors::{clamp_density, Deposit, Sector},
};

/// Rolls the hidden deposits of the square galaxy centred on the origin.
///
/// Every coordinate in `-radius..=radius` on both axes receives
/// `max(0, U(0,100) - falloff * distance)` carbon and a depth in
/// `1..=max_depth`. Coordinates are visited column by column, drawing the
/// density before the depth, so a given random stream always yields the same
/// galaxy.
#[must_use]
pub fn initial_deposits(rules: &GenerationRules, rng: &mut dyn RandomSource) -> Vec<Deposit> {
    let radius = rules.radius.max(0);
    let side = usize::try_from(radius).unwrap_or(0) * 2 + 1;
    let mut deposits = Vec::with_capacity(side * side);

    for x in -radius..=radius {
        for y in -radius..=radius {
            let coord = SectorCoord::new(x, y);
            let distance = coord.euclidean_from_origin();
            let density = (rng.uniform(0.0, 100.0) - distance * rules.density_falloff).max(0.0);
            let depth = rng.int_inclusive(1, rules.max_depth.max(1));
            deposits.push(Deposit {
                coord,
                density: clamp_density(density),
                depth,
            });
        }
    }

    deposits
}

/// Materialises the station's home sector from the generated deposits.
///
/// The origin is the only sector known at the start of a game. When the
/// generator produced no deposit there the sector starts empty.
#[must_use]
pub fn home_sector(deposits: &[Deposit]) -> Sector {
    deposits
        .iter()
        .find(|deposit| deposit.coord == SectorCoord::ORIGIN)
        .map_or_else(
            || Sector::revealed(SectorCoord::ORIGIN, 0.0, 1),
            |deposit| Sector::revealed(deposit.coord, deposit.density, deposit.depth),
        )
}

/// Builds the single rocket every new game starts with.
#[must_use]
pub fn initial_fleet(rules: &FleetRules) -> Vec<Rocket> {
    vec![Rocket::fresh(
        carbon_quest_core::RocketId::new(1),
        crate::fleet::pioneer_name(1),
        rules.base_max_fuel,
        rules.base_max_cargo,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SeededSource, SequenceSource};

    #[test]
    fn generates_full_square_with_bounded_values() {
        let rules = GenerationRules::default();
        let mut rng = SeededSource::from_seed(11);
        let deposits = initial_deposits(&rules, &mut rng);

        assert_eq!(deposits.len(), 15 * 15);
        for deposit in &deposits {
            assert!((0.0..=100.0).contains(&deposit.density));
            assert!((1..=5).contains(&deposit.depth));
            assert!(deposit.coord.chebyshev_from_origin() <= 7);
        }
    }

    #[test]
    fn density_falls_off_with_distance() {
        let rules = GenerationRules::default();
        let mut rng = SequenceSource::constant(0.5);
        let deposits = initial_deposits(&rules, &mut rng);

        let at = |x, y| {
            deposits
                .iter()
                .find(|deposit| deposit.coord == SectorCoord::new(x, y))
                .map(|deposit| deposit.density)
                .expect("deposit generated")
        };
        assert!((at(0, 0) - 50.0).abs() < 1e-9);
        assert!((at(3, 4) - 25.0).abs() < 1e-9);
        assert_eq!(at(7, 7), 0.0);
    }

    #[test]
    fn home_sector_is_discovered_and_scanned() {
        let rules = GenerationRules::default();
        let mut rng = SeededSource::from_seed(3);
        let deposits = initial_deposits(&rules, &mut rng);
        let home = home_sector(&deposits);

        assert_eq!(home.coord, SectorCoord::ORIGIN);
        assert!(home.discovered && home.scanned);
        assert!(!home.marked && !home.mining && !home.mined);
    }

    #[test]
    fn starting_fleet_is_one_idle_full_rocket() {
        let fleet = initial_fleet(&FleetRules::default());
        assert_eq!(fleet.len(), 1);
        let rocket = &fleet[0];
        assert_eq!(rocket.name, "Pioneer I");
        assert_eq!(rocket.fuel, rocket.max_fuel);
        assert_eq!(rocket.drill_power, 1);
        assert!(rocket.is_idle());
    }
}
