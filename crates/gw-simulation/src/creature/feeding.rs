use rand::Rng;

use super::state::CreatureState;

/// The outcome of one meal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meal {
    /// Vegetation density removed from the chunk.
    pub consumed: f64,
    /// Satiation gained.
    pub gained: f64,
}

/// Try to graze on a chunk holding `vegetation` density.
///
/// Only plant eaters below `forage_ratio` satiation eat, and only when the
/// roll comes in under their eat chance. Consumption is capped by what the
/// chunk holds; satiation by the creature's maximum.
pub fn try_eat<R: Rng + ?Sized>(
    state: &CreatureState,
    vegetation: f64,
    forage_ratio: f64,
    rng: &mut R,
) -> Option<Meal> {
    if !state.can_eat_plants() || state.satiation_ratio() >= forage_ratio {
        return None;
    }
    let def = &state.definition;
    let roll: f64 = rng.random();
    if roll >= def.eat_chance {
        return None;
    }
    let consumed = def.consumption_per_eat.clamp(0.0, vegetation.max(0.0));
    if consumed <= 0.0 {
        return None;
    }
    let headroom = (state.max_satiation - state.satiation).max(0.0);
    let gained = (consumed * def.plant_nutrition).clamp(0.0, headroom);
    Some(Meal { consumed, gained })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::definition::{CreatureDefinition, Disposition, Trophic};
    use gw_core::GridPos;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grazer(satiation: f64) -> CreatureState {
        let def = CreatureDefinition::new("goat", Trophic::Herbivore, Disposition::Passive)
            .with_grazing(1.0, 5.0, 0.5);
        CreatureState::new("goat".into(), def, GridPos::default()).with_satiation(satiation)
    }

    #[test]
    fn hungry_grazer_eats() {
        let mut rng = StdRng::seed_from_u64(0);
        let meal = try_eat(&grazer(40.0), 50.0, 0.6, &mut rng).unwrap();
        assert_eq!(meal, Meal { consumed: 5.0, gained: 2.5 });
    }

    #[test]
    fn well_fed_or_carnivore_does_not() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(try_eat(&grazer(60.0), 50.0, 0.6, &mut rng).is_none());
        let wolf = CreatureState::new("w".into(), CreatureDefinition::wolf(), GridPos::default())
            .with_satiation(10.0);
        assert!(try_eat(&wolf, 50.0, 0.6, &mut rng).is_none());
    }

    #[test]
    fn limited_by_vegetation_and_headroom() {
        let mut rng = StdRng::seed_from_u64(0);
        let meal = try_eat(&grazer(40.0), 2.0, 0.6, &mut rng).unwrap();
        assert_eq!(meal.consumed, 2.0);
        assert_eq!(meal.gained, 1.0);
        assert!(try_eat(&grazer(40.0), 0.0, 0.6, &mut rng).is_none());

        let def = CreatureDefinition::new("glutton", Trophic::Herbivore, Disposition::Passive)
            .with_max_satiation(10.0)
            .with_grazing(1.0, 50.0, 1.0);
        let glutton = CreatureState::new("g".into(), def, GridPos::default()).with_satiation(5.0);
        let meal = try_eat(&glutton, 80.0, 0.6, &mut rng).unwrap();
        assert_eq!(meal.gained, 5.0);
    }

    #[test]
    fn zero_chance_never_eats() {
        let def = CreatureDefinition::new("picky", Trophic::Herbivore, Disposition::Passive)
            .with_grazing(0.0, 5.0, 0.5);
        let picky = CreatureState::new("p".into(), def, GridPos::default()).with_satiation(1.0);
        let mut rng = StdRng::seed_from_u64(5);
        assert!((0..100).all(|_| try_eat(&picky, 50.0, 0.6, &mut rng).is_none()));
    }
}
