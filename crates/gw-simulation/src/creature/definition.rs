use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Dietary classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trophic {
    /// Eats meat only.
    Carnivore,
    /// Eats plants only.
    #[default]
    Herbivore,
    /// Eats both.
    Omnivore,
}

impl Trophic {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Carnivore => "carnivore",
            Self::Herbivore => "herbivore",
            Self::Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for Trophic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A creature's reaction archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Hunts the player on sight or when hungry.
    Aggressive,
    /// Flees when the player comes close.
    #[default]
    Passive,
    /// Attacks at melee range, backs off a little farther out.
    Defensive,
    /// Attacks anything entering its territory.
    Territorial,
    /// Waits and strikes at point-blank range.
    Ambush,
    /// Never moves.
    Immobile,
}

impl Disposition {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Passive => "passive",
            Self::Defensive => "defensive",
            Self::Territorial => "territorial",
            Self::Ambush => "ambush",
            Self::Immobile => "immobile",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a creature is doing this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Standing still.
    #[default]
    Idle,
    /// Wandering or grazing.
    Moving,
    /// Closing in on the player.
    Hunting,
    /// Running from the player.
    Fleeing,
    /// Feeding on vegetation.
    Eating,
}

impl Behavior {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving => "moving",
            Self::Hunting => "hunting",
            Self::Fleeing => "fleeing",
            Self::Eating => "eating",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Diet keywords that mark a creature as a plant eater.
const PLANT_DIET: [&str; 8] = [
    "plants", "grass", "leaves", "berries", "roots", "fungi", "shrubs", "bark",
];

/// The immutable template a creature is registered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureDefinition {
    /// Species name.
    pub name: String,
    /// Dietary class.
    pub trophic: Trophic,
    /// Starting disposition.
    pub disposition: Disposition,
    /// Free-form food keywords.
    pub diet: Vec<String>,
    /// Satiation ceiling; creatures start full.
    pub max_satiation: f64,
    /// Flat hp damage per attack.
    pub damage: f64,
    /// Chebyshev radius within which the creature notices the player.
    pub search_range: i32,
    /// Minimum ticks between moves.
    pub move_interval: u64,
    /// Satiation decays on ticks divisible by this. 0 disables decay.
    pub hunger_decay_interval: u64,
    /// Satiation lost per decay step.
    pub hunger_decay: f64,
    /// Probability (0-1) of eating when hungry enough.
    pub eat_chance: f64,
    /// Vegetation density consumed per meal, at most.
    pub consumption_per_eat: f64,
    /// Satiation gained per unit of vegetation.
    pub plant_nutrition: f64,
}

impl Default for CreatureDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            trophic: Trophic::Herbivore,
            disposition: Disposition::Passive,
            diet: Vec::new(),
            max_satiation: 100.0,
            damage: 0.0,
            search_range: 4,
            move_interval: 1,
            hunger_decay_interval: 10,
            hunger_decay: 5.0,
            eat_chance: 0.5,
            consumption_per_eat: 5.0,
            plant_nutrition: 0.5,
        }
    }
}

impl CreatureDefinition {
    /// A definition with default tuning.
    pub fn new(name: impl Into<String>, trophic: Trophic, disposition: Disposition) -> Self {
        Self {
            name: name.into(),
            trophic,
            disposition,
            ..Self::default()
        }
    }

    /// Replace the diet keywords.
    pub fn with_diet<I, S>(mut self, diet: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diet = diet.into_iter().map(Into::into).collect();
        self
    }

    /// Set the satiation ceiling.
    pub fn with_max_satiation(mut self, max: f64) -> Self {
        self.max_satiation = max;
        self
    }

    /// Set the attack damage.
    pub fn with_damage(mut self, damage: f64) -> Self {
        self.damage = damage;
        self
    }

    /// Set the detection range.
    pub fn with_search_range(mut self, range: i32) -> Self {
        self.search_range = range;
        self
    }

    /// Set the minimum ticks between moves.
    pub fn with_move_interval(mut self, ticks: u64) -> Self {
        self.move_interval = ticks;
        self
    }

    /// Set the decay interval and the satiation lost per step.
    pub fn with_hunger_decay(mut self, interval: u64, amount: f64) -> Self {
        self.hunger_decay_interval = interval;
        self.hunger_decay = amount;
        self
    }

    /// Set eat chance, vegetation consumed per meal, and nutrition per unit.
    pub fn with_grazing(mut self, eat_chance: f64, consumption: f64, nutrition: f64) -> Self {
        self.eat_chance = eat_chance;
        self.consumption_per_eat = consumption;
        self.plant_nutrition = nutrition;
        self
    }

    /// A pack hunter that closes in on anything it sees.
    pub fn wolf() -> Self {
        Self::new("wolf", Trophic::Carnivore, Disposition::Aggressive)
            .with_diet(["meat"])
            .with_damage(8.0)
            .with_search_range(6)
            .with_hunger_decay(6, 5.0)
            .with_grazing(0.0, 0.0, 0.0)
    }

    /// A skittish grazer.
    pub fn deer() -> Self {
        Self::new("deer", Trophic::Herbivore, Disposition::Passive)
            .with_diet(["grass", "leaves"])
            .with_max_satiation(80.0)
            .with_search_range(5)
            .with_move_interval(2)
            .with_hunger_decay(8, 4.0)
            .with_grazing(0.6, 5.0, 0.5)
    }

    /// Forages, and charges when cornered.
    pub fn boar() -> Self {
        Self::new("boar", Trophic::Omnivore, Disposition::Defensive)
            .with_diet(["roots", "fungi", "carrion"])
            .with_max_satiation(90.0)
            .with_damage(6.0)
            .with_move_interval(2)
            .with_grazing(0.5, 4.0, 0.6)
    }

    /// Guards its ground.
    pub fn bear() -> Self {
        Self::new("bear", Trophic::Omnivore, Disposition::Territorial)
            .with_diet(["berries", "fish", "meat"])
            .with_max_satiation(150.0)
            .with_damage(15.0)
            .with_search_range(5)
            .with_move_interval(3)
            .with_hunger_decay(12, 6.0)
            .with_grazing(0.4, 8.0, 0.4)
    }

    /// Waits for prey to blunder into reach.
    pub fn spider() -> Self {
        Self::new("giant spider", Trophic::Carnivore, Disposition::Ambush)
            .with_diet(["insects", "meat"])
            .with_max_satiation(40.0)
            .with_damage(5.0)
            .with_search_range(3)
            .with_move_interval(4)
            .with_hunger_decay(10, 2.0)
            .with_grazing(0.0, 0.0, 0.0)
    }

    /// A rooted fungus that never moves.
    pub fn shrieker() -> Self {
        Self::new("shrieker", Trophic::Herbivore, Disposition::Immobile)
            .with_diet(["fungi"])
            .with_max_satiation(20.0)
            .with_search_range(2)
            .with_move_interval(0)
            .with_hunger_decay(0, 0.0)
            .with_grazing(0.2, 1.0, 1.0)
    }

    /// Look up a built-in definition by its preset key.
    pub fn preset(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "wolf" => Some(Self::wolf()),
            "deer" => Some(Self::deer()),
            "boar" => Some(Self::boar()),
            "bear" => Some(Self::bear()),
            "spider" => Some(Self::spider()),
            "shrieker" => Some(Self::shrieker()),
            _ => None,
        }
    }

    /// Preset keys accepted by [`CreatureDefinition::preset`].
    pub const PRESETS: [&'static str; 6] = ["wolf", "deer", "boar", "bear", "spider", "shrieker"];

    /// Herbivores, omnivores, and anything with a plant keyword in its diet.
    pub fn can_eat_plants(&self) -> bool {
        matches!(self.trophic, Trophic::Herbivore | Trophic::Omnivore)
            || self
                .diet
                .iter()
                .any(|food| PLANT_DIET.iter().any(|p| food.eq_ignore_ascii_case(p)))
    }

    /// Check ranges and magnitudes.
    pub fn validate(&self) -> SimResult<()> {
        let fail = |reason: &str| {
            Err(SimError::InvalidDefinition {
                name: self.name.clone(),
                reason: reason.to_string(),
            })
        };
        if self.name.trim().is_empty() {
            return fail("name must not be empty");
        }
        if self.max_satiation <= 0.0 {
            return fail("max_satiation must be positive");
        }
        if !(0.0..=1.0).contains(&self.eat_chance) {
            return fail("eat_chance must be within [0, 1]");
        }
        if self.search_range < 0 {
            return fail("search_range must not be negative");
        }
        if self.damage < 0.0
            || self.hunger_decay < 0.0
            || self.consumption_per_eat < 0.0
            || self.plant_nutrition < 0.0
        {
            return fail("damage, hunger_decay, consumption_per_eat and plant_nutrition must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for key in CreatureDefinition::PRESETS {
            let def = CreatureDefinition::preset(key).unwrap();
            def.validate().unwrap();
        }
        assert!(CreatureDefinition::preset("dragon").is_none());
    }

    #[test]
    fn plant_eaters() {
        assert!(CreatureDefinition::deer().can_eat_plants());
        assert!(CreatureDefinition::bear().can_eat_plants());
        assert!(!CreatureDefinition::wolf().can_eat_plants());
        let odd = CreatureDefinition::wolf().with_diet(["meat", "Berries"]);
        assert!(odd.can_eat_plants());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad = CreatureDefinition::deer().with_grazing(1.5, 5.0, 0.5);
        assert!(matches!(bad.validate(), Err(SimError::InvalidDefinition { .. })));
        let nameless = CreatureDefinition::default();
        assert!(nameless.validate().is_err());
        let starving = CreatureDefinition::wolf().with_max_satiation(0.0);
        assert!(starving.validate().is_err());
    }

    #[test]
    fn display_names() {
        insta::assert_snapshot!(
            format!("{} {} {}", Trophic::Omnivore, Disposition::Ambush, Behavior::Fleeing),
            @"omnivore ambush fleeing"
        );
    }

    #[test]
    fn definition_from_toml_uses_defaults() {
        let def: CreatureDefinition = toml::from_str(
            r#"
            name = "marsh hound"
            trophic = "carnivore"
            disposition = "aggressive"
            damage = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(def.damage, 4.0);
        assert_eq!(def.max_satiation, 100.0);
        assert!(def.diet.is_empty());
        def.validate().unwrap();
    }
}
