use gw_core::{EntityId, GridPos};

use super::definition::{Behavior, CreatureDefinition, Disposition, Trophic};

/// A tracked creature: its definition plus mutable runtime fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureState {
    /// Unique id.
    pub id: EntityId,
    /// Template the creature was registered from.
    pub definition: CreatureDefinition,
    /// Current grid cell.
    pub position: GridPos,
    /// Key of the chunk the creature stands on.
    pub chunk_key: String,
    /// Current disposition; hunger can escalate it.
    pub disposition: Disposition,
    /// What the creature did last tick.
    pub behavior: Behavior,
    /// Where the creature is heading, if anywhere.
    pub target_position: Option<GridPos>,
    /// Current fullness.
    pub satiation: f64,
    /// Fullness ceiling.
    pub max_satiation: f64,
    /// Tick of the last accepted move.
    pub last_move_tick: u64,
}

impl CreatureState {
    /// A fully fed, idle creature.
    pub fn new(id: EntityId, definition: CreatureDefinition, position: GridPos) -> Self {
        Self {
            id,
            position,
            chunk_key: position.key(),
            disposition: definition.disposition,
            behavior: Behavior::Idle,
            target_position: None,
            satiation: definition.max_satiation,
            max_satiation: definition.max_satiation,
            last_move_tick: 0,
            definition,
        }
    }

    /// Set satiation, clamped to `[0, max_satiation]`.
    pub fn with_satiation(mut self, satiation: f64) -> Self {
        self.satiation = satiation.clamp(0.0, self.max_satiation);
        self
    }

    /// Satiation as a fraction of the ceiling, 0 when the ceiling is 0.
    pub fn satiation_ratio(&self) -> f64 {
        if self.max_satiation <= 0.0 {
            return 0.0;
        }
        self.satiation / self.max_satiation
    }

    /// True when the diet includes plant keywords.
    pub fn can_eat_plants(&self) -> bool {
        self.definition.can_eat_plants()
    }

    /// Carnivores and anything currently aggressive.
    pub fn is_predator(&self) -> bool {
        self.definition.trophic == Trophic::Carnivore || self.disposition == Disposition::Aggressive
    }

    /// The species name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}
