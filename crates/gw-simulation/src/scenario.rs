use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use gw_core::{Chunk, ChunkMap, EntityId, GridPos, PlayerStatus, TerrainType, World, WorldMeta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimConfig;
use crate::creature::CreatureDefinition;
use crate::error::{SimError, SimResult};
use crate::simulation::Simulation;

/// The built-in demo scenario.
pub const DEMO_SCENARIO: &str = include_str!("../scenarios/demo.toml");

/// Where the player starts and in what shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSpec {
    /// Player id.
    pub id: String,
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Starting hp.
    pub hp: f64,
    /// Hp ceiling.
    pub max_hp: f64,
    /// Starting body temperature.
    pub body_temperature: f64,
    /// Skill levels by name.
    pub skills: BTreeMap<String, f64>,
    /// Status markers set at start.
    pub statuses: Vec<String>,
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            id: "player".to_string(),
            x: 0,
            y: 0,
            hp: 100.0,
            max_hp: 100.0,
            body_temperature: gw_core::NORMAL_BODY_TEMPERATURE,
            skills: BTreeMap::new(),
            statuses: Vec::new(),
        }
    }
}

/// A rectangle of different terrain laid over the base fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainPatch {
    /// Terrain of the patched cells.
    pub terrain: TerrainType,
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Columns covered.
    #[serde(default = "one")]
    pub width: i32,
    /// Rows covered.
    #[serde(default = "one")]
    pub height: i32,
    /// Vegetation density override.
    #[serde(default)]
    pub vegetation: Option<f64>,
    /// Travel cost override.
    #[serde(default)]
    pub travel_cost: Option<f64>,
}

fn one() -> i32 {
    1
}

/// A creature placed at load time. `kind` names a bestiary entry or a
/// built-in preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    /// Creature id. Left empty, a uuid is drawn from the scenario seed.
    #[serde(default)]
    pub id: String,
    /// Bestiary key or preset name.
    pub kind: String,
    /// Column the creature starts in.
    pub x: i32,
    /// Row the creature starts in.
    pub y: i32,
}

/// A world, its creatures, and config overrides, as read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Columns in the world.
    pub width: i32,
    /// Rows in the world.
    pub height: i32,
    /// Terrain every chunk starts with before patches.
    pub terrain: TerrainType,
    /// The player's start.
    pub player: PlayerSpec,
    /// Session tuning.
    pub config: SimConfig,
    /// Applied in order, later patches win.
    pub patches: Vec<TerrainPatch>,
    /// Custom creature definitions, keyed by the name spawns refer to.
    pub bestiary: BTreeMap<String, CreatureDefinition>,
    /// Creatures to register.
    pub creatures: Vec<Spawn>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            description: String::new(),
            width: 16,
            height: 16,
            terrain: TerrainType::Grassland,
            player: PlayerSpec::default(),
            config: SimConfig::default(),
            patches: Vec::new(),
            bestiary: BTreeMap::new(),
            creatures: Vec::new(),
        }
    }
}

impl Scenario {
    /// Parse and validate a scenario.
    pub fn from_toml_str(source: &str) -> SimResult<Self> {
        let mut scenario: Scenario = toml::from_str(source)
            .map_err(|e| SimError::Scenario(format!("failed to parse scenario: {e}")))?;
        for (key, definition) in &mut scenario.bestiary {
            if definition.name.trim().is_empty() {
                definition.name = key.clone();
            }
        }
        let mut ids = StdRng::seed_from_u64(scenario.config.seed);
        for spawn in &mut scenario.creatures {
            if spawn.id.trim().is_empty() {
                spawn.id = EntityId::from_random_bytes(ids.random()).to_string();
            }
        }
        scenario.validate()?;
        info!(
            scenario = %scenario.name,
            width = scenario.width,
            height = scenario.height,
            creatures = scenario.creatures.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Read a scenario file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            SimError::Scenario(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// The built-in demo scenario.
    pub fn demo() -> SimResult<Self> {
        Self::from_toml_str(DEMO_SCENARIO)
    }

    /// Override the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Check dimensions, positions, creature kinds, and definitions.
    pub fn validate(&self) -> SimResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SimError::Scenario(format!(
                "world size {}x{} must be positive",
                self.width, self.height
            )));
        }
        if !self.in_bounds(self.player.x, self.player.y) {
            return Err(SimError::Scenario(format!(
                "player at {},{} is outside the world",
                self.player.x, self.player.y
            )));
        }
        for definition in self.bestiary.values() {
            definition.validate()?;
        }
        let mut seen = BTreeSet::new();
        for spawn in &self.creatures {
            if !seen.insert(spawn.id.as_str()) {
                return Err(SimError::Scenario(format!(
                    "creature id '{}' is used twice",
                    spawn.id
                )));
            }
            if !self.in_bounds(spawn.x, spawn.y) {
                return Err(SimError::Scenario(format!(
                    "creature '{}' at {},{} is outside the world",
                    spawn.id, spawn.x, spawn.y
                )));
            }
            self.definition(&spawn.kind)?;
        }
        Ok(())
    }

    /// Resolve a creature kind: the bestiary first, then the presets.
    pub fn definition(&self, kind: &str) -> SimResult<CreatureDefinition> {
        self.bestiary
            .get(kind)
            .cloned()
            .or_else(|| CreatureDefinition::preset(kind))
            .ok_or_else(|| SimError::Scenario(format!("unknown creature kind '{kind}'")))
    }

    /// Lay out the chunk map and the player.
    pub fn build_world(&self) -> World {
        let mut chunks = ChunkMap::filled(self.width, self.height, self.terrain);
        for patch in &self.patches {
            for y in patch.y..patch.y + patch.height {
                for x in patch.x..patch.x + patch.width {
                    if !self.in_bounds(x, y) {
                        continue;
                    }
                    let mut chunk = Chunk::new(GridPos::new(x, y), patch.terrain);
                    if let Some(density) = patch.vegetation {
                        chunk.set_vegetation(density);
                    }
                    if let Some(cost) = patch.travel_cost {
                        chunk.travel_cost = cost;
                    }
                    chunks.insert(chunk);
                }
            }
        }

        let spec = &self.player;
        let mut player = PlayerStatus::new(spec.id.as_str(), GridPos::new(spec.x, spec.y))
            .with_hp(spec.hp, spec.max_hp)
            .with_body_temperature(spec.body_temperature);
        for (skill, level) in &spec.skills {
            player.set_skill(skill.clone(), *level);
        }
        for status in &spec.statuses {
            player.add_status(status.clone());
        }

        World::new(
            WorldMeta::new(&self.name).with_description(&self.description),
            chunks,
            player,
        )
    }

    /// Build a session with the default systems and every creature spawned.
    pub fn build(&self) -> SimResult<Simulation> {
        let mut sim = Simulation::with_default_systems(self.build_world(), &self.config)?;
        for spawn in &self.creatures {
            let definition = self.definition(&spawn.kind)?;
            sim.register_creature(
                spawn.id.as_str(),
                definition,
                GridPos::new(spawn.x, spawn.y),
            )?;
        }
        Ok(sim)
    }
}
