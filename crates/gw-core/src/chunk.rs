use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GwError, GwResult};
use crate::grid::GridPos;

/// Chunks at or above this travel cost cannot be entered.
pub const BLOCKED_TRAVEL_COST: f64 = 100.0;

/// Broad terrain classification of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    /// Open grass and meadow.
    Grassland,
    /// Woodland.
    Forest,
    /// Sand and scrub.
    Desert,
    /// Frozen plains.
    Tundra,
    /// Rock and high ground.
    Mountain,
    /// Wet lowland.
    Swamp,
    /// Lakes and rivers.
    Water,
    /// Underground.
    Cave,
}

impl TerrainType {
    /// All terrain types, in declaration order.
    pub const ALL: [TerrainType; 8] = [
        Self::Grassland,
        Self::Forest,
        Self::Desert,
        Self::Tundra,
        Self::Mountain,
        Self::Swamp,
        Self::Water,
        Self::Cave,
    ];

    /// Baseline ambient temperature in degrees Celsius.
    pub fn baseline_temperature(self) -> f64 {
        match self {
            Self::Grassland => 18.0,
            Self::Forest => 15.0,
            Self::Desert => 32.0,
            Self::Tundra => -8.0,
            Self::Mountain => 4.0,
            Self::Swamp => 21.0,
            Self::Water => 12.0,
            Self::Cave => 10.0,
        }
    }

    /// Default cost of entering a chunk of this terrain.
    pub fn default_travel_cost(self) -> f64 {
        match self {
            Self::Grassland => 1.0,
            Self::Forest => 2.0,
            Self::Desert => 3.0,
            Self::Tundra => 3.0,
            Self::Mountain => 8.0,
            Self::Swamp => 5.0,
            Self::Water => BLOCKED_TRAVEL_COST,
            Self::Cave => 2.0,
        }
    }

    /// Default vegetation density (0-100).
    pub fn default_vegetation(self) -> f64 {
        match self {
            Self::Grassland => 60.0,
            Self::Forest => 80.0,
            Self::Desert => 5.0,
            Self::Tundra => 10.0,
            Self::Mountain => 15.0,
            Self::Swamp => 50.0,
            Self::Water => 20.0,
            Self::Cave => 5.0,
        }
    }

    /// Default moisture (0-100).
    pub fn default_moisture(self) -> f64 {
        match self {
            Self::Grassland => 40.0,
            Self::Forest => 55.0,
            Self::Desert => 5.0,
            Self::Tundra => 30.0,
            Self::Mountain => 25.0,
            Self::Swamp => 85.0,
            Self::Water => 100.0,
            Self::Cave => 60.0,
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grassland => "grassland",
            Self::Forest => "forest",
            Self::Desert => "desert",
            Self::Tundra => "tundra",
            Self::Mountain => "mountain",
            Self::Swamp => "swamp",
            Self::Water => "water",
            Self::Cave => "cave",
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerrainType {
    type Err = GwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GwError::UnknownTerrain(s.to_string()))
    }
}

/// One cell of the world map.
///
/// Only `vegetation_density` is mutated by creatures; weather and effects
/// may also touch temperature, moisture, wind, and travel cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Grid cell of this chunk.
    pub position: GridPos,
    /// Terrain classification.
    pub terrain: TerrainType,
    /// 0-100.
    pub vegetation_density: f64,
    /// `>= BLOCKED_TRAVEL_COST` means impassable.
    pub travel_cost: f64,
    /// Ambient temperature in degrees Celsius.
    pub temperature: f64,
    /// 0-100.
    pub moisture: f64,
    /// Wind strength.
    #[serde(default)]
    pub wind: f64,
    /// Ambient light.
    pub light_level: f64,
    /// How settled the area is.
    pub human_presence: f64,
    /// How many predators roam here.
    pub predator_presence: f64,
    /// Strength of magic in the area.
    pub magic_affinity: f64,
    /// General threat level.
    pub danger_level: f64,
    /// How easily the chunk can be explored.
    pub explorability: f64,
}

impl Chunk {
    /// Create a chunk with defaults derived from its terrain.
    pub fn new(position: GridPos, terrain: TerrainType) -> Self {
        Self {
            position,
            terrain,
            vegetation_density: terrain.default_vegetation(),
            travel_cost: terrain.default_travel_cost(),
            temperature: terrain.baseline_temperature(),
            moisture: terrain.default_moisture(),
            wind: 0.0,
            light_level: 50.0,
            human_presence: 0.0,
            predator_presence: 0.0,
            magic_affinity: 0.0,
            danger_level: 0.0,
            explorability: 50.0,
        }
    }

    /// Override the vegetation density (clamped to 0-100).
    pub fn with_vegetation(mut self, density: f64) -> Self {
        self.set_vegetation(density);
        self
    }

    /// Override the travel cost.
    pub fn with_travel_cost(mut self, cost: f64) -> Self {
        self.travel_cost = cost;
        self
    }

    /// The chunk-map key of this chunk.
    pub fn key(&self) -> String {
        self.position.key()
    }

    /// True when creatures may not enter this chunk.
    pub fn is_blocked(&self) -> bool {
        self.travel_cost >= BLOCKED_TRAVEL_COST
    }

    /// Set vegetation density, clamped to 0-100.
    pub fn set_vegetation(&mut self, density: f64) {
        self.vegetation_density = density.clamp(0.0, 100.0);
    }

    /// Set moisture, clamped to 0-100.
    pub fn set_moisture(&mut self, moisture: f64) {
        self.moisture = moisture.clamp(0.0, 100.0);
    }
}

/// All known chunks, keyed by `"x,y"`.
#[derive(Debug, Clone, Default)]
pub struct ChunkMap {
    chunks: HashMap<String, Chunk>,
}

impl ChunkMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `width` x `height` map of one terrain with its origin at `(0, 0)`.
    pub fn filled(width: i32, height: i32, terrain: TerrainType) -> Self {
        let mut map = Self::new();
        for y in 0..height {
            for x in 0..width {
                map.insert(Chunk::new(GridPos::new(x, y), terrain));
            }
        }
        map
    }

    /// Insert a chunk, replacing and returning any chunk at the same position.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.key(), chunk)
    }

    /// Look up a chunk by position.
    pub fn get(&self, pos: GridPos) -> Option<&Chunk> {
        self.chunks.get(&pos.key())
    }

    /// Look up a chunk mutably by position.
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos.key())
    }

    /// Look up a chunk by its `"x,y"` key.
    pub fn get_by_key(&self, key: &str) -> Option<&Chunk> {
        self.chunks.get(key)
    }

    /// Look up a chunk, failing with [`GwError::ChunkNotFound`] when absent.
    pub fn require(&self, pos: GridPos) -> GwResult<&Chunk> {
        self.get(pos).ok_or(GwError::ChunkNotFound(pos))
    }

    /// True when a chunk exists at `pos`.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.chunks.contains_key(&pos.key())
    }

    /// True when a chunk exists at `pos` and is not blocked.
    pub fn is_passable(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(|c| !c.is_blocked())
    }

    /// Positions of existing chunks within `radius` of `center`, in row order.
    pub fn positions_within(&self, center: GridPos, radius: i32) -> Vec<GridPos> {
        let mut out = Vec::new();
        for y in center.y - radius..=center.y + radius {
            for x in center.x - radius..=center.x + radius {
                let pos = GridPos::new(x, y);
                if self.contains(pos) {
                    out.push(pos);
                }
            }
        }
        out
    }

    /// Iterate over all chunks in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when the map holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl FromIterator<Chunk> for ChunkMap {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        let mut map = Self::new();
        for chunk in iter {
            map.insert(chunk);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_defaults_feed_new_chunk() {
        let chunk = Chunk::new(GridPos::new(1, 2), TerrainType::Forest);
        assert_eq!(chunk.key(), "1,2");
        assert_eq!(chunk.vegetation_density, 80.0);
        assert_eq!(chunk.temperature, 15.0);
        assert!(!chunk.is_blocked());
    }

    #[test]
    fn water_is_blocked_by_default() {
        assert!(Chunk::new(GridPos::default(), TerrainType::Water).is_blocked());
        let ridge = Chunk::new(GridPos::default(), TerrainType::Mountain).with_travel_cost(100.0);
        assert!(ridge.is_blocked());
        let steep = Chunk::new(GridPos::default(), TerrainType::Mountain).with_travel_cost(99.9);
        assert!(!steep.is_blocked());
    }

    #[test]
    fn vegetation_is_clamped() {
        let mut chunk = Chunk::new(GridPos::default(), TerrainType::Grassland);
        chunk.set_vegetation(140.0);
        assert_eq!(chunk.vegetation_density, 100.0);
        chunk.set_vegetation(-3.0);
        assert_eq!(chunk.vegetation_density, 0.0);
    }

    #[test]
    fn terrain_parses_case_insensitively() {
        assert_eq!("Swamp".parse::<TerrainType>().unwrap(), TerrainType::Swamp);
        assert!("lava".parse::<TerrainType>().is_err());
    }

    #[test]
    fn filled_map_and_lookup() {
        let map = ChunkMap::filled(3, 2, TerrainType::Grassland);
        assert_eq!(map.len(), 6);
        assert!(map.contains(GridPos::new(2, 1)));
        assert!(!map.contains(GridPos::new(3, 0)));
        assert!(map.get_by_key("0,1").is_some());
        assert!(matches!(
            map.require(GridPos::new(-1, 0)),
            Err(GwError::ChunkNotFound(_))
        ));
    }

    #[test]
    fn positions_within_skips_missing_chunks() {
        let map = ChunkMap::filled(5, 5, TerrainType::Grassland);
        let corner = map.positions_within(GridPos::new(0, 0), 1);
        assert_eq!(corner.len(), 4);
        let center = map.positions_within(GridPos::new(2, 2), 1);
        assert_eq!(center.len(), 9);
        assert_eq!(center[0], GridPos::new(1, 1));
    }

    #[test]
    fn passability() {
        let mut map = ChunkMap::filled(2, 1, TerrainType::Grassland);
        map.insert(Chunk::new(GridPos::new(1, 0), TerrainType::Water));
        assert!(map.is_passable(GridPos::new(0, 0)));
        assert!(!map.is_passable(GridPos::new(1, 0)));
        assert!(!map.is_passable(GridPos::new(5, 5)));
    }
}
