use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, ChunkMap};
use crate::player::PlayerStatus;

/// Metadata about the world being simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Human-readable world name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When this world value was created.
    pub created_at: DateTime<Utc>,
}

impl WorldMeta {
    /// Metadata with the given name and an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The external data the simulation reads and mutates each tick: the chunk
/// map and the player. The simulation does not generate or persist it.
#[derive(Debug, Clone)]
pub struct World {
    /// Name and description.
    pub meta: WorldMeta,
    /// All known chunks.
    pub chunks: ChunkMap,
    /// The player.
    pub player: PlayerStatus,
}

impl World {
    /// Assemble a world from its parts.
    pub fn new(meta: WorldMeta, chunks: ChunkMap, player: PlayerStatus) -> Self {
        Self {
            meta,
            chunks,
            player,
        }
    }

    /// The chunk the player currently stands on.
    pub fn player_chunk(&self) -> Option<&Chunk> {
        self.chunks.get(self.player.position)
    }

    /// Split borrow of the player and the chunk under them.
    pub fn player_and_chunk_mut(&mut self) -> (&mut PlayerStatus, Option<&mut Chunk>) {
        let chunk = self.chunks.get_mut(self.player.position);
        (&mut self.player, chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::TerrainType;
    use crate::grid::GridPos;

    #[test]
    fn player_chunk_follows_position() {
        let chunks = ChunkMap::filled(3, 3, TerrainType::Grassland);
        let mut world = World::new(
            WorldMeta::new("Test").with_description("three by three"),
            chunks,
            PlayerStatus::new("player", GridPos::new(1, 1)),
        );
        assert_eq!(world.player_chunk().unwrap().position, GridPos::new(1, 1));

        world.player.position = GridPos::new(7, 7);
        assert!(world.player_chunk().is_none());
        let (player, chunk) = world.player_and_chunk_mut();
        assert_eq!(player.position, GridPos::new(7, 7));
        assert!(chunk.is_none());
    }
}
