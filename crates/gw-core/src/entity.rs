use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Builder;

use crate::grid::GridPos;

const CHUNK_PREFIX: &str = "chunk:";

/// Identifier for anything the simulation tracks: the player, creatures,
/// and chunks acting as effect targets.
///
/// Ids are plain strings so that game data can name creatures (`"wolf-1"`)
/// and so derived ids such as `hypothermia_<id>` stay readable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A v4 uuid built from caller-supplied random bytes, so seeded
    /// sessions produce the same ids every run.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(Builder::from_random_bytes(bytes).into_uuid().simple().to_string())
    }

    /// The id under which a chunk participates as an effect target.
    pub fn chunk(pos: GridPos) -> Self {
        Self(format!("{CHUNK_PREFIX}{}", pos.key()))
    }

    /// If this id names a chunk, return its grid position.
    pub fn as_chunk(&self) -> Option<GridPos> {
        self.0
            .strip_prefix(CHUNK_PREFIX)
            .and_then(|key| GridPos::from_key(key).ok())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ids_round_trip_position() {
        let id = EntityId::chunk(GridPos::new(-3, 7));
        assert_eq!(id.as_str(), "chunk:-3,7");
        assert_eq!(id.as_chunk(), Some(GridPos::new(-3, 7)));
    }

    #[test]
    fn plain_ids_are_not_chunks() {
        assert_eq!(EntityId::new("wolf-1").as_chunk(), None);
        assert_eq!(EntityId::new("chunk:nope").as_chunk(), None);
    }

    #[test]
    fn random_ids_follow_their_bytes() {
        let id = EntityId::from_random_bytes([7; 16]);
        assert_eq!(id, EntityId::from_random_bytes([7; 16]));
        assert_ne!(id, EntityId::from_random_bytes([8; 16]));
        assert_eq!(id.as_str().len(), 32);
        assert_eq!(id.as_str().chars().nth(12), Some('4'));
        assert_eq!(id.as_chunk(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&EntityId::new("player")).unwrap();
        assert_eq!(json, "\"player\"");
    }
}
