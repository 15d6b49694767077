//! Core world types for Grimmwald: grid positions, chunks, and player status.
//!
//! This crate defines the data the simulation engines read and mutate but do
//! not own. World generation, persistence, and rendering live elsewhere; this
//! crate only describes the boundary so that a driver can build a [`World`]
//! programmatically or deserialize one from a scenario file.

/// Terrain chunks and the `"x,y"`-keyed chunk map.
pub mod chunk;
/// Entity identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Integer grid coordinates and Chebyshev geometry.
pub mod grid;
/// The player's mutable status (hp, stats, statuses, body temperature).
pub mod player;
/// The world container handed to the simulation.
pub mod world;

/// Re-export chunk types.
pub use chunk::{BLOCKED_TRAVEL_COST, Chunk, ChunkMap, TerrainType};
/// Re-export entity identifiers.
pub use entity::EntityId;
/// Re-export error types.
pub use error::{GwError, GwResult};
/// Re-export grid coordinates.
pub use grid::GridPos;
/// Re-export player status.
pub use player::{NORMAL_BODY_TEMPERATURE, PlayerStatus};
/// Re-export world model types.
pub use world::{World, WorldMeta};
