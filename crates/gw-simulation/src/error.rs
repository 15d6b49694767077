use gw_core::{EntityId, GridPos, GwError};

use crate::weather::WeatherType;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation engines and scenario loading.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No creature with this id is registered.
    #[error("creature not found in simulation: {0}")]
    CreatureNotFound(EntityId),

    /// A creature with this id is already registered.
    #[error("creature already registered: {0}")]
    DuplicateCreature(EntityId),

    /// A creature definition failed validation.
    #[error("invalid creature definition '{name}': {reason}")]
    InvalidDefinition {
        /// Name of the offending definition.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A creature was registered with a chunk other than the one it stands on.
    #[error("creature {id} placed at {position} but given the chunk at {chunk}")]
    PositionMismatch {
        /// The creature being registered.
        id: EntityId,
        /// Where the creature was placed.
        position: GridPos,
        /// Position of the chunk it was given.
        chunk: GridPos,
    },

    /// No chunk exists at the position.
    #[error("chunk not found at {0}")]
    ChunkNotFound(GridPos),

    /// Weather data was requested for a type without a profile.
    #[error("no weather profile registered for {0}")]
    MissingWeatherProfile(WeatherType),

    /// A transition table row carries a weight outside `[0, 1]`.
    #[error("transition {from} -> {to} has probability {probability} outside [0, 1]")]
    InvalidTransition {
        /// Weather the row belongs to.
        from: WeatherType,
        /// Target of the offending edge.
        to: WeatherType,
        /// The rejected weight.
        probability: f64,
    },

    /// A creature pass started before the previous one was committed.
    #[error("{count} staged creature updates were never committed")]
    UncommittedUpdates {
        /// Number of staged updates still waiting.
        count: usize,
    },

    /// A scenario could not be read, parsed, or validated.
    #[error("scenario error: {0}")]
    Scenario(String),

    /// An error from the world data layer.
    #[error(transparent)]
    Core(#[from] GwError),

    /// A generic system failure with a descriptive message.
    #[error("system error: {0}")]
    SystemError(String),
}
