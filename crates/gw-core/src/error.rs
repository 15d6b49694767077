use crate::grid::GridPos;

/// Alias for `Result<T, GwError>`.
pub type GwResult<T> = Result<T, GwError>;

/// Errors that can occur when reading or building world data.
#[derive(Debug, thiserror::Error)]
pub enum GwError {
    /// A chunk key did not have the `"x,y"` integer form.
    #[error("invalid chunk key: \"{0}\"")]
    InvalidKey(String),

    /// A terrain name did not match any known terrain type.
    #[error("unknown terrain: \"{0}\"")]
    UnknownTerrain(String),

    /// No chunk exists at the requested grid position.
    #[error("chunk not found at {0}")]
    ChunkNotFound(GridPos),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
