//! Creature behavior: hunger, disposition-driven behavior, movement,
//! grazing, and attacks, staged per tick and committed at the boundary.

mod behavior;
mod config;
mod definition;
mod engine;
mod feeding;
mod movement;
mod pending;
mod state;

pub use behavior::{Perception, resolve_behavior};
pub use config::CreatureConfig;
pub use definition::{Behavior, CreatureDefinition, Disposition, Trophic};
pub use engine::CreatureEngine;
pub use feeding::{Meal, try_eat};
pub use movement::{accept_move, axis_step, random_step, step_away, step_toward};
pub use pending::{PendingUpdates, StagedUpdate};
pub use state::CreatureState;
