//! Tick-driven simulation core for Grimmwald.
//!
//! Three engines advance a [`gw_core::World`] one tick at a time: the effect
//! engine resolves declarative effects into deltas, the weather system runs
//! a probabilistic state machine and applies its effects to nearby cells and
//! the player, and the creature engine moves, feeds, and fights creatures.
//! A [`Simulation`] owns one session and drives the engines as [`System`]s.

/// Simulation clock for tracking ticks and the in-world hour.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Creature behavior engine: hunger, behavior, movement, grazing, attacks.
pub mod creature;
/// Effect engine: conditions, stacking, durations, recurring triggers.
pub mod effect;
/// Conditions at the player's position shared between systems.
pub mod environment;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Scenario files describing a world, its creatures, and config overrides.
pub mod scenario;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;
/// Global and regional weather.
pub mod weather;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of the creature engine and its types.
pub use creature::{CreatureConfig, CreatureDefinition, CreatureEngine, CreatureState};
/// Re-exports of the effect engine and its types.
pub use effect::{Effect, EffectDelta, EffectEngine, EffectSystem, EffectTarget, EffectType};
/// Re-export of [`environment::Environment`].
pub use environment::Environment;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`scenario::Scenario`].
pub use scenario::Scenario;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`system::System`].
pub use system::System;
/// Re-exports of the weather system and its types.
pub use weather::{WeatherConfig, WeatherSystem, WeatherType};
