//! Global and regional weather: a weighted transition table, per-type cell
//! effects, ambient temperature, and body temperature drift.

mod kind;
mod profile;
mod regional;
mod state;
mod system;
mod table;

pub use kind::{Intensity, WeatherType};
pub use profile::{WeatherProfile, WeatherProfiles};
pub use regional::{RegionalVariation, RegionalWeather};
pub use state::{Coverage, WeatherEffect, WeatherEffectKind, WeatherState};
pub use system::{WeatherApplication, WeatherChange, WeatherConfig, WeatherSystem, WeatherUpdate};
pub use table::{Transition, TransitionTable};
