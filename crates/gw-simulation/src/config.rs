use serde::{Deserialize, Serialize};

use crate::creature::CreatureConfig;
use crate::weather::WeatherConfig;

/// Configuration for a simulation run.
///
/// Every field has a default, so a scenario file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// In-world hours per simulation tick.
    pub hours_per_tick: f64,
    /// Hour of day (0.0..24.0) at tick 0.
    pub start_hour: f64,
    /// First daylight hour.
    pub day_start_hour: f64,
    /// First hour of night.
    pub night_start_hour: f64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Weather system tuning.
    pub weather: WeatherConfig,
    /// Creature engine tuning.
    pub creatures: CreatureConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hours_per_tick: 1.0,
            start_hour: 8.0,
            day_start_hour: 6.0,
            night_start_hour: 18.0,
            max_events: 0,
            weather: WeatherConfig::default(),
            creatures: CreatureConfig::default(),
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of in-world hours per simulation tick.
    pub fn with_hours_per_tick(mut self, hours: f64) -> Self {
        self.hours_per_tick = hours;
        self
    }

    /// Set the hour of day at tick 0.
    pub fn with_start_hour(mut self, hour: f64) -> Self {
        self.start_hour = hour;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Replace the weather configuration.
    pub fn with_weather(mut self, weather: WeatherConfig) -> Self {
        self.weather = weather;
        self
    }

    /// Replace the creature configuration.
    pub fn with_creatures(mut self, creatures: CreatureConfig) -> Self {
        self.creatures = creatures;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherType;

    #[test]
    fn defaults() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.hours_per_tick, 1.0);
        assert_eq!(config.day_start_hour, 6.0);
        assert_eq!(config.night_start_hour, 18.0);
        assert_eq!(config.max_events, 0);
    }

    #[test]
    fn builders_chain() {
        let config = SimConfig::default()
            .with_seed(7)
            .with_hours_per_tick(0.5)
            .with_start_hour(22.0)
            .with_max_events(100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.hours_per_tick, 0.5);
        assert_eq!(config.start_hour, 22.0);
        assert_eq!(config.max_events, 100);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: SimConfig = toml::from_str(
            r#"
            seed = 9
            [weather]
            initial = "rain"
            [creatures]
            flee_radius = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.hours_per_tick, 1.0);
        assert_eq!(config.weather.initial, WeatherType::Rain);
        assert_eq!(config.creatures.flee_radius, 4);
        assert_eq!(config.creatures.activity_radius, 10);
    }
}
