use std::collections::HashMap;

use crate::error::{SimError, SimResult};

use super::kind::WeatherType;

/// Per-tick cell changes and ambient characteristics of one weather type,
/// at normal intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherProfile {
    /// Cell temperature change per tick.
    pub temperature: f64,
    /// Cell moisture change per tick.
    pub moisture: f64,
    /// Wind strength the cell takes on.
    pub wind: f64,
    /// Vegetation density change per tick.
    pub vegetation: f64,
    /// Added to the terrain baseline for ambient temperature.
    pub ambient_modifier: f64,
    /// 0.0-1.0.
    pub visibility: f64,
    /// Ticks the weather lasts before the next transition roll.
    pub default_duration: u64,
}

impl WeatherProfile {
    /// The built-in profile for a weather type.
    pub fn builtin(kind: WeatherType) -> Self {
        let (temperature, moisture, wind, vegetation) = match kind {
            WeatherType::Clear => (0.2, -0.5, 0.0, 0.0),
            WeatherType::Cloudy => (-0.1, 0.0, 1.0, 0.0),
            WeatherType::Rain => (-0.5, 2.0, 2.0, 0.5),
            WeatherType::Storm => (-1.0, 4.0, 8.0, 0.0),
            WeatherType::Snow => (-2.0, 1.0, 3.0, 0.2),
            WeatherType::Heatwave => (2.0, -2.0, 0.0, -0.5),
            WeatherType::Wind => (-0.3, -0.5, 6.0, 0.0),
            WeatherType::Drought => (1.0, -3.0, 1.0, -1.0),
        };
        let (default_duration, visibility, ambient_modifier) = match kind {
            WeatherType::Clear => (24, 1.0, 0.0),
            WeatherType::Cloudy => (12, 0.9, -2.0),
            WeatherType::Rain => (8, 0.6, -4.0),
            WeatherType::Storm => (4, 0.3, -6.0),
            WeatherType::Snow => (10, 0.5, -12.0),
            WeatherType::Heatwave => (16, 0.9, 12.0),
            WeatherType::Wind => (6, 0.8, -3.0),
            WeatherType::Drought => (48, 0.9, 6.0),
        };
        Self {
            temperature,
            moisture,
            wind,
            vegetation,
            ambient_modifier,
            visibility,
            default_duration,
        }
    }
}

/// The registry of weather profiles.
#[derive(Debug, Clone, Default)]
pub struct WeatherProfiles {
    profiles: HashMap<WeatherType, WeatherProfile>,
}

impl WeatherProfiles {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in profile of every weather type.
    pub fn builtin() -> Self {
        WeatherType::ALL
            .into_iter()
            .map(|kind| (kind, WeatherProfile::builtin(kind)))
            .collect()
    }

    /// Add or replace the profile for `kind`.
    pub fn insert(&mut self, kind: WeatherType, profile: WeatherProfile) {
        self.profiles.insert(kind, profile);
    }

    /// Look up a profile. A type without one is a configuration error.
    pub fn get(&self, kind: WeatherType) -> SimResult<&WeatherProfile> {
        self.profiles
            .get(&kind)
            .ok_or(SimError::MissingWeatherProfile(kind))
    }

    /// True when `kind` has a profile.
    pub fn contains(&self, kind: WeatherType) -> bool {
        self.profiles.contains_key(&kind)
    }
}

impl FromIterator<(WeatherType, WeatherProfile)> for WeatherProfiles {
    fn from_iter<I: IntoIterator<Item = (WeatherType, WeatherProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_type() {
        let profiles = WeatherProfiles::builtin();
        for kind in WeatherType::ALL {
            assert!(profiles.contains(kind));
        }
        assert_eq!(profiles.get(WeatherType::Storm).unwrap().default_duration, 4);
        assert_eq!(profiles.get(WeatherType::Snow).unwrap().ambient_modifier, -12.0);
    }

    #[test]
    fn missing_profile_is_an_error() {
        let profiles = WeatherProfiles::new();
        assert!(matches!(
            profiles.get(WeatherType::Rain),
            Err(SimError::MissingWeatherProfile(WeatherType::Rain))
        ));
    }
}
