use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// The kinds of weather the system can produce.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WeatherType {
    /// No weather effects.
    #[default]
    Clear,
    /// Slight cooling.
    Cloudy,
    /// Cooler and wetter.
    Rain,
    /// Rain with strong wind.
    Storm,
    /// Freezing and wet.
    Snow,
    /// Hot and drying.
    Heatwave,
    /// Strong wind.
    Wind,
    /// Hot, dry, and withering.
    Drought,
}

impl WeatherType {
    /// Every weather type in declaration order.
    pub const ALL: [WeatherType; 8] = [
        Self::Clear,
        Self::Cloudy,
        Self::Rain,
        Self::Storm,
        Self::Snow,
        Self::Heatwave,
        Self::Wind,
        Self::Drought,
    ];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Storm => "storm",
            Self::Snow => "snow",
            Self::Heatwave => "heatwave",
            Self::Wind => "wind",
            Self::Drought => "drought",
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeatherType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::Scenario(format!("unknown weather type '{s}'")))
    }
}

/// How strongly a weather type acts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Half strength.
    Mild,
    /// Full strength.
    #[default]
    Normal,
    /// Double strength.
    Severe,
}

impl Intensity {
    /// Factor applied to every weather effect and ambient modifier.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Mild => 0.5,
            Self::Normal => 1.0,
            Self::Severe => 2.0,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Normal => "normal",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intensity {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Mild, Self::Normal, Self::Severe]
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::Scenario(format!("unknown intensity '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for kind in WeatherType::ALL {
            assert_eq!(kind.name().parse::<WeatherType>().unwrap(), kind);
        }
        assert_eq!("STORM".parse::<WeatherType>().unwrap(), WeatherType::Storm);
        assert!("hail".parse::<WeatherType>().is_err());
    }

    #[test]
    fn intensity_multipliers() {
        assert_eq!(Intensity::Mild.multiplier(), 0.5);
        assert_eq!(Intensity::default().multiplier(), 1.0);
        assert_eq!("severe".parse::<Intensity>().unwrap().multiplier(), 2.0);
    }
}
