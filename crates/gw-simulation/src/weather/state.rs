use gw_core::GridPos;
use serde::Serialize;

use crate::effect::{EffectType, Modifier};
use crate::error::SimResult;

use super::kind::{Intensity, WeatherType};
use super::profile::{WeatherProfile, WeatherProfiles};

/// Which cell property a weather effect changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherEffectKind {
    /// Cell temperature.
    Temperature,
    /// Cell moisture.
    Moisture,
    /// Cell wind level.
    Wind,
    /// Cell vegetation density.
    Vegetation,
}

impl WeatherEffectKind {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Moisture => "moisture",
            Self::Wind => "wind",
            Self::Vegetation => "vegetation",
        }
    }

    /// The effect type that carries this change.
    pub fn effect_type(self) -> EffectType {
        match self {
            Self::Temperature => EffectType::Temperature,
            Self::Moisture => EffectType::Moisture,
            Self::Wind => EffectType::Wind,
            Self::Vegetation => EffectType::Vegetation,
        }
    }

    /// Wind is a level the cell takes on; the rest accumulate.
    pub fn modifier(self, amount: f64) -> Modifier {
        match self {
            Self::Wind => Modifier::set(amount),
            _ => Modifier::flat(amount),
        }
    }
}

/// One per-tick cell change, already scaled by intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherEffect {
    /// Property changed.
    pub kind: WeatherEffectKind,
    /// Scaled amount per tick.
    pub amount: f64,
}

/// The area a localized weather state covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Center of the area.
    pub center: GridPos,
    /// Chebyshev radius.
    pub radius: i32,
}

impl Coverage {
    /// True when `pos` lies inside the area.
    pub fn covers(self, pos: GridPos) -> bool {
        pos.within(self.center, self.radius)
    }
}

/// Weather in effect, globally or over a covered area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherState {
    /// Weather type.
    pub kind: WeatherType,
    /// Strength.
    pub intensity: Intensity,
    /// Ticks until the state ends or transitions.
    pub remaining_duration: u64,
    /// Per-tick cell changes.
    pub effects: Vec<WeatherEffect>,
    /// `None` for the global weather.
    pub coverage: Option<Coverage>,
}

impl WeatherState {
    /// Start `kind` at `intensity` with its profile's default duration.
    pub fn new(kind: WeatherType, intensity: Intensity, profiles: &WeatherProfiles) -> SimResult<Self> {
        let profile = profiles.get(kind)?;
        Ok(Self {
            kind,
            intensity,
            remaining_duration: profile.default_duration,
            effects: Self::compute_effects(profile, intensity),
            coverage: None,
        })
    }

    /// Restrict the state to an area.
    pub fn with_coverage(mut self, center: GridPos, radius: i32) -> Self {
        self.coverage = Some(Coverage { center, radius });
        self
    }

    /// The non-zero cell changes of a profile, scaled by intensity.
    pub fn compute_effects(profile: &WeatherProfile, intensity: Intensity) -> Vec<WeatherEffect> {
        let scale = intensity.multiplier();
        [
            (WeatherEffectKind::Temperature, profile.temperature),
            (WeatherEffectKind::Moisture, profile.moisture),
            (WeatherEffectKind::Wind, profile.wind),
            (WeatherEffectKind::Vegetation, profile.vegetation),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount != 0.0)
        .map(|(kind, amount)| WeatherEffect {
            kind,
            amount: amount * scale,
        })
        .collect()
    }

    /// The amount of one effect kind, zero when absent.
    pub fn effect(&self, kind: WeatherEffectKind) -> f64 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.amount)
            .sum()
    }

    /// A copy with every effect multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        for effect in &mut scaled.effects {
            effect.amount *= factor;
        }
        scaled
    }

    /// True when the state applies at `pos`. Global weather covers everything.
    pub fn covers(&self, pos: GridPos) -> bool {
        self.coverage.is_none_or(|c| c.covers(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severe_rain_doubles_effects() {
        let profiles = WeatherProfiles::builtin();
        let normal = WeatherState::new(WeatherType::Rain, Intensity::Normal, &profiles).unwrap();
        let severe = WeatherState::new(WeatherType::Rain, Intensity::Severe, &profiles).unwrap();
        assert_eq!(normal.remaining_duration, 8);
        assert_eq!(normal.effect(WeatherEffectKind::Moisture), 2.0);
        assert_eq!(severe.effect(WeatherEffectKind::Moisture), 4.0);
        assert_eq!(severe.effect(WeatherEffectKind::Temperature), -1.0);
    }

    #[test]
    fn zero_deltas_are_skipped() {
        let profiles = WeatherProfiles::builtin();
        let clear = WeatherState::new(WeatherType::Clear, Intensity::Normal, &profiles).unwrap();
        assert!(clear.effects.iter().all(|e| e.kind != WeatherEffectKind::Wind));
        assert_eq!(clear.effect(WeatherEffectKind::Wind), 0.0);
    }

    #[test]
    fn coverage_is_chebyshev() {
        let profiles = WeatherProfiles::builtin();
        let storm = WeatherState::new(WeatherType::Storm, Intensity::Normal, &profiles)
            .unwrap()
            .with_coverage(GridPos::new(5, 5), 2);
        assert!(storm.covers(GridPos::new(7, 3)));
        assert!(!storm.covers(GridPos::new(8, 5)));
        let global = WeatherState::new(WeatherType::Clear, Intensity::Normal, &profiles).unwrap();
        assert!(global.covers(GridPos::new(-999, 999)));
    }

    #[test]
    fn scaling_leaves_original_untouched() {
        let profiles = WeatherProfiles::builtin();
        let snow = WeatherState::new(WeatherType::Snow, Intensity::Normal, &profiles).unwrap();
        let harsher = snow.scaled(1.5);
        assert_eq!(harsher.effect(WeatherEffectKind::Temperature), -3.0);
        assert_eq!(snow.effect(WeatherEffectKind::Temperature), -2.0);
    }
}
