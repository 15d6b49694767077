use serde::Serialize;

use crate::effect::EvalContext;
use crate::weather::{Intensity, WeatherType};

/// Conditions at the player's location, published by the weather system
/// and read by the creature engine and effect conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    /// Weather at the player's position.
    pub weather: WeatherType,
    /// Intensity of that weather.
    pub intensity: Intensity,
    /// 0.0-1.0; scales creature search ranges.
    pub visibility: f64,
    /// Ambient temperature at the player's chunk, once known.
    pub ambient_temperature: Option<f64>,
    /// True during daylight hours.
    pub is_daytime: bool,
    /// Tick the snapshot was taken at.
    pub tick: u64,
    /// Hour of day the snapshot was taken at.
    pub hour_of_day: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            weather: WeatherType::Clear,
            intensity: Intensity::Normal,
            visibility: 1.0,
            ambient_temperature: None,
            is_daytime: true,
            tick: 0,
            hour_of_day: 0.0,
        }
    }
}

impl Environment {
    /// Scale a sight-based range by visibility, never below one cell.
    pub fn scaled_range(&self, range: i32) -> i32 {
        if range <= 0 {
            return 0;
        }
        ((range as f64) * self.visibility.clamp(0.0, 1.0))
            .ceil()
            .max(1.0) as i32
    }

    /// Snapshot of the facts effect conditions may query.
    pub fn eval_context(&self) -> EvalContext {
        EvalContext {
            tick: self.tick,
            hour_of_day: self.hour_of_day,
            weather: Some(self.weather.name().to_string()),
        }
    }
}
