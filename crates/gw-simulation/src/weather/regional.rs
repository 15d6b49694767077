use gw_core::GridPos;
use serde::Serialize;

use super::state::WeatherState;

/// A localized weather zone that overrides the global weather inside its
/// coverage until its duration runs out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalWeather {
    /// Handle used to remove the zone.
    pub id: u64,
    /// The zone's weather and coverage.
    pub state: WeatherState,
}

impl RegionalWeather {
    /// True when `pos` lies inside the zone.
    pub fn covers(&self, pos: GridPos) -> bool {
        self.state.covers(pos)
    }

    /// Center of the zone.
    pub fn center(&self) -> Option<GridPos> {
        self.state.coverage.map(|c| c.center)
    }
}

/// A standing scale factor on weather effects inside an area, for terrain
/// that amplifies or dampens weather (valleys, high passes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionalVariation {
    /// Center of the area.
    pub center: GridPos,
    /// Chebyshev radius.
    pub radius: i32,
    /// Effects are multiplied by `1 + modifier`.
    pub modifier: f64,
}

impl RegionalVariation {
    /// True when `pos` lies inside the area.
    pub fn covers(&self, pos: GridPos) -> bool {
        pos.within(self.center, self.radius)
    }

    /// The multiplier effects inside the area get.
    pub fn factor(&self) -> f64 {
        1.0 + self.modifier
    }
}
