use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GwError, GwResult};

/// An integer cell on the world grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    pub fn chebyshev(self, other: GridPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True when `self` lies inside the square of `radius` around `center`.
    pub fn within(self, center: GridPos, radius: i32) -> bool {
        self.chebyshev(center) <= radius
    }

    /// The position shifted by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The eight surrounding cells, row by row starting top-left.
    pub fn neighbors(self) -> [GridPos; 8] {
        [
            self.offset(-1, -1),
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(-1, 1),
            self.offset(0, 1),
            self.offset(1, 1),
        ]
    }

    /// The chunk-map key for this position (`"x,y"`).
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Parse a chunk-map key back into a position.
    pub fn from_key(key: &str) -> GwResult<Self> {
        let (x, y) = key
            .split_once(',')
            .ok_or_else(|| GwError::InvalidKey(key.to_string()))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| GwError::InvalidKey(key.to_string()))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| GwError::InvalidKey(key.to_string()))?;
        Ok(Self::new(x, y))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for GridPos {
    type Err = GwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}
