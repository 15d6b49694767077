use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

use super::kind::WeatherType;

/// One weighted outgoing edge of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Target weather.
    pub to: WeatherType,
    /// Weight in [0, 1]. Rows need not sum to one.
    pub probability: f64,
}

impl Transition {
    /// An edge to `to` with weight `probability`.
    pub fn new(to: WeatherType, probability: f64) -> Self {
        Self { to, probability }
    }
}

/// Weighted weather transitions keyed by the current weather.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rows: HashMap<WeatherType, Vec<Transition>>,
}

impl TransitionTable {
    /// An empty table. Every weather persists.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in transition table.
    pub fn builtin() -> Self {
        use WeatherType::*;
        let rows: [(WeatherType, &[(WeatherType, f64)]); 8] = [
            (Clear, &[(Cloudy, 0.4), (Wind, 0.15), (Heatwave, 0.1), (Drought, 0.05)]),
            (Cloudy, &[(Clear, 0.35), (Rain, 0.35), (Snow, 0.1), (Wind, 0.1)]),
            (Rain, &[(Cloudy, 0.4), (Storm, 0.25), (Clear, 0.2)]),
            (Storm, &[(Rain, 0.5), (Cloudy, 0.3), (Wind, 0.2)]),
            (Snow, &[(Cloudy, 0.5), (Clear, 0.3), (Storm, 0.1)]),
            (Heatwave, &[(Clear, 0.5), (Drought, 0.3), (Storm, 0.1)]),
            (Wind, &[(Clear, 0.4), (Cloudy, 0.4), (Storm, 0.1)]),
            (Drought, &[(Heatwave, 0.3), (Clear, 0.4), (Wind, 0.2)]),
        ];
        let mut table = Self::new();
        for (from, edges) in rows {
            table.rows.insert(
                from,
                edges.iter().map(|&(to, p)| Transition::new(to, p)).collect(),
            );
        }
        table
    }

    /// Replace the outgoing edges of `from`. Every probability must lie in [0, 1].
    pub fn set(&mut self, from: WeatherType, edges: Vec<Transition>) -> SimResult<()> {
        if let Some(bad) = edges
            .iter()
            .find(|t| !(0.0..=1.0).contains(&t.probability))
        {
            return Err(SimError::InvalidTransition {
                from,
                to: bad.to,
                probability: bad.probability,
            });
        }
        self.rows.insert(from, edges);
        Ok(())
    }

    /// Outgoing edges of `from`; empty when none are configured.
    pub fn transitions(&self, from: WeatherType) -> &[Transition] {
        self.rows.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draw the next weather. `None` means the current weather persists.
    ///
    /// Draws `r` uniformly in `[0, total)` and walks the row subtracting
    /// each weight until `r` is used up.
    pub fn draw<R: Rng + ?Sized>(&self, from: WeatherType, rng: &mut R) -> Option<WeatherType> {
        let row = self.transitions(from);
        let total: f64 = row.iter().map(|t| t.probability).sum();
        if row.is_empty() || total <= 0.0 {
            return None;
        }
        let mut r = rng.random_range(0.0..total);
        for transition in row.iter().filter(|t| t.probability > 0.0) {
            r -= transition.probability;
            if r <= 0.0 {
                return Some(transition.to);
            }
        }
        // Floating-point residue: fall back to the last weighted edge.
        row.iter().rev().find(|t| t.probability > 0.0).map(|t| t.to)
    }
}
