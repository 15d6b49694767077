use serde::{Deserialize, Serialize};

use gw_core::BLOCKED_TRAVEL_COST;

/// Configuration for the creature engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Creatures farther than this (Chebyshev) from the player are skipped.
    pub activity_radius: i32,
    /// Passive creatures flee inside this radius.
    pub flee_radius: i32,
    /// Ambushers strike inside this radius.
    pub ambush_radius: i32,
    /// Reach of a melee attack.
    pub attack_radius: i32,
    /// Territorial creatures attack inside this radius.
    pub territorial_radius: i32,
    /// Defensive creatures back away inside this radius.
    pub defensive_flee_radius: i32,
    /// Below this satiation ratio a creature counts as hungry.
    pub hunger_ratio: f64,
    /// Below this satiation ratio a passive creature turns territorial.
    pub escalation_ratio: f64,
    /// Plant eaters graze below this satiation ratio.
    pub forage_ratio: f64,
    /// Chunks at or above this travel cost cannot be entered.
    pub blocked_travel_cost: f64,
    /// Creatures within this distance animate immediately.
    pub near_band: i32,
    /// Creatures within this distance animate after `mid_delay_ms`.
    pub mid_band: i32,
    /// Delay for the mid band.
    pub mid_delay_ms: u64,
    /// Delay for everything beyond the mid band.
    pub far_delay_ms: u64,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            activity_radius: 10,
            flee_radius: 2,
            ambush_radius: 1,
            attack_radius: 1,
            territorial_radius: 3,
            defensive_flee_radius: 3,
            hunger_ratio: 0.5,
            escalation_ratio: 0.2,
            forage_ratio: 0.6,
            blocked_travel_cost: BLOCKED_TRAVEL_COST,
            near_band: 3,
            mid_band: 6,
            mid_delay_ms: 250,
            far_delay_ms: 500,
        }
    }
}

impl CreatureConfig {
    /// Set the activity radius.
    pub fn with_activity_radius(mut self, radius: i32) -> Self {
        self.activity_radius = radius;
        self
    }

    /// Presentation delay for an update of a creature `distance` away.
    pub fn stagger_delay(&self, distance: i32) -> u64 {
        if distance <= self.near_band {
            0
        } else if distance <= self.mid_band {
            self.mid_delay_ms
        } else {
            self.far_delay_ms
        }
    }
}
