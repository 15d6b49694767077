//! Player status management.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::grid::GridPos;

/// Normal human body temperature in degrees Celsius.
pub const NORMAL_BODY_TEMPERATURE: f64 = 37.0;

/// Stats every new player starts with.
pub const BASE_STATS: [&str; 6] = [
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

/// The player's mutable status as seen by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// The player's entity ID.
    pub id: EntityId,
    /// Current hit points, never below zero.
    pub hp: f64,
    /// Upper bound for `hp`.
    pub max_hp: f64,
    /// Named numeric stats (strength, dexterity, movement, vision, ...).
    #[serde(default)]
    pub stats: HashMap<String, f64>,
    /// Named skill levels.
    #[serde(default)]
    pub skills: HashMap<String, f64>,
    /// Active status markers (e.g. "hypothermia").
    #[serde(default)]
    pub statuses: BTreeSet<String>,
    /// Core body temperature in degrees Celsius.
    pub body_temperature: f64,
    /// Current grid cell.
    pub position: GridPos,
}

impl PlayerStatus {
    /// Create a healthy player at the given position.
    pub fn new(id: impl Into<EntityId>, position: GridPos) -> Self {
        Self {
            id: id.into(),
            hp: 100.0,
            max_hp: 100.0,
            stats: BASE_STATS.iter().map(|s| (s.to_string(), 10.0)).collect(),
            skills: HashMap::new(),
            statuses: BTreeSet::new(),
            body_temperature: NORMAL_BODY_TEMPERATURE,
            position,
        }
    }

    /// Set current and maximum hit points.
    pub fn with_hp(mut self, hp: f64, max_hp: f64) -> Self {
        self.max_hp = max_hp.max(0.0);
        self.hp = hp.clamp(0.0, self.max_hp);
        self
    }

    /// Set the body temperature.
    pub fn with_body_temperature(mut self, celsius: f64) -> Self {
        self.body_temperature = celsius;
        self
    }

    /// Read a stat. `hp`, `max_hp`, and `body_temperature` are served from
    /// their dedicated fields; everything else comes from `stats`.
    pub fn stat(&self, key: &str) -> Option<f64> {
        match key {
            "hp" => Some(self.hp),
            "max_hp" => Some(self.max_hp),
            "body_temperature" => Some(self.body_temperature),
            other => self.stats.get(other).copied(),
        }
    }

    /// Write a stat. `hp` is clamped to `[0, max_hp]`.
    pub fn set_stat(&mut self, key: &str, value: f64) {
        match key {
            "hp" => self.hp = value.clamp(0.0, self.max_hp),
            "max_hp" => {
                self.max_hp = value.max(0.0);
                self.hp = self.hp.min(self.max_hp);
            }
            "body_temperature" => self.body_temperature = value,
            other => {
                self.stats.insert(other.to_string(), value);
            }
        }
    }

    /// Read a skill level.
    pub fn skill(&self, key: &str) -> Option<f64> {
        self.skills.get(key).copied()
    }

    /// Set a skill level.
    pub fn set_skill(&mut self, key: impl Into<String>, level: f64) {
        self.skills.insert(key.into(), level);
    }

    /// Check whether a status marker is set.
    pub fn has_status(&self, status: &str) -> bool {
        self.statuses.contains(status)
    }

    /// Add a status marker. Returns false if it was already present.
    pub fn add_status(&mut self, status: impl Into<String>) -> bool {
        self.statuses.insert(status.into())
    }

    /// Remove a status marker. Returns false if it was not present.
    pub fn remove_status(&mut self, status: &str) -> bool {
        self.statuses.remove(status)
    }

    /// Apply flat damage, flooring hp at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        before - self.hp
    }

    /// True while hp is above zero.
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}
