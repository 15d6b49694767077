use super::config::CreatureConfig;
use super::definition::{Behavior, Disposition};

/// What a creature knows about the player and itself when it decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perception {
    /// Chebyshev distance to the player.
    pub distance: i32,
    /// Search range after visibility scaling.
    pub search_range: i32,
    /// True when satiation is below the hunger ratio.
    pub hungry: bool,
    /// True when hunger may send the creature grazing.
    pub can_forage: bool,
}

/// The fixed disposition table.
pub fn resolve_behavior(
    disposition: Disposition,
    perception: &Perception,
    config: &CreatureConfig,
) -> Behavior {
    let Perception {
        distance,
        search_range,
        hungry,
        can_forage,
    } = *perception;
    let forage = if hungry && can_forage {
        Behavior::Moving
    } else {
        Behavior::Idle
    };
    match disposition {
        Disposition::Aggressive => {
            if distance <= search_range || hungry {
                Behavior::Hunting
            } else {
                Behavior::Idle
            }
        }
        Disposition::Passive => {
            if distance <= config.flee_radius {
                Behavior::Fleeing
            } else {
                forage
            }
        }
        Disposition::Defensive => {
            if distance <= config.attack_radius {
                Behavior::Hunting
            } else if distance <= config.defensive_flee_radius {
                Behavior::Fleeing
            } else {
                forage
            }
        }
        Disposition::Territorial => {
            if distance <= config.territorial_radius {
                Behavior::Hunting
            } else if hungry {
                Behavior::Moving
            } else {
                Behavior::Idle
            }
        }
        Disposition::Ambush => {
            if distance <= config.ambush_radius {
                Behavior::Hunting
            } else {
                Behavior::Idle
            }
        }
        Disposition::Immobile => Behavior::Idle,
    }
}
