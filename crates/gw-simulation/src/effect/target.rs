use gw_core::{Chunk, EntityId, GridPos, PlayerStatus, TerrainType};

use super::delta::EffectDelta;

/// Anything effects can be resolved against and applied to.
pub trait EffectTarget {
    /// Identity used to key stacks and deltas.
    fn target_id(&self) -> EntityId;

    /// A numeric stat, if the target has it.
    fn stat(&self, key: &str) -> Option<f64>;

    /// A skill level, if the target has it.
    fn skill(&self, _key: &str) -> Option<f64> {
        None
    }

    /// Whether a status marker is set.
    fn has_status(&self, _status: &str) -> bool {
        false
    }

    /// Where the target is.
    fn position(&self) -> Option<GridPos> {
        None
    }

    /// Terrain under the target.
    fn terrain(&self) -> Option<TerrainType> {
        None
    }

    /// Write a resolved delta back. Stats are set to their `after` values.
    fn apply_delta(&mut self, delta: &EffectDelta);
}

impl EffectTarget for PlayerStatus {
    fn target_id(&self) -> EntityId {
        self.id.clone()
    }

    fn stat(&self, key: &str) -> Option<f64> {
        PlayerStatus::stat(self, key)
    }

    fn skill(&self, key: &str) -> Option<f64> {
        PlayerStatus::skill(self, key)
    }

    fn has_status(&self, status: &str) -> bool {
        PlayerStatus::has_status(self, status)
    }

    fn position(&self) -> Option<GridPos> {
        Some(self.position)
    }

    fn apply_delta(&mut self, delta: &EffectDelta) {
        for (key, change) in &delta.stats {
            self.set_stat(key, change.after);
        }
        for status in &delta.statuses_removed {
            self.remove_status(status);
        }
        for status in &delta.statuses_added {
            self.add_status(status.clone());
        }
    }
}

/// Chunk temperatures stay within this many degrees of the terrain baseline.
const CHUNK_TEMPERATURE_SPREAD: f64 = 40.0;

impl EffectTarget for Chunk {
    fn target_id(&self) -> EntityId {
        EntityId::chunk(self.position)
    }

    fn stat(&self, key: &str) -> Option<f64> {
        match key {
            "vegetation_density" => Some(self.vegetation_density),
            "travel_cost" => Some(self.travel_cost),
            "temperature" => Some(self.temperature),
            "moisture" => Some(self.moisture),
            "wind" => Some(self.wind),
            "light_level" => Some(self.light_level),
            "human_presence" => Some(self.human_presence),
            "predator_presence" => Some(self.predator_presence),
            "magic_affinity" => Some(self.magic_affinity),
            "danger_level" => Some(self.danger_level),
            "explorability" => Some(self.explorability),
            _ => None,
        }
    }

    fn position(&self) -> Option<GridPos> {
        Some(self.position)
    }

    fn terrain(&self) -> Option<TerrainType> {
        Some(self.terrain)
    }

    fn apply_delta(&mut self, delta: &EffectDelta) {
        for (key, change) in &delta.stats {
            let value = change.after;
            match key.as_str() {
                "vegetation_density" => self.set_vegetation(value),
                "travel_cost" => self.travel_cost = value.max(0.0),
                "temperature" => {
                    let base = self.terrain.baseline_temperature();
                    self.temperature = value.clamp(
                        base - CHUNK_TEMPERATURE_SPREAD,
                        base + CHUNK_TEMPERATURE_SPREAD,
                    );
                }
                "moisture" => self.set_moisture(value),
                "wind" => self.wind = value.max(0.0),
                "light_level" => self.light_level = value,
                "human_presence" => self.human_presence = value,
                "predator_presence" => self.predator_presence = value,
                "magic_affinity" => self.magic_affinity = value,
                "danger_level" => self.danger_level = value,
                "explorability" => self.explorability = value,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_applies_stats_and_statuses() {
        let mut player = PlayerStatus::new("p", GridPos::default());
        player.add_status("dry");
        let mut delta = EffectDelta::new("soak", player.target_id());
        delta.set_stat("hp", 100.0, 90.0);
        delta.set_stat("dexterity", 10.0, 8.0);
        delta.add_status("wet");
        delta.remove_status("dry");
        player.apply_delta(&delta);
        assert_eq!(player.hp, 90.0);
        assert_eq!(player.stat("dexterity"), Some(8.0));
        assert!(player.has_status("wet"));
        assert!(!player.has_status("dry"));
    }

    #[test]
    fn chunk_clamps_on_apply() {
        let mut chunk = Chunk::new(GridPos::new(2, 2), TerrainType::Grassland);
        assert_eq!(chunk.target_id().as_str(), "chunk:2,2");
        let mut delta = EffectDelta::new("flood", chunk.target_id());
        delta.set_stat("moisture", 40.0, 130.0);
        delta.set_stat("vegetation_density", 60.0, -5.0);
        delta.set_stat("temperature", 18.0, 90.0);
        delta.set_stat("unknown", 0.0, 1.0);
        chunk.apply_delta(&delta);
        assert_eq!(chunk.moisture, 100.0);
        assert_eq!(chunk.vegetation_density, 0.0);
        assert_eq!(chunk.temperature, 58.0);
        assert_eq!(chunk.stat("unknown"), None);
    }
}
