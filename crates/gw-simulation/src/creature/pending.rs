use std::collections::BTreeMap;

use gw_core::EntityId;

use super::state::CreatureState;
use crate::event::SimEvent;

/// A creature's next state, computed during a tick and held back until
/// the tick boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpdate {
    /// The state the creature will have after commit.
    pub next: CreatureState,
    /// Distance to the player when the update was computed.
    pub distance: i32,
    /// Presentation delay derived from `distance`.
    pub delay_ms: u64,
    /// Narrative events released with the update.
    pub events: Vec<SimEvent>,
}

/// The pending-update buffer, one slot per creature.
#[derive(Debug, Clone, Default)]
pub struct PendingUpdates {
    staged: BTreeMap<EntityId, StagedUpdate>,
}

impl PendingUpdates {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an update, replacing any earlier one for the same creature.
    pub fn stage(&mut self, update: StagedUpdate) {
        self.staged.insert(update.next.id.clone(), update);
    }

    /// The update staged for a creature.
    pub fn get(&self, id: &EntityId) -> Option<&StagedUpdate> {
        self.staged.get(id)
    }

    /// Drop a creature's staged update.
    pub fn discard(&mut self, id: &EntityId) -> Option<StagedUpdate> {
        self.staged.remove(id)
    }

    /// Empty the buffer, nearest creatures first, ties by id.
    pub fn drain(&mut self) -> Vec<StagedUpdate> {
        let mut updates: Vec<_> = std::mem::take(&mut self.staged).into_values().collect();
        updates.sort_by_key(|update| update.distance);
        updates
    }

    /// Number of staged updates.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}
