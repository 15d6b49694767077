use std::collections::{BTreeMap, BTreeSet};

use gw_core::EntityId;
use serde::Serialize;

/// One stat's value before and after an effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatChange {
    /// Value before the effect.
    pub before: f64,
    /// Value after the effect.
    pub after: f64,
}

impl StatChange {
    /// Signed difference.
    pub fn amount(self) -> f64 {
        self.after - self.before
    }
}

/// The change an effect makes to one target.
///
/// Deltas are computed against the target as it was when the effect
/// resolved; apply each one before resolving the next effect on the same
/// target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectDelta {
    /// Who the delta applies to.
    pub target: EntityId,
    /// The effect that produced it.
    pub effect_id: String,
    /// Changed stats by key.
    pub stats: BTreeMap<String, StatChange>,
    /// Status markers to set.
    pub statuses_added: BTreeSet<String>,
    /// Status markers to clear.
    pub statuses_removed: BTreeSet<String>,
}

impl EffectDelta {
    /// An empty delta.
    pub fn new(effect_id: impl Into<String>, target: EntityId) -> Self {
        Self {
            target,
            effect_id: effect_id.into(),
            stats: BTreeMap::new(),
            statuses_added: BTreeSet::new(),
            statuses_removed: BTreeSet::new(),
        }
    }

    /// Record a stat change. A second change to the same stat keeps the
    /// first `before`.
    pub fn set_stat(&mut self, key: impl Into<String>, before: f64, after: f64) {
        self.stats
            .entry(key.into())
            .and_modify(|change| change.after = after)
            .or_insert(StatChange { before, after });
    }

    /// Mark a status for adding, cancelling any pending removal.
    pub fn add_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        self.statuses_removed.remove(&status);
        self.statuses_added.insert(status);
    }

    /// Mark a status for removal, cancelling any pending add.
    pub fn remove_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        self.statuses_added.remove(&status);
        self.statuses_removed.insert(status);
    }

    /// Net change of a stat, if the delta touches it.
    pub fn change(&self, key: &str) -> Option<f64> {
        self.stats.get(key).map(|c| c.amount())
    }

    /// True when applying it would change nothing.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.statuses_added.is_empty() && self.statuses_removed.is_empty()
    }
}
