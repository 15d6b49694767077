use std::collections::BTreeMap;

use gw_core::EntityId;
use serde::Serialize;

use super::delta::EffectDelta;
use super::model::Effect;

/// One live instance of an effect on a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveEffect {
    /// Unique across the engine's lifetime.
    pub instance: u64,
    /// The effect definition.
    pub effect: Effect,
    /// Who carries it.
    pub target: EntityId,
    /// Tick it was applied at.
    pub applied_at: u64,
    /// What the initial application changed.
    pub initial: EffectDelta,
}

impl ActiveEffect {
    /// True once `duration` ticks have passed since application.
    pub fn is_expired(&self, now: u64) -> bool {
        self.effect
            .duration
            .is_some_and(|d| now.saturating_sub(self.applied_at) >= d)
    }
}

/// Active effect instances grouped by target, then by effect id.
#[derive(Debug, Default)]
pub struct EffectStacks {
    stacks: BTreeMap<EntityId, BTreeMap<String, Vec<ActiveEffect>>>,
}

impl EffectStacks {
    /// No active effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live instances of `effect_id` on `target`.
    pub fn get(&self, target: &EntityId, effect_id: &str) -> &[ActiveEffect] {
        self.stacks
            .get(target)
            .and_then(|by_id| by_id.get(effect_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of live instances of `effect_id` on `target`.
    pub fn count(&self, target: &EntityId, effect_id: &str) -> usize {
        self.get(target, effect_id).len()
    }

    /// Add an instance on top of any existing ones.
    pub fn push(&mut self, active: ActiveEffect) {
        self.stacks
            .entry(active.target.clone())
            .or_default()
            .entry(active.effect.id.clone())
            .or_default()
            .push(active);
    }

    /// Make `active` the only instance of its effect on its target.
    /// Returns the instances it displaced.
    pub fn replace(&mut self, active: ActiveEffect) -> Vec<ActiveEffect> {
        let slot = self
            .stacks
            .entry(active.target.clone())
            .or_default()
            .entry(active.effect.id.clone())
            .or_default();
        std::mem::replace(slot, vec![active])
    }

    /// Remove every instance of `effect_id` on every target.
    pub fn remove(&mut self, effect_id: &str) -> Vec<ActiveEffect> {
        let mut removed = Vec::new();
        for by_id in self.stacks.values_mut() {
            if let Some(instances) = by_id.remove(effect_id) {
                removed.extend(instances);
            }
        }
        self.prune();
        removed
    }

    /// Remove every instance of `effect_id` on one target.
    pub fn remove_for(&mut self, target: &EntityId, effect_id: &str) -> Vec<ActiveEffect> {
        let removed = self
            .stacks
            .get_mut(target)
            .and_then(|by_id| by_id.remove(effect_id))
            .unwrap_or_default();
        self.prune();
        removed
    }

    /// Remove and return all instances expired at `now`.
    pub fn expire(&mut self, now: u64) -> Vec<ActiveEffect> {
        let mut expired = Vec::new();
        for by_id in self.stacks.values_mut() {
            for instances in by_id.values_mut() {
                let (gone, kept): (Vec<_>, Vec<_>) =
                    instances.drain(..).partition(|a| a.is_expired(now));
                *instances = kept;
                expired.extend(gone);
            }
        }
        self.prune();
        expired
    }

    /// Look up a live instance by its instance number.
    pub fn find(&self, instance: u64) -> Option<&ActiveEffect> {
        self.iter().find(|a| a.instance == instance)
    }

    /// All live instances, ordered by target then effect id.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.stacks
            .values()
            .flat_map(|by_id| by_id.values())
            .flatten()
    }

    /// Live instances on one target.
    pub fn for_target<'a>(&'a self, target: &EntityId) -> impl Iterator<Item = &'a ActiveEffect> {
        self.stacks
            .get(target)
            .into_iter()
            .flat_map(|by_id| by_id.values())
            .flatten()
    }

    /// Total live instances.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no effect is active.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    fn prune(&mut self) {
        for by_id in self.stacks.values_mut() {
            by_id.retain(|_, instances| !instances.is_empty());
        }
        self.stacks.retain(|_, by_id| !by_id.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::model::EffectType;

    fn active(instance: u64, target: &str, id: &str, duration: Option<u64>) -> ActiveEffect {
        let mut effect = Effect::new(id, EffectType::Damage);
        effect.duration = duration;
        ActiveEffect {
            instance,
            effect,
            target: EntityId::new(target),
            applied_at: 10,
            initial: EffectDelta::new(id, EntityId::new(target)),
        }
    }

    #[test]
    fn push_and_replace() {
        let mut stacks = EffectStacks::new();
        let p = EntityId::new("p");
        stacks.push(active(1, "p", "bleed", None));
        stacks.push(active(2, "p", "bleed", None));
        assert_eq!(stacks.count(&p, "bleed"), 2);

        let displaced = stacks.replace(active(3, "p", "bleed", None));
        assert_eq!(displaced.len(), 2);
        assert_eq!(stacks.count(&p, "bleed"), 1);
        assert_eq!(stacks.get(&p, "bleed")[0].instance, 3);
    }

    #[test]
    fn stacks_are_per_target() {
        let mut stacks = EffectStacks::new();
        stacks.push(active(1, "a", "bleed", None));
        stacks.push(active(2, "b", "bleed", None));
        assert_eq!(stacks.count(&EntityId::new("a"), "bleed"), 1);
        assert_eq!(stacks.for_target(&EntityId::new("b")).count(), 1);
        assert_eq!(stacks.remove_for(&EntityId::new("a"), "bleed").len(), 1);
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks.remove("bleed").len(), 1);
        assert!(stacks.is_empty());
    }

    #[test]
    fn expiry_uses_elapsed_ticks() {
        let mut stacks = EffectStacks::new();
        stacks.push(active(1, "p", "short", Some(2)));
        stacks.push(active(2, "p", "forever", None));
        assert!(stacks.expire(11).is_empty());
        let gone = stacks.expire(12);
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].effect.id, "short");
        assert!(stacks.find(2).is_some());
        assert!(stacks.find(1).is_none());
    }
}
