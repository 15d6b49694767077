use std::collections::HashMap;

use gw_core::EntityId;
use tracing::{debug, trace};

use super::condition::{EvalContext, all_hold};
use super::delta::EffectDelta;
use super::model::{Effect, EffectType};
use super::resolve::{resolve_builtin, resolve_tick};
use super::schedule::RecurringSchedule;
use super::stack::{ActiveEffect, EffectStacks};
use super::target::EffectTarget;

/// A resolver that replaces built-in resolution for one effect type.
pub type EffectHandler =
    Box<dyn Fn(&Effect, &dyn EffectTarget, &EvalContext) -> EffectDelta + Send + Sync>;

/// Why an effect did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// At least one condition did not hold.
    ConditionsFailed,
    /// The target already carries `max` instances.
    StackLimit {
        /// The stack limit that was reached.
        max: usize,
    },
}

/// Result of [`EffectEngine::apply_effect`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The effect took hold; write the delta back to the target.
    Applied(EffectDelta),
    /// Nothing changed.
    Rejected(Rejection),
}

impl ApplyOutcome {
    /// True for [`ApplyOutcome::Applied`].
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The delta, if applied.
    pub fn delta(&self) -> Option<&EffectDelta> {
        match self {
            Self::Applied(delta) => Some(delta),
            Self::Rejected(_) => None,
        }
    }

    /// Consume into the delta, if applied.
    pub fn into_delta(self) -> Option<EffectDelta> {
        match self {
            Self::Applied(delta) => Some(delta),
            Self::Rejected(_) => None,
        }
    }
}

/// Applies effects, tracks their stacks and lifetimes, and schedules
/// recurring triggers.
///
/// The engine never mutates targets. Every application returns an
/// [`EffectDelta`] that the caller writes back with
/// [`EffectTarget::apply_delta`].
#[derive(Default)]
pub struct EffectEngine {
    stacks: EffectStacks,
    schedule: RecurringSchedule,
    handlers: HashMap<EffectType, EffectHandler>,
    next_instance: u64,
}

impl std::fmt::Debug for EffectEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectEngine")
            .field("active", &self.stacks.len())
            .field("recurring", &self.schedule.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EffectEngine {
    /// An engine with no handlers and no active effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for `effect_type`. It takes priority over the
    /// built-in resolution and replaces any earlier handler for the type.
    pub fn register_effect_handler<F>(&mut self, effect_type: EffectType, handler: F)
    where
        F: Fn(&Effect, &dyn EffectTarget, &EvalContext) -> EffectDelta + Send + Sync + 'static,
    {
        self.handlers.insert(effect_type, Box::new(handler));
    }

    /// Apply an effect to a target.
    ///
    /// Fails without side effects when a condition does not hold or a
    /// stackable effect is already at `max_stacks`. A non-stackable effect
    /// replaces whatever instances of it the target carries.
    pub fn apply_effect(
        &mut self,
        effect: Effect,
        target: &dyn EffectTarget,
        ctx: &EvalContext,
    ) -> ApplyOutcome {
        let target_id = target.target_id();
        if !all_hold(&effect.conditions, target, ctx) {
            debug!(effect = %effect.id, target = %target_id, "effect rejected: conditions failed");
            return ApplyOutcome::Rejected(Rejection::ConditionsFailed);
        }

        let full = effect
            .max_stacks
            .filter(|&max| effect.stackable && self.stacks.count(&target_id, &effect.id) >= max);
        if let Some(max) = full {
            debug!(
                effect = %effect.id,
                target = %target_id,
                max,
                "effect rejected: stack limit reached"
            );
            return ApplyOutcome::Rejected(Rejection::StackLimit { max });
        }

        let delta = self.resolve(&effect, target, ctx);
        let instance = self.next_instance;
        self.next_instance += 1;
        if let Some(rate) = effect.tick_rate {
            self.schedule.insert(instance, ctx.tick, rate);
        }

        trace!(
            effect = %effect.id,
            kind = %effect.effect_type,
            target = %target_id,
            instance,
            "effect applied"
        );
        let active = ActiveEffect {
            instance,
            target: target_id,
            applied_at: ctx.tick,
            initial: delta.clone(),
            effect,
        };
        if active.effect.stackable {
            self.stacks.push(active);
        } else {
            for displaced in self.stacks.replace(active) {
                self.schedule.remove(displaced.instance);
            }
        }
        ApplyOutcome::Applied(delta)
    }

    /// Resolve an effect against a target without recording it.
    pub fn resolve(
        &self,
        effect: &Effect,
        target: &dyn EffectTarget,
        ctx: &EvalContext,
    ) -> EffectDelta {
        match self.handlers.get(&effect.effect_type) {
            Some(handler) => {
                debug!(effect = %effect.id, kind = %effect.effect_type, "custom handler");
                handler(effect, target, ctx)
            }
            None => resolve_builtin(effect, target),
        }
    }

    /// Resolve one recurring trigger of a live instance.
    pub fn resolve_recurring(
        &self,
        active: &ActiveEffect,
        target: &dyn EffectTarget,
        ctx: &EvalContext,
    ) -> EffectDelta {
        match self.handlers.get(&active.effect.effect_type) {
            Some(handler) => handler(&active.effect, target, ctx),
            None => resolve_tick(&active.effect, target),
        }
    }

    /// Drop every instance whose duration has run out at `now` and return them.
    pub fn update_effects(&mut self, now: u64) -> Vec<ActiveEffect> {
        let expired = self.stacks.expire(now);
        for active in &expired {
            self.schedule.remove(active.instance);
            debug!(effect = %active.effect.id, target = %active.target, "effect expired");
        }
        expired
    }

    /// Live recurring instances due to fire at `now`.
    pub fn due_recurring(&mut self, now: u64) -> Vec<ActiveEffect> {
        self.schedule
            .due(now)
            .into_iter()
            .filter_map(|instance| self.stacks.find(instance).cloned())
            .collect()
    }

    /// Remove every instance of `effect_id` from every target.
    pub fn remove_effect(&mut self, effect_id: &str) -> Vec<ActiveEffect> {
        let removed = self.stacks.remove(effect_id);
        self.unschedule(&removed);
        removed
    }

    /// Remove every instance of `effect_id` from one target.
    pub fn remove_effect_from(&mut self, target: &EntityId, effect_id: &str) -> Vec<ActiveEffect> {
        let removed = self.stacks.remove_for(target, effect_id);
        self.unschedule(&removed);
        removed
    }

    /// Live instances, optionally restricted to one target.
    pub fn active_effects(&self, target: Option<&EntityId>) -> Vec<&ActiveEffect> {
        match target {
            Some(id) => self.stacks.for_target(id).collect(),
            None => self.stacks.iter().collect(),
        }
    }

    /// Number of live instances of `effect_id` on `target`.
    pub fn stack_count(&self, target: &EntityId, effect_id: &str) -> usize {
        self.stacks.count(target, effect_id)
    }

    /// True while at least one instance of `effect_id` is on `target`.
    pub fn is_active(&self, target: &EntityId, effect_id: &str) -> bool {
        self.stack_count(target, effect_id) > 0
    }

    fn unschedule(&mut self, removed: &[ActiveEffect]) {
        for active in removed {
            self.schedule.remove(active.instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::condition::{Condition, Operator};
    use crate::effect::model::Modifier;
    use gw_core::{GridPos, PlayerStatus};
    use proptest::prelude::*;

    fn player() -> PlayerStatus {
        PlayerStatus::new("player", GridPos::new(0, 0))
    }

    fn ctx(tick: u64) -> EvalContext {
        EvalContext::at_tick(tick)
    }

    #[test]
    fn stackable_effect_stacks_to_limit() {
        let mut engine = EffectEngine::new();
        let p = player();
        let bleed = Effect::new("bleed", EffectType::Damage)
            .with_value(1.0)
            .stackable(Some(3));
        for _ in 0..3 {
            assert!(engine.apply_effect(bleed.clone(), &p, &ctx(1)).is_applied());
        }
        assert_eq!(engine.stack_count(&p.id, "bleed"), 3);
        for _ in 0..2 {
            let outcome = engine.apply_effect(bleed.clone(), &p, &ctx(1));
            assert_eq!(
                outcome,
                ApplyOutcome::Rejected(Rejection::StackLimit { max: 3 })
            );
        }
        assert_eq!(engine.stack_count(&p.id, "bleed"), 3);
    }

    #[test]
    fn unlimited_stacks() {
        let mut engine = EffectEngine::new();
        let p = player();
        let bless = Effect::new("bless", EffectType::StatModifier)
            .with_target_key("wisdom")
            .stackable(None);
        for _ in 0..10 {
            engine.apply_effect(bless.clone(), &p, &ctx(1));
        }
        assert_eq!(engine.stack_count(&p.id, "bless"), 10);
    }

    #[test]
    fn non_stackable_keeps_one_instance() {
        let mut engine = EffectEngine::new();
        let p = player();
        let slow = Effect::new("slow", EffectType::Movement).with_modifier(Modifier::flat(-1.0));
        for tick in 0..5 {
            engine.apply_effect(slow.clone(), &p, &ctx(tick));
        }
        assert_eq!(engine.stack_count(&p.id, "slow"), 1);
        assert_eq!(engine.active_effects(Some(&p.id))[0].applied_at, 4);
    }

    #[test]
    fn failing_condition_changes_nothing() {
        let mut engine = EffectEngine::new();
        let p = player();
        let frost = Effect::new("frost", EffectType::Damage)
            .with_value(5.0)
            .with_condition(Condition::stat("body_temperature", Operator::Lt, 30.0));
        let outcome = engine.apply_effect(frost, &p, &ctx(1));
        assert_eq!(outcome, ApplyOutcome::Rejected(Rejection::ConditionsFailed));
        assert!(outcome.delta().is_none());
        assert!(engine.active_effects(None).is_empty());
    }

    #[test]
    fn engine_does_not_touch_target() {
        let mut engine = EffectEngine::new();
        let mut p = player();
        let hit = Effect::new("hit", EffectType::Damage).with_value(10.0);
        let delta = engine.apply_effect(hit, &p, &ctx(1)).into_delta().unwrap();
        assert_eq!(p.hp, 100.0);
        p.apply_delta(&delta);
        assert_eq!(p.hp, 90.0);
    }

    #[test]
    fn duration_expiry() {
        let mut engine = EffectEngine::new();
        let p = player();
        let daze = Effect::new("daze", EffectType::Vision)
            .with_modifier(Modifier::flat(-2.0))
            .with_duration(3);
        engine.apply_effect(daze, &p, &ctx(5));
        assert!(engine.update_effects(7).is_empty());
        assert!(engine.is_active(&p.id, "daze"));
        let expired = engine.update_effects(8);
        assert_eq!(expired.len(), 1);
        assert!(!engine.is_active(&p.id, "daze"));
    }

    #[test]
    fn recurring_effects_fire_until_removed() {
        let mut engine = EffectEngine::new();
        let p = player();
        let poison = Effect::new("poison", EffectType::Damage)
            .with_value(1.0)
            .with_tick_rate(2);
        engine.apply_effect(poison, &p, &ctx(0));
        assert!(engine.due_recurring(1).is_empty());
        let due = engine.due_recurring(2);
        assert_eq!(due.len(), 1);
        let delta = engine.resolve_recurring(&due[0], &p, &ctx(2));
        assert_eq!(delta.change("hp"), Some(-1.0));

        assert_eq!(engine.remove_effect("poison").len(), 1);
        assert!(engine.due_recurring(4).is_empty());
    }

    #[test]
    fn replacing_drops_old_schedule() {
        let mut engine = EffectEngine::new();
        let p = player();
        let poison = Effect::new("poison", EffectType::Damage)
            .with_value(1.0)
            .with_tick_rate(1);
        engine.apply_effect(poison.clone(), &p, &ctx(0));
        engine.apply_effect(poison, &p, &ctx(0));
        assert_eq!(engine.due_recurring(1).len(), 1);
    }

    #[test]
    fn custom_handler_overrides_builtin() {
        let mut engine = EffectEngine::new();
        let p = player();
        engine.register_effect_handler(
            EffectType::Damage,
            |effect: &Effect, target: &dyn EffectTarget, _ctx: &EvalContext| {
                let mut delta = EffectDelta::new(&effect.id, target.target_id());
                delta.add_status("bruised");
                delta
            },
        );
        let delta = engine
            .apply_effect(Effect::new("punch", EffectType::Damage).with_value(3.0), &p, &ctx(0))
            .into_delta()
            .unwrap();
        assert!(delta.change("hp").is_none());
        assert!(delta.statuses_added.contains("bruised"));
    }

    #[test]
    fn custom_type_without_handler_is_inert() {
        let mut engine = EffectEngine::new();
        let p = player();
        let odd = Effect::new("odd", EffectType::Custom("glow".into()));
        let delta = engine.apply_effect(odd, &p, &ctx(0)).into_delta().unwrap();
        assert!(delta.is_empty());
    }

    #[test]
    fn remove_from_one_target() {
        let mut engine = EffectEngine::new();
        let a = player();
        let b = PlayerStatus::new("other", GridPos::new(1, 1));
        let mark = Effect::new("mark", EffectType::Status).with_target_key("marked");
        engine.apply_effect(mark.clone(), &a, &ctx(0));
        engine.apply_effect(mark, &b, &ctx(0));
        assert_eq!(engine.remove_effect_from(&a.id, "mark").len(), 1);
        assert!(engine.is_active(&b.id, "mark"));
        assert_eq!(engine.active_effects(None).len(), 1);
    }

    fn snapshot(engine: &EffectEngine) -> Vec<ActiveEffect> {
        engine.active_effects(None).into_iter().cloned().collect()
    }

    proptest! {
        #[test]
        fn stack_count_is_capped(max in 1usize..6, applies in 0usize..15) {
            let mut engine = EffectEngine::new();
            let p = player();
            let bleed = Effect::new("bleed", EffectType::Damage)
                .with_value(1.0)
                .stackable(Some(max));
            let mut rejected = 0;
            for _ in 0..applies {
                let outcome = engine.apply_effect(bleed.clone(), &p, &ctx(1));
                if !outcome.is_applied() {
                    prop_assert_eq!(outcome, ApplyOutcome::Rejected(Rejection::StackLimit { max }));
                    rejected += 1;
                }
            }
            prop_assert_eq!(engine.stack_count(&p.id, "bleed"), applies.min(max));
            prop_assert_eq!(rejected, applies.saturating_sub(max));
        }

        #[test]
        fn non_stackable_collapses_to_latest(applies in 1u64..15) {
            let mut engine = EffectEngine::new();
            let p = player();
            let slow = Effect::new("slow", EffectType::Movement).with_modifier(Modifier::flat(-1.0));
            for tick in 0..applies {
                prop_assert!(engine.apply_effect(slow.clone(), &p, &ctx(tick)).is_applied());
            }
            prop_assert_eq!(engine.stack_count(&p.id, "slow"), 1);
            prop_assert_eq!(engine.active_effects(None)[0].applied_at, applies - 1);
        }

        #[test]
        fn expires_once_duration_has_passed(
            duration in 1u64..50,
            start in 0u64..100,
            elapsed in 0u64..100
        ) {
            let mut engine = EffectEngine::new();
            let p = player();
            let haste = Effect::new("haste", EffectType::Movement)
                .with_modifier(Modifier::flat(2.0))
                .with_duration(duration);
            engine.apply_effect(haste, &p, &ctx(start));
            let expired = engine.update_effects(start + elapsed);
            prop_assert_eq!(expired.len(), usize::from(elapsed >= duration));
            prop_assert_eq!(engine.is_active(&p.id, "haste"), elapsed < duration);
        }

        #[test]
        fn one_failing_condition_rejects(
            (count, failing) in (1usize..6).prop_flat_map(|n| (Just(n), 0..n))
        ) {
            let mut engine = EffectEngine::new();
            let p = player();
            let ward = Effect::new("ward", EffectType::StatModifier).with_target_key("wisdom");
            engine.apply_effect(ward, &p, &ctx(1));
            let before = snapshot(&engine);

            let mut frost = Effect::new("frost", EffectType::Damage).with_value(5.0);
            for index in 0..count {
                let operator = if index == failing { Operator::Gt } else { Operator::Ge };
                frost = frost.with_condition(Condition::stat("strength", operator, 10.0));
            }
            let outcome = engine.apply_effect(frost, &p, &ctx(2));
            prop_assert_eq!(outcome, ApplyOutcome::Rejected(Rejection::ConditionsFailed));
            prop_assert_eq!(engine.stack_count(&p.id, "frost"), 0);
            prop_assert_eq!(snapshot(&engine), before);
        }
    }
}
