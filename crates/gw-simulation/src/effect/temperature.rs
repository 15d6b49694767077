//! Hypothermia and heatstroke tracking.

use gw_core::EntityId;

use super::condition::EvalContext;
use super::delta::EffectDelta;
use super::engine::{ApplyOutcome, EffectEngine};
use super::model::{Effect, EffectType, Modifier};
use super::stack::ActiveEffect;
use super::target::EffectTarget;

/// Body temperature below which hypothermia sets in.
pub const HYPOTHERMIA_BELOW: f64 = 35.0;
/// Body temperature above which heatstroke sets in.
pub const HEATSTROKE_ABOVE: f64 = 40.0;

const DAMAGE_PER_TICK: f64 = 2.0;
const STAT_PENALTY: f64 = -2.0;

/// Id of the hypothermia effect for `character`.
pub fn hypothermia_id(character: &EntityId) -> String {
    format!("hypothermia_{character}")
}

/// Id of the heatstroke effect for `character`.
pub fn heatstroke_id(character: &EntityId) -> String {
    format!("heatstroke_{character}")
}

/// Cold damage every tick and a dexterity penalty while active.
pub fn hypothermia_effect(character: &EntityId) -> Effect {
    Effect::new(hypothermia_id(character), EffectType::Hypothermia)
        .with_value(DAMAGE_PER_TICK)
        .with_modifier(Modifier::flat(STAT_PENALTY))
        .with_tick_rate(1)
}

/// Heat damage every tick and a constitution penalty while active.
pub fn heatstroke_effect(character: &EntityId) -> Effect {
    Effect::new(heatstroke_id(character), EffectType::Heatstroke)
        .with_value(DAMAGE_PER_TICK)
        .with_modifier(Modifier::flat(STAT_PENALTY))
        .with_tick_rate(1)
}

/// Result of [`EffectEngine::check_temperature_status_effects`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureCheck {
    /// Temperature effects live on the character after the check.
    pub active: Vec<Effect>,
    /// Changes the check made, in order. Apply each to the character.
    pub deltas: Vec<EffectDelta>,
}

impl EffectEngine {
    /// Start or stop hypothermia and heatstroke to match the character's
    /// body temperature.
    ///
    /// Calling this repeatedly while the temperature stays out of range
    /// changes nothing; the recurring damage comes from the schedule. When
    /// the temperature returns to range the effect is removed, the status
    /// cleared, and the stat penalty given back.
    pub fn check_temperature_status_effects(
        &mut self,
        character: &dyn EffectTarget,
        ctx: &EvalContext,
    ) -> TemperatureCheck {
        let id = character.target_id();
        let mut check = TemperatureCheck::default();
        let Some(body) = character.stat("body_temperature") else {
            return check;
        };

        self.sync_temperature_effect(
            character,
            ctx,
            hypothermia_effect(&id),
            body < HYPOTHERMIA_BELOW,
            &mut check,
        );
        self.sync_temperature_effect(
            character,
            ctx,
            heatstroke_effect(&id),
            body > HEATSTROKE_ABOVE,
            &mut check,
        );

        let tracked = [hypothermia_id(&id), heatstroke_id(&id)];
        check.active = self
            .active_effects(Some(&id))
            .into_iter()
            .filter(|a| tracked.contains(&a.effect.id))
            .map(|a| a.effect.clone())
            .collect();
        check
    }

    fn sync_temperature_effect(
        &mut self,
        character: &dyn EffectTarget,
        ctx: &EvalContext,
        effect: Effect,
        out_of_range: bool,
        check: &mut TemperatureCheck,
    ) {
        let id = character.target_id();
        let live = self.is_active(&id, &effect.id);
        if out_of_range && !live {
            if let ApplyOutcome::Applied(delta) = self.apply_effect(effect, character, ctx) {
                check.deltas.push(delta);
            }
        } else if !out_of_range && live {
            for removed in self.remove_effect_from(&id, &effect.id) {
                check.deltas.push(restoration(&removed, character));
            }
        }
    }
}

/// Undo the non-hp stat changes and status markers of an instance's
/// initial application.
fn restoration(removed: &ActiveEffect, character: &dyn EffectTarget) -> EffectDelta {
    let mut delta = EffectDelta::new(&removed.effect.id, removed.target.clone());
    for (key, change) in &removed.initial.stats {
        if key == "hp" {
            continue;
        }
        if let Some(current) = character.stat(key) {
            delta.set_stat(key.clone(), current, current - change.amount());
        }
    }
    for status in &removed.initial.statuses_added {
        delta.remove_status(status.clone());
    }
    delta
}
