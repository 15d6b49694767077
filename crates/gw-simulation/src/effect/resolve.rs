//! Built-in effect resolution. Pure: reads the target, returns a delta.

use super::delta::EffectDelta;
use super::model::{Effect, EffectType};
use super::target::EffectTarget;

/// Stats temperature penalties can never push below.
pub const PENALTY_FLOOR: f64 = 1.0;

/// Resolve an effect's initial application.
pub fn resolve_builtin(effect: &Effect, target: &dyn EffectTarget) -> EffectDelta {
    let mut delta = EffectDelta::new(&effect.id, target.target_id());
    match &effect.effect_type {
        EffectType::Damage => change_hp(&mut delta, target, -effect.value.max(0.0)),
        EffectType::Healing => change_hp(&mut delta, target, effect.value.max(0.0)),
        EffectType::Status => {
            if let Some(status) = effect.target_key.as_deref() {
                if effect.modifier.amount < 0.0 {
                    delta.remove_status(status);
                } else {
                    delta.add_status(status);
                }
            }
        }
        EffectType::Hypothermia | EffectType::Heatstroke => {
            change_hp(&mut delta, target, -effect.value.max(0.0));
            let penalized = effect
                .stat_key()
                .and_then(|key| target.stat(key).map(|current| (key, current)));
            if let Some((key, current)) = penalized {
                let after = effect.modifier.apply(current).max(PENALTY_FLOOR.min(current));
                delta.set_stat(key, current, after);
            }
            delta.add_status(effect.effect_type.name());
        }
        _ => modify_stat(&mut delta, effect, target),
    }
    delta
}

/// Resolve one recurring trigger. Damage-over-time types only deal their
/// damage again; everything else re-applies in full.
pub fn resolve_tick(effect: &Effect, target: &dyn EffectTarget) -> EffectDelta {
    match effect.effect_type {
        EffectType::Hypothermia | EffectType::Heatstroke => {
            let mut delta = EffectDelta::new(&effect.id, target.target_id());
            change_hp(&mut delta, target, -effect.value.max(0.0));
            delta
        }
        _ => resolve_builtin(effect, target),
    }
}

fn change_hp(delta: &mut EffectDelta, target: &dyn EffectTarget, amount: f64) {
    let Some(hp) = target.stat("hp") else {
        return;
    };
    let ceiling = target.stat("max_hp").unwrap_or(f64::INFINITY);
    let after = (hp + amount).clamp(0.0, ceiling.max(hp));
    delta.set_stat("hp", hp, after);
}

fn modify_stat(delta: &mut EffectDelta, effect: &Effect, target: &dyn EffectTarget) {
    let Some(key) = effect.stat_key() else {
        return;
    };
    let current = target.stat(key).unwrap_or(0.0);
    delta.set_stat(key, current, effect.modifier.apply(current));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::delta::StatChange;
    use crate::effect::model::Modifier;
    use gw_core::{Chunk, GridPos, PlayerStatus, TerrainType};

    fn player() -> PlayerStatus {
        PlayerStatus::new("p", GridPos::default()).with_hp(50.0, 100.0)
    }

    #[test]
    fn damage_and_healing_clamp() {
        let p = player();
        let hit = Effect::new("bite", EffectType::Damage).with_value(80.0);
        assert_eq!(resolve_builtin(&hit, &p).stats["hp"].after, 0.0);
        let heal = Effect::new("salve", EffectType::Healing).with_value(80.0);
        assert_eq!(resolve_builtin(&heal, &p).stats["hp"].after, 100.0);
    }

    #[test]
    fn movement_uses_modifier_on_default_stat() {
        let mut p = player();
        p.set_stat("movement", 6.0);
        let mud =
            Effect::new("mud", EffectType::Movement).with_modifier(Modifier::percentage(-50.0));
        let delta = resolve_builtin(&mud, &p);
        assert_eq!(delta.change("movement"), Some(-3.0));
    }

    #[test]
    fn missing_stat_starts_from_zero() {
        let p = player();
        let sight = Effect::new("owl", EffectType::Vision).with_modifier(Modifier::flat(2.0));
        assert_eq!(resolve_builtin(&sight, &p).stats["vision"].after, 2.0);
    }

    #[test]
    fn status_effect_adds_or_removes_marker() {
        let p = player();
        let wet = Effect::new("soak", EffectType::Status).with_target_key("wet");
        assert!(resolve_builtin(&wet, &p).statuses_added.contains("wet"));
        let dry = wet.with_modifier(Modifier::flat(-1.0));
        assert!(resolve_builtin(&dry, &p).statuses_removed.contains("wet"));
    }

    #[test]
    fn hypothermia_floors_penalty() {
        let mut p = player();
        p.set_stat("dexterity", 2.0);
        let cold = Effect::new("cold", EffectType::Hypothermia)
            .with_value(2.0)
            .with_modifier(Modifier::flat(-2.0));
        let delta = resolve_builtin(&cold, &p);
        assert_eq!(delta.stats["hp"].after, 48.0);
        assert_eq!(delta.stats["dexterity"].after, 1.0);
        assert!(delta.statuses_added.contains("hypothermia"));

        let tick = resolve_tick(&cold, &p);
        assert_eq!(tick.change("hp"), Some(-2.0));
        assert!(tick.change("dexterity").is_none());
        assert!(tick.statuses_added.is_empty());
    }

    #[test]
    fn terrain_effect_on_chunk() {
        let chunk = Chunk::new(GridPos::new(0, 0), TerrainType::Swamp);
        let flood =
            Effect::new("flood", EffectType::Terrain).with_modifier(Modifier::set(100.0));
        let delta = resolve_builtin(&flood, &chunk);
        assert_eq!(delta.target.as_str(), "chunk:0,0");
        assert_eq!(
            delta.stats["travel_cost"],
            StatChange {
                before: 5.0,
                after: 100.0
            }
        );
        // Chunks have no hp, so damage resolves to nothing.
        let hit = Effect::new("hit", EffectType::Damage).with_value(3.0);
        assert!(resolve_builtin(&hit, &chunk).is_empty());
    }
}
