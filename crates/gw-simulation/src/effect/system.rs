use gw_core::EntityId;
use tracing::warn;

use super::delta::EffectDelta;
use super::target::EffectTarget;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// Drives the effect engine's clock: expires timed effects and fires
/// recurring ones against the player or the chunk they target.
#[derive(Debug, Default)]
pub struct EffectSystem;

impl EffectSystem {
    /// A new effect system.
    pub fn new() -> Self {
        Self
    }
}

impl System for EffectSystem {
    fn name(&self) -> &str {
        "effects"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let now = ctx.tick();

        for expired in ctx.effects.update_effects(now) {
            if expired.effect.duration.is_some_and(|d| d > 1) {
                ctx.emit(
                    SimEventKind::EffectExpired {
                        target: expired.target.clone(),
                        effect: expired.effect.id.clone(),
                    },
                    format!("{} wore off {}", expired.effect.id, expired.target),
                );
            }
        }

        let eval = ctx.eval_context();
        for active in ctx.effects.due_recurring(now) {
            if let Some(pos) = active.target.as_chunk() {
                match ctx.world.chunks.get_mut(pos) {
                    Some(chunk) => {
                        let delta = ctx.effects.resolve_recurring(&active, &*chunk, &eval);
                        chunk.apply_delta(&delta);
                    }
                    None => {
                        warn!(effect = %active.effect.id, chunk = %pos, "recurring effect on missing chunk")
                    }
                }
                continue;
            }

            if active.target != ctx.world.player.id {
                warn!(
                    effect = %active.effect.id,
                    target = %active.target,
                    "recurring effect on unknown target"
                );
                continue;
            }
            let was_alive = ctx.world.player.is_alive();
            let delta = ctx
                .effects
                .resolve_recurring(&active, &ctx.world.player, &eval);
            ctx.world.player.apply_delta(&delta);
            if was_alive && !ctx.world.player.is_alive() {
                let player = ctx.world.player.id.clone();
                ctx.emit(
                    SimEventKind::PlayerDowned {
                        player: player.clone(),
                        cause: active.effect.effect_type.to_string(),
                    },
                    format!("{player} succumbed to {}", active.effect.effect_type),
                );
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Status markers a delta set or cleared on `entity`, as events.
pub(crate) fn status_events(entity: &EntityId, delta: &EffectDelta) -> Vec<(SimEventKind, String)> {
    let gained = delta.statuses_added.iter().map(|status| {
        (
            SimEventKind::StatusGained {
                entity: entity.clone(),
                status: status.clone(),
            },
            format!("{entity} is suffering from {status}"),
        )
    });
    let cleared = delta.statuses_removed.iter().map(|status| {
        (
            SimEventKind::StatusCleared {
                entity: entity.clone(),
                status: status.clone(),
            },
            format!("{entity} recovered from {status}"),
        )
    });
    gained.chain(cleared).collect()
}
