use std::collections::{BTreeMap, HashMap};

use gw_core::{Chunk, ChunkMap, EntityId, GridPos, PlayerStatus};
use rand::Rng;
use tracing::{debug, warn};

use super::behavior::{Perception, resolve_behavior};
use super::config::CreatureConfig;
use super::definition::{Behavior, CreatureDefinition, Disposition};
use super::feeding::try_eat;
use super::movement::{accept_move, random_step, step_away, step_toward};
use super::pending::{PendingUpdates, StagedUpdate};
use super::state::CreatureState;
use crate::context::SimContext;
use crate::effect::{Effect, EffectEngine, EffectTarget, EffectType, EvalContext};
use crate::environment::Environment;
use crate::error::{SimError, SimResult};
use crate::event::{SimEvent, SimEventKind};
use crate::system::System;

/// A hit a creature lands this tick, resolved after every creature decided.
#[derive(Debug)]
struct Strike {
    creature: EntityId,
    name: String,
    damage: f64,
    delay_ms: u64,
}

/// What one creature decided this tick.
#[derive(Debug)]
struct Decision {
    staged: StagedUpdate,
    strike: Option<Strike>,
    /// Released immediately rather than at commit.
    immediate: Vec<SimEvent>,
}

/// Tracks creatures and advances their hunger, behavior, position, and
/// feeding once per tick.
///
/// Results of [`CreatureEngine::update_creatures`] are staged and only become
/// visible through [`CreatureEngine::get_creature`] after
/// [`CreatureEngine::apply_pending_updates`]. Attacks and grazing write to
/// the player and chunk map at the end of the pass.
#[derive(Debug, Default)]
pub struct CreatureEngine {
    config: CreatureConfig,
    creatures: BTreeMap<EntityId, CreatureState>,
    pending: PendingUpdates,
}

impl CreatureEngine {
    /// An empty engine with the given tuning.
    pub fn new(config: CreatureConfig) -> Self {
        Self {
            config,
            creatures: BTreeMap::new(),
            pending: PendingUpdates::new(),
        }
    }

    /// An empty engine with default tuning.
    pub fn with_default_config() -> Self {
        Self::new(CreatureConfig::default())
    }

    /// The engine's tuning.
    pub fn config(&self) -> &CreatureConfig {
        &self.config
    }

    /// Start tracking a creature standing on `chunk`.
    pub fn register_creature(
        &mut self,
        id: impl Into<EntityId>,
        definition: CreatureDefinition,
        position: GridPos,
        chunk: &Chunk,
    ) -> SimResult<&CreatureState> {
        let id = id.into();
        definition.validate()?;
        if self.creatures.contains_key(&id) {
            return Err(SimError::DuplicateCreature(id));
        }
        if chunk.position != position {
            return Err(SimError::PositionMismatch {
                id,
                position,
                chunk: chunk.position,
            });
        }
        debug!(creature = %id, kind = %definition.name, at = %position, "creature registered");
        let state = CreatureState::new(id.clone(), definition, position);
        Ok(self.creatures.entry(id).or_insert(state))
    }

    /// Stop tracking a creature, dropping anything staged for it.
    pub fn unregister_creature(&mut self, id: &EntityId) -> SimResult<CreatureState> {
        self.pending.discard(id);
        self.creatures
            .remove(id)
            .ok_or_else(|| SimError::CreatureNotFound(id.clone()))
    }

    /// The committed state of a creature.
    pub fn get_creature(&self, id: &EntityId) -> Option<&CreatureState> {
        self.creatures.get(id)
    }

    /// All committed creatures, ordered by id.
    pub fn creatures(&self) -> impl Iterator<Item = &CreatureState> {
        self.creatures.values()
    }

    /// The state staged for a creature this tick, if any.
    pub fn staged(&self, id: &EntityId) -> Option<&CreatureState> {
        self.pending.get(id).map(|update| &update.next)
    }

    /// Number of updates waiting for commit.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of tracked creatures.
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// True when no creatures are tracked.
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Run one tick for every creature near the player.
    ///
    /// Returns the attack and grazing events, which take effect immediately.
    /// Movement, behavior, and disposition changes are staged and come back
    /// from [`CreatureEngine::apply_pending_updates`].
    #[allow(clippy::too_many_arguments)]
    pub fn update_creatures<R: Rng + ?Sized>(
        &mut self,
        tick: u64,
        player_position: GridPos,
        player: &mut PlayerStatus,
        chunks: &mut ChunkMap,
        effects: &mut EffectEngine,
        environment: &Environment,
        rng: &mut R,
    ) -> SimResult<Vec<SimEvent>> {
        if !self.pending.is_empty() {
            return Err(SimError::UncommittedUpdates {
                count: self.pending.len(),
            });
        }

        let mut vegetation: HashMap<GridPos, f64> = HashMap::new();
        let mut strikes = Vec::new();
        let mut events = Vec::new();

        for state in self.creatures.values() {
            let distance = state.position.chebyshev(player_position);
            if distance > self.config.activity_radius {
                continue;
            }
            let decision = match self.decide(
                state,
                tick,
                player_position,
                chunks,
                &mut vegetation,
                environment,
                rng,
            ) {
                Ok(decision) => decision,
                Err(err) => {
                    warn!(creature = %state.id, tick, error = %err, "creature update failed, skipping");
                    continue;
                }
            };
            events.extend(decision.immediate);
            strikes.extend(decision.strike);
            self.pending.stage(decision.staged);
        }

        for (pos, density) in vegetation {
            if let Some(chunk) = chunks.get_mut(pos) {
                chunk.set_vegetation(density);
            }
        }

        let eval = EvalContext {
            tick,
            ..environment.eval_context()
        };
        for strike in strikes {
            events.extend(Self::land_strike(strike, player, effects, &eval, tick));
        }
        Ok(events)
    }

    /// Publish every staged update, nearest creatures first, and return the
    /// events that were held back with them.
    pub fn apply_pending_updates(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for update in self.pending.drain() {
            match self.creatures.get_mut(&update.next.id) {
                Some(slot) => {
                    *slot = update.next;
                    events.extend(update.events);
                }
                None => debug!(creature = %update.next.id, "dropping update for unregistered creature"),
            }
        }
        events
    }

    #[allow(clippy::too_many_arguments)]
    fn decide<R: Rng + ?Sized>(
        &self,
        state: &CreatureState,
        tick: u64,
        player_position: GridPos,
        chunks: &ChunkMap,
        vegetation: &mut HashMap<GridPos, f64>,
        environment: &Environment,
        rng: &mut R,
    ) -> SimResult<Decision> {
        let config = &self.config;
        chunks.require(state.position)?;

        let mut next = state.clone();
        let id = next.id.clone();
        let distance = next.position.chebyshev(player_position);
        let delay_ms = config.stagger_delay(distance);
        let event = |kind: SimEventKind, description: String| {
            SimEvent::new(tick, kind, description).with_delay(delay_ms)
        };
        let mut staged_events = Vec::new();
        let mut immediate = Vec::new();

        let def = &state.definition;
        if def.hunger_decay_interval > 0 && tick % def.hunger_decay_interval == 0 {
            next.satiation = (next.satiation - def.hunger_decay).max(0.0);
        }
        if next.disposition == Disposition::Passive
            && next.satiation_ratio() < config.escalation_ratio
        {
            next.disposition = Disposition::Territorial;
            staged_events.push(event(
                SimEventKind::DispositionEscalated {
                    creature: id.clone(),
                    from: Disposition::Passive,
                    to: Disposition::Territorial,
                },
                format!("the starving {} grows territorial", next.name()),
            ));
        }

        let perception = Perception {
            distance,
            search_range: environment.scaled_range(def.search_range),
            hungry: next.satiation_ratio() < config.hunger_ratio,
            can_forage: next.can_eat_plants(),
        };
        next.behavior = resolve_behavior(next.disposition, &perception, config);
        next.target_position = match next.behavior {
            Behavior::Hunting | Behavior::Fleeing => Some(player_position),
            _ => None,
        };

        let strikes = next.behavior == Behavior::Hunting
            && distance <= perception.search_range
            && distance <= config.attack_radius
            && next.is_predator()
            && def.damage > 0.0;
        let strike = strikes.then(|| Strike {
            creature: id.clone(),
            name: next.name().to_string(),
            damage: def.damage,
            delay_ms,
        });

        let move_due = tick.saturating_sub(next.last_move_tick) >= def.move_interval;
        if strike.is_none() && next.behavior != Behavior::Idle && move_due {
            let from = next.position;
            let candidate = match next.behavior {
                Behavior::Fleeing => Some(step_away(from, player_position, rng)),
                Behavior::Hunting if distance > 1 => Some(step_toward(from, player_position, rng)),
                Behavior::Hunting => None,
                _ => Some(random_step(from, rng)),
            };
            let accepted = candidate
                .and_then(|to| accept_move(from, to, chunks, config.blocked_travel_cost));
            if let Some(to) = accepted {
                next.position = to;
                next.chunk_key = to.key();
                next.last_move_tick = tick;
                staged_events.push(event(
                    SimEventKind::CreatureMoved {
                        creature: id.clone(),
                        from,
                        to,
                    },
                    format!("the {} moves to {to}", next.name()),
                ));
            }
        }

        let here = next.position;
        let available = match vegetation.get(&here) {
            Some(density) => *density,
            None => chunks.require(here)?.vegetation_density,
        };
        if let Some(meal) = try_eat(&next, available, config.forage_ratio, rng) {
            vegetation.insert(here, available - meal.consumed);
            next.satiation = (next.satiation + meal.gained).min(next.max_satiation);
            next.behavior = Behavior::Eating;
            immediate.push(event(
                SimEventKind::CreatureAte {
                    creature: id.clone(),
                    at: here,
                    consumed: meal.consumed,
                },
                format!("the {} grazes at {here}", next.name()),
            ));
        }

        if next.behavior != state.behavior {
            staged_events.push(event(
                SimEventKind::BehaviorChanged {
                    creature: id.clone(),
                    from: state.behavior,
                    to: next.behavior,
                },
                format!("the {} is now {}", next.name(), next.behavior),
            ));
        }

        Ok(Decision {
            staged: StagedUpdate {
                next,
                distance,
                delay_ms,
                events: staged_events,
            },
            strike,
            immediate,
        })
    }

    fn land_strike(
        strike: Strike,
        player: &mut PlayerStatus,
        effects: &mut EffectEngine,
        eval: &EvalContext,
        tick: u64,
    ) -> Vec<SimEvent> {
        let attack = Effect::new(format!("attack_{}", strike.creature), EffectType::Damage)
            .with_value(strike.damage)
            .with_duration(1);
        let was_alive = player.is_alive();
        let Some(delta) = effects.apply_effect(attack, &*player, eval).into_delta() else {
            return Vec::new();
        };
        player.apply_delta(&delta);
        let dealt = delta.change("hp").map_or(0.0, |hp| -hp);

        let mut events = vec![
            SimEvent::new(
                tick,
                SimEventKind::CreatureAttacked {
                    creature: strike.creature.clone(),
                    target: player.id.clone(),
                    damage: dealt,
                },
                format!("the {} attacks {} for {dealt}", strike.name, player.id),
            )
            .with_delay(strike.delay_ms),
        ];
        if was_alive && !player.is_alive() {
            events.push(
                SimEvent::new(
                    tick,
                    SimEventKind::PlayerDowned {
                        player: player.id.clone(),
                        cause: strike.name.clone(),
                    },
                    format!("{} was brought down by the {}", player.id, strike.name),
                )
                .with_delay(strike.delay_ms),
            );
        }
        events
    }
}

impl System for CreatureEngine {
    fn name(&self) -> &str {
        "creatures"
    }

    fn commit(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let events = self.apply_pending_updates();
        ctx.events.extend(events);
        Ok(())
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let tick = ctx.tick();
        let world = &mut *ctx.world;
        let player_position = world.player.position;
        let events = self.update_creatures(
            tick,
            player_position,
            &mut world.player,
            &mut world.chunks,
            &mut *ctx.effects,
            &*ctx.environment,
            &mut *ctx.rng,
        )?;
        ctx.events.extend(events);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
