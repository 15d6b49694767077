use std::collections::BTreeMap;

use gw_core::{Chunk, GridPos, NORMAL_BODY_TEMPERATURE, PlayerStatus, TerrainType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::SimContext;
use crate::effect::{
    Effect, EffectDelta, EffectEngine, EffectTarget, EffectType, EvalContext, Modifier,
    TemperatureCheck, status_events,
};
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

use super::kind::{Intensity, WeatherType};
use super::profile::WeatherProfiles;
use super::regional::{RegionalVariation, RegionalWeather};
use super::state::WeatherState;
use super::table::{Transition, TransitionTable};

/// Configuration for the weather system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Global weather at tick 0.
    pub initial: WeatherType,
    /// Intensity of the initial weather.
    pub initial_intensity: Intensity,
    /// Cells within this Chebyshev radius of the player receive weather effects.
    pub effect_radius: i32,
    /// Added to ambient temperature during the day.
    pub day_bonus: f64,
    /// Subtracted from ambient temperature at night.
    pub night_penalty: f64,
    /// Ambient temperature at which body temperature stays normal.
    pub comfortable_temperature: f64,
    /// Degrees of body drift target per degree of ambient deviation.
    pub body_sensitivity: f64,
    /// Fraction of the gap to the drift target closed per tick.
    pub body_adjust_rate: f64,
    /// Largest body temperature change per tick.
    pub body_adjust_cap: f64,
    /// Rows that replace the built-in transition table, keyed by weather name.
    pub transitions: BTreeMap<String, Vec<Transition>>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            initial: WeatherType::Clear,
            initial_intensity: Intensity::Normal,
            effect_radius: 10,
            day_bonus: 5.0,
            night_penalty: 5.0,
            comfortable_temperature: 20.0,
            body_sensitivity: 0.15,
            body_adjust_rate: 0.1,
            body_adjust_cap: 0.5,
            transitions: BTreeMap::new(),
        }
    }
}

/// A change of the global weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherChange {
    /// Weather before the change.
    pub from: WeatherType,
    /// Weather after the change.
    pub to: WeatherType,
    /// Intensity after the change.
    pub intensity: Intensity,
}

/// What one call to [`WeatherSystem::update`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherUpdate {
    /// Set when the global weather changed.
    pub changed: Option<WeatherChange>,
    /// Regional zones whose duration ran out.
    pub ended: Vec<RegionalWeather>,
}

/// What [`WeatherSystem::apply_weather_effects`] changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherApplication {
    /// Deltas applied to the cell.
    pub cell: Vec<EffectDelta>,
    /// Ambient temperature, when a character was given.
    pub ambient_temperature: Option<f64>,
    /// Body temperature drift applied to the character.
    pub character: Vec<EffectDelta>,
    /// Hypothermia and heatstroke changes applied to the character.
    pub temperature: TemperatureCheck,
}

/// Drives global and regional weather and applies it to the world.
#[derive(Debug)]
pub struct WeatherSystem {
    config: WeatherConfig,
    profiles: WeatherProfiles,
    transitions: TransitionTable,
    current: WeatherState,
    regions: Vec<RegionalWeather>,
    variations: Vec<RegionalVariation>,
    next_region: u64,
    last_update: Option<u64>,
}

impl WeatherSystem {
    /// Create a system with the built-in profiles and transition table,
    /// overlaid with any transition rows from `config`.
    pub fn new(config: WeatherConfig) -> SimResult<Self> {
        let mut transitions = TransitionTable::builtin();
        for (from, row) in &config.transitions {
            transitions.set(from.parse()?, row.clone())?;
        }
        Self::with_tables(config, WeatherProfiles::builtin(), transitions)
    }

    /// Create a system with explicit profiles and transitions.
    pub fn with_tables(
        config: WeatherConfig,
        profiles: WeatherProfiles,
        transitions: TransitionTable,
    ) -> SimResult<Self> {
        let current = WeatherState::new(config.initial, config.initial_intensity, &profiles)?;
        Ok(Self {
            config,
            profiles,
            transitions,
            current,
            regions: Vec::new(),
            variations: Vec::new(),
            next_region: 1,
            last_update: None,
        })
    }

    /// A system with the default config.
    pub fn with_default_config() -> SimResult<Self> {
        Self::new(WeatherConfig::default())
    }

    /// The system's config.
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// The global weather.
    pub fn current(&self) -> &WeatherState {
        &self.current
    }

    /// The transition table in use.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Live regional zones.
    pub fn regions(&self) -> &[RegionalWeather] {
        &self.regions
    }

    /// Advance weather by one tick. A second call for the same tick does nothing.
    ///
    /// Counts down the global weather and every regional zone. When the
    /// global weather runs out the transition table picks its successor,
    /// which starts at normal intensity. A type with no outgoing transitions
    /// keeps its kind and intensity for another default duration. If the
    /// successor cannot be built, nothing changes and the tick can be retried.
    pub fn update<R: Rng + ?Sized>(&mut self, tick: u64, rng: &mut R) -> SimResult<WeatherUpdate> {
        let mut update = WeatherUpdate::default();
        if self.last_update == Some(tick) {
            return Ok(update);
        }

        let remaining = self.current.remaining_duration.saturating_sub(1);
        let successor = if remaining > 0 {
            None
        } else {
            Some(self.successor(rng)?)
        };
        self.last_update = Some(tick);

        for region in &mut self.regions {
            region.state.remaining_duration = region.state.remaining_duration.saturating_sub(1);
        }
        let (ended, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.regions)
            .into_iter()
            .partition(|r| r.state.remaining_duration == 0);
        self.regions = live;
        update.ended = ended;

        let Some(next) = successor else {
            self.current.remaining_duration = remaining;
            return Ok(update);
        };
        let from = self.current.kind;
        let previous_intensity = self.current.intensity;
        let (to, intensity) = (next.kind, next.intensity);
        self.current = next;
        if to != from || intensity != previous_intensity {
            info!(tick, %from, %to, "weather transition");
            update.changed = Some(WeatherChange {
                from,
                to,
                intensity,
            });
        } else {
            debug!(tick, weather = %to, "weather persists");
        }
        Ok(update)
    }

    /// The state that follows the current one once it runs out.
    fn successor<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<WeatherState> {
        match self.transitions.draw(self.current.kind, rng) {
            Some(to) => WeatherState::new(to, Intensity::Normal, &self.profiles),
            None => WeatherState::new(self.current.kind, self.current.intensity, &self.profiles),
        }
    }

    /// Force the global weather to `kind` at normal intensity.
    pub fn transition_to(&mut self, kind: WeatherType) -> SimResult<WeatherChange> {
        self.transition_to_with(kind, Intensity::Normal)
    }

    /// Force the global weather to `kind` at `intensity`.
    pub fn transition_to_with(
        &mut self,
        kind: WeatherType,
        intensity: Intensity,
    ) -> SimResult<WeatherChange> {
        let from = self.current.kind;
        self.current = WeatherState::new(kind, intensity, &self.profiles)?;
        info!(%from, to = %kind, %intensity, "weather forced");
        Ok(WeatherChange {
            from,
            to: kind,
            intensity,
        })
    }

    /// Start a localized weather zone. Returns its id.
    pub fn create_regional_weather(
        &mut self,
        center: GridPos,
        radius: i32,
        kind: WeatherType,
        intensity: Intensity,
    ) -> SimResult<u64> {
        let state =
            WeatherState::new(kind, intensity, &self.profiles)?.with_coverage(center, radius);
        let id = self.next_region;
        self.next_region += 1;
        self.regions.push(RegionalWeather { id, state });
        debug!(id, %center, radius, %kind, "regional weather created");
        Ok(id)
    }

    /// Drop a regional zone by id.
    pub fn remove_regional_weather(&mut self, id: u64) -> Option<RegionalWeather> {
        let index = self.regions.iter().position(|r| r.id == id)?;
        Some(self.regions.remove(index))
    }

    /// Scale weather effects inside an area by `1 + modifier`.
    pub fn add_regional_variation(&mut self, center: GridPos, radius: i32, modifier: f64) {
        self.variations.push(RegionalVariation {
            center,
            radius,
            modifier,
        });
    }

    /// The weather in effect at `pos`: the newest covering regional zone,
    /// else the global weather, scaled by every covering variation.
    pub fn get_weather_at(&self, pos: GridPos) -> WeatherState {
        let base = self
            .regions
            .iter()
            .rev()
            .find(|r| r.covers(pos))
            .map(|r| &r.state)
            .unwrap_or(&self.current);
        let factor: f64 = self
            .variations
            .iter()
            .filter(|v| v.covers(pos))
            .map(RegionalVariation::factor)
            .product();
        if factor == 1.0 {
            base.clone()
        } else {
            base.scaled(factor)
        }
    }

    /// Ambient temperature: terrain baseline, plus the weather modifier
    /// scaled by intensity, plus the day bonus or minus the night penalty.
    pub fn environmental_temperature(
        &self,
        pos: GridPos,
        terrain: TerrainType,
        is_daytime: bool,
    ) -> SimResult<f64> {
        let weather = self.get_weather_at(pos);
        let profile = self.profiles.get(weather.kind)?;
        let daylight = if is_daytime {
            self.config.day_bonus
        } else {
            -self.config.night_penalty
        };
        Ok(terrain.baseline_temperature()
            + profile.ambient_modifier * weather.intensity.multiplier()
            + daylight)
    }

    /// Visibility at `pos`; harsher intensity widens the gap to clear sight.
    pub fn visibility_at(&self, pos: GridPos) -> SimResult<f64> {
        let weather = self.get_weather_at(pos);
        let profile = self.profiles.get(weather.kind)?;
        let loss = (1.0 - profile.visibility) * weather.intensity.multiplier();
        Ok((1.0 - loss).clamp(0.0, 1.0))
    }

    /// Apply the weather at `cell` to it and, when given, to the character
    /// standing on it.
    ///
    /// Cell effects last one tick and are named `weather_<kind>`. The
    /// character's body temperature drifts toward a target set by the
    /// ambient temperature, after which hypothermia and heatstroke are
    /// checked.
    pub fn apply_weather_effects(
        &self,
        cell: &mut Chunk,
        character: Option<&mut PlayerStatus>,
        effects: &mut EffectEngine,
        ctx: &EvalContext,
        is_daytime: bool,
    ) -> SimResult<WeatherApplication> {
        let weather = self.get_weather_at(cell.position);
        let mut applied = WeatherApplication::default();

        for weather_effect in &weather.effects {
            let kind = weather_effect.kind;
            let effect = Effect::new(format!("weather_{}", kind.name()), kind.effect_type())
                .with_modifier(kind.modifier(weather_effect.amount))
                .with_duration(1);
            if let Some(delta) = effects.apply_effect(effect, &*cell, ctx).into_delta() {
                cell.apply_delta(&delta);
                applied.cell.push(delta);
            }
        }

        let Some(character) = character else {
            return Ok(applied);
        };

        let ambient = self.environmental_temperature(cell.position, cell.terrain, is_daytime)?;
        applied.ambient_temperature = Some(ambient);

        let step = self.body_drift(character.body_temperature, ambient);
        let drift = Effect::new(
            format!("body_temperature_{}", character.id),
            EffectType::Temperature,
        )
        .with_target_key("body_temperature")
        .with_modifier(Modifier::flat(step))
        .with_duration(1);
        if let Some(delta) = effects.apply_effect(drift, &*character, ctx).into_delta() {
            character.apply_delta(&delta);
            applied.character.push(delta);
        }

        let check = effects.check_temperature_status_effects(&*character, ctx);
        for delta in &check.deltas {
            character.apply_delta(delta);
        }
        applied.temperature = check;
        Ok(applied)
    }

    /// Body temperature change for one tick at `ambient`.
    fn body_drift(&self, body: f64, ambient: f64) -> f64 {
        let target = NORMAL_BODY_TEMPERATURE
            + (ambient - self.config.comfortable_temperature) * self.config.body_sensitivity;
        let cap = self.config.body_adjust_cap;
        ((target - body) * self.config.body_adjust_rate).clamp(-cap, cap)
    }
}

impl System for WeatherSystem {
    fn name(&self) -> &str {
        "weather"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let tick = ctx.tick();
        let update = self.update(tick, &mut *ctx.rng)?;
        if let Some(change) = update.changed {
            ctx.emit(
                SimEventKind::WeatherChanged {
                    from: change.from,
                    to: change.to,
                    intensity: change.intensity,
                },
                format!("the weather turns from {} to {}", change.from, change.to),
            );
        }
        for region in update.ended {
            if let Some(center) = region.center() {
                ctx.emit(
                    SimEventKind::RegionalWeatherEnded {
                        center,
                        weather: region.state.kind,
                    },
                    format!("the {} around {center} dies down", region.state.kind),
                );
            }
        }

        let center = ctx.world.player.position;
        let here = self.get_weather_at(center);
        ctx.environment.weather = here.kind;
        ctx.environment.intensity = here.intensity;
        ctx.environment.visibility = self.visibility_at(center)?;
        ctx.environment.is_daytime = ctx.clock.is_daytime();
        ctx.environment.tick = tick;
        ctx.environment.hour_of_day = ctx.clock.hour_of_day();
        ctx.environment.ambient_temperature = None;

        let eval = ctx.eval_context();
        let is_daytime = ctx.clock.is_daytime();
        let mut statuses = Vec::new();
        for pos in ctx
            .world
            .chunks
            .positions_within(center, self.config.effect_radius)
        {
            let world = &mut *ctx.world;
            let Some(cell) = world.chunks.get_mut(pos) else {
                continue;
            };
            let character = if pos == center {
                Some(&mut world.player)
            } else {
                None
            };
            let applied =
                self.apply_weather_effects(cell, character, &mut *ctx.effects, &eval, is_daytime)?;
            if let Some(ambient) = applied.ambient_temperature {
                ctx.environment.ambient_temperature = Some(ambient);
            }
            for delta in &applied.temperature.deltas {
                statuses.extend(status_events(&delta.target, delta));
            }
        }
        for (kind, description) in statuses {
            ctx.emit(kind, description);
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

#[cfg(test)]
mod tests {
    use super::*;
    use gw_core::EntityId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::error::SimError;
    use crate::weather::profile::WeatherProfile;
    use crate::weather::state::WeatherEffectKind;

    fn system(initial: WeatherType) -> WeatherSystem {
        WeatherSystem::new(WeatherConfig {
            initial,
            ..WeatherConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn counts_down_then_transitions() {
        let mut weather = system(WeatherType::Storm);
        let mut rng = StdRng::seed_from_u64(3);
        for tick in 1..4 {
            let update = weather.update(tick, &mut rng).unwrap();
            assert!(update.changed.is_none());
        }
        assert_eq!(weather.current().remaining_duration, 1);
        let update = weather.update(4, &mut rng).unwrap();
        let change = update.changed.expect("storm never repeats itself");
        assert_eq!(change.from, WeatherType::Storm);
        assert!(matches!(
            change.to,
            WeatherType::Rain | WeatherType::Cloudy | WeatherType::Wind
        ));
        assert_eq!(weather.current().intensity, Intensity::Normal);
    }

    #[test]
    fn update_is_idempotent_per_tick() {
        let mut weather = system(WeatherType::Storm);
        let mut rng = StdRng::seed_from_u64(3);
        weather.update(1, &mut rng).unwrap();
        weather.update(1, &mut rng).unwrap();
        weather.update(1, &mut rng).unwrap();
        assert_eq!(weather.current().remaining_duration, 3);
    }

    #[test]
    fn persists_without_transitions() {
        let mut weather = WeatherSystem::with_tables(
            WeatherConfig {
                initial: WeatherType::Storm,
                initial_intensity: Intensity::Severe,
                ..WeatherConfig::default()
            },
            WeatherProfiles::builtin(),
            TransitionTable::new(),
        )
        .unwrap();
        let duration = weather.current().remaining_duration;
        let mut rng = StdRng::seed_from_u64(0);
        for tick in 1..=20 {
            assert!(weather.update(tick, &mut rng).unwrap().changed.is_none());
            assert_eq!(weather.current().kind, WeatherType::Storm);
            assert_eq!(weather.current().intensity, Intensity::Severe);
        }
        // 20 ticks with a duration of 4 ends exactly on a renewal.
        assert_eq!(weather.current().remaining_duration, duration);
        let severe = WeatherState::new(
            WeatherType::Storm,
            Intensity::Severe,
            &WeatherProfiles::builtin(),
        )
        .unwrap();
        assert_eq!(weather.current().effects, severe.effects);
    }

    #[test]
    fn failed_transition_leaves_state_retryable() {
        let mut profiles = WeatherProfiles::new();
        profiles.insert(WeatherType::Storm, WeatherProfile::builtin(WeatherType::Storm));
        let mut table = TransitionTable::new();
        table
            .set(WeatherType::Storm, vec![Transition::new(WeatherType::Rain, 1.0)])
            .unwrap();
        let mut weather = WeatherSystem::with_tables(
            WeatherConfig {
                initial: WeatherType::Storm,
                ..WeatherConfig::default()
            },
            profiles,
            table,
        )
        .unwrap();
        weather
            .create_regional_weather(GridPos::new(0, 0), 1, WeatherType::Storm, Intensity::Mild)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let duration = weather.current().remaining_duration;
        for tick in 1..duration {
            weather.update(tick, &mut rng).unwrap();
        }
        assert_eq!(weather.current().remaining_duration, 1);

        for _ in 0..2 {
            let err = weather.update(duration, &mut rng).unwrap_err();
            assert!(matches!(err, SimError::MissingWeatherProfile(WeatherType::Rain)));
            assert_eq!(weather.current().remaining_duration, 1);
            assert_eq!(weather.regions()[0].state.remaining_duration, 1);
            assert_eq!(weather.last_update, Some(duration - 1));
        }

        weather
            .profiles
            .insert(WeatherType::Rain, WeatherProfile::builtin(WeatherType::Rain));
        let update = weather.update(duration, &mut rng).unwrap();
        assert_eq!(
            update.changed,
            Some(WeatherChange {
                from: WeatherType::Storm,
                to: WeatherType::Rain,
                intensity: Intensity::Normal,
            })
        );
        assert_eq!(update.ended.len(), 1);
    }

    #[test]
    fn missing_profile_is_fatal() {
        let mut profiles = WeatherProfiles::new();
        profiles.insert(WeatherType::Clear, WeatherProfile::builtin(WeatherType::Clear));
        let mut weather = WeatherSystem::with_tables(
            WeatherConfig::default(),
            profiles,
            TransitionTable::builtin(),
        )
        .unwrap();
        assert!(weather.transition_to(WeatherType::Rain).is_err());
        assert!(
            weather
                .create_regional_weather(GridPos::new(0, 0), 2, WeatherType::Snow, Intensity::Mild)
                .is_err()
        );
        assert_eq!(weather.current().kind, WeatherType::Clear);
    }

    #[test]
    fn config_rows_override_builtin() {
        let mut config = WeatherConfig::default();
        config.transitions.insert(
            "clear".into(),
            vec![Transition::new(WeatherType::Snow, 1.0)],
        );
        let weather = WeatherSystem::new(config).unwrap();
        assert_eq!(
            weather.transitions().transitions(WeatherType::Clear),
            &[Transition::new(WeatherType::Snow, 1.0)]
        );

        let mut bad = WeatherConfig::default();
        bad.transitions
            .insert("hail".into(), vec![Transition::new(WeatherType::Snow, 1.0)]);
        assert!(WeatherSystem::new(bad).is_err());
    }

    #[test]
    fn regional_weather_overrides_and_expires() {
        let mut weather = system(WeatherType::Clear);
        let mut rng = StdRng::seed_from_u64(1);
        let id = weather
            .create_regional_weather(GridPos::new(10, 10), 2, WeatherType::Storm, Intensity::Severe)
            .unwrap();
        assert_eq!(weather.get_weather_at(GridPos::new(11, 12)).kind, WeatherType::Storm);
        assert_eq!(weather.get_weather_at(GridPos::new(13, 10)).kind, WeatherType::Clear);

        for tick in 1..4 {
            assert!(weather.update(tick, &mut rng).unwrap().ended.is_empty());
        }
        let ended = weather.update(4, &mut rng).unwrap().ended;
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].id, id);
        assert_eq!(weather.get_weather_at(GridPos::new(10, 10)).kind, WeatherType::Clear);
    }

    #[test]
    fn variation_scales_effects() {
        let mut weather = system(WeatherType::Rain);
        weather.add_regional_variation(GridPos::new(0, 0), 3, 0.5);
        let inside = weather.get_weather_at(GridPos::new(2, 2));
        let outside = weather.get_weather_at(GridPos::new(9, 9));
        assert_eq!(inside.effect(WeatherEffectKind::Moisture), 3.0);
        assert_eq!(outside.effect(WeatherEffectKind::Moisture), 2.0);
    }

    #[test]
    fn ambient_temperature_combines_terrain_weather_and_daylight() {
        let weather = system(WeatherType::Snow);
        let pos = GridPos::new(0, 0);
        let night = weather
            .environmental_temperature(pos, TerrainType::Tundra, false)
            .unwrap();
        assert_eq!(night, -8.0 - 12.0 - 5.0);
        let day = weather
            .environmental_temperature(pos, TerrainType::Grassland, true)
            .unwrap();
        assert_eq!(day, 18.0 - 12.0 + 5.0);
    }

    #[test]
    fn visibility_drops_with_intensity() {
        let mut weather = system(WeatherType::Clear);
        assert_eq!(weather.visibility_at(GridPos::default()).unwrap(), 1.0);
        weather
            .transition_to_with(WeatherType::Rain, Intensity::Severe)
            .unwrap();
        let v = weather.visibility_at(GridPos::default()).unwrap();
        assert!((v - 0.2).abs() < 1e-9);
    }

    #[test]
    fn applies_cell_effects() {
        let weather = system(WeatherType::Rain);
        let mut engine = EffectEngine::new();
        let mut cell = Chunk::new(GridPos::new(1, 1), TerrainType::Grassland);
        let applied = weather
            .apply_weather_effects(&mut cell, None, &mut engine, &EvalContext::at_tick(1), true)
            .unwrap();
        assert_eq!(cell.moisture, 42.0);
        assert_eq!(cell.wind, 2.0);
        assert_eq!(cell.vegetation_density, 60.5);
        assert!(applied.ambient_temperature.is_none());
        assert!(engine.is_active(&EntityId::chunk(cell.position), "weather_moisture"));

        // Effects last a single tick.
        assert_eq!(engine.update_effects(2).len(), applied.cell.len());
    }

    #[test]
    fn cold_night_leads_to_hypothermia() {
        let weather = system(WeatherType::Snow);
        let mut engine = EffectEngine::new();
        let mut cell = Chunk::new(GridPos::new(0, 0), TerrainType::Tundra);
        let mut player = PlayerStatus::new("player", GridPos::new(0, 0));

        let mut gained_at = None;
        for tick in 1..=10 {
            let applied = weather
                .apply_weather_effects(
                    &mut cell,
                    Some(&mut player),
                    &mut engine,
                    &EvalContext::at_tick(tick),
                    false,
                )
                .unwrap();
            assert!(applied.ambient_temperature.is_some());
            if gained_at.is_none() && player.has_status("hypothermia") {
                gained_at = Some(tick);
            }
        }
        // Drift is capped at half a degree per tick.
        assert_eq!(gained_at, Some(5));
        assert!(player.body_temperature < 35.0);
        assert!(engine.is_active(&player.id, "hypothermia_player"));
        assert_eq!(engine.stack_count(&player.id, "hypothermia_player"), 1);
    }
}
