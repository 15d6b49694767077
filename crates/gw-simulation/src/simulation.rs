use gw_core::{EntityId, GridPos, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::creature::{CreatureDefinition, CreatureEngine};
use crate::effect::{EffectEngine, EffectSystem};
use crate::environment::Environment;
use crate::error::{SimError, SimResult};
use crate::event::EventLog;
use crate::system::System;
use crate::weather::WeatherSystem;

/// One simulation session.
///
/// Owns the world, clock, RNG, event log, effect engine, environment, and
/// registered systems. Each tick first commits whatever the systems staged
/// during the previous tick, then advances the clock and runs every system
/// in registration order.
pub struct Simulation {
    world: World,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    effects: EffectEngine,
    environment: Environment,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .field("weather", &self.environment.weather)
            .finish()
    }
}

impl Simulation {
    /// Create a session with no systems.
    pub fn new(world: World, config: &SimConfig) -> Self {
        let clock = SimClock::new(config.start_hour, config.hours_per_tick)
            .with_daylight(config.day_start_hour, config.night_start_hour);
        Self {
            world,
            clock,
            rng: StdRng::seed_from_u64(config.seed),
            events: EventLog::new(config.max_events),
            effects: EffectEngine::new(),
            environment: Environment::default(),
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Create a session running weather, creatures, and effects, in that
    /// order.
    pub fn with_default_systems(world: World, config: &SimConfig) -> SimResult<Self> {
        let mut sim = Self::new(world, config);
        sim.add_system(WeatherSystem::new(config.weather.clone())?);
        sim.add_system(CreatureEngine::new(config.creatures.clone()));
        sim.add_system(EffectSystem::new());
        Ok(sim)
    }

    /// Register a system. Systems are ticked in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Initialize all registered systems.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.each_system(|system, ctx| system.init(ctx))?;
        self.initialized = true;
        Ok(())
    }

    /// Publish everything the systems staged during the last tick.
    pub fn commit(&mut self) -> SimResult<()> {
        self.each_system(|system, ctx| system.commit(ctx))
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }
        self.commit()?;
        self.clock.advance();
        self.each_system(|system, ctx| system.tick(ctx))
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    fn each_system<F>(&mut self, mut f: F) -> SimResult<()>
    where
        F: FnMut(&mut dyn System, &mut SimContext<'_>) -> SimResult<()>,
    {
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                effects: &mut self.effects,
                environment: &mut self.environment,
            };
            let result = f(&mut *system, &mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Track a creature standing on the chunk at `position`.
    pub fn register_creature(
        &mut self,
        id: impl Into<EntityId>,
        definition: CreatureDefinition,
        position: GridPos,
    ) -> SimResult<()> {
        let chunk = self
            .world
            .chunks
            .get(position)
            .ok_or(SimError::ChunkNotFound(position))?;
        let engine = self
            .systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<CreatureEngine>())
            .ok_or_else(|| SimError::SystemError("no creature engine registered".to_string()))?;
        engine.register_creature(id, definition, position, chunk)?;
        Ok(())
    }

    /// The world being simulated.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Every event emitted so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The session's effect engine.
    pub fn effects(&self) -> &EffectEngine {
        &self.effects
    }

    /// Mutable access to the effect engine, e.g. to register handlers.
    pub fn effects_mut(&mut self) -> &mut EffectEngine {
        &mut self.effects
    }

    /// Conditions at the player's position as of the last weather tick.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Names of the registered systems, in tick order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Extract the world, consuming the simulation.
    pub fn into_world(self) -> World {
        self.world
    }

    /// The current tick number.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
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
    use crate::creature::{Behavior, Disposition, Trophic};
    use crate::event::SimEventKind;
    use gw_core::{ChunkMap, PlayerStatus, TerrainType, WorldMeta};

    fn meadow(player_at: GridPos) -> World {
        World::new(
            WorldMeta::new("Meadow"),
            ChunkMap::filled(10, 10, TerrainType::Grassland),
            PlayerStatus::new("player", player_at),
        )
    }

    fn session(seed: u64) -> Simulation {
        let config = SimConfig::default().with_seed(seed);
        let mut sim = Simulation::with_default_systems(meadow(GridPos::new(5, 5)), &config).unwrap();
        sim.register_creature("wolf-1", CreatureDefinition::wolf(), GridPos::new(1, 1))
            .unwrap();
        sim.register_creature("deer-1", CreatureDefinition::deer(), GridPos::new(7, 7))
            .unwrap();
        sim
    }

    #[test]
    fn default_pipeline_order() {
        let sim = session(1);
        assert_eq!(sim.system_names(), ["weather", "creatures", "effects"]);
    }

    #[test]
    fn adjacent_wolf_bites_on_first_tick() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_default_systems(meadow(GridPos::new(5, 5)), &config).unwrap();
        sim.register_creature("wolf-1", CreatureDefinition::wolf(), GridPos::new(5, 6))
            .unwrap();
        sim.tick().unwrap();

        assert_eq!(sim.world().player.hp, 92.0);
        let engine = sim.get_system::<CreatureEngine>().unwrap();
        assert_eq!(engine.get_creature(&"wolf-1".into()).unwrap().behavior, Behavior::Idle);

        sim.commit().unwrap();
        let engine = sim.get_system::<CreatureEngine>().unwrap();
        assert_eq!(engine.get_creature(&"wolf-1".into()).unwrap().behavior, Behavior::Hunting);
        assert!(sim
            .events()
            .events_for_entity(&"wolf-1".into())
            .iter()
            .any(|e| matches!(e.kind, SimEventKind::BehaviorChanged { to: Behavior::Hunting, .. })));
    }

    #[test]
    fn same_seed_same_story() {
        let story = |seed| {
            let mut sim = session(seed);
            sim.run(48).unwrap();
            sim.commit().unwrap();
            sim.events()
                .events()
                .iter()
                .map(|e| e.description.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(story(9), story(9));
    }

    #[test]
    fn run_advances_clock() {
        let mut sim = session(3);
        sim.run(30).unwrap();
        assert_eq!(sim.current_tick(), 30);
        assert_eq!(sim.environment().tick, 30);
        assert_eq!(sim.clock().day(), 1);
    }

    #[test]
    fn registering_needs_engine_and_chunk() {
        let mut bare = Simulation::new(meadow(GridPos::default()), &SimConfig::default());
        assert!(matches!(
            bare.register_creature("wolf-1", CreatureDefinition::wolf(), GridPos::new(1, 1)),
            Err(SimError::SystemError(_))
        ));
        let mut sim = session(1);
        assert!(matches!(
            sim.register_creature("wolf-2", CreatureDefinition::wolf(), GridPos::new(40, 1)),
            Err(SimError::ChunkNotFound(_))
        ));
    }

    #[test]
    fn custom_system_registration() {
        #[derive(Debug)]
        struct CustomSystem {
            ticked: bool,
            committed: u32,
        }
        impl System for CustomSystem {
            fn name(&self) -> &str {
                "custom"
            }
            fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
                self.ticked = true;
                Ok(())
            }
            fn commit(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
                self.committed += 1;
                Ok(())
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let mut sim = Simulation::new(meadow(GridPos::default()), &SimConfig::default());
        sim.add_system(CustomSystem {
            ticked: false,
            committed: 0,
        });
        sim.run(2).unwrap();

        let custom = sim.get_system::<CustomSystem>().unwrap();
        assert!(custom.ticked);
        assert_eq!(custom.committed, 2);
    }

    #[test]
    fn into_world_keeps_vegetation_changes() {
        let config = SimConfig::default();
        let mut sim = Simulation::with_default_systems(meadow(GridPos::new(0, 0)), &config).unwrap();
        let goat = CreatureDefinition::new("goat", Trophic::Herbivore, Disposition::Immobile)
            .with_hunger_decay(1, 50.0)
            .with_grazing(1.0, 5.0, 0.5);
        sim.register_creature("goat", goat, GridPos::new(9, 9)).unwrap();
        sim.run(3).unwrap();
        let world = sim.into_world();
        assert!(world.chunks.get(GridPos::new(9, 9)).unwrap().vegetation_density < 60.0);
    }
}
