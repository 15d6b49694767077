use gw_core::World;
use rand::rngs::StdRng;

use crate::clock::SimClock;
use crate::effect::{EffectEngine, EvalContext};
use crate::environment::Environment;
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    /// The world being simulated.
    pub world: &'a mut World,
    /// The simulation clock.
    pub clock: &'a SimClock,
    /// The shared event log.
    pub events: &'a mut EventLog,
    /// The seeded RNG every probabilistic decision draws from.
    pub rng: &'a mut StdRng,
    /// The session's effect engine.
    pub effects: &'a mut EffectEngine,
    /// Conditions at the player's position.
    pub environment: &'a mut Environment,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// The current tick.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// The in-world hour (0.0..24.0).
    pub fn hour_of_day(&self) -> f64 {
        self.clock.hour_of_day()
    }

    /// True between the configured day and night hours.
    pub fn is_daytime(&self) -> bool {
        self.clock.is_daytime()
    }

    /// Snapshot of the data effect conditions may query.
    pub fn eval_context(&self) -> EvalContext {
        EvalContext {
            tick: self.clock.tick(),
            hour_of_day: self.clock.hour_of_day(),
            weather: Some(self.environment.weather.name().to_string()),
        }
    }
}
