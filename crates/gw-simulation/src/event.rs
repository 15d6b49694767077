use gw_core::{EntityId, GridPos};
use serde::Serialize;

use crate::creature::{Behavior, Disposition};
use crate::weather::{Intensity, WeatherType};

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEventKind {
    // Weather
    /// The global weather changed.
    WeatherChanged {
        /// The weather before the change.
        from: WeatherType,
        /// The weather after the change.
        to: WeatherType,
        /// Intensity of the new weather.
        intensity: Intensity,
    },
    /// A localized weather zone dissipated.
    RegionalWeatherEnded {
        /// Center of the zone.
        center: GridPos,
        /// The zone's weather.
        weather: WeatherType,
    },

    // Effects
    /// A status marker was added to an entity.
    StatusGained {
        /// The affected entity.
        entity: EntityId,
        /// The status marker.
        status: String,
    },
    /// A status marker was removed from an entity.
    StatusCleared {
        /// The affected entity.
        entity: EntityId,
        /// The status marker.
        status: String,
    },
    /// A timed effect ran out.
    EffectExpired {
        /// The entity or chunk the effect was on.
        target: EntityId,
        /// The effect id.
        effect: String,
    },

    // Creatures
    /// A creature stepped to a neighboring chunk.
    CreatureMoved {
        /// The creature that moved.
        creature: EntityId,
        /// Where it came from.
        from: GridPos,
        /// Where it went.
        to: GridPos,
    },
    /// A creature's behavior changed.
    BehaviorChanged {
        /// The creature.
        creature: EntityId,
        /// The previous behavior.
        from: Behavior,
        /// The new behavior.
        to: Behavior,
    },
    /// Hunger pushed a creature into a harsher disposition.
    DispositionEscalated {
        /// The creature.
        creature: EntityId,
        /// The previous disposition.
        from: Disposition,
        /// The new disposition.
        to: Disposition,
    },
    /// A creature struck the player.
    CreatureAttacked {
        /// The attacker.
        creature: EntityId,
        /// The player that was hit.
        target: EntityId,
        /// Hit points actually lost.
        damage: f64,
    },
    /// A creature grazed on a chunk's vegetation.
    CreatureAte {
        /// The creature.
        creature: EntityId,
        /// The chunk it ate from.
        at: GridPos,
        /// Vegetation density consumed.
        consumed: f64,
    },

    // Lifecycle
    /// The player's hit points reached zero.
    PlayerDowned {
        /// The player.
        player: EntityId,
        /// What dealt the final blow.
        cause: String,
    },

    // Custom
    /// A user-defined event.
    Custom {
        /// A label identifying the custom event type.
        label: String,
        /// The entities involved in this custom event.
        entities: Vec<EntityId>,
    },
}

impl SimEventKind {
    /// Check whether a given entity is involved in this event.
    pub fn involves(&self, id: &EntityId) -> bool {
        match self {
            Self::WeatherChanged { .. } | Self::RegionalWeatherEnded { .. } => false,
            Self::StatusGained { entity, .. } | Self::StatusCleared { entity, .. } => entity == id,
            Self::EffectExpired { target, .. } => target == id,
            Self::CreatureMoved { creature, .. }
            | Self::BehaviorChanged { creature, .. }
            | Self::DispositionEscalated { creature, .. }
            | Self::CreatureAte { creature, .. } => creature == id,
            Self::CreatureAttacked {
                creature, target, ..
            } => creature == id || target == id,
            Self::PlayerDowned { player, .. } => player == id,
            Self::Custom { entities, .. } => entities.contains(id),
        }
    }

    /// Short snake_case label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WeatherChanged { .. } => "weather_changed",
            Self::RegionalWeatherEnded { .. } => "regional_weather_ended",
            Self::StatusGained { .. } => "status_gained",
            Self::StatusCleared { .. } => "status_cleared",
            Self::EffectExpired { .. } => "effect_expired",
            Self::CreatureMoved { .. } => "creature_moved",
            Self::BehaviorChanged { .. } => "behavior_changed",
            Self::DispositionEscalated { .. } => "disposition_escalated",
            Self::CreatureAttacked { .. } => "creature_attacked",
            Self::CreatureAte { .. } => "creature_ate",
            Self::PlayerDowned { .. } => "player_downed",
            Self::Custom { .. } => "custom",
        }
    }

    /// Routine bookkeeping events that a summary view may hide.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            Self::CreatureMoved { .. } | Self::EffectExpired { .. } | Self::CreatureAte { .. }
        )
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
    /// Suggested presentation delay; farther creatures animate later.
    pub delay_ms: u64,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
            delay_ms: 0,
        }
    }

    /// Set the presentation delay.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Append several events in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given entity.
    pub fn events_for_entity(&self, id: &EntityId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
