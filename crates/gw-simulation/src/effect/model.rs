use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// What an effect does. Built-in types dispatch to built-in resolution;
/// any type can be overridden by a registered handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    /// Modifies the stat named by `target_key`.
    StatModifier,
    /// Adds or removes a status marker.
    Status,
    /// Movement speed.
    Movement,
    /// Sight range.
    Vision,
    /// Chunk travel cost.
    Terrain,
    /// Direct hp loss.
    Damage,
    /// Direct hp gain.
    Healing,
    /// Cold damage over time plus a dexterity penalty.
    Hypothermia,
    /// Heat damage over time plus a constitution penalty.
    Heatstroke,
    /// Chunk temperature.
    Temperature,
    /// Chunk moisture.
    Moisture,
    /// Chunk wind.
    Wind,
    /// Chunk vegetation density.
    Vegetation,
    /// A caller-defined type; needs a registered handler to do anything.
    Custom(String),
}

impl EffectType {
    /// The stat an effect of this type modifies when it names none itself.
    pub fn default_stat(&self) -> Option<&'static str> {
        match self {
            Self::Movement => Some("movement"),
            Self::Vision => Some("vision"),
            Self::Terrain => Some("travel_cost"),
            Self::Damage | Self::Healing => Some("hp"),
            Self::Hypothermia => Some("dexterity"),
            Self::Heatstroke => Some("constitution"),
            Self::Temperature => Some("temperature"),
            Self::Moisture => Some("moisture"),
            Self::Wind => Some("wind"),
            Self::Vegetation => Some("vegetation_density"),
            Self::StatModifier | Self::Status | Self::Custom(_) => None,
        }
    }

    /// Snake-case name; custom types use their own.
    pub fn name(&self) -> &str {
        match self {
            Self::StatModifier => "stat_modifier",
            Self::Status => "status",
            Self::Movement => "movement",
            Self::Vision => "vision",
            Self::Terrain => "terrain",
            Self::Damage => "damage",
            Self::Healing => "healing",
            Self::Hypothermia => "hypothermia",
            Self::Heatstroke => "heatstroke",
            Self::Temperature => "temperature",
            Self::Moisture => "moisture",
            Self::Wind => "wind",
            Self::Vegetation => "vegetation",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who an effect is aimed at. Informational: callers pick the concrete
/// target when they apply the effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetScope {
    /// The effect's source.
    #[serde(rename = "self")]
    SelfTarget,
    /// A single chosen target.
    #[default]
    Target,
    /// Everything in an area.
    Area,
    /// Everything.
    Global,
}

/// How a [`Modifier`] combines with the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Add.
    #[default]
    Flat,
    /// Add a percentage.
    Percentage,
    /// Multiply.
    Multiply,
    /// Overwrite.
    Set,
}

/// How an effect changes a stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// How `amount` is applied.
    pub kind: ModifierKind,
    /// Operand.
    pub amount: f64,
}

impl Modifier {
    /// Add `amount`.
    pub fn flat(amount: f64) -> Self {
        Self {
            kind: ModifierKind::Flat,
            amount,
        }
    }

    /// Scale by `1 + amount / 100`.
    pub fn percentage(amount: f64) -> Self {
        Self {
            kind: ModifierKind::Percentage,
            amount,
        }
    }

    /// Scale by `amount`.
    pub fn multiply(amount: f64) -> Self {
        Self {
            kind: ModifierKind::Multiply,
            amount,
        }
    }

    /// Replace with `amount`.
    pub fn set(amount: f64) -> Self {
        Self {
            kind: ModifierKind::Set,
            amount,
        }
    }

    /// The value `current` becomes under this modifier.
    pub fn apply(self, current: f64) -> f64 {
        match self.kind {
            ModifierKind::Flat => current + self.amount,
            ModifierKind::Percentage => current * (1.0 + self.amount / 100.0),
            ModifierKind::Multiply => current * self.amount,
            ModifierKind::Set => self.amount,
        }
    }
}

/// A declarative effect definition.
///
/// `value` is the primary magnitude (damage dealt, healing done);
/// `modifier` describes the stat change. Most types use one or the other;
/// hypothermia and heatstroke use both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Identifies the effect for stacking and removal.
    pub id: String,
    /// What the effect does.
    pub effect_type: EffectType,
    /// Intended target.
    #[serde(default)]
    pub scope: TargetScope,
    /// Primary magnitude.
    #[serde(default)]
    pub value: f64,
    /// Stat change.
    #[serde(default)]
    pub modifier: Modifier,
    /// Stat, skill, or status key the effect touches.
    #[serde(default)]
    pub target_key: Option<String>,
    /// Lifetime in ticks. `None` lasts until removed.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Re-resolve every this many ticks while active.
    #[serde(default)]
    pub tick_rate: Option<u64>,
    /// Whether several instances may coexist on one target.
    #[serde(default)]
    pub stackable: bool,
    /// Cap on coexisting instances when stackable.
    #[serde(default)]
    pub max_stacks: Option<usize>,
    /// All must hold for the effect to apply.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Effect {
    /// An instant, non-stacking effect with no magnitude.
    pub fn new(id: impl Into<String>, effect_type: EffectType) -> Self {
        Self {
            id: id.into(),
            effect_type,
            scope: TargetScope::default(),
            value: 0.0,
            modifier: Modifier::default(),
            target_key: None,
            duration: None,
            tick_rate: None,
            stackable: false,
            max_stacks: None,
            conditions: Vec::new(),
        }
    }

    /// Set the primary magnitude.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the stat modifier.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the key the effect touches.
    pub fn with_target_key(mut self, key: impl Into<String>) -> Self {
        self.target_key = Some(key.into());
        self
    }

    /// Set the intended target.
    pub fn with_scope(mut self, scope: TargetScope) -> Self {
        self.scope = scope;
        self
    }

    /// Expire after `ticks`.
    pub fn with_duration(mut self, ticks: u64) -> Self {
        self.duration = Some(ticks);
        self
    }

    /// Re-resolve every `ticks`.
    pub fn with_tick_rate(mut self, ticks: u64) -> Self {
        self.tick_rate = Some(ticks);
        self
    }

    /// Allow up to `max_stacks` simultaneous instances (`None` = unlimited).
    pub fn stackable(mut self, max_stacks: Option<usize>) -> Self {
        self.stackable = true;
        self.max_stacks = max_stacks;
        self
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// The stat this effect modifies: its own key, else its type's default.
    pub fn stat_key(&self) -> Option<&str> {
        self.target_key
            .as_deref()
            .or_else(|| self.effect_type.default_stat())
    }

    /// True when the effect re-resolves on a schedule.
    pub fn is_recurring(&self) -> bool {
        self.tick_rate.is_some_and(|rate| rate > 0)
    }
}
