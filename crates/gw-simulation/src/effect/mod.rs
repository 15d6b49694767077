//! The effect engine: declarative effects, conditions, stacking, durations,
//! and recurring triggers, resolved against players and chunks.

mod condition;
mod delta;
mod engine;
mod model;
mod resolve;
mod schedule;
mod stack;
mod system;
mod target;
mod temperature;

pub use condition::{Condition, ConditionKind, ConditionValue, EvalContext, Operator, all_hold};
pub use delta::{EffectDelta, StatChange};
pub use engine::{ApplyOutcome, EffectEngine, EffectHandler, Rejection};
pub use model::{Effect, EffectType, Modifier, ModifierKind, TargetScope};
pub use resolve::{PENALTY_FLOOR, resolve_builtin, resolve_tick};
pub use schedule::{Recurrence, RecurringSchedule};
pub use stack::{ActiveEffect, EffectStacks};
pub use system::EffectSystem;
pub(crate) use system::status_events;
pub use target::EffectTarget;
pub use temperature::{
    HEATSTROKE_ABOVE, HYPOTHERMIA_BELOW, TemperatureCheck, heatstroke_effect, heatstroke_id,
    hypothermia_effect, hypothermia_id,
};
