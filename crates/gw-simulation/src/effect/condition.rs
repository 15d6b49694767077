use std::fmt;

use serde::{Deserialize, Serialize};

use super::target::EffectTarget;

/// What a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// A numeric stat on the target.
    Stat,
    /// A skill level on the target.
    Skill,
    /// Presence of a status marker.
    Status,
    /// The hour of day or the tick.
    Time,
    /// The terrain under the target.
    Location,
    /// The weather at the target.
    Weather,
}

/// Comparison operator for condition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Ge,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Le,
    /// Equal; numbers within `f64::EPSILON`.
    #[serde(rename = "==")]
    Eq,
    /// Not equal.
    #[serde(rename = "!=")]
    Ne,
}

impl Operator {
    /// Compare two numbers.
    pub fn compare(self, actual: f64, expected: f64) -> bool {
        match self {
            Self::Gt => actual > expected,
            Self::Lt => actual < expected,
            Self::Ge => actual >= expected,
            Self::Le => actual <= expected,
            Self::Eq => (actual - expected).abs() < f64::EPSILON,
            Self::Ne => (actual - expected).abs() >= f64::EPSILON,
        }
    }

    /// Compare two strings, ignoring ASCII case. Ordering operators never hold.
    pub fn compare_text(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Eq => actual.eq_ignore_ascii_case(expected),
            Self::Ne => !actual.eq_ignore_ascii_case(expected),
            _ => false,
        }
    }

    /// The operator as written in definitions, e.g. `>=`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The expected side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// For status checks.
    Bool(bool),
    /// For stats, skills, and time.
    Number(f64),
    /// For terrain and weather names.
    Text(String),
}

/// A predicate that must hold for an effect to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// What is inspected.
    pub kind: ConditionKind,
    /// How actual and expected compare.
    pub operator: Operator,
    /// The expected value.
    pub value: ConditionValue,
    /// Stat, skill, or status key; `hour` or `tick` for time checks.
    #[serde(default)]
    pub target_key: Option<String>,
}

/// World facts a condition may query besides the target itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalContext {
    /// Current tick.
    pub tick: u64,
    /// In-world hour (0.0..24.0).
    pub hour_of_day: f64,
    /// Lowercase weather name at the target, if known.
    pub weather: Option<String>,
}

impl EvalContext {
    /// A context with only the tick set.
    pub fn at_tick(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }
}

impl Condition {
    /// Compare a stat against `value`.
    pub fn stat(key: impl Into<String>, operator: Operator, value: f64) -> Self {
        Self {
            kind: ConditionKind::Stat,
            operator,
            value: ConditionValue::Number(value),
            target_key: Some(key.into()),
        }
    }

    /// Compare a skill level against `value`.
    pub fn skill(key: impl Into<String>, operator: Operator, value: f64) -> Self {
        Self {
            kind: ConditionKind::Skill,
            operator,
            value: ConditionValue::Number(value),
            target_key: Some(key.into()),
        }
    }

    /// Holds when the target's status marker presence equals `present`.
    pub fn status(key: impl Into<String>, present: bool) -> Self {
        Self {
            kind: ConditionKind::Status,
            operator: Operator::Eq,
            value: ConditionValue::Bool(present),
            target_key: Some(key.into()),
        }
    }

    /// Compare against the hour of day (0.0..24.0).
    pub fn hour(operator: Operator, hour: f64) -> Self {
        Self {
            kind: ConditionKind::Time,
            operator,
            value: ConditionValue::Number(hour),
            target_key: Some("hour".into()),
        }
    }

    /// Compare against the terrain name of the target's location.
    pub fn terrain(operator: Operator, terrain: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::Location,
            operator,
            value: ConditionValue::Text(terrain.into()),
            target_key: None,
        }
    }

    /// Compare against the weather name at the target.
    pub fn weather(operator: Operator, weather: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::Weather,
            operator,
            value: ConditionValue::Text(weather.into()),
            target_key: None,
        }
    }

    /// Evaluate against a target. Anything the condition needs but cannot
    /// find evaluates to false.
    pub fn evaluate(&self, target: &dyn EffectTarget, ctx: &EvalContext) -> bool {
        match self.kind {
            ConditionKind::Stat => self
                .target_key
                .as_deref()
                .and_then(|key| target.stat(key))
                .is_some_and(|actual| self.holds_for_number(actual)),
            ConditionKind::Skill => self
                .target_key
                .as_deref()
                .and_then(|key| target.skill(key))
                .is_some_and(|actual| self.holds_for_number(actual)),
            ConditionKind::Status => {
                let Some(key) = self.target_key.as_deref() else {
                    return false;
                };
                let present = target.has_status(key);
                match &self.value {
                    ConditionValue::Bool(expected) => match self.operator {
                        Operator::Eq => present == *expected,
                        Operator::Ne => present != *expected,
                        _ => false,
                    },
                    _ => false,
                }
            }
            ConditionKind::Time => {
                let actual = match self.target_key.as_deref() {
                    Some("hour") => ctx.hour_of_day,
                    _ => ctx.tick as f64,
                };
                self.holds_for_number(actual)
            }
            ConditionKind::Location => match self.target_key.as_deref() {
                Some("x") => target
                    .position()
                    .is_some_and(|p| self.holds_for_number(p.x as f64)),
                Some("y") => target
                    .position()
                    .is_some_and(|p| self.holds_for_number(p.y as f64)),
                Some("position") => target
                    .position()
                    .is_some_and(|p| self.holds_for_text(&p.key())),
                _ => target
                    .terrain()
                    .is_some_and(|t| self.holds_for_text(t.name())),
            },
            ConditionKind::Weather => ctx
                .weather
                .as_deref()
                .is_some_and(|w| self.holds_for_text(w)),
        }
    }

    fn holds_for_number(&self, actual: f64) -> bool {
        match &self.value {
            ConditionValue::Number(expected) => self.operator.compare(actual, *expected),
            _ => false,
        }
    }

    fn holds_for_text(&self, actual: &str) -> bool {
        match &self.value {
            ConditionValue::Text(expected) => self.operator.compare_text(actual, expected),
            _ => false,
        }
    }
}

/// True when every condition holds. An empty list always holds.
pub fn all_hold(conditions: &[Condition], target: &dyn EffectTarget, ctx: &EvalContext) -> bool {
    conditions.iter().all(|c| c.evaluate(target, ctx))
}
