//! Core domain types for the lift log.
//!
//! This module defines:
//! - Logged training sets and their canonical normalization
//! - Derived per-day bests used for progress reporting
//! - Progression decisions produced by the advisor

use crate::e1rm::estimate_e1rm;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ============================================================================
// Training Sets
// ============================================================================

/// One logged attempt at an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingSet {
    pub id: String,
    pub exercise: String,
    pub date: String,
    pub weight: f64,
    pub reps: f64,
    /// Always recomputed from `weight` and `reps`
    pub e1rm: f64,
}

impl TrainingSet {
    /// Build a set with a freshly generated id
    pub fn new(exercise: &str, date: &str, weight: f64, reps: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), exercise, date, weight, reps)
    }

    fn with_id(id: String, exercise: &str, date: &str, weight: f64, reps: f64) -> Self {
        Self {
            id,
            exercise: exercise.trim().to_string(),
            date: date.trim().to_string(),
            weight,
            reps,
            e1rm: estimate_e1rm(weight, reps),
        }
    }

    /// Canonicalize a loosely-typed stored or submitted record.
    ///
    /// - Keeps a non-blank string id (trimmed), otherwise assigns a UUID
    /// - Renders `exercise` and `date` as trimmed text, empty when absent
    /// - Coerces `weight` and `reps` to finite numbers, zero when unusable
    /// - Recomputes `e1rm`; an incoming value is ignored
    pub fn normalize(raw: &Value) -> Self {
        let id = match raw.get("id").and_then(Value::as_str).map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        Self::with_id(
            id,
            &coerce_text(raw.get("exercise")),
            &coerce_text(raw.get("date")),
            coerce_number(raw.get("weight")),
            coerce_number(raw.get("reps")),
        )
    }

    /// True when `raw` already holds exactly this set's canonical fields
    pub fn matches_raw(&self, raw: &Value) -> bool {
        raw.get("id").and_then(Value::as_str) == Some(self.id.as_str())
            && raw.get("exercise").and_then(Value::as_str) == Some(self.exercise.as_str())
            && raw.get("date").and_then(Value::as_str) == Some(self.date.as_str())
            && raw.get("weight").and_then(Value::as_f64) == Some(self.weight)
            && raw.get("reps").and_then(Value::as_f64) == Some(self.reps)
            && raw.get("e1rm").and_then(Value::as_f64) == Some(self.e1rm)
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

fn coerce_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) if s.trim().is_empty() => 0.0,
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

/// A set as submitted by a client, before an id is assigned
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewSet {
    pub exercise: String,
    pub date: String,
    pub weight: f64,
    pub reps: f64,
}

// ============================================================================
// Derived Views
// ============================================================================

/// Best same-day performance for one exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyBest {
    pub date: String,
    pub exercise: String,
    pub weight: f64,
    pub reps: f64,
    pub e1rm: f64,
}

/// Progress report for one exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub exercise: String,
    pub total_sessions: usize,
    /// Ascending by date
    pub series: Vec<DailyBest>,
}

/// A suggested weight/rep pairing with its estimated max
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Target {
    pub weight: f64,
    pub reps: f64,
    pub e1rm: f64,
}

impl Target {
    pub fn new(weight: f64, reps: f64) -> Self {
        Self {
            weight,
            reps,
            e1rm: estimate_e1rm(weight, reps),
        }
    }
}

/// Outcome of evaluating an exercise's history for the next attempt
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(
    tag = "status",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ProgressionDecision {
    /// Nothing logged yet for the exercise
    NoHistory { suggestion: String },
    /// Still inside the rest window; a deload alternative is offered
    NotAllowed {
        earliest_next_date: String,
        alt: Target,
        last_top: TrainingSet,
    },
    /// Rest window elapsed; progress from the last top set
    Allowed {
        target: Target,
        last_top: TrainingSet,
    },
}

impl ProgressionDecision {
    /// Status tag as rendered in serialized output
    pub fn status(&self) -> &'static str {
        match self {
            ProgressionDecision::NoHistory { .. } => "NO_HISTORY",
            ProgressionDecision::NotAllowed { .. } => "NOT_ALLOWED",
            ProgressionDecision::Allowed { .. } => "ALLOWED",
        }
    }
}
