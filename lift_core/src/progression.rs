//! Next-target recommendation for an exercise.
//!
//! The advisor looks only at the most recent top set:
//! - Inside the rest window (2 days): progression is locked and a deload
//!   alternative at 90% for 5 reps is offered
//! - After it: the same reps at +2.5% load
//!
//! Decisions are recomputed from history on every call; nothing is stored.

use crate::calendar::{add_days, format_date, parse_date, CalendarDate};
use crate::{Error, ProgressionDecision, Result, Target, TrainingSet};
use std::cmp::Ordering;

/// Days that must pass after the last top set before progressing again
pub const MIN_REST_DAYS: i64 = 2;

/// Load multiplier applied when progression is allowed
pub const PROGRESSION_FACTOR: f64 = 1.025;

/// Load multiplier for the deload alternative
pub const DELOAD_FACTOR: f64 = 0.9;

/// Fixed rep count for the deload alternative
pub const DELOAD_REPS: f64 = 5.0;

/// Suggestion attached to a `NO_HISTORY` decision
pub const BASELINE_SUGGESTION: &str = "log_a_baseline_set";

/// Round `value` to the nearest multiple of `step`, halves rounding up.
///
/// A step that is zero, negative, or not finite falls back to `1.0`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
    (value / step + 0.5).floor() * step
}

/// Pick the set the next target is based on.
///
/// Latest date (compared as `YYYY-MM-DD` text) wins; among sets sharing
/// that date the highest e1rm wins, then the earliest in `sets`.
pub fn select_last_top<'a>(sets: &[&'a TrainingSet]) -> Option<&'a TrainingSet> {
    sets.iter().copied().fold(None, |best, set| match best {
        None => Some(set),
        Some(current) => {
            let newer = match set.date.cmp(&current.date) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => set.e1rm > current.e1rm,
            };
            Some(if newer { set } else { current })
        }
    })
}

/// Decide the next attempt for `exercise` as of `today`.
///
/// `history` may hold every exercise; only exact name matches are used.
/// Fails with [`Error::InvalidInput`] when `today` or the chosen top set's
/// date is not a calendar date, since the rest window cannot be evaluated.
pub fn next_target(
    history: &[TrainingSet],
    exercise: &str,
    today: CalendarDate,
    step: f64,
) -> Result<ProgressionDecision> {
    if !today.is_valid() {
        return Err(Error::InvalidInput("today is not a calendar date".into()));
    }

    let sets: Vec<&TrainingSet> = history.iter().filter(|s| s.exercise == exercise).collect();

    let last_top = match select_last_top(&sets) {
        Some(set) => set.clone(),
        None => {
            return Ok(ProgressionDecision::NoHistory {
                suggestion: BASELINE_SUGGESTION.to_string(),
            })
        }
    };

    let last_date = parse_date(&last_top.date);
    if !last_date.is_valid() {
        return Err(Error::InvalidInput(format!(
            "set {} has an unreadable date {:?}",
            last_top.id, last_top.date
        )));
    }
    let earliest_next_date = add_days(last_date, MIN_REST_DAYS);

    if today < earliest_next_date {
        let alt_weight = round_to_step(last_top.weight * DELOAD_FACTOR, step);
        return Ok(ProgressionDecision::NotAllowed {
            earliest_next_date: format_date(earliest_next_date),
            alt: Target::new(alt_weight, DELOAD_REPS),
            last_top,
        });
    }

    let target_weight = round_to_step(last_top.weight * PROGRESSION_FACTOR, step);
    Ok(ProgressionDecision::Allowed {
        target: Target::new(target_weight, last_top.reps),
        last_top,
    })
}
