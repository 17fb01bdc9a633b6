//! Journal operations over an in-memory set history.
//!
//! These are the entry points front ends call. Each takes the history
//! explicitly; persistence is the caller's job (see [`crate::store`]).

use crate::calendar::{format_date, parse_date, CalendarDate};
use crate::e1rm::checked_e1rm;
use crate::progress::aggregate_daily_best;
use crate::progression::next_target;
use crate::{Error, NewSet, Progress, ProgressionDecision, Result, TrainingSet};
use std::collections::BTreeSet;

/// Exercises offered even before anything has been logged
pub const DEFAULT_EXERCISES: &[&str] = &[
    "Back Squat",
    "Bench Press",
    "Deadlift",
    "Overhead Press",
    "Barbell Row",
];

/// Sorted distinct exercise names from the defaults, `extra`, and history
pub fn list_exercises(history: &[TrainingSet], extra: &[String]) -> Vec<String> {
    let mut names: BTreeSet<String> = DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect();
    names.extend(
        extra
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
    names.extend(
        history
            .iter()
            .filter(|s| !s.exercise.is_empty())
            .map(|s| s.exercise.clone()),
    );
    names.into_iter().collect()
}

/// Sets newest date first, optionally limited to one exercise.
///
/// A blank filter means no filter. Sets sharing a date keep their stored
/// order.
pub fn list_sets(history: &[TrainingSet], exercise: Option<&str>) -> Vec<TrainingSet> {
    let filter = exercise.map(str::trim).filter(|e| !e.is_empty());
    let mut sets: Vec<TrainingSet> = history
        .iter()
        .filter(|s| filter.map_or(true, |e| s.exercise == e))
        .cloned()
        .collect();
    sets.sort_by(|a, b| b.date.cmp(&a.date));
    sets
}

/// Validate and normalize a submitted set, then append it to `history`
pub fn create_set(history: &mut Vec<TrainingSet>, input: NewSet) -> Result<TrainingSet> {
    if input.exercise.trim().is_empty() {
        return Err(Error::InvalidInput("exercise is required".into()));
    }
    let date = input.date.trim();
    if date.is_empty() {
        return Err(Error::InvalidInput("date is required".into()));
    }
    // Dates are ordered as text, so only the canonical form is accepted
    let parsed = parse_date(date);
    if !parsed.is_valid() || format_date(parsed) != date {
        return Err(Error::InvalidInput("date must be YYYY-MM-DD".into()));
    }
    if !input.weight.is_finite() {
        return Err(Error::InvalidInput("weight must be a finite number".into()));
    }
    if !input.reps.is_finite() {
        return Err(Error::InvalidInput("reps must be a finite number".into()));
    }
    if checked_e1rm(input.weight, input.reps).is_none() {
        return Err(Error::InvalidInput("weight and reps are too large".into()));
    }

    let set = TrainingSet::new(&input.exercise, &input.date, input.weight, input.reps);
    history.push(set.clone());
    Ok(set)
}

/// Remove the set with `id`; the history is untouched when it is absent
pub fn delete_set(history: &mut Vec<TrainingSet>, id: &str) -> Result<TrainingSet> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::InvalidInput("id is required".into()));
    }

    match history.iter().position(|s| s.id == id) {
        Some(index) => Ok(history.remove(index)),
        None => Err(Error::NotFound(format!("no set with id {}", id))),
    }
}

/// Daily-best series and session count for one exercise
pub fn get_progress(history: &[TrainingSet], exercise: &str) -> Result<Progress> {
    let exercise = require_exercise(exercise)?;

    let mut sets: Vec<TrainingSet> = history
        .iter()
        .filter(|s| s.exercise == exercise)
        .cloned()
        .collect();
    sets.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(Progress {
        exercise: exercise.to_string(),
        total_sessions: sets.len(),
        series: aggregate_daily_best(&sets),
    })
}

/// Next recommended attempt for one exercise as of `today`
pub fn get_next_target(
    history: &[TrainingSet],
    exercise: &str,
    step: f64,
    today: CalendarDate,
) -> Result<ProgressionDecision> {
    let exercise = require_exercise(exercise)?;
    next_target(history, exercise, today, step)
}

fn require_exercise(exercise: &str) -> Result<&str> {
    let exercise = exercise.trim();
    if exercise.is_empty() {
        return Err(Error::InvalidInput("exercise is required".into()));
    }
    Ok(exercise)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_set(exercise: &str, date: &str, weight: f64, reps: f64) -> NewSet {
        NewSet {
            exercise: exercise.into(),
            date: date.into(),
            weight,
            reps,
        }
    }

    fn sample_history() -> Vec<TrainingSet> {
        vec![
            TrainingSet::new("Squat", "2024-01-01", 100.0, 5.0),
            TrainingSet::new("Bench Press", "2024-01-02", 70.0, 8.0),
            TrainingSet::new("Squat", "2024-01-03", 102.5, 5.0),
            TrainingSet::new("Squat", "2024-01-03", 90.0, 8.0),
            TrainingSet::new("Squat", "2024-01-01", 95.0, 6.0),
        ]
    }

    #[test]
    fn test_list_exercises_merges_defaults() {
        let history = vec![
            TrainingSet::new("Zercher Squat", "2024-01-01", 80.0, 5.0),
            TrainingSet::new("Bench Press", "2024-01-01", 70.0, 5.0),
            TrainingSet::new("", "2024-01-01", 0.0, 0.0),
        ];
        let names = list_exercises(&history, &["Front Squat".to_string(), "  ".to_string()]);

        assert!(names.contains(&"Zercher Squat".to_string()));
        assert!(names.contains(&"Front Squat".to_string()));
        assert!(names.contains(&"Deadlift".to_string()));
        assert!(!names.contains(&String::new()));
        assert_eq!(names.iter().filter(|n| *n == "Bench Press").count(), 1);

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_list_sets_newest_first() {
        let history = sample_history();
        let sets = list_sets(&history, None);
        assert_eq!(sets.len(), 5);
        assert!(sets.windows(2).all(|w| w[0].date >= w[1].date));

        // Same-date entries keep stored order
        assert_eq!(sets[0].id, history[2].id);
        assert_eq!(sets[1].id, history[3].id);
    }

    #[test]
    fn test_list_sets_with_filter() {
        let history = sample_history();
        let squats = list_sets(&history, Some("Squat"));
        assert_eq!(squats.len(), 4);
        assert!(squats.iter().all(|s| s.exercise == "Squat"));

        assert_eq!(list_sets(&history, Some("  ")).len(), 5);
        assert!(list_sets(&history, Some("Curl")).is_empty());
    }

    #[test]
    fn test_create_set_normalizes_and_appends() {
        let mut history = Vec::new();
        let set = create_set(&mut history, new_set("  Squat ", "2024-01-01", 100.0, 5.0)).unwrap();

        assert_eq!(set.exercise, "Squat");
        assert_eq!(set.e1rm, 112.5);
        assert!(!set.id.is_empty());
        assert_eq!(history, vec![set]);
    }

    #[test]
    fn test_create_set_rejects_invalid_input() {
        let mut history = sample_history();
        let cases = [
            new_set("", "2024-01-01", 100.0, 5.0),
            new_set("   ", "2024-01-01", 100.0, 5.0),
            new_set("Squat", "", 100.0, 5.0),
            new_set("Squat", "2024-01-01", f64::NAN, 5.0),
            new_set("Squat", "2024-01-01", 100.0, f64::INFINITY),
            new_set("Squat", "2024-01-01", f64::MAX, 100.0),
        ];
        for input in cases {
            let err = create_set(&mut history, input).unwrap_err();
            assert!(err.is_invalid_input());
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_create_set_requires_canonical_date() {
        let mut history = sample_history();
        for date in ["yesterday", "2024-1-5", "2024-02-30", "Invalid Date", "2024-01-05T10:00:00Z"] {
            let err = create_set(&mut history, new_set("Squat", date, 100.0, 5.0)).unwrap_err();
            assert!(err.is_invalid_input(), "{:?} should be rejected", date);
        }
        assert_eq!(history.len(), 5);

        let set = create_set(&mut history, new_set("Squat", " 2024-01-05 ", 100.0, 5.0)).unwrap();
        assert_eq!(set.date, "2024-01-05");

        // A rejected typo cannot shadow real sets when picking the next target
        let decision = get_next_target(&history, "Squat", 2.5, parse_date("2024-02-01")).unwrap();
        assert_eq!(decision.status(), "ALLOWED");
    }

    #[test]
    fn test_delete_set() {
        let mut history = sample_history();
        let id = history[1].id.clone();

        let removed = delete_set(&mut history, &id).unwrap();
        assert_eq!(removed.exercise, "Bench Press");
        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|s| s.id != id));
    }

    #[test]
    fn test_delete_missing_id_is_not_found() {
        let mut history = sample_history();
        let before = history.clone();

        let err = delete_set(&mut history, "does-not-exist").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(history, before);

        let err = delete_set(&mut history, " ").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_get_progress() {
        let history = sample_history();
        let progress = get_progress(&history, "Squat").unwrap();

        assert_eq!(progress.exercise, "Squat");
        assert_eq!(progress.total_sessions, 4);
        assert_eq!(progress.series.len(), 2);
        assert_eq!(progress.series[0].date, "2024-01-01");
        // 100x5 (112.5) vs 95x6 (109.25)
        assert_eq!(progress.series[0].weight, 100.0);
        // 102.5x5 (115.3125) vs 90x8 (108)
        assert_eq!(progress.series[1].weight, 102.5);
    }

    #[test]
    fn test_get_progress_unknown_exercise_is_empty() {
        let progress = get_progress(&sample_history(), "Curl").unwrap();
        assert_eq!(progress.total_sessions, 0);
        assert!(progress.series.is_empty());

        let progress = get_progress(&[], "Squat").unwrap();
        assert_eq!(progress.total_sessions, 0);
    }

    #[test]
    fn test_get_progress_requires_exercise() {
        assert!(get_progress(&sample_history(), "  ").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_get_next_target() {
        let history = sample_history();
        let today = parse_date("2024-01-04");

        let decision = get_next_target(&history, " Squat ", 2.5, today).unwrap();
        match decision {
            ProgressionDecision::NotAllowed {
                earliest_next_date,
                last_top,
                ..
            } => {
                assert_eq!(earliest_next_date, "2024-01-05");
                assert_eq!(last_top.weight, 102.5);
            }
            other => panic!("Expected NOT_ALLOWED, got {:?}", other),
        }

        let decision = get_next_target(&history, "Curl", 2.5, today).unwrap();
        assert_eq!(decision.status(), "NO_HISTORY");

        assert!(get_next_target(&history, "", 2.5, today)
            .unwrap_err()
            .is_invalid_input());
    }
}
