//! Per-day best aggregation for progress reporting.

use crate::e1rm::estimate_e1rm;
use crate::{DailyBest, TrainingSet};
use std::collections::BTreeMap;

/// Reduce sets to one best entry per date, ascending by date.
///
/// Within a date the set with the strictly greatest e1rm wins; on a tie
/// the earlier set in `sets` is kept. Dates are grouped as text, so the
/// caller must pass a single exercise's sets.
pub fn aggregate_daily_best(sets: &[TrainingSet]) -> Vec<DailyBest> {
    let mut best_by_date: BTreeMap<&str, DailyBest> = BTreeMap::new();

    for set in sets {
        let candidate = DailyBest {
            date: set.date.clone(),
            exercise: set.exercise.clone(),
            weight: set.weight,
            reps: set.reps,
            e1rm: estimate_e1rm(set.weight, set.reps),
        };

        let replace = best_by_date
            .get(set.date.as_str())
            .map_or(true, |current| candidate.e1rm > current.e1rm);
        if replace {
            best_by_date.insert(set.date.as_str(), candidate);
        }
    }

    best_by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(date: &str, weight: f64, reps: f64) -> TrainingSet {
        TrainingSet::new("Squat", date, weight, reps)
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily_best(&[]).is_empty());
    }

    #[test]
    fn test_keeps_best_per_date_sorted_ascending() {
        let sets = vec![
            set("2024-01-03", 100.0, 5.0),
            set("2024-01-01", 90.0, 5.0),
            set("2024-01-01", 95.0, 3.0),
            set("2024-01-03", 105.0, 1.0),
            set("2024-01-02", 80.0, 10.0),
        ];

        let series = aggregate_daily_best(&sets);
        let dates: Vec<&str> = series.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);

        // 95x3 (102.125) beats 90x5 (101.25)
        assert_eq!(series[0].weight, 95.0);
        assert_eq!(series[1].e1rm, 100.0);
        assert_eq!(series[2].weight, 100.0);
    }

    #[test]
    fn test_first_entry_wins_ties() {
        // Both estimate to 100
        let sets = vec![set("2024-01-01", 80.0, 10.0), set("2024-01-01", 100.0, 0.0)];
        let series = aggregate_daily_best(&sets);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].weight, 80.0);
    }

    #[test]
    fn test_each_date_reports_the_maximum() {
        let sets = vec![
            set("2024-03-01", 60.0, 12.0),
            set("2024-02-10", 70.0, 8.0),
            set("2024-03-01", 82.5, 4.0),
            set("2024-02-10", 72.5, 6.0),
            set("2024-03-01", 85.0, 1.0),
            set("2024-02-11", 50.0, 20.0),
        ];

        let series = aggregate_daily_best(&sets);
        for best in &series {
            let max = sets
                .iter()
                .filter(|s| s.date == best.date)
                .map(|s| s.e1rm)
                .fold(f64::MIN, f64::max);
            assert_eq!(best.e1rm, max);
        }
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }
}
