//! Score engine
//!
//! Computes the machine-productivity score, the human-wellbeing score, and
//! the balance-penalized composite rhythm score from a joined table, along
//! with summary averages and the work/mood correlation. The formulas are
//! fixed arithmetic, not a learned model.

use tracing::debug;

use crate::error::AnalysisError;
use crate::stats::{mean, pearson, round1, round2};
use crate::types::{JoinedRecord, ScoreResult};

/// Score engine for the joined daily table
pub struct ScoreEngine;

impl ScoreEngine {
    /// Compute a score snapshot from the joined table.
    ///
    /// Fails with `EmptyJoin` when the table is empty: means and the
    /// correlation are undefined there, and substituting zeros would
    /// fabricate a result.
    pub fn score(joined: Vec<JoinedRecord>) -> Result<ScoreResult, AnalysisError> {
        if joined.is_empty() {
            return Err(AnalysisError::EmptyJoin);
        }

        let work_hours: Vec<f64> = joined.iter().map(|r| r.work_hours).collect();
        let tasks: Vec<f64> = joined.iter().map(|r| r.tasks_completed as f64).collect();
        let moods: Vec<f64> = joined.iter().map(|r| r.mood_score).collect();
        let stress: Vec<f64> = joined.iter().map(|r| r.stress_level).collect();
        let sleep: Vec<f64> = joined.iter().map(|r| r.sleep_hours).collect();

        // Non-empty input, so every mean is defined
        let avg_work_hours = mean(&work_hours).ok_or(AnalysisError::EmptyJoin)?;
        let avg_tasks = mean(&tasks).ok_or(AnalysisError::EmptyJoin)?;
        let avg_mood = mean(&moods).ok_or(AnalysisError::EmptyJoin)?;
        let avg_stress = mean(&stress).ok_or(AnalysisError::EmptyJoin)?;
        let avg_sleep = mean(&sleep).ok_or(AnalysisError::EmptyJoin)?;

        // ~8h/day and ~10 tasks/day are full marks on each half; the cap
        // keeps unbounded overwork from scoring higher than balance
        let machine_score = (avg_work_hours / 8.0 * 50.0 + avg_tasks / 10.0 * 50.0).min(100.0);

        // Weighted blend: mood 40%, inverted stress 30%, sleep-vs-8h 30%.
        // Deliberately not capped; extreme inputs may push it past 100 or
        // below 0
        let human_score =
            avg_mood / 10.0 * 40.0 + (10.0 - avg_stress) / 10.0 * 30.0 + avg_sleep / 8.0 * 30.0;

        let balance_penalty = (machine_score - human_score).abs() / 100.0 * 20.0;
        let rhythm_score = (machine_score + human_score) / 2.0 - balance_penalty;

        let correlation = pearson(&work_hours, &moods).map(round2);

        debug!(
            rhythm = round1(rhythm_score),
            machine = round1(machine_score),
            human = round1(human_score),
            "computed rhythm score"
        );

        Ok(ScoreResult {
            rhythm_score: round1(rhythm_score),
            machine_score: round1(machine_score),
            human_score: round1(human_score),
            avg_work_hours: round1(avg_work_hours),
            avg_mood: round1(avg_mood),
            avg_stress: round1(avg_stress),
            avg_sleep: round1(avg_sleep),
            correlation,
            days: joined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn make_day(day: u32, work_hours: f64, tasks: u32, mood: f64, stress: f64, sleep: f64) -> JoinedRecord {
        JoinedRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            work_hours,
            tasks_completed: tasks,
            mood_score: mood,
            stress_level: stress,
            sleep_hours: sleep,
            work_extra: BTreeMap::new(),
            wellbeing_extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_empty_join_is_an_error() {
        let err = ScoreEngine::score(Vec::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyJoin));
    }

    #[test]
    fn test_end_to_end_fixture() {
        // Hand-computed: avg work 32/3, avg tasks 9 -> machine capped at 100;
        // avg mood 13/3, avg stress 7, avg sleep 16/3 -> human 46.333;
        // penalty 10.733 -> rhythm 62.433
        let joined = vec![
            make_day(1, 8.0, 10, 8.0, 3.0, 8.0),
            make_day(2, 12.0, 15, 3.0, 9.0, 4.0),
            make_day(3, 12.0, 2, 2.0, 9.0, 4.0),
        ];

        let result = ScoreEngine::score(joined).unwrap();
        assert_eq!(result.machine_score, 100.0);
        assert_eq!(result.human_score, 46.3);
        assert_eq!(result.rhythm_score, 62.4);
        assert_eq!(result.avg_work_hours, 10.7);
        assert_eq!(result.avg_mood, 4.3);
        assert_eq!(result.avg_stress, 7.0);
        assert_eq!(result.avg_sleep, 5.3);
        assert_eq!(result.correlation, Some(-0.99));
        assert_eq!(result.days.len(), 3);
    }

    #[test]
    fn test_machine_score_cap_invariant() {
        // Absurd overwork still cannot exceed 100
        let joined = vec![
            make_day(1, 16.0, 40, 5.0, 5.0, 7.0),
            make_day(2, 18.0, 50, 5.0, 5.0, 7.0),
        ];
        let result = ScoreEngine::score(joined).unwrap();
        assert_eq!(result.machine_score, 100.0);

        let modest = vec![make_day(1, 4.0, 5, 5.0, 5.0, 7.0)];
        let result = ScoreEngine::score(modest).unwrap();
        assert!(result.machine_score <= 100.0);
        assert_eq!(result.machine_score, 50.0);
    }

    #[test]
    fn test_human_score_is_not_capped() {
        // Mood 10, stress 1, sleep 12 -> 40 + 27 + 45 = 112
        let joined = vec![make_day(1, 8.0, 10, 10.0, 1.0, 12.0)];
        let result = ScoreEngine::score(joined).unwrap();
        assert_eq!(result.human_score, 112.0);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let joined = vec![
            make_day(1, 8.3, 9, 7.1, 4.2, 7.4),
            make_day(2, 7.9, 11, 6.8, 5.1, 6.9),
        ];
        let result = ScoreEngine::score(joined).unwrap();
        assert_eq!(crate::stats::round1(result.rhythm_score), result.rhythm_score);
        assert_eq!(crate::stats::round1(result.machine_score), result.machine_score);
        assert_eq!(crate::stats::round1(result.human_score), result.human_score);
    }

    #[test]
    fn test_constant_work_hours_has_undefined_correlation() {
        let joined = vec![
            make_day(1, 8.0, 10, 6.0, 4.0, 7.0),
            make_day(2, 8.0, 12, 8.0, 3.0, 7.5),
            make_day(3, 8.0, 9, 5.0, 6.0, 6.5),
        ];
        let result = ScoreEngine::score(joined).unwrap();
        assert_eq!(result.correlation, None);
    }

    #[test]
    fn test_single_day_correlation_undefined() {
        let joined = vec![make_day(1, 8.0, 10, 6.0, 4.0, 7.0)];
        let result = ScoreEngine::score(joined).unwrap();
        assert_eq!(result.correlation, None);
    }
}
