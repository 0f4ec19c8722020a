//! Anomaly detection
//!
//! Runs four independent threshold/pattern rules over the joined table. Each
//! rule either contributes one anomaly or nothing; all rules run on every
//! analysis and no ordering between them is defined.

use tracing::debug;

use crate::stats::{mean, round1};
use crate::types::{Anomaly, AnomalyKind, JoinedRecord, Severity};

/// Anomaly detector for the joined daily table
pub struct AnomalyDetector;

impl AnomalyDetector {
    /// Evaluate all rules; returns any subset of the four anomalies.
    pub fn detect(joined: &[JoinedRecord]) -> Vec<Anomaly> {
        let anomalies: Vec<Anomaly> = [
            detect_burnout_risk(joined),
            detect_sleep_deficit(joined),
            detect_mood_trend(joined),
            detect_extended_overwork(joined),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(count = anomalies.len(), "anomaly rules evaluated");
        anomalies
    }
}

/// Days with over 10 work hours and mood below 5. Any such day is critical.
fn detect_burnout_risk(joined: &[JoinedRecord]) -> Option<Anomaly> {
    let count = joined
        .iter()
        .filter(|r| r.work_hours > 10.0 && r.mood_score < 5.0)
        .count();

    if count == 0 {
        return None;
    }
    Some(Anomaly {
        kind: AnomalyKind::BurnoutRisk,
        severity: Severity::Critical,
        icon: "🚨".to_string(),
        title: "Burnout Risk Detected".to_string(),
        description: format!("{count} days with 10+ work hours and mood below 5"),
    })
}

/// More than 3 days with under 6 hours of sleep.
fn detect_sleep_deficit(joined: &[JoinedRecord]) -> Option<Anomaly> {
    let count = joined.iter().filter(|r| r.sleep_hours < 6.0).count();

    if count <= 3 {
        return None;
    }
    Some(Anomaly {
        kind: AnomalyKind::SleepDeficit,
        severity: Severity::Warning,
        icon: "😴".to_string(),
        title: "Sleep Deficit Pattern".to_string(),
        description: format!("{count} days with less than 6 hours of sleep"),
    })
}

/// Mean mood of the last 7 rows vs the first 7 rows, when more than 7 rows
/// exist. For 8-13 row series the two windows overlap; that is the defined
/// behavior, not an off-by-one.
fn detect_mood_trend(joined: &[JoinedRecord]) -> Option<Anomaly> {
    if joined.len() <= 7 {
        return None;
    }

    let recent: Vec<f64> = joined[joined.len() - 7..].iter().map(|r| r.mood_score).collect();
    let earlier: Vec<f64> = joined[..7].iter().map(|r| r.mood_score).collect();
    let recent_mean = mean(&recent)?;
    let earlier_mean = mean(&earlier)?;

    if recent_mean <= earlier_mean + 1.0 {
        return None;
    }
    Some(Anomaly {
        kind: AnomalyKind::PositiveMoodTrend,
        severity: Severity::Info,
        icon: "✨".to_string(),
        title: "Positive Mood Trend".to_string(),
        description: format!(
            "Mood improved by {} points",
            round1(recent_mean - earlier_mean)
        ),
    })
}

/// Longest run of consecutive days with over 9 work hours; 3 or more fires.
/// Runs are not merged across interruptions.
fn detect_extended_overwork(joined: &[JoinedRecord]) -> Option<Anomaly> {
    let mut current_run = 0usize;
    let mut longest_run = 0usize;
    for record in joined {
        if record.work_hours > 9.0 {
            current_run += 1;
            longest_run = longest_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    if longest_run < 3 {
        return None;
    }
    Some(Anomaly {
        kind: AnomalyKind::ExtendedOverwork,
        severity: Severity::Warning,
        icon: "⚠️".to_string(),
        title: "Extended Overwork Period".to_string(),
        description: format!("{longest_run} consecutive days with 9+ work hours"),
    })
}
