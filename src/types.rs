//! Core types for the rhythm analysis pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: daily input records, joined rows, score results, anomalies, and
//! insights.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar date's machine-productivity facts.
///
/// Immutable once loaded. Columns beyond the required contract are preserved
/// verbatim in `extra` for the derived report but are ignored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWorkRecord {
    /// Calendar date (unique key within the table)
    pub date: NaiveDate,
    /// Hours worked (non-negative)
    pub work_hours: f64,
    /// Tasks completed (non-negative)
    pub tasks_completed: u32,
    /// Additional CSV columns, preserved for transparency
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// One calendar date's self-reported wellbeing facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWellbeingRecord {
    /// Calendar date (unique key within the table)
    pub date: NaiveDate,
    /// Mood score (expected range 1-10)
    pub mood_score: f64,
    /// Stress level (expected range 1-10)
    pub stress_level: f64,
    /// Hours slept (non-negative)
    pub sleep_hours: f64,
    /// Additional CSV columns, preserved for transparency
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// One calendar day's combined work and wellbeing data.
///
/// Invariant: the date exists in both source tables. Dates present in only
/// one source never become a `JoinedRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub date: NaiveDate,
    pub work_hours: f64,
    pub tasks_completed: u32,
    pub mood_score: f64,
    pub stress_level: f64,
    pub sleep_hours: f64,
    /// Extra columns carried over from the work table
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub work_extra: BTreeMap<String, String>,
    /// Extra columns carried over from the wellbeing table
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub wellbeing_extra: BTreeMap<String, String>,
}

/// Immutable snapshot produced by the score engine.
///
/// All scores and averages are rounded to one decimal; the correlation to
/// two. Downstream components treat this as read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Composite score balancing the two halves minus the imbalance penalty
    pub rhythm_score: f64,
    /// Productivity sub-score from work hours and tasks completed, capped at 100
    pub machine_score: f64,
    /// Wellbeing sub-score from mood, stress, and sleep (not capped)
    pub human_score: f64,
    pub avg_work_hours: f64,
    pub avg_mood: f64,
    pub avg_stress: f64,
    pub avg_sleep: f64,
    /// Pearson correlation of work hours vs mood; `None` when either series
    /// has zero variance (no correlation signal, not an error)
    pub correlation: Option<f64>,
    /// The joined table the snapshot was computed from
    pub days: Vec<JoinedRecord>,
}

/// Severity class of a flagged condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Kind of rule-triggered condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    BurnoutRisk,
    SleepDeficit,
    PositiveMoodTrend,
    ExtendedOverwork,
}

/// A rule-triggered flag describing a risk or notable pattern in the data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Topical grouping of an insight, used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightTopic {
    Machine,
    Human,
    Balance,
}

impl InsightTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightTopic::Machine => "machine",
            InsightTopic::Human => "human",
            InsightTopic::Balance => "balance",
        }
    }
}

/// A derived observation paired with a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub topic: InsightTopic,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// Work-hour band for the peak-productivity comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadBand {
    /// Up to 7 hours
    Low,
    /// More than 7 and up to 9 hours
    Optimal,
    /// More than 9 hours
    High,
}

impl WorkloadBand {
    /// Classify a day's work hours into a band. Total over all inputs.
    pub fn classify(work_hours: f64) -> Self {
        if work_hours <= 7.0 {
            WorkloadBand::Low
        } else if work_hours <= 9.0 {
            WorkloadBand::Optimal
        } else {
            WorkloadBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadBand::Low => "Low",
            WorkloadBand::Optimal => "Optimal",
            WorkloadBand::High => "High",
        }
    }
}

/// Qualitative classification of a rhythm score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmStatus {
    Excellent,
    Balanced,
    Moderate,
    NeedsAttention,
}

impl RhythmStatus {
    /// Classify a rhythm score into its gauge band.
    pub fn classify(rhythm_score: f64) -> Self {
        if rhythm_score >= 75.0 {
            RhythmStatus::Excellent
        } else if rhythm_score >= 60.0 {
            RhythmStatus::Balanced
        } else if rhythm_score >= 45.0 {
            RhythmStatus::Moderate
        } else {
            RhythmStatus::NeedsAttention
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RhythmStatus::Excellent => "Excellent",
            RhythmStatus::Balanced => "Balanced",
            RhythmStatus::Moderate => "Moderate",
            RhythmStatus::NeedsAttention => "Needs Attention",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_band_edges() {
        assert_eq!(WorkloadBand::classify(0.0), WorkloadBand::Low);
        assert_eq!(WorkloadBand::classify(7.0), WorkloadBand::Low);
        assert_eq!(WorkloadBand::classify(7.5), WorkloadBand::Optimal);
        assert_eq!(WorkloadBand::classify(9.0), WorkloadBand::Optimal);
        assert_eq!(WorkloadBand::classify(9.1), WorkloadBand::High);
        assert_eq!(WorkloadBand::classify(14.0), WorkloadBand::High);
    }

    #[test]
    fn test_rhythm_status_bands() {
        assert_eq!(RhythmStatus::classify(82.0), RhythmStatus::Excellent);
        assert_eq!(RhythmStatus::classify(75.0), RhythmStatus::Excellent);
        assert_eq!(RhythmStatus::classify(60.0), RhythmStatus::Balanced);
        assert_eq!(RhythmStatus::classify(45.0), RhythmStatus::Moderate);
        assert_eq!(RhythmStatus::classify(44.9), RhythmStatus::NeedsAttention);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&AnomalyKind::SleepDeficit).unwrap(),
            "\"sleep_deficit\""
        );
        assert_eq!(
            serde_json::to_string(&InsightTopic::Balance).unwrap(),
            "\"balance\""
        );
    }
}
