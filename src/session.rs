//! Analysis orchestration
//!
//! This module provides the public API of the engine. An `AnalysisSession`
//! holds one pair of validated input tables as an explicit, immutable
//! context object; `analyze` runs the full pipeline over it:
//! join → score → {anomaly detection, insight generation}.
//!
//! Sessions share no state with each other, so independent sessions are safe
//! to analyze concurrently without locking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::anomaly::AnomalyDetector;
use crate::error::AnalysisError;
use crate::insight::InsightGenerator;
use crate::join::join;
use crate::score::ScoreEngine;
use crate::types::{Anomaly, DailyWellbeingRecord, DailyWorkRecord, Insight, ScoreResult};
use crate::ENGINE_VERSION;

/// One user session's loaded input tables.
///
/// Constructed once per session and passed by reference to whatever needs
/// it; there is no ambient shared state behind it.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    work: Vec<DailyWorkRecord>,
    wellbeing: Vec<DailyWellbeingRecord>,
}

impl AnalysisSession {
    pub fn new(work: Vec<DailyWorkRecord>, wellbeing: Vec<DailyWellbeingRecord>) -> Self {
        Self { work, wellbeing }
    }

    pub fn work_table(&self) -> &[DailyWorkRecord] {
        &self.work
    }

    pub fn wellbeing_table(&self) -> &[DailyWellbeingRecord] {
        &self.wellbeing
    }

    /// Run the full analysis pipeline over this session's tables.
    pub fn analyze(&self) -> Result<AnalysisReport, AnalysisError> {
        let joined = join(&self.work, &self.wellbeing)?;
        let score = ScoreEngine::score(joined)?;
        let anomalies = AnomalyDetector::detect(&score.days);
        let insights = InsightGenerator::generate(&score);

        let report = AnalysisReport {
            report_id: Uuid::new_v4().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            generated_at: Utc::now(),
            score,
            anomalies,
            insights,
        };

        info!(
            report_id = %report.report_id,
            days = report.score.days.len(),
            anomalies = report.anomalies.len(),
            insights = report.insights.len(),
            "analysis complete"
        );
        Ok(report)
    }
}

/// Complete output of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique id for this run
    pub report_id: String,
    /// Engine version that produced the report
    pub engine_version: String,
    /// When the report was computed (UTC)
    pub generated_at: DateTime<Utc>,
    pub score: ScoreResult,
    pub anomalies: Vec<Anomaly>,
    pub insights: Vec<Insight>,
}

/// Analyze a pair of tables in one call.
///
/// Convenience wrapper over a throwaway [`AnalysisSession`].
pub fn analyze(
    work: Vec<DailyWorkRecord>,
    wellbeing: Vec<DailyWellbeingRecord>,
) -> Result<AnalysisReport, AnalysisError> {
    AnalysisSession::new(work, wellbeing).analyze()
}
