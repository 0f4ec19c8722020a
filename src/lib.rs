//! Rhythm Engine - compute engine for work/wellbeing rhythm analysis
//!
//! The engine turns two daily metric tables (machine productivity and
//! self-reported wellbeing) into a composite rhythm score, a set of
//! rule-based anomalies, and canned insights through a deterministic
//! pipeline: schema validation → date join → score aggregation →
//! {anomaly detection, insight generation}.
//!
//! ## Modules
//!
//! - **Ingestion**: CSV parsing and schema validation for the two tables
//! - **Scoring**: machine/human/rhythm scores and summary statistics
//! - **Detection**: threshold and pattern rules over the joined table
//! - **Insights**: derived observations with recommendations
//!
//! The engine is pure: the same two input tables always produce the same
//! scores, anomalies, and insights.

pub mod anomaly;
pub mod error;
pub mod ingest;
pub mod insight;
pub mod join;
pub mod report;
pub mod sample;
pub mod schema;
pub mod score;
pub mod session;
pub mod stats;
pub mod types;

pub use anomaly::AnomalyDetector;
pub use error::AnalysisError;
pub use insight::InsightGenerator;
pub use sample::SampleGenerator;
pub use schema::{validate_columns, TableKind};
pub use score::ScoreEngine;
pub use session::{analyze, AnalysisReport, AnalysisSession};
pub use types::{
    Anomaly, AnomalyKind, DailyWellbeingRecord, DailyWorkRecord, Insight, InsightTopic,
    JoinedRecord, RhythmStatus, ScoreResult, Severity, WorkloadBand,
};

/// Engine version embedded in every analysis report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for analysis reports
pub const PRODUCER_NAME: &str = "rhythm-engine";
