//! Error types for the rhythm engine

use chrono::NaiveDate;
use thiserror::Error;

use crate::schema::TableKind;

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Structural schema failure. Lists every missing column, not just the first.
    #[error("Missing required column(s) for {kind} table: {}", .columns.join(", "))]
    MissingColumns {
        kind: TableKind,
        columns: Vec<String>,
    },

    #[error("Unknown table kind: {0}")]
    UnknownKind(String),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed value in column '{column}' at data row {row}: {value:?}")]
    MalformedValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Unparseable date at data row {row}: {value:?} (expected YYYY-MM-DD)")]
    DateParse { row: usize, value: String },

    #[error("Duplicate date {date} in {kind} table")]
    DuplicateDate { kind: TableKind, date: NaiveDate },

    /// The two tables share no dates, or one of them is empty.
    #[error("Work and wellbeing tables share no dates; nothing to analyze")]
    EmptyJoin,
}
