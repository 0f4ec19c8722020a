//! Input table contract
//!
//! This module defines the column contract for the two input tables and the
//! structural validation that enforces it. Validation checks column presence
//! only; value ranges and types are not inspected here, so malformed values
//! surface later at ingest as parse errors rather than schema errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Which of the two input tables a CSV claims to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Work,
    Wellbeing,
}

impl TableKind {
    /// Required columns for this table kind. Extra columns are permitted
    /// and ignored.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Work => &["date", "work_hours", "tasks_completed"],
            TableKind::Wellbeing => &["date", "mood_score", "stress_level", "sleep_hours"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Work => "work",
            TableKind::Wellbeing => "wellbeing",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(TableKind::Work),
            "wellbeing" => Ok(TableKind::Wellbeing),
            other => Err(AnalysisError::UnknownKind(other.to_string())),
        }
    }
}

/// Validate that `headers` contains every column the table kind requires.
///
/// Reports every missing column at once rather than failing on the first.
pub fn validate_columns<S: AsRef<str>>(headers: &[S], kind: TableKind) -> Result<(), AnalysisError> {
    let missing: Vec<String> = kind
        .required_columns()
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref() == **required))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::MissingColumns { kind, columns: missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_work_headers() {
        let headers = ["date", "work_hours", "tasks_completed"];
        assert!(validate_columns(&headers, TableKind::Work).is_ok());
    }

    #[test]
    fn test_extra_columns_permitted() {
        let headers = ["date", "work_hours", "tasks_completed", "server_uptime"];
        assert!(validate_columns(&headers, TableKind::Work).is_ok());

        let headers = ["sleep_hours", "mood_score", "date", "stress_level", "notes"];
        assert!(validate_columns(&headers, TableKind::Wellbeing).is_ok());
    }

    #[test]
    fn test_all_missing_columns_reported() {
        let headers = ["date", "notes"];
        let err = validate_columns(&headers, TableKind::Wellbeing).unwrap_err();
        match err {
            AnalysisError::MissingColumns { kind, columns } => {
                assert_eq!(kind, TableKind::Wellbeing);
                assert_eq!(columns, vec!["mood_score", "stress_level", "sleep_hours"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "mood".parse::<TableKind>().unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownKind(k) if k == "mood"));
        assert_eq!("work".parse::<TableKind>().unwrap(), TableKind::Work);
        assert_eq!(
            "wellbeing".parse::<TableKind>().unwrap(),
            TableKind::Wellbeing
        );
    }
}
