//! Date join
//!
//! Inner-joins the work and wellbeing tables on calendar date. Dates present
//! in only one table are dropped silently; output rows are in ascending date
//! order, which the chart layer relies on. Duplicate dates within a single
//! table are rejected rather than deduplicated.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::AnalysisError;
use crate::schema::TableKind;
use crate::types::{DailyWellbeingRecord, DailyWorkRecord, JoinedRecord};

/// Inner-equijoin the two tables on `date`.
pub fn join(
    work: &[DailyWorkRecord],
    wellbeing: &[DailyWellbeingRecord],
) -> Result<Vec<JoinedRecord>, AnalysisError> {
    let mut by_date: BTreeMap<_, &DailyWorkRecord> = BTreeMap::new();
    for record in work {
        if by_date.insert(record.date, record).is_some() {
            return Err(AnalysisError::DuplicateDate {
                kind: TableKind::Work,
                date: record.date,
            });
        }
    }

    let mut seen_wellbeing = BTreeSet::new();
    let mut joined = Vec::new();
    for record in wellbeing {
        if !seen_wellbeing.insert(record.date) {
            return Err(AnalysisError::DuplicateDate {
                kind: TableKind::Wellbeing,
                date: record.date,
            });
        }
        if let Some(work_record) = by_date.get(&record.date) {
            joined.push(JoinedRecord {
                date: record.date,
                work_hours: work_record.work_hours,
                tasks_completed: work_record.tasks_completed,
                mood_score: record.mood_score,
                stress_level: record.stress_level,
                sleep_hours: record.sleep_hours,
                work_extra: work_record.extra.clone(),
                wellbeing_extra: record.extra.clone(),
            });
        }
    }

    joined.sort_by_key(|r| r.date);
    debug!(
        work = work.len(),
        wellbeing = wellbeing.len(),
        joined = joined.len(),
        "joined tables on date"
    );
    Ok(joined)
}
