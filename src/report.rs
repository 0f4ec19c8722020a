//! Derived-report export
//!
//! Encodes a score snapshot as CSV: the joined table's columns (including
//! any extra columns preserved from the sources) plus the three score
//! columns appended, with the same scalar values repeated on every row so
//! the report stays self-describing when rows are filtered downstream.

use std::collections::BTreeSet;
use std::io::Write;

use crate::error::AnalysisError;
use crate::types::ScoreResult;

/// Write the derived report as CSV.
pub fn write_report_csv<W: Write>(result: &ScoreResult, writer: W) -> Result<(), AnalysisError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Extra-column unions, sorted for a deterministic header
    let work_extra_columns: BTreeSet<&str> = result
        .days
        .iter()
        .flat_map(|r| r.work_extra.keys().map(String::as_str))
        .collect();
    let wellbeing_extra_columns: BTreeSet<&str> = result
        .days
        .iter()
        .flat_map(|r| r.wellbeing_extra.keys().map(String::as_str))
        .collect();

    let mut header: Vec<&str> = vec!["date", "work_hours", "tasks_completed"];
    header.extend(work_extra_columns.iter().copied());
    header.extend(["mood_score", "stress_level", "sleep_hours"]);
    header.extend(wellbeing_extra_columns.iter().copied());
    header.extend(["rhythm_score", "machine_score", "human_score"]);
    csv_writer.write_record(&header)?;

    for day in &result.days {
        let mut row: Vec<String> = vec![
            day.date.to_string(),
            day.work_hours.to_string(),
            day.tasks_completed.to_string(),
        ];
        for column in &work_extra_columns {
            row.push(day.work_extra.get(*column).cloned().unwrap_or_default());
        }
        row.push(day.mood_score.to_string());
        row.push(day.stress_level.to_string());
        row.push(day.sleep_hours.to_string());
        for column in &wellbeing_extra_columns {
            row.push(day.wellbeing_extra.get(*column).cloned().unwrap_or_default());
        }
        row.push(result.rhythm_score.to_string());
        row.push(result.machine_score.to_string());
        row.push(result.human_score.to_string());
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the derived report to an in-memory CSV string.
pub fn render_report_csv(result: &ScoreResult) -> Result<String, AnalysisError> {
    let mut buffer = Vec::new();
    write_report_csv(result, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("report CSV is valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoreEngine;
    use crate::types::JoinedRecord;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn make_day(day: u32, work_hours: f64, mood: f64) -> JoinedRecord {
        JoinedRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            work_hours,
            tasks_completed: 10,
            mood_score: mood,
            stress_level: 4.0,
            sleep_hours: 7.5,
            work_extra: BTreeMap::new(),
            wellbeing_extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_report_header_and_score_columns() {
        let result = ScoreEngine::score(vec![make_day(1, 8.0, 7.0), make_day(2, 9.0, 6.0)]).unwrap();
        let csv = render_report_csv(&result).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,work_hours,tasks_completed,mood_score,stress_level,sleep_hours,\
             rhythm_score,machine_score,human_score"
        );

        // Same scalar scores repeated on every data row
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 2);
        let score_suffix = format!(
            ",{},{},{}",
            result.rhythm_score, result.machine_score, result.human_score
        );
        for row in rows {
            assert!(row.ends_with(&score_suffix));
        }
    }

    #[test]
    fn test_report_preserves_extra_columns() {
        let mut day_one = make_day(1, 8.0, 7.0);
        day_one
            .work_extra
            .insert("server_uptime".to_string(), "99.8".to_string());
        let mut day_two = make_day(2, 9.0, 6.0);
        day_two
            .work_extra
            .insert("server_uptime".to_string(), "99.9".to_string());

        let result = ScoreEngine::score(vec![day_one, day_two]).unwrap();
        let csv = render_report_csv(&result).unwrap();
        let header = csv.lines().next().unwrap();

        assert!(header.contains("server_uptime"));
        assert!(csv.contains("99.8"));
        assert!(csv.contains("99.9"));
    }

    #[test]
    fn test_report_dates_ascending() {
        let result = ScoreEngine::score(vec![make_day(1, 8.0, 7.0), make_day(2, 9.0, 6.0)]).unwrap();
        let csv = render_report_csv(&result).unwrap();
        let dates: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(dates, vec!["2025-01-01", "2025-01-02"]);
    }
}
