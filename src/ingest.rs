//! CSV ingestion
//!
//! Parses the two input tables into typed daily records. Headers are checked
//! against the schema contract first, then every field is parsed
//! individually so that a malformed value is reported with its column and
//! row. There is no partial-row recovery: the first bad field fails the
//! whole load.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::AnalysisError;
use crate::schema::{validate_columns, TableKind};
use crate::types::{DailyWellbeingRecord, DailyWorkRecord};

/// Read and validate a work table from CSV.
pub fn read_work_csv<R: Read>(reader: R) -> Result<Vec<DailyWorkRecord>, AnalysisError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = owned_headers(&mut csv_reader)?;
    validate_columns(&headers, TableKind::Work)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let data_row = idx + 1;

        let mut extra = BTreeMap::new();
        let mut date = None;
        let mut work_hours = None;
        let mut tasks_completed = None;

        for (header, field) in headers.iter().zip(row.iter()) {
            match header.as_str() {
                "date" => date = Some(parse_date(field, data_row)?),
                "work_hours" => work_hours = Some(parse_f64(field, header, data_row)?),
                "tasks_completed" => tasks_completed = Some(parse_u32(field, header, data_row)?),
                other => {
                    extra.insert(other.to_string(), field.to_string());
                }
            }
        }

        records.push(DailyWorkRecord {
            // Required columns are guaranteed present by validate_columns
            date: date.ok_or_else(|| missing_field("date", data_row))?,
            work_hours: work_hours.ok_or_else(|| missing_field("work_hours", data_row))?,
            tasks_completed: tasks_completed
                .ok_or_else(|| missing_field("tasks_completed", data_row))?,
            extra,
        });
    }

    debug!(rows = records.len(), "loaded work table");
    Ok(records)
}

/// Read and validate a wellbeing table from CSV.
pub fn read_wellbeing_csv<R: Read>(reader: R) -> Result<Vec<DailyWellbeingRecord>, AnalysisError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = owned_headers(&mut csv_reader)?;
    validate_columns(&headers, TableKind::Wellbeing)?;

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let data_row = idx + 1;

        let mut extra = BTreeMap::new();
        let mut date = None;
        let mut mood_score = None;
        let mut stress_level = None;
        let mut sleep_hours = None;

        for (header, field) in headers.iter().zip(row.iter()) {
            match header.as_str() {
                "date" => date = Some(parse_date(field, data_row)?),
                "mood_score" => mood_score = Some(parse_f64(field, header, data_row)?),
                "stress_level" => stress_level = Some(parse_f64(field, header, data_row)?),
                "sleep_hours" => sleep_hours = Some(parse_f64(field, header, data_row)?),
                other => {
                    extra.insert(other.to_string(), field.to_string());
                }
            }
        }

        records.push(DailyWellbeingRecord {
            date: date.ok_or_else(|| missing_field("date", data_row))?,
            mood_score: mood_score.ok_or_else(|| missing_field("mood_score", data_row))?,
            stress_level: stress_level.ok_or_else(|| missing_field("stress_level", data_row))?,
            sleep_hours: sleep_hours.ok_or_else(|| missing_field("sleep_hours", data_row))?,
            extra,
        });
    }

    debug!(rows = records.len(), "loaded wellbeing table");
    Ok(records)
}

/// Parse a work table from an in-memory CSV string.
pub fn parse_work_csv(data: &str) -> Result<Vec<DailyWorkRecord>, AnalysisError> {
    read_work_csv(data.as_bytes())
}

/// Parse a wellbeing table from an in-memory CSV string.
pub fn parse_wellbeing_csv(data: &str) -> Result<Vec<DailyWellbeingRecord>, AnalysisError> {
    read_wellbeing_csv(data.as_bytes())
}

/// Write a work table back out as CSV (inverse of [`read_work_csv`]).
pub fn write_work_csv<W: std::io::Write>(
    records: &[DailyWorkRecord],
    writer: W,
) -> Result<(), AnalysisError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let extra_columns = extra_column_union(records.iter().map(|r| &r.extra));
    let mut header = vec!["date".to_string(), "work_hours".to_string(), "tasks_completed".to_string()];
    header.extend(extra_columns.iter().cloned());
    csv_writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.date.to_string(),
            record.work_hours.to_string(),
            record.tasks_completed.to_string(),
        ];
        for column in &extra_columns {
            row.push(record.extra.get(column).cloned().unwrap_or_default());
        }
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a wellbeing table back out as CSV (inverse of [`read_wellbeing_csv`]).
pub fn write_wellbeing_csv<W: std::io::Write>(
    records: &[DailyWellbeingRecord],
    writer: W,
) -> Result<(), AnalysisError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let extra_columns = extra_column_union(records.iter().map(|r| &r.extra));
    let mut header = vec![
        "date".to_string(),
        "mood_score".to_string(),
        "stress_level".to_string(),
        "sleep_hours".to_string(),
    ];
    header.extend(extra_columns.iter().cloned());
    csv_writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.date.to_string(),
            record.mood_score.to_string(),
            record.stress_level.to_string(),
            record.sleep_hours.to_string(),
        ];
        for column in &extra_columns {
            row.push(record.extra.get(column).cloned().unwrap_or_default());
        }
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn extra_column_union<'a>(
    extras: impl Iterator<Item = &'a BTreeMap<String, String>>,
) -> Vec<String> {
    let mut columns: Vec<String> = extras.flat_map(|m| m.keys().cloned()).collect();
    columns.sort();
    columns.dedup();
    columns
}

fn owned_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>, AnalysisError> {
    Ok(reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

fn parse_date(field: &str, row: usize) -> Result<NaiveDate, AnalysisError> {
    field
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| AnalysisError::DateParse {
            row,
            value: field.to_string(),
        })
}

fn parse_f64(field: &str, column: &str, row: usize) -> Result<f64, AnalysisError> {
    match field.trim().parse::<f64>() {
        // "NaN"/"inf" parse as floats but are malformed metric values
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AnalysisError::MalformedValue {
            column: column.to_string(),
            row,
            value: field.to_string(),
        }),
    }
}

fn parse_u32(field: &str, column: &str, row: usize) -> Result<u32, AnalysisError> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| AnalysisError::MalformedValue {
            column: column.to_string(),
            row,
            value: field.to_string(),
        })
}

fn missing_field(column: &str, row: usize) -> AnalysisError {
    // Short rows slip past header validation; surface them as malformed
    AnalysisError::MalformedValue {
        column: column.to_string(),
        row,
        value: String::new(),
    }
}
