//! Diagnosis extract ingestion boundary
//!
//! The extract is produced by an external ingestion collaborator as a
//! tab-delimited table with a header row. The schema is validated here,
//! explicitly and up front: unexpected column names or counts fail fast
//! with `SchemaMismatch` instead of being silently coerced.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{GrouperError, Result};
use crate::models::diagnosis::DiagnosisRecord;
use crate::utils::logging;

/// Expected extract columns, in order
pub const EXTRACT_COLUMNS: [&str; 4] = [
    "patient_id",
    "encounter_id",
    "diagnosis_code",
    "diagnosis_date",
];

/// Extract date format; a trailing time-of-day is tolerated and ignored
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Read and validate a diagnosis extract file.
///
/// # Errors
/// `Io` if the file cannot be read, `SchemaMismatch` on any schema fault.
pub fn load_extract(path: &Path) -> Result<Vec<DiagnosisRecord>> {
    logging::log_artifact_start("diagnosis extract", path);
    let text = fs::read_to_string(path)?;
    let records = parse_extract(&text)?;
    logging::log_artifact_complete("diagnosis extract", records.len(), None);
    Ok(records)
}

/// Parse extract text into diagnosis records, validating the schema.
///
/// # Errors
/// `SchemaMismatch` on a bad header, wrong per-line column count, or an
/// unparseable diagnosis date.
pub fn parse_extract(text: &str) -> Result<Vec<DiagnosisRecord>> {
    let mut lines = text.lines().enumerate();
    let Some((_, header)) = lines.next() else {
        return Err(GrouperError::SchemaMismatch("extract is empty".into()));
    };
    validate_header(header)?;

    let mut records = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != EXTRACT_COLUMNS.len() {
            return Err(GrouperError::SchemaMismatch(format!(
                "line {}: expected {} columns, found {}",
                line_no + 1,
                EXTRACT_COLUMNS.len(),
                fields.len()
            )));
        }
        let date = parse_extract_date(fields[3]).ok_or_else(|| {
            GrouperError::SchemaMismatch(format!(
                "line {}: invalid diagnosis date `{}`",
                line_no + 1,
                fields[3].trim()
            ))
        })?;
        records.push(DiagnosisRecord::new(
            fields[0].trim(),
            fields[1].trim(),
            fields[2].trim(),
            date,
        ));
    }
    Ok(records)
}

fn validate_header(header: &str) -> Result<()> {
    let found: Vec<String> = header
        .split('\t')
        .map(|field| field.trim().to_ascii_lowercase())
        .collect();
    if found != EXTRACT_COLUMNS {
        return Err(GrouperError::SchemaMismatch(format!(
            "expected columns {EXTRACT_COLUMNS:?}, found {found:?}"
        )));
    }
    Ok(())
}

fn parse_extract_date(field: &str) -> Option<NaiveDate> {
    let date_part = field.trim().split_whitespace().next()?;
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}
