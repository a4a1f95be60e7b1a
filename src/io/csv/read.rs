//! CSV reading operations.

use std::{collections::{BTreeMap, HashSet}, fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, DataType}};

use crate::survey::SurveyRecord;
use super::{CANDIDATE_COLUMN, ID_COLUMN, POLL_COLUMN, WEIGHT_COLUMN, is_reserved};

/// Reads survey results from a CSV file at `path`.
pub fn read_records(path: &Path) -> Result<Vec<SurveyRecord>> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    let df = string_options()
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))?;
    records_from_frame(&df)
}

/// Reads survey results from a CSV string.
pub fn read_records_str(csv: &str) -> Result<Vec<SurveyRecord>> {
    let df = string_options()
        .into_reader_with_file_handle(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv::read] Failed to read CSV from string")?;
    records_from_frame(&df)
}

/// Read every column as a string so categories like "18-29" or zip-like
/// codes are never reinterpreted as numbers.
fn string_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Convert a string-typed DataFrame into records.
///
/// `poll` and `candidate` are required. A missing `id` column numbers rows
/// from 0; a missing `weight` column or empty weight cell means 1.0.
/// Ids must be unique.
pub(crate) fn records_from_frame(df: &DataFrame) -> Result<Vec<SurveyRecord>> {
    let names = df.get_column_names_str();
    ensure!(names.contains(&POLL_COLUMN), "[io::csv::read] CSV is missing required column '{POLL_COLUMN}'");
    ensure!(names.contains(&CANDIDATE_COLUMN), "[io::csv::read] CSV is missing required column '{CANDIDATE_COLUMN}'");

    let polls = string_column(df, POLL_COLUMN)?;
    let candidates = string_column(df, CANDIDATE_COLUMN)?;
    let ids = names.contains(&ID_COLUMN).then(|| string_column(df, ID_COLUMN)).transpose()?;
    let weights = names.contains(&WEIGHT_COLUMN).then(|| string_column(df, WEIGHT_COLUMN)).transpose()?;

    let dimensions = names.iter()
        .filter(|name| !is_reserved(name))
        .map(|&name| Ok((name.to_string(), string_column(df, name)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::with_capacity(df.height());
    (0..df.height())
        .map(|row| -> Result<SurveyRecord> {
            let id = match ids.as_ref().and_then(|ids| ids[row].as_deref()) {
                Some(id) => id.trim().parse::<u64>()
                    .with_context(|| format!("[io::csv::read] Invalid id '{id}' on row {row}"))?,
                None => row as u64,
            };
            ensure!(seen.insert(id), "[io::csv::read] Duplicate id {id} on row {row}");
            let weight = match weights.as_ref().and_then(|weights| weights[row].as_deref()) {
                Some(weight) => weight.trim().parse::<f64>()
                    .with_context(|| format!("[io::csv::read] Invalid weight '{weight}' on row {row}"))?,
                None => 1.0,
            };
            let demographics = dimensions.iter()
                .filter_map(|(name, values)| values[row].clone().map(|category| (name.clone(), category)))
                .collect::<BTreeMap<_, _>>();

            Ok(SurveyRecord {
                id,
                poll: polls[row].clone().unwrap_or_default(),
                candidate: candidates[row].clone().unwrap_or_default(),
                demographics,
                weight,
            })
        })
        .collect()
}

/// Values of a column as owned strings; nulls and empty cells become `None`.
fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)
        .with_context(|| format!("[io::csv::read] Missing column '{name}'"))?
        .cast(&DataType::String)?;
    Ok(column.str()?
        .into_iter()
        .map(|value| value.filter(|s| !s.is_empty()).map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dimensions_and_weights() {
        let csv = "id,poll,candidate,age,gender,weight\n\
                   4,P,Candidate A,18-29,Male,1.5\n\
                   9,P,Candidate B,65+,Female,\n";
        let records = read_records_str(csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 4);
        assert_eq!(records[0].candidate, "Candidate A");
        assert_eq!(records[0].category("age"), Some("18-29"));
        assert_eq!(records[0].weight, 1.5);
        assert_eq!(records[1].category("gender"), Some("Female"));
        assert_eq!(records[1].weight, 1.0);
        assert_eq!(records[1].demographics.len(), 2);
    }

    #[test]
    fn defaults_ids_and_weights() {
        let records = read_records_str("poll,candidate,gender\nP,A,M\nP,B,F\n").unwrap();
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1]);
        assert!(records.iter().all(|r| r.weight == 1.0));
    }

    #[test]
    fn rejects_missing_columns_and_bad_numbers() {
        assert!(read_records_str("candidate,gender\nA,M\n").is_err());
        assert!(read_records_str("poll,candidate,weight\nP,A,heavy\n").is_err());
        assert!(read_records_str("id,poll,candidate\nx,P,A\n").is_err());
    }

    #[test]
    fn rejects_repeated_ids() {
        let err = read_records_str("id,poll,candidate\n1,P,A\n1,Q,B\n").unwrap_err();
        assert!(err.to_string().contains("Duplicate id 1 on row 1"));

        // A blank id falls back to the row number, which may collide too.
        assert!(read_records_str("id,poll,candidate\n1,P,A\n,P,B\n").is_err());
    }
}
