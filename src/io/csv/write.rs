//! CSV writing operations.

use std::{collections::BTreeSet, fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter, NamedFrom}, series::Series};

use crate::survey::{Dimension, SurveyRecord};
use super::{CANDIDATE_COLUMN, ID_COLUMN, POLL_COLUMN, WEIGHT_COLUMN};

/// Write survey results to a CSV file.
pub fn write_records(records: &[SurveyRecord], path: &Path) -> Result<()> {
    let mut df = records_to_frame(records)?;
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(&mut df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write survey results to a CSV string.
pub fn write_records_string(records: &[SurveyRecord]) -> Result<String> {
    let mut df = records_to_frame(records)?;
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(&mut df)
        .context("[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .context("[io::csv::write] CSV output is not valid UTF-8")
}

/// Dimension columns in output order: the standard dimensions first, then
/// any others alphabetically.
fn dimension_columns(records: &[SurveyRecord]) -> Vec<String> {
    let present = records.iter()
        .flat_map(|record| record.demographics.keys())
        .map(String::as_str)
        .collect::<BTreeSet<_>>();

    let standard = Dimension::ALL.iter()
        .map(Dimension::to_str)
        .filter(|name| present.contains(*name));
    let extra = present.iter()
        .copied()
        .filter(|name| Dimension::from_name(name).is_none());

    standard.map(str::to_string).chain(extra.map(str::to_string)).collect()
}

/// Build a DataFrame with one row per record.
pub(crate) fn records_to_frame(records: &[SurveyRecord]) -> Result<DataFrame> {
    let ids = records.iter().map(|r| r.id).collect::<Vec<_>>();
    let polls = records.iter().map(|r| r.poll.as_str()).collect::<Vec<_>>();
    let candidates = records.iter().map(|r| r.candidate.as_str()).collect::<Vec<_>>();
    let weights = records.iter().map(|r| r.weight).collect::<Vec<_>>();

    let mut columns: Vec<Column> = vec![
        Series::new(ID_COLUMN.into(), ids).into(),
        Series::new(POLL_COLUMN.into(), polls).into(),
        Series::new(CANDIDATE_COLUMN.into(), candidates).into(),
    ];
    for name in dimension_columns(records) {
        let values = records.iter().map(|r| r.category(&name)).collect::<Vec<_>>();
        columns.push(Series::new(name.as_str().into(), values).into());
    }
    columns.push(Series::new(WEIGHT_COLUMN.into(), weights).into());

    DataFrame::new(columns).context("[io::csv::write] Failed to assemble survey table")
}
