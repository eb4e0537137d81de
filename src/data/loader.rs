use std::io::Read;
use std::path::Path;

use log::debug;

use super::filter::{filter_rows, FilteredSet};
use super::model::{parse_config_int, FilterKeys, MeasurementRow, REQUIRED_COLUMNS};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the metrics file and keep the rows matching `keys`.
///
/// Fails before reading any record when required columns are missing.
/// An empty result is not an error here; callers decide what it means.
pub fn load_and_filter(path: &Path, keys: &FilterKeys) -> Result<FilteredSet> {
    let rows = load_csv(path)?;
    let total = rows.len();
    let filtered = filter_rows(rows, keys);
    debug!("{} of {total} rows match {keys}", filtered.len());
    Ok(filtered)
}

/// Parse every record of a metrics CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<MeasurementRow>> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

/// Parse every record from any byte source.
///
/// Records shorter than the header are kept; their absent cells read as
/// empty, so a truncated `total_ms` counts as missing.
pub fn read_rows<R: Read>(source: R) -> Result<Vec<MeasurementRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for (record_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| AnalysisError::Record {
            record: record_no + 1,
            source,
        })?;
        rows.push(columns.row(&record));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Header validation
// ---------------------------------------------------------------------------

/// Positions of the required columns within a header row.
#[derive(Debug)]
struct ColumnIndex {
    timestamp: usize,
    modo: usize,
    n: usize,
    umbral: usize,
    pow_diff: usize,
    primos_max: usize,
    chosen: usize,
    trace: usize,
    total_ms: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        debug!("CSV header: {headers:?}");
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| position(*col).is_none())
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AnalysisError::MissingColumns(missing));
        }

        // Every lookup below succeeds: the missing list was empty.
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(ColumnIndex {
            timestamp: at("timestamp"),
            modo: at("modo"),
            n: at("n"),
            umbral: at("umbral"),
            pow_diff: at("powDiff"),
            primos_max: at("primosMax"),
            chosen: at("chosen"),
            trace: at("trace"),
            total_ms: at("total_ms"),
        })
    }

    fn row(&self, record: &csv::StringRecord) -> MeasurementRow {
        let text = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let int = |idx: usize| record.get(idx).and_then(parse_config_int);

        MeasurementRow {
            timestamp: text(self.timestamp),
            modo: text(self.modo),
            n: int(self.n),
            umbral: int(self.umbral),
            pow_diff: int(self.pow_diff),
            primos_max: int(self.primos_max),
            chosen: text(self.chosen),
            trace: text(self.trace),
            total_ms: text(self.total_ms),
        }
    }
}
