use super::model::{FilterKeys, MeasurementRow};

// ---------------------------------------------------------------------------
// Exact-match filter over the configuration columns
// ---------------------------------------------------------------------------

/// Rows of a single run configuration, in file order.
pub type FilteredSet = Vec<MeasurementRow>;

/// Keep the rows whose n / umbral / powDiff / primosMax equal `keys`.
///
/// Order is preserved. Rows with a non-integer configuration cell never
/// match.
pub fn filter_rows(rows: Vec<MeasurementRow>, keys: &FilterKeys) -> FilteredSet {
    rows.into_iter().filter(|row| row.matches(keys)).collect()
}
