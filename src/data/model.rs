use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Columns every metrics file must carry, in the order the benchmark harness
/// writes them. Extra columns (`a_ok`, `a_ms`, ...) are ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "timestamp",
    "modo",
    "n",
    "umbral",
    "powDiff",
    "primosMax",
    "chosen",
    "trace",
    "total_ms",
];

/// Mode label of speculative runs.
pub const MODE_SPEC: &str = "spec";
/// Mode label of sequential runs.
pub const MODE_SEQ: &str = "seq";

// ---------------------------------------------------------------------------
// FilterKeys – the four integers identifying one run configuration
// ---------------------------------------------------------------------------

/// Exact-match key over the configuration columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterKeys {
    pub n: i64,
    pub umbral: i64,
    #[serde(rename = "powDiff")]
    pub pow_diff: i64,
    #[serde(rename = "primosMax")]
    pub primos_max: i64,
}

impl fmt::Display for FilterKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} umbral={} powDiff={} primosMax={}",
            self.n, self.umbral, self.pow_diff, self.primos_max
        )
    }
}

// ---------------------------------------------------------------------------
// MeasurementRow – one record of the metrics file
// ---------------------------------------------------------------------------

/// A single benchmark measurement.
///
/// The configuration integers are `None` when the cell does not hold an
/// integer; such a row never matches any [`FilterKeys`]. `total_ms` is kept
/// as raw text and only coerced during aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub timestamp: String,
    pub modo: String,
    pub n: Option<i64>,
    pub umbral: Option<i64>,
    pub pow_diff: Option<i64>,
    pub primos_max: Option<i64>,
    pub chosen: String,
    pub trace: String,
    pub total_ms: String,
}

impl MeasurementRow {
    /// Whether all four configuration fields equal `keys`.
    pub fn matches(&self, keys: &FilterKeys) -> bool {
        self.n == Some(keys.n)
            && self.umbral == Some(keys.umbral)
            && self.pow_diff == Some(keys.pow_diff)
            && self.primos_max == Some(keys.primos_max)
    }
}

/// Interpret a configuration cell as an integer.
///
/// Accepts plain integers and float text without a fractional part
/// (`"10.0"`), which is how some tools re-export integer columns.
pub fn parse_config_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some(f as i64)
        }
        _ => None,
    }
}
