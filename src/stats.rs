use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::data::model::{MeasurementRow, MODE_SEQ, MODE_SPEC};

// ---------------------------------------------------------------------------
// ModeAverage – mean timing of one execution mode
// ---------------------------------------------------------------------------

/// Mean `total_ms` of every row sharing one `modo` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeAverage {
    pub modo: String,
    /// Mean over the numeric samples; NaN when the group has none.
    pub avg_ms: f64,
    /// Rows that contributed a numeric value.
    pub samples: usize,
    /// Rows whose `total_ms` could not be parsed.
    pub missing: usize,
}

/// Per-mode averages, sorted by mode name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeAverages {
    pub modes: Vec<ModeAverage>,
}

impl ModeAverages {
    /// Average of the named mode, if any row carried that mode.
    pub fn get(&self, modo: &str) -> Option<f64> {
        self.modes
            .iter()
            .find(|m| m.modo == modo)
            .map(|m| m.avg_ms)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Coerce a timing cell to a number; unparseable text becomes `None`.
pub fn coerce_ms(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Group rows by `modo` and average their `total_ms`.
///
/// Missing timings are left out of both the sum and the count. Rows with an
/// empty `modo` belong to no group. The result does not depend on row order.
pub fn compute_means(rows: &[MeasurementRow]) -> ModeAverages {
    #[derive(Default)]
    struct Acc {
        sum: f64,
        samples: usize,
        missing: usize,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for row in rows.iter().filter(|r| !r.modo.is_empty()) {
        let acc = groups.entry(row.modo.as_str()).or_default();
        match coerce_ms(&row.total_ms) {
            Some(v) => {
                acc.sum += v;
                acc.samples += 1;
            }
            None => acc.missing += 1,
        }
    }

    let modes = groups
        .into_iter()
        .map(|(modo, acc)| {
            if acc.missing > 0 {
                warn!(
                    "mode {modo:?}: {} of {} total_ms values are not numeric and were ignored",
                    acc.missing,
                    acc.missing + acc.samples
                );
            }
            let avg_ms = if acc.samples == 0 {
                f64::NAN
            } else {
                acc.sum / acc.samples as f64
            };
            ModeAverage {
                modo: modo.to_string(),
                avg_ms,
                samples: acc.samples,
                missing: acc.missing,
            }
        })
        .collect();

    ModeAverages { modes }
}

// ---------------------------------------------------------------------------
// Speedup
// ---------------------------------------------------------------------------

/// Speedup of speculative over sequential execution: `Tseq / Tspec`.
///
/// A speculative time that is not strictly positive yields `+inf`.
pub fn speedup(seq_ms: f64, spec_ms: f64) -> f64 {
    if spec_ms > 0.0 {
        seq_ms / spec_ms
    } else {
        f64::INFINITY
    }
}

/// Look up both compared modes; `None` unless both are present.
pub fn spec_and_seq(means: &ModeAverages) -> Option<(f64, f64)> {
    let spec = means.get(MODE_SPEC)?;
    let seq = means.get(MODE_SEQ)?;
    Some((spec, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(modo: &str, total_ms: &str) -> MeasurementRow {
        MeasurementRow {
            timestamp: "t".into(),
            modo: modo.into(),
            n: Some(10),
            umbral: Some(2),
            pow_diff: Some(1),
            primos_max: Some(100),
            chosen: "A".into(),
            trace: "0".into(),
            total_ms: total_ms.into(),
        }
    }

    #[test]
    fn averages_per_mode_sorted_by_name() {
        let rows = vec![
            row("spec", "40"),
            row("seq", "100"),
            row("spec", "60"),
            row("seq", "200"),
        ];
        let means = compute_means(&rows);
        let names: Vec<&str> = means.modes.iter().map(|m| m.modo.as_str()).collect();
        assert_eq!(names, ["seq", "spec"]);
        assert_eq!(means.get("spec"), Some(50.0));
        assert_eq!(means.get("seq"), Some(150.0));
        assert_eq!(means.get("other"), None);
    }

    #[test]
    fn mean_is_invariant_to_row_order() {
        let rows = vec![
            row("spec", "1.25"),
            row("seq", "7"),
            row("spec", "3.5"),
            row("seq", "11"),
            row("spec", "8"),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        let mut rotated = rows.clone();
        rotated.rotate_left(2);

        let expected = compute_means(&rows);
        assert_eq!(compute_means(&reversed), expected);
        assert_eq!(compute_means(&rotated), expected);
    }

    #[test]
    fn non_numeric_timings_are_excluded() {
        let rows = vec![
            row("spec", "10"),
            row("spec", "N/A"),
            row("spec", ""),
            row("spec", "20"),
        ];
        let means = compute_means(&rows);
        let spec = &means.modes[0];
        assert_eq!(spec.avg_ms, 15.0);
        assert_eq!(spec.samples, 2);
        assert_eq!(spec.missing, 2);
    }

    #[test]
    fn group_without_numbers_averages_to_nan() {
        let means = compute_means(&[row("seq", "oops"), row("seq", "NaN")]);
        assert!(means.get("seq").unwrap().is_nan());
        assert_eq!(means.modes[0].missing, 2);
    }

    #[test]
    fn rows_without_mode_are_not_grouped() {
        let means = compute_means(&[row("", "999"), row("seq", "100"), row("", "1")]);
        assert_eq!(means.modes.len(), 1);
        assert_eq!(means.modes[0].modo, "seq");
        assert_eq!(means.modes[0].samples, 1);
        assert_eq!(means.get(""), None);
    }

    #[test]
    fn coerce_accepts_plain_and_scientific_numbers() {
        assert_eq!(coerce_ms("12.5"), Some(12.5));
        assert_eq!(coerce_ms(" 3 "), Some(3.0));
        assert_eq!(coerce_ms("1e3"), Some(1000.0));
        assert_eq!(coerce_ms("N/A"), None);
        assert_eq!(coerce_ms("nan"), None);
    }

    #[test]
    fn speedup_is_seq_over_spec() {
        assert_eq!(speedup(150.0, 50.0), 3.0);
        assert_eq!(format!("{:.3}", speedup(150.0, 50.0)), "3.000");
    }

    #[test]
    fn zero_spec_time_gives_infinity() {
        let s = speedup(100.0, 0.0);
        assert!(s.is_infinite() && s.is_sign_positive());
    }

    #[test]
    fn spec_and_seq_needs_both_modes() {
        let only_seq = compute_means(&[row("seq", "100")]);
        assert_eq!(spec_and_seq(&only_seq), None);

        let both = compute_means(&[row("seq", "100"), row("spec", "25")]);
        assert_eq!(spec_and_seq(&both), Some((25.0, 100.0)));
    }
}
