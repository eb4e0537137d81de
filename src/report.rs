use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::data::model::{FilterKeys, MODE_SEQ, MODE_SPEC};
use crate::error::Result;
use crate::stats::{self, ModeAverage, ModeAverages};

// ---------------------------------------------------------------------------
// Console report
// ---------------------------------------------------------------------------

/// Render the averages as a right-aligned two-column table.
pub fn format_table(means: &ModeAverages) -> String {
    let cells: Vec<(String, String)> = means
        .modes
        .iter()
        .map(|m| (m.modo.clone(), format_ms(m.avg_ms)))
        .collect();

    let w_modo = cells.iter().map(|(m, _)| m.len()).fold("modo".len(), usize::max);
    let w_avg = cells.iter().map(|(_, a)| a.len()).fold("avg_ms".len(), usize::max);

    let mut out = format!("{:>w_modo$}  {:>w_avg$}\n", "modo", "avg_ms");
    for (modo, avg) in &cells {
        out.push_str(&format!("{modo:>w_modo$}  {avg:>w_avg$}\n"));
    }
    out
}

fn format_ms(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.3}")
    }
}

pub fn format_speedup(speedup: f64) -> String {
    format!("Speedup = Tseq/Tspec = {speedup:.3}")
}

/// Print the per-mode table and, when both modes exist, the speedup.
pub fn print_report(means: &ModeAverages) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = write_report(&mut stdout, means) {
        warn!("writing report to stdout: {e}");
    }
}

/// Write the report to any sink; returns the speedup that was written.
pub fn write_report<W: Write>(w: &mut W, means: &ModeAverages) -> std::io::Result<Option<f64>> {
    writeln!(w, "\nAverages per mode (ms):")?;
    write!(w, "{}", format_table(means))?;

    match (means.get(MODE_SPEC), means.get(MODE_SEQ)) {
        (Some(spec_ms), Some(seq_ms)) => {
            let speedup = stats::speedup(seq_ms, spec_ms);
            writeln!(w, "\n{}", format_speedup(speedup))?;
            Ok(Some(speedup))
        }
        _ => {
            writeln!(
                w,
                "\nWarning: data for one of the modes is missing, cannot compute speedup."
            )?;
            Ok(None)
        }
    }
}

// ---------------------------------------------------------------------------
// JSON summary
// ---------------------------------------------------------------------------

/// Machine-readable form of the console report.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub filter: FilterKeys,
    pub rows: usize,
    pub modes: &'a [ModeAverage],
    /// `None` when a mode is missing or the ratio is infinite.
    pub speedup: Option<f64>,
    pub speedup_infinite: bool,
}

impl<'a> Summary<'a> {
    pub fn new(filter: FilterKeys, rows: usize, means: &'a ModeAverages) -> Self {
        let ratio = stats::spec_and_seq(means).map(|(spec, seq)| stats::speedup(seq, spec));
        Summary {
            filter,
            rows,
            modes: &means.modes,
            speedup: ratio.filter(|s| s.is_finite()),
            speedup_infinite: ratio.is_some_and(f64::is_infinite),
        }
    }
}

/// Write `summary` as pretty-printed JSON to `path`.
pub fn write_json(summary: &Summary<'_>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!("wrote JSON summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    fn means(entries: &[(&str, f64)]) -> ModeAverages {
        ModeAverages {
            modes: entries
                .iter()
                .map(|(modo, avg_ms)| ModeAverage {
                    modo: modo.to_string(),
                    avg_ms: *avg_ms,
                    samples: 2,
                    missing: 0,
                })
                .collect(),
        }
    }

    fn report(means: &ModeAverages) -> (String, Option<f64>) {
        let mut buf = Vec::new();
        let speedup = write_report(&mut buf, means).unwrap();
        (String::from_utf8(buf).unwrap(), speedup)
    }

    const KEYS: FilterKeys = FilterKeys { n: 10, umbral: 2, pow_diff: 1, primos_max: 100 };

    #[test]
    fn table_is_right_aligned() {
        let table = format_table(&means(&[("seq", 150.0), ("spec", 50.0)]));
        assert_eq!(table, "modo   avg_ms\n seq  150.000\nspec   50.000\n");
    }

    #[test]
    fn report_prints_speedup_with_three_decimals() {
        let (text, speedup) = report(&means(&[("seq", 150.0), ("spec", 50.0)]));
        assert_eq!(speedup, Some(3.0));
        assert!(text.contains("Speedup = Tseq/Tspec = 3.000"));
        assert!(!text.contains("Warning"));
    }

    #[test]
    fn report_prints_infinity_for_zero_spec() {
        let (text, speedup) = report(&means(&[("seq", 100.0), ("spec", 0.0)]));
        assert_eq!(speedup, Some(f64::INFINITY));
        assert!(text.contains("Speedup = Tseq/Tspec = inf"));
    }

    #[test]
    fn report_warns_when_a_mode_is_missing() {
        let (text, speedup) = report(&means(&[("seq", 150.0)]));
        assert_eq!(speedup, None);
        assert!(text.contains("seq  150.000"));
        assert!(text.contains("Warning"));
        assert!(!text.contains("Speedup"));
    }

    #[test]
    fn nan_average_is_shown_as_nan() {
        let table = format_table(&means(&[("seq", f64::NAN)]));
        assert!(table.ends_with(" NaN\n"));
    }

    #[test]
    fn json_summary_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let m = means(&[("seq", 150.0), ("spec", 50.0)]);
        write_json(&Summary::new(KEYS, 4, &m), &path).unwrap();

        let v: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["filter"]["powDiff"], 1);
        assert_eq!(v["filter"]["primosMax"], 100);
        assert_eq!(v["rows"], 4);
        assert_eq!(v["modes"][1]["modo"], "spec");
        assert_eq!(v["modes"][1]["avg_ms"], 50.0);
        assert_eq!(v["speedup"], 3.0);
        assert_eq!(v["speedup_infinite"], false);
    }

    #[test]
    fn json_summary_marks_infinite_and_missing_speedup() {
        let zero = means(&[("seq", 100.0), ("spec", 0.0)]);
        let s = Summary::new(KEYS, 2, &zero);
        assert_eq!(s.speedup, None);
        assert!(s.speedup_infinite);

        let only_seq = means(&[("seq", 100.0)]);
        let s = Summary::new(KEYS, 1, &only_seq);
        assert_eq!(s.speedup, None);
        assert!(!s.speedup_infinite);
    }
}
