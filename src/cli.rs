use std::path::PathBuf;

use clap::Parser;

use crate::data::model::FilterKeys;

/// Summarise speculative vs sequential benchmark runs and chart the speedup.
#[derive(Debug, Parser)]
#[command(name = "speedup-report")]
#[command(version)]
pub struct Args {
    /// Path to the metrics CSV
    #[arg(long)]
    pub csv: PathBuf,

    /// Matrix size of the runs to keep
    #[arg(long, allow_negative_numbers = true)]
    pub n: i64,

    /// Branch-decision threshold of the runs to keep
    #[arg(long, allow_negative_numbers = true)]
    pub umbral: i64,

    /// Proof-of-work difficulty of the runs to keep
    #[arg(long = "powDiff", allow_negative_numbers = true)]
    pub pow_diff: i64,

    /// Prime search bound of the runs to keep
    #[arg(long = "primosMax", allow_negative_numbers = true)]
    pub primos_max: i64,

    /// Output PNG file
    #[arg(long, default_value = "speedup.png")]
    pub out: PathBuf,

    /// Also write the summary as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl Args {
    pub fn filter_keys(&self) -> FilterKeys {
        FilterKeys {
            n: self.n,
            umbral: self.umbral,
            pow_diff: self.pow_diff,
            primos_max: self.primos_max,
        }
    }
}
