use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use speedup_report::cli::Args;
use speedup_report::data::loader;
use speedup_report::report::{self, Summary};
use speedup_report::{plot, stats};

const EXIT_CSV_NOT_FOUND: u8 = 1;
const EXIT_NO_MATCHING_ROWS: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    if !args.csv.exists() {
        println!("CSV not found: {}", args.csv.display());
        return Ok(ExitCode::from(EXIT_CSV_NOT_FOUND));
    }

    let keys = args.filter_keys();
    let rows = loader::load_and_filter(&args.csv, &keys)
        .with_context(|| format!("loading {}", args.csv.display()))?;
    if rows.is_empty() {
        println!("No rows match the given parameters ({keys}).");
        return Ok(ExitCode::from(EXIT_NO_MATCHING_ROWS));
    }

    let means = stats::compute_means(&rows);
    report::print_report(&means);

    if let Some(path) = &args.json {
        report::write_json(&Summary::new(keys, rows.len(), &means), path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    plot::plot_speedup(&means, &args.out)
        .with_context(|| format!("writing chart {}", args.out.display()))?;

    Ok(ExitCode::SUCCESS)
}
