use std::path::PathBuf;

use anyhow::{Context, Result};

const HEADER: [&str; 13] = [
    "timestamp",
    "modo",
    "n",
    "umbral",
    "powDiff",
    "primosMax",
    "chosen",
    "trace",
    "total_ms",
    "a_ok",
    "a_ms",
    "b_ok",
    "b_ms",
];

const RUNS_PER_MODE: usize = 5;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform jitter in `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + spread * (2.0 * self.next_f64() - 1.0)
    }
}

/// One benchmark configuration with its nominal branch costs.
struct Config {
    n: i64,
    umbral: i64,
    pow_diff: i64,
    primos_max: i64,
    /// Nominal cost of the trace computation that picks the branch.
    decide_ms: f64,
    /// Nominal cost of branch A (proof of work).
    a_ms: f64,
    /// Nominal cost of branch B (prime search).
    b_ms: f64,
}

fn ms(v: f64) -> String {
    format!("{v:.3}")
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_metrics.csv"));

    let configs = [
        Config { n: 100, umbral: 1_000_000, pow_diff: 4, primos_max: 50_000, decide_ms: 35.0, a_ms: 120.0, b_ms: 40.0 },
        Config { n: 200, umbral: 1_000_000, pow_diff: 4, primos_max: 50_000, decide_ms: 260.0, a_ms: 120.0, b_ms: 40.0 },
        Config { n: 200, umbral: 5_000_000, pow_diff: 5, primos_max: 200_000, decide_ms: 260.0, a_ms: 1900.0, b_ms: 310.0 },
    ];

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER)?;

    let mut second = 0u32;
    let mut rows = 0usize;
    for (cfg_idx, cfg) in configs.iter().enumerate() {
        let trace = cfg.n * cfg.n * (cfg.n - 1) / 2;
        let chosen = if trace >= cfg.umbral { "A" } else { "B" };
        let winner_ms = if chosen == "A" { cfg.a_ms } else { cfg.b_ms };
        log::debug!(
            "n={} umbral={} powDiff={} primosMax={}: trace={trace} => {chosen}",
            cfg.n, cfg.umbral, cfg.pow_diff, cfg.primos_max
        );

        let keys = [
            cfg.n.to_string(),
            cfg.umbral.to_string(),
            cfg.pow_diff.to_string(),
            cfg.primos_max.to_string(),
        ];

        // Speculative: both branches run alongside the decision.
        for run in 0..RUNS_PER_MODE {
            let a = cfg.a_ms * rng.jitter(0.1);
            let b = cfg.b_ms * rng.jitter(0.1);
            let decide = cfg.decide_ms * rng.jitter(0.05);
            let winner = if chosen == "A" { a } else { b };
            let total = decide.max(winner) + 0.5 * rng.jitter(0.5);

            // One malformed timing so readers exercise the coercion path.
            let total_cell = if cfg_idx == 0 && run == 2 { "N/A".to_string() } else { ms(total) };

            writer.write_record([
                timestamp(second),
                "spec".to_string(),
                keys[0].clone(),
                keys[1].clone(),
                keys[2].clone(),
                keys[3].clone(),
                chosen.to_string(),
                trace.to_string(),
                total_cell,
                "true".to_string(),
                ms(a),
                "true".to_string(),
                ms(b),
            ])?;
            second += 1;
            rows += 1;
        }

        // Sequential: decide first, then only the winning branch.
        for _ in 0..RUNS_PER_MODE {
            let total = cfg.decide_ms * rng.jitter(0.05) + winner_ms * rng.jitter(0.1);
            writer.write_record([
                timestamp(second),
                "seq".to_string(),
                keys[0].clone(),
                keys[1].clone(),
                keys[2].clone(),
                keys[3].clone(),
                chosen.to_string(),
                trace.to_string(),
                ms(total),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ])?;
            second += 1;
            rows += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} measurements ({} configurations) to {}",
        configs.len(),
        output_path.display()
    );
    Ok(())
}

/// RFC 3339 timestamp `second` seconds after a fixed base instant.
fn timestamp(second: u32) -> String {
    let (h, rem) = (second / 3600, second % 3600);
    format!("2025-01-01T{:02}:{:02}:{:02}Z", h % 24, rem / 60, rem % 60)
}
