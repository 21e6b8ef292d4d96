//! Writes a sample stumpage CSV in the published schema, for offline
//! development: `cargo run --bin generate_sample -- [path]`.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xorshift64*), so the sample file is stable
/// across runs.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

const TYPES: [(&str, f64); 5] = [
    ("Pine Sawtimber", 28.0),
    ("Mixed Hardwood Sawtimber", 34.0),
    ("Pine Chip-n-Saw", 18.0),
    ("Pine Pulpwood", 7.0),
    ("Hardwood Pulpwood", 9.0),
];

const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ms_stumpage_sample.csv".to_string());

    let mut rng = SimpleRng::new(0x5EED);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {path}"))?;

    writer.write_record(["Type", "Time", "Year", "Quarter", "Minimum", "Average", "Maximum"])?;

    for year in 2015..=2024 {
        for quarter in QUARTERS {
            for (name, base) in TYPES {
                // Slow drift plus quarter-to-quarter noise around the base price.
                let drift = (year - 2015) as f64 * 0.4;
                let average = base + drift + (rng.next_f64() - 0.5) * 3.0;
                let spread = 2.0 + rng.next_f64() * 3.0;

                writer.write_record([
                    name.to_string(),
                    format!("{year}-{quarter}"),
                    year.to_string(),
                    quarter.to_string(),
                    format!("{:.2}", average - spread),
                    format!("{average:.2}"),
                    format!("{:.2}", average + spread),
                ])?;
            }
        }
    }

    writer.flush()?;
    println!("Wrote sample stumpage data to {path}");
    Ok(())
}
