use std::path::PathBuf;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            // splitmix64
            x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            *slot = z ^ (z >> 31);
        }
        Self { state: s }
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Typical level and spread of each parameter for one scheme.
struct SchemeProfile {
    name: &'static str,
    /// (mean, std_dev, decimals) in column order EC, pH, Turbidity, TDS, Fe, As, Na, K.
    levels: [(f64, f64, usize); 8],
}

const PARAMETERS: [&str; 8] = ["EC", "pH", "Turbidity", "TDS", "Fe", "As", "Na", "K"];

const SCHEMES: [SchemeProfile; 5] = [
    SchemeProfile {
        name: "Ambatale",
        levels: [
            (120.0, 15.0, 1),
            (7.1, 0.2, 2),
            (2.5, 0.8, 2),
            (78.0, 10.0, 1),
            (0.12, 0.04, 3),
            (0.002, 0.001, 4),
            (9.5, 1.5, 2),
            (2.1, 0.4, 2),
        ],
    },
    SchemeProfile {
        name: "Labugama",
        levels: [
            (65.0, 8.0, 1),
            (6.8, 0.3, 2),
            (1.2, 0.5, 2),
            (42.0, 6.0, 1),
            (0.08, 0.03, 3),
            (0.001, 0.0005, 4),
            (5.2, 0.9, 2),
            (1.4, 0.3, 2),
        ],
    },
    SchemeProfile {
        name: "Kalatuwawa",
        levels: [
            (70.0, 9.0, 1),
            (6.9, 0.25, 2),
            (1.6, 0.6, 2),
            (45.0, 7.0, 1),
            (0.10, 0.03, 3),
            (0.001, 0.0005, 4),
            (5.8, 1.0, 2),
            (1.5, 0.3, 2),
        ],
    },
    SchemeProfile {
        name: "Biyagama",
        levels: [
            (210.0, 25.0, 1),
            (7.4, 0.2, 2),
            (4.8, 1.5, 2),
            (135.0, 18.0, 1),
            (0.25, 0.08, 3),
            (0.004, 0.002, 4),
            (18.0, 3.0, 2),
            (3.2, 0.6, 2),
        ],
    },
    SchemeProfile {
        name: "Kandana",
        levels: [
            (340.0, 40.0, 1),
            (7.6, 0.3, 2),
            (6.5, 2.0, 2),
            (220.0, 25.0, 1),
            (0.31, 0.10, 3),
            (0.006, 0.002, 4),
            (27.0, 4.0, 2),
            (4.4, 0.8, 2),
        ],
    },
];

/// Fraction of measurement cells left blank.
const MISSING_RATE: f64 = 0.05;
const SAMPLES_PER_SCHEME: usize = 12;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/cleaned_water_quality_data.csv"));

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut header = vec!["Sample_Code", "Water_Supply_Scheme"];
    header.extend(PARAMETERS);
    writer.write_record(&header)?;

    // Interleave schemes so consecutive samples come from different sources,
    // as they would on a survey run.
    let mut row_id = 0usize;
    for round in 0..SAMPLES_PER_SCHEME {
        for scheme in &SCHEMES {
            row_id += 1;
            let mut row = vec![format!("WQ-{row_id:03}"), scheme.name.to_string()];
            for &(mean, std_dev, decimals) in &scheme.levels {
                if rng.next_f64() < MISSING_RATE {
                    row.push(String::new());
                    continue;
                }
                // Slow drift across rounds on top of sample noise.
                let drift = 1.0 + 0.01 * round as f64;
                let value = rng.gauss(mean * drift, std_dev).max(0.0);
                row.push(format!("{value:.decimals$}"));
            }
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {row_id} samples across {} schemes to {}",
        SCHEMES.len(),
        output_path.display()
    );
    Ok(())
}
