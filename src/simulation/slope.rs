use rand::RngExt;

use super::noise::create_rng;

/// Random slope signal made of rising and falling runs
///
/// Every run is at least one sample beyond `±threshold` and may trail off
/// into the band just inside the threshold. Most runs are closed by one or
/// more samples near zero; the rest swing straight into a run of the
/// opposite sign. Intended for detectors using a noise guard of at most a
/// tenth of `threshold`.
pub fn random_slope_signal(len: usize, threshold: f64, seed: u64) -> Vec<f64> {
    let mut rng = create_rng(seed);
    let mut signal = Vec::with_capacity(len);
    let mut sign = 1.0;
    let mut swing = false;

    while signal.len() < len {
        sign = if swing {
            -sign
        } else if rng.random::<bool>() {
            1.0
        } else {
            -1.0
        };

        let run = rng.random_range(1..6);
        for _ in 0..run {
            signal.push(sign * threshold * rng.random_range(1.01..5.0));
        }

        let ambiguous = rng.random_range(0..3);
        for _ in 0..ambiguous {
            signal.push(sign * threshold * rng.random_range(0.92..0.99));
        }

        swing = rng.random_range(0..3) == 0;
        if !swing {
            let quiet = rng.random_range(1..5);
            for _ in 0..quiet {
                signal.push(threshold * rng.random_range(-0.5..0.5));
            }
        }
    }

    signal.truncate(len);
    signal
}
