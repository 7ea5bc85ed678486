use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{PeakError, Result};

pub(crate) fn create_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub(crate) fn gaussian(std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std_dev)
        .map_err(|e| PeakError::InvalidParameter(format!("noise std dev {}: {}", std_dev, e)))
}

/// Add zero-mean white Gaussian noise in place
pub fn add_white_noise(signal: &mut [f64], std_dev: f64, seed: u64) -> Result<()> {
    if std_dev == 0.0 {
        return Ok(());
    }
    let normal = gaussian(std_dev)?;
    let mut rng = create_rng(seed);
    for sample in signal.iter_mut() {
        *sample += normal.sample(&mut rng);
    }
    Ok(())
}

/// Noise standard deviation giving `snr_db` against a signal of `power`
pub fn noise_std_for_snr(power: f64, snr_db: f64) -> f64 {
    (power / 10f64.powf(snr_db / 10.0)).sqrt()
}
