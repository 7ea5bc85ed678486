use std::sync::Arc;

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::error::{PeakError, Result};

/// Floor applied to bin magnitudes before taking the logarithm
const MIN_MAGNITUDE: f64 = 1e-12;

/// Smallest power of two that is at least `n`
pub fn next_pow2(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Log-magnitude spectrum of a set of frames
///
/// Each frame is zero-padded (or truncated) to `fft_length` and transformed.
/// The complex spectra are summed across frames before taking the magnitude,
/// so the result is `log10(|sum_k FFT(frame_k)|)` over the first
/// `fft_length / 2` bins.
///
/// # Arguments
/// * `frames` - Equal or unequal length sample frames
/// * `fft_length` - Transform length
pub fn power_spectrum<F: AsRef<[f64]>>(frames: &[F], fft_length: usize) -> Result<Vec<f64>> {
    if fft_length == 0 {
        return Err(PeakError::InvalidParameter(
            "fft_length must be at least 1".to_string(),
        ));
    }
    if frames.is_empty() {
        return Ok(Vec::new());
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft: Arc<dyn Fft<f64>> = planner.plan_fft_forward(fft_length);

    let mut total = vec![Complex64::new(0.0, 0.0); fft_length];
    let mut buffer = vec![Complex64::new(0.0, 0.0); fft_length];

    for frame in frames {
        let frame = frame.as_ref();
        if frame.len() > fft_length {
            log::debug!(
                "truncating {}-sample frame to fft_length {}",
                frame.len(),
                fft_length
            );
        }
        for (i, slot) in buffer.iter_mut().enumerate() {
            let x = frame.get(i).copied().unwrap_or(0.0);
            *slot = Complex64::new(x, 0.0);
        }
        fft.process(&mut buffer);
        for (acc, bin) in total.iter_mut().zip(buffer.iter()) {
            *acc += *bin;
        }
    }

    Ok(total
        .iter()
        .take(fft_length / 2)
        .map(|bin| bin.norm().max(MIN_MAGNITUDE).log10())
        .collect())
}
