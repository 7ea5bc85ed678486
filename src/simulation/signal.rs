use std::f64::consts::PI;

use serde::Deserialize;

use super::noise::add_white_noise;
use crate::error::Result;

/// Sinusoid in a synthetic recording
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Tone {
    pub frequency_hz: f64,
    pub amplitude: f64,
}

/// Generate a mono recording of summed tones plus white noise
///
/// # Arguments
/// * `num_samples` - Recording length
/// * `sample_rate` - Sample rate in Hz
/// * `tones` - Tones to sum
/// * `noise_std` - Standard deviation of the additive noise
/// * `seed` - Noise seed
pub fn generate_tones(
    num_samples: usize,
    sample_rate: u32,
    tones: &[Tone],
    noise_std: f64,
    seed: u64,
) -> Result<Vec<f64>> {
    let sample_rate = sample_rate as f64;
    let mut samples: Vec<f64> = (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            tones
                .iter()
                .map(|tone| tone.amplitude * (2.0 * PI * tone.frequency_hz * t).sin())
                .sum()
        })
        .collect();
    add_white_noise(&mut samples, noise_std, seed)?;
    Ok(samples)
}

/// Split a recording into `frame_size` frames, dropping any partial tail
pub fn into_frames(samples: &[f64], frame_size: usize) -> Vec<Vec<f64>> {
    samples
        .chunks_exact(frame_size.max(1))
        .map(|c| c.to_vec())
        .collect()
}
