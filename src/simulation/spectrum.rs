use serde::Deserialize;

use super::noise::add_white_noise;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpShape {
    #[default]
    Gaussian,
    Triangle,
}

/// Peak added on top of a synthetic spectrum floor
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Bump {
    /// Centre bin
    pub center: f64,
    /// Standard deviation (Gaussian) or half base width (triangle) in bins
    pub half_width: f64,
    /// Height above the floor
    pub height: f64,
    #[serde(default)]
    pub shape: BumpShape,
}

impl Bump {
    pub fn gaussian(center: f64, half_width: f64, height: f64) -> Self {
        Self {
            center,
            half_width,
            height,
            shape: BumpShape::Gaussian,
        }
    }

    pub fn triangle(center: f64, half_width: f64, height: f64) -> Self {
        Self {
            center,
            half_width,
            height,
            shape: BumpShape::Triangle,
        }
    }

    pub fn value_at(&self, bin: f64) -> f64 {
        let d = (bin - self.center) / self.half_width;
        match self.shape {
            BumpShape::Gaussian => self.height * (-d * d / 2.0).exp(),
            BumpShape::Triangle => self.height * (1.0 - d.abs()).max(0.0),
        }
    }
}

/// Synthetic log-magnitude spectrum: flat floor, bumps and white noise
pub fn synthetic_spectrum(
    len: usize,
    bumps: &[Bump],
    floor: f64,
    noise_std: f64,
    seed: u64,
) -> Result<Vec<f64>> {
    let mut spectrum: Vec<f64> = (0..len)
        .map(|i| floor + bumps.iter().map(|b| b.value_at(i as f64)).sum::<f64>())
        .collect();
    add_white_noise(&mut spectrum, noise_std, seed)?;
    Ok(spectrum)
}
