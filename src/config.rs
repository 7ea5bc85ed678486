//! Configuration for slope-based peak analysis.
//!
//! Every field has a default, so a TOML file only needs the sections it
//! wants to change:
//!
//! ```toml
//! [smoothing]
//! width = 24
//!
//! [detection]
//! slope_threshold = 2.5
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{PeakError, Result};

/// Unit used for index-valued columns when results are exported
///
/// # Parsing formats
/// - `bins` or `samples` - raw spectrum bin indices
/// - `mhz` - frequency in MHz
///
/// # Example
/// ```
/// use slopepeak::config::AxisUnit;
///
/// let unit: AxisUnit = "MHz".parse().unwrap();
/// assert_eq!(unit, AxisUnit::Mhz);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisUnit {
    /// Spectrum bin index
    #[default]
    Bins,
    /// Frequency in MHz
    Mhz,
}

impl AxisUnit {
    /// Scale factor converting one spectrum bin into this unit
    ///
    /// The positive half of an `fft_length`-point spectrum spans
    /// `fft_length / 2` bins, each `2 * sample_rate / fft_length` wide on
    /// the exported frequency axis.
    pub fn bin_scale(&self, sample_rate: u32, fft_length: usize) -> f64 {
        match self {
            AxisUnit::Bins => 1.0,
            AxisUnit::Mhz => {
                if fft_length == 0 {
                    return 0.0;
                }
                2.0 * sample_rate as f64 / fft_length as f64 / 1e6
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AxisUnit::Bins => "bin",
            AxisUnit::Mhz => "MHz",
        }
    }
}

impl fmt::Display for AxisUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisUnit::Bins => write!(f, "bins"),
            AxisUnit::Mhz => write!(f, "mhz"),
        }
    }
}

impl FromStr for AxisUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bins" | "bin" | "samples" => Ok(AxisUnit::Bins),
            "mhz" => Ok(AxisUnit::Mhz),
            other => Err(format!("invalid axis unit: {}", other)),
        }
    }
}

/// Full analysis configuration
///
/// # Example
/// ```
/// use slopepeak::config::AnalysisConfig;
///
/// let mut config = AnalysisConfig::default();
/// config.smoothing.width = 32;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Recording frame selection
    pub source: SourceConfig,
    /// Spectrum estimation
    pub spectrum: SpectrumConfig,
    /// Smoothing and derivative window
    pub smoothing: SmoothingConfig,
    /// Edge detection thresholds
    pub detection: DetectionConfig,
}

/// Which frames of a recording feed the spectrum
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Number of consecutive frames to read
    pub frame_count: usize,
    /// Index of the first frame to read
    pub frame_offset: usize,
    /// Samples per frame
    pub frame_size: usize,
    /// Channel to analyze in multi-channel recordings
    pub channel: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// FFT length; `None` rounds the frame size up to a power of two
    pub fft_length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Window size shared by the smoother and the derivative estimator
    pub width: usize,
    /// Extra smoothing passes; larger values give a more bell-shaped kernel
    pub shape: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Slope magnitude that opens a rising or falling run
    pub slope_threshold: f64,
    /// Quiet-zone margin as a fraction of `slope_threshold`
    pub noise_guard_ratio: f64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            frame_count: 10,
            frame_offset: 10,
            frame_size: 4096,
            channel: 0,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            width: 16,
            shape: 1,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            slope_threshold: 1.0,
            noise_guard_ratio: 0.1,
        }
    }
}

impl DetectionConfig {
    pub fn new(slope_threshold: f64) -> Self {
        Self {
            slope_threshold,
            ..Self::default()
        }
    }

    /// Quiet-zone margin in slope units
    pub fn noise_guard(&self) -> f64 {
        self.slope_threshold * self.noise_guard_ratio
    }
}

impl SpectrumConfig {
    /// FFT length to use for frames of `frame_size` samples
    pub fn resolve_fft_length(&self, frame_size: usize) -> usize {
        self.fft_length
            .unwrap_or_else(|| crate::signal_processing::next_pow2(frame_size))
    }
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PeakError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        text.parse()
    }

    /// Check parameters that do not depend on the signal length
    pub fn validate(&self) -> Result<()> {
        if self.source.frame_count == 0 {
            return Err(PeakError::InvalidParameter(
                "frame_count must be at least 1".to_string(),
            ));
        }
        if self.source.frame_size == 0 {
            return Err(PeakError::InvalidParameter(
                "frame_size must be at least 1".to_string(),
            ));
        }
        if self.spectrum.fft_length == Some(0) {
            return Err(PeakError::InvalidParameter(
                "fft_length must be at least 1".to_string(),
            ));
        }
        if self.smoothing.width == 0 {
            return Err(PeakError::InvalidParameter(
                "width must be at least 1".to_string(),
            ));
        }
        let ratio = self.detection.noise_guard_ratio;
        if !(0.0..1.0).contains(&ratio) {
            return Err(PeakError::InvalidParameter(format!(
                "noise_guard_ratio must be in [0, 1), got {}",
                ratio
            )));
        }
        let threshold = self.detection.slope_threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(PeakError::InvalidParameter(format!(
                "slope_threshold must be positive, got {}",
                self.detection.slope_threshold
            )));
        }
        Ok(())
    }
}

impl FromStr for AnalysisConfig {
    type Err = PeakError;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PeakError::Config(e.to_string()))
    }
}
