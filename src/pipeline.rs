use serde::Serialize;

use crate::config::{DetectionConfig, SmoothingConfig};
use crate::error::{PeakError, Result};
use crate::signal_processing::{
    EdgeDetector, EdgeThresholds, Edges, Measurement, measure, slope, smooth,
};

/// Everything produced by one analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    /// Smoothed spectrum the measurements refer to
    pub smoothed: Vec<f64>,
    /// Slope of the unsmoothed spectrum
    pub slope: Vec<f64>,
    /// Paired edge locations
    pub edges: Edges,
    /// One measurement per edge pair
    pub measurements: Vec<Measurement>,
}

/// Per-event arrays aligned by event index, ready for tabular export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventColumns {
    pub rises: Vec<usize>,
    pub falls: Vec<usize>,
    pub avg_freq: Vec<usize>,
    pub max_freq: Vec<usize>,
    pub dev_band: Vec<usize>,
    pub half_left: Vec<usize>,
    pub half_right: Vec<usize>,
    pub half_band: Vec<isize>,
}

impl PipelineResult {
    pub fn event_count(&self) -> usize {
        self.measurements.len()
    }

    pub fn columns(&self) -> EventColumns {
        let m = &self.measurements;
        EventColumns {
            rises: self.edges.rises.clone(),
            falls: self.edges.falls.clone(),
            avg_freq: m.iter().map(|m| m.avg_freq).collect(),
            max_freq: m.iter().map(|m| m.max_freq).collect(),
            dev_band: m.iter().map(|m| m.dev_band).collect(),
            half_left: m.iter().map(|m| m.half_left).collect(),
            half_right: m.iter().map(|m| m.half_right).collect(),
            half_band: m.iter().map(|m| m.half_band).collect(),
        }
    }
}

/// Slope-based peak finder
///
/// Runs smoothing, slope estimation, edge detection and measurement over a
/// whole spectrum. Holds only validated parameters, so repeated runs on the
/// same input give identical results.
#[derive(Debug, Clone)]
pub struct SlopePeakFinder {
    width: usize,
    shape: usize,
    thresholds: EdgeThresholds,
}

impl SlopePeakFinder {
    pub fn new(smoothing: &SmoothingConfig, detection: &DetectionConfig) -> Result<Self> {
        if smoothing.width == 0 {
            return Err(PeakError::InvalidParameter(
                "width must be at least 1".to_string(),
            ));
        }
        let thresholds =
            EdgeThresholds::new(detection.slope_threshold, detection.noise_guard())?;
        Ok(Self {
            width: smoothing.width,
            shape: smoothing.shape,
            thresholds,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn thresholds(&self) -> &EdgeThresholds {
        &self.thresholds
    }

    /// Analyze one spectrum
    ///
    /// An empty spectrum gives an empty result. Otherwise `width` must be
    /// less than half the spectrum length.
    pub fn run(&self, spectrum: &[f64]) -> Result<PipelineResult> {
        if spectrum.is_empty() {
            log::warn!("empty spectrum, nothing to analyze");
            return Ok(PipelineResult::default());
        }

        let slope = slope(spectrum, self.width)?;
        let smoothed = smooth(spectrum, self.width, self.shape)?;
        log::debug!(
            "spectrum of {} bins, width {}, shape {}",
            spectrum.len(),
            self.width,
            self.shape
        );

        let mut detector = EdgeDetector::new(self.thresholds);
        detector.process_buffer(&slope);
        let edges = detector.finish();
        log::debug!("rises {:?} falls {:?}", edges.rises, edges.falls);

        let measurements = measure(&smoothed, &edges)?;
        if measurements.is_empty() {
            log::info!(
                "no slope events above threshold {}",
                self.thresholds.threshold()
            );
        } else {
            log::info!("found {} slope events", measurements.len());
        }

        Ok(PipelineResult {
            smoothed,
            slope,
            edges,
            measurements,
        })
    }
}

/// Analyze a spectrum with the default kernel shape and a noise guard of
/// one tenth of `slope_threshold`
pub fn find_peak_slope(
    spectrum: &[f64],
    width: usize,
    slope_threshold: f64,
) -> Result<PipelineResult> {
    let smoothing = SmoothingConfig {
        width,
        ..SmoothingConfig::default()
    };
    SlopePeakFinder::new(&smoothing, &DetectionConfig::new(slope_threshold))?.run(spectrum)
}
