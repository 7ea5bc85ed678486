use crate::error::{PeakError, Result};

/// Classification of the current slope run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeState {
    #[default]
    Neither,
    Rising,
    Falling,
}

/// Extreme slope value seen in a run and where it occurred
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunExtremum {
    pub value: f64,
    pub index: usize,
}

/// Running extrema for rising and falling runs
///
/// Each extremum is only reset when its own run is confirmed by a quiet
/// sample. A rising run that swings straight into a falling run (or the
/// reverse) keeps its extremum for the next run of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunTracker {
    pub peak: RunExtremum,
    pub trough: RunExtremum,
}

/// Edge location confirmed when a run ends in the quiet zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmed {
    Rise(usize),
    Fall(usize),
}

/// Detection thresholds
///
/// Samples above `threshold` open a rising run, samples below `-threshold`
/// open a falling run. A run ends on a sample inside the quiet zone
/// `(-threshold + noise_guard, threshold - noise_guard)`. Samples between the
/// quiet zone and the threshold neither extend nor end a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeThresholds {
    threshold: f64,
    noise_guard: f64,
}

impl EdgeThresholds {
    /// # Arguments
    /// * `threshold` - Run threshold (`th`)
    /// * `noise_guard` - Quiet-zone margin (`thp`), `0 <= noise_guard < threshold`
    pub fn new(threshold: f64, noise_guard: f64) -> Result<Self> {
        if !threshold.is_finite() || !noise_guard.is_finite() {
            return Err(PeakError::InvalidParameter(format!(
                "thresholds must be finite, got th={} thp={}",
                threshold, noise_guard
            )));
        }
        if noise_guard < 0.0 || threshold <= noise_guard {
            return Err(PeakError::InvalidParameter(format!(
                "need th > thp >= 0, got th={} thp={}",
                threshold, noise_guard
            )));
        }
        Ok(Self {
            threshold,
            noise_guard,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn noise_guard(&self) -> f64 {
        self.noise_guard
    }

    fn is_quiet(&self, sample: f64) -> bool {
        let bound = self.threshold - self.noise_guard;
        sample < bound && sample > -bound
    }
}

/// One step of the edge state machine
///
/// Pure function of the previous state, the running extrema and the next
/// sample. Returns the new state, the updated extrema and the edge confirmed
/// by this sample, if any.
pub fn transition(
    state: EdgeState,
    mut tracker: RunTracker,
    index: usize,
    sample: f64,
    thresholds: &EdgeThresholds,
) -> (EdgeState, RunTracker, Option<Confirmed>) {
    if sample > thresholds.threshold {
        if sample > tracker.peak.value {
            tracker.peak = RunExtremum {
                value: sample,
                index,
            };
        }
        (EdgeState::Rising, tracker, None)
    } else if sample < -thresholds.threshold {
        if sample < tracker.trough.value {
            tracker.trough = RunExtremum {
                value: sample,
                index,
            };
        }
        (EdgeState::Falling, tracker, None)
    } else if thresholds.is_quiet(sample) {
        let confirmed = match state {
            EdgeState::Rising => {
                tracker.peak.value = 0.0;
                Some(Confirmed::Rise(tracker.peak.index))
            }
            EdgeState::Falling => {
                tracker.trough.value = 0.0;
                Some(Confirmed::Fall(tracker.trough.index))
            }
            EdgeState::Neither => None,
        };
        (EdgeState::Neither, tracker, confirmed)
    } else {
        (state, tracker, None)
    }
}

/// Paired rising and falling edge locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edges {
    pub rises: Vec<usize>,
    pub falls: Vec<usize>,
}

impl Edges {
    pub fn len(&self) -> usize {
        self.falls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.falls.is_empty()
    }

    /// `(rise, fall)` pairs in order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rises.iter().copied().zip(self.falls.iter().copied())
    }
}

/// Single-pass slope edge detector
///
/// Feeds samples through [`transition`] one at a time and reconciles the
/// confirmed edges so that rises and falls alternate:
/// - a rise confirmed while another rise is still open replaces it (the
///   later rise wins)
/// - a fall confirmed while no rise is open is dropped (the earlier fall
///   wins)
/// - a fall located at or before the open rise is dropped, which happens
///   when a falling run swings straight into a rising run and a later,
///   shallower falling run still reports the older trough
///
/// At the end an open rise without a matching fall is discarded.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    thresholds: EdgeThresholds,
    state: EdgeState,
    tracker: RunTracker,
    index: usize,
    edges: Edges,
}

impl EdgeDetector {
    pub fn new(thresholds: EdgeThresholds) -> Self {
        Self {
            thresholds,
            state: EdgeState::Neither,
            tracker: RunTracker::default(),
            index: 0,
            edges: Edges::default(),
        }
    }

    pub fn state(&self) -> EdgeState {
        self.state
    }

    /// Process the next slope sample
    pub fn process_sample(&mut self, sample: f64) {
        let (state, tracker, confirmed) =
            transition(self.state, self.tracker, self.index, sample, &self.thresholds);
        self.state = state;
        self.tracker = tracker;

        match confirmed {
            Some(Confirmed::Rise(location)) => self.confirm_rise(location),
            Some(Confirmed::Fall(location)) => self.confirm_fall(location),
            None => {}
        }

        debug_assert!(
            self.open_rises() <= 1,
            "rises may lead falls by at most one"
        );
        debug_assert!(
            self.edges
                .falls
                .last()
                .is_none_or(|&fall| self.edges.rises[self.edges.falls.len() - 1] < fall),
            "every rise precedes its fall"
        );
        self.index += 1;
    }

    /// Process a buffer of slope samples
    pub fn process_buffer(&mut self, buffer: &[f64]) {
        for &sample in buffer {
            self.process_sample(sample);
        }
    }

    /// Drop any unterminated rise and return the paired edges
    pub fn finish(mut self) -> Edges {
        if self.open_rises() == 1 {
            if let Some(dropped) = self.edges.rises.pop() {
                log::trace!("dropping unterminated rise at {}", dropped);
            }
        }
        self.edges
    }

    fn open_rises(&self) -> usize {
        self.edges.rises.len() - self.edges.falls.len()
    }

    fn confirm_rise(&mut self, location: usize) {
        if self.open_rises() == 1 {
            if let Some(last) = self.edges.rises.last_mut() {
                log::trace!("two rises in a row: {} => {}", *last, location);
                *last = location;
            }
        } else {
            self.edges.rises.push(location);
        }
    }

    fn confirm_fall(&mut self, location: usize) {
        if self.open_rises() == 0 {
            log::trace!("two falls in a row: keeping earlier, dropping {}", location);
            return;
        }
        if let Some(&rise) = self.edges.rises.last() {
            if location <= rise {
                log::trace!("fall {} is not after open rise {}, dropping", location, rise);
                return;
            }
        }
        self.edges.falls.push(location);
    }
}

/// Find paired rising and falling edges in a slope signal
///
/// # Arguments
/// * `slope` - Slope signal
/// * `threshold` - Run threshold (`th`)
/// * `noise_guard` - Quiet-zone margin (`thp`)
pub fn detect_edges(slope: &[f64], threshold: f64, noise_guard: f64) -> Result<Edges> {
    let mut detector = EdgeDetector::new(EdgeThresholds::new(threshold, noise_guard)?);
    detector.process_buffer(slope);
    Ok(detector.finish())
}
