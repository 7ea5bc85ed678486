use serde::Serialize;

use super::edge_detector::Edges;
use crate::error::{PeakError, Result};

/// Summary of one slope event on the smoothed spectrum
///
/// All positions are sample indices into the smoothed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Measurement {
    /// Rising edge location
    pub rise: usize,
    /// Falling edge location
    pub fall: usize,
    /// Midpoint of the edges
    pub avg_freq: usize,
    /// Location of the tallest sample in `[rise, fall)`
    pub max_freq: usize,
    /// Distance between the edges
    pub dev_band: usize,
    /// First sample at or above half height walking right from the rise
    pub half_left: usize,
    /// First sample at or above half height walking left from the fall
    pub half_right: usize,
    /// `half_right - half_left`
    pub half_band: isize,
}

/// Scan direction for [`nearest_minimum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

fn is_local_minimum(signal: &[f64], i: usize) -> bool {
    i > 0 && i + 1 < signal.len() && signal[i - 1] > signal[i] && signal[i] < signal[i + 1]
}

/// Walk from `start` to the nearest strict local minimum
///
/// The left scan gives up at index 1 and the right scan at the last index,
/// returning that boundary sample when no minimum was found.
pub fn nearest_minimum(signal: &[f64], start: usize, direction: Direction) -> usize {
    let mut i = start;
    match direction {
        Direction::Left => {
            while i > 1 && !is_local_minimum(signal, i) {
                i -= 1;
            }
        }
        Direction::Right => {
            let last = signal.len().saturating_sub(1);
            while i < last && !is_local_minimum(signal, i) {
                i += 1;
            }
        }
    }
    i
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0, |best, (i, &x)| if x > values[best] { i } else { best })
}

/// Measure a single `(rise, fall)` pair
///
/// The half-power reference is the midpoint between the peak value and the
/// higher of the two nearest local minima outside the span. Walks that run
/// off the array stop at its ends.
pub fn measure_pair(smoothed: &[f64], rise: usize, fall: usize) -> Result<Measurement> {
    if rise >= fall {
        return Err(PeakError::EdgeMismatch(format!(
            "rise {} is not before fall {}",
            rise, fall
        )));
    }
    if fall >= smoothed.len() {
        return Err(PeakError::EdgeMismatch(format!(
            "fall {} is outside a signal of length {}",
            fall,
            smoothed.len()
        )));
    }

    let max_freq = rise + argmax(&smoothed[rise..fall]);
    let maxi = smoothed[max_freq];

    let left_min = nearest_minimum(smoothed, rise, Direction::Left);
    let right_min = nearest_minimum(smoothed, fall, Direction::Right);
    let mini = smoothed[left_min].max(smoothed[right_min]);
    let height = (maxi + mini) / 2.0;

    let last = smoothed.len() - 1;
    let mut half_left = rise;
    while smoothed[half_left] < height {
        if half_left == last {
            log::warn!("half-height walk from rise {} hit the end of the signal", rise);
            break;
        }
        half_left += 1;
    }

    let mut half_right = fall;
    while smoothed[half_right] < height {
        if half_right == 0 {
            log::warn!("half-height walk from fall {} hit the start of the signal", fall);
            break;
        }
        half_right -= 1;
    }

    Ok(Measurement {
        rise,
        fall,
        avg_freq: (rise + fall) / 2,
        max_freq,
        dev_band: fall - rise,
        half_left,
        half_right,
        half_band: half_right as isize - half_left as isize,
    })
}

/// Measure every detected event
///
/// # Arguments
/// * `smoothed` - Smoothed spectrum the edges were detected on
/// * `edges` - Paired edges, one measurement per pair
pub fn measure(smoothed: &[f64], edges: &Edges) -> Result<Vec<Measurement>> {
    if edges.rises.len() != edges.falls.len() {
        return Err(PeakError::EdgeMismatch(format!(
            "{} rises but {} falls",
            edges.rises.len(),
            edges.falls.len()
        )));
    }

    edges
        .pairs()
        .map(|(rise, fall)| measure_pair(smoothed, rise, fall))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(len: usize, centre: usize, half_width: usize, height: f64) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let d = (i as isize - centre as isize).unsigned_abs();
                if d < half_width {
                    height * (half_width - d) as f64 / half_width as f64
                } else {
                    0.0
                }
            })
            .collect()
    }

    #[test]
    fn test_triangular_bump() {
        let smoothed = triangle(31, 15, 5, 5.0);
        let m = measure_pair(&smoothed, 10, 20).unwrap();

        assert_eq!(m.max_freq, 15);
        assert_eq!(m.avg_freq, 15);
        assert_eq!(m.dev_band, 10);
        assert_eq!(m.half_left, 13);
        assert_eq!(m.half_right, 17);
        assert_eq!(m.half_band, 4);
        assert!(m.half_left < m.max_freq && m.max_freq < m.half_right);
    }

    #[test]
    fn test_higher_floor_is_reference() {
        //                     0    1    2    3    4    5    6    7    8    9   10   11
        let smoothed = vec![5.0, 1.0, 2.0, 3.0, 9.0, 3.0, 2.0, 4.0, 5.0, 4.0, 3.0, 4.0];
        // minima at 1 (1.0) and 6 (2.0) → height (9 + 2) / 2 = 5.5
        let m = measure_pair(&smoothed, 3, 5).unwrap();
        assert_eq!(m.max_freq, 4);
        assert_eq!(m.half_left, 4);
        assert_eq!(m.half_right, 4);
        assert_eq!(m.half_band, 0);
    }

    #[test]
    fn test_nearest_minimum_boundaries() {
        let falling = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        // index 0 is lower but the left scan stops at 1
        assert_eq!(nearest_minimum(&falling, 3, Direction::Left), 1);
        assert_eq!(nearest_minimum(&falling, 0, Direction::Left), 0);
        assert_eq!(nearest_minimum(&falling, 2, Direction::Right), 4);

        let valley = vec![3.0, 2.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_minimum(&valley, 4, Direction::Left), 2);
        assert_eq!(nearest_minimum(&valley, 0, Direction::Right), 2);
        assert_eq!(nearest_minimum(&valley, 2, Direction::Left), 2);
    }

    #[test]
    fn test_first_maximum_wins() {
        let smoothed = vec![0.0, 1.0, 4.0, 4.0, 1.0, 0.0];
        let m = measure_pair(&smoothed, 1, 4).unwrap();
        assert_eq!(m.max_freq, 2);
    }

    #[test]
    fn test_max_excludes_fall_sample() {
        let smoothed = vec![0.0, 1.0, 2.0, 3.0, 9.0, 0.0];
        let m = measure_pair(&smoothed, 1, 4).unwrap();
        assert_eq!(m.max_freq, 3);
    }

    #[test]
    fn test_walk_clamped_at_ends() {
        // floor right of the event is above the peak, so nothing reaches
        // half height
        let smoothed = vec![0.0, 2.0, 1.0, 0.5, 1.0, 10.0, 20.0, 10.0, 30.0];
        let m = measure_pair(&smoothed, 2, 4).unwrap();
        assert_eq!(m.max_freq, 2);
        assert!(m.half_left <= 8);
        assert!(m.half_right <= 4);
    }

    #[test]
    fn test_measure_all_pairs() {
        let mut smoothed = triangle(60, 15, 5, 5.0);
        for (a, b) in smoothed.iter_mut().zip(triangle(60, 40, 6, 8.0)) {
            *a += b;
        }
        let edges = Edges {
            rises: vec![10, 34],
            falls: vec![20, 46],
        };
        let measurements = measure(&smoothed, &edges).unwrap();
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].max_freq, 15);
        assert_eq!(measurements[1].max_freq, 40);
        assert_eq!(measurements[1].dev_band, 12);
    }

    #[test]
    fn test_empty_edges() {
        assert!(measure(&[], &Edges::default()).unwrap().is_empty());
        assert!(measure(&[1.0, 2.0], &Edges::default()).unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_edges() {
        let smoothed = vec![0.0; 10];
        let unequal = Edges {
            rises: vec![1, 5],
            falls: vec![3],
        };
        assert!(matches!(
            measure(&smoothed, &unequal),
            Err(PeakError::EdgeMismatch(_))
        ));
        assert!(measure_pair(&smoothed, 4, 4).is_err());
        assert!(measure_pair(&smoothed, 4, 10).is_err());
    }
}
