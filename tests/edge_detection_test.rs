mod test_signals;

use slopepeak::signal_processing::{EdgeDetector, EdgeState, EdgeThresholds, detect_edges};
use slopepeak::simulation::random_slope_signal;
use test_signals::assert_edges_paired;

#[test]
fn test_paired_edges_on_random_signals() {
    for seed in 0..200 {
        let len = 50 + (seed as usize * 37) % 450;
        let slope = random_slope_signal(len, 10.0, seed);
        let edges = detect_edges(&slope, 10.0, 1.0).unwrap();
        assert_edges_paired(&edges);
    }
}

#[test]
fn test_random_signals_produce_events() {
    let total: usize = (0..20)
        .map(|seed| {
            let slope = random_slope_signal(400, 10.0, seed);
            detect_edges(&slope, 10.0, 1.0).unwrap().len()
        })
        .sum();
    assert!(total > 20, "expected plenty of events, got {}", total);
}

#[test]
fn test_chunked_processing_matches_single_pass() {
    let thresholds = EdgeThresholds::new(10.0, 1.0).unwrap();
    for seed in 0..20 {
        let slope = random_slope_signal(333, 10.0, seed);
        let whole = detect_edges(&slope, 10.0, 1.0).unwrap();

        let mut detector = EdgeDetector::new(thresholds);
        for chunk in slope.chunks(17) {
            detector.process_buffer(chunk);
        }
        assert_eq!(detector.finish(), whole, "seed {}", seed);
    }
}

#[test]
fn test_back_to_back_rises_keep_the_later_one() {
    let slope = [0.0, 20.0, 0.0, 0.0, 25.0, 0.0];
    let mut detector = EdgeDetector::new(EdgeThresholds::new(10.0, 1.0).unwrap());
    detector.process_buffer(&slope);
    let edges = detector.finish();
    // the second rise replaced the first and then had no fall to pair with
    assert!(edges.rises.is_empty());

    let mut with_fall = slope.to_vec();
    with_fall.extend([-30.0, 0.0]);
    let edges = detect_edges(&with_fall, 10.0, 1.0).unwrap();
    assert_eq!(edges.rises, vec![4]);
    assert_eq!(edges.falls, vec![6]);
}

#[test]
fn test_back_to_back_falls_keep_the_earlier_one() {
    let slope = [0.0, 30.0, 0.0, -20.0, -22.0, 0.0, 0.0, -40.0, 0.0];
    let edges = detect_edges(&slope, 10.0, 1.0).unwrap();
    assert_eq!(edges.rises, vec![1]);
    assert_eq!(edges.falls, vec![4]);
}

#[test]
fn test_trailing_rise_is_dropped() {
    let slope = [0.0, 20.0, 0.0, -20.0, 0.0, 15.0, 18.0];
    let mut detector = EdgeDetector::new(EdgeThresholds::new(10.0, 1.0).unwrap());
    detector.process_buffer(&slope);
    assert_eq!(detector.state(), EdgeState::Rising);
    let edges = detector.finish();
    assert_eq!(edges.rises, vec![1]);
    assert_eq!(edges.falls, vec![3]);

    // confirmed but unmatched rise at the end is dropped too
    let slope = [0.0, 20.0, 0.0, -20.0, 0.0, 15.0, 0.0];
    let edges = detect_edges(&slope, 10.0, 1.0).unwrap();
    assert_eq!(edges.rises.len(), edges.falls.len());
    assert_eq!(edges.rises, vec![1]);
}

#[test]
fn test_zero_slope_has_no_edges() {
    let edges = detect_edges(&vec![0.0; 1000], 10.0, 1.0).unwrap();
    assert!(edges.is_empty());

    let edges = detect_edges(&[], 10.0, 1.0).unwrap();
    assert!(edges.is_empty());
}

#[test]
fn test_sub_threshold_signal_has_no_edges() {
    let slope: Vec<f64> = (0..500).map(|i| 9.9 * ((i as f64) * 0.3).sin()).collect();
    assert!(detect_edges(&slope, 10.0, 1.0).unwrap().is_empty());
}

#[test]
fn test_zero_noise_guard() {
    let slope = [0.0, 20.0, 5.0, -20.0, -5.0];
    let edges = detect_edges(&slope, 10.0, 0.0).unwrap();
    assert_eq!(edges.rises, vec![1]);
    assert_eq!(edges.falls, vec![3]);
}
