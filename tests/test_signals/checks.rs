use slopepeak::signal_processing::Edges;

/// Explicit right-window minus left-window sum
pub fn brute_force_slope(signal: &[f64], n: usize) -> Vec<f64> {
    let len = signal.len();
    let mut out = vec![0.0; len];
    for i in n..len - n {
        let right: f64 = signal[i + 1..=i + n].iter().sum();
        let left: f64 = signal[i - n..i].iter().sum();
        out[i] = right - left;
    }
    out
}

/// Panics unless the edges pair up in order
pub fn assert_edges_paired(edges: &Edges) {
    assert_eq!(
        edges.rises.len(),
        edges.falls.len(),
        "rises {:?} falls {:?}",
        edges.rises,
        edges.falls
    );
    for w in edges.rises.windows(2) {
        assert!(w[0] < w[1], "rises not increasing: {:?}", edges.rises);
    }
    for w in edges.falls.windows(2) {
        assert!(w[0] < w[1], "falls not increasing: {:?}", edges.falls);
    }
    for (rise, fall) in edges.pairs() {
        assert!(rise < fall, "rise {} not before fall {}", rise, fall);
    }
}
