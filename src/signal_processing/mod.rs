pub mod derivative;
pub mod edge_detector;
pub mod peak_measure;
pub mod smoothing;
pub mod spectrum;

pub use derivative::slope;
pub use edge_detector::{EdgeDetector, EdgeState, EdgeThresholds, Edges, detect_edges};
pub use peak_measure::{Measurement, measure};
pub use smoothing::smooth;
pub use spectrum::{next_pow2, power_spectrum};
