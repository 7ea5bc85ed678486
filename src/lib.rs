pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod signal_processing;
pub mod source;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::AnalysisConfig;
pub use error::{PeakError, Result};
pub use pipeline::{EventColumns, PipelineResult, SlopePeakFinder, find_peak_slope};
pub use wav::save_wav;
