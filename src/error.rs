use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeakError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient data: need {needed} samples, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Rise/fall edges do not pair up: {0}")]
    EdgeMismatch(String),

    #[error("Signal source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<hound::Error> for PeakError {
    fn from(err: hound::Error) -> Self {
        PeakError::Source(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PeakError>;
