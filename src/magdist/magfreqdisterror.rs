use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MagFreqDistError {
    #[error("invalid magnitude range: {0}")]
    InvalidRange(String),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("if sigma=0, then mean ({mean}) must equal one of the discrete magnitudes")]
    MeanNotOnGrid { mean: f64 },

    #[error("distribution has no non-zero rates to scale")]
    ZeroRateTotal,
}
