use thiserror::Error;

use crate::calc::tectonicregiontype::TectonicRegionType;
use crate::math::function::functionerror::FunctionError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{collaborator} failed: {message}")]
    Collaborator { collaborator: String, message: String },

    #[error("no ground-motion model supplied")]
    NoGroundMotionModel,

    #[error("no ground-motion model for tectonic region '{0}'")]
    MissingGroundMotionModel(TectonicRegionType),

    #[error("forecast '{0}' must be updated before use")]
    ForecastNotUpdated(String),

    #[error("hazard curve has {actual} points, expected {expected}")]
    CurveSizeMismatch { expected: usize, actual: usize },

    #[error("non-finite value in {what} at index {index}")]
    NonFiniteValue { what: &'static str, index: usize },

    #[error("invalid hazard curve settings: {0}")]
    InvalidSettings(String),

    #[error("invalid intensity measure: {0}")]
    InvalidIntensityMeasure(String),

    #[error("invalid target probability {0}")]
    InvalidTargetProbability(f64),

    #[error("target IML {iml} for probability {probability} is not a finite positive value")]
    InvalidTargetIml { probability: f64, iml: f64 },

    #[error("invalid disaggregation bins: {0}")]
    InvalidBins(String),

    #[error("disaggregation grid is {actual_rows}x{actual_cols}, expected {expected_rows}x{expected_cols}")]
    GridShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize
    },

    #[error("disaggregation contributions sum to {sum}, declared total is {total}")]
    ContributionMismatch { sum: f64, total: f64 },

    #[error("invalid magnitude-distance cutoff: {0}")]
    InvalidCutoff(String),

    #[error(transparent)]
    Function(#[from] FunctionError),
}

impl CalcError {
    pub fn collaborator(collaborator: &str, message: impl ToString) -> CalcError {
        CalcError::Collaborator {
            collaborator: collaborator.to_owned(),
            message: message.to_string()
        }
    }
}
