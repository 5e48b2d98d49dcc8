use thiserror::Error;

use crate::calc::calcerror::CalcError;
use crate::manager::managererror::ManagerError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid value '{value}' for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, value: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Manager(#[from] ManagerError),

    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}
