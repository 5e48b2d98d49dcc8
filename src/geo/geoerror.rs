use thiserror::Error;

use crate::geo::location::Location;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("location {0} is not a node of the gridded region")]
    LocationNotInRegion(Location),

    #[error("node index {index} out of range for region with {size} nodes")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("invalid location: {0}")]
    InvalidLocation(String),
}
