use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize
};

use crate::geo::geoerror::GeoError;

/// Mean earth radius in km.
pub const EARTH_RADIUS_MEAN: f64 = 6371.0072;

/// Immutable geographic point. Latitude and longitude in decimal degrees,
/// depth in km (positive down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    depth: f64
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Location, GeoError> {
        Location::with_depth(latitude, longitude, 0.0)
    }

    pub fn with_depth(latitude: f64, longitude: f64, depth: f64) -> Result<Location, GeoError> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(GeoError::InvalidLocation(format!("latitude {} outside [-90, 90]", latitude)));
        }
        if !longitude.is_finite() || longitude < -180.0 || longitude > 360.0 {
            return Err(GeoError::InvalidLocation(format!("longitude {} outside [-180, 360]", longitude)));
        }
        if !depth.is_finite() {
            return Err(GeoError::InvalidLocation(format!("depth {} is not finite", depth)));
        }
        Ok(Location { latitude, longitude, depth })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Great-circle surface distance in km (haversine), ignoring depth.
    pub fn horizontal_distance(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let sin_dlat = ((lat2 - lat1) / 2.0).sin();
        let sin_dlon = ((other.longitude - self.longitude).to_radians() / 2.0).sin();
        let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
        2.0 * EARTH_RADIUS_MEAN * a.sqrt().min(1.0).asin()
    }

    /// Straight-line distance in km combining surface distance and depth difference.
    pub fn linear_distance(&self, other: &Location) -> f64 {
        let horizontal = self.horizontal_distance(other);
        let vertical = other.depth - self.depth;
        (horizontal * horizontal + vertical * vertical).sqrt()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.latitude, self.longitude, self.depth)
    }
}
