use std::collections::HashMap;

use uuid::Uuid;

use crate::geo::geoerror::GeoError;
use crate::geo::location::Location;
use crate::service::serviceerror::RequestError;

pub const LAT: &str = "lat";
pub const LON: &str = "lon";
pub const VS30: &str = "vs30";
pub const Z1PT0: &str = "z1pt0";
pub const PERIOD: &str = "period";
pub const DISAGG_VALUE: &str = "disaggval";

/// Parsed query parameters of one hazard request.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardRequest {
    id: Uuid,
    location: Location,
    vs30: f64,
    z1pt0: f64,
    period: f64,
    disagg_value: Option<f64>
}

fn parse_number(params: &HashMap<String, String>, name: &'static str) -> Result<Option<f64>, RequestError> {
    let Some(raw) = params.get(name) else {
        return Ok(None);
    };
    let value: f64 = raw.trim().parse().map_err(|error: std::num::ParseFloatError| RequestError::InvalidParameter {
        name,
        value: raw.to_owned(),
        reason: error.to_string()
    })?;
    if !value.is_finite() {
        return Err(RequestError::InvalidParameter {
            name,
            value: raw.to_owned(),
            reason: "must be finite".to_owned()
        });
    }
    Ok(Some(value))
}

fn required(params: &HashMap<String, String>, name: &'static str) -> Result<f64, RequestError> {
    parse_number(params, name)?.ok_or(RequestError::MissingParameter(name))
}

impl HazardRequest {
    /// Fails on the first missing or malformed parameter; nothing is computed.
    pub fn from_params(params: &HashMap<String, String>) -> Result<HazardRequest, RequestError> {
        let lat = required(params, LAT)?;
        let lon = required(params, LON)?;
        let vs30 = required(params, VS30)?;
        let z1pt0 = required(params, Z1PT0)?;
        let period = required(params, PERIOD)?;
        let disagg_value = parse_number(params, DISAGG_VALUE)?;

        let invalid = |name: &'static str, value: f64, error: GeoError| RequestError::InvalidParameter {
            name,
            value: value.to_string(),
            reason: error.to_string()
        };
        Location::new(lat, 0.0).map_err(|error| invalid(LAT, lat, error))?;
        let location = Location::new(lat, lon).map_err(|error| invalid(LON, lon, error))?;
        if period < 0.0 {
            return Err(RequestError::InvalidParameter {
                name: PERIOD,
                value: period.to_string(),
                reason: "must be non-negative".to_owned()
            });
        }

        Ok(HazardRequest {
            id: Uuid::new_v4(),
            location,
            vs30,
            z1pt0,
            period,
            disagg_value
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn vs30(&self) -> f64 {
        self.vs30
    }

    pub fn z1pt0(&self) -> f64 {
        self.z1pt0
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn disagg_value(&self) -> Option<f64> {
        self.disagg_value
    }
}
