use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize
};

use crate::calc::calcerror::CalcError;
use crate::calc::tectonicregiontype::TectonicRegionType;
use crate::geo::location::Location;

/// Option switching background (gridded) seismicity on alongside fault sources.
pub const INCLUDE_BACKGROUND_SEISMICITY: &str = "include_background_seismicity";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String)
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{}", value),
            OptionValue::Number(value) => write!(f, "{}", value),
            OptionValue::Text(value) => write!(f, "{}", value),
        }
    }
}

/// A single candidate earthquake and its probability of occurring within
/// the forecast duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqkRupture {
    pub magnitude: f64,
    pub probability: f64,
    pub rake: f64,
    pub hypocenter: Location,
    pub tectonic_region_type: TectonicRegionType
}

impl EqkRupture {
    pub fn distance_to(&self, location: &Location) -> f64 {
        self.hypocenter.linear_distance(location)
    }
}

/// Enumerable model of future earthquakes. Must be updated after any
/// option or duration change before its sources are read.
pub trait EarthquakeRuptureForecast {
    fn name(&self) -> &str;

    fn set_option(&mut self, name: &str, value: OptionValue) -> Result<(), CalcError>;

    fn set_duration(&mut self, years: f64) -> Result<(), CalcError>;

    fn duration(&self) -> f64;

    fn update_forecast(&mut self) -> Result<(), CalcError>;

    fn is_updated(&self) -> bool;

    fn num_sources(&self) -> usize;

    fn source_name(&self, source_index: usize) -> Result<String, CalcError>;

    fn ruptures(&self, source_index: usize) -> Result<Vec<EqkRupture>, CalcError>;

    /// Options as (name, value) for metadata, in a stable order.
    fn options(&self) -> Vec<(String, OptionValue)> {
        Vec::new()
    }

    fn info(&self) -> String {
        let mut info = format!("Eqk Rup Forecast = {}", self.name());
        for (name, value) in self.options() {
            info.push_str(&format!("; {} = {}", name, value));
        }
        info
    }

    fn ensure_updated(&self) -> Result<(), CalcError> {
        if self.is_updated() {
            Ok(())
        } else {
            Err(CalcError::ForecastNotUpdated(self.name().to_owned()))
        }
    }
}
