use std::collections::HashMap;

use tracing::warn;

use crate::calc::calcerror::CalcError;
use crate::calc::intensitymeasure::IntensityMeasure;
use crate::calc::ruptureforecast::EqkRupture;
use crate::calc::tectonicregiontype::TectonicRegionType;
use crate::site::site::{
    ParameterBounds,
    Site,
    SiteParameterName
};

pub type GroundMotionModelMap = HashMap<TectonicRegionType, Box<dyn GroundMotionModel>>;

/// Predicts the distribution of ground motion for a rupture at a site.
pub trait GroundMotionModel {
    fn name(&self) -> &str;

    fn set_param_defaults(&mut self);

    fn set_intensity_measure(&mut self, intensity_measure: &IntensityMeasure) -> Result<(), CalcError>;

    fn set_site(&mut self, site: &Site) -> Result<(), CalcError>;

    /// Ranges the model was fitted over. Used for warnings only.
    fn site_parameter_bounds(&self) -> Vec<(SiteParameterName, ParameterBounds)> {
        Vec::new()
    }

    /// Probability that the intensity measure exceeds `exp(ln_iml)` given
    /// that `rupture` occurs.
    fn exceedance_probability(&self, rupture: &EqkRupture, ln_iml: f64) -> Result<f64, CalcError>;

    fn info(&self) -> String {
        format!("IMR = {}", self.name())
    }

    /// Warns for site values outside the model's bounds; returns the offenders.
    fn check_site_bounds(&self, site: &Site) -> Vec<SiteParameterName> {
        let mut outside = Vec::new();
        for (name, bounds) in self.site_parameter_bounds() {
            let Some(value) = site.parameter_value(name) else {
                continue;
            };
            if !bounds.contains(value) {
                warn!(model = self.name(), parameter = %name, value, min = bounds.min, max = bounds.max,
                      "site parameter outside ground-motion model bounds");
                outside.push(name);
            }
        }
        outside
    }
}
