use serde::{
    Deserialize,
    Serialize
};
use tracing::{
    debug,
    info
};

use crate::calc::calcerror::CalcError;
use crate::calc::collaborators::Collaborators;
use crate::calc::intensitymeasure::IntensityMeasure;
use crate::calc::magdistcutoff::MagDistCutoff;
use crate::calc::ruptureforecast::{
    OptionValue,
    INCLUDE_BACKGROUND_SEISMICITY
};
use crate::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;
use crate::math::function::discretizedfunction::DiscretizedFunction;
use crate::math::function::point2d::Point2D;
use crate::site::site::Site;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardCurveSettings {
    pub min_iml: f64,
    pub max_iml: f64,
    pub num_points: usize,
    /// Forecast duration in years.
    pub duration: f64,
    pub include_background_seismicity: bool
}

impl Default for HazardCurveSettings {
    fn default() -> Self {
        HazardCurveSettings {
            min_iml: 1e-4,
            max_iml: 10.0,
            num_points: 101,
            duration: 50.0,
            include_background_seismicity: true
        }
    }
}

impl HazardCurveSettings {
    pub fn validate(&self) -> Result<(), CalcError> {
        if !(self.min_iml > 0.0 && self.min_iml.is_finite()) {
            return Err(CalcError::InvalidSettings(format!("min_iml ({}) must be positive", self.min_iml)));
        }
        if !(self.max_iml > self.min_iml && self.max_iml.is_finite()) {
            return Err(CalcError::InvalidSettings(format!(
                "max_iml ({}) must exceed min_iml ({})", self.max_iml, self.min_iml
            )));
        }
        if self.num_points < 2 {
            return Err(CalcError::InvalidSettings(format!("num_points ({}) must be at least 2", self.num_points)));
        }
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(CalcError::InvalidSettings(format!("duration ({}) must be positive", self.duration)));
        }
        Ok(())
    }
}

/// Stage-one output, handed unchanged to disaggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardCurveResult {
    curve: ArbitrarilyDiscretizedFunc,
    site: Site,
    intensity_measure: IntensityMeasure,
    duration: f64,
    max_source_distance: f64,
    mag_dist_cutoff: MagDistCutoff
}

impl HazardCurveResult {
    /// IML (linear) -> exceedance probability.
    pub fn curve(&self) -> &ArbitrarilyDiscretizedFunc {
        &self.curve
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn intensity_measure(&self) -> IntensityMeasure {
        self.intensity_measure
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn max_source_distance(&self) -> f64 {
        self.max_source_distance
    }

    pub fn mag_dist_cutoff(&self) -> &MagDistCutoff {
        &self.mag_dist_cutoff
    }

    pub fn points(&self) -> &[Point2D] {
        self.curve.points()
    }
}

pub struct HazardCurveEngine {
    settings: HazardCurveSettings
}

impl HazardCurveEngine {
    pub fn new(settings: HazardCurveSettings) -> Result<HazardCurveEngine, CalcError> {
        settings.validate()?;
        Ok(HazardCurveEngine { settings })
    }

    pub fn settings(&self) -> &HazardCurveSettings {
        &self.settings
    }

    /// `num_points` x-values evenly spaced in ln(IML) between the configured
    /// bounds, each with y = 1.
    pub fn log_iml_grid(&self) -> ArbitrarilyDiscretizedFunc {
        let first = self.settings.min_iml.ln();
        let last = self.settings.max_iml.ln();
        let steps = self.settings.num_points - 1;
        let step = (last - first) / steps as f64;
        let mut grid: ArbitrarilyDiscretizedFunc = (0..=steps)
            .map(|i| (first + i as f64 * step, 1.0))
            .collect();
        grid.set_name("Hazard Curve");
        grid.set_info("ln(IML)");
        grid
    }

    pub fn compute(&self,
                   site: &Site,
                   intensity_measure: IntensityMeasure,
                   mag_dist_cutoff: MagDistCutoff,
                   collaborators: &mut Collaborators) -> Result<HazardCurveResult, CalcError> {
        if collaborators.gmms.is_empty() {
            return Err(CalcError::NoGroundMotionModel);
        }

        for (trt, gmm) in collaborators.gmms.iter_mut() {
            gmm.set_param_defaults();
            gmm.set_intensity_measure(&intensity_measure)?;
            gmm.set_site(site)?;
            let outside = gmm.check_site_bounds(site);
            debug!(model = gmm.name(), tectonic_region = %trt, warnings = outside.len(), "configured ground-motion model");
        }

        let forecast = collaborators.forecast.as_mut();
        forecast.set_option(
            INCLUDE_BACKGROUND_SEISMICITY,
            OptionValue::Bool(self.settings.include_background_seismicity)
        )?;
        forecast.set_duration(self.settings.duration)?;
        forecast.update_forecast()?;
        forecast.ensure_updated()?;
        info!(forecast = forecast.name(), sources = forecast.num_sources(), duration = self.settings.duration, "forecast updated");

        let calculator = collaborators.hazard_calculator.as_mut();
        calculator.set_mag_dist_cutoff(mag_dist_cutoff.clone());
        let grid = self.log_iml_grid();
        let log_curve = calculator.hazard_curve(&grid, site, &collaborators.gmms, collaborators.forecast.as_ref())?;
        self.check_curve(&log_curve)?;

        let curve = delog(&log_curve);
        check_finite(&curve, "hazard curve")?;
        info!(points = curve.size(), intensity_measure = %intensity_measure, "hazard curve computed");

        Ok(HazardCurveResult {
            curve,
            site: site.clone(),
            intensity_measure,
            duration: self.settings.duration,
            max_source_distance: calculator.max_source_distance(),
            mag_dist_cutoff
        })
    }

    fn check_curve(&self, curve: &ArbitrarilyDiscretizedFunc) -> Result<(), CalcError> {
        if curve.size() != self.settings.num_points {
            return Err(CalcError::CurveSizeMismatch {
                expected: self.settings.num_points,
                actual: curve.size()
            });
        }
        check_finite(curve, "log hazard curve")
    }
}

fn check_finite(curve: &ArbitrarilyDiscretizedFunc, what: &'static str) -> Result<(), CalcError> {
    match curve.iter().position(|pt| !pt.x().is_finite() || !pt.y().is_finite()) {
        Some(index) => Err(CalcError::NonFiniteValue { what, index }),
        None => Ok(()),
    }
}

/// Exponentiates every x-value, keeping y. Name and info carry over.
pub fn delog(log_curve: &ArbitrarilyDiscretizedFunc) -> ArbitrarilyDiscretizedFunc {
    let mut curve: ArbitrarilyDiscretizedFunc = log_curve
        .iter()
        .map(|pt| (pt.x().exp(), pt.y()))
        .collect();
    curve.set_name(log_curve.name());
    curve.set_info(log_curve.info());
    curve
}
