use crate::calc::calcerror::CalcError;
use crate::calc::groundmotionmodel::GroundMotionModelMap;
use crate::calc::magdistcutoff::MagDistCutoff;
use crate::calc::ruptureforecast::EarthquakeRuptureForecast;
use crate::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;
use crate::site::site::Site;

/// Aggregates rupture-by-rupture exceedance probabilities into a curve.
pub trait HazardCurveCalculator {
    fn name(&self) -> &str;

    fn set_mag_dist_cutoff(&mut self, cutoff: MagDistCutoff);

    fn mag_dist_cutoff(&self) -> &MagDistCutoff;

    /// Sources farther than this (km) are ignored.
    fn max_source_distance(&self) -> f64;

    /// Fills the y-values of `log_iml_grid` (x = ln IML) with exceedance
    /// probabilities and returns the completed curve.
    fn hazard_curve(&mut self,
                    log_iml_grid: &ArbitrarilyDiscretizedFunc,
                    site: &Site,
                    gmms: &GroundMotionModelMap,
                    forecast: &dyn EarthquakeRuptureForecast) -> Result<ArbitrarilyDiscretizedFunc, CalcError>;

    fn info(&self) -> String {
        format!("Maximum Distance = {}", self.max_source_distance())
    }
}
