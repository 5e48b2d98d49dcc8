//! Gaussian magnitude-frequency distribution, optionally truncated.
//!
//! The shape is a pure function of the grid and [`GaussianMagFreqDistParams`]
//! (see [`derive_rates`]). [`GaussianMagFreqDist`] only holds the result and
//! exposes it through the read-only [`DiscretizedFunction`] view; changing the
//! shape means recomputing from new parameters.

use serde::{
    Deserialize,
    Serialize
};

use crate::magdist::incrementalmagfreqdist::{
    scale_to_cum_rate,
    scale_to_total_moment_rate,
    IncrementalMagFreqDist
};
use crate::magdist::magfreqdisterror::MagFreqDistError;
use crate::magdist::magnitudegrid::MagnitudeGrid;
use crate::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;
use crate::math::function::discretizedfunction::DiscretizedFunction;
use crate::math::function::point2d::Point2D;

pub const NAME: &str = "Gaussian Dist";

/// Fraction of a bin width within which a zero-spread mean counts as on a bin.
const BIN_ALIGNMENT_TOLERANCE: f64 = 1e-9;

/// Truncation levels are in standard deviations from the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Truncation {
    None,
    Upper { level: f64 },
    TwoSided { level: f64 },
}

impl Truncation {
    fn level(&self) -> Option<f64> {
        match self {
            Truncation::None => None,
            Truncation::Upper { level } | Truncation::TwoSided { level } => Some(*level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Normalization {
    TotalMomentRate(f64),
    /// Cumulative rate at the first (lowest) magnitude bin.
    TotalCumulativeRate(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianMagFreqDistParams {
    pub mean: f64,
    pub std_dev: f64,
    pub truncation: Truncation,
    pub normalization: Normalization
}

impl GaussianMagFreqDistParams {
    fn validate(&self) -> Result<(), MagFreqDistError> {
        if !self.mean.is_finite() {
            return Err(MagFreqDistError::InvalidParameter {
                name: "mean",
                reason: format!("{} is not finite", self.mean),
            });
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(MagFreqDistError::InvalidParameter {
                name: "std_dev",
                reason: format!("{} must be finite and non-negative", self.std_dev),
            });
        }
        if let Some(level) = self.truncation.level() {
            if !level.is_finite() || level < 0.0 {
                return Err(MagFreqDistError::InvalidParameter {
                    name: "truncation_level",
                    reason: format!("{} must be finite and non-negative", level),
                });
            }
        }
        Ok(())
    }
}

/// Rates for every bin of `grid`, normalized as `params` requests.
pub fn derive_rates(grid: &MagnitudeGrid, params: &GaussianMagFreqDistParams) -> Result<Vec<f64>, MagFreqDistError> {
    params.validate()?;
    let mut rates = relative_rates(grid, params)?;
    match params.normalization {
        Normalization::TotalMomentRate(target) => scale_to_total_moment_rate(grid, &mut rates, target)?,
        Normalization::TotalCumulativeRate(target) => scale_to_cum_rate(&mut rates, target)?,
    }
    Ok(rates)
}

fn relative_rates(grid: &MagnitudeGrid, params: &GaussianMagFreqDistParams) -> Result<Vec<f64>, MagFreqDistError> {
    let mean = params.mean;
    let std_dev = params.std_dev;

    if std_dev == 0.0 {
        let mut rates = vec![0.0; grid.num()];
        let index = grid
            .aligned_index(mean, BIN_ALIGNMENT_TOLERANCE)
            .ok_or(MagFreqDistError::MeanNotOnGrid { mean })?;
        rates[index] = 1.0;
        return Ok(rates);
    }

    let mut rates: Vec<f64> = grid
        .magnitudes()
        .map(|mag| (-(mag - mean).powi(2) / (2.0 * std_dev * std_dev)).exp())
        .collect();

    if let Some(level) = params.truncation.level() {
        // the cutoff bin itself keeps its rate
        let upper = grid.nearest_index(mean + level * std_dev);
        rates.iter_mut()
            .enumerate()
            .filter(|(i, _)| *i as i64 > upper)
            .for_each(|(_, rate)| *rate = 0.0);
    }

    if let Truncation::TwoSided { level } = params.truncation {
        let lower = grid.nearest_index(mean - level * std_dev);
        rates.iter_mut()
            .enumerate()
            .filter(|(i, _)| (*i as i64) < lower)
            .for_each(|(_, rate)| *rate = 0.0);
    }

    Ok(rates)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMagFreqDist {
    params: GaussianMagFreqDistParams,
    dist: IncrementalMagFreqDist
}

impl GaussianMagFreqDist {
    pub fn new(grid: MagnitudeGrid, params: GaussianMagFreqDistParams) -> Result<GaussianMagFreqDist, MagFreqDistError> {
        let rates = derive_rates(&grid, &params)?;
        Ok(GaussianMagFreqDist {
            params,
            dist: IncrementalMagFreqDist::from_rates(grid, &rates),
        })
    }

    /// Rederives the rates on the same grid. On error the distribution is
    /// left unchanged.
    pub fn recompute(&mut self, params: GaussianMagFreqDistParams) -> Result<(), MagFreqDistError> {
        let grid = *self.dist.grid();
        let rates = derive_rates(&grid, &params)?;
        self.dist = IncrementalMagFreqDist::from_rates(grid, &rates);
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &GaussianMagFreqDistParams {
        &self.params
    }

    pub fn mean(&self) -> f64 {
        self.params.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.params.std_dev
    }

    pub fn truncation(&self) -> Truncation {
        self.params.truncation
    }

    pub fn distribution(&self) -> &IncrementalMagFreqDist {
        &self.dist
    }

    pub fn total_moment_rate(&self) -> f64 {
        self.dist.total_moment_rate()
    }

    pub fn total_incremental_rate(&self) -> f64 {
        self.dist.total_incremental_rate()
    }

    pub fn cum_rate(&self, index: usize) -> f64 {
        self.dist.cum_rate(index)
    }

    pub fn cumulative_distribution(&self) -> ArbitrarilyDiscretizedFunc {
        self.dist.cumulative_distribution()
    }

    pub fn name(&self) -> &'static str {
        NAME
    }

    pub fn info(&self) -> String {
        let grid = self.dist.grid();
        let (trunc_type, trunc_level) = match self.params.truncation {
            Truncation::None => ("None", f64::NAN),
            Truncation::Upper { level } => ("Upper", level),
            Truncation::TwoSided { level } => ("TwoSided", level),
        };
        format!(
            "minMag={}; maxMag={}; numMag={}; mean={}; stdDev={}; totMoRate={}; totCumRate={}; truncType={}; truncLevel={}",
            grid.min(),
            grid.max(),
            grid.num(),
            self.params.mean,
            self.params.std_dev,
            self.total_moment_rate() as f32,
            self.cum_rate(0) as f32,
            trunc_type,
            trunc_level
        )
    }
}

impl DiscretizedFunction for GaussianMagFreqDist {
    fn points(&self) -> &[Point2D] {
        self.dist.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::magdist::incrementalmagfreqdist::mag_to_moment;

    fn grid() -> MagnitudeGrid {
        MagnitudeGrid::from_min_num_delta(5.0, 41, 0.1).unwrap()
    }

    fn params(truncation: Truncation, normalization: Normalization) -> GaussianMagFreqDistParams {
        GaussianMagFreqDistParams { mean: 7.0, std_dev: 0.25, truncation, normalization }
    }

    #[test]
    fn test_untruncated_matches_total_moment_rate() {
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::None, Normalization::TotalMomentRate(1.0e18))).unwrap();
        let moment: f64 = mfd.iter().map(|pt| pt.y() * mag_to_moment(pt.x())).sum();
        assert_relative_eq!(moment, 1.0e18, max_relative = 1e-10);
        assert_relative_eq!(mfd.total_moment_rate(), 1.0e18, max_relative = 1e-10);
    }

    #[test]
    fn test_untruncated_shape_is_gaussian() {
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::None, Normalization::TotalCumulativeRate(1.0))).unwrap();
        let peak = mfd.y(20).unwrap();
        // M7.2 is 0.8 sigma above the mean
        assert_relative_eq!(mfd.y(22).unwrap() / peak, (-0.32_f64).exp(), max_relative = 1e-9);
        assert!(mfd.iter().all(|pt| pt.y() > 0.0));
        assert_relative_eq!(mfd.max_y().unwrap(), peak);
    }

    #[test]
    fn test_cumulative_rate_normalization() {
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::None, Normalization::TotalCumulativeRate(0.05))).unwrap();
        assert_relative_eq!(mfd.cum_rate(0), 0.05, max_relative = 1e-12);
        assert_relative_eq!(mfd.cumulative_distribution().max_y().unwrap(), 0.05, max_relative = 1e-12);
        assert_relative_eq!(mfd.total_incremental_rate(), 0.05, max_relative = 1e-12);
    }

    #[test]
    fn test_upper_truncation_zeroes_bins_above_cutoff() {
        // cutoff 7.0 + 2 * 0.25 = 7.5 -> bin 25
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::Upper { level: 2.0 }, Normalization::TotalCumulativeRate(1.0))).unwrap();
        for (i, pt) in mfd.iter().enumerate() {
            if i > 25 {
                assert_eq!(pt.y(), 0.0, "bin {} at M{} should be zero", i, pt.x());
            } else {
                assert!(pt.y() > 0.0, "bin {} at M{} should be positive", i, pt.x());
            }
        }
    }

    #[test]
    fn test_two_sided_truncation() {
        // cutoffs 6.5 (bin 15) and 7.5 (bin 25)
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::TwoSided { level: 2.0 }, Normalization::TotalCumulativeRate(1.0))).unwrap();
        let rates = mfd.y_values();
        assert!(rates[..15].iter().all(|&r| r == 0.0));
        assert!(rates[15..=25].iter().all(|&r| r > 0.0));
        assert!(rates[26..].iter().all(|&r| r == 0.0));
        assert_relative_eq!(mfd.cum_rate(0), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_upper_cutoff_rounds_to_nearest_bin() {
        // cutoff 7.0 + 1.3 * 0.25 = 7.325 -> bin 23.25 rounds to 23
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::Upper { level: 1.3 }, Normalization::TotalCumulativeRate(1.0))).unwrap();
        assert!(mfd.y(23).unwrap() > 0.0);
        assert_eq!(mfd.y(24).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_sigma_on_grid() {
        let p = GaussianMagFreqDistParams {
            mean: 6.3,
            std_dev: 0.0,
            truncation: Truncation::None,
            normalization: Normalization::TotalCumulativeRate(0.2),
        };
        let mfd = GaussianMagFreqDist::new(grid(), p).unwrap();
        let nonzero: Vec<usize> = mfd.iter().enumerate().filter(|(_, pt)| pt.y() != 0.0).map(|(i, _)| i).collect();
        assert_eq!(nonzero, vec![13]);
        assert_relative_eq!(mfd.y(13).unwrap(), 0.2, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_sigma_off_grid_fails() {
        let p = GaussianMagFreqDistParams {
            mean: 6.35,
            std_dev: 0.0,
            truncation: Truncation::None,
            normalization: Normalization::TotalMomentRate(1.0e18),
        };
        assert_eq!(GaussianMagFreqDist::new(grid(), p), Err(MagFreqDistError::MeanNotOnGrid { mean: 6.35 }));
    }

    #[test]
    fn test_negative_sigma_rejected() {
        let mut p = params(Truncation::None, Normalization::TotalCumulativeRate(1.0));
        p.std_dev = -0.1;
        assert!(matches!(
            GaussianMagFreqDist::new(grid(), p),
            Err(MagFreqDistError::InvalidParameter { name: "std_dev", .. })
        ));
    }

    #[test]
    fn test_truncation_below_grid_leaves_nothing_to_scale() {
        let p = GaussianMagFreqDistParams {
            mean: 3.0,
            std_dev: 0.1,
            truncation: Truncation::Upper { level: 1.0 },
            normalization: Normalization::TotalCumulativeRate(1.0),
        };
        assert_eq!(GaussianMagFreqDist::new(grid(), p), Err(MagFreqDistError::ZeroRateTotal));
    }

    #[test]
    fn test_recompute_changes_shape() {
        let mut mfd = GaussianMagFreqDist::new(grid(), params(Truncation::None, Normalization::TotalCumulativeRate(1.0))).unwrap();
        let before = mfd.y_values();
        let mut p = *mfd.params();
        p.mean = 6.0;
        mfd.recompute(p).unwrap();
        assert_eq!(mfd.mean(), 6.0);
        assert_ne!(mfd.y_values(), before);
        assert_eq!(mfd.size(), 41);
        assert_relative_eq!(mfd.closest_x_to_y(mfd.max_y().unwrap()).unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_failed_recompute_keeps_previous_shape() {
        let mut mfd = GaussianMagFreqDist::new(grid(), params(Truncation::None, Normalization::TotalCumulativeRate(1.0))).unwrap();
        let before = mfd.clone();
        let mut p = *mfd.params();
        p.std_dev = 0.0;
        p.mean = 6.05;
        assert!(mfd.recompute(p).is_err());
        assert_eq!(mfd, before);
    }

    #[test]
    fn test_info_string() {
        let mfd = GaussianMagFreqDist::new(grid(), params(Truncation::Upper { level: 2.0 }, Normalization::TotalCumulativeRate(1.0))).unwrap();
        let info = mfd.info();
        assert!(info.starts_with("minMag=5; maxMag="));
        assert!(info.contains("mean=7; stdDev=0.25"));
        assert!(info.contains("truncType=Upper; truncLevel=2"));
        assert_eq!(mfd.name(), "Gaussian Dist");
    }
}
