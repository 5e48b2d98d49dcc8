use crate::magdist::magfreqdisterror::MagFreqDistError;
use crate::magdist::magnitudegrid::MagnitudeGrid;
use crate::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;
use crate::math::function::discretizedfunction::DiscretizedFunction;
use crate::math::function::point2d::Point2D;

/// Seismic moment (N·m) of a moment magnitude.
pub fn mag_to_moment(mag: f64) -> f64 {
    10.0_f64.powf(1.5 * mag + 9.05)
}

/// Incremental occurrence rates on a magnitude grid.
///
/// Read-only: values are fixed at construction, which is crate-private so the
/// only way to obtain one is through a derivation procedure such as the
/// Gaussian one.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementalMagFreqDist {
    grid: MagnitudeGrid,
    points: Vec<Point2D>
}

impl IncrementalMagFreqDist {
    pub(crate) fn from_rates(grid: MagnitudeGrid, rates: &[f64]) -> IncrementalMagFreqDist {
        let points = grid.magnitudes()
            .zip(rates.iter())
            .map(|(mag, &rate)| Point2D::new(mag, rate))
            .collect();
        IncrementalMagFreqDist { grid, points }
    }

    pub fn grid(&self) -> &MagnitudeGrid {
        &self.grid
    }

    pub fn rate(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|pt| pt.y())
    }

    pub fn total_incremental_rate(&self) -> f64 {
        self.points.iter().map(|pt| pt.y()).sum()
    }

    pub fn total_moment_rate(&self) -> f64 {
        total_moment_rate(&self.grid, &self.rates())
    }

    /// Rate of events at or above the magnitude of bin `index`.
    pub fn cum_rate(&self, index: usize) -> f64 {
        self.points.iter().skip(index).map(|pt| pt.y()).sum()
    }

    pub fn cumulative_distribution(&self) -> ArbitrarilyDiscretizedFunc {
        let mut func = ArbitrarilyDiscretizedFunc::with_name("Cumulative MFD");
        let mut running = 0.0;
        for pt in self.points.iter().rev() {
            running += pt.y();
            func.set(pt.x(), running);
        }
        func
    }

    pub fn rates(&self) -> Vec<f64> {
        self.y_values()
    }
}

impl DiscretizedFunction for IncrementalMagFreqDist {
    fn points(&self) -> &[Point2D] {
        &self.points
    }
}

pub(crate) fn total_moment_rate(grid: &MagnitudeGrid, rates: &[f64]) -> f64 {
    grid.magnitudes()
        .zip(rates.iter())
        .map(|(mag, rate)| rate * mag_to_moment(mag))
        .sum()
}

pub(crate) fn scale_to_total_moment_rate(grid: &MagnitudeGrid, rates: &mut [f64], target: f64) -> Result<(), MagFreqDistError> {
    let current = total_moment_rate(grid, rates);
    scale(rates, current, target)
}

/// Scales so the cumulative rate at the first bin equals `target`.
pub(crate) fn scale_to_cum_rate(rates: &mut [f64], target: f64) -> Result<(), MagFreqDistError> {
    let current: f64 = rates.iter().sum();
    scale(rates, current, target)
}

fn scale(rates: &mut [f64], current: f64, target: f64) -> Result<(), MagFreqDistError> {
    if current == 0.0 || !current.is_finite() {
        return Err(MagFreqDistError::ZeroRateTotal);
    }
    let factor = target / current;
    rates.iter_mut().for_each(|rate| *rate *= factor);
    Ok(())
}
