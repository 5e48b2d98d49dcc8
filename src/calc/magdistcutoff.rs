use serde::{
    Deserialize,
    Serialize
};

use crate::calc::calcerror::CalcError;
use crate::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;

const DEFAULT_DISTANCES: [f64; 6] = [-1e-16, 40.0, 80.0, 150.0, 250.0, 500.0];
const DEFAULT_MAGNITUDES: [f64; 6] = [0.0, 5.0, 6.0, 7.0, 8.0, 9.0];

/// Unvalidated (distances, magnitudes) as read from JSON.
#[derive(Deserialize)]
pub struct MagDistCutoffJsonProp {
    pub distances: Vec<f64>,
    pub magnitudes: Vec<f64>
}

/// Minimum magnitude worth considering as a function of source distance (km).
///
/// A monotone step function over strictly increasing distances with
/// non-decreasing magnitudes. A distance `d` falls on the step of the first
/// cutoff distance `>= d`; past the last distance every source is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MagDistCutoffJsonProp")]
pub struct MagDistCutoff {
    distances: Vec<f64>,
    magnitudes: Vec<f64>
}

impl TryFrom<MagDistCutoffJsonProp> for MagDistCutoff {
    type Error = CalcError;

    fn try_from(prop: MagDistCutoffJsonProp) -> Result<Self, Self::Error> {
        MagDistCutoff::new(prop.distances, prop.magnitudes)
    }
}

impl Default for MagDistCutoff {
    fn default() -> Self {
        MagDistCutoff {
            distances: DEFAULT_DISTANCES.to_vec(),
            magnitudes: DEFAULT_MAGNITUDES.to_vec()
        }
    }
}

impl MagDistCutoff {
    pub fn new(distances: Vec<f64>, magnitudes: Vec<f64>) -> Result<MagDistCutoff, CalcError> {
        if distances.is_empty() {
            return Err(CalcError::InvalidCutoff("at least one (distance, magnitude) pair is required".to_owned()));
        }
        if distances.len() != magnitudes.len() {
            return Err(CalcError::InvalidCutoff(format!(
                "{} distances but {} magnitudes", distances.len(), magnitudes.len()
            )));
        }
        if distances.iter().chain(magnitudes.iter()).any(|v| !v.is_finite()) {
            return Err(CalcError::InvalidCutoff("values must be finite".to_owned()));
        }
        if distances.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CalcError::InvalidCutoff("distances must be strictly increasing".to_owned()));
        }
        if magnitudes.windows(2).any(|w| w[1] < w[0]) {
            return Err(CalcError::InvalidCutoff("magnitudes must be non-decreasing".to_owned()));
        }
        Ok(MagDistCutoff { distances, magnitudes })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<MagDistCutoff, CalcError> {
        let (distances, magnitudes) = pairs.iter().copied().unzip();
        MagDistCutoff::new(distances, magnitudes)
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn max_distance(&self) -> f64 {
        self.distances[self.distances.len() - 1]
    }

    /// With the default steps the leading `(-1e-16, 0.0)` pair only covers
    /// negative distances, so every source within 40 km needs at least M5.
    pub fn min_magnitude_at(&self, distance: f64) -> Option<f64> {
        let index = self.distances.partition_point(|&d| d < distance);
        self.magnitudes.get(index).copied()
    }

    /// True when a source at `distance` whose largest magnitude is
    /// `max_magnitude` contributes nothing above the cutoff.
    pub fn skips(&self, distance: f64, max_magnitude: f64) -> bool {
        match self.min_magnitude_at(distance) {
            Some(min_magnitude) => max_magnitude < min_magnitude,
            None => true,
        }
    }

    pub fn to_function(&self) -> ArbitrarilyDiscretizedFunc {
        let mut func: ArbitrarilyDiscretizedFunc = self.distances
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
            .collect();
        func.set_name("Mag-Distance Cutoff");
        func
    }
}
