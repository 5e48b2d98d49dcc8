use nalgebra::DMatrix;
use serde::{
    Deserialize,
    Serialize
};

use crate::calc::calcerror::CalcError;
use crate::calc::groundmotionmodel::GroundMotionModelMap;
use crate::calc::magdistcutoff::MagDistCutoff;
use crate::calc::ruptureforecast::EarthquakeRuptureForecast;
use crate::site::site::Site;

/// Magnitude x distance binning and reporting options.
///
/// Bin `i` is centred on `min + i * delta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisaggregationBins {
    pub min_mag: f64,
    pub delta_mag: f64,
    pub num_mag: usize,
    pub min_dist: f64,
    pub delta_dist: f64,
    pub num_dist: usize,
    pub num_sources_to_show: usize,
    pub show_source_distances: bool,
    pub max_z_axis: f64
}

impl Default for DisaggregationBins {
    fn default() -> Self {
        DisaggregationBins {
            min_mag: 5.0,
            delta_mag: 0.25,
            num_mag: 14,
            min_dist: 0.1,
            delta_dist: 10.0,
            num_dist: 15,
            num_sources_to_show: 100,
            show_source_distances: false,
            max_z_axis: 50.0
        }
    }
}

impl DisaggregationBins {
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.num_mag == 0 || self.num_dist == 0 {
            return Err(CalcError::InvalidBins("bin counts must be positive".to_owned()));
        }
        for (name, value) in [("min_mag", self.min_mag), ("min_dist", self.min_dist)] {
            if !value.is_finite() {
                return Err(CalcError::InvalidBins(format!("{} ({}) must be finite", name, value)));
            }
        }
        for (name, value) in [("delta_mag", self.delta_mag), ("delta_dist", self.delta_dist), ("max_z_axis", self.max_z_axis)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::InvalidBins(format!("{} ({}) must be positive", name, value)));
            }
        }
        Ok(())
    }

    pub fn magnitude(&self, index: usize) -> f64 {
        self.min_mag + index as f64 * self.delta_mag
    }

    pub fn distance(&self, index: usize) -> f64 {
        self.min_dist + index as f64 * self.delta_dist
    }

    pub fn magnitude_index(&self, magnitude: f64) -> Option<usize> {
        bin_index(self.min_mag, self.delta_mag, self.num_mag, magnitude)
    }

    pub fn distance_index(&self, distance: f64) -> Option<usize> {
        bin_index(self.min_dist, self.delta_dist, self.num_dist, distance)
    }
}

fn bin_index(min: f64, delta: f64, num: usize, value: f64) -> Option<usize> {
    let position = ((value - min) / delta).round();
    (position >= 0.0 && position < num as f64).then_some(position as usize)
}

/// Everything a disaggregation collaborator needs for one evaluation.
pub struct DisaggregationInput<'a> {
    pub ln_iml: f64,
    pub site: &'a Site,
    pub gmms: &'a GroundMotionModelMap,
    pub forecast: &'a dyn EarthquakeRuptureForecast,
    pub max_source_distance: f64,
    pub mag_dist_cutoff: &'a MagDistCutoff,
    pub bins: &'a DisaggregationBins
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    pub source_name: String,
    /// Percent of the total exceedance.
    pub percent: f64,
    pub distance: Option<f64>
}

/// Contribution grid (magnitude rows x distance columns) and its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DisaggregationBreakdown {
    pub contributions: DMatrix<f64>,
    pub total: f64,
    pub mean_magnitude: f64,
    pub mean_distance: f64,
    pub modal_magnitude: f64,
    pub modal_distance: f64,
    pub sources: Vec<SourceContribution>
}

impl DisaggregationBreakdown {
    /// Derives the total, means and mode from a contribution grid laid out on `bins`.
    pub fn from_grid(contributions: DMatrix<f64>,
                     bins: &DisaggregationBins,
                     sources: Vec<SourceContribution>) -> DisaggregationBreakdown {
        let total = contributions.sum();
        let mut mean_magnitude = 0.0;
        let mut mean_distance = 0.0;
        let mut modal = (0, 0);
        let mut modal_value = f64::NEG_INFINITY;
        for row in 0..contributions.nrows() {
            for col in 0..contributions.ncols() {
                let value = contributions[(row, col)];
                mean_magnitude += value * bins.magnitude(row);
                mean_distance += value * bins.distance(col);
                if value > modal_value {
                    modal_value = value;
                    modal = (row, col);
                }
            }
        }
        if total != 0.0 {
            mean_magnitude /= total;
            mean_distance /= total;
        }
        DisaggregationBreakdown {
            contributions,
            total,
            mean_magnitude,
            mean_distance,
            modal_magnitude: bins.magnitude(modal.0),
            modal_distance: bins.distance(modal.1),
            sources
        }
    }

    pub fn mean_and_mode_info(&self) -> String {
        format!(
            "Mbar = {}\nDbar = {}\nM_mode = {}\nD_mode = {}",
            self.mean_magnitude as f32,
            self.mean_distance as f32,
            self.modal_magnitude as f32,
            self.modal_distance as f32
        )
    }

    /// One "dist mag contribution" line per non-empty bin.
    pub fn bin_data(&self, bins: &DisaggregationBins) -> String {
        let mut data = String::from("Dist\tMag\tContribution\n");
        for row in 0..self.contributions.nrows() {
            for col in 0..self.contributions.ncols() {
                let value = self.contributions[(row, col)];
                if value != 0.0 {
                    data.push_str(&format!("{}\t{}\t{}\n", bins.distance(col), bins.magnitude(row), value));
                }
            }
        }
        data
    }
}

/// Decomposes exceedance at one IML into magnitude x distance contributions.
pub trait DisaggregationCalculator {
    fn name(&self) -> &str;

    fn disaggregate(&mut self, input: &DisaggregationInput<'_>) -> Result<DisaggregationBreakdown, CalcError>;
}

/// Renders a breakdown somewhere and returns where it can be found.
pub trait DisaggregationPlotPublisher {
    fn publish(&self,
               breakdown: &DisaggregationBreakdown,
               bins: &DisaggregationBins,
               metadata: &str) -> Result<String, CalcError>;
}
