use nalgebra::DMatrix;
use tracing::{
    debug,
    info
};

use crate::calc::calcerror::CalcError;
use crate::calc::collaborators::Collaborators;
use crate::calc::disaggregationcalculator::{
    DisaggregationBins,
    DisaggregationBreakdown,
    DisaggregationInput,
    SourceContribution
};
use crate::calc::hazardcurveengine::HazardCurveResult;
use crate::math::function::discretizedfunction::DiscretizedFunction;

/// Relative tolerance between the summed grid and the declared total.
pub const CONTRIBUTION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct DisaggregationResult {
    pub probability: f64,
    pub target_iml: f64,
    pub contributions: DMatrix<f64>,
    pub total: f64,
    pub mean_magnitude: f64,
    pub mean_distance: f64,
    pub modal_magnitude: f64,
    pub modal_distance: f64,
    pub sources: Vec<SourceContribution>,
    pub bins: DisaggregationBins,
    pub plot_address: Option<String>
}

impl DisaggregationResult {
    pub fn contribution_sum(&self) -> f64 {
        self.contributions.sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "Disaggregation Results for Prob = {} (for IML = {})\nMbar = {}\nDbar = {}\nM_mode = {}\nD_mode = {}",
            self.probability,
            self.target_iml as f32,
            self.mean_magnitude as f32,
            self.mean_distance as f32,
            self.modal_magnitude as f32,
            self.modal_distance as f32
        )
    }
}

pub struct DisaggregationEngine {
    bins: DisaggregationBins
}

impl DisaggregationEngine {
    pub fn new(bins: DisaggregationBins) -> Result<DisaggregationEngine, CalcError> {
        bins.validate()?;
        Ok(DisaggregationEngine { bins })
    }

    pub fn bins(&self) -> &DisaggregationBins {
        &self.bins
    }

    /// IML at which the curve reaches `probability`, by log-log inverse
    /// interpolation. Probabilities beyond the curve extrapolate.
    pub fn target_iml(&self, probability: f64, hazard: &HazardCurveResult) -> Result<f64, CalcError> {
        if !(probability.is_finite() && probability > 0.0) {
            return Err(CalcError::InvalidTargetProbability(probability));
        }
        let iml = hazard.curve().first_interpolated_x_in_log_x_log_y(probability)?;
        if !(iml.is_finite() && iml > 0.0) {
            return Err(CalcError::InvalidTargetIml { probability, iml });
        }
        Ok(iml)
    }

    pub fn disaggregate(&self,
                        probability: f64,
                        hazard: &HazardCurveResult,
                        collaborators: &mut Collaborators) -> Result<DisaggregationResult, CalcError> {
        let target_iml = self.target_iml(probability, hazard)?;
        info!(probability, target_iml, "disaggregating");

        collaborators.forecast.ensure_updated()?;
        let input = DisaggregationInput {
            ln_iml: target_iml.ln(),
            site: hazard.site(),
            gmms: &collaborators.gmms,
            forecast: collaborators.forecast.as_ref(),
            max_source_distance: hazard.max_source_distance(),
            mag_dist_cutoff: hazard.mag_dist_cutoff(),
            bins: &self.bins
        };
        let breakdown = collaborators.disaggregation_calculator.disaggregate(&input)?;
        self.check_breakdown(&breakdown)?;
        debug!(total = breakdown.total, mbar = breakdown.mean_magnitude, dbar = breakdown.mean_distance, "disaggregation grid accepted");

        let plot_address = match collaborators.plot_publisher.as_ref() {
            Some(publisher) => {
                let metadata = parameters_info(hazard, collaborators);
                let address = publisher.publish(&breakdown, &self.bins, &metadata)?;
                info!(address = %address, "disaggregation plot published");
                Some(address)
            },
            None => None,
        };

        Ok(self.to_result(probability, target_iml, breakdown, plot_address))
    }

    fn check_breakdown(&self, breakdown: &DisaggregationBreakdown) -> Result<(), CalcError> {
        let grid = &breakdown.contributions;
        if grid.nrows() != self.bins.num_mag || grid.ncols() != self.bins.num_dist {
            return Err(CalcError::GridShapeMismatch {
                expected_rows: self.bins.num_mag,
                expected_cols: self.bins.num_dist,
                actual_rows: grid.nrows(),
                actual_cols: grid.ncols()
            });
        }
        if let Some(index) = grid.iter().position(|v| !v.is_finite()) {
            return Err(CalcError::NonFiniteValue { what: "disaggregation grid", index });
        }
        let sum = grid.sum();
        let total = breakdown.total;
        if !total.is_finite() || (sum - total).abs() > CONTRIBUTION_TOLERANCE * total.abs().max(f64::MIN_POSITIVE) {
            return Err(CalcError::ContributionMismatch { sum, total });
        }
        Ok(())
    }

    fn to_result(&self,
                 probability: f64,
                 target_iml: f64,
                 breakdown: DisaggregationBreakdown,
                 plot_address: Option<String>) -> DisaggregationResult {
        let show_distances = self.bins.show_source_distances;
        let mut sources = breakdown.sources;
        sources.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        let sources = sources
            .into_iter()
            .take(self.bins.num_sources_to_show)
            .map(|source| SourceContribution {
                distance: if show_distances { source.distance } else { None },
                ..source
            })
            .collect();
        DisaggregationResult {
            probability,
            target_iml,
            contributions: breakdown.contributions,
            total: breakdown.total,
            mean_magnitude: breakdown.mean_magnitude,
            mean_distance: breakdown.mean_distance,
            modal_magnitude: breakdown.modal_magnitude,
            modal_distance: breakdown.modal_distance,
            sources,
            bins: self.bins.clone(),
            plot_address
        }
    }
}

fn section(title: &str, body: &str) -> String {
    format!("{}\n{}\n{}", title, "-".repeat(title.len()), body)
}

/// Plain-text description of every input behind a hazard result, attached
/// to published plots.
pub fn parameters_info(hazard: &HazardCurveResult, collaborators: &Collaborators) -> String {
    let sections = [
        "Calculation Type = Probabilistic".to_owned(),
        section("IMR Param List:", &collaborators.gmm_info()),
        section("Site Param List:", &hazard.site().info()),
        section("IMT Param List:", &hazard.intensity_measure().info()),
        section("Forecast Param List:", &collaborators.forecast.info()),
        section("TimeSpan Param List:", &format!("Duration = {}", hazard.duration())),
        section("Calculation Settings:", &collaborators.hazard_calculator.info()),
    ];
    sections.join("\n\n")
}
