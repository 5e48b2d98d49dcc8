use crate::calc::disaggregationcalculator::{
    DisaggregationCalculator,
    DisaggregationPlotPublisher
};
use crate::calc::groundmotionmodel::GroundMotionModelMap;
use crate::calc::hazardcurvecalculator::HazardCurveCalculator;
use crate::calc::ruptureforecast::EarthquakeRuptureForecast;

/// The externally supplied models one request runs against. Built fresh
/// for every request and never shared.
pub struct Collaborators {
    pub gmms: GroundMotionModelMap,
    pub forecast: Box<dyn EarthquakeRuptureForecast>,
    pub hazard_calculator: Box<dyn HazardCurveCalculator>,
    pub disaggregation_calculator: Box<dyn DisaggregationCalculator>,
    pub plot_publisher: Option<Box<dyn DisaggregationPlotPublisher>>
}

impl Collaborators {
    pub fn new(gmms: GroundMotionModelMap,
               forecast: Box<dyn EarthquakeRuptureForecast>,
               hazard_calculator: Box<dyn HazardCurveCalculator>,
               disaggregation_calculator: Box<dyn DisaggregationCalculator>) -> Collaborators {
        Collaborators {
            gmms,
            forecast,
            hazard_calculator,
            disaggregation_calculator,
            plot_publisher: None
        }
    }

    pub fn with_plot_publisher(mut self, publisher: Box<dyn DisaggregationPlotPublisher>) -> Collaborators {
        self.plot_publisher = Some(publisher);
        self
    }

    /// GMM descriptions sorted by tectonic region for stable metadata.
    pub fn gmm_info(&self) -> String {
        let mut entries: Vec<_> = self.gmms.iter().collect();
        entries.sort_by_key(|(trt, _)| **trt);
        entries
            .iter()
            .map(|(trt, gmm)| format!("{}; Tectonic Region = {}", gmm.info(), trt))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
