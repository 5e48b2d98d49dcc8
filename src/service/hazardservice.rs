use std::collections::HashMap;

use tracing::{
    info,
    info_span
};

use crate::calc::collaborators::Collaborators;
use crate::calc::disaggregationcalculator::DisaggregationBins;
use crate::calc::disaggregationengine::{
    DisaggregationEngine,
    DisaggregationResult
};
use crate::calc::hazardcurveengine::{
    HazardCurveEngine,
    HazardCurveResult,
    HazardCurveSettings
};
use crate::calc::intensitymeasure::IntensityMeasure;
use crate::calc::magdistcutoff::MagDistCutoff;
use crate::configuration::Configuration;
use crate::manager::manager::IManager;
use crate::service::hazardrequest::HazardRequest;
use crate::service::hazardresponse::HazardResponse;
use crate::service::serviceerror::ServiceError;
use crate::site::site::{
    Site,
    SiteWarningBounds,
    Vs30Type
};

/// Hazard curve and optional disaggregation for one site per request.
pub struct HazardService {
    hazard_engine: HazardCurveEngine,
    disaggregation_engine: DisaggregationEngine,
    mag_dist_cutoff: MagDistCutoff,
    site_warning_bounds: SiteWarningBounds
}

/// Both stages of a handled request, before conversion to the response body.
pub struct HazardOutcome {
    pub hazard: HazardCurveResult,
    pub disaggregation: Option<DisaggregationResult>
}

impl HazardOutcome {
    pub fn to_response(&self) -> HazardResponse {
        let mut response = HazardResponse::from_curve(self.hazard.curve());
        response.disagg_web_addr = self.disaggregation
            .as_ref()
            .and_then(|result| result.plot_address.clone());
        response
    }
}

impl HazardService {
    pub fn new(settings: HazardCurveSettings,
               bins: DisaggregationBins,
               mag_dist_cutoff: MagDistCutoff,
               site_warning_bounds: SiteWarningBounds) -> Result<HazardService, ServiceError> {
        Ok(HazardService {
            hazard_engine: HazardCurveEngine::new(settings)?,
            disaggregation_engine: DisaggregationEngine::new(bins)?,
            mag_dist_cutoff,
            site_warning_bounds
        })
    }

    /// Service using the named cutoff and disaggregation profile.
    pub fn from_configuration(configuration: &Configuration,
                              mag_dist_cutoff_name: &str,
                              disaggregation_profile_name: &str) -> Result<HazardService, ServiceError> {
        let mag_dist_cutoff = configuration.mag_dist_cutoff_manager().get(mag_dist_cutoff_name)?;
        let bins = configuration.disaggregation_profile_manager().get(disaggregation_profile_name)?;
        HazardService::new(
            configuration.hazard_curve().clone(),
            bins,
            mag_dist_cutoff,
            *configuration.site_warning_bounds()
        )
    }

    pub fn site_for(&self, request: &HazardRequest) -> Site {
        let site = Site::new(*request.location(), request.vs30(), Vs30Type::Inferred, request.z1pt0());
        self.site_warning_bounds.check(&site);
        site
    }

    pub fn run(&self,
               request: &HazardRequest,
               collaborators: &mut Collaborators) -> Result<HazardOutcome, ServiceError> {
        let span = info_span!("hazard_request", id = %request.id());
        let _enter = span.enter();

        let site = self.site_for(request);
        let intensity_measure = IntensityMeasure::sa(request.period())?;
        info!(location = %site.location(), vs30 = site.vs30(), z1pt0 = site.depth_1pt0(), intensity_measure = %intensity_measure, "hazard request");

        let hazard = self.hazard_engine.compute(&site, intensity_measure, self.mag_dist_cutoff.clone(), collaborators)?;
        let disaggregation = match request.disagg_value() {
            Some(probability) => Some(self.disaggregation_engine.disaggregate(probability, &hazard, collaborators)?),
            None => None,
        };
        Ok(HazardOutcome { hazard, disaggregation })
    }

    pub fn handle(&self,
                  request: &HazardRequest,
                  collaborators: &mut Collaborators) -> Result<HazardResponse, ServiceError> {
        self.run(request, collaborators).map(|outcome| outcome.to_response())
    }

    /// Parses raw query parameters, then handles the request. Parse failures
    /// return before any collaborator is touched.
    pub fn handle_params(&self,
                         params: &HashMap<String, String>,
                         collaborators: &mut Collaborators) -> Result<String, ServiceError> {
        let request = HazardRequest::from_params(params)?;
        let response = self.handle(&request, collaborators)?;
        Ok(response.to_json()?)
    }
}
