#![allow(dead_code)]

use std::cell::{
    Cell,
    RefCell
};
use std::collections::HashMap;
use std::rc::Rc;

use nalgebra::DMatrix;

use seishaz::calc::calcerror::CalcError;
use seishaz::calc::collaborators::Collaborators;
use seishaz::calc::disaggregationcalculator::{
    DisaggregationBins,
    DisaggregationBreakdown,
    DisaggregationCalculator,
    DisaggregationInput,
    DisaggregationPlotPublisher,
    SourceContribution
};
use seishaz::calc::groundmotionmodel::{
    GroundMotionModel,
    GroundMotionModelMap
};
use seishaz::calc::hazardcurvecalculator::HazardCurveCalculator;
use seishaz::calc::intensitymeasure::IntensityMeasure;
use seishaz::calc::magdistcutoff::MagDistCutoff;
use seishaz::calc::ruptureforecast::{
    EarthquakeRuptureForecast,
    EqkRupture,
    OptionValue,
    INCLUDE_BACKGROUND_SEISMICITY
};
use seishaz::calc::tectonicregiontype::TectonicRegionType;
use seishaz::geo::location::Location;
use seishaz::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;
use seishaz::math::function::discretizedfunction::DiscretizedFunction;
use seishaz::site::site::{
    ParameterBounds,
    Site,
    SiteParameterName
};

pub fn wellington_params() -> HashMap<String, String> {
    [("lat", "-41.3"), ("lon", "174.8"), ("vs30", "250"), ("z1pt0", "320"), ("period", "1.0")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Log-logistic ground-motion model: median grows with magnitude and decays
/// with distance, softer sites amplify.
pub struct FakeGmm {
    period: Option<f64>,
    site: Option<Site>,
    pub max_period: f64
}

impl FakeGmm {
    pub fn new() -> FakeGmm {
        FakeGmm { period: None, site: None, max_period: 10.0 }
    }

    fn ln_median(&self, rupture: &EqkRupture, vs30: f64, distance: f64) -> f64 {
        let site_term = 0.3 * (760.0 / vs30).ln();
        let period_term = -0.4 * self.period.unwrap_or(0.0);
        -1.0 + 0.9 * (rupture.magnitude - 6.0) - 1.2 * ((distance + 10.0) / 10.0).ln() + site_term + period_term
    }
}

impl GroundMotionModel for FakeGmm {
    fn name(&self) -> &str {
        "Fake Log-Logistic (2024)"
    }

    fn set_param_defaults(&mut self) {
        self.period = None;
        self.site = None;
    }

    fn set_intensity_measure(&mut self, intensity_measure: &IntensityMeasure) -> Result<(), CalcError> {
        let period = intensity_measure.period().unwrap_or(0.0);
        if period > self.max_period {
            return Err(CalcError::collaborator(self.name(), format!("period {} not supported", period)));
        }
        self.period = Some(period);
        Ok(())
    }

    fn set_site(&mut self, site: &Site) -> Result<(), CalcError> {
        self.site = Some(site.clone());
        Ok(())
    }

    fn site_parameter_bounds(&self) -> Vec<(SiteParameterName, ParameterBounds)> {
        vec![(SiteParameterName::Vs30, ParameterBounds::new(150.0, 1500.0))]
    }

    fn exceedance_probability(&self, rupture: &EqkRupture, ln_iml: f64) -> Result<f64, CalcError> {
        let site = self.site
            .as_ref()
            .ok_or_else(|| CalcError::collaborator(self.name(), "site not set"))?;
        let distance = rupture.hypocenter.horizontal_distance(site.location());
        let z = (ln_iml - self.ln_median(rupture, site.vs30(), distance)) / 0.6;
        Ok(1.0 / (1.0 + (1.7 * z).exp()))
    }
}

struct FakeSource {
    name: &'static str,
    background: bool,
    annual_rate: f64,
    magnitudes: Vec<f64>,
    hypocenter: (f64, f64, f64)
}

/// Three sources around Wellington, one of them background seismicity.
pub struct FakeForecast {
    sources: Vec<FakeSource>,
    duration: f64,
    include_background: bool,
    updated: bool,
    pub update_count: Rc<Cell<usize>>
}

impl FakeForecast {
    pub fn new() -> FakeForecast {
        FakeForecast {
            sources: vec![
                FakeSource { name: "Wellington Hutt Valley", background: false, annual_rate: 0.002, magnitudes: vec![7.2, 7.5], hypocenter: (-41.25, 174.85, 8.0) },
                FakeSource { name: "Wairarapa", background: false, annual_rate: 0.001, magnitudes: vec![7.8, 8.1], hypocenter: (-41.4, 175.3, 10.0) },
                FakeSource { name: "Background", background: true, annual_rate: 0.05, magnitudes: vec![5.25, 5.75, 6.25], hypocenter: (-41.0, 174.5, 12.0) },
            ],
            duration: 1.0,
            include_background: false,
            updated: false,
            update_count: Rc::new(Cell::new(0))
        }
    }

    fn active_sources(&self) -> impl Iterator<Item = &FakeSource> {
        self.sources.iter().filter(move |s| self.include_background || !s.background)
    }
}

impl EarthquakeRuptureForecast for FakeForecast {
    fn name(&self) -> &str {
        "Fake Wellington ERF"
    }

    fn set_option(&mut self, name: &str, value: OptionValue) -> Result<(), CalcError> {
        match (name, value) {
            (INCLUDE_BACKGROUND_SEISMICITY, OptionValue::Bool(include)) => {
                self.include_background = include;
                self.updated = false;
                Ok(())
            },
            (other, _) => Err(CalcError::collaborator(self.name(), format!("unknown option {}", other))),
        }
    }

    fn set_duration(&mut self, years: f64) -> Result<(), CalcError> {
        self.duration = years;
        self.updated = false;
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn update_forecast(&mut self) -> Result<(), CalcError> {
        self.updated = true;
        self.update_count.set(self.update_count.get() + 1);
        Ok(())
    }

    fn is_updated(&self) -> bool {
        self.updated
    }

    fn num_sources(&self) -> usize {
        self.active_sources().count()
    }

    fn source_name(&self, source_index: usize) -> Result<String, CalcError> {
        self.active_sources()
            .nth(source_index)
            .map(|s| s.name.to_owned())
            .ok_or_else(|| CalcError::collaborator(self.name(), format!("no source {}", source_index)))
    }

    fn ruptures(&self, source_index: usize) -> Result<Vec<EqkRupture>, CalcError> {
        let source = self.active_sources()
            .nth(source_index)
            .ok_or_else(|| CalcError::collaborator(self.name(), format!("no source {}", source_index)))?;
        let (lat, lon, depth) = source.hypocenter;
        let hypocenter = Location::with_depth(lat, lon, depth).map_err(|e| CalcError::collaborator("fake", e))?;
        let rate = source.annual_rate / source.magnitudes.len() as f64;
        Ok(source.magnitudes
            .iter()
            .map(|&magnitude| EqkRupture {
                magnitude,
                probability: 1.0 - (-rate * self.duration).exp(),
                rake: 90.0,
                hypocenter,
                tectonic_region_type: TectonicRegionType::ActiveShallow
            })
            .collect())
    }

    fn options(&self) -> Vec<(String, OptionValue)> {
        vec![(INCLUDE_BACKGROUND_SEISMICITY.to_owned(), OptionValue::Bool(self.include_background))]
    }
}

/// Ruptures within reach of the site, paired with their source index.
fn contributing_ruptures(site: &Site,
                         forecast: &dyn EarthquakeRuptureForecast,
                         max_distance: f64,
                         cutoff: &MagDistCutoff) -> Result<Vec<(usize, f64, EqkRupture)>, CalcError> {
    let mut ruptures = Vec::new();
    for source in 0..forecast.num_sources() {
        for rupture in forecast.ruptures(source)? {
            let distance = rupture.hypocenter.horizontal_distance(site.location());
            if distance > max_distance || cutoff.skips(distance, rupture.magnitude) {
                continue;
            }
            ruptures.push((source, distance, rupture));
        }
    }
    Ok(ruptures)
}

fn gmm_for<'a>(gmms: &'a GroundMotionModelMap, rupture: &EqkRupture) -> Result<&'a dyn GroundMotionModel, CalcError> {
    gmms.get(&rupture.tectonic_region_type)
        .map(|gmm| gmm.as_ref())
        .ok_or(CalcError::MissingGroundMotionModel(rupture.tectonic_region_type))
}

/// Total probability of exceedance assuming independent ruptures.
pub struct FakeHazardCalculator {
    cutoff: MagDistCutoff,
    max_distance: f64
}

impl FakeHazardCalculator {
    pub fn new() -> FakeHazardCalculator {
        FakeHazardCalculator { cutoff: MagDistCutoff::default(), max_distance: 200.0 }
    }
}

impl HazardCurveCalculator for FakeHazardCalculator {
    fn name(&self) -> &str {
        "Fake Hazard Curve Calculator"
    }

    fn set_mag_dist_cutoff(&mut self, cutoff: MagDistCutoff) {
        self.cutoff = cutoff;
    }

    fn mag_dist_cutoff(&self) -> &MagDistCutoff {
        &self.cutoff
    }

    fn max_source_distance(&self) -> f64 {
        self.max_distance
    }

    fn hazard_curve(&mut self,
                    log_iml_grid: &ArbitrarilyDiscretizedFunc,
                    site: &Site,
                    gmms: &GroundMotionModelMap,
                    forecast: &dyn EarthquakeRuptureForecast) -> Result<ArbitrarilyDiscretizedFunc, CalcError> {
        forecast.ensure_updated()?;
        let ruptures = contributing_ruptures(site, forecast, self.max_distance, &self.cutoff)?;
        let mut curve = log_iml_grid.clone();
        for (i, pt) in log_iml_grid.iter().enumerate() {
            let mut none_exceed = 1.0;
            for (_, _, rupture) in ruptures.iter() {
                let exceed = gmm_for(gmms, rupture)?.exceedance_probability(rupture, pt.x())?;
                none_exceed *= 1.0 - rupture.probability * exceed;
            }
            curve.set_y(i, 1.0 - none_exceed)?;
        }
        Ok(curve)
    }
}

/// Bins each rupture's exceedance rate and normalizes the grid to one.
pub struct FakeDisaggregationCalculator {
    pub calls: usize
}

impl FakeDisaggregationCalculator {
    pub fn new() -> FakeDisaggregationCalculator {
        FakeDisaggregationCalculator { calls: 0 }
    }
}

impl DisaggregationCalculator for FakeDisaggregationCalculator {
    fn name(&self) -> &str {
        "Fake Disaggregation Calculator"
    }

    fn disaggregate(&mut self, input: &DisaggregationInput<'_>) -> Result<DisaggregationBreakdown, CalcError> {
        self.calls += 1;
        let bins: &DisaggregationBins = input.bins;
        let mut grid = DMatrix::<f64>::zeros(bins.num_mag, bins.num_dist);
        let mut per_source: HashMap<usize, (f64, f64)> = HashMap::new();
        let ruptures = contributing_ruptures(input.site, input.forecast, input.max_source_distance, input.mag_dist_cutoff)?;
        for (source, distance, rupture) in ruptures.iter() {
            let exceed = gmm_for(input.gmms, rupture)?.exceedance_probability(rupture, input.ln_iml)?;
            let rate = rupture.probability * exceed;
            if let (Some(row), Some(col)) = (bins.magnitude_index(rupture.magnitude), bins.distance_index(*distance)) {
                grid[(row, col)] += rate;
                let entry = per_source.entry(*source).or_insert((0.0, *distance));
                entry.0 += rate;
            }
        }
        let sum = grid.sum();
        if sum <= 0.0 {
            return Err(CalcError::collaborator(self.name(), "nothing contributes at this IML"));
        }
        grid /= sum;

        let mut sources = Vec::new();
        for (source, (rate, distance)) in per_source {
            sources.push(SourceContribution {
                source_name: input.forecast.source_name(source)?,
                percent: 100.0 * rate / sum,
                distance: Some(distance)
            });
        }
        sources.sort_by(|a, b| b.percent.total_cmp(&a.percent));

        let mut breakdown = DisaggregationBreakdown::from_grid(grid, bins, sources);
        breakdown.total = 1.0;
        Ok(breakdown)
    }
}

/// Records every publication and hands out sequential addresses.
pub struct FakePublisher {
    pub published: Rc<RefCell<Vec<String>>>
}

impl DisaggregationPlotPublisher for FakePublisher {
    fn publish(&self,
               _breakdown: &DisaggregationBreakdown,
               _bins: &DisaggregationBins,
               metadata: &str) -> Result<String, CalcError> {
        let mut published = self.published.borrow_mut();
        published.push(metadata.to_owned());
        Ok(format!("https://plots.invalid/disagg/{}.png", published.len()))
    }
}

pub struct Fixture {
    pub collaborators: Collaborators,
    pub published: Rc<RefCell<Vec<String>>>,
    pub forecast_updates: Rc<Cell<usize>>
}

pub fn fixture() -> Fixture {
    let mut gmms: GroundMotionModelMap = HashMap::new();
    gmms.insert(TectonicRegionType::ActiveShallow, Box::new(FakeGmm::new()));
    let forecast = FakeForecast::new();
    let forecast_updates = Rc::clone(&forecast.update_count);
    let published = Rc::new(RefCell::new(Vec::new()));
    let collaborators = Collaborators::new(
        gmms,
        Box::new(forecast),
        Box::new(FakeHazardCalculator::new()),
        Box::new(FakeDisaggregationCalculator::new())
    ).with_plot_publisher(Box::new(FakePublisher { published: Rc::clone(&published) }));
    Fixture { collaborators, published, forecast_updates }
}
