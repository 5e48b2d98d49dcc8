use std::cell::{
    Ref,
    RefCell
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::calc::disaggregationcalculator::DisaggregationBins;
use crate::calc::hazardcurveengine::HazardCurveSettings;
use crate::calc::magdistcutoff::MagDistCutoff;
use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::site::site::SiteWarningBounds;

/// Name under which the built-in cutoff and disaggregation profile are registered.
pub const DEFAULT_NAME: &str = "default";

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    hazard_curve: Option<HazardCurveSettings>,
    #[serde(default)]
    site_warning_bounds: Option<SiteWarningBounds>,
    #[serde(default)]
    mag_dist_cutoff: Vec<serde_json::Value>,
    #[serde(default)]
    disaggregation: Vec<serde_json::Value>
}

fn mag_dist_cutoff_from_json(json_value: serde_json::Value) -> Result<MagDistCutoff, ManagerError> {
    ManagerError::from_json_or_json_parse_error(json_value)
}

fn disaggregation_bins_from_json(json_value: serde_json::Value) -> Result<DisaggregationBins, ManagerError> {
    let name = json_value
        .get("name")
        .and_then(|name| name.as_str())
        .unwrap_or_default()
        .to_owned();
    let bins: DisaggregationBins = ManagerError::from_json_or_json_parse_error(json_value)?;
    bins.validate().map_err(|error| ManagerError::invalid_definition(&name, error))?;
    Ok(bins)
}

/// Immutable-during-requests settings shared by every request.
pub struct Configuration {
    hazard_curve_cell: RefCell<HazardCurveSettings>,
    site_warning_bounds_cell: RefCell<SiteWarningBounds>,
    mag_dist_cutoff_manager: Manager<MagDistCutoff>,
    disaggregation_profile_manager: Manager<DisaggregationBins>
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        let mag_dist_cutoff_manager = Manager::new("mag_dist_cutoff", mag_dist_cutoff_from_json);
        mag_dist_cutoff_manager.insert(DEFAULT_NAME, MagDistCutoff::default());
        let disaggregation_profile_manager = Manager::new("disaggregation", disaggregation_bins_from_json);
        disaggregation_profile_manager.insert(DEFAULT_NAME, DisaggregationBins::default());
        Configuration {
            hazard_curve_cell: RefCell::new(HazardCurveSettings::default()),
            site_warning_bounds_cell: RefCell::new(SiteWarningBounds::default()),
            mag_dist_cutoff_manager,
            disaggregation_profile_manager
        }
    }

    pub fn hazard_curve(&self) -> Ref<'_, HazardCurveSettings> {
        self.hazard_curve_cell.borrow()
    }

    pub fn site_warning_bounds(&self) -> Ref<'_, SiteWarningBounds> {
        self.site_warning_bounds_cell.borrow()
    }

    pub fn mag_dist_cutoff_manager(&self) -> &Manager<MagDistCutoff> {
        &self.mag_dist_cutoff_manager
    }

    pub fn disaggregation_profile_manager(&self) -> &Manager<DisaggregationBins> {
        &self.disaggregation_profile_manager
    }

    /// Applies a configuration document. Absent sections keep their current
    /// values; named entries are added to (or replace) the registered ones.
    pub fn load_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        if let Some(settings) = json_prop.hazard_curve {
            settings.validate()
                .map_err(|error| ManagerError::invalid_definition("hazard_curve", error))?;
            *self.hazard_curve_cell.borrow_mut() = settings;
        }
        if let Some(bounds) = json_prop.site_warning_bounds {
            *self.site_warning_bounds_cell.borrow_mut() = bounds;
        }
        self.mag_dist_cutoff_manager.insert_obj_from_json_vec(&json_prop.mag_dist_cutoff)?;
        self.disaggregation_profile_manager.insert_obj_from_json_vec(&json_prop.disaggregation)?;
        info!(
            mag_dist_cutoffs = self.mag_dist_cutoff_manager.names().len(),
            disaggregation_profiles = self.disaggregation_profile_manager.names().len(),
            "configuration loaded"
        );
        Ok(())
    }

    pub fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.load_json(json_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = Configuration::new();
        assert_eq!(*config.hazard_curve(), HazardCurveSettings::default());
        assert_eq!(config.hazard_curve().duration, 50.0);
        assert_eq!(config.site_warning_bounds().vs30.max, 1800.0);
        assert_eq!(config.mag_dist_cutoff_manager().get(DEFAULT_NAME).unwrap(), MagDistCutoff::default());
        assert_eq!(config.disaggregation_profile_manager().get(DEFAULT_NAME).unwrap().num_mag, 14);
    }

    #[test]
    fn test_load_json_overrides_and_adds() {
        let config = Configuration::new();
        config.load_json(json!({
            "hazard_curve": {"num_points": 51, "duration": 1.0},
            "mag_dist_cutoff": [{"name": "near", "distances": [0.0, 100.0], "magnitudes": [5.0, 6.0]}],
            "disaggregation": [{"name": "coarse", "delta_mag": 0.5, "num_mag": 7}]
        })).unwrap();
        assert_eq!(config.hazard_curve().num_points, 51);
        assert_eq!(config.hazard_curve().min_iml, 1e-4);
        assert_eq!(config.mag_dist_cutoff_manager().names(), vec!["default".to_owned(), "near".to_owned()]);
        let coarse = config.disaggregation_profile_manager().get("coarse").unwrap();
        assert_eq!((coarse.delta_mag, coarse.num_mag, coarse.num_dist), (0.5, 7, 15));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        let config = Configuration::new();
        assert!(config.load_json(json!({"hazard_curve": {"num_points": 1}})).is_err());
        assert_eq!(config.hazard_curve().num_points, 101);
        assert!(config.load_json(json!({
            "mag_dist_cutoff": [{"name": "bad", "distances": [10.0, 5.0], "magnitudes": [5.0, 6.0]}]
        })).is_err());
        assert!(matches!(
            config.load_json(json!({"disaggregation": [{"name": "empty", "num_dist": 0}]})),
            Err(ManagerError::InvalidDefinition { name, .. }) if name == "empty"
        ));
    }
}
