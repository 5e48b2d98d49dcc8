use std::sync::Arc;

use crate::geo::geoerror::GeoError;
use crate::geo::griddedregion::GriddedRegion;
use crate::geo::location::Location;

/// One value per node of a gridded region. Locations outside the region
/// cannot be written.
#[derive(Clone)]
pub struct GriddedGeoDataset {
    region: Arc<dyn GriddedRegion>,
    values: Vec<f64>,
    latitude_x: bool
}

impl GriddedGeoDataset {
    pub fn new(region: Arc<dyn GriddedRegion>, latitude_x: bool) -> GriddedGeoDataset {
        let values = vec![0.0; region.node_count()];
        GriddedGeoDataset { region, values, latitude_x }
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether latitude is treated as the x axis when exported as XYZ.
    pub fn is_latitude_x(&self) -> bool {
        self.latitude_x
    }

    pub fn region(&self) -> &Arc<dyn GriddedRegion> {
        &self.region
    }

    pub fn index_of(&self, location: &Location) -> Option<usize> {
        self.region.index_for_location(location)
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.index_of(location).is_some()
    }

    pub fn location(&self, index: usize) -> Result<Location, GeoError> {
        self.region.location(index)
    }

    pub fn set(&mut self, location: &Location, value: f64) -> Result<(), GeoError> {
        let index = self.index_of(location)
            .ok_or(GeoError::LocationNotInRegion(*location))?;
        self.values[index] = value;
        Ok(())
    }

    pub fn set_index(&mut self, index: usize, value: f64) -> Result<(), GeoError> {
        let size = self.size();
        let slot = self.values
            .get_mut(index)
            .ok_or(GeoError::IndexOutOfRange { index, size })?;
        *slot = value;
        Ok(())
    }

    pub fn get(&self, location: &Location) -> Result<f64, GeoError> {
        self.index_of(location)
            .map(|index| self.values[index])
            .ok_or(GeoError::LocationNotInRegion(*location))
    }

    pub fn get_index(&self, index: usize) -> Result<f64, GeoError> {
        self.values
            .get(index)
            .copied()
            .ok_or(GeoError::IndexOutOfRange { index, size: self.size() })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (location, value) for every node, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| self.region.location(i).ok().map(|loc| (loc, v)))
    }

    /// Independent value storage over the same region.
    pub fn copy(&self) -> GriddedGeoDataset {
        self.clone()
    }

    pub fn min_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}
