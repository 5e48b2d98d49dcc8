use crate::geo::geoerror::GeoError;
use crate::geo::location::Location;

/// Degrees within which a location coincides with a grid node.
pub const NODE_TOLERANCE: f64 = 1e-9;

/// A finite set of grid nodes with a deterministic location <-> index mapping.
pub trait GriddedRegion {
    fn name(&self) -> &str;

    fn node_count(&self) -> usize;

    fn location(&self, index: usize) -> Result<Location, GeoError>;

    /// Index of the node coinciding with `location`, `None` for non-members.
    fn index_for_location(&self, location: &Location) -> Option<usize>;

    fn contains(&self, location: &Location) -> bool {
        self.index_for_location(location).is_some()
    }

    fn nodes(&self) -> Vec<Location> {
        (0..self.node_count())
            .filter_map(|i| self.location(i).ok())
            .collect()
    }
}

/// Latitude/longitude box with uniform node spacing.
///
/// Nodes are ordered row-major starting at the south-west corner: longitude
/// varies fastest, then latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularGriddedRegion {
    name: String,
    min_lat: f64,
    min_lon: f64,
    spacing: f64,
    num_lat: usize,
    num_lon: usize
}

impl RectangularGriddedRegion {
    pub fn new(name: &str,
               min_lat: f64,
               max_lat: f64,
               min_lon: f64,
               max_lon: f64,
               spacing: f64) -> Result<RectangularGriddedRegion, GeoError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(GeoError::InvalidRegion(format!("spacing ({}) must be positive", spacing)));
        }
        // validates the corners
        Location::new(min_lat, min_lon)?;
        Location::new(max_lat, max_lon)?;
        if max_lat < min_lat || max_lon < min_lon {
            return Err(GeoError::InvalidRegion(format!(
                "empty box lat [{}, {}] lon [{}, {}]", min_lat, max_lat, min_lon, max_lon
            )));
        }
        let num_lat = ((max_lat - min_lat) / spacing + NODE_TOLERANCE).floor() as usize + 1;
        let num_lon = ((max_lon - min_lon) / spacing + NODE_TOLERANCE).floor() as usize + 1;
        Ok(RectangularGriddedRegion {
            name: name.to_owned(),
            min_lat,
            min_lon,
            spacing,
            num_lat,
            num_lon
        })
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn num_lat_nodes(&self) -> usize {
        self.num_lat
    }

    pub fn num_lon_nodes(&self) -> usize {
        self.num_lon
    }

    fn node_position(min: f64, spacing: f64, count: usize, value: f64) -> Option<usize> {
        let position = ((value - min) / spacing).round();
        if position < 0.0 || position >= count as f64 {
            return None;
        }
        let node = min + position * spacing;
        ((node - value).abs() <= NODE_TOLERANCE).then_some(position as usize)
    }
}

impl GriddedRegion for RectangularGriddedRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn node_count(&self) -> usize {
        self.num_lat * self.num_lon
    }

    fn location(&self, index: usize) -> Result<Location, GeoError> {
        if index >= self.node_count() {
            return Err(GeoError::IndexOutOfRange { index, size: self.node_count() });
        }
        let row = index / self.num_lon;
        let col = index % self.num_lon;
        Location::new(
            self.min_lat + row as f64 * self.spacing,
            self.min_lon + col as f64 * self.spacing
        )
    }

    fn index_for_location(&self, location: &Location) -> Option<usize> {
        let row = RectangularGriddedRegion::node_position(self.min_lat, self.spacing, self.num_lat, location.latitude())?;
        let col = RectangularGriddedRegion::node_position(self.min_lon, self.spacing, self.num_lon, location.longitude())?;
        Some(row * self.num_lon + col)
    }
}
