use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize
};
use tracing::warn;

use crate::geo::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteParameterName {
    Vs30,
    Vs30Type,
    DepthTo1pt0
}

impl SiteParameterName {
    pub fn label(&self) -> &'static str {
        match self {
            SiteParameterName::Vs30 => "Vs30",
            SiteParameterName::Vs30Type => "Vs30 Type",
            SiteParameterName::DepthTo1pt0 => "Depth 1.0 km/sec",
        }
    }
}

impl Display for SiteParameterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vs30Type {
    Inferred,
    Measured
}

impl Display for Vs30Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vs30Type::Inferred => write!(f, "Inferred"),
            Vs30Type::Measured => write!(f, "Measured"),
        }
    }
}

/// Closed interval outside of which a value is suspicious but still usable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub min: f64,
    pub max: f64
}

impl ParameterBounds {
    pub fn new(min: f64, max: f64) -> ParameterBounds {
        ParameterBounds { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn default_vs30_bounds() -> ParameterBounds {
    ParameterBounds::new(150.0, 1800.0)
}

fn default_depth_1pt0_bounds() -> ParameterBounds {
    ParameterBounds::new(0.0, 10000.0)
}

/// Site-level warning ranges applied before any model sees the site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteWarningBounds {
    #[serde(default = "default_vs30_bounds")]
    pub vs30: ParameterBounds,
    #[serde(default = "default_depth_1pt0_bounds")]
    pub depth_1pt0: ParameterBounds
}

impl Default for SiteWarningBounds {
    fn default() -> Self {
        SiteWarningBounds {
            vs30: default_vs30_bounds(),
            depth_1pt0: default_depth_1pt0_bounds()
        }
    }
}

impl SiteWarningBounds {
    /// Logs a warning for every out-of-bounds value and returns the offenders.
    pub fn check(&self, site: &Site) -> Vec<SiteParameterName> {
        let mut outside = Vec::new();
        for (name, bounds) in [
            (SiteParameterName::Vs30, self.vs30),
            (SiteParameterName::DepthTo1pt0, self.depth_1pt0)
        ] {
            let value = site.parameter_value(name).unwrap_or(f64::NAN);
            if !bounds.contains(value) {
                warn!(parameter = %name, value, min = bounds.min, max = bounds.max, "site parameter outside warning bounds");
                outside.push(name);
            }
        }
        outside
    }
}

/// Location plus the site parameters ground-motion models read. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    location: Location,
    vs30: f64,
    vs30_type: Vs30Type,
    depth_1pt0: f64
}

impl Site {
    pub fn new(location: Location, vs30: f64, vs30_type: Vs30Type, depth_1pt0: f64) -> Site {
        Site { location, vs30, vs30_type, depth_1pt0 }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn vs30(&self) -> f64 {
        self.vs30
    }

    pub fn vs30_type(&self) -> Vs30Type {
        self.vs30_type
    }

    /// Depth (m) to shear-wave velocity of 1.0 km/s.
    pub fn depth_1pt0(&self) -> f64 {
        self.depth_1pt0
    }

    /// Numeric value of a parameter, `None` for categorical ones.
    pub fn parameter_value(&self, name: SiteParameterName) -> Option<f64> {
        match name {
            SiteParameterName::Vs30 => Some(self.vs30),
            SiteParameterName::DepthTo1pt0 => Some(self.depth_1pt0),
            SiteParameterName::Vs30Type => None,
        }
    }

    pub fn info(&self) -> String {
        format!(
            "Longitude = {}; Latitude = {}; Vs30 = {}; Vs30 Type = {}; Depth 1.0 km/sec = {};",
            self.location.longitude(),
            self.location.latitude(),
            self.vs30,
            self.vs30_type,
            self.depth_1pt0
        )
    }
}
