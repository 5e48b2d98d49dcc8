use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize
};

/// Tectonic setting used to select a ground-motion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TectonicRegionType {
    ActiveShallow,
    StableShallow,
    SubductionInterface,
    SubductionSlab,
    Volcanic
}

impl TectonicRegionType {
    pub fn label(&self) -> &'static str {
        match self {
            TectonicRegionType::ActiveShallow => "Active Shallow Crust",
            TectonicRegionType::StableShallow => "Stable Shallow Crust",
            TectonicRegionType::SubductionInterface => "Subduction Interface",
            TectonicRegionType::SubductionSlab => "Subduction IntraSlab",
            TectonicRegionType::Volcanic => "Volcanic",
        }
    }
}

impl Display for TectonicRegionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
