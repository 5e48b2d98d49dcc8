use serde::{
    Deserialize,
    Serialize
};

use crate::math::function::discretizedfunction::DiscretizedFunction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64
}

/// JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardResponse {
    pub haz_function: Vec<CurvePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disagg_web_addr: Option<String>
}

impl HazardResponse {
    pub fn from_curve(curve: &dyn DiscretizedFunction) -> HazardResponse {
        HazardResponse {
            haz_function: curve.iter().map(|pt| CurvePoint { x: pt.x(), y: pt.y() }).collect(),
            disagg_web_addr: None
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
