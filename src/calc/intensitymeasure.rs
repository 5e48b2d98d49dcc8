use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize
};

use crate::calc::calcerror::CalcError;

/// Damping ratio (percent) assumed for spectral acceleration.
pub const SA_DAMPING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IntensityMeasure {
    Pga,
    Pgv,
    /// 5%-damped spectral acceleration at `period` seconds.
    Sa { period: f64 }
}

impl IntensityMeasure {
    pub fn sa(period: f64) -> Result<IntensityMeasure, CalcError> {
        if !period.is_finite() || period < 0.0 {
            return Err(CalcError::InvalidIntensityMeasure(format!(
                "SA period ({}) must be finite and non-negative", period
            )));
        }
        Ok(IntensityMeasure::Sa { period })
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntensityMeasure::Pga => "PGA",
            IntensityMeasure::Pgv => "PGV",
            IntensityMeasure::Sa { .. } => "SA",
        }
    }

    pub fn period(&self) -> Option<f64> {
        match self {
            IntensityMeasure::Sa { period } => Some(*period),
            _ => None,
        }
    }

    pub fn info(&self) -> String {
        match self {
            IntensityMeasure::Sa { period } => format!("IMT = SA; SA Period = {}; SA Damping = {}", period, SA_DAMPING),
            other => format!("IMT = {}", other.name()),
        }
    }
}

impl Display for IntensityMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntensityMeasure::Sa { period } => write!(f, "SA({})", period),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sa_validation() {
        assert_eq!(IntensityMeasure::sa(1.0).unwrap().period(), Some(1.0));
        assert!(IntensityMeasure::sa(-0.5).is_err());
        assert!(IntensityMeasure::sa(f64::NAN).is_err());
        assert_eq!(IntensityMeasure::Pga.period(), None);
    }

    #[test]
    fn test_info_and_display() {
        let sa = IntensityMeasure::sa(1.0).unwrap();
        assert_eq!(sa.info(), "IMT = SA; SA Period = 1; SA Damping = 5");
        assert_eq!(sa.to_string(), "SA(1)");
        assert_eq!(IntensityMeasure::Pgv.info(), "IMT = PGV");
    }
}
