use crate::magdist::magfreqdisterror::MagFreqDistError;

/// Evenly spaced magnitude bins: `min, min + delta, ..., min + (num - 1) * delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeGrid {
    min: f64,
    delta: f64,
    num: usize
}

impl MagnitudeGrid {
    pub fn from_min_num_delta(min: f64, num: usize, delta: f64) -> Result<MagnitudeGrid, MagFreqDistError> {
        if num == 0 {
            return Err(MagFreqDistError::InvalidRange("num must be positive".to_owned()));
        }
        if !min.is_finite() {
            return Err(MagFreqDistError::InvalidRange(format!("min ({}) must be finite", min)));
        }
        if !delta.is_finite() || delta < 0.0 {
            return Err(MagFreqDistError::InvalidRange(format!("delta ({}) must be finite and non-negative", delta)));
        }
        if num > 1 && delta == 0.0 {
            return Err(MagFreqDistError::InvalidRange("delta must be positive when num > 1".to_owned()));
        }
        Ok(MagnitudeGrid { min, delta, num })
    }

    pub fn from_min_max_num(min: f64, max: f64, num: usize) -> Result<MagnitudeGrid, MagFreqDistError> {
        if max < min {
            return Err(MagFreqDistError::InvalidRange(format!("min ({}) must not exceed max ({})", min, max)));
        }
        match num {
            0 => Err(MagFreqDistError::InvalidRange("num must be positive".to_owned())),
            1 if min != max => Err(MagFreqDistError::InvalidRange(
                "min must equal max when num = 1".to_owned(),
            )),
            1 => MagnitudeGrid::from_min_num_delta(min, 1, 0.0),
            _ => MagnitudeGrid::from_min_num_delta(min, num, (max - min) / (num - 1) as f64),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.magnitude(self.num - 1)
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn num(&self) -> usize {
        self.num
    }

    pub fn magnitude(&self, index: usize) -> f64 {
        self.min + index as f64 * self.delta
    }

    pub fn magnitudes(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.num).map(|i| self.magnitude(i))
    }

    /// Index of the bin nearest to `mag`, rounding halves upward.
    ///
    /// May lie outside `[0, num)`. The division is rounded in single
    /// precision so that cutoffs such as `mean + 2σ` landing a hair below a
    /// half bin still round the way their decimal value suggests.
    pub fn nearest_index(&self, mag: f64) -> i64 {
        if self.delta == 0.0 {
            return 0;
        }
        let position = ((mag - self.min) / self.delta) as f32;
        (position + 0.5).floor() as i64
    }

    /// Index of the bin that `mag` falls on, within `tolerance` of a bin width.
    pub fn aligned_index(&self, mag: f64, tolerance: f64) -> Option<usize> {
        if self.delta == 0.0 {
            return ((mag - self.min).abs() <= tolerance).then_some(0);
        }
        let position = (mag - self.min) / self.delta;
        let index = position.round();
        if index < 0.0 || index >= self.num as f64 || (position - index).abs() > tolerance {
            None
        } else {
            Some(index as usize)
        }
    }
}
