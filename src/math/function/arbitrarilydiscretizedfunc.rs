use std::cmp::Ordering;

use crate::math::function::discretizedfunction::DiscretizedFunction;
use crate::math::function::functionerror::FunctionError;
use crate::math::function::point2d::{
    compare_x,
    Point2D
};

/// Mutable discretized function with arbitrary x spacing.
///
/// Points stay sorted by x after every write and no two share an x-value
/// within tolerance. `Clone` yields a fully independent copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArbitrarilyDiscretizedFunc {
    name: String,
    info: String,
    points: Vec<Point2D>
}

impl ArbitrarilyDiscretizedFunc {
    pub fn new() -> ArbitrarilyDiscretizedFunc {
        ArbitrarilyDiscretizedFunc::default()
    }

    pub fn with_name(name: &str) -> ArbitrarilyDiscretizedFunc {
        ArbitrarilyDiscretizedFunc {
            name: name.to_owned(),
            ..ArbitrarilyDiscretizedFunc::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn set_info(&mut self, info: &str) {
        self.info = info.to_owned();
    }

    /// Replaces the y of an existing point with the same x, otherwise
    /// inserts a new point in x order.
    pub fn set(&mut self, x: f64, y: f64) {
        let index = self.points
            .partition_point(|pt| compare_x(pt.x(), x) == Ordering::Less);
        match self.points.get_mut(index) {
            Some(pt) if compare_x(pt.x(), x) == Ordering::Equal => pt.set_y(y),
            _ => self.points.insert(index, Point2D::new(x, y)),
        }
    }

    pub fn set_point(&mut self, point: Point2D) {
        self.set(point.x(), point.y());
    }

    pub fn set_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        let size = self.points.len();
        let pt = self.points
            .get_mut(index)
            .ok_or(FunctionError::IndexOutOfRange { index, size })?;
        pt.set_y(y);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl DiscretizedFunction for ArbitrarilyDiscretizedFunc {
    fn points(&self) -> &[Point2D] {
        &self.points
    }
}

impl FromIterator<(f64, f64)> for ArbitrarilyDiscretizedFunc {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut func = ArbitrarilyDiscretizedFunc::new();
        for (x, y) in iter {
            func.set(x, y);
        }
        func
    }
}
