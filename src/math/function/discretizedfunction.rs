use std::cmp::Ordering;
use std::slice::Iter;

use crate::math::function::arbitrarilydiscretizedfunc::ArbitrarilyDiscretizedFunc;
use crate::math::function::functionerror::FunctionError;
use crate::math::function::point2d::{
    compare_x,
    Point2D
};
use crate::math::interpolate;

/// Read-only view over an ordered set of (x, y) points.
///
/// Implementors only hand out their points, which must be in ascending x
/// order with no two x-values equal under [`compare_x`]. Every other query is
/// derived from that slice, so a type that cannot be mutated (such as a
/// magnitude-frequency distribution) gets the full read API without exposing
/// a setter.
pub trait DiscretizedFunction {
    fn points(&self) -> &[Point2D];

    fn size(&self) -> usize {
        self.points().len()
    }

    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    fn get(&self, index: usize) -> Result<Point2D, FunctionError> {
        let points = self.points();
        points.get(index)
            .copied()
            .ok_or(FunctionError::IndexOutOfRange { index, size: points.len() })
    }

    fn x(&self, index: usize) -> Result<f64, FunctionError> {
        self.get(index).map(|pt| pt.x())
    }

    fn y(&self, index: usize) -> Result<f64, FunctionError> {
        self.get(index).map(|pt| pt.y())
    }

    /// Ascending iteration; every call starts again from the first point.
    fn iter(&self) -> Iter<'_, Point2D> {
        self.points().iter()
    }

    fn x_values(&self) -> Vec<f64> {
        self.iter().map(|pt| pt.x()).collect()
    }

    fn y_values(&self) -> Vec<f64> {
        self.iter().map(|pt| pt.y()).collect()
    }

    fn x_index(&self, x: f64) -> Option<usize> {
        self.points()
            .binary_search_by(|pt| compare_x(pt.x(), x))
            .ok()
    }

    fn has_x(&self, x: f64) -> bool {
        self.x_index(x).is_some()
    }

    fn min_x(&self) -> Result<f64, FunctionError> {
        self.points().first().map(|pt| pt.x()).ok_or(FunctionError::Empty)
    }

    fn max_x(&self) -> Result<f64, FunctionError> {
        self.points().last().map(|pt| pt.x()).ok_or(FunctionError::Empty)
    }

    fn min_y(&self) -> Result<f64, FunctionError> {
        self.iter()
            .map(|pt| pt.y())
            .reduce(f64::min)
            .ok_or(FunctionError::Empty)
    }

    fn max_y(&self) -> Result<f64, FunctionError> {
        self.iter()
            .map(|pt| pt.y())
            .reduce(f64::max)
            .ok_or(FunctionError::Empty)
    }

    /// y of the point whose x is nearest to `x`. Ties go to the smaller x.
    fn closest_y_to_x(&self, x: f64) -> Result<f64, FunctionError> {
        closest_by(self.points(), |pt| (pt.x() - x).abs()).map(|pt| pt.y())
    }

    /// x of the point whose y is nearest to `y`. Ties go to the smaller x.
    fn closest_x_to_y(&self, y: f64) -> Result<f64, FunctionError> {
        closest_by(self.points(), |pt| (pt.y() - y).abs()).map(|pt| pt.x())
    }

    /// Linear interpolation, extrapolating from the end segments.
    fn interpolated_y(&self, x: f64) -> Result<f64, FunctionError> {
        self.require_points(2)?;
        Ok(interpolate::find_y_in(&self.x_values(), &self.y_values(), x))
    }

    fn interpolated_y_in_log_x_log_y(&self, x: f64) -> Result<f64, FunctionError> {
        self.require_points(2)?;
        Ok(interpolate::find_log_log_y_in(&self.x_values(), &self.y_values(), x))
    }

    /// Inverse log-log interpolation: the x at which the function reaches `y`.
    ///
    /// Uses the first segment whose y-range contains `y`. When none does the
    /// end segment nearest to `y` (in log space) is extended, so the result
    /// may be an extrapolation. A flat segment has no inverse and yields its
    /// left x, also when it is the end segment being extended. A single point
    /// matching `y` exactly yields its x.
    fn first_interpolated_x_in_log_x_log_y(&self, y: f64) -> Result<f64, FunctionError> {
        if let [only] = self.points() {
            if only.y() == y {
                return Ok(only.x());
            }
        }
        self.require_points(2)?;
        let points = self.points();
        let last = points.len() - 2;
        let segment = points
            .windows(2)
            .position(|w| {
                let (y1, y2) = (w[0].y(), w[1].y());
                (y <= y1 && y >= y2) || (y >= y1 && y <= y2)
            })
            .unwrap_or_else(|| {
                let to_first = (y.ln() - points[0].y().ln()).abs();
                let to_last = (y.ln() - points[last + 1].y().ln()).abs();
                if to_first < to_last { 0 } else { last }
            });
        let (p1, p2) = (points[segment], points[segment + 1]);
        if p1.y() == p2.y() {
            return Ok(p1.x());
        }
        let ln_x = interpolate::find_x(p1.x().ln(), p1.y().ln(), p2.x().ln(), p2.y().ln(), y.ln());
        Ok(ln_x.exp())
    }

    fn all_x_values_integer(&self, tolerance: f64) -> bool {
        self.iter().all(|pt| (pt.x() - pt.x().round()).abs() <= tolerance)
    }

    /// Mutable, independent copy of the points.
    fn to_arbitrary(&self) -> ArbitrarilyDiscretizedFunc {
        let mut func = ArbitrarilyDiscretizedFunc::new();
        for pt in self.iter() {
            func.set(pt.x(), pt.y());
        }
        func
    }

    fn metadata_string(&self) -> String {
        self.iter()
            .map(|pt| format!("{}\t{}", pt.x(), pt.y()))
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn require_points(&self, required: usize) -> Result<(), FunctionError> {
        let actual = self.size();
        if actual < required {
            Err(FunctionError::TooFewPoints { required, actual })
        } else {
            Ok(())
        }
    }
}

fn closest_by(points: &[Point2D], distance: impl Fn(&Point2D) -> f64) -> Result<Point2D, FunctionError> {
    let mut best: Option<(Point2D, f64)> = None;
    for pt in points {
        let d = distance(pt);
        let closer = match best {
            None => true,
            Some((_, best_d)) => d.partial_cmp(&best_d) == Some(Ordering::Less),
        };
        if closer {
            best = Some((*pt, d));
        }
    }
    best.map(|(pt, _)| pt).ok_or(FunctionError::Empty)
}
