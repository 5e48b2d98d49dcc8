use std::cmp::Ordering;

/// Two x-values closer than this are the same abscissa.
///
/// Effectively exact: at magnitudes around 1.0 adjacent doubles are already
/// further apart than this.
pub const X_TOLERANCE: f64 = 1e-16;

/// Orders two x-values, treating anything within [`X_TOLERANCE`] as equal.
///
/// NaN sorts after every other value so that insertion never panics.
pub fn compare_x(x1: f64, x2: f64) -> Ordering {
    if (x1 - x2).abs() <= X_TOLERANCE {
        Ordering::Equal
    } else {
        x1.total_cmp(&x2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub(crate) fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// True when both points share an abscissa; y is ignored.
    pub fn same_x(&self, other: &Point2D) -> bool {
        compare_x(self.x, other.x) == Ordering::Equal
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}
