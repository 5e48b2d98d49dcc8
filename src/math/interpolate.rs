//! Linear interpolation in linear, log-y and log-log space.
//!
//! Nothing here validates its input. Callers supply ascending, equally sized
//! arrays of at least two points; anything else produces NaN or an infinity
//! rather than an error. Values outside the data range are extrapolated from
//! the end segment.

/// y on the line through (x1, y1) and (x2, y2) at `x`.
#[inline]
pub fn find_y(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

/// x on the line through (x1, y1) and (x2, y2) at `y`.
#[inline]
pub fn find_x(x1: f64, y1: f64, x2: f64, y2: f64, y: f64) -> f64 {
    find_y(y1, x1, y2, x2, y)
}

pub fn find_y_in(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    match bracket(xs, x) {
        Some(i) => find_y(xs[i], y_at(ys, i), xs[i + 1], y_at(ys, i + 1), x),
        None => f64::NAN,
    }
}

pub fn find_log_y_in(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    match bracket(xs, x) {
        Some(i) => find_y(
            xs[i],
            y_at(ys, i).ln(),
            xs[i + 1],
            y_at(ys, i + 1).ln(),
            x,
        )
        .exp(),
        None => f64::NAN,
    }
}

pub fn find_log_log_y_in(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    match bracket(xs, x) {
        Some(i) => find_y(
            xs[i].ln(),
            y_at(ys, i).ln(),
            xs[i + 1].ln(),
            y_at(ys, i + 1).ln(),
            x.ln(),
        )
        .exp(),
        None => f64::NAN,
    }
}

pub fn find_y_all(xs: &[f64], ys: &[f64], x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| find_y_in(xs, ys, v)).collect()
}

pub fn find_log_y_all(xs: &[f64], ys: &[f64], x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| find_log_y_in(xs, ys, v)).collect()
}

pub fn find_log_log_y_all(xs: &[f64], ys: &[f64], x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| find_log_log_y_in(xs, ys, v)).collect()
}

/// Lower index of the segment used for `value`; the segment is `(i, i + 1)`.
///
/// An exact hit uses the segment starting at the hit unless it is the last
/// point. Misses use the segment around the insertion point, clamped to the
/// first and last segments for extrapolation.
fn bracket(data: &[f64], value: f64) -> Option<usize> {
    if data.len() < 2 {
        return None;
    }
    let i = match data.binary_search_by(|v| v.total_cmp(&value)) {
        Ok(i) => i,
        Err(insertion) => insertion.saturating_sub(1),
    };
    Some(i.min(data.len() - 2))
}

#[inline]
fn y_at(ys: &[f64], i: usize) -> f64 {
    ys.get(i).copied().unwrap_or(f64::NAN)
}
