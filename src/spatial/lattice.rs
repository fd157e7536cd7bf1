//! Images of the integer grid under a linear map, clipped to a viewport
//!
//! A map with columns `c1` and `c2` sends the grid lines of the plane to two
//! families of parallel lines: `{t·c1 + k·c2}` and `{k·c1 + t·c2}` for integer
//! `k`. Only the lines that cross the viewport are kept.

use crate::io::configuration::{EIGEN_TOLERANCE, MAX_LATTICE_LINES};
use crate::spatial::viewport::Viewport;
use nalgebra::{Point2, Vector2};
use num_traits::ToPrimitive;

/// Which basis column a lattice line runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatticeFamily {
    /// Lines parallel to the image of the first basis vector
    First,
    /// Lines parallel to the image of the second basis vector
    Second,
}

/// One clipped lattice line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeLine {
    /// Direction family of the line
    pub family: LatticeFamily,
    /// Integer offset `k` along the other basis column
    pub index: i64,
    /// Entry point into the viewport
    pub start: Point2<f64>,
    /// Exit point from the viewport
    pub end: Point2<f64>,
}

/// Clip both lattice families spanned by `first` and `second` to the viewport
///
/// A zero column contributes no family. When the columns are parallel every
/// offset collapses onto the same line, so only `k = 0` is emitted.
pub fn lattice_lines(
    first: Vector2<f64>,
    second: Vector2<f64>,
    viewport: &Viewport,
) -> Vec<LatticeLine> {
    let mut lines = Vec::new();
    collect_family(LatticeFamily::First, first, second, viewport, &mut lines);
    collect_family(LatticeFamily::Second, second, first, viewport, &mut lines);
    lines
}

fn collect_family(
    family: LatticeFamily,
    direction: Vector2<f64>,
    offset: Vector2<f64>,
    viewport: &Viewport,
    lines: &mut Vec<LatticeLine>,
) {
    let direction_norm = direction.norm();
    if direction_norm <= f64::MIN_POSITIVE {
        return;
    }

    let normal = Vector2::new(-direction.y, direction.x) / direction_norm;
    let spacing = offset.dot(&normal);

    let indices = if spacing.abs() <= EIGEN_TOLERANCE * offset.norm().max(1.0) {
        0..=0
    } else {
        offset_range(viewport, &normal, spacing)
    };

    for index in indices {
        let origin = Point2::from(offset * index as f64);
        if let Some((start, end)) = clip_line(&origin, &direction, viewport) {
            lines.push(LatticeLine {
                family,
                index,
                start,
                end,
            });
        }
    }
}

// Offsets whose line meets the viewport: the signed distance k·spacing must
// fall between the smallest and largest corner projections onto the normal
fn offset_range(
    viewport: &Viewport,
    normal: &Vector2<f64>,
    spacing: f64,
) -> std::ops::RangeInclusive<i64> {
    let corners = [
        viewport.min,
        Point2::new(viewport.max.x, viewport.min.y),
        viewport.max,
        Point2::new(viewport.min.x, viewport.max.y),
    ];
    let projections = corners.iter().map(|corner| corner.coords.dot(normal));
    let (low, high) = projections.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });

    let (first, last) = if spacing > 0.0 {
        (low / spacing, high / spacing)
    } else {
        (high / spacing, low / spacing)
    };

    let limit = MAX_LATTICE_LINES.to_i64().unwrap_or(i64::MAX);
    let first = first.ceil().to_i64().unwrap_or(-limit).max(-limit);
    let last = last.floor().to_i64().unwrap_or(limit).min(limit);
    first..=last
}

/// Clip the infinite line `origin + t·direction` to the viewport
///
/// Returns the entry and exit points, or `None` when the line misses the
/// viewport or only touches a corner.
pub fn clip_line(
    origin: &Point2<f64>,
    direction: &Vector2<f64>,
    viewport: &Viewport,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;

    let axes = [
        (origin.x, direction.x, viewport.min.x, viewport.max.x),
        (origin.y, direction.y, viewport.min.y, viewport.max.y),
    ];
    for (start, step, low, high) in axes {
        if step.abs() <= f64::MIN_POSITIVE {
            if start < low || start > high {
                return None;
            }
            continue;
        }
        let a = (low - start) / step;
        let b = (high - start) / step;
        t_enter = t_enter.max(a.min(b));
        t_exit = t_exit.min(a.max(b));
    }

    (t_enter < t_exit && t_enter.is_finite() && t_exit.is_finite())
        .then(|| (*origin + *direction * t_enter, *origin + *direction * t_exit))
}
