use crate::error::ChecklistError;
use crate::types::{Bounds, Point};

type Result<T> = std::result::Result<T, ChecklistError>;

/// Compute the smallest lat/lon rectangle containing every point.
///
/// An empty slice has no bounds and yields `ChecklistError::EmptyInput`.
pub fn compute(points: &[Point]) -> Result<Bounds> {
    if points.is_empty() {
        return Err(ChecklistError::EmptyInput);
    }

    let seed = Bounds {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lon: f64::INFINITY,
        max_lon: f64::NEG_INFINITY,
    };

    Ok(points.iter().fold(seed, |acc, pt| Bounds {
        min_lat: acc.min_lat.min(pt.lat),
        max_lat: acc.max_lat.max(pt.lat),
        min_lon: acc.min_lon.min(pt.lon),
        max_lon: acc.max_lon.max(pt.lon),
    }))
}
