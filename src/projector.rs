use crate::options::Canvas;
use crate::types::{Bounds, PlanePoint, Point};

/// Map a point inside `bounds` onto the canvas, leaving the margins free.
///
/// Each axis is stretched independently to fill the margin box, so real-world
/// aspect ratio is not kept. Latitude grows upward while canvas y grows
/// downward. A zero-span axis puts every point on the middle of that axis.
pub fn project(point: &Point, bounds: &Bounds, canvas: &Canvas) -> PlanePoint {
    let fx = axis_fraction(point.lon, bounds.min_lon, bounds.max_lon);
    let fy = axis_fraction(point.lat, bounds.min_lat, bounds.max_lat);

    PlanePoint {
        x: fx * canvas.inner_width() + canvas.margin_x,
        y: canvas.height - canvas.margin_y - fy * canvas.inner_height(),
    }
}

/// Project a whole point set in input order.
pub fn project_all(points: &[Point], bounds: &Bounds, canvas: &Canvas) -> Vec<PlanePoint> {
    points
        .iter()
        .map(|pt| project(pt, bounds, canvas))
        .collect()
}

fn axis_fraction(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return 0.5;
    }
    (value - min) / span
}
