//! Data to pixel projection.

use qurve_paint::Point;

use crate::data::{resolve_x, resolve_y, DataKey, Dataset};
use crate::scale::LinearScale;

/// A record mapped into surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Resolved numeric y value (after fallback).
    pub value: f64,
    /// Position of the source record in the dataset.
    pub index: usize,
}

impl ProjectedPoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Project every record through the x/y scales, then shift by `offset`
/// (the top-left margin).
///
/// Output has one point per record, in dataset order. Missing or non-finite
/// x values fall back to the record index; y values fall back to 0.
pub fn project_points(
    data: &Dataset,
    offset: Point,
    x_key: Option<&DataKey>,
    y_key: Option<&DataKey>,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) -> Vec<ProjectedPoint> {
    data.iter()
        .enumerate()
        .map(|(index, record)| {
            let xv = resolve_x(record, index, x_key);
            let yv = resolve_y(record, index, y_key);
            ProjectedPoint {
                x: offset.x + x_scale.map(xv) as f32,
                y: offset.y + y_scale.map(yv) as f32,
                value: yv,
                index,
            }
        })
        .collect()
}
