//! Angle conversions and small planar helpers used when orienting objects along calculated curves.

use std::f64::consts::PI;

const HALF_CIRCLE_DEGREES: f64 = 180.0;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / HALF_CIRCLE_DEGREES
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * HALF_CIRCLE_DEGREES / PI
}

/// Angle, in degrees, of a line with the given slope.
pub fn tangent_to_degrees(tangent: f64) -> f64 {
    radians_to_degrees(tangent.atan())
}

/// `y` coordinate at `x1` of the tangent line that touches a curve at `(x0, y0)` with slope `dy0`.
pub fn tangent_y1(x0: f64, y0: f64, x1: f64, dy0: f64) -> f64 {
    dy0 * (x1 - x0) + y0
}

/// Rotates a point about the origin by `degrees`, counter-clockwise in a y-up frame.
pub fn rotate_point([x, y]: [f64; 2], degrees: f64) -> [f64; 2] {
    let (sin, cos) = degrees_to_radians(degrees).sin_cos();
    [x * cos - y * sin, x * sin + y * cos]
}
