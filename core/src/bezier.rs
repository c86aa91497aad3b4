//! Cubic Bézier curves: the unit curve solver behind CSS-style timing functions, and a general
//! four-point curve used for curve-following layouts.

use lyon_geom::{CubicBezierSegment, Point};
use std::fmt::{self, Display};

const EPSILON: f64 = 1e-6;
const NEWTON_ITERATIONS: usize = 8;

/// Unit cubic Bézier curve with endpoints fixed at `(0, 0)` and `(1, 1)`.
///
/// The `x` axis is time and the `y` axis is advancement, both nominally from 0 to 1, which makes
/// this the same curve as the CSS `cubic-bezier()` timing function. Solving follows the WebKit
/// `UnitBezier` approach: a few Newton-Raphson iterations, then bisection if Newton stalls.
///
/// To experiment with different curves, see: <https://cubic-bezier.com/>
#[derive(Clone, Debug)]
pub struct UnitBezier {
    segment: CubicBezierSegment<f64>,
}

impl UnitBezier {
    /// Creates the curve from its two interior control points `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            segment: CubicBezierSegment {
                from: Point::new(0.0, 0.0),
                ctrl1: Point::new(x1, y1),
                ctrl2: Point::new(x2, y2),
                to: Point::new(1.0, 1.0),
            },
        }
    }

    /// Computes the curve's `y` value at horizontal position `x`.
    ///
    /// Inputs outside `[0, 1]` are pinned to the nearest endpoint of the parametric range whenever
    /// Newton's method does not converge on its own.
    pub fn solve(&self, x: f64) -> f64 {
        self.segment.y(self.solve_t_for_x(x))
    }

    /// Returns the CSS counterpart of the curve, e.g. `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    pub fn css(&self) -> String {
        self.to_string()
    }

    fn solve_t_for_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = self.segment.x(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.segment.dx(t);
            if slope.abs() < EPSILON {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        let mut t = x;
        if t < lo {
            return lo;
        }
        if t > hi {
            return hi;
        }
        while lo < hi {
            let sampled = self.segment.x(t);
            if (sampled - x).abs() < EPSILON {
                return t;
            }
            if x > sampled {
                lo = t;
            } else {
                hi = t;
            }
            let next = (hi - lo) / 2.0 + lo;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }
}

impl Display for UnitBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let CubicBezierSegment { ctrl1, ctrl2, .. } = self.segment;
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y
        )
    }
}

/// General cubic Bézier curve through four arbitrary points, sampled by its parameter `t`.
///
/// Unlike [`UnitBezier`], no solving is involved: `t` is the curve parameter, not a horizontal
/// position. Used to move objects along a path and orient them by its tangent.
#[derive(Clone, Debug)]
pub struct CubicBezierCurve {
    segment: CubicBezierSegment<f64>,
}

impl CubicBezierCurve {
    /// Creates a curve from its start point, two control points and end point, each as `[x, y]`.
    pub fn new(from: [f64; 2], ctrl1: [f64; 2], ctrl2: [f64; 2], to: [f64; 2]) -> Self {
        Self {
            segment: CubicBezierSegment {
                from: from.into(),
                ctrl1: ctrl1.into(),
                ctrl2: ctrl2.into(),
                to: to.into(),
            },
        }
    }

    /// The four defining points, in order.
    pub fn points(&self) -> [[f64; 2]; 4] {
        let CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        } = self.segment;
        [from.to_array(), ctrl1.to_array(), ctrl2.to_array(), to.to_array()]
    }

    pub fn calculate_x(&self, t: f64) -> f64 {
        self.segment.x(t)
    }

    pub fn calculate_y(&self, t: f64) -> f64 {
        self.segment.y(t)
    }

    /// Slope `dy/dx` of the curve at parameter `t`.
    ///
    /// Vertical tangents produce an infinite (or NaN, for a cusp) result.
    pub fn calculate_tangent(&self, t: f64) -> f64 {
        self.segment.dy(t) / self.segment.dx(t)
    }
}
