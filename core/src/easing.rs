//! Contains the [`Easing`] enum which names the catalog of progress-shaping curves available to
//! calculators and animations, the [`EasingFunction`] trait for defining custom easings, and the
//! combinators that derive ease-out, ease-in-out and ease-out-in curves from an ease-in curve.

use crate::bezier::UnitBezier;
use dyn_clone::{clone_trait_object, DynClone};
use lazy_static::lazy_static;
use std::f64::consts::PI;
use std::fmt::Debug;

/// Provides an easing function, AKA animation timing function, for non-linear shaping of
/// normalized progress.
///
/// Easing functions and [`Lerp`](crate::interpolation::Lerp) are complementary: the easing decides
/// _how far along_ a transition is, and the lerp turns that into a value. Applying an easing to
/// the `x` of a lerp has the same effect as using the easing directly, because linear
/// interpolation constitutes an identity function over normalized `y`.
pub trait EasingFunction: Debug + DynClone + Send + Sync {
    /// Computes the `y` value along the curve for a given `x` position.
    ///
    /// Expects `x` to be normalized (from 0 to 1) and returns a normalized y-value which is
    /// typically between 0 and 1, but may be outside that range (e.g. [`Easing::Back`]).
    fn calc(&self, x: f64) -> f64;
}

clone_trait_object!(EasingFunction);

/// Specifies a standard or custom [`EasingFunction`].
///
/// Available easings include:
/// - CSS standard: `Ease`, `In`, `Out`, `InOut` corresponding to `ease`, `ease-in`, `ease-out` and
///   `ease-in-out`, with the exact control points browsers use.
/// - Closed-form polynomial, exponential, elastic, circular and bounce curves.
/// - Parametrized curves: [`Power`](Easing::Power), [`Back`](Easing::Back) and
///   [`Elastic`](Easing::Elastic).
/// - User-defined functions via [`Custom`](Easing::Custom), including the combinators in this
///   module ([`EaseOutTransform`], [`EaseInOutTransform`], [`EaseOutInTransform`]).
#[derive(Clone, Debug, Default)]
pub enum Easing {
    /// Linear easing, i.e. no easing or curve, only straight-line progress.
    #[default]
    Linear,
    /// Curve equivalent to CSS
    /// [`ease`](https://developer.mozilla.org/en-US/docs/Web/CSS/easing-function#ease), i.e.
    /// `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    Ease,
    /// Curve equivalent to CSS `ease-in`, i.e. `cubic-bezier(0.42, 0, 1, 1)`.
    In,
    /// Curve equivalent to CSS `ease-out`, i.e. `cubic-bezier(0, 0, 0.58, 1)`.
    Out,
    /// Curve equivalent to CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`.
    InOut,
    /// [`In`](Self::In) reflected into an ease-out for the first half and replayed as an ease-in for
    /// the second half. Fast at both ends, slow through the middle.
    OutIn,
    /// Sinusoidal-looking ease-in-out approximated by `cubic-bezier(0.37, 0, 0.63, 1)`.
    ///
    /// See: <https://easings.net/#easeInOutSine>
    InOutSine,
    /// Quadratic (`x^2`) easing that starts slowly and ends quickly.
    InQuad,
    /// Quadratic easing that starts quickly and ends slowly.
    OutQuad,
    /// Cubic (`x^3`) easing that starts slowly and ends quickly.
    InCubic,
    /// Cubic easing that starts quickly and ends slowly.
    OutCubic,
    /// Exponential easing that starts slowly and ends quickly. Exactly `0` at `x = 0`.
    ///
    /// See: <https://easings.net/#easeInExpo>
    InExpo,
    /// Exponential easing that starts quickly and ends slowly. Exactly `1` at `x = 1`.
    ///
    /// See: <https://easings.net/#easeOutExpo>
    OutExpo,
    /// Oscillates with growing amplitude around the start value before snapping to the end.
    ///
    /// See: <https://easings.net/#easeInElastic>
    InElastic,
    /// Overshoots the end value and oscillates with decaying amplitude until it settles.
    ///
    /// See: <https://easings.net/#easeOutElastic>
    OutElastic,
    /// A curve that looks like the lower-right quarter of a circle: `1 - sin(acos(x))`.
    Circ,
    /// Bounces off the start value with growing height, then lands on the end value.
    Bounce,
    /// `x` raised to an arbitrary power; `Power(2.0)` is [`InQuad`](Self::InQuad).
    Power(f64),
    /// Moves backward before accelerating forward; the argument is the elasticity (overshoot)
    /// factor. `Back(1.70158)` is the classic
    /// [`easeInBack`](https://easings.net/#easeInBack).
    Back(f64),
    /// Exponentially growing cosine oscillation; the argument is the number of half-segments of
    /// oscillation over the curve, in thirds of a turn.
    Elastic(f64),
    /// User-defined easing, such as an ad-hoc [`CubicBezierEasing`] or a combinator.
    Custom(Box<dyn EasingFunction>),
}

impl Easing {
    /// Wraps any [`EasingFunction`] as [`Easing::Custom`].
    pub fn custom(easing: impl EasingFunction + 'static) -> Self {
        Self::Custom(Box::new(easing))
    }

    /// Ad-hoc CSS-style cubic Bézier curve with control points `(x1, y1)` and `(x2, y2)`.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::custom(CubicBezierEasing::new(x1, y1, x2, y2))
    }
}

impl EasingFunction for Easing {
    fn calc(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Ease => EASE_WEB.calc(x),
            Self::In => EASE_IN.calc(x),
            Self::Out => EASE_OUT.calc(x),
            Self::InOut => EASE_IN_OUT.calc(x),
            Self::OutIn => EASE_OUT_IN.calc(x),
            Self::InOutSine => EASE_IN_OUT_SINE.calc(x),
            Self::InQuad => x * x,
            Self::OutQuad => 1.0 - (1.0 - x).powi(2),
            Self::InCubic => x * x * x,
            Self::OutCubic => 1.0 - (1.0 - x).powi(3),
            Self::InExpo => in_expo(x),
            Self::OutExpo => out_expo(x),
            Self::InElastic => in_elastic(x),
            Self::OutElastic => out_elastic(x),
            Self::Circ => 1.0 - x.acos().sin(),
            Self::Bounce => bounce(x),
            Self::Power(power) => x.powf(*power),
            Self::Back(elasticity) => x * x * ((elasticity + 1.0) * x - elasticity),
            Self::Elastic(segments) => {
                2f64.powf(10.0 * (x - 1.0)) * (20.0 * PI * segments / 3.0 * x).cos()
            }
            Self::Custom(custom) => custom.calc(x),
        }
    }
}

lazy_static! {
    static ref EASE_WEB: CubicBezierEasing = CubicBezierEasing::new(0.25, 0.1, 0.25, 1.0);
    static ref EASE_IN: CubicBezierEasing = CubicBezierEasing::new(0.42, 0.0, 1.0, 1.0);
    static ref EASE_OUT: CubicBezierEasing = CubicBezierEasing::new(0.0, 0.0, 0.58, 1.0);
    static ref EASE_IN_OUT: CubicBezierEasing = CubicBezierEasing::new(0.42, 0.0, 0.58, 1.0);
    static ref EASE_IN_OUT_SINE: CubicBezierEasing = CubicBezierEasing::new(0.37, 0.0, 0.63, 1.0);
    static ref EASE_OUT_IN: EaseOutInTransform = EaseOutInTransform::new(Easing::In);
}

/// Angular frequency of the standard elastic curves, `2π/3`.
const ELASTIC_FREQUENCY: f64 = 2.0 * PI / 3.0;

fn in_expo(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * x - 10.0)
    }
}

fn out_expo(x: f64) -> f64 {
    if x == 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * x)
    }
}

fn in_elastic(x: f64) -> f64 {
    if x == 0.0 || x == 1.0 {
        return x;
    }
    -(2f64.powf(10.0 * x - 10.0)) * ((x * 10.0 - 10.75) * ELASTIC_FREQUENCY).sin()
}

fn out_elastic(x: f64) -> f64 {
    if x == 0.0 || x == 1.0 {
        return x;
    }
    2f64.powf(-10.0 * x) * ((x * 10.0 - 0.75) * ELASTIC_FREQUENCY).sin() + 1.0
}

// Each bounce is half as wide as the previous one; the bounces are laid out right-to-left so that
// the widest arc lands on `x = 1`. Negative inputs would never reach a breakpoint, hence the floor.
fn bounce(x: f64) -> f64 {
    let x = x.max(0.0);
    let (mut offset, mut width) = (0.0, 1.0);
    loop {
        if x >= (7.0 - 4.0 * offset) / 11.0 {
            return -((11.0 - 6.0 * offset - 11.0 * x) / 4.0).powi(2) + width * width;
        }
        offset += width;
        width /= 2.0;
    }
}

/// Remaps a signed value in `[-1, 1]` through a `[0, 1]` easing and back to `[-1, 1]`.
///
/// Useful for shaping oscillations (e.g. the output of `sin`) without losing their sign.
pub fn ease_sine(value: f64, easing: &impl EasingFunction) -> f64 {
    easing.calc((value + 1.0) / 2.0) * 2.0 - 1.0
}

/// Easing function defined by a cubic bezier curve with the start and end points fixed at `(0, 0)`
/// and `(1, 1)`, i.e. only the control points are specified.
///
/// The CSS standard easings use `CubicBezierEasing`. Instances of this may be created and used in
/// [`Easing::Custom`] in cases where the standard easings do not suffice.
#[derive(Clone, Debug)]
pub struct CubicBezierEasing {
    curve: UnitBezier,
}

impl CubicBezierEasing {
    /// Creates a new [`CubicBezierEasing`] with control points `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            curve: UnitBezier::new(x1, y1, x2, y2),
        }
    }

    /// The underlying curve, e.g. to obtain its CSS notation.
    pub fn curve(&self) -> &UnitBezier {
        &self.curve
    }
}

impl EasingFunction for CubicBezierEasing {
    fn calc(&self, x: f64) -> f64 {
        self.curve.solve(x)
    }
}

/// Reflects an ease-in curve into its ease-out counterpart: `speed - base(speed * (1 - t))`.
///
/// With the default `speed` of `1` this is the point reflection of `base` through `(0.5, 0.5)`.
/// [`EaseInOutTransform`] uses a speed of `2` to produce a curve spanning `[0, 2]`, which it then
/// halves.
#[derive(Clone, Debug)]
pub struct EaseOutTransform {
    base: Easing,
    speed: f64,
}

impl EaseOutTransform {
    pub fn new(base: Easing) -> Self {
        Self::with_speed(base, 1.0)
    }

    pub fn with_speed(base: Easing, speed: f64) -> Self {
        Self { base, speed }
    }
}

impl EasingFunction for EaseOutTransform {
    fn calc(&self, t: f64) -> f64 {
        self.speed - self.base.calc(self.speed * (1.0 - t))
    }
}

/// Plays `base` over the first half and its ease-out reflection over the second half.
#[derive(Clone, Debug)]
pub struct EaseInOutTransform {
    base: Easing,
    ease_out: EaseOutTransform,
}

impl EaseInOutTransform {
    pub fn new(base: Easing) -> Self {
        Self {
            ease_out: EaseOutTransform::with_speed(base.clone(), 2.0),
            base,
        }
    }
}

impl EasingFunction for EaseInOutTransform {
    fn calc(&self, t: f64) -> f64 {
        if t < 0.5 {
            self.base.calc(2.0 * t) / 2.0
        } else {
            self.ease_out.calc(t) / 2.0
        }
    }
}

/// Mirror of [`EaseInOutTransform`]: the ease-out reflection over the first half, then `base`.
#[derive(Clone, Debug)]
pub struct EaseOutInTransform {
    base: Easing,
    ease_out: EaseOutTransform,
}

impl EaseOutInTransform {
    pub fn new(base: Easing) -> Self {
        Self {
            ease_out: EaseOutTransform::new(base.clone()),
            base,
        }
    }
}

impl EasingFunction for EaseOutInTransform {
    fn calc(&self, t: f64) -> f64 {
        if t < 0.5 {
            self.ease_out.calc(2.0 * t) / 2.0
        } else {
            (self.base.calc(2.0 * t - 1.0) + 1.0) / 2.0
        }
    }
}

/// Shorthand for `Easing::custom(EaseOutTransform::with_speed(base, speed))`.
pub fn to_ease_out(base: Easing, speed: f64) -> Easing {
    Easing::custom(EaseOutTransform::with_speed(base, speed))
}

/// Shorthand for `Easing::custom(EaseInOutTransform::new(base))`.
pub fn to_ease_in_out(base: Easing) -> Easing {
    Easing::custom(EaseInOutTransform::new(base))
}

/// Shorthand for `Easing::custom(EaseOutInTransform::new(base))`.
pub fn to_ease_out_in(base: Easing) -> Easing {
    Easing::custom(EaseOutInTransform::new(base))
}
