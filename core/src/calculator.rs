//! Value-range calculators: map an input coordinate through an easing curve into an output range.
//!
//! A [`Calculator`] covers a single input interval; a [`CompositeCalculator`] stitches several
//! intervals together piecewise. Both clamp their input to the domain and their output to the
//! nominal output range, so overshooting easings such as [`Easing::Back`] are bounded. Because the
//! result depends only on the input, calculators also implement [`EasingFunction`] and can shape the
//! progress of an animation directly.

use crate::easing::{Easing, EasingFunction};
use crate::error::{ConfigError, Result};
use crate::interpolation::{clamp_between, normalize, Lerp};
use std::f64::consts::PI;

/// One segment of a calculator: an input interval, an output interval and the easing between them.
///
/// The input interval must satisfy `min_x <= max_x`; the output interval may run in either
/// direction. Defaults to the unit square with [`Easing::Linear`].
#[derive(Clone, Debug)]
pub struct CalculatorRange {
    min_x: f64,
    max_x: f64,
    start_y: f64,
    end_y: f64,
    easing: Easing,
}

impl Default for CalculatorRange {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 1.0,
            start_y: 0.0,
            end_y: 1.0,
            easing: Easing::Linear,
        }
    }
}

impl CalculatorRange {
    /// Creates a new [`CalculatorRange`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the input interval `[min_x, max_x]`.
    pub fn x_range(mut self, min_x: f64, max_x: f64) -> Self {
        self.min_x = min_x;
        self.max_x = max_x;
        self
    }

    /// Configures the output interval. `start_y` is produced at `min_x` and `end_y` at `max_x`.
    pub fn y_range(mut self, start_y: f64, end_y: f64) -> Self {
        self.start_y = start_y;
        self.end_y = end_y;
        self
    }

    /// Configures a constant output, i.e. an output interval consisting of the single value `y`.
    pub fn hold(self, y: f64) -> Self {
        self.y_range(y, y)
    }

    /// Configures the easing applied to the normalized input position.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    fn validate(&self, index: Option<usize>, count: usize) -> Result<()> {
        // Written as a negated comparison so that NaN bounds are rejected too.
        if !(self.min_x <= self.max_x) {
            return Err(ConfigError::InvertedRange {
                min_x: self.min_x,
                max_x: self.max_x,
                index,
                count,
            });
        }
        Ok(())
    }

    fn evaluate(&self, x: f64) -> f64 {
        let x = num_traits::clamp(x, self.min_x, self.max_x);
        let progress = normalize(x, self.min_x, self.max_x);
        let y = self.start_y.lerp(&self.end_y, self.easing.calc(progress));
        clamp_between(y, self.start_y, self.end_y)
    }
}

/// Maps inputs from a single [`CalculatorRange`].
///
/// # Example
///
/// ```
/// use flipbook_core::calculator::{Calculator, CalculatorRange};
///
/// let calculator = Calculator::new(CalculatorRange::new().y_range(0.0, 100.0)).unwrap();
///
/// assert_eq!(calculator.calculate(-0.1), 0.0);
/// assert_eq!(calculator.calculate(0.25), 25.0);
/// assert_eq!(calculator.calculate(1.1), 100.0);
/// ```
#[derive(Clone, Debug)]
pub struct Calculator {
    range: CalculatorRange,
}

impl Calculator {
    /// Creates the calculator, failing if the range's input interval is inverted.
    pub fn new(range: CalculatorRange) -> Result<Self> {
        range.validate(None, 1)?;
        Ok(Self { range })
    }

    /// Maps `x` into the output range. Inputs outside the domain are clamped to it.
    pub fn calculate(&self, x: f64) -> f64 {
        self.range.evaluate(x)
    }
}

impl EasingFunction for Calculator {
    fn calc(&self, x: f64) -> f64 {
        self.calculate(x)
    }
}

/// Maps inputs piecewise across several [`CalculatorRange`]s.
///
/// Ranges are expected in ascending order of `min_x`. Each range becomes active at its own `min_x`
/// and stays active until the next range's `min_x`; the last range stays active to the end of the
/// domain. When ranges are disjoint, an input in a gap therefore belongs to the range whose start
/// it most recently passed, and is clamped onto that range's end value.
///
/// The overall domain spans from the smallest `min_x` to the largest `max_x`; inputs outside it are
/// clamped before a range is selected.
#[derive(Clone, Debug)]
pub struct CompositeCalculator {
    ranges: Vec<CalculatorRange>,
    min_x: f64,
    max_x: f64,
}

impl CompositeCalculator {
    /// Creates the calculator, failing if there are no ranges or any input interval is inverted.
    pub fn new(ranges: impl IntoIterator<Item = CalculatorRange>) -> Result<Self> {
        let ranges: Vec<CalculatorRange> = ranges.into_iter().collect();
        if ranges.is_empty() {
            return Err(ConfigError::EmptyComposite);
        }
        let count = ranges.len();
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for (index, range) in ranges.iter().enumerate() {
            range.validate(Some(index), count)?;
            min_x = min_x.min(range.min_x);
            max_x = max_x.max(range.max_x);
        }
        Ok(Self {
            ranges,
            min_x,
            max_x,
        })
    }

    /// Maps `x` through whichever range is active at that position.
    pub fn calculate(&self, x: f64) -> f64 {
        let x = num_traits::clamp(x, self.min_x, self.max_x);
        self.select(x).evaluate(x)
    }

    /// Overall input domain `(min_x, max_x)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    // A NaN input matches no range; it falls back to the first one, which passes NaN through.
    fn select(&self, x: f64) -> &CalculatorRange {
        let next_starts = self
            .ranges
            .iter()
            .skip(1)
            .map(|range| range.min_x)
            .chain(std::iter::once(f64::INFINITY));
        self.ranges
            .iter()
            .zip(next_starts)
            .find(|(range, next_min_x)| range.min_x <= x && x < *next_min_x)
            .map_or(&self.ranges[0], |(range, _)| range)
    }
}

impl EasingFunction for CompositeCalculator {
    fn calc(&self, x: f64) -> f64 {
        self.calculate(x)
    }
}

/// Sinusoid used to lay objects out along a wave, rather than to ease time.
///
/// `amplitude` is the wavelength (period) in input units and `height` the peak-to-peak size; the
/// wave is phase-shifted by `x` and offset vertically by `y`. Progress runs from `0` to `1` across
/// `width` input units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinusCalculator {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    ratio: f64,
}

impl SinusCalculator {
    pub fn new(x: f64, y: f64, width: f64, height: f64, amplitude: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ratio: 2.0 * PI / amplitude,
        }
    }

    /// Height of the wave at `progress`.
    pub fn calculate_y(&self, progress: f64) -> f64 {
        self.height / 2.0 * (self.phase(progress)).sin() + self.y
    }

    /// Slope of the wave at `progress`, in output units per input unit.
    pub fn calculate_tangent(&self, progress: f64) -> f64 {
        self.height / 2.0 * self.ratio * (self.phase(progress)).cos()
    }

    fn phase(&self, progress: f64) -> f64 {
        self.ratio * (self.width * progress + self.x)
    }
}
