//! Configuration errors reported when building calculators and animations.

use thiserror::Error;

/// Errors raised synchronously by constructors when a configuration is ambiguous.
///
/// Numeric edge cases (out-of-domain inputs, degenerate ranges, flat Bézier slopes) are never
/// reported as errors; they are resolved by clamping or saturation instead.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A calculator range whose input interval is inverted (`min_x > max_x`) or not comparable.
    ///
    /// `index` is the zero-based position of the offending range inside a composite calculator, or
    /// `None` for a single calculator.
    #[error("{}", describe_inverted_range(.min_x, .max_x, .index, .count))]
    InvertedRange {
        min_x: f64,
        max_x: f64,
        index: Option<usize>,
        count: usize,
    },

    /// A composite calculator was created without any sub-ranges.
    #[error("composite calculator requires at least one range")]
    EmptyComposite,

    /// An animation has no explicit duration and no frame sequence to derive one from.
    #[error("animation `{name}` has neither a duration nor frames to derive one from")]
    UndeterminedDuration { name: String },
}

/// Result type for configuration-time operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn describe_inverted_range(
    min_x: &f64,
    max_x: &f64,
    index: &Option<usize>,
    count: &usize,
) -> String {
    match index {
        Some(index) => format!(
            "minX ({min_x}) shall not be more than maxX ({max_x}) in #{}/{count}",
            index + 1
        ),
        None => format!("minX ({min_x}) shall not be more than maxX ({max_x})"),
    }
}
