//! Frame-based animation with easing curves and value-range calculators.
//!
//! A [`FrameAnimation`] is configured through [`AnimationConfig`] and driven by a host through a
//! [`FrameScheduler`]. Progress can be shaped by any [`Easing`], including the output of a
//! [`Calculator`] or [`CompositeCalculator`].

pub mod prelude;

pub use flipbook_core::{
    animation::{AnimationConfig, Continuation, FrameAnimation, RenderState},
    bezier::{CubicBezierCurve, UnitBezier},
    calculator::{Calculator, CalculatorRange, CompositeCalculator, SinusCalculator},
    clock::{Clock, ManualClock, SystemClock},
    easing::{Easing, EasingFunction},
    error::{ConfigError, Result},
    geometry,
    interpolation::Lerp,
    readiness::{GateStatus, ReadinessGate},
    scheduler::{FrameHandle, FrameScheduler, ManualScheduler, TimerHandle},
    time_scale::TimeScale,
};
