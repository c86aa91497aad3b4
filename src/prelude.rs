//! Includes the types commonly used for building and driving animations.

pub use crate::{
    AnimationConfig, Calculator, CalculatorRange, Clock, CompositeCalculator, Continuation,
    Easing, EasingFunction, FrameAnimation, FrameScheduler, RenderState,
};
