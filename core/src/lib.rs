//! Core types for flipbook.
//!
//! Pure math (Bézier solving, easing, range calculators, geometry) lives alongside the stateful
//! [`animation::FrameAnimation`] driver and the clock and scheduler abstractions it runs on. The
//! `flipbook` crate re-exports everything commonly needed.

pub mod animation;
pub mod bezier;
pub mod calculator;
pub mod clock;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod interpolation;
pub mod readiness;
pub mod scheduler;
pub mod time_scale;
