//! Frame-based animation driver.
//!
//! A [`FrameAnimation`] turns time into discrete frame indices and hands each new frame to a render
//! callback. It owns no thread and no timer of its own: every wait is a request to a
//! [`FrameScheduler`], and the host resumes the animation by calling
//! [`on_delay_elapsed`](FrameAnimation::on_delay_elapsed) or
//! [`on_animation_frame`](FrameAnimation::on_animation_frame) with the handle it was given.
//!
//! # Example
//!
//! ```
//! use flipbook_core::animation::{AnimationConfig, Continuation};
//! use flipbook_core::clock::{Clock, ManualClock};
//! use flipbook_core::scheduler::ManualScheduler;
//! use std::rc::Rc;
//!
//! let clock = Rc::new(ManualClock::new(1_000_000.0));
//! let mut scheduler = ManualScheduler::new();
//! let mut animation = AnimationConfig::new()
//!     .name("spinner")
//!     .fps(10.0)
//!     .frames(vec!['|', '/', '-', '\\'])
//!     .user_state(Vec::new())
//!     .clock(clock.clone())
//!     .build(|state, rendered: &mut Vec<char>| {
//!         rendered.extend(state.frame);
//!         Continuation::Continue
//!     })
//!     .unwrap();
//!
//! animation.start(&mut scheduler);
//! assert_eq!(animation.user_state(), &vec!['|']);
//!
//! for handle in scheduler.advance_to(0.0) {
//!     animation.on_delay_elapsed(&mut scheduler, handle);
//! }
//! clock.advance(300.0);
//! for handle in scheduler.take_frames() {
//!     animation.on_animation_frame(&mut scheduler, handle, clock.monotonic_now());
//! }
//! assert_eq!(animation.user_state(), &vec!['|', '\\']);
//! ```

use crate::clock::{Clock, SystemClock};
use crate::easing::{Easing, EasingFunction};
use crate::error::{ConfigError, Result};
use crate::scheduler::{FrameHandle, FrameScheduler, TimerHandle};
use crate::time_scale::{TimeScale, MAX_SAFE_DURATION};
use std::fmt::Debug;
use std::rc::Rc;

const DEFAULT_FPS: f64 = 60.0;

/// Whether an animation should keep requesting frames after a render.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Continuation {
    /// Keep animating, unless the animation has reached its end.
    #[default]
    Continue,
    /// Stop requesting frames. The animation stays started and can still be rerendered.
    Stop,
}

impl From<bool> for Continuation {
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Continuation::Continue
        } else {
            Continuation::Stop
        }
    }
}

/// Snapshot handed to the render callback for every rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState<F> {
    /// Wall-clock time of the tick, in milliseconds since the Unix epoch.
    pub timestamp: f64,
    /// Length of one cycle, in milliseconds.
    pub duration: f64,
    /// Time since the end of the start delay, in milliseconds.
    pub elapsed: f64,
    /// Number of complete cycles so far.
    pub iteration: u64,
    /// Eased progress.
    pub progress: f64,
    /// `1.0 - progress`.
    pub regress: f64,
    /// Index into the frame sequence derived from `progress`; may be negative or out of range.
    pub frame_id: i64,
    /// Payload at `frame_id`, if frames were configured and the index is in range.
    pub frame: Option<F>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AnimationDuration {
    Derived,
    Fixed(f64),
    Infinite,
}

/// Builder for a [`FrameAnimation`].
///
/// The frame payload type and the user state type are chosen by [`frames`](Self::frames) and
/// [`user_state`](Self::user_state); both default to `()`.
#[derive(Debug)]
pub struct AnimationConfig<F, S> {
    name: Option<String>,
    preload_first_frame: bool,
    alternate: bool,
    skip_duplicates: bool,
    delay_ms: f64,
    duration: AnimationDuration,
    fps: f64,
    frames: Option<Vec<F>>,
    user_state: S,
    easing: Easing,
    clock: Option<Rc<dyn Clock>>,
}

impl Default for AnimationConfig<(), ()> {
    fn default() -> Self {
        Self {
            name: None,
            preload_first_frame: true,
            alternate: false,
            skip_duplicates: true,
            delay_ms: 0.0,
            duration: AnimationDuration::Derived,
            fps: DEFAULT_FPS,
            frames: None,
            user_state: (),
            easing: Easing::default(),
            clock: None,
        }
    }
}

impl AnimationConfig<(), ()> {
    /// Creates a new [`AnimationConfig`] with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F, S> AnimationConfig<F, S> {
    /// Configures the name used to identify the animation in logs.
    ///
    /// Defaults to the monotonic clock reading at the time of [`build`](Self::build).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Configures whether [`FrameAnimation::start`] renders the first frame immediately, before
    /// the delay begins. Defaults to `true`.
    pub fn preload_first_frame(mut self, preload_first_frame: bool) -> Self {
        self.preload_first_frame = preload_first_frame;
        self
    }

    /// Configures whether progress runs back and forth (0 → 1 → 0 → ...) forever instead of
    /// ending at `1.0`. Defaults to `false`.
    pub fn alternate(mut self, alternate: bool) -> Self {
        self.alternate = alternate;
        self
    }

    /// Configures whether scheduled ticks that land on the same frame index as the previously
    /// rendered frame are skipped. Defaults to `true`.
    pub fn skip_duplicates(mut self, skip_duplicates: bool) -> Self {
        self.skip_duplicates = skip_duplicates;
        self
    }

    /// Configures the delay, in milliseconds, between [`FrameAnimation::start`] and the first
    /// cycle.
    pub fn delay_ms(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Configures the length of one cycle, in milliseconds.
    ///
    /// [`f64::INFINITY`] makes the animation run effectively forever. Zero (or any value that is
    /// not positive) leaves the duration to be derived from the frame count and frame rate, which
    /// is also the default.
    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration = if duration_ms == f64::INFINITY {
            AnimationDuration::Infinite
        } else if duration_ms > 0.0 {
            AnimationDuration::Fixed(duration_ms)
        } else {
            AnimationDuration::Derived
        };
        self
    }

    /// Configures the target frame rate. Defaults to 60.
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Configures the easing applied to progress before it is converted to a frame index.
    /// Defaults to [`Easing::Linear`].
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Configures the clock used for start timestamps and for reconciling frame times. Defaults to
    /// a [`SystemClock`].
    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Configures the sequence of frame payloads; [`RenderState::frame`] is taken from it.
    pub fn frames<G>(self, frames: Vec<G>) -> AnimationConfig<G, S> {
        AnimationConfig {
            name: self.name,
            preload_first_frame: self.preload_first_frame,
            alternate: self.alternate,
            skip_duplicates: self.skip_duplicates,
            delay_ms: self.delay_ms,
            duration: self.duration,
            fps: self.fps,
            frames: Some(frames),
            user_state: self.user_state,
            easing: self.easing,
            clock: self.clock,
        }
    }

    /// Configures the state passed mutably to every render callback.
    pub fn user_state<T>(self, user_state: T) -> AnimationConfig<F, T> {
        AnimationConfig {
            name: self.name,
            preload_first_frame: self.preload_first_frame,
            alternate: self.alternate,
            skip_duplicates: self.skip_duplicates,
            delay_ms: self.delay_ms,
            duration: self.duration,
            fps: self.fps,
            frames: self.frames,
            user_state,
            easing: self.easing,
            clock: self.clock,
        }
    }

    /// Builds the animation, consuming the builder.
    ///
    /// Fails with [`ConfigError::UndeterminedDuration`] if no duration was configured and there
    /// are no frames to derive one from.
    ///
    /// # Arguments
    ///
    /// * `on_render` - Invoked with every newly rendered frame and the user state. Returning
    ///   [`Continuation::Stop`] ends the frame chain.
    pub fn build(
        self,
        on_render: impl FnMut(&RenderState<F>, &mut S) -> Continuation + 'static,
    ) -> Result<FrameAnimation<F, S>>
    where
        F: Clone,
    {
        let clock = self
            .clock
            .unwrap_or_else(|| Rc::new(SystemClock::new()) as Rc<dyn Clock>);
        let name = self
            .name
            .unwrap_or_else(|| clock.monotonic_now().to_string());
        let duration = match self.duration {
            AnimationDuration::Infinite => MAX_SAFE_DURATION,
            AnimationDuration::Fixed(duration_ms) => duration_ms,
            AnimationDuration::Derived => match &self.frames {
                Some(frames) => TimeScale::derive_duration(self.fps, frames.len()),
                None => return Err(ConfigError::UndeterminedDuration { name }),
            },
        };
        let time_origin = clock.wall_now() - clock.monotonic_now().trunc();
        tracing::debug!(name = %name, duration, fps = self.fps, "animation configured");
        Ok(FrameAnimation {
            name,
            time_scale: TimeScale::new(self.delay_ms, duration, self.fps, self.alternate),
            preload_first_frame: self.preload_first_frame,
            skip_duplicates: self.skip_duplicates,
            frames: self.frames,
            easing: self.easing,
            on_render: Box::new(on_render),
            user_state: self.user_state,
            clock,
            time_origin,
            start_timestamp: None,
            delay_timer: None,
            pending_frame: None,
            first_frame_rendered: false,
            latest_render_state: None,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FrameKind {
    /// Part of the self-scheduling chain started by the delay timer.
    Schedule,
    /// One-off refresh requested by `rerender_if_active`.
    Rerender,
}

#[derive(Clone, Copy, Debug)]
struct PendingFrame {
    handle: FrameHandle,
    kind: FrameKind,
}

/// Render callback stored by a [`FrameAnimation`].
type RenderFn<F, S> = Box<dyn FnMut(&RenderState<F>, &mut S) -> Continuation>;

/// Drives a render callback through time, one discrete frame at a time.
///
/// Lifecycle: idle until [`start`](Self::start); then delaying until the delay timer fires; then
/// scheduling one frame after another until progress reaches `1.0` (never, if alternating) or the
/// callback returns [`Continuation::Stop`]. [`stop`](Self::stop) returns to idle from any state.
///
/// At most one delay timer and one frame request are pending at any time.
pub struct FrameAnimation<F, S = ()> {
    name: String,
    time_scale: TimeScale,
    preload_first_frame: bool,
    skip_duplicates: bool,
    frames: Option<Vec<F>>,
    easing: Easing,
    on_render: RenderFn<F, S>,
    user_state: S,
    clock: Rc<dyn Clock>,
    time_origin: f64,
    start_timestamp: Option<f64>,
    delay_timer: Option<TimerHandle>,
    pending_frame: Option<PendingFrame>,
    first_frame_rendered: bool,
    latest_render_state: Option<RenderState<F>>,
}

impl<F: Clone, S> FrameAnimation<F, S> {
    /// Name used to identify the animation in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of one cycle, in milliseconds, after deriving or clamping.
    pub fn duration(&self) -> f64 {
        self.time_scale.duration()
    }

    /// Delay before the first cycle, in milliseconds.
    pub fn delay(&self) -> f64 {
        self.time_scale.delay()
    }

    /// Time scale converting timestamps into progress and frame indices.
    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    /// Wall-clock timestamp passed to the last [`start`](Self::start), or `None` while idle.
    pub fn start_timestamp(&self) -> Option<f64> {
        self.start_timestamp
    }

    /// Whether the animation has been started and not stopped since. Stays `true` after the last
    /// frame.
    pub fn has_started(&self) -> bool {
        self.start_timestamp.is_some()
    }

    /// Whether the start delay timer is still waiting to fire.
    pub fn is_delay_pending(&self) -> bool {
        self.delay_timer.is_some()
    }

    /// Whether a frame has been requested from the scheduler and not yet delivered.
    pub fn is_frame_pending(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// The most recently rendered frame's state; cleared by [`stop`](Self::stop).
    pub fn latest_render_state(&self) -> Option<&RenderState<F>> {
        self.latest_render_state.as_ref()
    }

    /// State passed to the render callback.
    pub fn user_state(&self) -> &S {
        &self.user_state
    }

    /// Mutable access to the state passed to the render callback.
    pub fn user_state_mut(&mut self) -> &mut S {
        &mut self.user_state
    }

    /// Replaces the user state passed to subsequent render callbacks.
    pub fn set_state(&mut self, user_state: S) {
        self.user_state = user_state;
    }

    /// Starts the animation at the clock's current wall-clock time. See [`start_at`](Self::start_at).
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        let now = self.clock.wall_now();
        self.start_at(scheduler, now);
    }

    /// Starts the animation as if it had started at `start_timestamp`.
    ///
    /// Does nothing if already started. Otherwise renders the first frame immediately (when
    /// preloading is enabled) and then arms the delay timer.
    pub fn start_at(&mut self, scheduler: &mut dyn FrameScheduler, start_timestamp: f64) {
        if self.has_started() {
            tracing::trace!(name = %self.name, "animation already started");
            return;
        }
        tracing::debug!(name = %self.name, start_timestamp, "starting animation");
        self.start_timestamp = Some(start_timestamp);
        self.first_frame_rendered = false;
        if self.preload_first_frame {
            let monotonic_now = self.clock.monotonic_now();
            self.tick(scheduler, monotonic_now, false, false);
        }
        self.delay_timer = Some(scheduler.set_timeout(self.time_scale.delay()));
    }

    /// Returns the animation to idle, cancelling anything pending. Safe to call at any time.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.has_started() {
            tracing::debug!(name = %self.name, "stopping animation");
        }
        self.start_timestamp = None;
        self.first_frame_rendered = false;
        if let Some(handle) = self.delay_timer.take() {
            scheduler.clear_timeout(handle);
        }
        if let Some(pending) = self.pending_frame.take() {
            scheduler.cancel_frame(pending.handle);
        }
        self.latest_render_state = None;
    }

    /// Stops, then starts again at the clock's current wall-clock time.
    pub fn restart(&mut self, scheduler: &mut dyn FrameScheduler) {
        let now = self.clock.wall_now();
        self.restart_at(scheduler, now);
    }

    /// Stops, then starts again at `start_timestamp`, regardless of the current state.
    pub fn restart_at(&mut self, scheduler: &mut dyn FrameScheduler, start_timestamp: f64) {
        tracing::debug!(name = %self.name, start_timestamp, "restarting animation");
        self.stop(scheduler);
        self.start_at(scheduler, start_timestamp);
    }

    /// Requests a single refresh of the current frame, e.g. after the drawing surface was resized.
    ///
    /// Only has an effect while started and while neither the delay timer nor a frame is pending;
    /// the refresh neither skips duplicates nor continues the frame chain.
    pub fn rerender_if_active(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.has_started() || self.delay_timer.is_some() || self.pending_frame.is_some() {
            return;
        }
        tracing::debug!(name = %self.name, "requesting rerender");
        self.pending_frame = Some(PendingFrame {
            handle: scheduler.request_frame(),
            kind: FrameKind::Rerender,
        });
    }

    /// Host callback for an elapsed delay timer. Handles other than the pending one are ignored.
    pub fn on_delay_elapsed(&mut self, scheduler: &mut dyn FrameScheduler, handle: TimerHandle) {
        if self.delay_timer != Some(handle) {
            tracing::trace!(name = %self.name, ?handle, "ignoring stale delay timer");
            return;
        }
        self.delay_timer = None;
        let monotonic_now = self.clock.monotonic_now();
        self.tick(scheduler, monotonic_now, true, true);
    }

    /// Host callback for a display refresh, with the monotonic time of that refresh in
    /// milliseconds. Handles other than the pending one are ignored.
    pub fn on_animation_frame(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        handle: FrameHandle,
        monotonic_now: f64,
    ) {
        let pending = match self.pending_frame {
            Some(pending) if pending.handle == handle => pending,
            _ => {
                tracing::trace!(name = %self.name, ?handle, "ignoring stale frame");
                return;
            }
        };
        self.pending_frame = None;
        match pending.kind {
            FrameKind::Schedule => self.tick(scheduler, monotonic_now, true, true),
            FrameKind::Rerender => self.tick(scheduler, monotonic_now, false, false),
        }
    }

    fn tick(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        monotonic_now: f64,
        request_next_frame: bool,
        skip_duplicates: bool,
    ) {
        let Some(start_timestamp) = self.start_timestamp else {
            return;
        };
        // Until something has been rendered, time is pinned to the start so the first frame is
        // always the one at the start position.
        let timestamp = if self.first_frame_rendered {
            self.time_origin + monotonic_now.trunc()
        } else {
            start_timestamp
        };
        let elapsed = self.time_scale.elapsed(timestamp, start_timestamp);
        let iteration = self.time_scale.iteration(elapsed);
        let progress = self.easing.calc(self.time_scale.progress(elapsed));
        let frame_id = self.time_scale.frame_id(progress);
        tracing::trace!(name = %self.name, elapsed, progress, frame_id, "animation tick");

        let has_more_frames = progress < 1.0 || self.time_scale.alternate();
        if self.skip_duplicates && skip_duplicates {
            let is_duplicate = self
                .latest_render_state
                .as_ref()
                .is_some_and(|latest| latest.frame_id == frame_id);
            if is_duplicate {
                tracing::trace!(name = %self.name, frame_id, "skipping duplicate frame");
                if !request_next_frame {
                    return;
                }
                if has_more_frames {
                    self.schedule_next_frame(scheduler);
                } else {
                    tracing::debug!(name = %self.name, progress, "animation finished");
                }
                return;
            }
        }

        let state = RenderState {
            timestamp,
            duration: self.time_scale.duration(),
            elapsed,
            iteration,
            progress,
            regress: 1.0 - progress,
            frame_id,
            frame: self.frame_at(frame_id),
        };
        let continuation = (self.on_render)(&state, &mut self.user_state);
        self.latest_render_state = Some(state);
        self.first_frame_rendered = true;

        if continuation == Continuation::Continue && has_more_frames {
            if request_next_frame {
                self.schedule_next_frame(scheduler);
            }
        } else if request_next_frame {
            tracing::debug!(name = %self.name, ?continuation, progress, "animation finished");
        }
    }

    fn schedule_next_frame(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(previous) = self.pending_frame.take() {
            scheduler.cancel_frame(previous.handle);
        }
        self.pending_frame = Some(PendingFrame {
            handle: scheduler.request_frame(),
            kind: FrameKind::Schedule,
        });
    }

    fn frame_at(&self, frame_id: i64) -> Option<F> {
        let frames = self.frames.as_ref()?;
        let index = usize::try_from(frame_id).ok()?;
        frames.get(index).cloned()
    }
}

impl<F, S> Debug for FrameAnimation<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameAnimation")
            .field("name", &self.name)
            .field("time_scale", &self.time_scale)
            .field("easing", &self.easing)
            .field("start_timestamp", &self.start_timestamp)
            .field("delay_timer", &self.delay_timer)
            .field("pending_frame", &self.pending_frame)
            .field("first_frame_rendered", &self.first_frame_rendered)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::scheduler::ManualScheduler;

    fn manual_clock() -> Rc<ManualClock> {
        Rc::new(ManualClock::new(1_000_000.0))
    }

    #[test]
    fn derives_duration_from_frames() {
        let animation = AnimationConfig::new()
            .fps(24.0)
            .frames(vec![0, 1, 2])
            .clock(manual_clock())
            .build(|_, _| Continuation::Continue)
            .unwrap();

        assert_eq!(animation.duration(), 84.0);
    }

    #[test]
    fn explicit_duration_wins_over_frames() {
        let animation = AnimationConfig::new()
            .duration_ms(500.0)
            .frames(vec![0, 1, 2])
            .clock(manual_clock())
            .build(|_, _| Continuation::Continue)
            .unwrap();

        assert_eq!(animation.duration(), 500.0);
    }

    #[test]
    fn infinite_duration_is_clamped() {
        let animation = AnimationConfig::new()
            .duration_ms(f64::INFINITY)
            .clock(manual_clock())
            .build(|_, _| Continuation::Continue)
            .unwrap();

        assert_eq!(animation.duration(), MAX_SAFE_DURATION);
    }

    #[test]
    fn when_no_frames_and_no_duration_then_build_fails() {
        let result = AnimationConfig::new()
            .name("orphan")
            .duration_ms(0.0)
            .clock(manual_clock())
            .build(|_, _| Continuation::Continue);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::UndeterminedDuration {
                name: "orphan".to_string()
            }
        );
    }

    #[test]
    fn default_name_comes_from_clock() {
        let clock = manual_clock();
        clock.advance(42.0);
        let animation = AnimationConfig::new()
            .duration_ms(100.0)
            .clock(clock)
            .build(|_, _| Continuation::Continue)
            .unwrap();

        assert_eq!(animation.name(), "42");
    }

    #[test]
    fn out_of_range_frame_ids_have_no_payload() {
        let clock = manual_clock();
        let mut scheduler = ManualScheduler::new();
        let mut animation = AnimationConfig::new()
            .duration_ms(1000.0)
            .fps(2.0)
            .frames(vec!["a", "b"])
            .easing(Easing::Back(1.70158))
            .clock(clock.clone())
            .build(|_, _| Continuation::Continue)
            .unwrap();

        assert_eq!(animation.frame_at(-1), None);
        assert_eq!(animation.frame_at(1), Some("b"));
        assert_eq!(animation.frame_at(2), None);

        animation.start(&mut scheduler);
        let latest = animation.latest_render_state().unwrap();
        assert_eq!(latest.frame_id, 0);
        assert_eq!(latest.frame, Some("a"));
        assert_eq!(latest.timestamp, 1_000_000.0);
    }

    #[test]
    fn continuation_from_bool() {
        assert_eq!(Continuation::from(true), Continuation::Continue);
        assert_eq!(Continuation::from(false), Continuation::Stop);
    }
}
