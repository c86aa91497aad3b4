//! Scheduling primitives consumed by the animation engine.
//!
//! The engine never waits. It asks a [`FrameScheduler`] for a one-shot timer (the start delay) or
//! for a callback on the next display refresh, stores the returned handle, and returns. When the
//! timer or frame fires, the host calls back into the engine with that handle:
//! [`FrameAnimation::on_delay_elapsed`](crate::animation::FrameAnimation::on_delay_elapsed) and
//! [`FrameAnimation::on_animation_frame`](crate::animation::FrameAnimation::on_animation_frame).

use std::num::NonZeroU64;

/// Identifies a pending one-shot timer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimerHandle(NonZeroU64);

impl TimerHandle {
    /// Wraps a scheduler-assigned timer id.
    pub fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Scheduler-assigned timer id.
    pub fn id(&self) -> NonZeroU64 {
        self.0
    }
}

/// Identifies a pending next-frame request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FrameHandle(NonZeroU64);

impl FrameHandle {
    /// Wraps a scheduler-assigned frame request id.
    pub fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Scheduler-assigned frame request id.
    pub fn id(&self) -> NonZeroU64 {
        self.0
    }
}

/// Host-provided timer and per-refresh scheduling.
///
/// Implementations only record requests; delivering them back to the engine is the host's job.
/// Cancelling a handle that has already fired or been cancelled must be a no-op.
pub trait FrameScheduler {
    /// Requests a single callback after `delay_ms` milliseconds.
    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle;

    /// Cancels a timer returned by [`set_timeout`](Self::set_timeout).
    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Requests a single callback at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a request returned by [`request_frame`](Self::request_frame).
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    handle: TimerHandle,
    due: f64,
}

/// In-memory [`FrameScheduler`] with virtual time, for tests and headless hosts.
///
/// Timers become due when virtual time is advanced past their deadline with
/// [`advance_to`](Self::advance_to); frame requests queue up until taken with
/// [`take_frames`](Self::take_frames). Neither fires on its own.
///
/// # Example
///
/// ```
/// use flipbook_core::scheduler::{FrameScheduler, ManualScheduler};
///
/// let mut scheduler = ManualScheduler::new();
/// let timer = scheduler.set_timeout(100.0);
/// let frame = scheduler.request_frame();
///
/// assert!(scheduler.advance_to(99.0).is_empty());
/// assert_eq!(scheduler.advance_to(100.0), vec![timer]);
/// assert_eq!(scheduler.take_frames(), vec![frame]);
/// assert!(scheduler.is_idle());
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: f64,
    issued: u64,
    timers: Vec<PendingTimer>,
    frames: Vec<FrameHandle>,
}

impl ManualScheduler {
    /// Creates an empty scheduler at virtual time `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Moves virtual time forward to `now` and removes every timer that has become due, returning
    /// their handles in deadline order. Virtual time never moves backward.
    pub fn advance_to(&mut self, now: f64) -> Vec<TimerHandle> {
        self.now = self.now.max(now);
        let now = self.now;
        let (mut due, pending): (Vec<PendingTimer>, Vec<PendingTimer>) =
            std::mem::take(&mut self.timers)
                .into_iter()
                .partition(|timer| timer.due <= now);
        self.timers = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due.into_iter().map(|timer| timer.handle).collect()
    }

    /// Removes and returns every queued frame request, oldest first.
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.frames)
    }

    /// Number of timers not yet due or cleared.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of frame requests not yet taken or cancelled.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing at all is pending.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty() && self.frames.is_empty()
    }

    fn next_id(&mut self) -> NonZeroU64 {
        let id = NonZeroU64::MIN.saturating_add(self.issued);
        self.issued += 1;
        id
    }
}

impl FrameScheduler for ManualScheduler {
    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id());
        self.timers.push(PendingTimer {
            handle,
            due: self.now + delay_ms.max(0.0),
        });
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| timer.handle != handle);
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_id());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|frame| *frame != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let timer = scheduler.set_timeout(0.0);
        let frame = scheduler.request_frame();
        let other_frame = scheduler.request_frame();

        assert_ne!(timer.id(), frame.id());
        assert_ne!(frame, other_frame);
    }

    #[test]
    fn due_timers_drain_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let late = scheduler.set_timeout(50.0);
        let early = scheduler.set_timeout(10.0);
        let never = scheduler.set_timeout(500.0);

        assert_eq!(scheduler.advance_to(60.0), vec![early, late]);
        assert_eq!(scheduler.pending_timers(), 1);
        scheduler.clear_timeout(never);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn cancelled_frames_are_not_delivered() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        scheduler.cancel_frame(first);
        scheduler.cancel_frame(first);

        assert_eq!(scheduler.take_frames(), vec![second]);
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn virtual_time_never_moves_backward() {
        let mut scheduler = ManualScheduler::new();
        scheduler.advance_to(100.0);
        scheduler.advance_to(40.0);

        assert_eq!(scheduler.now(), 100.0);
        let timer = scheduler.set_timeout(5.0);
        assert!(scheduler.advance_to(104.0).is_empty());
        assert_eq!(scheduler.advance_to(105.0), vec![timer]);
    }
}
