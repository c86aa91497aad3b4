/// Milliseconds in one second; frame rates are per second while all times are in milliseconds.
const SECOND: f64 = 1000.0;
const MAX_PROGRESS: f64 = 1.0;
const MAX_PROGRESS_WITH_ALTERNATION: f64 = 2.0 * MAX_PROGRESS;

/// Largest integer duration representable without loss in an `f64` (`2^53 - 1` ms). Used in place
/// of an infinite duration so that progress stays finite and strictly below `1.0` in practice.
pub const MAX_SAFE_DURATION: f64 = 9_007_199_254_740_991.0;

/// Describes the time scale of a [`FrameAnimation`](crate::animation::FrameAnimation).
///
/// Time scales handle the conversion from wall-clock timestamps to elapsed time, iteration count,
/// normalized progress and frame index. They hold no timing state of their own and are therefore
/// shared by every tick of an animation, including the synchronous preload tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeScale {
    delay: f64,
    duration: f64,
    fps: f64,
    alternate: bool,
}

impl TimeScale {
    /// Creates a time scale.
    ///
    /// # Arguments
    ///
    /// * `delay` - Time in milliseconds between start and the beginning of the first cycle.
    /// * `duration` - Length of one cycle in milliseconds.
    /// * `fps` - Target frame rate used to discretize progress into frame indices.
    /// * `alternate` - Whether progress ping-pongs (0 → 1 → 0) instead of stopping at `1.0`.
    pub fn new(delay: f64, duration: f64, fps: f64, alternate: bool) -> Self {
        Self {
            delay,
            duration,
            fps,
            alternate,
        }
    }

    /// Duration spanned by a sequence of `frame_count` frames played at `fps`, rounded up to a whole
    /// millisecond. The first frame is shown at time zero, so the sequence lasts `frame_count - 1`
    /// frame intervals.
    pub fn derive_duration(fps: f64, frame_count: usize) -> f64 {
        (SECOND / fps * frame_count.saturating_sub(1) as f64).ceil()
    }

    /// Delay before the first cycle, in milliseconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Length of one cycle, in milliseconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Target frame rate used for frame indices.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Whether progress ping-pongs instead of holding at `1.0`.
    pub fn alternate(&self) -> bool {
        self.alternate
    }

    /// Time elapsed since the end of the delay, or `0.0` while the delay is still running.
    pub fn elapsed(&self, current_timestamp: f64, start_timestamp: f64) -> f64 {
        (current_timestamp - (start_timestamp + self.delay)).max(0.0)
    }

    /// Number of complete cycles contained in `elapsed`.
    pub fn iteration(&self, elapsed: f64) -> u64 {
        if self.duration > 0.0 {
            (elapsed / self.duration).floor().max(0.0) as u64
        } else {
            0
        }
    }

    /// Position within the current cycle, from `0.0` up to (but excluding) `1.0`.
    pub fn iteration_progress(&self, elapsed: f64) -> f64 {
        if self.duration > 0.0 {
            elapsed % self.duration / self.duration
        } else {
            MAX_PROGRESS
        }
    }

    /// Computes the progress for some elapsed time, before any easing is applied.
    ///
    /// # Returns
    ///
    /// * If not alternating, progress grows linearly from `0.0` and holds at `1.0` once a full
    ///   duration has elapsed.
    /// * If alternating, progress follows a triangular wave with a period of two durations: up to
    ///   `1.0` after one duration, back down to `0.0` after two, and so on. The instant at which the
    ///   first round trip completes (exactly two durations) reports `2.0` rather than `0.0`, so that
    ///   a completed round trip can be told apart from the start.
    ///
    /// A zero duration has no interior, so any elapsed time counts as complete.
    pub fn progress(&self, elapsed: f64) -> f64 {
        let raw_progress = if self.duration > 0.0 {
            (elapsed / self.duration).max(0.0)
        } else {
            MAX_PROGRESS
        };
        if !self.alternate {
            return raw_progress.min(MAX_PROGRESS);
        }
        if raw_progress == MAX_PROGRESS_WITH_ALTERNATION {
            return MAX_PROGRESS_WITH_ALTERNATION;
        }
        let cycle_progress = raw_progress % MAX_PROGRESS_WITH_ALTERNATION;
        if cycle_progress > MAX_PROGRESS {
            MAX_PROGRESS_WITH_ALTERNATION - cycle_progress
        } else {
            cycle_progress
        }
    }

    /// Discrete frame index for an (eased) progress value.
    ///
    /// Truncates toward zero, so easings that dip below zero produce negative indices.
    pub fn frame_id(&self, progress: f64) -> i64 {
        (progress * self.duration / SECOND * self.fps).trunc() as i64
    }
}
