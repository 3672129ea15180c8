//! Count-up number animation.
//!
//! A [`CountUp`] displays 0 while idle. When activated it records the start
//! time and, on every frame, shows `round(ease_out_cubic(progress) * target)`
//! until progress reaches 1, after which it pins to the target and releases
//! its frame callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::frames::{FrameControl, FrameHandle, FrameLoop};

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1200);

/// `1 - (1 - p)^3`, with `p` clamped to [0, 1].
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Fraction of `duration` covered by `elapsed`. A zero duration is complete.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// The displayed integer `elapsed` into an animation towards `target`.
pub fn count_up_value(target: f64, duration: Duration, elapsed: Duration) -> u64 {
    let p = progress(elapsed, duration);
    if p >= 1.0 {
        return target.max(0.0).round() as u64;
    }
    (ease_out_cubic(p) * target).max(0.0).round() as u64
}

#[derive(Debug, Default)]
struct Shared {
    value: u64,
    settled: bool,
}

/// One count-up task bound to a target, a duration and a trigger flag.
#[derive(Debug)]
pub struct CountUp {
    target: f64,
    duration: Duration,
    active: bool,
    shared: Rc<RefCell<Shared>>,
    frame: Option<FrameHandle>,
}

impl CountUp {
    pub fn new(target: f64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            active: false,
            shared: Rc::new(RefCell::new(Shared::default())),
            frame: None,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Displayed value: 0 while idle.
    pub fn value(&self) -> u64 {
        if self.active {
            self.shared.borrow().value
        } else {
            0
        }
    }

    /// True once the value has pinned to the target.
    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.active && self.shared.borrow().settled
    }

    /// Whether a frame callback is still scheduled.
    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.frame.as_ref().is_some_and(FrameHandle::is_pending)
    }

    /// Flip the trigger. A false -> true transition starts the animation at
    /// `now`; true -> false cancels it and returns the display to 0.
    pub fn set_active(&mut self, active: bool, now: Instant, frames: &mut FrameLoop) {
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            self.start(now, frames);
        } else {
            self.frame = None;
            *self.shared.borrow_mut() = Shared::default();
        }
    }

    /// Change the duration. An animation still in flight restarts with the
    /// new duration; a settled one stays at its target.
    pub fn set_duration(&mut self, duration: Duration, now: Instant, frames: &mut FrameLoop) {
        if duration == self.duration {
            return;
        }
        self.duration = duration;
        if self.active && !self.shared.borrow().settled {
            self.start(now, frames);
        }
    }

    fn start(&mut self, now: Instant, frames: &mut FrameLoop) {
        // replacing the handle cancels any previous run
        self.frame = None;
        let (target, duration) = (self.target, self.duration);

        let settled = Self::apply(&self.shared, target, duration, Duration::ZERO);
        if settled {
            return;
        }

        let weak: Weak<RefCell<Shared>> = Rc::downgrade(&self.shared);
        self.frame = Some(frames.request(move |frame_time| {
            let Some(shared) = weak.upgrade() else {
                return FrameControl::Done;
            };
            let elapsed = frame_time.saturating_duration_since(now);
            if Self::apply(&shared, target, duration, elapsed) {
                FrameControl::Done
            } else {
                FrameControl::Continue
            }
        }));
    }

    /// Write the value for `elapsed`; returns whether the animation settled.
    fn apply(shared: &RefCell<Shared>, target: f64, duration: Duration, elapsed: Duration) -> bool {
        let mut state = shared.borrow_mut();
        state.value = count_up_value(target, duration, elapsed);
        state.settled = progress(elapsed, duration) >= 1.0;
        state.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
    }

    #[test]
    fn test_sampled_values_for_43_over_1200ms() {
        let d = ms(1200);
        assert_eq!(count_up_value(43.0, d, ms(0)), 0);
        let mid = count_up_value(43.0, d, ms(600));
        assert!(mid > 0 && mid < 43, "mid-flight value was {}", mid);
        assert_eq!(mid, 38); // 0.875 * 43 = 37.6
        assert_eq!(count_up_value(43.0, d, ms(1200)), 43);
        assert_eq!(count_up_value(43.0, d, ms(5000)), 43);
    }

    #[test]
    fn test_sequence_is_non_decreasing_and_bounded() {
        for (target, duration) in [(43.0, 1200), (61.0, 1400), (134.3, 900), (7.0, 16)] {
            let mut last = 0;
            for t in (0..=duration + 200).step_by(7) {
                let v = count_up_value(target, ms(duration), ms(t));
                assert!(v >= last, "value went backwards at t={}", t);
                assert!(v as f64 <= target.round());
                last = v;
            }
            assert_eq!(last, (target as f64).round() as u64);
        }
    }

    #[test]
    fn test_idle_count_up_schedules_nothing() {
        let frames = FrameLoop::new();
        let count_up = CountUp::new(37.0, ms(1200));
        assert_eq!(count_up.value(), 0);
        assert!(!count_up.is_animating());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_animation_runs_to_target_and_stops() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(43.0, ms(1200));
        let t0 = Instant::now();

        count_up.set_active(true, t0, &mut frames);
        assert_eq!(count_up.value(), 0);
        assert!(count_up.is_animating());

        frames.run(t0 + ms(600));
        let mid = count_up.value();
        assert!(mid > 0 && mid < 43);

        frames.run(t0 + ms(1200));
        assert_eq!(count_up.value(), 43);
        assert!(count_up.is_settled());
        assert!(!count_up.is_animating());

        // inert: later frames run nothing and the value does not drift
        assert_eq!(frames.run(t0 + ms(2000)), 0);
        assert_eq!(count_up.value(), 43);
    }

    #[test]
    fn test_reduced_motion_jumps_straight_to_target() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(61.0, Duration::ZERO);
        count_up.set_active(true, Instant::now(), &mut frames);
        assert_eq!(count_up.value(), 61);
        assert!(count_up.is_settled());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_reduced_motion_mid_flight_finishes_immediately() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(61.0, ms(1400));
        let t0 = Instant::now();
        count_up.set_active(true, t0, &mut frames);
        frames.run(t0 + ms(300));
        count_up.set_duration(Duration::ZERO, t0 + ms(300), &mut frames);
        assert_eq!(count_up.value(), 61);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_settled_count_up_ignores_new_duration() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(37.0, Duration::ZERO);
        let t0 = Instant::now();
        count_up.set_active(true, t0, &mut frames);
        count_up.set_duration(ms(1200), t0, &mut frames);
        assert_eq!(count_up.value(), 37);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_deactivation_cancels_and_resets() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(43.0, ms(1200));
        let t0 = Instant::now();
        count_up.set_active(true, t0, &mut frames);
        frames.run(t0 + ms(400));
        count_up.set_active(false, t0 + ms(400), &mut frames);
        assert_eq!(count_up.value(), 0);
        assert_eq!(frames.run(t0 + ms(500)), 0);
    }

    #[test]
    fn test_teardown_mid_flight_cancels_pending_frame() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(43.0, ms(1200));
        let t0 = Instant::now();
        count_up.set_active(true, t0, &mut frames);
        frames.run(t0 + ms(500));
        let weak = Rc::downgrade(&count_up.shared);

        drop(count_up);

        assert_eq!(frames.run(t0 + ms(533)), 0);
        assert!(weak.upgrade().is_none());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_late_callback_after_state_freed_is_noop() {
        let mut frames = FrameLoop::new();
        let mut count_up = CountUp::new(43.0, ms(1200));
        let t0 = Instant::now();
        count_up.set_active(true, t0, &mut frames);
        frames.run(t0 + ms(500));

        // leak the guard so the callback stays scheduled past teardown
        let handle = count_up.frame.take().unwrap();
        std::mem::forget(handle);
        drop(count_up);

        // the callback still fires, finds its state gone, and releases itself
        assert_eq!(frames.run(t0 + ms(533)), 1);
        assert_eq!(frames.pending(), 0);
    }
}
