//! Per-frame callback loop.
//!
//! The host owns one [`FrameLoop`] and runs it once per rendered frame. Views
//! register callbacks and keep the returned [`FrameHandle`]; dropping the
//! handle releases the callback, so tearing a view down cancels everything it
//! scheduled. Callbacks are expected to capture only `Weak` references to view
//! state, which turns a callback outliving its view into a no-op.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// What a callback wants after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    /// Run again on the next frame.
    Continue,
    /// Release the callback.
    Done,
}

type Callback = Box<dyn FnMut(Instant) -> FrameControl>;

struct Entry {
    released: Rc<Cell<bool>>,
    callback: Callback,
}

/// Guard for a scheduled callback. Dropping it cancels the callback.
#[derive(Debug)]
pub struct FrameHandle {
    released: Rc<Cell<bool>>,
}

impl FrameHandle {
    /// Whether the callback is still scheduled.
    pub fn is_pending(&self) -> bool {
        !self.released.get()
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.released.set(true);
    }
}

/// Host-side animation frame scheduler.
#[derive(Default)]
pub struct FrameLoop {
    entries: Vec<Entry>,
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("pending", &self.pending())
            .finish()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to run on every frame until it returns `Done`
    /// or the handle is dropped.
    pub fn request<F>(&mut self, callback: F) -> FrameHandle
    where
        F: FnMut(Instant) -> FrameControl + 'static,
    {
        let released = Rc::new(Cell::new(false));
        self.entries.push(Entry {
            released: Rc::clone(&released),
            callback: Box::new(callback),
        });
        FrameHandle { released }
    }

    /// Run `f` once on the first frame at or after `now + delay`.
    pub fn timeout<F>(&mut self, now: Instant, delay: Duration, f: F) -> FrameHandle
    where
        F: FnOnce() + 'static,
    {
        let deadline = now + delay;
        let mut f = Some(f);
        self.request(move |frame_time| {
            if frame_time < deadline {
                return FrameControl::Continue;
            }
            if let Some(f) = f.take() {
                f();
            }
            FrameControl::Done
        })
    }

    /// Invoke every live callback. Returns how many ran.
    pub fn run(&mut self, now: Instant) -> usize {
        self.entries.retain(|e| !e.released.get());

        let mut ran = 0;
        for entry in &mut self.entries {
            // a callback may drop another view's handle while we iterate
            if entry.released.get() {
                continue;
            }
            ran += 1;
            if (entry.callback)(now) == FrameControl::Done {
                entry.released.set(true);
            }
        }

        self.entries.retain(|e| !e.released.get());
        ran
    }

    /// Callbacks that would run on the next frame.
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| !e.released.get()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_runs_until_done() {
        let mut frames = FrameLoop::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = frames.request(move |_| {
            counter.set(counter.get() + 1);
            if counter.get() == 3 {
                FrameControl::Done
            } else {
                FrameControl::Continue
            }
        });

        let t0 = Instant::now();
        for i in 0..5 {
            frames.run(t0 + Duration::from_millis(16 * i));
        }
        assert_eq!(calls.get(), 3);
        assert!(!handle.is_pending());
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let mut frames = FrameLoop::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = frames.request(move |_| {
            counter.set(counter.get() + 1);
            FrameControl::Continue
        });

        let t0 = Instant::now();
        assert_eq!(frames.run(t0), 1);
        drop(handle);
        assert_eq!(frames.run(t0 + Duration::from_millis(16)), 0);
        assert_eq!(calls.get(), 1);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_timeout_fires_once_after_delay() {
        let mut frames = FrameLoop::new();
        let fired = Rc::new(Cell::new(0));
        let flag = Rc::clone(&fired);
        let t0 = Instant::now();
        let _handle = frames.timeout(t0, Duration::from_millis(400), move || {
            flag.set(flag.get() + 1);
        });

        frames.run(t0 + Duration::from_millis(100));
        assert_eq!(fired.get(), 0);
        frames.run(t0 + Duration::from_millis(400));
        assert_eq!(fired.get(), 1);
        frames.run(t0 + Duration::from_millis(800));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_zero_delay_timeout_fires_on_first_frame() {
        let mut frames = FrameLoop::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let t0 = Instant::now();
        let _handle = frames.timeout(t0, Duration::ZERO, move || flag.set(true));
        frames.run(t0);
        assert!(fired.get());
    }

    #[test]
    fn test_cancelled_timeout_never_fires() {
        let mut frames = FrameLoop::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let t0 = Instant::now();
        let handle = frames.timeout(t0, Duration::from_millis(400), move || flag.set(true));
        frames.run(t0 + Duration::from_millis(200));
        drop(handle);
        frames.run(t0 + Duration::from_millis(500));
        assert!(!fired.get());
    }
}
