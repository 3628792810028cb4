use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;
use tracing::info;

/// A monotonic time source the simulation clock reads and sleeps on.
pub trait TimeSource {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    /// Blocks for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock time.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTime {
    origin: Instant,
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Manually advanced time, shared between clones.
///
/// Sleeping advances the time instantly, which makes paced loops run at full speed while still
/// observing exact frame periods.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    /// Moves time forward.
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Produces the elapsed time per tick.
///
/// Each [SimulationClock::tick] first waits until at least one frame period has passed since
/// the previous tick, so the loop never runs faster than the configured tick rate. While paused
/// it reports zero, and resuming drops the time spent paused.
#[derive(Clone, Debug)]
pub struct SimulationClock<T: TimeSource> {
    source: T,
    frame_period: Duration,
    last_frame: Duration,
    last_tick: Duration,
    paused: bool,
}

impl<T: TimeSource> SimulationClock<T> {
    /// New running clock, paced to at most `max_tick_rate` ticks per second.
    pub fn new(source: T, max_tick_rate: u32) -> Self {
        let now = source.now();
        Self {
            source,
            frame_period: Duration::from_secs(1) / max_tick_rate.max(1),
            last_frame: now,
            last_tick: now,
            paused: false,
        }
    }

    /// Seconds since the previous tick while running, zero while paused.
    pub fn tick(&mut self) -> f64 {
        let since_frame = self.source.now().saturating_sub(self.last_frame);
        if since_frame < self.frame_period {
            self.source.sleep(self.frame_period - since_frame);
        }
        let now = self.source.now();
        self.last_frame = now;
        if self.paused {
            return 0.0;
        }
        let dt = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        dt.as_secs_f64()
    }

    /// Stops reporting elapsed time.
    pub fn pause(&mut self) {
        if !self.paused {
            info!("simulation paused");
            self.paused = true;
        }
    }

    /// Resynchronizes with the time source and continues.
    pub fn resume(&mut self) {
        if self.paused {
            info!("simulation resumed");
            self.last_tick = self.source.now();
            self.paused = false;
        }
    }

    /// Pauses a running clock and resumes a paused one.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// True while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Minimal duration of a frame.
    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }
}
