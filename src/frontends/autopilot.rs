use crate::compute::InputEvent;
use crate::compute::InputSource;
use crate::core::HeldThrusters;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

/// Thrust keys held for a number of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leg {
    /// Number of frames.
    pub frames: u32,
    /// Keys held during these frames.
    pub held: HeldThrusters,
}

impl Leg {
    /// `held` for `frames` frames.
    pub fn new(frames: u32, held: HeldThrusters) -> Self {
        Self { frames, held }
    }

    /// No thrust for `frames` frames.
    pub fn coast(frames: u32) -> Self {
        Self::new(frames, HeldThrusters::NONE)
    }
}

/// Scripted input: flies a list of legs, then quits.
///
/// Discrete events can be scheduled at given frames, and an optional flag (set e.g. from a
/// Ctrl-C handler) quits early.
#[derive(Clone, Debug, Default)]
pub struct Autopilot {
    legs: VecDeque<Leg>,
    scheduled: Vec<(u64, InputEvent)>,
    frame: u64,
    held: HeldThrusters,
    quit_flag: Option<Arc<AtomicBool>>,
}

impl Autopilot {
    /// Autopilot flying `legs` in order.
    pub fn new(legs: impl IntoIterator<Item = Leg>) -> Self {
        Self {
            legs: legs.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Emits `event` on frame `frame` (zero based).
    pub fn with_event(mut self, frame: u64, event: InputEvent) -> Self {
        self.scheduled.push((frame, event));
        self
    }

    /// Quits as soon as `flag` is set.
    pub fn with_quit_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.quit_flag = Some(flag);
        self
    }

    /// Number of frames polled so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl InputSource for Autopilot {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let frame = self.frame;
        self.frame += 1;
        let mut events: Vec<InputEvent> = self
            .scheduled
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, event)| *event)
            .collect();
        if let Some(flag) = &self.quit_flag {
            if flag.load(Ordering::SeqCst) {
                events.push(InputEvent::Quit);
            }
        }
        self.held = HeldThrusters::NONE;
        while let Some(leg) = self.legs.front_mut() {
            if leg.frames > 0 {
                leg.frames -= 1;
                self.held = leg.held;
                break;
            }
            self.legs.pop_front();
        }
        if self.legs.is_empty() {
            events.push(InputEvent::Quit);
        }
        events
    }

    fn held_thrusters(&self) -> HeldThrusters {
        self.held
    }
}

/// Installs a Ctrl-C handler and returns the flag it sets.
pub fn quit_on_ctrl_c() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || {
        info!("Ctrl-C, quitting");
        handler_flag.store(true, Ordering::SeqCst);
    })?;
    Ok(flag)
}
