use crate::core::HeldThrusters;

/// Discrete input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Stop the simulation before the next tick.
    Quit,
    /// Pause or resume.
    TogglePause,
    /// Show or hide the true state overlay.
    ToggleStateInfo,
    /// Show or hide the sensor and belief overlay.
    ToggleSensorInfo,
    /// Show or hide the score overlay.
    ToggleScore,
}

impl InputEvent {
    /// Maps a key to its event. Keys without a mapping yield `None` and are ignored.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(InputEvent::Quit),
            'p' => Some(InputEvent::TogglePause),
            'i' => Some(InputEvent::ToggleStateInfo),
            's' => Some(InputEvent::ToggleSensorInfo),
            'g' => Some(InputEvent::ToggleScore),
            _ => None,
        }
    }
}

/// External source of input, polled once per frame.
pub trait InputSource {
    /// Events since the previous poll.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Directional thrust keys currently held.
    fn held_thrusters(&self) -> HeldThrusters;
}

/// External sink of frames.
pub trait Renderer {
    /// Draws one frame.
    fn draw(&mut self, frame: &Frame);
}

/// Axis aligned rectangle in screen pixels, `(x, y)` being the top left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Square of side `size` centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, size: f64) -> Self {
        Self {
            x: cx - 0.5 * size,
            y: cy - 0.5 * size,
            width: size,
            height: size,
        }
    }

    /// Centre point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Text overlays which can be toggled on and off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// True state and control.
    StateInfo,
    /// Sensor reading and belief.
    SensorInfo,
    /// Distance, error and score.
    Score,
}

/// Lines of one overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    /// Which overlay.
    pub kind: OverlayKind,
    /// Its text.
    pub lines: Vec<String>,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Screen width in pixels.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// The body at its true position.
    pub true_body: Rect,
    /// The body where the estimator believes it is.
    pub estimated_body: Rect,
    /// Enabled overlays, in display order.
    pub overlays: Vec<Overlay>,
    /// True while paused.
    pub paused: bool,
}
