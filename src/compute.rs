/// Simulation clock and time sources.
pub mod clock;
pub use clock::{ManualTime, MonotonicTime, SimulationClock, TimeSource};

/// Construction time configuration.
pub mod config;
pub use config::{ConfigError, SimConfig};

/// Interfaces to the input and rendering collaborators.
pub mod io;
pub use io::{Frame, InputEvent, InputSource, Overlay, OverlayKind, Rect, Renderer};

/// The simulation loop.
pub mod simulation;
pub use simulation::Simulation;
