/// Scripted input for headless runs.
pub mod autopilot;
pub use autopilot::{quit_on_ctrl_c, Autopilot, Leg};

/// Generic printer renderer.
pub mod printer;
pub use printer::PrinterRenderer;

/// Interactive terminal front end.
///
/// Reads the keyboard through crossterm and draws "ascii art" of the body and the estimate
/// with braille characters.
pub mod terminal;
pub use terminal::{BrailleRenderer, TerminalInput, TerminalSession};

/// Window front end.
#[cfg(feature = "egui")]
pub mod egui;
