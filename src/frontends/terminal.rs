use crate::compute::Frame;
use crate::compute::InputEvent;
use crate::compute::InputSource;
use crate::compute::Rect;
use crate::compute::Renderer;
use crate::core::HeldThrusters;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::terminal;
use drawille::Canvas;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;
use tracing::warn;

/// Raw mode and alternate screen for the lifetime of the session.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Switches the terminal into raw mode on the alternate screen.
    pub fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            std::io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide
        )?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            std::io::stdout(),
            cursor::Show,
            terminal::LeaveAlternateScreen
        ) {
            warn!("could not leave alternate screen: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("could not disable raw mode: {}", err);
        }
    }
}

/// Keyboard input from the terminal.
///
/// Terminals report key presses and auto-repeats but, in general, no releases. An arrow key
/// therefore counts as held until its release is reported or no press has been seen for the
/// hold window.
#[derive(Clone, Debug)]
pub struct TerminalInput {
    last_seen: [Option<Instant>; 4],
    hold_window: Duration,
}

impl Default for TerminalInput {
    fn default() -> Self {
        // longer than the usual auto-repeat delay
        Self::new(Duration::from_millis(500))
    }
}

impl TerminalInput {
    const UP: usize = 0;
    const DOWN: usize = 1;
    const LEFT: usize = 2;
    const RIGHT: usize = 3;

    /// Input with a custom hold window.
    pub fn new(hold_window: Duration) -> Self {
        Self {
            last_seen: [None; 4],
            hold_window,
        }
    }

    fn arrow(code: KeyCode) -> Option<usize> {
        match code {
            KeyCode::Up => Some(Self::UP),
            KeyCode::Down => Some(Self::DOWN),
            KeyCode::Left => Some(Self::LEFT),
            KeyCode::Right => Some(Self::RIGHT),
            _ => None,
        }
    }

    fn is_held(&self, arrow: usize) -> bool {
        self.last_seen[arrow].map_or(false, |seen| seen.elapsed() <= self.hold_window)
    }

    fn on_event(&mut self, event: Event) -> Option<InputEvent> {
        let Event::Key(key) = event else {
            return None;
        };
        if let Some(arrow) = Self::arrow(key.code) {
            self.last_seen[arrow] = match key.kind {
                KeyEventKind::Release => None,
                _ => Some(Instant::now()),
            };
            return None;
        }
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputEvent::Quit)
            }
            KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char(c) => InputEvent::from_key(c),
            _ => None,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = vec![];
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    warn!("terminal poll failed: {}", err);
                    break;
                }
            }
            match event::read() {
                Ok(e) => events.extend(self.on_event(e)),
                Err(err) => {
                    warn!("terminal read failed: {}", err);
                    break;
                }
            }
        }
        events
    }

    fn held_thrusters(&self) -> HeldThrusters {
        HeldThrusters {
            up: self.is_held(Self::UP),
            down: self.is_held(Self::DOWN),
            left: self.is_held(Self::LEFT),
            right: self.is_held(Self::RIGHT),
        }
    }
}

/// Draws frames as braille art.
///
/// The true body is drawn in blue, the estimate in red, both as outlines, followed by the
/// enabled overlays:
///
/// ```text
/// ⡏⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⠉⢹
/// ⡇  ⡏⠉⠉⢹              ⢸
/// ⡇  ⡇⣏⣹⢸              ⢸
/// ⡇  ⣇⣀⣀⣸              ⢸
/// ⣇⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣀⣸
/// Score = 0.000
/// ```
pub struct BrailleRenderer {
    pixels_per_dot: f64,
    out: Stdout,
}

impl Default for BrailleRenderer {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl BrailleRenderer {
    /// Renderer scaling `pixels_per_dot` screen pixels onto one braille dot.
    pub fn new(pixels_per_dot: f64) -> Self {
        Self {
            pixels_per_dot: pixels_per_dot.max(1.0),
            out: std::io::stdout(),
        }
    }

    /// Canvas size in dots.
    pub fn canvas_size(&self, frame: &Frame) -> (u32, u32) {
        let dots = |pixels: u32| ((pixels as f64 / self.pixels_per_dot).ceil() as u32).max(2);
        (dots(frame.screen_width), dots(frame.screen_height))
    }

    /// Braille art of the frame, one string per terminal row.
    pub fn rows(&self, frame: &Frame) -> Vec<String> {
        let (width, height) = self.canvas_size(frame);
        let mut canvas = Canvas::new(width, height);

        let (right, bottom) = (width - 1, height - 1);
        canvas.line(0, 0, right, 0);
        canvas.line(right, 0, right, bottom);
        canvas.line(right, bottom, 0, bottom);
        canvas.line(0, bottom, 0, 0);

        let to_dots = |rect: &Rect| -> (u32, u32, u32, u32) {
            let scale = |v: f64, max: u32| (v / self.pixels_per_dot).clamp(0.0, max as f64) as u32;
            (
                scale(rect.x, right),
                scale(rect.y, bottom),
                scale(rect.right(), right),
                scale(rect.bottom(), bottom),
            )
        };
        for (rect, color) in [
            (&frame.true_body, drawille::PixelColor::Blue),
            (&frame.estimated_body, drawille::PixelColor::Red),
        ] {
            let (x0, y0, x1, y1) = to_dots(rect);
            canvas.line_colored(x0, y0, x1, y0, color);
            canvas.line_colored(x1, y0, x1, y1, color);
            canvas.line_colored(x1, y1, x0, y1, color);
            canvas.line_colored(x0, y1, x0, y0, color);
        }

        let mut rows: Vec<String> = canvas.frame().lines().map(str::to_owned).collect();
        if frame.paused {
            rows.push("[paused]".to_owned());
        }
        for overlay in &frame.overlays {
            rows.extend(overlay.lines.iter().cloned());
        }
        rows
    }

    fn write_frame(&mut self, frame: &Frame) -> std::io::Result<()> {
        let rows = self.rows(frame);
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for row in rows {
            // raw mode: no implicit carriage return
            write!(self.out, "{}\r\n", row)?;
        }
        self.out.flush()
    }
}

impl Renderer for BrailleRenderer {
    fn draw(&mut self, frame: &Frame) {
        if let Err(err) = self.write_frame(frame) {
            warn!("could not draw frame: {}", err);
        }
    }
}
