use crate::compute::ConfigError;
use crate::compute::Frame;
use crate::compute::InputEvent;
use crate::compute::InputSource;
use crate::compute::OverlayKind;
use crate::compute::Rect;
use crate::compute::Renderer;
use crate::compute::SimConfig;
use crate::compute::Simulation;
use crate::core::HeldThrusters;
use eframe::egui;
use thiserror::Error;
use tracing::info;

/// Failure to open the simulation window.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// eframe could not run the app.
    #[error(transparent)]
    Eframe(#[from] eframe::Error),
}

/// Input state of one egui frame.
struct EguiInput {
    events: Vec<InputEvent>,
    held: HeldThrusters,
}

impl EguiInput {
    fn from_context(ctx: &egui::Context) -> Self {
        ctx.input(|i| {
            let mut events = vec![];
            if i.viewport().close_requested() {
                events.push(InputEvent::Quit);
            }
            for (key, c) in [
                (egui::Key::Q, 'q'),
                (egui::Key::P, 'p'),
                (egui::Key::I, 'i'),
                (egui::Key::S, 's'),
                (egui::Key::G, 'g'),
            ] {
                if i.key_pressed(key) {
                    events.extend(InputEvent::from_key(c));
                }
            }
            EguiInput {
                events,
                held: HeldThrusters {
                    up: i.key_down(egui::Key::ArrowUp),
                    down: i.key_down(egui::Key::ArrowDown),
                    left: i.key_down(egui::Key::ArrowLeft),
                    right: i.key_down(egui::Key::ArrowRight),
                },
            }
        })
    }
}

impl InputSource for EguiInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn held_thrusters(&self) -> HeldThrusters {
        self.held
    }
}

/// Paints frames onto an egui painter.
struct PainterRenderer<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl PainterRenderer<'_> {
    const FONT_SIZE: f32 = 16.0;

    fn rect(&self, rect: &Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.origin + egui::vec2(rect.x as f32, rect.y as f32),
            egui::vec2(rect.width as f32, rect.height as f32),
        )
    }

    fn color(kind: OverlayKind) -> egui::Color32 {
        match kind {
            OverlayKind::StateInfo => egui::Color32::from_rgb(255, 0, 0),
            OverlayKind::SensorInfo => egui::Color32::from_rgb(0, 255, 0),
            OverlayKind::Score => egui::Color32::from_rgb(255, 255, 0),
        }
    }
}

impl Renderer for PainterRenderer<'_> {
    fn draw(&mut self, frame: &Frame) {
        self.painter.rect_filled(
            self.rect(&frame.true_body),
            0.0,
            egui::Color32::from_rgb(0, 0, 255),
        );
        self.painter.rect_filled(
            self.rect(&frame.estimated_body),
            0.0,
            egui::Color32::from_rgb(255, 0, 0),
        );
        let mut cursor = self.origin;
        for overlay in &frame.overlays {
            for line in &overlay.lines {
                self.painter.text(
                    cursor,
                    egui::Align2::LEFT_TOP,
                    line,
                    egui::FontId::monospace(Self::FONT_SIZE),
                    Self::color(overlay.kind),
                );
                cursor.y += Self::FONT_SIZE;
            }
        }
    }
}

/// eframe app running the simulation, one tick per repaint.
pub struct SimulationApp {
    sim: Simulation,
    finished: bool,
}

impl SimulationApp {
    /// Wraps a simulation.
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            finished: false,
        }
    }
}

impl eframe::App for SimulationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.finished {
            return;
        }
        let mut input = EguiInput::from_context(ctx);
        let mut keep_running = true;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let mut renderer = PainterRenderer {
                    painter: ui.painter(),
                    origin: ui.max_rect().min,
                };
                keep_running = self.sim.frame(&mut input, &mut renderer);
            });
        if keep_running {
            ctx.request_repaint();
        } else {
            self.finished = true;
            println!("{}", self.sim.score());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Opens a window of the configured screen size and runs the simulation until quit.
pub fn run_window(config: SimConfig) -> Result<(), WindowError> {
    if env_logger::try_init().is_err() {
        info!("logger already installed");
    }
    let sim = Simulation::new(config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            sim.config().screen_width as f32,
            sim.config().screen_height as f32,
        ]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };
    eframe::run_native(
        "space brick",
        options,
        Box::new(|_cc| Ok(Box::new(SimulationApp::new(sim)))),
    )?;
    Ok(())
}
