use crate::compute::clock::MonotonicTime;
use crate::compute::clock::SimulationClock;
use crate::compute::clock::TimeSource;
use crate::compute::config::ConfigError;
use crate::compute::config::SimConfig;
use crate::compute::io::Frame;
use crate::compute::io::InputEvent;
use crate::compute::io::InputSource;
use crate::compute::io::Overlay;
use crate::compute::io::OverlayKind;
use crate::compute::io::Rect;
use crate::compute::io::Renderer;
use crate::core::control_from_held;
use crate::core::BodyDynamics;
use crate::core::ControlInput;
use crate::core::Estimator;
use crate::core::HeldThrusters;
use crate::core::IntegratingEstimator;
use crate::core::NoiseModel;
use crate::core::RandomSource;
use crate::core::ScoreTracker;
use crate::core::SensorModel;
use crate::core::StateVector;
use crate::core::Thruster;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// The simulation loop.
///
/// Owns the body, the sensor, the estimator, the score and the clock, and drives them in a
/// fixed order once per frame:
///
/// 1. the clock yields `dt`,
/// 2. input events are applied and the held thrust keys are mapped to a [ControlInput],
/// 3. unless paused or no time elapsed: body, sensor, estimator and score are advanced (see
///    [Simulation::step]),
/// 4. the frame is handed to the renderer.
pub struct Simulation<R: RandomSource = StdRng, T: TimeSource = MonotonicTime> {
    config: SimConfig,
    thruster: Thruster,
    body: BodyDynamics<R>,
    sensor: SensorModel<R>,
    estimator: Box<dyn Estimator>,
    score: ScoreTracker,
    clock: SimulationClock<T>,
    control: ControlInput,
    show_state_info: bool,
    show_sensor_info: bool,
    show_score: bool,
    running: bool,
    ticks: u64,
}

impl Simulation<StdRng, MonotonicTime> {
    /// Simulation paced by the wall clock.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, MonotonicTime::default())
    }
}

impl<T: TimeSource> Simulation<StdRng, T> {
    /// Simulation on a custom time source, with random streams seeded from `config.seed`.
    ///
    /// Body noise, sensor noise and the hard-noise gate each get their own stream.
    pub fn with_time_source(config: SimConfig, time: T) -> Result<Self, ConfigError> {
        let [body_rng, sensor_rng, glitch_rng] = match config.seed {
            Some(seed) => [0u64, 1, 2].map(|k| StdRng::seed_from_u64(seed.wrapping_add(k))),
            None => [0u64, 1, 2].map(|_| StdRng::from_entropy()),
        };
        Self::from_parts(config, body_rng, sensor_rng, glitch_rng, time)
    }
}

impl<R: RandomSource, T: TimeSource> Simulation<R, T> {
    /// Side of the rectangle drawn at the true position.
    pub const TRUE_BODY_SIZE: f64 = 20.0;
    /// Side of the rectangle drawn at the believed position.
    pub const ESTIMATED_BODY_SIZE: f64 = 10.0;

    /// Simulation from explicit random streams and time source.
    pub fn from_parts(
        config: SimConfig,
        body_rng: R,
        sensor_rng: R,
        glitch_rng: R,
        time: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (x, y) = config.initial_position;
        let start = StateVector::from_position(x, y);
        let body = BodyDynamics::new(
            start,
            config.body_mass,
            NoiseModel {
                level: config.process_noise,
                shape: config.noise_shape,
            },
            body_rng,
        );
        let sensor = SensorModel::new(
            NoiseModel {
                level: config.sensor_noise,
                shape: config.noise_shape,
            },
            config.hard_noise,
            config.sensor_coupling,
            sensor_rng,
            glitch_rng,
        );
        Ok(Self {
            thruster: Thruster {
                power: config.thruster_power,
                mass: config.body_mass,
            },
            body,
            sensor,
            estimator: Box::new(IntegratingEstimator::new(start)),
            score: ScoreTracker::default(),
            clock: SimulationClock::new(time, config.max_tick_rate),
            control: ControlInput::default(),
            show_state_info: false,
            show_sensor_info: false,
            show_score: false,
            running: true,
            ticks: 0,
            config,
        })
    }

    /// Replaces the estimator.
    pub fn with_estimator(mut self, estimator: Box<dyn Estimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Runs frames until a quit event arrives and returns the final score.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> ScoreTracker {
        info!(config = ?self.config, "simulation started");
        while self.frame(input, renderer) {}
        info!(
            ticks = self.ticks,
            distance = self.score.cumulative_distance(),
            error = self.score.cumulative_error(),
            score = self.score.score(),
            "simulation finished"
        );
        self.score
    }

    /// One frame of the loop. Returns false once a quit event was received; the frame of the
    /// quit event is neither simulated nor drawn.
    ///
    /// Frames without elapsed time are drawn but not simulated. This covers paused frames and
    /// the frame that resumes, whose tick was still taken on the paused clock.
    pub fn frame(&mut self, input: &mut dyn InputSource, renderer: &mut dyn Renderer) -> bool {
        let dt = self.clock.tick();
        for event in input.poll_events() {
            self.handle_event(event);
        }
        if !self.running {
            return false;
        }
        let control = self.control_for(&input.held_thrusters());
        if !self.clock.is_paused() && dt > 0.0 {
            self.step(&control, dt);
        } else {
            self.control = control;
        }
        renderer.draw(&self.render_frame());
        true
    }

    /// Applies a discrete input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                info!("quit requested");
                self.running = false;
            }
            InputEvent::TogglePause => self.clock.toggle_pause(),
            InputEvent::ToggleStateInfo => self.show_state_info = !self.show_state_info,
            InputEvent::ToggleSensorInfo => self.show_sensor_info = !self.show_sensor_info,
            InputEvent::ToggleScore => self.show_score = !self.show_score,
        }
    }

    /// Control for the current tick from the held thrust keys.
    pub fn control_for(&self, held: &HeldThrusters) -> ControlInput {
        control_from_held(held, &self.thruster)
    }

    /// Advances body, sensor, estimator and score by one tick of `dt` seconds.
    pub fn step(&mut self, control: &ControlInput, dt: f64) {
        self.control = *control;
        let true_state = *self.body.advance(control, dt);
        let measurement = self.sensor.sense(&true_state, dt);
        let belief = *self.estimator.update(&measurement);
        self.score.accumulate(&true_state, &belief, dt);
        self.ticks += 1;
    }

    /// Snapshot for the renderer.
    pub fn render_frame(&self) -> Frame {
        let truth = self.body.state();
        let belief = self.estimator.belief();
        let mut overlays = vec![];
        if self.show_state_info {
            let mut lines = truth.info_lines();
            lines.push(self.control.info_line());
            overlays.push(Overlay {
                kind: OverlayKind::StateInfo,
                lines,
            });
        }
        if self.show_sensor_info {
            let mut lines = belief.info_lines();
            lines.truncate(2);
            lines.extend(self.sensor.info_lines());
            overlays.push(Overlay {
                kind: OverlayKind::SensorInfo,
                lines,
            });
        }
        if self.show_score {
            overlays.push(Overlay {
                kind: OverlayKind::Score,
                lines: self.score.info_lines(),
            });
        }
        Frame {
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height,
            true_body: Rect::centered(truth.x(), truth.y(), Self::TRUE_BODY_SIZE),
            estimated_body: Rect::centered(belief.x(), belief.y(), Self::ESTIMATED_BODY_SIZE),
            overlays,
            paused: self.clock.is_paused(),
        }
    }

    /// The configuration the simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// True body state.
    pub fn true_state(&self) -> &StateVector {
        self.body.state()
    }

    /// Belief of the estimator.
    pub fn belief(&self) -> &StateVector {
        self.estimator.belief()
    }

    /// Running score.
    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    /// The sensor.
    pub fn sensor(&self) -> &SensorModel<R> {
        &self.sensor
    }

    /// Control of the most recent frame.
    pub fn control(&self) -> &ControlInput {
        &self.control
    }

    /// Number of simulated ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True while paused.
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// False once quit was requested.
    pub fn is_running(&self) -> bool {
        self.running
    }
}
