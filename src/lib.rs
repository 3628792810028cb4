#![deny(missing_docs)]

//! # Space brick
//!
//! A brick floats in space. The operator fires its thrusters, a sensor watches it, and an
//! estimator tries to keep track of where it is from the sensor readings alone. The score
//! measures how far the estimate strays from the truth.
//!
//! The simulation is discrete in time and runs in real time: a clock hands out the time elapsed
//! per frame, at most at the configured tick rate, and pausing does not produce one huge time
//! step on resume. Each tick
//!
//! 1. the true state is advanced by a constant acceleration step, with the acceleration set by
//!    the thrust, and perturbed by process noise,
//! 2. the sensor reports a displacement-per-tick reading derived from the true velocity, which
//!    is perturbed by measurement noise and, now and then, by a large hard-noise spike,
//! 3. the estimator integrates the readings into a belief about position and velocity,
//! 4. the score accumulates the absolute difference between true and estimated displacement.
//!
//! Noise is multiplicative and never touches the position channels directly, hence position
//! errors are always the integrated effect of velocity errors.
//!
//! ## Module Overview
//!
//! - The [core] module contains the state vectors and the building blocks of a tick:
//!   [core::BodyDynamics], [core::SensorModel], the [core::Estimator] trait with its
//!   [core::IntegratingEstimator] and the [core::ScoreTracker]. Randomness enters only through
//!   the [core::RandomSource] trait, so seeded generators make runs reproducible.
//!
//! - The [compute] module contains the [compute::SimConfig], the [compute::SimulationClock] and
//!   the [compute::Simulation] loop, as well as the [compute::InputSource] and
//!   [compute::Renderer] traits through which the loop talks to the outside world.
//!
//! - The [frontends] module contains input sources and renderers: a braille terminal front end,
//!   a scripted autopilot with a printer for headless runs, and (with the `egui` feature) a
//!   window.
//!
//! ## Example: a short flight
//!
//! ```
//! use space_brick::prelude::*;
//!
//! let config = SimConfig {
//!     sensor_coupling: SensorCoupling::IDEAL,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let mut sim = Simulation::with_time_source(config, ManualTime::default())?;
//! let mut pilot = Autopilot::new([Leg::new(60, HeldThrusters::right()), Leg::coast(60)]);
//! let mut printer = PrinterRenderer::new("brick".to_owned(), 30);
//!
//! let summary = sim.run(&mut pilot, &mut printer);
//!
//! assert_eq!(sim.ticks(), 120);
//! assert!(sim.true_state().x() > 50.0);
//! // no noise and an ideal sensor: the estimate is exact
//! assert_eq!(summary.score(), 0.0);
//! # Ok::<(), ConfigError>(())
//! ```

/// Body, sensor, estimator and score.
pub mod core;

/// Configuration, clock and the simulation loop.
pub mod compute;

/// Input sources and renderers.
pub mod frontends;

/// The prelude module contains the most important traits and structs of the library.
pub mod prelude {
    pub use crate::compute::{
        ConfigError, Frame, InputEvent, InputSource, ManualTime, MonotonicTime, Renderer,
        SimConfig, Simulation, SimulationClock, TimeSource,
    };
    pub use crate::core::{
        BodyDynamics, ControlInput, Estimator, HeldThrusters, IntegratingEstimator, NoiseModel,
        NoiseShape, RandomSource, ScoreTracker, SensorCoupling, SensorModel, StateVector,
        Thruster,
    };
    pub use crate::frontends::{Autopilot, Leg, PrinterRenderer};
}
