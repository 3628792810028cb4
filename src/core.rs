/// State and control vectors
pub mod state;
pub use state::{channel, ControlInput, MeasurementVector, StateVector};

/// Noise draws
pub mod noise;
pub use noise::{NoiseModel, NoiseShape, NoiseVector, RandomSource};

/// Thrust commands
pub mod control;
pub use control::{control_from_held, HeldThrusters, Thruster};

/// True body dynamics
pub mod dynamics;
pub use dynamics::BodyDynamics;

/// Sensor model
pub mod sensor;
pub use sensor::{SensorCoupling, SensorModel};

/// Estimator
pub mod estimator;
pub use estimator::{Estimator, IntegratingEstimator};

/// Score
pub mod score;
pub use score::ScoreTracker;
