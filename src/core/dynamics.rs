use crate::core::noise::NoiseModel;
use crate::core::noise::RandomSource;
use crate::core::state::ControlInput;
use crate::core::state::StateVector;
use nalgebra::Matrix6;
use nalgebra::Matrix6x2;

/// True dynamics of the body.
///
/// Owns the ground-truth state. Each tick applies a constant acceleration step, overwrites the
/// acceleration with `control / mass` and then perturbs the derivative channels with process
/// noise proportional to the current state.
#[derive(Clone, Debug)]
pub struct BodyDynamics<R: RandomSource> {
    state: StateVector,
    mass: f64,
    noise: NoiseModel,
    rng: R,
}

impl<R: RandomSource> BodyDynamics<R> {
    /// New body at rest at `initial`. The mass must be positive, see
    /// [crate::compute::SimConfig::validate].
    pub fn new(initial: StateVector, mass: f64, noise: NoiseModel, rng: R) -> Self {
        Self {
            state: initial,
            mass,
            noise,
            rng,
        }
    }

    /// Current true state.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Mass of the body.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Transition matrix for a step of `dt` seconds.
    ///
    /// The acceleration rows are zero: acceleration is not integrated but replaced by the
    /// control term.
    pub fn transition_matrix(dt: f64) -> Matrix6<f64> {
        let h = 0.5 * dt * dt;
        #[rustfmt::skip]
        let m = Matrix6::new(
            1.0, 0.0, dt,  0.0, h,   0.0, // x
            0.0, 1.0, 0.0, dt,  0.0, h,   // y
            0.0, 0.0, 1.0, 0.0, dt,  0.0, // dx
            0.0, 0.0, 0.0, 1.0, 0.0, dt,  // dy
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // ddx
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // ddy
        );
        m
    }

    /// Maps the control onto the acceleration channels.
    pub fn control_matrix(&self) -> Matrix6x2<f64> {
        let inv_mass = 1.0 / self.mass;
        #[rustfmt::skip]
        let m = Matrix6x2::new(
            0.0,      0.0,      // x
            0.0,      0.0,      // y
            0.0,      0.0,      // dx
            0.0,      0.0,      // dy
            inv_mass, 0.0,      // ddx
            0.0,      inv_mass, // ddy
        );
        m
    }

    /// Advances the true state by `dt` seconds under `control`.
    pub fn advance(&mut self, control: &ControlInput, dt: f64) -> &StateVector {
        let stepped = StateVector::from_vec(
            Self::transition_matrix(dt) * self.state.vec
                + self.control_matrix() * control.as_vector(),
        );
        let w = self.noise.draw(&mut self.rng);
        self.state = w.corrupt(&stepped);
        &self.state
    }
}
