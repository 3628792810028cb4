use crate::core::state::channel;
use crate::core::state::StateVector;
use nalgebra::Vector6;
use rand_distr::Distribution;
use rand_distr::Normal;
use rand_distr::Uniform;

/// Source of randomness for noise draws and the hard-noise gate.
///
/// Implemented for every [rand::Rng], hence a seeded `StdRng` makes a simulation run
/// reproducible.
pub trait RandomSource {
    /// Uniform sample from `[low, high)`. Returns `low` for an empty interval.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Zero mean normal sample.
    fn normal(&mut self, std_dev: f64) -> f64;

    /// Bernoulli trial: a fresh uniform draw from `[0, 1)` compared against `probability`.
    fn bernoulli(&mut self, probability: f64) -> bool {
        self.uniform(0.0, 1.0) < probability
    }
}

impl<R: rand::Rng> RandomSource for R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        Uniform::new(low, high).sample(self)
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        match Normal::new(0.0, std_dev) {
            Ok(normal) => normal.sample(self),
            Err(_) => 0.0,
        }
    }
}

/// Distribution of the per-channel noise factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoiseShape {
    /// Uniform in `[-level, level]`.
    #[default]
    Uniform,
    /// Normal with standard deviation `level`.
    Gaussian,
}

/// Level and shape of a multiplicative noise term.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseModel {
    /// Scale of the noise factors; zero disables the noise.
    pub level: f64,
    /// Distribution the factors are drawn from.
    pub shape: NoiseShape,
}

impl NoiseModel {
    /// Uniform noise of the given level.
    pub fn uniform(level: f64) -> Self {
        Self {
            level,
            shape: NoiseShape::Uniform,
        }
    }

    /// Draws one noise vector.
    pub fn draw(&self, rng: &mut impl RandomSource) -> NoiseVector {
        NoiseVector::draw(self, rng)
    }
}

/// Per-channel noise factors for one tick.
///
/// The position channels are zero by construction: noise only ever corrupts derivative
/// channels, position drift is the integrated effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseVector {
    factors: Vector6<f64>,
}

impl NoiseVector {
    /// Draws the four derivative channels from the noise model.
    pub fn draw(model: &NoiseModel, rng: &mut impl RandomSource) -> Self {
        let mut factors = Vector6::zeros();
        if model.level == 0.0 {
            return Self { factors };
        }
        for i in channel::DX..=channel::DDY {
            factors[i] = match model.shape {
                NoiseShape::Uniform => rng.uniform(-model.level, model.level),
                NoiseShape::Gaussian => rng.normal(model.level),
            };
        }
        Self { factors }
    }

    /// Adds a sensor glitch to the x-velocity channel.
    pub fn with_glitch(mut self, spike: f64) -> Self {
        self.factors[channel::DX] += spike;
        self
    }

    /// The raw factors.
    pub fn factors(&self) -> &Vector6<f64> {
        &self.factors
    }

    /// `state + state ⊙ noise`
    pub fn corrupt(&self, state: &StateVector) -> StateVector {
        StateVector::from_vec(state.vec + state.vec.component_mul(&self.factors))
    }
}
