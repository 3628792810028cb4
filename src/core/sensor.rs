use crate::core::noise::NoiseModel;
use crate::core::noise::RandomSource;
use crate::core::state::MeasurementVector;
use crate::core::state::StateVector;
use nalgebra::Matrix6;
use tracing::debug;

/// Coefficients of the velocity rows of the measurement matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorCoupling {
    /// Crosstalk between the x and y velocity axes.
    pub crosstalk: f64,
    /// Contribution of the acceleration to the velocity reading.
    pub accel_damping: f64,
}

impl SensorCoupling {
    /// A sensor without crosstalk and without acceleration damping.
    pub const IDEAL: SensorCoupling = SensorCoupling {
        crosstalk: 0.0,
        accel_damping: 0.0,
    };
}

impl Default for SensorCoupling {
    fn default() -> Self {
        Self {
            crosstalk: 0.001,
            accel_damping: -0.1,
        }
    }
}

/// Sensor observing the true body state.
///
/// Reports a velocity reading pre-multiplied by `dt`, i.e. a displacement per tick. Position is
/// never sensed directly.
#[derive(Clone, Debug)]
pub struct SensorModel<R: RandomSource> {
    noise: NoiseModel,
    hard_noise: f64,
    coupling: SensorCoupling,
    rng: R,
    glitch_rng: R,
    glitches: u64,
    last: MeasurementVector,
}

impl<R: RandomSource> SensorModel<R> {
    /// Magnitude bound of a hard-noise spike.
    pub const HARD_NOISE_BASE: f64 = 1.0;

    /// New sensor.
    ///
    /// `rng` feeds the ordinary measurement noise, `glitch_rng` the hard-noise gate and spike,
    /// so that enabling hard noise does not shift the ordinary noise draws.
    pub fn new(
        noise: NoiseModel,
        hard_noise: f64,
        coupling: SensorCoupling,
        rng: R,
        glitch_rng: R,
    ) -> Self {
        Self {
            noise,
            hard_noise,
            coupling,
            rng,
            glitch_rng,
            glitches: 0,
            last: MeasurementVector::default(),
        }
    }

    /// Measurement matrix for a tick of `dt` seconds.
    pub fn measurement_matrix(&self, dt: f64) -> Matrix6<f64> {
        let c = self.coupling.crosstalk * dt;
        let d = self.coupling.accel_damping * dt;
        #[rustfmt::skip]
        let m = Matrix6::new(
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // x
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // y
            0.0, 0.0, dt,  c,   d,   0.0, // dx
            0.0, 0.0, c,   dt,  0.0, d,   // dy
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // ddx
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // ddy
        );
        m
    }

    /// Noisy reading of `true_state` for a tick of `dt` seconds.
    pub fn sense(&mut self, true_state: &StateVector, dt: f64) -> MeasurementVector {
        let raw = StateVector::from_vec(self.measurement_matrix(dt) * true_state.vec);
        let mut v = self.noise.draw(&mut self.rng);
        if self.glitch_rng.bernoulli(self.hard_noise) {
            let spike = self
                .glitch_rng
                .uniform(-Self::HARD_NOISE_BASE, Self::HARD_NOISE_BASE);
            self.glitches += 1;
            debug!(spike, glitches = self.glitches, "sensor glitch");
            v = v.with_glitch(spike);
        }
        self.last = v.corrupt(&raw);
        self.last
    }

    /// Most recent measurement.
    pub fn last(&self) -> &MeasurementVector {
        &self.last
    }

    /// Number of hard-noise spikes injected so far.
    pub fn glitches(&self) -> u64 {
        self.glitches
    }

    /// Lines for the sensor info overlay.
    pub fn info_lines(&self) -> Vec<String> {
        vec![
            format!("m_dx = {:.3}   m_dy = {:.3}", self.last.dx(), self.last.dy()),
            format!("glitches = {}", self.glitches),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector6;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sensor(noise: f64, hard_noise: f64, coupling: SensorCoupling) -> SensorModel<StdRng> {
        SensorModel::new(
            NoiseModel::uniform(noise),
            hard_noise,
            coupling,
            StdRng::seed_from_u64(1),
            StdRng::seed_from_u64(2),
        )
    }

    #[test]
    fn test_noise_free_sensing_is_deterministic() {
        let state = StateVector::from_vec(Vector6::new(123.0, -4.0, 2.0, 3.0, 0.5, -0.5));
        let mut a = sensor(0.0, 0.0, SensorCoupling::default());
        let mut b = sensor(0.0, 0.0, SensorCoupling::default());
        let dt = 1.0 / 60.0;
        let m = a.sense(&state, dt);
        assert_eq!(m, b.sense(&state, dt));
        assert_eq!(m, a.sense(&state, dt));
        assert_eq!(m.x(), 0.0);
        assert_eq!(m.y(), 0.0);
        assert_eq!(m.ddx(), 0.0);
        assert_eq!(m.ddy(), 0.0);
        assert_relative_eq!(m.dx(), dt * (2.0 + 0.001 * 3.0 - 0.1 * 0.5), epsilon = 1e-12);
        assert_relative_eq!(m.dy(), dt * (0.001 * 2.0 + 3.0 + 0.1 * 0.5), epsilon = 1e-12);
        assert_eq!(a.glitches(), 0);
    }

    #[test]
    fn test_ideal_sensor_reports_displacement() {
        let state = StateVector::from_vec(Vector6::new(1.0, 1.0, 6.0, -3.0, 2.0, 2.0));
        let mut s = sensor(0.0, 0.0, SensorCoupling::IDEAL);
        let dt = 0.25;
        let m = s.sense(&state, dt);
        assert_eq!(m.dx(), 6.0 * dt);
        assert_eq!(m.dy(), -3.0 * dt);
    }

    #[test]
    fn test_position_channels_stay_zero_under_noise() {
        let state = StateVector::from_vec(Vector6::new(50.0, 50.0, 1.0, 1.0, 0.1, 0.1));
        let mut s = sensor(0.5, 0.5, SensorCoupling::default());
        for _ in 0..500 {
            let m = s.sense(&state, 1.0 / 60.0);
            assert_eq!(m.x(), 0.0);
            assert_eq!(m.y(), 0.0);
        }
    }

    #[test]
    fn test_hard_noise_every_tick() {
        let state = StateVector::from_vec(Vector6::new(0.0, 0.0, 1.0, 1.0, 0.0, 0.0));
        let mut s = sensor(0.0, 1.0, SensorCoupling::IDEAL);
        let dt = 0.1;
        let mut perturbed = 0;
        for _ in 0..100 {
            let m = s.sense(&state, dt);
            assert_eq!(m.dy(), dt);
            assert!((m.dx() - dt).abs() <= dt * SensorModel::<StdRng>::HARD_NOISE_BASE);
            if m.dx() != dt {
                perturbed += 1;
            }
        }
        assert_eq!(s.glitches(), 100);
        assert!(perturbed > 90);
    }

    #[test]
    fn test_no_hard_noise_at_zero_probability() {
        let state = StateVector::from_vec(Vector6::new(0.0, 0.0, 1.0, 1.0, 0.0, 0.0));
        let mut s = sensor(0.0, 0.0, SensorCoupling::IDEAL);
        for _ in 0..100 {
            s.sense(&state, 0.1);
        }
        assert_eq!(s.glitches(), 0);
    }
}
