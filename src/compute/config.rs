use crate::core::NoiseShape;
use crate::core::SensorCoupling;
use thiserror::Error;

/// Configuration of a simulation run.
///
/// Read once at construction. Fields not of interest are usually taken from [Default]:
///
/// ```
/// use space_brick::compute::SimConfig;
///
/// let config = SimConfig {
///     sensor_noise: 0.05,
///     hard_noise: 0.01,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Screen width in pixels.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Upper bound of frames per second.
    pub max_tick_rate: u32,
    /// Mass of the body.
    pub body_mass: f64,
    /// Power of the body's thruster.
    pub thruster_power: f64,
    /// Level of the process noise on the true state.
    pub process_noise: f64,
    /// Level of the measurement noise.
    pub sensor_noise: f64,
    /// Probability of a hard-noise spike per tick.
    pub hard_noise: f64,
    /// Distribution of process and measurement noise.
    pub noise_shape: NoiseShape,
    /// Velocity coupling of the sensor.
    ///
    /// The default leaks a little crosstalk into each reading and damps it by the acceleration,
    /// so even a noise-free run scores slightly above zero. Use [SensorCoupling::IDEAL] for a
    /// sensor the estimator can follow exactly.
    pub sensor_coupling: SensorCoupling,
    /// Start position of body and belief.
    pub initial_position: (f64, f64),
    /// Seed of the random streams; drawn from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 400,
            screen_height: 300,
            max_tick_rate: 60,
            body_mass: 10.0,
            thruster_power: 10.0,
            process_noise: 0.0,
            sensor_noise: 0.0,
            hard_noise: 0.0,
            noise_shape: NoiseShape::Uniform,
            sensor_coupling: SensorCoupling::default(),
            initial_position: (50.0, 50.0),
            seed: None,
        }
    }
}

/// Invalid configuration. The simulation refuses to start.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Mass is zero, negative or not finite.
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    /// Thruster power is zero, negative or not finite.
    #[error("thruster power must be positive and finite, got {0}")]
    InvalidThrusterPower(f64),
    /// A noise level is negative or not finite.
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidNoiseLevel {
        /// Name of the offending field.
        name: &'static str,
        /// Its value.
        value: f64,
    },
    /// Hard-noise probability outside of `[0, 1]`.
    #[error("hard noise probability must be within [0, 1], got {0}")]
    InvalidHardNoise(f64),
    /// A screen dimension is zero.
    #[error("screen must not be empty, got {width}x{height}")]
    EmptyScreen {
        /// Screen width.
        width: u32,
        /// Screen height.
        height: u32,
    },
    /// Tick rate is zero.
    #[error("max tick rate must be positive")]
    ZeroTickRate,
    /// Initial position or a sensor coefficient is not finite.
    #[error("{0} must be finite")]
    NotFinite(&'static str),
}

impl SimConfig {
    /// Checks all fields, see [ConfigError].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::EmptyScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.max_tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if !(self.body_mass.is_finite() && self.body_mass > 0.0) {
            return Err(ConfigError::InvalidMass(self.body_mass));
        }
        if !(self.thruster_power.is_finite() && self.thruster_power > 0.0) {
            return Err(ConfigError::InvalidThrusterPower(self.thruster_power));
        }
        for (name, value) in [
            ("process noise", self.process_noise),
            ("sensor noise", self.sensor_noise),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidNoiseLevel { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.hard_noise) {
            return Err(ConfigError::InvalidHardNoise(self.hard_noise));
        }
        if !(self.initial_position.0.is_finite() && self.initial_position.1.is_finite()) {
            return Err(ConfigError::NotFinite("initial position"));
        }
        if !(self.sensor_coupling.crosstalk.is_finite()
            && self.sensor_coupling.accel_damping.is_finite())
        {
            return Err(ConfigError::NotFinite("sensor coupling"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_sensor_is_coupled() {
        let coupling = SimConfig::default().sensor_coupling;
        assert_eq!(coupling, SensorCoupling::default());
        assert_ne!(coupling, SensorCoupling::IDEAL);
        assert_eq!(coupling.crosstalk, 0.001);
        assert_eq!(coupling.accel_damping, -0.1);
    }

    #[test]
    fn test_mass_must_be_positive() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                body_mass: mass,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidMass(_))
            ));
        }
    }

    #[test]
    fn test_thruster_power_must_be_positive() {
        let config = SimConfig {
            thruster_power: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThrusterPower(0.0))
        );
    }

    #[test]
    fn test_noise_levels_must_be_non_negative() {
        let config = SimConfig {
            sensor_noise: -0.1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidNoiseLevel {
                name: "sensor noise",
                value: -0.1
            })
        );
        let config = SimConfig {
            process_noise: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hard_noise_is_a_probability() {
        for p in [-0.01, 1.01, f64::NAN] {
            let config = SimConfig {
                hard_noise: p,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidHardNoise(_))
            ));
        }
        for p in [0.0, 1.0] {
            let config = SimConfig {
                hard_noise: p,
                ..Default::default()
            };
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn test_screen_and_rate() {
        let config = SimConfig {
            screen_width: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyScreen {
                width: 0,
                height: 300
            })
        );
        let config = SimConfig {
            max_tick_rate: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            ConfigError::InvalidMass(-2.0).to_string(),
            "body mass must be positive and finite, got -2"
        );
    }
}
