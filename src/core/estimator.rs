use crate::core::state::channel;
use crate::core::state::MeasurementVector;
use crate::core::state::StateVector;

/// Recursive estimator of the body state.
pub trait Estimator {
    /// Folds one measurement into the belief and returns the updated belief.
    fn update(&mut self, measurement: &MeasurementVector) -> &StateVector;

    /// Current belief.
    fn belief(&self) -> &StateVector;
}

/// Integrates the raw displacement readings.
///
/// The velocity belief is replaced by the latest reading and the position belief is the sum of
/// all readings. There is no prediction step, no gain and no covariance, so the estimate is
/// exactly as noisy as the sensor.
#[derive(Clone, Debug, Default)]
pub struct IntegratingEstimator {
    belief: StateVector,
}

impl IntegratingEstimator {
    /// Starts from a known initial belief.
    pub fn new(initial: StateVector) -> Self {
        Self { belief: initial }
    }
}

impl Estimator for IntegratingEstimator {
    fn update(&mut self, measurement: &MeasurementVector) -> &StateVector {
        let b = &mut self.belief.vec;
        b[channel::X] += measurement.dx();
        b[channel::Y] += measurement.dy();
        b[channel::DX] = measurement.dx();
        b[channel::DY] = measurement.dy();
        &self.belief
    }

    fn belief(&self) -> &StateVector {
        &self.belief
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector6;

    #[test]
    fn test_update_integrates_readings() {
        let mut e = IntegratingEstimator::new(StateVector::from_position(50.0, 50.0));
        let m = StateVector::from_vec(Vector6::new(0.0, 0.0, 0.5, -0.25, 0.0, 0.0));
        e.update(&m);
        let b = *e.update(&m);
        assert_eq!(b.x(), 51.0);
        assert_eq!(b.y(), 49.5);
        assert_eq!(b.dx(), 0.5);
        assert_eq!(b.dy(), -0.25);
    }

    #[test]
    fn test_velocity_is_replaced_not_blended() {
        let mut e = IntegratingEstimator::default();
        e.update(&StateVector::from_vec(Vector6::new(0.0, 0.0, 9.0, 9.0, 0.0, 0.0)));
        let b = *e.update(&StateVector::from_vec(Vector6::new(
            0.0, 0.0, 1.0, -1.0, 0.0, 0.0,
        )));
        assert_eq!(b.dx(), 1.0);
        assert_eq!(b.dy(), -1.0);
        assert_eq!(b.x(), 10.0);
        assert_eq!(b.y(), 8.0);
    }

    #[test]
    fn test_measured_position_and_acceleration_are_ignored() {
        let mut e = IntegratingEstimator::new(StateVector::from_position(1.0, 2.0));
        let b = *e.update(&StateVector::from_vec(Vector6::new(
            100.0, 100.0, 0.0, 0.0, 7.0, 7.0,
        )));
        assert_eq!(b, StateVector::from_position(1.0, 2.0));
    }
}
