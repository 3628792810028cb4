use nalgebra::Vector2;
use nalgebra::Vector6;
use std::fmt::Display;

/// Channel indices of a [StateVector].
pub mod channel {
    /// Position along x.
    pub const X: usize = 0;
    /// Position along y.
    pub const Y: usize = 1;
    /// Velocity along x.
    pub const DX: usize = 2;
    /// Velocity along y.
    pub const DY: usize = 3;
    /// Acceleration along x.
    pub const DDX: usize = 4;
    /// Acceleration along y.
    pub const DDY: usize = 5;
}

/// Position, velocity and acceleration of a body in the plane.
///
/// The same layout is used for the true body state, the estimator's belief and the sensor
/// measurement, so that they can be compared channel by channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateVector {
    /// x, y, dx, dy, ddx, ddy
    pub vec: Vector6<f64>,
}

/// A sensor reading. Shares the layout of [StateVector], position channels stay zero.
pub type MeasurementVector = StateVector;

impl StateVector {
    /// Body at rest at the given position.
    pub fn from_position(x: f64, y: f64) -> Self {
        Self {
            vec: Vector6::new(x, y, 0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Wraps a raw six channel vector.
    pub fn from_vec(vec: Vector6<f64>) -> Self {
        Self { vec }
    }

    /// Position along x.
    pub fn x(&self) -> f64 {
        self.vec[channel::X]
    }

    /// Position along y.
    pub fn y(&self) -> f64 {
        self.vec[channel::Y]
    }

    /// Velocity along x.
    pub fn dx(&self) -> f64 {
        self.vec[channel::DX]
    }

    /// Velocity along y.
    pub fn dy(&self) -> f64 {
        self.vec[channel::DY]
    }

    /// Acceleration along x.
    pub fn ddx(&self) -> f64 {
        self.vec[channel::DDX]
    }

    /// Acceleration along y.
    pub fn ddy(&self) -> f64 {
        self.vec[channel::DDY]
    }

    /// One line per derivative order, as shown by the info overlays.
    pub fn info_lines(&self) -> Vec<String> {
        vec![
            format!("x = {:.3}   y = {:.3}", self.x(), self.y()),
            format!("dx = {:.3}   dy = {:.3}", self.dx(), self.dy()),
            format!("ddx = {:.3}   ddy = {:.3}", self.ddx(), self.ddy()),
        ]
    }
}

impl Display for StateVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(x: {}, y: {}, dx: {}, dy: {}, ddx: {}, ddy: {})",
            self.x(),
            self.y(),
            self.dx(),
            self.dy(),
            self.ddx(),
            self.ddy()
        )
    }
}

/// Thrust applied to the body during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Thrust along x.
    pub thrust_x: f64,
    /// Thrust along y.
    pub thrust_y: f64,
}

impl ControlInput {
    /// The control as a column vector, for the control matrix.
    pub fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.thrust_x, self.thrust_y)
    }

    /// `t_x = ..   t_y = ..`
    pub fn info_line(&self) -> String {
        format!("t_x = {:.3}   t_y = {:.3}", self.thrust_x, self.thrust_y)
    }
}
