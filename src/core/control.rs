use crate::core::state::ControlInput;

/// The body's thruster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thruster {
    /// Thruster power.
    pub power: f64,
    /// Mass of the body carrying the thruster.
    pub mass: f64,
}

impl Thruster {
    /// Magnitude of a single thrust command, `power / mass`.
    pub fn magnitude(&self) -> f64 {
        self.power / self.mass
    }
}

/// Directional thrust keys held during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldThrusters {
    /// Thrust towards negative y (screen up).
    pub up: bool,
    /// Thrust towards positive y.
    pub down: bool,
    /// Thrust towards negative x.
    pub left: bool,
    /// Thrust towards positive x.
    pub right: bool,
}

impl HeldThrusters {
    /// Nothing held.
    pub const NONE: HeldThrusters = HeldThrusters {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Only the right thruster key held.
    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::NONE
        }
    }

    /// Only the left thruster key held.
    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::NONE
        }
    }

    /// Only the up thruster key held.
    pub fn up() -> Self {
        Self {
            up: true,
            ..Self::NONE
        }
    }

    /// Only the down thruster key held.
    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::NONE
        }
    }
}

impl ControlInput {
    /// Zeroes both channels.
    pub fn reset_thrust(&mut self) {
        *self = ControlInput::default();
    }

    /// Thrust towards negative y for this tick.
    pub fn thrust_up(&mut self, thruster: &Thruster) {
        self.thrust_y = -thruster.magnitude();
    }

    /// Thrust towards positive y for this tick.
    pub fn thrust_down(&mut self, thruster: &Thruster) {
        self.thrust_y = thruster.magnitude();
    }

    /// Thrust towards negative x for this tick.
    pub fn thrust_left(&mut self, thruster: &Thruster) {
        self.thrust_x = -thruster.magnitude();
    }

    /// Thrust towards positive x for this tick.
    pub fn thrust_right(&mut self, thruster: &Thruster) {
        self.thrust_x = thruster.magnitude();
    }
}

/// Control for one tick from the set of held keys.
///
/// Starts from a reset control, then applies up, down, left and right in that order, so down
/// wins over up and right wins over left.
pub fn control_from_held(held: &HeldThrusters, thruster: &Thruster) -> ControlInput {
    let mut control = ControlInput::default();
    if held.up {
        control.thrust_up(thruster);
    }
    if held.down {
        control.thrust_down(thruster);
    }
    if held.left {
        control.thrust_left(thruster);
    }
    if held.right {
        control.thrust_right(thruster);
    }
    control
}
