use crate::core::state::StateVector;
use std::fmt::Display;

/// Running comparison of the estimate against ground truth.
///
/// Both the distance and the error are sums of absolute per-axis displacements, hence never
/// negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreTracker {
    cumulative_error: f64,
    cumulative_distance: f64,
}

impl ScoreTracker {
    /// Accumulates one tick.
    ///
    /// The true displacement is `velocity * dt`; the belief velocity is already a per-tick
    /// displacement since the sensor pre-multiplies by `dt`.
    pub fn accumulate(&mut self, true_state: &StateVector, belief: &StateVector, dt: f64) {
        let dx = true_state.dx() * dt;
        let dy = true_state.dy() * dt;
        self.cumulative_distance += dx.abs() + dy.abs();
        self.cumulative_error += (dx - belief.dx()).abs() + (dy - belief.dy()).abs();
    }

    /// Sum of absolute displacement errors.
    pub fn cumulative_error(&self) -> f64 {
        self.cumulative_error
    }

    /// Sum of absolute true displacements.
    pub fn cumulative_distance(&self) -> f64 {
        self.cumulative_distance
    }

    /// `error / (distance + 1)`, lower is better.
    pub fn score(&self) -> f64 {
        self.cumulative_error / (self.cumulative_distance + 1.0)
    }

    /// Lines for the score overlay.
    pub fn info_lines(&self) -> Vec<String> {
        vec![
            format!("Travelled distance = {:.3}", self.cumulative_distance),
            format!("Cumulative absolute error = {:.3}", self.cumulative_error),
            format!("Score = {:.3}", self.score()),
        ]
    }
}

impl Display for ScoreTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Cumulative absolute error = {:.3}",
            self.cumulative_error
        )?;
        writeln!(f, "Distance travelled = {:.3}", self.cumulative_distance)?;
        write!(f, "Final score = {:.3}", self.score())
    }
}
