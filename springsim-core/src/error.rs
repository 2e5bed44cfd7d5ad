//! Error type shared by every simulator operation.

use thiserror::Error;

/// Errors reported by the spring-damper simulator.
///
/// Every failing operation leaves the simulator state exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid config: {parameter} {reason}")]
    InvalidConfig {
        parameter: &'static str,
        reason: &'static str,
    },

    #[error("invalid time step {dt}: must be positive and finite")]
    InvalidTimeStep { dt: f32 },

    #[error("invalid input: {input} has a non-finite component")]
    InvalidInput { input: &'static str },

    /// The step produced a non-finite state, usually from a `dt` far too large
    /// for the spring's stiffness.
    #[error("integration diverged with dt = {dt}")]
    Diverged { dt: f32 },
}

impl SimulationError {
    pub(crate) fn config(parameter: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { parameter, reason }
    }

    /// True for errors a fixed-rate driver should answer by skipping the tick.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }
}
