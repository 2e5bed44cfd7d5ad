//! Diagnostics for spring simulations
//!
//! Energy bookkeeping for checking integrator behaviour, and formatting of
//! errors for drivers that report them instead of stopping.

use crate::config::SimulationConfig;
use crate::engine::SpringState;
use crate::error::SimulationError;
use glam::Vec3;

/// Mechanical energy of the mass-spring system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub kinetic: f32,
    /// Energy stored in the spring, `0.5 * k * |x - anchor|^2`.
    pub elastic: f32,
    /// Potential in the gravity field, zero at the origin.
    pub gravitational: f32,
}

impl Energy {
    pub fn of(config: &SimulationConfig, state: &SpringState, anchor: Vec3) -> Self {
        let displacement = state.position - anchor;
        Self {
            kinetic: 0.5 * config.mass() * state.velocity.length_squared(),
            elastic: 0.5 * config.stiffness() * displacement.length_squared(),
            gravitational: -config.mass() * config.gravity().dot(state.position),
        }
    }

    pub fn total(&self) -> f32 {
        self.kinetic + self.elastic + self.gravitational
    }
}

/// Format a simulation error with the tick it happened on
pub fn format_simulation_error(error: &SimulationError, tick: u64) -> String {
    if error.is_recoverable() {
        format!("Tick {} skipped: {}", tick, error)
    } else {
        format!("Simulation error: {}", error)
    }
}
