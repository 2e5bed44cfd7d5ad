//! The spring-damper simulator.
//!
//! A point mass hangs from an anchor on a damped spring. The anchor is not
//! owned here: the caller passes its current position to every [`step`], so a
//! driver can move it freely between ticks.
//!
//! [`step`]: SpringDamperSimulator::step

use crate::config::SimulationConfig;
use crate::diagnostics::Energy;
use crate::engine::SpringState;
use crate::error::SimulationError;
use crate::integrator;
use glam::Vec3;

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Forces evaluated on the state the step started from.
    pub spring_force: Vec3,
    pub damping_force: Vec3,
    pub gravity_force: Vec3,
}

impl StepResult {
    pub fn net_force(&self) -> Vec3 {
        self.spring_force + self.damping_force + self.gravity_force
    }

    pub fn state(&self) -> SpringState {
        SpringState::new(self.position, self.velocity)
    }
}

/// Damped spring between a point mass and an external anchor
#[derive(Debug, Clone)]
pub struct SpringDamperSimulator {
    config: SimulationConfig,
    state: SpringState,
}

impl SpringDamperSimulator {
    /// Start at `initial_position` with zero velocity.
    pub fn new(config: SimulationConfig, initial_position: Vec3) -> Result<Self, SimulationError> {
        Self::with_velocity(config, initial_position, Vec3::ZERO)
    }

    pub fn with_velocity(
        config: SimulationConfig,
        initial_position: Vec3,
        initial_velocity: Vec3,
    ) -> Result<Self, SimulationError> {
        let state = checked_state(initial_position, initial_velocity)?;
        Ok(Self { config, state })
    }

    /// Advance by one fixed step toward a (possibly moved) anchor.
    ///
    /// On error the state is left untouched.
    pub fn step(&mut self, anchor: Vec3, dt: f32) -> Result<StepResult, SimulationError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimulationError::InvalidTimeStep { dt });
        }
        if !anchor.is_finite() {
            return Err(SimulationError::InvalidInput {
                input: "anchor position",
            });
        }

        let (next, forces) = integrator::step(&self.config, &self.state, anchor, dt);
        if !next.is_finite() {
            return Err(SimulationError::Diverged { dt });
        }
        self.state = next;

        Ok(StepResult {
            position: next.position,
            velocity: next.velocity,
            spring_force: forces.spring,
            damping_force: forces.damping,
            gravity_force: forces.gravity,
        })
    }

    /// Re-seed the simulation, e.g. after the driver changes the scene.
    pub fn reset(&mut self, position: Vec3, velocity: Vec3) -> Result<(), SimulationError> {
        self.state = checked_state(position, velocity)?;
        Ok(())
    }

    pub fn current_state(&self) -> SpringState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mechanical energy of the current state relative to `anchor`.
    pub fn energy(&self, anchor: Vec3) -> Energy {
        Energy::of(&self.config, &self.state, anchor)
    }
}

fn checked_state(position: Vec3, velocity: Vec3) -> Result<SpringState, SimulationError> {
    if !position.is_finite() {
        return Err(SimulationError::InvalidInput { input: "position" });
    }
    if !velocity.is_finite() {
        return Err(SimulationError::InvalidInput { input: "velocity" });
    }
    Ok(SpringState::new(position, velocity))
}
