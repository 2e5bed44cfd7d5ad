use crate::config::SimulationConfig;
use glam::Vec3;

/// Position and velocity of the point mass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpringState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl SpringState {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    pub fn at_rest(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// The forces acting on the mass at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub spring: Vec3,
    pub damping: Vec3,
    pub gravity: Vec3,
}

impl Forces {
    pub fn total(&self) -> Vec3 {
        self.spring + self.damping + self.gravity
    }
}

/// Compute the spring, damping and gravity forces for a state
pub fn compute_forces(config: &SimulationConfig, state: &SpringState, anchor: Vec3) -> Forces {
    let displacement = state.position - anchor;
    Forces {
        spring: -config.stiffness() * displacement, // Hooke's law
        damping: -config.damping() * state.velocity,
        gravity: config.mass() * config.gravity(),
    }
}

/// Compute the acceleration of the mass for a state
pub fn compute_acceleration(config: &SimulationConfig, state: &SpringState, anchor: Vec3) -> Vec3 {
    compute_forces(config, state, anchor).total() / config.mass()
}
