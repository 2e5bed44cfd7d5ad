use crate::config::SimulationConfig;
use crate::engine::{compute_forces, Forces, SpringState};
use glam::Vec3;

/// Advance a state by dt using semi-implicit Euler integration.
///
/// Returns the new state and the forces evaluated on the old one. The caller
/// validates `dt` and the anchor.
pub fn step(
    config: &SimulationConfig,
    state: &SpringState,
    anchor: Vec3,
    dt: f32,
) -> (SpringState, Forces) {
    let forces = compute_forces(config, state, anchor);
    let acceleration = forces.total() / config.mass();

    // Velocity first, then position from the new velocity
    let velocity = state.velocity + acceleration * dt;
    let position = state.position + velocity * dt;

    (SpringState { position, velocity }, forces)
}
