//! Unit tests for the gravity force model

use glam::Vec3;
use springsim_core::engine::{compute_acceleration, compute_forces, SpringState};
use springsim_core::tests::test_helpers::approx_eq_vec3;
use springsim_core::{SimulationConfig, EARTH_GRAVITY};

#[test]
fn test_gravity_force_scales_with_mass() {
    let light = SimulationConfig::new(10.0, 0.0, 1.0, EARTH_GRAVITY).unwrap();
    let heavy = SimulationConfig::new(10.0, 0.0, 3.0, EARTH_GRAVITY).unwrap();
    let state = SpringState::at_rest(Vec3::ZERO);

    let f_light = compute_forces(&light, &state, Vec3::ZERO).gravity;
    let f_heavy = compute_forces(&heavy, &state, Vec3::ZERO).gravity;

    assert!(approx_eq_vec3(f_light, EARTH_GRAVITY, 1e-6));
    assert!(approx_eq_vec3(f_heavy, EARTH_GRAVITY * 3.0, 1e-5));
}

#[test]
fn test_gravity_acceleration_is_mass_independent() {
    let state = SpringState::at_rest(Vec3::ZERO);
    for mass in [0.1, 1.0, 25.0] {
        let config = SimulationConfig::new(10.0, 0.0, mass, EARTH_GRAVITY).unwrap();
        let accel = compute_acceleration(&config, &state, Vec3::ZERO);
        assert!(approx_eq_vec3(accel, EARTH_GRAVITY, 1e-5), "mass {}", mass);
    }
}

#[test]
fn test_gravity_balanced_at_equilibrium_offset() {
    let config = SimulationConfig::new(10.0, 0.5, 1.0, Vec3::new(0.0, -9.8, 0.0)).unwrap();
    let anchor = Vec3::new(1.0, 5.0, -2.0);
    let state = SpringState::at_rest(anchor + config.equilibrium_offset());

    let forces = compute_forces(&config, &state, anchor);
    assert!(approx_eq_vec3(forces.total(), Vec3::ZERO, 1e-5));
}

#[test]
fn test_custom_gravity_direction() {
    let config = SimulationConfig::new(1.0, 0.0, 2.0, EARTH_GRAVITY)
        .unwrap()
        .with_gravity(Vec3::new(3.0, 0.0, 0.0))
        .unwrap();
    let forces = compute_forces(&config, &SpringState::at_rest(Vec3::ZERO), Vec3::ZERO);

    assert_eq!(forces.gravity, Vec3::new(6.0, 0.0, 0.0));
}
