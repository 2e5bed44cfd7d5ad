//! Behavioural properties of the integrator over many steps

use glam::Vec3;
use springsim_core::tests::test_helpers::{approx_eq_vec3, run_fixed_anchor};
use springsim_core::{SimulationConfig, SimulationError, SpringDamperSimulator, SpringState};

#[test]
fn test_damped_spring_settles_on_anchor() {
    let config = SimulationConfig::new(10.0, 2.0, 1.0, Vec3::ZERO).unwrap();
    let mut sim = SpringDamperSimulator::with_velocity(
        config,
        Vec3::new(0.3, -1.2, 2.0),
        Vec3::new(1.0, 0.0, -1.0),
    )
    .unwrap();

    run_fixed_anchor(&mut sim, Vec3::ZERO, 0.01, 3000);

    let state = sim.current_state();
    assert!(state.position.length() < 1e-3, "position {:?}", state.position);
    assert!(state.velocity.length() < 1e-3, "velocity {:?}", state.velocity);
}

#[test]
fn test_settles_on_offset_anchor() {
    let config = SimulationConfig::new(20.0, 4.0, 2.0, Vec3::ZERO).unwrap();
    let anchor = Vec3::new(5.0, 5.0, 5.0);
    let mut sim = SpringDamperSimulator::new(config, Vec3::ZERO).unwrap();

    run_fixed_anchor(&mut sim, anchor, 0.01, 4000);

    assert!(approx_eq_vec3(sim.current_state().position, anchor, 1e-3));
}

#[test]
fn test_undamped_energy_stays_bounded() {
    let config = SimulationConfig::new(10.0, 0.0, 1.0, Vec3::ZERO).unwrap();
    let mut sim = SpringDamperSimulator::new(config, Vec3::X).unwrap();
    let initial = sim.energy(Vec3::ZERO).total();

    let mut worst_drift: f32 = 0.0;
    for _ in 0..10_000 {
        sim.step(Vec3::ZERO, 0.01).unwrap();
        let energy = sim.energy(Vec3::ZERO).total();
        worst_drift = worst_drift.max((energy - initial).abs() / initial);
    }

    assert!(worst_drift < 0.05, "energy drifted by {}", worst_drift);
}

#[test]
fn test_explicit_euler_would_gain_energy() {
    // Same system integrated with the old velocity for the position update
    let (k, dt) = (10.0_f32, 0.01_f32);
    let (mut x, mut v) = (Vec3::X, Vec3::ZERO);
    for _ in 0..10_000 {
        let a = -k * x;
        x += v * dt;
        v += a * dt;
    }
    let explicit_energy = 0.5 * v.length_squared() + 0.5 * k * x.length_squared();

    let config = SimulationConfig::new(k, 0.0, 1.0, Vec3::ZERO).unwrap();
    let mut sim = SpringDamperSimulator::new(config, Vec3::X).unwrap();
    run_fixed_anchor(&mut sim, Vec3::ZERO, dt, 10_000);
    let symplectic_energy = sim.energy(Vec3::ZERO).total();

    assert!(explicit_energy > 10.0 * 5.0);
    assert!(symplectic_energy < 5.0 * 1.05);
}

#[test]
fn test_zero_force_fixed_point() {
    let config = SimulationConfig::new(10.0, 0.5, 1.0, Vec3::ZERO).unwrap();
    let anchor = Vec3::new(-3.0, 2.0, 7.5);
    let mut sim = SpringDamperSimulator::new(config, anchor).unwrap();

    for _ in 0..100 {
        let result = sim.step(anchor, 0.02).unwrap();
        assert_eq!(result.net_force(), Vec3::ZERO);
    }

    assert_eq!(sim.current_state(), SpringState::at_rest(anchor));
}

#[test]
fn test_failed_step_leaves_state_unchanged() {
    let config = SimulationConfig::new(10.0, 0.5, 1.0, Vec3::new(0.0, -9.8, 0.0)).unwrap();
    let mut sim = SpringDamperSimulator::new(config, Vec3::new(0.0, -2.0, 0.0)).unwrap();
    run_fixed_anchor(&mut sim, Vec3::ZERO, 0.02, 17);
    let before = sim.current_state();

    let err = sim.step(Vec3::ZERO, 0.0).unwrap_err();
    assert_eq!(err, SimulationError::InvalidTimeStep { dt: 0.0 });
    assert_eq!(sim.current_state(), before);

    // Same bad input, same answer
    assert_eq!(sim.step(Vec3::ZERO, 0.0).unwrap_err(), err);
}

#[test]
fn test_reset_reseeds_trajectory() {
    let config = SimulationConfig::new(10.0, 0.5, 1.0, Vec3::new(0.0, -9.8, 0.0)).unwrap();
    let start = Vec3::new(0.0, -2.0, 0.0);

    let mut fresh = SpringDamperSimulator::new(config, start).unwrap();
    let expected = run_fixed_anchor(&mut fresh, Vec3::ZERO, 0.02, 50);

    let mut reused = SpringDamperSimulator::new(config, Vec3::new(9.0, 9.0, 9.0)).unwrap();
    run_fixed_anchor(&mut reused, Vec3::ONE, 0.05, 30);
    reused.reset(start, Vec3::ZERO).unwrap();
    let replayed = run_fixed_anchor(&mut reused, Vec3::ZERO, 0.02, 50);

    assert_eq!(expected, replayed);
}

#[test]
fn test_current_state_is_a_copy() {
    let config = SimulationConfig::new(1.0, 0.0, 1.0, Vec3::ZERO).unwrap();
    let mut sim = SpringDamperSimulator::new(config, Vec3::X).unwrap();

    let mut snapshot = sim.current_state();
    snapshot.position = Vec3::splat(42.0);

    assert_eq!(sim.current_state().position, Vec3::X);
    sim.step(Vec3::ZERO, 0.1).unwrap();
    assert_eq!(snapshot.position, Vec3::splat(42.0));
}
