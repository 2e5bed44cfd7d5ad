//! Engine-independent spring-damper simulation.
//!
//! A point mass on a damped spring, integrated with semi-implicit Euler at a
//! fixed time step. Rendering and input belong to whoever drives the
//! simulator; each step returns the force breakdown they need.

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod simulator;

pub use config::{SimulationConfig, EARTH_GRAVITY};
pub use diagnostics::{format_simulation_error, Energy};
pub use driver::{FixedStepDriver, FrameReport};
pub use engine::{Forces, SpringState};
pub use error::SimulationError;
pub use simulator::{SpringDamperSimulator, StepResult};
