//! Physical parameters of a spring-damper system.

use crate::error::SimulationError;
use glam::Vec3;

/// Standard gravity pointing down the Y axis.
pub const EARTH_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Validated, immutable simulation parameters.
///
/// ```
/// use springsim_core::SimulationConfig;
/// use glam::Vec3;
///
/// let config = SimulationConfig::new(10.0, 0.5, 1.0, Vec3::new(0.0, -9.8, 0.0)).unwrap();
/// assert_eq!(config.stiffness(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    stiffness: f32,
    damping: f32,
    mass: f32,
    gravity: Vec3,
}

impl SimulationConfig {
    /// Build a config, rejecting non-positive stiffness or mass, negative
    /// damping and any non-finite value.
    pub fn new(
        stiffness: f32,
        damping: f32,
        mass: f32,
        gravity: Vec3,
    ) -> Result<Self, SimulationError> {
        check_positive("stiffness", stiffness)?;
        if !damping.is_finite() {
            return Err(SimulationError::config("damping", "must be finite"));
        }
        if damping < 0.0 {
            return Err(SimulationError::config("damping", "must not be negative"));
        }
        check_positive("mass", mass)?;
        if !gravity.is_finite() {
            return Err(SimulationError::config("gravity", "must be finite"));
        }

        Ok(Self {
            stiffness,
            damping,
            mass,
            gravity,
        })
    }

    /// Same parameters, different gravity field.
    pub fn with_gravity(self, gravity: Vec3) -> Result<Self, SimulationError> {
        Self::new(self.stiffness, self.damping, self.mass, gravity)
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Static displacement of the mass below the anchor under gravity: `m * g / k`.
    pub fn equilibrium_offset(&self) -> Vec3 {
        self.gravity * (self.mass / self.stiffness)
    }

    /// Damping ratio `c / (2 * sqrt(k * m))`. Below 1.0 the system oscillates.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

fn check_positive(parameter: &'static str, value: f32) -> Result<(), SimulationError> {
    if !value.is_finite() {
        return Err(SimulationError::config(parameter, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SimulationError::config(parameter, "must be positive"));
    }
    Ok(())
}
