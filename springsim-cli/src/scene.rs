//! Scene files: spring parameters, anchor motion and run settings in TOML.

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;
use springsim_core::{SimulationConfig, SpringDamperSimulator, EARTH_GRAVITY};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub spring: SpringSection,
    #[serde(default)]
    pub anchor: AnchorSection,
    #[serde(default)]
    pub initial: InitialSection,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringSection {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub gravity: Option<[f32; 3]>,
}

/// Anchor at `position`, optionally swaying sinusoidally.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorSection {
    pub position: [f32; 3],
    pub sway_amplitude: [f32; 3],
    /// Hz
    pub sway_frequency: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialSection {
    /// Start position relative to the anchor.
    pub offset: [f32; 3],
    pub velocity: [f32; 3],
}

impl Default for InitialSection {
    fn default() -> Self {
        Self {
            offset: [0.0, -2.0, 0.0],
            velocity: [0.0; 3],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSection {
    pub dt: f32,
    pub steps: usize,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            dt: 0.02,
            steps: 500,
        }
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading scene {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn config(&self) -> Result<SimulationConfig> {
        let gravity = self.spring.gravity.map(Vec3::from_array).unwrap_or(EARTH_GRAVITY);
        let config = SimulationConfig::new(
            self.spring.stiffness,
            self.spring.damping,
            self.spring.mass,
            gravity,
        )?;
        Ok(config)
    }

    /// Anchor position `t` seconds into the run.
    pub fn anchor_at(&self, t: f32) -> Vec3 {
        let base = Vec3::from_array(self.anchor.position);
        let amplitude = Vec3::from_array(self.anchor.sway_amplitude);
        let phase = std::f32::consts::TAU * self.anchor.sway_frequency * t;
        base + amplitude * phase.sin()
    }

    pub fn initial_position(&self) -> Vec3 {
        self.anchor_at(0.0) + Vec3::from_array(self.initial.offset)
    }

    pub fn initial_velocity(&self) -> Vec3 {
        Vec3::from_array(self.initial.velocity)
    }

    pub fn build_simulator(&self) -> Result<SpringDamperSimulator> {
        let sim = SpringDamperSimulator::with_velocity(
            self.config()?,
            self.initial_position(),
            self.initial_velocity(),
        )?;
        Ok(sim)
    }
}
