//! Fixed-rate driving of a simulator from variable frame times.
//!
//! Render loops produce frames of uneven length while the spring needs a
//! constant `dt`. [`FixedStepDriver`] banks frame time and spends it in whole
//! ticks, the way a game engine's fixed update works.

use crate::error::SimulationError;
use crate::simulator::{SpringDamperSimulator, StepResult};
use glam::Vec3;
use tracing::{debug, warn};

/// Default cap on ticks per frame.
pub const DEFAULT_MAX_STEPS: u32 = 8;

/// What happened during one call to [`FixedStepDriver::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Ticks that completed successfully this frame.
    pub ticks: u32,
    /// Result of the last completed tick, if any.
    pub last: Option<StepResult>,
    /// Set when the frame's physics was skipped.
    pub skipped: Option<SimulationError>,
}

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    fixed_dt: f32,
    max_steps: u32,
    accumulator: f32,
    total_ticks: u64,
    /// Ticks since the last [`FixedStepDriver::restart`], the driver's clock.
    clock_ticks: u64,
}

impl FixedStepDriver {
    pub fn new(fixed_dt: f32) -> Result<Self, SimulationError> {
        if !fixed_dt.is_finite() || fixed_dt <= 0.0 {
            return Err(SimulationError::InvalidTimeStep { dt: fixed_dt });
        }
        Ok(Self {
            fixed_dt,
            max_steps: DEFAULT_MAX_STEPS,
            accumulator: 0.0,
            total_ticks: 0,
            clock_ticks: 0,
        })
    }

    /// Limit how many ticks one frame may run. Time beyond the cap is dropped.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Simulated seconds since the last restart, at the start of the next tick.
    pub fn elapsed(&self) -> f32 {
        self.clock_ticks as f32 * self.fixed_dt
    }

    /// Drop banked time and zero the clock, e.g. after re-seeding the simulator.
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.clock_ticks = 0;
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulator / self.fixed_dt
    }

    /// Bank `frame_dt` and run as many fixed ticks as it pays for.
    ///
    /// `anchor` maps [`elapsed`](Self::elapsed) time to the anchor position and
    /// is sampled at the start of every tick. Invalid frames are skipped and
    /// logged; the simulator keeps running.
    pub fn advance(
        &mut self,
        sim: &mut SpringDamperSimulator,
        frame_dt: f32,
        mut anchor: impl FnMut(f32) -> Vec3,
    ) -> FrameReport {
        let mut report = FrameReport {
            ticks: 0,
            last: None,
            skipped: None,
        };

        if !frame_dt.is_finite() || frame_dt < 0.0 {
            warn!(frame_dt, "skipping frame with invalid duration");
            report.skipped = Some(SimulationError::InvalidTimeStep { dt: frame_dt });
            return report;
        }

        self.accumulator += frame_dt;
        while self.accumulator >= self.fixed_dt {
            if report.ticks == self.max_steps {
                debug!(
                    dropped = self.accumulator,
                    "tick budget exhausted, dropping accumulated time"
                );
                self.accumulator = 0.0;
                break;
            }

            match sim.step(anchor(self.elapsed()), self.fixed_dt) {
                Ok(result) => {
                    self.accumulator -= self.fixed_dt;
                    self.total_ticks += 1;
                    self.clock_ticks += 1;
                    report.ticks += 1;
                    report.last = Some(result);
                }
                Err(e) => {
                    warn!(tick = self.total_ticks, error = %e, "skipping rest of frame");
                    self.accumulator = 0.0;
                    report.skipped = Some(e);
                    break;
                }
            }
        }

        report
    }
}
