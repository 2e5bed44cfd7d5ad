//! Real-time loop with live scene reloading.
//!
//! The scene's directory is watched so that editors which save by renaming a
//! new file over the old one still trigger a reload. An edit that keeps the
//! spring parameters only re-seeds the running simulator; an edit to the
//! spring rebuilds it.

use crate::scene::Scene;
use anyhow::Result;
use notify::{Event, EventKind, RecommendedWatcher, Watcher};
use springsim_core::{format_simulation_error, FixedStepDriver, SpringDamperSimulator};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Target frame period of the loop.
const FRAME: Duration = Duration::from_millis(16);

/// Print the state every this many frames.
const REPORT_EVERY: u64 = 30;

/// How a new scene was applied to a running playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Same spring, simulator re-seeded in place.
    Reseeded,
    /// Spring parameters changed, simulator rebuilt.
    Rebuilt,
}

/// A scene being played back in fixed ticks
pub struct Playback {
    scene: Scene,
    sim: SpringDamperSimulator,
    driver: FixedStepDriver,
}

impl Playback {
    pub fn new(scene: Scene) -> Result<Self> {
        let sim = scene.build_simulator()?;
        let driver = FixedStepDriver::new(scene.run.dt)?;
        Ok(Self { scene, sim, driver })
    }

    /// Switch to `scene`. On error nothing changes and the old scene keeps playing.
    pub fn apply(&mut self, scene: Scene) -> Result<ReloadOutcome> {
        let config = scene.config()?;
        let driver = FixedStepDriver::new(scene.run.dt)?;

        let outcome = if config == *self.sim.config() {
            self.sim
                .reset(scene.initial_position(), scene.initial_velocity())?;
            ReloadOutcome::Reseeded
        } else {
            self.sim = scene.build_simulator()?;
            ReloadOutcome::Rebuilt
        };

        // Fresh clock and no banked time from the old trajectory
        self.driver = driver;
        self.scene = scene;
        Ok(outcome)
    }

    /// Load the scene at `path` and apply it.
    pub fn reload_from(&mut self, path: &Path) -> Result<ReloadOutcome> {
        let scene = Scene::load(path)?;
        self.apply(scene)
    }

    pub fn simulator(&self) -> &SpringDamperSimulator {
        &self.sim
    }

    pub fn driver(&self) -> &FixedStepDriver {
        &self.driver
    }

    fn frame(&mut self, frame_dt: f32, frame: u64) {
        let scene = &self.scene;
        let report = self
            .driver
            .advance(&mut self.sim, frame_dt, |t| scene.anchor_at(t));

        if let Some(last) = report.last {
            debug!(ticks = report.ticks, net_force = ?last.net_force(), "frame");
        }
        if let Some(e) = &report.skipped {
            println!("{}", format_simulation_error(e, self.driver.total_ticks()));
        }
        if frame % REPORT_EVERY == 0 {
            let state = self.sim.current_state();
            println!(
                "t={:>8.3}  pos=({:.4}, {:.4}, {:.4})  vel=({:.4}, {:.4}, {:.4})",
                self.driver.elapsed(),
                state.position.x,
                state.position.y,
                state.position.z,
                state.velocity.x,
                state.velocity.y,
                state.velocity.z
            );
        }
    }
}

/// True if `event` created, changed, renamed or removed the scene file.
fn touches_scene(event: &Event, scene: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant
        && event
            .paths
            .iter()
            .any(|p| p == scene || p.file_name() == scene.file_name())
}

struct WatchSession {
    path: PathBuf,
    playback: Playback,
    #[allow(dead_code)] // Kept alive to maintain file watching
    watcher: Option<RecommendedWatcher>,
    events: mpsc::Receiver<notify::Result<Event>>,
}

impl WatchSession {
    fn open(path: PathBuf) -> Result<Self> {
        let playback = Playback::new(Scene::load(&path)?)?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if let Some(ref mut w) = watcher {
            if let Err(e) = w.watch(&dir, notify::RecursiveMode::NonRecursive) {
                warn!(error = %e, "file watching unavailable, reload disabled");
            }
        }

        Ok(Self {
            path,
            playback,
            watcher,
            events: rx,
        })
    }

    fn check_file_changes(&mut self) {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(event) => changed |= touches_scene(&event, &self.path),
                Err(e) => warn!(error = %e, "file watcher error"),
            }
        }

        if changed {
            match self.playback.reload_from(&self.path) {
                Ok(ReloadOutcome::Reseeded) => info!("scene changed, re-seeded simulation"),
                Ok(ReloadOutcome::Rebuilt) => {
                    let config = self.playback.simulator().config();
                    info!(
                        stiffness = config.stiffness(),
                        damping = config.damping(),
                        mass = config.mass(),
                        "spring changed, rebuilt simulation"
                    );
                }
                // Keep simulating the previous scene
                Err(e) => warn!("reload failed: {:#}", e),
            }
        }
    }
}

pub fn watch_file(path: PathBuf, frames: Option<u64>) -> Result<()> {
    let mut session = WatchSession::open(path)?;
    info!(path = %session.path.display(), "watching scene, Ctrl-C to stop");

    let mut last = Instant::now();
    let mut frame = 0u64;
    while frames.map_or(true, |limit| frame < limit) {
        session.check_file_changes();

        let now = Instant::now();
        let frame_dt = now.duration_since(last).as_secs_f32();
        last = now;
        session.playback.frame(frame_dt, frame);

        frame += 1;
        std::thread::sleep(FRAME);
    }

    info!(ticks = session.playback.driver().total_ticks(), "stopped");
    Ok(())
}
