use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scene::Scene;
use springsim_core::{SimulationError, SpringState};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod scene;
mod watch;

#[derive(Parser)]
#[command(name = "springsim")]
#[command(about = "springsim - A damped spring simulator", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene headlessly and print the trajectory
    Run {
        /// Path to the scene file
        file: PathBuf,
        /// Override the scene's step count
        #[arg(long)]
        steps: Option<usize>,
        /// Override the scene's time step in seconds
        #[arg(long)]
        dt: Option<f32>,
        /// Print every Nth tick
        #[arg(long, default_value_t = 25)]
        every: usize,
        /// Print CSV rows instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Run a scene in real time, re-seeding whenever the file changes
    Watch {
        /// Path to the scene file
        file: PathBuf,
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: {}", e);
    }

    let outcome = match cli.command {
        Commands::Run {
            file,
            steps,
            dt,
            every,
            csv,
        } => run_file(
            &file,
            &RunOptions {
                steps,
                dt,
                every,
                csv,
            },
        ),
        Commands::Watch { file, frames } => watch::watch_file(file, frames),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Options for `springsim run` beyond the scene itself
struct RunOptions {
    steps: Option<usize>,
    dt: Option<f32>,
    every: usize,
    csv: bool,
}

fn run_file(file: &PathBuf, options: &RunOptions) -> Result<()> {
    let scene = Scene::load(file)?;
    let stdout = std::io::stdout();
    let state = run_scene(&scene, options, &mut stdout.lock())?;
    info!(
        position = ?state.position,
        velocity = ?state.velocity,
        "finished"
    );
    Ok(())
}

/// Step `scene` and write the trajectory to `out`, returning the final state.
fn run_scene(scene: &Scene, options: &RunOptions, out: &mut impl Write) -> Result<SpringState> {
    let mut sim = scene.build_simulator()?;
    let steps = options.steps.unwrap_or(scene.run.steps);
    let dt = options.dt.unwrap_or(scene.run.dt);
    let every = options.every.max(1);

    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimulationError::InvalidTimeStep { dt }.into());
    }

    info!(
        stiffness = sim.config().stiffness(),
        damping = sim.config().damping(),
        mass = sim.config().mass(),
        damping_ratio = sim.config().damping_ratio(),
        steps,
        dt,
        "running scene"
    );

    if options.csv {
        writeln!(out, "tick,t,x,y,z,vx,vy,vz")?;
    } else {
        writeln!(
            out,
            "{:>6} {:>8} {:>28} {:>28} {:>10}",
            "tick", "t", "position", "velocity", "energy"
        )?;
    }

    for tick in 1..=steps {
        // Anchor at the start of the tick
        let anchor = scene.anchor_at((tick - 1) as f32 * dt);
        let result = sim
            .step(anchor, dt)
            .with_context(|| format!("run stopped at tick {}", tick))?;

        if tick % every == 0 || tick == steps {
            let t = tick as f32 * dt;
            let p = result.position;
            let v = result.velocity;
            if options.csv {
                writeln!(out, "{},{},{},{},{},{},{},{}", tick, t, p.x, p.y, p.z, v.x, v.y, v.z)?;
            } else {
                writeln!(
                    out,
                    "{:>6} {:>8.3} {:>28} {:>28} {:>10.4}",
                    tick,
                    t,
                    format!("({:.4}, {:.4}, {:.4})", p.x, p.y, p.z),
                    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z),
                    sim.energy(scene.anchor_at(t)).total()
                )?;
            }
        }
    }

    Ok(sim.current_state())
}
