use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use orrery::{
    simulation::{BodyRegistry, FrameDriver, OrrerySimulation, RotationMode, SystemClock, SystemConfig},
    OrreryApp,
};

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Real-time scaled solar system")]
struct Cli {
    /// Body table to load instead of the built-in solar system
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How self-rotation advances between frames
    #[arg(short, long, value_enum, default_value_t = RotationArg::PerTick)]
    rotation: RotationArg,

    /// Time origin for the kinematics
    #[arg(long, value_enum, default_value_t = ClockArg::Unix)]
    clock: ClockArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum RotationArg {
    /// One rotation step per frame
    PerTick,
    /// Rotation scaled by elapsed time
    Elapsed,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClockArg {
    /// Milliseconds since the Unix epoch
    Unix,
    /// Milliseconds since launch
    Session,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SystemConfig::load(path)
            .with_context(|| format!("could not load body table from {}", path.display()))?,
        None => SystemConfig::solar_system(),
    };
    let registry = BodyRegistry::from_config(&config).context("invalid body table")?;
    let caption = registry.caption().to_string();

    let clock = match cli.clock {
        ClockArg::Unix => SystemClock::unix(),
        ClockArg::Session => SystemClock::since_start(),
    };
    let rotation = match cli.rotation {
        RotationArg::PerTick => RotationMode::PerTick,
        RotationArg::Elapsed => RotationMode::elapsed(),
    };
    let driver = FrameDriver::new(clock, registry).with_rotation_mode(rotation);

    let mut app = OrreryApp::new().context("failed to start the event loop")?;
    app.set_caption(caption);
    app.attach_simulation(OrrerySimulation::new(driver));
    app.run()?;

    Ok(())
}
