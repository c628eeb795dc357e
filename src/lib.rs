//! Orrery
//!
//! A scaled solar system rendered in real time with wgpu and winit. Body positions
//! are a pure function of wall-clock time, so the planets sit where the current
//! date puts them in the scaled model.

pub mod app;
pub mod error;
pub mod gfx;
pub mod performance;
pub mod prelude;
pub mod simulation;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::OrreryApp;
pub use error::{ConfigError, EngineError};

use simulation::{BodyRegistry, FrameDriver, OrrerySimulation, SystemClock};

/// Creates an orrery application showing the built-in solar system.
pub fn default() -> anyhow::Result<OrreryApp> {
    let registry = BodyRegistry::solar_system()?;
    let caption = registry.caption().to_string();
    let driver = FrameDriver::new(SystemClock::unix(), registry);

    let mut app = OrreryApp::new()?;
    app.set_caption(caption);
    app.attach_simulation(OrrerySimulation::new(driver));
    Ok(app)
}
