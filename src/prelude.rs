//! # Orrery Prelude
//!
//! Commonly used types for building and driving an orrery.
//!
//! ```no_run
//! use orrery::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = BodyRegistry::solar_system()?;
//!     let driver = FrameDriver::new(SystemClock::unix(), registry)
//!         .with_rotation_mode(RotationMode::elapsed());
//!
//!     let mut app = OrreryApp::new()?;
//!     app.attach_simulation(OrrerySimulation::new(driver));
//!     app.run()?;
//!     Ok(())
//! }
//! ```

// Application
pub use crate::app::OrreryApp;
pub use crate::default;
pub use crate::error::{ConfigError, EngineError};

// Graphics and scene
pub use crate::gfx::camera::{CameraManager, OrbitCamera};
pub use crate::gfx::geometry::{generate_ring, generate_sphere, generate_starfield, GeometryData};
pub use crate::gfx::resources::Material;
pub use crate::gfx::scene::{Object, Scene};

// Kinematics and simulation framework
pub use crate::simulation::{
    BodyRegistry, CelestialBody, ClockSource, FrameDriver, ManualClock, OrrerySimulation,
    RotationMode, Simulation, SimulationManager, SystemClock, SystemConfig, Timestamp,
};

// UI
pub use imgui::Ui;
