//! Simulation system
//!
//! The orbital model and the per-frame loop that drives it:
//!
//! - [`clock`] - time sources (wall clock, session clock, manual clock for tests)
//! - [`body`] / [`registry`] / [`config`] - the validated body table
//! - [`kinematics`] - pure rotation and position update
//! - [`frame_driver`] - one tick per rendered frame
//! - [`orrery`] - glue between the frame driver and the scene
//! - [`manager`] / [`traits`] - lifecycle hooks used by the app

pub mod body;
pub mod clock;
pub mod config;
pub mod frame_driver;
pub mod kinematics;
pub mod manager;
pub mod orrery;
pub mod registry;
pub mod traits;

pub use body::{BodyId, BodyKind, CelestialBody, OrbitParams, OrbitalPosition};
pub use clock::{ClockSource, ManualClock, SystemClock, Timestamp};
pub use config::{BodyConfig, SystemConfig};
pub use frame_driver::{FrameDriver, FrameReport, RotationMode};
pub use kinematics::{orbital_position, KinematicState};
pub use manager::SimulationManager;
pub use orrery::OrrerySimulation;
pub use registry::BodyRegistry;
pub use traits::Simulation;
