//! Error types for the orrery
//!
//! Kinematics never fails, so the only error the simulation core can raise is a
//! [`ConfigError`] while the body registry is being built. [`EngineError`]
//! covers window and GPU setup in the rendering layer.

use std::path::PathBuf;

/// Rejected body configuration, raised before the first frame is drawn.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("body `{body}` is missing required parameter `{parameter}`")]
    MissingParameter {
        body: String,
        parameter: &'static str,
    },

    #[error("body `{body}` has invalid `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        body: String,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("body `{body}` tracks unknown body `{target}`")]
    UnknownTrackedBody { body: String, target: String },

    #[error("body `{body}` tracks `{target}`, which itself tracks another body")]
    ChainedTracking { body: String, target: String },

    #[error("body `{body}` declares `{parameter}` = {value}, but tracked body `{target}` uses {expected}")]
    ConflictingOrbit {
        body: String,
        target: String,
        parameter: &'static str,
        value: f64,
        expected: f64,
    },

    #[error("ring `{body}` has inner radius {inner} larger than outer radius {outer}")]
    InvalidRing { body: String, inner: f64, outer: f64 },

    #[error("body `{body}` is declared more than once")]
    DuplicateBody { body: String },

    #[error("configuration contains no bodies")]
    Empty,

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while bringing up the window, surface or GPU device.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
