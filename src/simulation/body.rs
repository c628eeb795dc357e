//! Celestial body data model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique body identifier, as written in the configuration table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    #[default]
    Planet,
    Ring,
}

/// Static kinematic parameters, fixed after registry construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Distance from the system origin in scene units. Zero pins the body to the origin.
    pub orbital_radius: f64,
    /// Self-rotation increment per tick, in radians.
    pub rotation_rate: f64,
    /// Orbital angle per millisecond of absolute time. The sign picks the direction.
    pub orbital_angular_rate: f64,
}

impl OrbitParams {
    pub fn is_central(&self) -> bool {
        self.orbital_radius == 0.0
    }
}

/// How a body is drawn. Has no influence on the kinematics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Sphere radius (or ring scale) in scene units, one unit per Earth radius.
    pub size: f32,
    pub color: [f32; 3],
    /// Emissive bodies ignore scene lighting.
    pub emissive: bool,
    /// Inner and outer radius of a ring, in scene units.
    pub ring: Option<RingShape>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            size: 1.0,
            color: [0.8, 0.8, 0.8],
            emissive: false,
            ring: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingShape {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Rotation of the ring plane about the X axis, in radians.
    pub tilt: f32,
}

/// Point on the orbital plane. `y` is always zero in this model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalPosition {
    pub x: f64,
    pub z: f64,
}

impl OrbitalPosition {
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.z)
    }

    /// Scene-space translation, narrowed for the GPU.
    pub fn to_scene(&self) -> cgmath::Vector3<f32> {
        cgmath::Vector3::new(self.x as f32, 0.0, self.z as f32)
    }
}

/// A star, planet or ring in the registry.
///
/// Only `current_rotation` and `current_position` change after construction;
/// the frame driver writes them once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub id: BodyId,
    pub kind: BodyKind,
    pub orbit: OrbitParams,
    pub appearance: Appearance,
    /// Body whose orbit this one shares, if any.
    pub tracks: Option<BodyId>,
    pub current_rotation: f64,
    pub current_position: OrbitalPosition,
}

impl CelestialBody {
    pub fn new(id: impl Into<BodyId>, kind: BodyKind, orbit: OrbitParams) -> Self {
        Self {
            id: id.into(),
            kind,
            orbit,
            appearance: Appearance::default(),
            tracks: None,
            current_rotation: 0.0,
            current_position: Self::initial_position(&orbit),
        }
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn tracking(mut self, target: impl Into<BodyId>) -> Self {
        self.tracks = Some(target.into());
        self
    }

    /// Restores the `t = 0` configuration: no rotation, body on the +X axis.
    pub fn reset(&mut self) {
        self.current_rotation = 0.0;
        self.current_position = Self::initial_position(&self.orbit);
    }

    fn initial_position(orbit: &OrbitParams) -> OrbitalPosition {
        OrbitalPosition::new(orbit.orbital_radius, 0.0)
    }
}
