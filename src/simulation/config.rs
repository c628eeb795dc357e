//! Loadable body configuration
//!
//! The configuration is an ordered map from body id to its static parameters:
//!
//! ```json
//! {
//!   "caption": "...",
//!   "bodies": {
//!     "earth": { "orbitalRadius": 2915, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 }
//!   }
//! }
//! ```
//!
//! Kinematic fields are optional at the serde level so that a missing value is
//! reported by registry construction with the body's name, instead of being
//! defaulted.
//!
//! The built-in table uses Earth's radius as the size unit (1:1), real distances
//! scaled 1:100, and orbital angular velocities scaled 1:300,000. Rotation rates are
//! exaggerated for visibility and follow no scale.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::body::BodyKind;
use crate::error::{ConfigError, Result};

pub const DEFAULT_CAPTION: &str = "Solar System | Scales (using Earth size as reference) ~= \
Sizes: 1:1, Distances: 1:100, Translation Speed: 1:300.000 | Rotation Speed out of scale.";

/// Ring plane rotation about X, in radians (about 116.6°). The rings end up
/// roughly 26.6° out of the orbital plane.
pub const SATURN_RING_TILT: f32 = 2.035_405_6;

/// A repeated body id is rejected with [`ConfigError::DuplicateBody`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSystemConfig")]
pub struct SystemConfig {
    #[serde(default = "default_caption")]
    pub caption: String,
    pub bodies: IndexMap<String, BodyConfig>,
}

fn default_caption() -> String {
    DEFAULT_CAPTION.to_string()
}

/// Wire form of [`SystemConfig`], before repeated ids are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSystemConfig {
    #[serde(default = "default_caption")]
    caption: String,
    bodies: BodyEntries,
}

/// Body entries in file order, repeats included.
struct BodyEntries(Vec<(String, BodyConfig)>);

impl<'de> Deserialize<'de> for BodyEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = BodyEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from body id to body parameters")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, BodyConfig>()? {
                    entries.push(entry);
                }
                Ok(BodyEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl TryFrom<RawSystemConfig> for SystemConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSystemConfig) -> Result<Self> {
        let BodyEntries(entries) = raw.bodies;
        let mut bodies = IndexMap::with_capacity(entries.len());
        for (id, body) in entries {
            if bodies.contains_key(&id) {
                return Err(ConfigError::DuplicateBody { body: id });
            }
            bodies.insert(id, body);
        }
        Ok(Self {
            caption: raw.caption,
            bodies,
        })
    }
}

/// One row of the configuration table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BodyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BodyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_angular_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<f32>,
}

impl BodyConfig {
    fn planet(orbital_radius: f64, rotation_rate: f64, orbital_angular_rate: f64, size: f32) -> Self {
        Self {
            kind: Some(BodyKind::Planet),
            orbital_radius: Some(orbital_radius),
            rotation_rate: Some(rotation_rate),
            orbital_angular_rate: Some(orbital_angular_rate),
            size: Some(size),
            ..Default::default()
        }
    }

    fn colored(mut self, color: [f32; 3]) -> Self {
        self.color = Some(color);
        self
    }
}

impl SystemConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawSystemConfig = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loading body configuration from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The sun, eight planets and Saturn's rings.
    pub fn solar_system() -> Self {
        let mut bodies = IndexMap::new();

        bodies.insert(
            "sun".to_string(),
            BodyConfig {
                kind: Some(BodyKind::Star),
                orbital_radius: Some(0.0),
                rotation_rate: Some(0.0035),
                orbital_angular_rate: Some(0.0),
                size: Some(1400.0),
                color: Some([1.0, 0.85, 0.4]),
                emissive: Some(true),
                ..Default::default()
            },
        );
        // Orbital radius = scaled distance + sun radius + planet radius.
        bodies.insert(
            "mercury".to_string(),
            BodyConfig::planet(1980.0, 0.0004, 0.0002, 8.0).colored([0.6, 0.58, 0.55]),
        );
        bodies.insert(
            "venus".to_string(),
            BodyConfig::planet(2515.0, 0.00005, 0.000065, 15.0).colored([0.9, 0.75, 0.5]),
        );
        bodies.insert(
            "earth".to_string(),
            BodyConfig::planet(2915.0, 0.01, 0.00005, 15.0).colored([0.2, 0.45, 0.9]),
        );
        bodies.insert(
            "mars".to_string(),
            BodyConfig::planet(3710.0, 0.01, 0.00003, 9.0).colored([0.8, 0.35, 0.2]),
        );
        bodies.insert(
            "jupiter".to_string(),
            BodyConfig::planet(9345.0, 0.03, 0.0000042, 145.0).colored([0.85, 0.7, 0.55]),
        );
        bodies.insert(
            "saturn".to_string(),
            BodyConfig::planet(15820.0, 0.03, 0.0000017, 120.0).colored([0.9, 0.8, 0.6]),
        );
        bodies.insert(
            "saturn_rings".to_string(),
            BodyConfig {
                kind: Some(BodyKind::Ring),
                tracks: Some("saturn".to_string()),
                rotation_rate: Some(0.0),
                inner_radius: Some(135.0),
                outer_radius: Some(260.0),
                tilt: Some(SATURN_RING_TILT),
                color: Some([0.8, 0.72, 0.55]),
                emissive: Some(true),
                ..Default::default()
            },
        );
        bodies.insert(
            "uranus".to_string(),
            BodyConfig::planet(30150.0, 0.015, 0.0000006, 52.0).colored([0.6, 0.85, 0.9]),
        );
        bodies.insert(
            "neptune".to_string(),
            BodyConfig::planet(46450.0, 0.013, 0.0000003, 50.0).colored([0.3, 0.45, 0.95]),
        );

        Self {
            caption: default_caption(),
            bodies,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::solar_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_keys_in_order() {
        let config = SystemConfig::from_json_str(
            r#"{
                "bodies": {
                    "star": { "kind": "star", "orbitalRadius": 0, "rotationRate": 0.1, "orbitalAngularRate": 0 },
                    "rock": { "orbitalRadius": 10, "rotationRate": 0.2, "orbitalAngularRate": -0.001 }
                }
            }"#,
        )
        .unwrap();

        let ids: Vec<&str> = config.bodies.keys().map(String::as_str).collect();
        assert_eq!(ids, ["star", "rock"]);
        assert_eq!(config.bodies["rock"].orbital_angular_rate, Some(-0.001));
        assert_eq!(config.bodies["star"].kind, Some(BodyKind::Star));
        assert_eq!(config.caption, DEFAULT_CAPTION);
    }

    #[test]
    fn non_numeric_rate_is_a_parse_error() {
        let err = SystemConfig::from_json_str(
            r#"{ "bodies": { "earth": { "orbitalRadius": 2915, "rotationRate": "fast", "orbitalAngularRate": 0.00005 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = SystemConfig::from_json_str(
            r#"{ "bodies": { "earth": { "orbitalRadius": 2915, "rotationRate": 0.01, "orbitalAngularRate": 0.00005, "mass": 1 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn repeated_body_id_fails_through_plain_serde_too() {
        let json = r#"{ "bodies": {
            "earth": { "orbitalRadius": 2915, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 },
            "earth": { "orbitalRadius": 99, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 }
        } }"#;

        let err = serde_json::from_str::<SystemConfig>(json).unwrap_err();
        assert!(err.to_string().contains("`earth` is declared more than once"));
        assert!(matches!(
            SystemConfig::from_json_str(json),
            Err(ConfigError::DuplicateBody { ref body }) if body == "earth"
        ));
    }

    #[test]
    fn json_round_trip_preserves_built_in_table() {
        let config = SystemConfig::solar_system();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(SystemConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn load_reports_missing_file_path() {
        let err = SystemConfig::load("/nonexistent/orrery.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("orrery.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
