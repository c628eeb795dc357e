//! Body registry
//!
//! Built once from a [`SystemConfig`] and validated up front: a missing or
//! non-finite parameter rejects construction rather than producing a broken
//! frame later.

use super::body::{Appearance, BodyId, BodyKind, CelestialBody, OrbitParams, RingShape};
use super::config::{BodyConfig, SystemConfig};
use crate::error::{ConfigError, Result};

/// Ordered set of bodies owned by the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    caption: String,
}

impl BodyRegistry {
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        if config.bodies.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut bodies = Vec::with_capacity(config.bodies.len());
        for (id, body) in &config.bodies {
            let orbit = resolve_orbit(id, body, config)?;
            let appearance = resolve_appearance(id, body)?;
            let kind = body.kind.unwrap_or(if appearance.ring.is_some() {
                BodyKind::Ring
            } else {
                BodyKind::Planet
            });

            let mut celestial = CelestialBody::new(id.as_str(), kind, orbit).with_appearance(appearance);
            if let Some(target) = &body.tracks {
                celestial = celestial.tracking(target.as_str());
            }
            log::debug!(
                "registered {} `{}`: R={} rotation={} omega={}",
                format!("{:?}", kind).to_lowercase(),
                id,
                orbit.orbital_radius,
                orbit.rotation_rate,
                orbit.orbital_angular_rate
            );
            bodies.push(celestial);
        }

        log::info!("body registry built with {} bodies", bodies.len());
        Ok(Self {
            bodies,
            caption: config.caption.clone(),
        })
    }

    /// Registry for the built-in solar system table.
    pub fn solar_system() -> Result<Self> {
        Self::from_config(&SystemConfig::solar_system())
    }

    pub fn all_bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn all_bodies_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    pub fn get(&self, id: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|body| body.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Puts every body back at its `t = 0` configuration.
    pub fn reset(&mut self) {
        for body in &mut self.bodies {
            body.reset();
        }
    }
}

fn resolve_orbit(id: &str, body: &BodyConfig, config: &SystemConfig) -> Result<OrbitParams> {
    let rotation_rate = finite(id, "rotationRate", required(id, "rotationRate", body.rotation_rate)?)?;

    let Some(target) = &body.tracks else {
        let orbital_radius = required(id, "orbitalRadius", body.orbital_radius)?;
        let orbital_angular_rate = required(id, "orbitalAngularRate", body.orbital_angular_rate)?;
        return Ok(OrbitParams {
            orbital_radius: radius(id, orbital_radius)?,
            rotation_rate,
            orbital_angular_rate: finite(id, "orbitalAngularRate", orbital_angular_rate)?,
        });
    };

    let tracked = config
        .bodies
        .get(target)
        .ok_or_else(|| ConfigError::UnknownTrackedBody {
            body: id.to_string(),
            target: target.clone(),
        })?;
    if tracked.tracks.is_some() || target == id {
        return Err(ConfigError::ChainedTracking {
            body: id.to_string(),
            target: target.clone(),
        });
    }

    let orbital_radius = radius(target, required(target, "orbitalRadius", tracked.orbital_radius)?)?;
    let orbital_angular_rate = finite(
        target,
        "orbitalAngularRate",
        required(target, "orbitalAngularRate", tracked.orbital_angular_rate)?,
    )?;

    for (parameter, declared, expected) in [
        ("orbitalRadius", body.orbital_radius, orbital_radius),
        ("orbitalAngularRate", body.orbital_angular_rate, orbital_angular_rate),
    ] {
        if let Some(value) = declared {
            if value != expected {
                return Err(ConfigError::ConflictingOrbit {
                    body: id.to_string(),
                    target: target.clone(),
                    parameter,
                    value,
                    expected,
                });
            }
        }
    }

    Ok(OrbitParams {
        orbital_radius,
        rotation_rate,
        orbital_angular_rate,
    })
}

fn resolve_appearance(id: &str, body: &BodyConfig) -> Result<Appearance> {
    let defaults = Appearance::default();
    let size = body.size.unwrap_or(defaults.size);
    if !size.is_finite() || size <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            body: id.to_string(),
            parameter: "size",
            value: size as f64,
            reason: "must be a positive number",
        });
    }

    let ring = match (body.inner_radius, body.outer_radius) {
        (None, None) => None,
        (Some(inner), Some(outer)) => {
            if !(inner >= 0.0 && inner <= outer && outer.is_finite()) {
                return Err(ConfigError::InvalidRing {
                    body: id.to_string(),
                    inner: inner as f64,
                    outer: outer as f64,
                });
            }
            let tilt = body.tilt.unwrap_or(0.0);
            finite(id, "tilt", tilt as f64)?;
            Some(RingShape {
                inner_radius: inner,
                outer_radius: outer,
                tilt,
            })
        }
        (None, Some(_)) => return Err(missing(id, "innerRadius")),
        (Some(_), None) => return Err(missing(id, "outerRadius")),
    };
    if body.kind == Some(BodyKind::Ring) && ring.is_none() {
        return Err(missing(id, "innerRadius"));
    }

    let color = body.color.unwrap_or(defaults.color);
    if let Some(&component) = color.iter().find(|c| !c.is_finite() || **c < 0.0) {
        return Err(ConfigError::InvalidParameter {
            body: id.to_string(),
            parameter: "color",
            value: component as f64,
            reason: "components must be finite and non-negative",
        });
    }

    Ok(Appearance {
        size,
        color,
        emissive: body.emissive.unwrap_or(body.kind == Some(BodyKind::Star)),
        ring,
    })
}

fn required(id: &str, parameter: &'static str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| missing(id, parameter))
}

fn missing(id: &str, parameter: &'static str) -> ConfigError {
    ConfigError::MissingParameter {
        body: id.to_string(),
        parameter,
    }
}

fn finite(id: &str, parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            body: id.to_string(),
            parameter,
            value,
            reason: "must be finite",
        })
    }
}

fn radius(id: &str, value: f64) -> Result<f64> {
    let value = finite(id, "orbitalRadius", value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidParameter {
            body: id.to_string(),
            parameter: "orbitalRadius",
            value,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> SystemConfig {
        SystemConfig::from_json_str(json).unwrap()
    }

    #[test]
    fn built_in_table_registers_every_body_in_order() {
        let registry = BodyRegistry::solar_system().unwrap();
        let ids: Vec<&str> = registry.all_bodies().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "sun", "mercury", "venus", "earth", "mars", "jupiter", "saturn", "saturn_rings",
                "uranus", "neptune"
            ]
        );

        let sun = registry.get("sun").unwrap();
        assert_eq!(sun.kind, BodyKind::Star);
        assert!(sun.orbit.is_central());
        assert!(sun.appearance.emissive);

        let rings = registry.get("saturn_rings").unwrap();
        assert_eq!(rings.kind, BodyKind::Ring);
        assert_eq!(rings.tracks, Some(BodyId::from("saturn")));
        let shape = rings.appearance.ring.unwrap();
        assert_eq!((shape.inner_radius, shape.outer_radius), (135.0, 260.0));
        assert_eq!(shape.tilt, crate::simulation::config::SATURN_RING_TILT);
    }

    #[test]
    fn ring_inherits_the_tracked_orbit_exactly() {
        let registry = BodyRegistry::solar_system().unwrap();
        let saturn = registry.get("saturn").unwrap();
        let rings = registry.get("saturn_rings").unwrap();
        assert_eq!(rings.orbit.orbital_radius, saturn.orbit.orbital_radius);
        assert_eq!(rings.orbit.orbital_angular_rate, saturn.orbit.orbital_angular_rate);
    }

    #[test]
    fn missing_angular_rate_rejects_construction() {
        let err = BodyRegistry::from_config(&config(
            r#"{ "bodies": { "earth": { "orbitalRadius": 2915, "rotationRate": 0.01 } } }"#,
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingParameter { ref body, parameter: "orbitalAngularRate" } if body == "earth"
        ));
    }

    #[test]
    fn negative_radius_is_invalid() {
        let err = BodyRegistry::from_config(&config(
            r#"{ "bodies": { "earth": { "orbitalRadius": -1, "rotationRate": 0.01, "orbitalAngularRate": 0.1 } } }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { parameter: "orbitalRadius", .. }));
    }

    #[test]
    fn tracking_errors_are_reported() {
        let unknown = BodyRegistry::from_config(&config(
            r#"{ "bodies": { "ring": { "tracks": "ghost", "rotationRate": 0, "innerRadius": 1, "outerRadius": 2 } } }"#,
        ))
        .unwrap_err();
        assert!(matches!(unknown, ConfigError::UnknownTrackedBody { .. }));

        let conflicting = BodyRegistry::from_config(&config(
            r#"{ "bodies": {
                "planet": { "orbitalRadius": 10, "rotationRate": 0, "orbitalAngularRate": 0.5 },
                "ring": { "tracks": "planet", "orbitalRadius": 11, "rotationRate": 0, "innerRadius": 1, "outerRadius": 2 }
            } }"#,
        ))
        .unwrap_err();
        assert!(matches!(
            conflicting,
            ConfigError::ConflictingOrbit { parameter: "orbitalRadius", .. }
        ));

        let chained = BodyRegistry::from_config(&config(
            r#"{ "bodies": {
                "planet": { "orbitalRadius": 10, "rotationRate": 0, "orbitalAngularRate": 0.5 },
                "a": { "tracks": "planet", "rotationRate": 0 },
                "b": { "tracks": "a", "rotationRate": 0 }
            } }"#,
        ))
        .unwrap_err();
        assert!(matches!(chained, ConfigError::ChainedTracking { .. }));
    }

    #[test]
    fn ring_radii_must_be_ordered() {
        let err = BodyRegistry::from_config(&config(
            r#"{ "bodies": { "ring": { "orbitalRadius": 5, "rotationRate": 0, "orbitalAngularRate": 0, "innerRadius": 3, "outerRadius": 2 } } }"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRing { .. }));
    }

    #[test]
    fn repeated_body_id_is_rejected() {
        let err = SystemConfig::from_json_str(
            r#"{ "bodies": {
                "earth": { "orbitalRadius": 2915, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 },
                "mars": { "orbitalRadius": 3710, "rotationRate": 0.01, "orbitalAngularRate": 0.00003 },
                "earth": { "orbitalRadius": 99, "rotationRate": 0.01, "orbitalAngularRate": 0.00005 }
            } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBody { ref body } if body == "earth"));
    }

    #[test]
    fn ring_tilt_must_be_finite() {
        let mut table = SystemConfig::solar_system();
        table.bodies["saturn_rings"].tilt = Some(f32::NAN);

        let err = BodyRegistry::from_config(&table).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { ref body, parameter: "tilt", .. } if body == "saturn_rings"
        ));
    }

    #[test]
    fn color_components_are_validated() {
        let negative = BodyRegistry::from_config(&config(
            r#"{ "bodies": { "earth": { "orbitalRadius": 2915, "rotationRate": 0.01, "orbitalAngularRate": 0.00005, "color": [0.2, -1, 0.9] } } }"#,
        ))
        .unwrap_err();
        assert!(matches!(negative, ConfigError::InvalidParameter { parameter: "color", .. }));

        let mut table = SystemConfig::solar_system();
        table.bodies["mars"].color = Some([0.8, f32::INFINITY, 0.2]);
        let infinite = BodyRegistry::from_config(&table).unwrap_err();
        assert!(matches!(
            infinite,
            ConfigError::InvalidParameter { ref body, parameter: "color", .. } if body == "mars"
        ));
    }

    #[test]
    fn empty_configuration_is_rejected() {
        let err = BodyRegistry::from_config(&config(r#"{ "bodies": {} }"#)).unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
    }

    #[test]
    fn reset_restores_initial_configuration() {
        let mut registry = BodyRegistry::solar_system().unwrap();
        for body in registry.all_bodies_mut() {
            body.current_rotation = 3.0;
            body.current_position.z = 42.0;
        }
        registry.reset();

        let earth = registry.get("earth").unwrap();
        assert_eq!(earth.current_rotation, 0.0);
        assert_eq!(earth.current_position.x, 2915.0);
        assert_eq!(earth.current_position.z, 0.0);
    }
}
