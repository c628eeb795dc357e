//! Circular-orbit kinematics
//!
//! Translation is a pure function of absolute time: `x = R cos(ωt)`, `z = R sin(ωt)`.
//! There is no integration, so a skipped or late frame lands exactly where it
//! should and the model can be restarted from any timestamp.
//!
//! Rotation accumulates a fixed increment per tick and is the only state carried
//! between frames.
//!
//! Everything here runs in f64. Wall-clock timestamps sit around 1.7e12 ms, and
//! `ωt` at that magnitude has no usable fractional part in f32.

use super::body::{CelestialBody, OrbitParams, OrbitalPosition};
use super::clock::Timestamp;

/// Rotation and position of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub rotation: f64,
    pub position: OrbitalPosition,
}

/// Position on a circle of radius `orbital_radius` at absolute time `t`.
pub fn orbital_position(orbit: &OrbitParams, t: Timestamp) -> OrbitalPosition {
    if orbit.is_central() {
        return OrbitalPosition::ORIGIN;
    }
    let angle = orbit.orbital_angular_rate * t;
    OrbitalPosition::new(
        orbit.orbital_radius * angle.cos(),
        orbit.orbital_radius * angle.sin(),
    )
}

/// Next state of `body` for a frame at time `t`, one rotation step later.
///
/// Does not modify the body; the caller commits the result.
pub fn update(body: &CelestialBody, t: Timestamp) -> KinematicState {
    advance(body, t, 1.0)
}

/// Like [`update`], with the rotation increment scaled by `rotation_steps`.
pub fn advance(body: &CelestialBody, t: Timestamp, rotation_steps: f64) -> KinematicState {
    KinematicState {
        rotation: body.current_rotation + body.orbit.rotation_rate * rotation_steps,
        position: orbital_position(&body.orbit, t),
    }
}

impl CelestialBody {
    pub fn commit(&mut self, state: KinematicState) {
        self.current_rotation = state.rotation;
        self.current_position = state.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::body::BodyKind;
    use approx::assert_relative_eq;

    fn planet(radius: f64, rotation_rate: f64, angular_rate: f64) -> CelestialBody {
        CelestialBody::new(
            "test",
            BodyKind::Planet,
            OrbitParams {
                orbital_radius: radius,
                rotation_rate,
                orbital_angular_rate: angular_rate,
            },
        )
    }

    #[test]
    fn orbit_stays_on_its_circle() {
        let body = planet(9345.0, 0.03, 0.0000042);
        for t in [0.0, 1.0, 1234.5, 8.6e7, 1.7e12, 1.7e12 + 16.7] {
            let state = update(&body, t);
            let r2 = state.position.x.powi(2) + state.position.z.powi(2);
            assert_relative_eq!(r2, 9345.0_f64.powi(2), max_relative = 1e-12);
        }
    }

    #[test]
    fn central_body_stays_at_origin() {
        let body = planet(0.0, 0.0035, 0.5);
        for t in [0.0, 10.0, 1.7e12] {
            assert_eq!(update(&body, t).position, OrbitalPosition::ORIGIN);
        }
    }

    #[test]
    fn position_is_pure_in_time() {
        let mut body = planet(2915.0, 0.01, 0.00005);
        let first = update(&body, 5000.0);

        body.current_position = OrbitalPosition::new(-1.0, -1.0);
        body.current_rotation = 99.0;
        let second = update(&body, 5000.0);

        assert_eq!(first.position, second.position);
        assert_eq!(update(&body, 5000.0), second);
    }

    #[test]
    fn rotation_accumulates_per_tick() {
        let mut body = planet(2915.0, 0.01, 0.00005);
        for tick in 0..250 {
            let state = update(&body, tick as f64 * 16.0);
            body.commit(state);
        }
        assert_relative_eq!(body.current_rotation, 250.0 * 0.01, max_relative = 1e-12);
    }

    #[test]
    fn negative_rate_orbits_the_other_way() {
        let prograde = planet(100.0, 0.0, 0.001);
        let retrograde = planet(100.0, 0.0, -0.001);
        let t = 500.0;
        assert_relative_eq!(update(&prograde, t).position.z, -update(&retrograde, t).position.z);
        assert_relative_eq!(update(&prograde, t).position.x, update(&retrograde, t).position.x);
    }

    #[test]
    fn advance_scales_rotation_only() {
        let body = planet(100.0, 0.02, 0.001);
        let state = advance(&body, 300.0, 2.5);
        assert_relative_eq!(state.rotation, 0.05);
        assert_eq!(state.position, update(&body, 300.0).position);
    }
}
