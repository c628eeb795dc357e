//! Per-frame update loop
//!
//! [`FrameDriver::tick`] is called by whatever schedules frames (the winit redraw
//! handler in the app, a plain loop in tests). It reads the clock once, advances
//! every body with that single timestamp, and returns before anything is drawn.

use super::clock::{ClockSource, SystemClock, Timestamp};
use super::kinematics;
use super::registry::BodyRegistry;

/// How self-rotation advances between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationMode {
    /// One `rotation_rate` step per tick. Spin speed follows the frame rate.
    PerTick,
    /// Steps scaled by elapsed time over a nominal frame length, so spin speed
    /// is independent of the frame rate.
    Elapsed { nominal_frame_ms: f64 },
}

impl RotationMode {
    /// Frame length the built-in rotation rates were tuned for (60 Hz).
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn elapsed() -> Self {
        Self::Elapsed {
            nominal_frame_ms: Self::NOMINAL_FRAME_MS,
        }
    }
}

impl Default for RotationMode {
    fn default() -> Self {
        Self::PerTick
    }
}

/// Summary of one tick, handed back to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based index of the tick since construction or the last reset.
    pub frame: u64,
    pub timestamp: Timestamp,
    pub bodies_updated: usize,
}

pub struct FrameDriver<C: ClockSource = SystemClock> {
    clock: C,
    registry: BodyRegistry,
    rotation_mode: RotationMode,
    last_timestamp: Option<Timestamp>,
    frame: u64,
}

impl<C: ClockSource> FrameDriver<C> {
    pub fn new(clock: C, registry: BodyRegistry) -> Self {
        Self {
            clock,
            registry,
            rotation_mode: RotationMode::default(),
            last_timestamp: None,
            frame: 0,
        }
    }

    pub fn with_rotation_mode(mut self, mode: RotationMode) -> Self {
        self.rotation_mode = mode;
        self
    }

    /// Advances every body to the current clock reading.
    pub fn tick(&mut self) -> FrameReport {
        let t = self.clock.now();
        let steps = self.rotation_steps(t);

        for body in self.registry.all_bodies_mut() {
            let state = kinematics::advance(body, t, steps);
            body.commit(state);
        }

        self.last_timestamp = Some(t);
        self.frame += 1;

        FrameReport {
            frame: self.frame,
            timestamp: t,
            bodies_updated: self.registry.len(),
        }
    }

    fn rotation_steps(&self, t: Timestamp) -> f64 {
        match (self.rotation_mode, self.last_timestamp) {
            (RotationMode::PerTick, _) => 1.0,
            (RotationMode::Elapsed { .. }, None) => 1.0,
            (RotationMode::Elapsed { nominal_frame_ms }, Some(last)) => {
                if nominal_frame_ms > 0.0 {
                    (t - last).max(0.0) / nominal_frame_ms
                } else {
                    1.0
                }
            }
        }
    }

    /// Restores every body to its `t = 0` configuration and restarts the frame count.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.last_timestamp = None;
        self.frame = 0;
        log::info!("frame driver reset");
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation_mode
    }

    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.rotation_mode = mode;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_timestamp
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::clock::ManualClock;
    use approx::assert_relative_eq;

    fn driver() -> FrameDriver<ManualClock> {
        FrameDriver::new(ManualClock::new(0.0), BodyRegistry::solar_system().unwrap())
    }

    #[test]
    fn tick_updates_every_body_with_one_timestamp() {
        let mut driver = driver();
        driver.clock_mut().set(20_000.0);
        let report = driver.tick();

        assert_eq!(report.frame, 1);
        assert_eq!(report.timestamp, 20_000.0);
        assert_eq!(report.bodies_updated, driver.registry().len());

        for body in driver.registry().all_bodies() {
            let expected = kinematics::orbital_position(&body.orbit, 20_000.0);
            assert_eq!(body.current_position, expected, "{} evaluated at another instant", body.id);
        }
    }

    #[test]
    fn per_tick_rotation_ignores_elapsed_time() {
        let mut driver = driver();
        for step in 1..=10 {
            driver.clock_mut().set(step as f64 * 250.0);
            driver.tick();
        }
        let earth = driver.registry().get("earth").unwrap();
        assert_relative_eq!(earth.current_rotation, 10.0 * 0.01, max_relative = 1e-12);
    }

    #[test]
    fn elapsed_rotation_scales_with_frame_length() {
        let mut driver = driver().with_rotation_mode(RotationMode::Elapsed {
            nominal_frame_ms: 10.0,
        });
        driver.tick(); // first tick: one step
        driver.clock_mut().advance(30.0);
        driver.tick(); // three steps
        driver.tick(); // no time passed: no spin

        let earth = driver.registry().get("earth").unwrap();
        assert_relative_eq!(earth.current_rotation, 4.0 * 0.01, max_relative = 1e-12);
    }

    #[test]
    fn skipped_ticks_self_correct_position() {
        let mut every_frame = driver();
        let mut skipping = driver();

        for step in 1..=60 {
            let t = step as f64 * 16.0;
            every_frame.clock_mut().set(t);
            every_frame.tick();
            if step % 3 == 0 {
                skipping.clock_mut().set(t);
                skipping.tick();
            }
        }

        for (a, b) in every_frame
            .registry()
            .all_bodies()
            .iter()
            .zip(skipping.registry().all_bodies())
        {
            assert_eq!(a.current_position, b.current_position);
        }
    }

    #[test]
    fn reset_restarts_frame_count_and_rotation() {
        let mut driver = driver();
        driver.clock_mut().set(1000.0);
        driver.tick();
        driver.tick();
        driver.reset();

        assert_eq!(driver.frame(), 0);
        assert_eq!(driver.last_timestamp(), None);
        assert!(driver
            .registry()
            .all_bodies()
            .iter()
            .all(|body| body.current_rotation == 0.0));
        assert_eq!(driver.tick().frame, 1);
    }
}
