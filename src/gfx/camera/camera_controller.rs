use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Pixels of trackpad scroll that count as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 40.0;

/// What a left-button drag currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    Orbit,
    Pan,
}

/// Mouse and keyboard controls for the orbit camera.
///
/// Drag orbits around the target, shift-drag pans, the wheel zooms by a fixed
/// fraction of the current distance and Shift+C returns to the home pose. Every
/// step is relative, so the controls behave the same next to a 50-unit planet
/// and from 200000 units out.
pub struct CameraController {
    /// Radians of yaw/pitch per pixel of drag.
    pub rotate_speed: f32,
    /// Fraction of the current distance per wheel notch.
    pub zoom_step: f32,
    /// Pan per pixel of drag, as a fraction of the camera's pan scale.
    pub pan_speed: f32,
    drag: DragMode,
    button_held: bool,
    shift_held: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.005, 0.1)
    }
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_step: f32) -> Self {
        Self {
            rotate_speed,
            zoom_step,
            pan_speed: 0.01,
            drag: DragMode::Idle,
            button_held: false,
            shift_held: false,
        }
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag
    }

    /// Applies raw mouse input to `camera`.
    pub fn handle_device_event(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.button_held = *state == ElementState::Pressed;
                self.refresh_drag();
            }
            DeviceEvent::MouseWheel { delta } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => *lines,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => {
                        *y as f32 / PIXELS_PER_NOTCH
                    }
                };
                self.zoom(notches, camera);
            }
            DeviceEvent::MouseMotion { delta: (dx, dy) } => {
                self.drag_by(*dx as f32, *dy as f32, camera);
            }
            _ => (),
        }
    }

    /// Tracks the shift modifier and handles Shift+C.
    pub fn handle_key(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event.physical_key {
            PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) => {
                self.shift_held = event.state == ElementState::Pressed;
                self.refresh_drag();
            }
            PhysicalKey::Code(KeyCode::KeyC)
                if event.state == ElementState::Pressed && self.shift_held =>
            {
                log::info!("resetting camera to home pose");
                camera.reset_to_default();
            }
            _ => (),
        }
    }

    /// Positive `notches` zoom in.
    pub fn zoom(&self, notches: f32, camera: &mut OrbitCamera) {
        camera.add_distance(-notches * self.zoom_step);
    }

    /// Moves the camera by a drag of `(dx, dy)` pixels in the current mode.
    pub fn drag_by(&self, dx: f32, dy: f32, camera: &mut OrbitCamera) {
        match self.drag {
            DragMode::Idle => (),
            DragMode::Orbit => {
                camera.add_yaw(-dx * self.rotate_speed);
                camera.add_pitch(dy * self.rotate_speed);
            }
            DragMode::Pan => camera.pan((-dx * self.pan_speed, dy * self.pan_speed)),
        }
    }

    fn refresh_drag(&mut self) {
        self.drag = match (self.button_held, self.shift_held) {
            (false, _) => DragMode::Idle,
            (true, false) => DragMode::Orbit,
            (true, true) => DragMode::Pan,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Vector3, Zero};

    fn camera(distance: f32) -> OrbitCamera {
        OrbitCamera::new(distance, 0.1, 0.0, Vector3::zero(), 1.0)
    }

    fn press(controller: &mut CameraController, camera: &mut OrbitCamera) {
        controller.handle_device_event(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            camera,
        );
    }

    #[test]
    fn wheel_zoom_is_relative_to_distance() {
        let controller = CameraController::default();
        let mut near = camera(100.0);
        let mut far = camera(100_000.0);

        controller.zoom(1.0, &mut near);
        controller.zoom(1.0, &mut far);
        assert_relative_eq!(near.distance, 90.0, epsilon = 1e-3);
        assert_relative_eq!(far.distance, 90_000.0, epsilon = 1.0);
    }

    #[test]
    fn pixel_scroll_counts_in_notches() {
        let mut controller = CameraController::default();
        let mut camera = camera(1000.0);
        controller.handle_device_event(
            &DeviceEvent::MouseWheel {
                delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)),
            },
            &mut camera,
        );
        assert_relative_eq!(camera.distance, 1100.0, epsilon = 1e-2);
    }

    #[test]
    fn motion_without_button_does_nothing() {
        let mut controller = CameraController::default();
        let mut camera = camera(1000.0);
        let yaw = camera.yaw;

        controller.handle_device_event(&DeviceEvent::MouseMotion { delta: (50.0, 0.0) }, &mut camera);
        assert_eq!(camera.yaw, yaw);
        assert_eq!(controller.drag_mode(), DragMode::Idle);

        press(&mut controller, &mut camera);
        assert_eq!(controller.drag_mode(), DragMode::Orbit);
        controller.handle_device_event(&DeviceEvent::MouseMotion { delta: (50.0, 0.0) }, &mut camera);
        assert_relative_eq!(camera.yaw, yaw - 50.0 * 0.005);
    }

    #[test]
    fn shift_drag_pans_the_target() {
        let mut controller = CameraController::default();
        let mut camera = camera(1000.0);
        controller.shift_held = true;
        press(&mut controller, &mut camera);
        assert_eq!(controller.drag_mode(), DragMode::Pan);

        controller.drag_by(20.0, 0.0, &mut camera);
        assert_ne!(camera.target, Vector3::zero());
        assert_relative_eq!(camera.distance, 1000.0);
    }
}
