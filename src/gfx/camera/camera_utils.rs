use cgmath::{Matrix4, SquareMatrix};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

/// The scene camera together with the controls that steer it.
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        self.controller.handle_device_event(event, &mut self.camera);
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        self.controller.handle_key(event, &mut self.camera);
    }

    /// Refreshes the camera uniform. Runs once per frame, after the bodies
    /// have been moved.
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Camera block of the global uniform buffer.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// Eye position, w = 1 to keep the 16 byte alignment.
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn update_writes_the_eye_into_the_uniform() {
        let camera = OrbitCamera::new(7000.0, 0.0, 0.0, Vector3::zero(), 1.5);
        let mut manager = CameraManager::new(camera, CameraController::default());
        manager.update();

        let eye = manager.camera.eye;
        assert_eq!(manager.camera.uniform.view_position, [eye.x, eye.y, eye.z, 1.0]);
        assert_eq!(
            manager.camera.uniform.view_proj,
            convert_matrix4_to_array(manager.camera.build_view_projection_matrix())
        );
    }
}
