//! Global uniform bindings for camera and lighting
//!
//! Everything in the orrery is lit by one point light sitting in the sun, plus
//! a dim ambient term so the night sides of the planets stay readable.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Per-frame global data.
///
/// MUST match the `Globals` struct in `orrery.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// xyz = position, w = range
    light_position: [f32; 4],
    /// rgb = color, w = intensity
    light_color: [f32; 4],
    /// rgb = ambient color, w unused
    ambient: [f32; 4],
}

/// Point light plus ambient fill.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero.
    pub range: f32,
    pub ambient: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        // 0x404040 at 0.4 intensity
        let ambient = 0x40 as f32 / 255.0 * 0.4;
        Self {
            position: [0.0, 0.0, 0.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.5,
            range: 50_000.0,
            ambient: [ambient; 3],
        }
    }
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, light: &LightConfig) -> Self {
        let [px, py, pz] = light.position;
        let [r, g, b] = light.color;
        let [ar, ag, ab] = light.ambient;
        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_position: [px, py, pz, light.range],
            light_color: [r, g, b, light.intensity],
            ambient: [ar, ag, ab, 0.0],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Uploads camera and light data for this frame.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: &LightConfig,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, light));
}

/// Bind group 0 of the body pipeline.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// `None` until [`GlobalBindings::create_bind_group`] has run.
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_block_is_packed_like_the_shader() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 128);
    }

    #[test]
    fn light_range_and_intensity_ride_in_w() {
        let light = LightConfig::default();
        let content = GlobalUBOContent::new(CameraUniform::default(), &light);
        assert_eq!(content.light_position[3], 50_000.0);
        assert_eq!(content.light_color[3], 1.5);
        assert!(content.ambient[0] > 0.09 && content.ambient[0] < 0.11);
    }
}
