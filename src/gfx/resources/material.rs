//! Flat-color materials and per-object uniforms
//!
//! Bodies are drawn with a single color each. Emissive materials skip lighting
//! entirely, which is how the sun and the ring bands are drawn.

use crate::wgpu_utils::{
    binding_builder::{BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    pub emissive: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: false,
        }
    }
}

impl Material {
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            base_color: [color[0], color[1], color[2], 1.0],
            emissive: false,
        }
    }

    /// Builder pattern: draw unlit at full base color
    pub fn with_emissive(mut self, emissive: bool) -> Self {
        self.emissive = emissive;
        self
    }
}

/// Per-object uniform block.
///
/// MUST match the `BodyData` struct in `orrery.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = 1.0 when emissive
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: cgmath::Matrix4<f32>, material: &Material) -> Self {
        Self {
            model: model.into(),
            color: material.base_color,
            params: [if material.emissive { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// Layout for bind group 1, shared by every object.
pub struct ObjectBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl ObjectBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Object Bind Group");
        Self { bind_group_layout }
    }

    pub fn layout(&self) -> &BindGroupLayoutWithDesc {
        &self.bind_group_layout
    }
}
