//! WGPU-based rendering engine for the orrery
//!
//! One forward pass draws every body with a single pipeline, then hands the
//! encoder to the UI callback for the overlay.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::{
    error::EngineError,
    gfx::{
        camera::camera_utils::CameraUniform,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig},
            material::ObjectBindings,
            texture_resource::TextureResource,
        },
        scene::{object::DrawObject, scene::Scene, vertex::Vertex3D},
    },
};

/// Draw counts for the most recent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    pub draw_calls: u32,
    pub vertices: u32,
    pub triangles: u32,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline: wgpu::RenderPipeline,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_bindings: ObjectBindings,
    light_config: LightConfig,
}

impl RenderEngine {
    /// Creates the surface, device and body pipeline for `window`.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(EngineError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            // Frames are paced to the display refresh.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);
        let object_bindings = ObjectBindings::new(&device);

        let pipeline = create_body_pipeline(
            &device,
            format,
            &[
                global_bindings.bind_group_layout(),
                &object_bindings.layout().layout,
            ],
        );

        Ok(Self {
            surface,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            depth_texture,
            format,
            pipeline,
            global_ubo,
            global_bindings,
            object_bindings,
            light_config: LightConfig::default(),
        })
    }

    /// Renders the scene followed by the UI overlay.
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped,
    /// which returns empty stats.
    pub fn render_frame_with_ui<F>(&mut self, scene: &Scene, ui_callback: F) -> RenderStats
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return RenderStats::default();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface texture timed out, skipping frame");
                return RenderStats::default();
            }
            Err(err) => {
                log::error!("failed to acquire surface texture: {err}");
                return RenderStats::default();
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut stats = RenderStats::default();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            if let Some(global_bind_group) = self.global_bindings.bind_group() {
                render_pass.set_bind_group(0, global_bind_group, &[]);
            }

            for object in scene.objects.iter().filter(|obj| obj.visible) {
                let Some(bind_group) = object.bind_group() else {
                    log::debug!("skipping '{}', no GPU resources yet", object.name);
                    continue;
                };
                render_pass.set_bind_group(1, bind_group, &[]);
                render_pass.draw_object(object);

                for mesh in &object.meshes {
                    stats.draw_calls += 1;
                    stats.vertices += mesh.vertex_count();
                    stats.triangles += mesh.index_count() / 3;
                }
            }
        }

        ui_callback(&self.device, &self.queue, &mut encoder, &surface_texture_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        stats
    }

    /// Updates camera and light uniform buffers
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            &self.light_config,
        );
    }

    /// Resizes the surface and recreates the depth buffer.
    ///
    /// Zero-sized requests (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn object_bindings(&self) -> &ObjectBindings {
        &self.object_bindings
    }
}

fn create_body_pipeline(
    device: &wgpu::Device,
    format: TextureFormat,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Orrery Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("orrery.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Body Pipeline Layout"),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Body Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            // Rings are single sheets seen from both sides.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: TextureResource::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
