//! ImGui UI manager
//!
//! Handles ImGui integration with wgpu and winit: frame preparation, input
//! capture and rendering the overlay on top of the scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

/// ImGui UI manager
///
/// Owns the ImGui context, the winit platform glue and the wgpu renderer for
/// the overlay. The frame is built in `update_logic()` and drawn later in
/// `render_display_only()`.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    /// Creates a new UI manager
    ///
    /// Sets up ImGui with locked DPI and the default font at 16 px. Settings
    /// are not persisted to an ini file.
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating renderer resources
    /// * `queue` - WGPU queue for font atlas upload
    /// * `output_color_format` - Surface format the overlay is drawn into
    /// * `window` - Window for platform integration
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        // Setup platform with locked DPI to handle scaling manually
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        let font_size = 16.0;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    /// Feeds a window event to ImGui and reports whether the UI captured it
    ///
    /// Only pointer, keyboard, modifier and focus events are forwarded. A
    /// captured event should not also reach the camera or the key bindings.
    ///
    /// # Arguments
    /// * `window` - Window the event was delivered to
    /// * `event` - Input event to process
    ///
    /// # Returns
    /// True if the UI wants the input, false otherwise
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        match event {
            Event::WindowEvent {
                event:
                    WindowEvent::CursorMoved { .. }
                    | WindowEvent::MouseInput { .. }
                    | WindowEvent::MouseWheel { .. }
                    | WindowEvent::KeyboardInput { .. }
                    | WindowEvent::ModifiersChanged(_)
                    | WindowEvent::Focused(_),
                ..
            } => {
                self.platform
                    .handle_event(self.context.io_mut(), window, event);
                self.wants_input()
            }
            _ => false,
        }
    }

    /// True while the pointer or keyboard focus belongs to an ImGui window.
    pub fn wants_input(&self) -> bool {
        let io = self.context.io();
        io.want_capture_mouse || io.want_capture_keyboard
    }

    /// Builds this frame's UI and returns whether it wants input capture
    ///
    /// Advances ImGui's clock, prepares the platform frame, runs `run_ui` and
    /// updates the mouse cursor if it changed. Call once per frame, before
    /// `render_display_only()`.
    ///
    /// # Arguments
    /// * `window` - Window reference for platform operations
    /// * `run_ui` - Callback that builds the panels for this frame
    ///
    /// # Returns
    /// True if the UI wants mouse or keyboard input
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F) -> bool
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(err) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("failed to prepare UI frame: {err}");
        }

        let ui = self.context.frame();
        run_ui(&*ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }

        self.wants_input()
    }

    /// Renders the UI built by the last `update_logic()` over the scene
    ///
    /// Opens its own render pass that loads the existing color attachment, so
    /// the 3D scene stays underneath. Renderer failures are logged and the
    /// overlay is skipped for that frame.
    ///
    /// # Arguments
    /// * `device` - WGPU device for buffer allocation
    /// * `queue` - WGPU queue for buffer uploads
    /// * `encoder` - Command encoder of the current frame
    /// * `color_attachment` - Surface texture view to draw into
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) {
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // Preserve 3D scene
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Err(err) = self
            .renderer
            .render(draw_data, queue, device, &mut render_pass)
        {
            log::error!("failed to render UI: {err:?}");
        }
    }
}
