use cgmath::Vector3;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{
    error::EngineError,
    gfx::{
        camera::{
            camera_controller::CameraController,
            camera_utils::CameraManager,
            orbit_camera::{OrbitCamera, OrbitPose},
        },
        geometry::generate_starfield,
        rendering::RenderEngine,
        resources::Material,
        scene::{Mesh, Object, Scene},
    },
    performance::PerformanceMonitor,
    simulation::{manager::SimulationManager, traits::Simulation},
    ui::{caption_panel, UiManager},
};

/// Where the camera starts, looking at the sun.
pub const INITIAL_EYE: [f32; 3] = [100.0, 400.0, 7000.0];

const STARFIELD_COUNT: u32 = 6000;
const STARFIELD_RADIUS: f32 = 300_000.0;
const STARFIELD_STAR_SIZE: f32 = 500.0;
const STARFIELD_SEED: u64 = 0x5eed_0f_57a25;

pub struct OrreryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    simulation_manager: SimulationManager,
    performance: PerformanceMonitor,
    caption: String,
    startup_error: Option<EngineError>,
}

impl OrreryApp {
    /// Creates the event loop, camera and backdrop. The window and GPU come up
    /// once the event loop resumes.
    pub fn new() -> Result<Self, EngineError> {
        let event_loop = EventLoop::new()?;

        let pose = OrbitPose::looking_from(Vector3::from(INITIAL_EYE), Vector3::new(0.0, 0.0, 0.0));
        let camera = OrbitCamera::from_pose(pose, 1.0);
        let camera_manager = CameraManager::new(camera, CameraController::default());

        let mut scene = Scene::new(camera_manager);
        scene.add_object(starfield());

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                simulation_manager: SimulationManager::new(),
                performance: PerformanceMonitor::new(),
                caption: String::new(),
                startup_error: None,
            },
        })
    }

    pub fn attach_simulation<S>(&mut self, simulation: S)
    where
        S: Simulation + 'static,
    {
        self.app_state
            .simulation_manager
            .attach_simulation(Box::new(simulation), &mut self.app_state.scene);
    }

    /// Text shown in the bottom-left corner.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.app_state.caption = caption.into();
    }

    pub fn scene(&self) -> &Scene {
        &self.app_state.scene
    }

    /// Runs until the window closes. Setup failures inside the loop are
    /// returned once it has stopped.
    pub fn run(mut self) -> Result<(), EngineError> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn starfield() -> Object {
    let geometry = generate_starfield(
        STARFIELD_COUNT,
        STARFIELD_RADIUS,
        STARFIELD_STAR_SIZE,
        STARFIELD_SEED,
    );
    Object::new("starfield", vec![Mesh::from_geometry(&geometry)])
        .with_material(Material::new([0.85, 0.85, 0.9]).with_emissive(true))
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title("Orrery")
                    .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
            )?,
        );
        let (width, height) = window.inner_size().into();

        let renderer = pollster::block_on(RenderEngine::new(window.clone(), width, height))?;

        self.scene
            .init_gpu_resources(renderer.device(), renderer.object_bindings());
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);

        self.ui_manager = Some(UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        ));
        self.render_engine = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state == ElementState::Pressed && !event.repeat {
            match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                PhysicalKey::Code(KeyCode::Space) => self.simulation_manager.toggle_paused(),
                _ => (),
            }
        }
        self.scene.camera_manager.handle_key(event);
    }

    fn redraw(&mut self) {
        let (Some(render_engine), Some(ui_manager), Some(window)) = (
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        self.performance.begin_frame();

        self.simulation_manager.update(&mut self.scene);

        let scene = &mut self.scene;
        let simulation_manager = &mut self.simulation_manager;
        let performance = &mut self.performance;
        let caption = self.caption.as_str();
        ui_manager.update_logic(window, |ui| {
            performance.render_overlay(ui);
            caption_panel(ui, caption);
            simulation_manager.render_ui(ui, scene);
        });

        self.scene.update();
        self.scene
            .init_gpu_resources(render_engine.device(), render_engine.object_bindings());
        render_engine.update(self.scene.camera_manager.camera.uniform);
        self.scene.update_all_transforms(render_engine.queue());

        let stats = render_engine.render_frame_with_ui(
            &self.scene,
            |device, queue, encoder, color_attachment| {
                ui_manager.render_display_only(device, queue, encoder, color_attachment);
            },
        );

        self.performance
            .update_render_stats(stats.draw_calls, stats.vertices, stats.triangles);
        self.performance.end_frame();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("{err}");
            self.startup_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        // Don't process camera events while the UI has focus
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_input())
        {
            return;
        }

        self.scene.camera_manager.handle_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.simulation_manager.set_paused(true);
        self.simulation_manager.detach_simulation(&mut self.scene);
        log::info!("event loop exiting");
    }
}
