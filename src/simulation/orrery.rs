//! Orrery simulation
//!
//! Bridges the [`FrameDriver`] and the scene: one scene object per registered
//! body, and after every tick each body's `(rotation, position)` pair becomes
//! that object's transform.

use std::f64::consts::TAU;

use cgmath::Rad;
use imgui::Ui;

use super::body::CelestialBody;
use super::clock::{ClockSource, SystemClock};
use super::frame_driver::{FrameDriver, FrameReport, RotationMode};
use super::traits::Simulation;
use crate::gfx::{
    geometry::{generate_ring, generate_sphere},
    resources::Material,
    scene::{Mesh, Object, Scene},
};

const SPHERE_LONGITUDE_SEGMENTS: u32 = 48;
const SPHERE_LATITUDE_SEGMENTS: u32 = 24;
const RING_SEGMENTS: u32 = 256;

pub struct OrrerySimulation<C: ClockSource = SystemClock> {
    driver: FrameDriver<C>,
    /// Scene object index for each body, in registry order.
    object_indices: Vec<usize>,
    running: bool,
    last_report: Option<FrameReport>,
}

impl<C: ClockSource> OrrerySimulation<C> {
    pub fn new(driver: FrameDriver<C>) -> Self {
        Self {
            driver,
            object_indices: Vec::new(),
            running: true,
            last_report: None,
        }
    }

    pub fn driver(&self) -> &FrameDriver<C> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver<C> {
        &mut self.driver
    }

    pub fn caption(&self) -> &str {
        self.driver.registry().caption()
    }

    pub fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }

    /// Writes every body's committed state into its scene object.
    pub fn sync_to_scene(&self, scene: &mut Scene) {
        let bodies = self.driver.registry().all_bodies();
        for (body, &index) in bodies.iter().zip(&self.object_indices) {
            if let Some(object) = scene.get_object_mut(index) {
                let (tilt, scale) = placement(body);
                object.set_transform_trs(
                    body.current_position.to_scene(),
                    Rad(body.current_rotation.rem_euclid(TAU) as f32),
                    Rad(tilt),
                    scale,
                );
            }
        }
    }
}

/// Tilt about X and uniform scale for a body's mesh.
fn placement(body: &CelestialBody) -> (f32, f32) {
    match body.appearance.ring {
        // Ring geometry is generated at its final radii.
        Some(ring) => (ring.tilt, 1.0),
        None => (0.0, body.appearance.size),
    }
}

fn body_object(body: &CelestialBody) -> Object {
    let geometry = match body.appearance.ring {
        Some(ring) => generate_ring(ring.inner_radius, ring.outer_radius, RING_SEGMENTS),
        None => generate_sphere(SPHERE_LONGITUDE_SEGMENTS, SPHERE_LATITUDE_SEGMENTS),
    };
    let material = Material::new(body.appearance.color).with_emissive(body.appearance.emissive);
    Object::new(body.id.as_str(), vec![Mesh::from_geometry(&geometry)]).with_material(material)
}

impl<C: ClockSource + 'static> Simulation for OrrerySimulation<C> {
    fn initialize(&mut self, scene: &mut Scene) {
        self.object_indices = self
            .driver
            .registry()
            .all_bodies()
            .iter()
            .map(|body| scene.add_object(body_object(body)))
            .collect();
        log::info!("created {} body objects", self.object_indices.len());
        self.sync_to_scene(scene);
    }

    fn update(&mut self, scene: &mut Scene) {
        if !self.running {
            return;
        }
        let report = self.driver.tick();
        log::trace!(
            "frame {} at t={} ({} bodies)",
            report.frame,
            report.timestamp,
            report.bodies_updated
        );
        self.last_report = Some(report);
        self.sync_to_scene(scene);
    }

    fn render_ui(&mut self, ui: &Ui) {
        let display_size = ui.io().display_size;
        let panel_width = 300.0;

        ui.window("Orrery")
            .size([panel_width, 330.0], imgui::Condition::FirstUseEver)
            .position(
                [display_size[0] - panel_width - 20.0, 130.0],
                imgui::Condition::FirstUseEver,
            )
            .build(|| {
                match self.last_report {
                    Some(report) => {
                        ui.text(format!("Frame: {}", report.frame));
                        ui.text(format!("Clock: {:.0} ms", report.timestamp));
                    }
                    None => ui.text("Waiting for first frame"),
                }

                let mut elapsed = matches!(
                    self.driver.rotation_mode(),
                    RotationMode::Elapsed { .. }
                );
                if ui.checkbox("Frame-rate independent spin", &mut elapsed) {
                    self.driver.set_rotation_mode(if elapsed {
                        RotationMode::elapsed()
                    } else {
                        RotationMode::PerTick
                    });
                }

                ui.separator();
                ui.columns(4, "bodies", true);
                for header in ["Body", "x", "z", "Spin"] {
                    ui.text(header);
                    ui.next_column();
                }
                ui.separator();
                for body in self.driver.registry().all_bodies() {
                    ui.text(body.id.as_str());
                    ui.next_column();
                    ui.text(format!("{:.0}", body.current_position.x));
                    ui.next_column();
                    ui.text(format!("{:.0}", body.current_position.z));
                    ui.next_column();
                    ui.text(format!("{:.2}", body.current_rotation.rem_euclid(TAU)));
                    ui.next_column();
                }
                ui.columns(1, "bodies", false);
            });
    }

    fn name(&self) -> &str {
        "Solar System"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        self.driver.reset();
        self.last_report = None;
        self.sync_to_scene(scene);
    }

    fn cleanup(&mut self, scene: &mut Scene) {
        for &index in &self.object_indices {
            if let Some(object) = scene.get_object_mut(index) {
                object.visible = false;
            }
        }
        self.object_indices.clear();
    }
}
