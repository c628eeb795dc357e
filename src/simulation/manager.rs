//! Simulation manager
//!
//! Owns the attached simulation and decides whether it is ticked this frame.
//! Pausing stops scheduling ticks; a tick already in progress always finishes.

use super::traits::Simulation;
use crate::gfx::scene::Scene;
use imgui::Ui;

pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationManager {
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
        }
    }

    /// Attach a simulation, cleaning up any previous one first.
    pub fn attach_simulation(&mut self, mut simulation: Box<dyn Simulation>, scene: &mut Scene) {
        if let Some(mut old_sim) = self.simulation.take() {
            log::info!("detaching simulation '{}'", old_sim.name());
            old_sim.cleanup(scene);
        }

        simulation.initialize(scene);
        log::info!("attached simulation '{}'", simulation.name());
        self.simulation = Some(simulation);
        self.is_paused = false;
    }

    /// Removes the simulation and lets it clean up its scene objects.
    pub fn detach_simulation(&mut self, scene: &mut Scene) {
        if let Some(mut sim) = self.simulation.take() {
            log::info!("detaching simulation '{}'", sim.name());
            sim.cleanup(scene);
        }
    }

    /// Ticks the simulation unless paused (called every frame).
    pub fn update(&mut self, scene: &mut Scene) {
        if self.is_paused {
            return;
        }

        if let Some(simulation) = &mut self.simulation {
            simulation.update(scene);
        }
    }

    pub fn reset(&mut self, scene: &mut Scene) {
        if let Some(simulation) = &mut self.simulation {
            simulation.reset(scene);
        }
    }

    pub fn render_ui(&mut self, ui: &Ui, scene: &mut Scene) {
        let display_size = ui.io().display_size;
        let panel_width = 300.0;
        let panel_x = display_size[0] - panel_width - 20.0; // Position on right side

        let Some(simulation) = &mut self.simulation else {
            ui.window("Simulation Control")
                .size([panel_width, 80.0], imgui::Condition::FirstUseEver)
                .position([panel_x, 20.0], imgui::Condition::FirstUseEver)
                .build(|| {
                    ui.text("No simulation loaded");
                });
            return;
        };

        let mut toggle_pause = false;
        let mut reset = false;
        ui.window("Simulation Control")
            .size([panel_width, 90.0], imgui::Condition::FirstUseEver)
            .position([panel_x, 20.0], imgui::Condition::FirstUseEver)
            .build(|| {
                ui.text(format!("Simulation: {}", simulation.name()));
                ui.separator();

                toggle_pause = ui.button(if self.is_paused { "Play" } else { "Pause" });
                ui.same_line();
                reset = ui.button("Reset");
            });

        if toggle_pause {
            self.is_paused = !self.is_paused;
            simulation.set_running(!self.is_paused);
        }
        if reset {
            simulation.reset(scene);
        }

        simulation.render_ui(ui);
    }

    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// `true` if a simulation exists and is not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.is_paused);
        log::info!(
            "simulation {}",
            if self.is_paused { "paused" } else { "resumed" }
        );
    }

    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}
