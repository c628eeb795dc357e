//! Simulation lifecycle trait
//!
//! Defines the interface a simulation implements to plug into the app's
//! frame loop, scene and UI.

use crate::gfx::scene::Scene;
use imgui::Ui;

/// Core trait for simulations driven by the app
pub trait Simulation {
    /// Called once when the simulation is attached. Create scene objects here.
    fn initialize(&mut self, scene: &mut Scene);

    /// Advance the simulation by one frame and write results into the scene.
    ///
    /// No delta time is passed: simulations read their own clock so that state
    /// can be a pure function of time.
    fn update(&mut self, scene: &mut Scene);

    /// Render custom UI controls
    fn render_ui(&mut self, ui: &Ui);

    /// Get simulation name for UI display
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self, scene: &mut Scene);

    /// Optional: Custom cleanup when simulation is removed
    fn cleanup(&mut self, _scene: &mut Scene) {}
}
