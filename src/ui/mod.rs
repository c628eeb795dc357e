//! # User Interface Module
//!
//! Dear ImGui overlay for the orrery.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, input capture
//! - [`panel`] - fixed panels such as the scale caption
//!
//! When the UI has focus, camera input is ignored so dragging a window does not
//! also spin the view.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::caption_panel;
