//! Fixed UI panels

/// Caption text color (#fd9842).
pub const CAPTION_COLOR: [f32; 4] = [0.992, 0.596, 0.259, 1.0];

/// Draws the scale-conventions caption pinned to the bottom-left corner.
pub fn caption_panel(ui: &imgui::Ui, caption: &str) {
    if caption.is_empty() {
        return;
    }
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Caption")
        .position([10.0, display_size[1] - 10.0], imgui::Condition::Always)
        .position_pivot([0.0, 1.0])
        .always_auto_resize(true)
        .no_decoration()
        .no_inputs()
        .save_settings(false)
        .bg_alpha(0.0)
        .build(|| {
            let _wrap = ui.push_text_wrap_pos_with_pos(display_size[0] * 0.6);
            ui.text_colored(CAPTION_COLOR, caption);
        });
}
