pub mod charts;
pub mod controls;
pub mod toolbar;

use galton::config;

use crate::prefs::{self, Preferences};
use crate::simulation::SimState;

/// Layout feedback from the last UI pass.
#[derive(Default)]
pub struct UiState {
    /// Screen area left over for the lane canvas after the panels were placed.
    pub canvas_rect: Option<egui::Rect>,
}

/// Draw all egui UI panels.
pub fn draw_ui(sim: &mut SimState, ui_state: &mut UiState, now: f64) {
    egui_macroquad::ui(|ctx| {
        ctx.set_visuals(if sim.theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        toolbar::draw_toolbar(ctx, sim, now);
        controls::draw_controls(ctx, sim);
        charts::draw_charts(ctx, sim);

        ui_state.canvas_rect = Some(ctx.available_rect());
    });

    egui_macroquad::draw();
}

/// Flip light/dark mode and persist the choice.
pub fn toggle_theme(sim: &mut SimState) {
    sim.theme = sim.theme.toggled();
    let prefs = Preferences {
        dark_mode: sim.theme.is_dark(),
    };
    if let Err(e) = prefs::save_to_file(&prefs, config::PREFS_FILE) {
        tracing::warn!(error = %e, "could not save preferences");
    }
}
