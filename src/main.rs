use macroquad::prelude::*;

mod particles;
mod prefs;
mod renderer;
mod simulation;
mod theme;
mod ui;

use galton::config;
use simulation::SimState;
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "Galton — Distribution Lanes".to_string(),
        window_width: 1400,
        window_height: 820,
        window_resizable: true,
        high_dpi: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let prefs = prefs::load_or_default(config::PREFS_FILE);
    let mut sim = match SimState::new(config::DEFAULT_SEED, prefs.theme()) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            return;
        }
    };
    let mut ui_state = UiState::default();

    loop {
        let dt = get_frame_time().min(config::MAX_FRAME_DT);
        let now = get_time();

        let mut egui_wants_keyboard = false;
        egui_macroquad::cfg(|ctx| {
            egui_wants_keyboard = ctx.wants_keyboard_input();
        });
        if !egui_wants_keyboard {
            if is_key_pressed(KeyCode::Space) {
                sim.toggle_running(now);
            }
            if is_key_pressed(KeyCode::R) && !sim.running {
                sim.reset();
            }
            if is_key_pressed(KeyCode::T) {
                ui::toggle_theme(&mut sim);
            }
        }

        sim.update(dt, now);
        renderer::draw(&sim);
        ui::draw_ui(&mut sim, &mut ui_state, now);

        // canvas geometry from this frame's panels applies to the next frame
        if let Some(rect) = ui_state.canvas_rect {
            let origin = vec2(rect.left(), rect.top());
            if origin != sim.layout.origin
                || rect.width() != sim.layout.width
                || rect.height() != sim.layout.height
            {
                sim.set_canvas(origin, rect.width(), rect.height());
            }
        }

        next_frame().await;
    }
}
