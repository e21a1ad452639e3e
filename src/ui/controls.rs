use std::ops::RangeInclusive;

use galton::config;
use galton::{DistributionConfig, DistributionKind, SimulationConfig};

use crate::simulation::SimState;

/// Distribution, lane and ball controls in the left side panel.
pub fn draw_controls(ctx: &egui::Context, sim: &mut SimState) {
    egui::SidePanel::left("controls")
        .exact_width(config::CONTROLS_PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Distribution");
                let mut next = sim.engine.config().clone();
                // locked while balls are falling so the histogram stays coherent
                ui.add_enabled_ui(!sim.running, |ui| {
                    distribution_select(ui, &mut next);
                    param_sliders(ui, &mut next);
                    lane_slider(ui, &mut next);
                });
                if &next != sim.engine.config() {
                    sim.apply_config(next);
                }

                ui.separator();
                ui.heading("Balls");
                ball_sliders(ui, sim);

                ui.separator();
                ui.heading("Statistics");
                stats_grid(ui, sim);
            });
        });
}

fn distribution_select(ui: &mut egui::Ui, next: &mut SimulationConfig) {
    let mut selected = next.active;
    egui::ComboBox::from_label("Type")
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            for kind in DistributionKind::ALL {
                ui.selectable_value(&mut selected, kind, kind.label());
            }
        });
    if selected != next.active {
        next.switch_distribution(selected);
    }
}

fn param_sliders(ui: &mut egui::Ui, next: &mut SimulationConfig) {
    let mut dist = next.active_config();
    match &mut dist {
        DistributionConfig::Uniform(p) => {
            let (min_range, max_range) = uniform_slider_bounds(p.min, p.max);
            slider(ui, &mut p.min, min_range, 1.0, "Min");
            slider(ui, &mut p.max, max_range, 1.0, "Max");
        }
        DistributionConfig::Normal(p) => {
            slider(ui, &mut p.mean, -10.0..=10.0, 0.1, "Mean");
            slider(ui, &mut p.std_dev, 0.1..=5.0, 0.1, "Std Dev");
        }
        DistributionConfig::Exponential(p) => {
            slider(ui, &mut p.rate, 0.1..=5.0, 0.1, "Rate (λ)");
        }
        DistributionConfig::Poisson(p) => {
            slider(ui, &mut p.lambda, 0.5..=50.0, 0.5, "Lambda (λ)");
        }
        DistributionConfig::Gamma(p) => {
            slider(ui, &mut p.alpha, 0.1..=20.0, 0.1, "Shape (α)");
            slider(ui, &mut p.beta, 0.1..=10.0, 0.1, "Scale (β)");
        }
        DistributionConfig::Binomial(p) => {
            ui.add(egui::Slider::new(&mut p.n, 1..=100).text("Trials (n)"));
            slider(ui, &mut p.p, 0.0..=1.0, 0.01, "Probability (p)");
        }
        DistributionConfig::StudentT(p) => {
            slider(ui, &mut p.dof, 0.5..=30.0, 0.5, "Degrees of freedom");
        }
    }
    next.set_params(dist);
}

fn lane_slider(ui: &mut egui::Ui, next: &mut SimulationConfig) {
    let uniform = next.active == DistributionKind::Uniform;
    let mut lanes = next.num_lanes;
    ui.add_enabled_ui(!uniform, |ui| {
        ui.add(
            egui::Slider::new(&mut lanes, config::MIN_NUM_LANES..=config::MAX_NUM_LANES)
                .text("Lanes"),
        )
        .on_disabled_hover_text("Uniform lanes follow the Min/Max range");
    });
    if lanes != next.num_lanes {
        if next.active.is_centered() && lanes % 2 == 0 {
            lanes = (lanes + 1).min(config::MAX_NUM_LANES);
        }
        next.num_lanes = lanes;
    }
}

fn ball_sliders(ui: &mut egui::Ui, sim: &mut SimState) {
    let s = &mut sim.settings;
    ui.add(egui::Slider::new(&mut s.speed, 5.0..=200.0).text("Speed (px/s)"));
    ui.add(egui::Slider::new(&mut s.gen_rate, 1.0..=100.0).text("Rate (balls/s)"));
    ui.add(egui::Slider::new(&mut s.lifetime, 1.0..=60.0).text("Lifetime (s)"));
    let max_size = sim.layout.max_ball_size();
    ui.add(
        egui::Slider::new(&mut sim.settings.size, config::MIN_BALL_SIZE..=max_size)
            .step_by(1.0)
            .text("Size (px)"),
    );
}

fn stats_grid(ui: &mut egui::Ui, sim: &mut SimState) {
    let theory = sim.engine.stats();
    let observed = sim.engine.empirical_stats();
    egui::Grid::new("stats_grid").num_columns(3).show(ui, |ui| {
        ui.label("");
        ui.label("μ");
        ui.label("σ");
        ui.end_row();

        ui.label("Theoretical");
        ui.label(format!("{:.3}", theory.mean));
        ui.label(format!("{:.3}", theory.std_dev));
        ui.end_row();

        ui.label("Observed");
        ui.label(format!("{:.3}", observed.mean));
        ui.label(format!("{:.3}", observed.std_dev));
        ui.end_row();
    });
    ui.label(format!("Samples: {}", sim.engine.histogram().total()));
}

fn slider(ui: &mut egui::Ui, value: &mut f64, range: RangeInclusive<f64>, step: f64, label: &str) {
    ui.add(egui::Slider::new(value, range).step_by(step).text(label));
}

/// Min stays at least one step below Max and Max one step above Min.
fn uniform_slider_bounds(min: f64, max: f64) -> (RangeInclusive<f64>, RangeInclusive<f64>) {
    let (lo, hi) = config::UNIFORM_SLIDER_LIMITS;
    let min_top = (max - 1.0).clamp(lo, hi - 1.0);
    let max_bottom = (min + 1.0).clamp(lo + 1.0, hi);
    (lo..=min_top, max_bottom..=hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sliders_cannot_cross() {
        let (min_range, max_range) = uniform_slider_bounds(1.0, 9.0);
        assert_eq!(min_range, -50.0..=8.0);
        assert_eq!(max_range, 2.0..=50.0);
        // dragging Min past Max stops one step short
        let min = 20.0_f64.clamp(*min_range.start(), *min_range.end());
        assert!(min < 9.0);
    }

    #[test]
    fn uniform_slider_bounds_stay_inside_limits() {
        let (min_range, max_range) = uniform_slider_bounds(50.0, 50.0);
        assert_eq!(min_range, -50.0..=49.0);
        assert_eq!(max_range, 50.0..=50.0);
        let (min_range, max_range) = uniform_slider_bounds(-50.0, -50.0);
        assert_eq!(min_range, -50.0..=-50.0);
        assert_eq!(max_range, -49.0..=50.0);
    }
}
