use crate::simulation::SimState;

/// Run controls and the status strip.
pub fn draw_toolbar(ctx: &egui::Context, sim: &mut SimState, now: f64) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "GALTON");

            ui.separator();
            compact_group(ui, "Sim", |ui| {
                if ui.add_enabled(!sim.running, egui::Button::new("Start")).clicked() {
                    sim.start(now);
                }
                if ui.add_enabled(sim.running, egui::Button::new("Stop")).clicked() {
                    sim.stop();
                }
                if ui.add_enabled(!sim.running, egui::Button::new("Reset")).clicked() {
                    sim.reset();
                }
            });

            compact_group(ui, "Theme", |ui| {
                if ui.button(sim.theme.toggled().label()).clicked() {
                    super::toggle_theme(sim);
                }
            });

            ui.separator();
            metric_chip(ui, "Total Balls", format!("{}", sim.total_created));
            metric_chip(ui, "Active Balls", format!("{}", sim.balls.count()));
            metric_chip(ui, "Pooled", format!("{}", sim.balls.pooled()));
            metric_chip(ui, "Distribution", sim.engine.distribution().kind().label().to_string());
            metric_chip(ui, "Lanes", format!("{}", sim.engine.num_lanes()));

            if let Some(err) = &sim.last_error {
                status_chip(ui, err, egui::Color32::from_rgb(220, 53, 69));
            }
        });
        ui.add_space(3.0);
    });
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(13, 110, 253));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(heading).small().weak());
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(format!("{key}: {value}")).small());
    });
}

fn status_chip(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(label).small().strong().color(color));
    });
}
