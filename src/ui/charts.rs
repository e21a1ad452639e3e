use galton::config;
use galton::{DistributionKind, HistogramBin, LaneBar, Stats};

use crate::simulation::SimState;
use crate::theme::Palette;

const CHART_HEIGHT: f32 = 150.0;
const PLOT_MARGIN: f32 = 16.0;

/// Density curve, theoretical lane bars and the live histogram in the right side panel.
pub fn draw_charts(ctx: &egui::Context, sim: &mut SimState) {
    let palette = sim.theme.palette();
    egui::SidePanel::right("charts")
        .exact_width(config::CHARTS_PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let kind = sim.engine.distribution().kind();
                let theory = sim.engine.stats();

                ui.heading("Probability Density");
                stats_caption(ui, theory);
                draw_pdf_chart(ui, sim, kind, theory, &palette);

                ui.separator();
                ui.heading("Lane Probabilities");
                stats_caption(ui, theory);
                draw_bar_chart(ui, sim, kind, theory, &palette);

                ui.separator();
                ui.heading("Simulated Outcomes");
                if sim.histogram_bins.is_empty() {
                    ui.label("No samples yet");
                } else {
                    stats_caption(ui, sim.engine.empirical_stats());
                    draw_histogram(ui, &sim.histogram_bins, kind, theory, &palette);
                }
            });
        });
}

/// Mean plus ±1..3σ marker positions. Families bounded at zero only get the negative
/// markers that stay positive.
pub fn sigma_markers(stats: Stats, kind: DistributionKind) -> Vec<(f64, String)> {
    let mut markers = vec![(stats.mean, "μ".to_string())];
    for k in 1..=3 {
        markers.push((stats.sigma(k as f64), format!("+{k}σ")));
        let below = stats.sigma(-(k as f64));
        if !kind.is_positive_only() || below > 0.0 {
            markers.push((below, format!("-{k}σ")));
        }
    }
    markers
}

/// Linear map from data space into a plot rectangle.
#[derive(Clone, Copy, Debug)]
struct PlotFrame {
    rect: egui::Rect,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl PlotFrame {
    fn new(rect: egui::Rect, x_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            rect: rect.shrink(PLOT_MARGIN),
            x_min,
            x_max: if x_max > x_min { x_max } else { x_min + 1.0 },
            y_max: if y_max > 0.0 { y_max } else { 1.0 },
        }
    }

    fn x(&self, v: f64) -> f32 {
        let t = ((v - self.x_min) / (self.x_max - self.x_min)) as f32;
        self.rect.left() + t * self.rect.width()
    }

    fn y(&self, v: f64) -> f32 {
        let t = (v / self.y_max) as f32;
        self.rect.bottom() - t.clamp(0.0, 1.0) * self.rect.height()
    }

    fn point(&self, x: f64, y: f64) -> egui::Pos2 {
        egui::pos2(self.x(x), self.y(y))
    }
}

fn stats_caption(ui: &mut egui::Ui, stats: Stats) {
    ui.label(
        egui::RichText::new(format!("μ = {:.2}, σ = {:.2}", stats.mean, stats.std_dev)).small(),
    );
}

fn allocate_chart(ui: &mut egui::Ui, palette: &Palette) -> (egui::Rect, egui::Painter) {
    let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    painter.rect_filled(response.rect, 2.0, palette.chart_bg);
    (response.rect, painter)
}

fn draw_pdf_chart(
    ui: &mut egui::Ui,
    sim: &mut SimState,
    kind: DistributionKind,
    theory: Stats,
    palette: &Palette,
) {
    let num_points = if kind == DistributionKind::Uniform {
        config::UNIFORM_CURVE_POINTS
    } else {
        config::PDF_CURVE_POINTS
    };
    let curve = match sim.engine.curve(num_points) {
        Ok(curve) => curve,
        Err(e) => {
            tracing::warn!(error = %e, "density chart skipped");
            ui.label("Density unavailable");
            return;
        }
    };
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return;
    };
    let y_max = curve.iter().map(|p| p.y).fold(0.0f64, f64::max) * 1.1;

    let (rect, painter) = allocate_chart(ui, palette);
    let frame = PlotFrame::new(rect, first.x, last.x, y_max);
    draw_axes(&painter, &frame, palette);
    draw_markers(&painter, &frame, theory, kind, palette);

    let points: Vec<egui::Pos2> = curve.iter().map(|p| frame.point(p.x, p.y)).collect();
    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(2.0, palette.curve));
    }
}

fn draw_bar_chart(
    ui: &mut egui::Ui,
    sim: &mut SimState,
    kind: DistributionKind,
    theory: Stats,
    palette: &Palette,
) {
    let bars: Vec<LaneBar> = match sim.engine.theoretical_bars() {
        Ok(bars) => bars,
        Err(e) => {
            tracing::warn!(error = %e, "lane chart skipped");
            ui.label("Lane probabilities unavailable");
            return;
        }
    };
    let range = sim.engine.range();
    if bars.is_empty() || !range.is_renderable() {
        ui.label("Lane probabilities unavailable");
        return;
    }
    let y_max = bars.iter().map(|b| b.weight).fold(0.0f64, f64::max) * 1.1;

    let (rect, painter) = allocate_chart(ui, palette);
    let frame = PlotFrame::new(rect, range.display_min, range.display_max, y_max);
    draw_axes(&painter, &frame, palette);

    let slot = frame.rect.width() / bars.len() as f32;
    let half = (slot * 0.4).max(0.5);
    for bar in &bars {
        let cx = frame.x(bar.value);
        let top = frame.y(bar.weight);
        let r = egui::Rect::from_min_max(
            egui::pos2(cx - half, top),
            egui::pos2(cx + half, frame.rect.bottom()),
        );
        painter.rect_filled(r, 0.0, palette.bars);
    }
    draw_markers(&painter, &frame, theory, kind, palette);
}

fn draw_histogram(
    ui: &mut egui::Ui,
    bins: &[HistogramBin],
    kind: DistributionKind,
    theory: Stats,
    palette: &Palette,
) {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return;
    };
    let y_max = bins.iter().map(|b| b.frequency).fold(0.0f64, f64::max) * 1.1;

    let (rect, painter) = allocate_chart(ui, palette);
    let frame = PlotFrame::new(rect, first.bin_start, last.bin_end, y_max);
    draw_axes(&painter, &frame, palette);

    for bin in bins.iter().filter(|b| b.count > 0) {
        let r = egui::Rect::from_min_max(
            egui::pos2(frame.x(bin.bin_start) + 0.5, frame.y(bin.frequency)),
            egui::pos2(frame.x(bin.bin_end) - 0.5, frame.rect.bottom()),
        );
        painter.rect_filled(r, 0.0, palette.histogram);
    }
    draw_markers(&painter, &frame, theory, kind, palette);
}

fn draw_axes(painter: &egui::Painter, frame: &PlotFrame, palette: &Palette) {
    let stroke = egui::Stroke::new(1.0, palette.axis);
    let r = frame.rect;
    painter.line_segment([r.left_bottom(), r.right_bottom()], stroke);
    painter.line_segment([r.left_bottom(), r.left_top()], stroke);

    let font = egui::FontId::proportional(9.0);
    painter.text(
        egui::pos2(r.left(), r.bottom() + 2.0),
        egui::Align2::LEFT_TOP,
        format!("{:.2}", frame.x_min),
        font.clone(),
        palette.text,
    );
    painter.text(
        egui::pos2(r.right(), r.bottom() + 2.0),
        egui::Align2::RIGHT_TOP,
        format!("{:.2}", frame.x_max),
        font.clone(),
        palette.text,
    );
    painter.text(
        egui::pos2(r.left() + 2.0, r.top()),
        egui::Align2::LEFT_TOP,
        format!("{:.3}", frame.y_max),
        font,
        palette.text,
    );
}

fn draw_markers(
    painter: &egui::Painter,
    frame: &PlotFrame,
    stats: Stats,
    kind: DistributionKind,
    palette: &Palette,
) {
    let r = frame.rect;
    for (i, (value, label)) in sigma_markers(stats, kind).into_iter().enumerate() {
        if value < frame.x_min || value > frame.x_max {
            continue;
        }
        let x = frame.x(value);
        let (color, width) = if i == 0 {
            (palette.mean_marker, 1.5)
        } else {
            (palette.sigma_marker, 1.0)
        };
        painter.extend(egui::Shape::dashed_line(
            &[egui::pos2(x, r.top()), egui::pos2(x, r.bottom())],
            egui::Stroke::new(width, color),
            4.0,
            3.0,
        ));
        painter.text(
            egui::pos2(x, r.top() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            label,
            egui::FontId::proportional(9.0),
            palette.text,
        );
    }
}
