use macroquad::prelude::*;

use crate::simulation::{LaneLayout, SimState};
use crate::theme::Palette;

/// Draw the lane canvas: background, lane separators, then balls.
pub fn draw(sim: &SimState) {
    let palette = sim.theme.palette();
    clear_background(palette.canvas);

    let layout = &sim.layout;
    draw_rectangle(
        layout.origin.x,
        layout.origin.y,
        layout.width,
        layout.height,
        palette.canvas,
    );
    draw_lane_lines(layout, &palette);
    for ball in sim.balls.iter() {
        draw_circle(ball.pos.x, ball.pos.y, sim.settings.size, ball.color);
    }
}

fn draw_lane_lines(layout: &LaneLayout, palette: &Palette) {
    if layout.num_lanes <= 1 {
        return;
    }
    let w = layout.lane_width();
    let top = layout.origin.y;
    let bottom = layout.origin.y + layout.height;
    for i in 1..layout.num_lanes {
        let x = layout.origin.x + i as f32 * w;
        draw_line(x, top, x, bottom, 1.0, palette.lane_line);
    }
}
