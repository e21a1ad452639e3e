use macroquad::prelude::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light Mode",
            Self::Dark => "Dark Mode",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                canvas: rgb(0xf8, 0xf9, 0xfa),
                lane_line: rgb(0xde, 0xe2, 0xe6),
                chart_bg: egui::Color32::from_rgb(0xff, 0xff, 0xff),
                axis: egui::Color32::from_rgb(0x6c, 0x75, 0x7d),
                text: egui::Color32::from_rgb(0x21, 0x25, 0x29),
                curve: egui::Color32::from_rgb(0x0d, 0x6e, 0xfd),
                bars: egui::Color32::from_rgb(0x63, 0x9c, 0xd9),
                histogram: egui::Color32::from_rgb(0x19, 0x87, 0x54),
                mean_marker: egui::Color32::from_rgb(0xdc, 0x35, 0x45),
                sigma_marker: egui::Color32::from_rgb(0xfd, 0x7e, 0x14),
            },
            Self::Dark => Palette {
                canvas: rgb(0x1e, 0x1e, 0x1e),
                lane_line: rgb(0x44, 0x44, 0x44),
                chart_bg: egui::Color32::from_rgb(0x2a, 0x2a, 0x2a),
                axis: egui::Color32::from_rgb(0x99, 0x99, 0x99),
                text: egui::Color32::from_rgb(0xe0, 0xe0, 0xe0),
                curve: egui::Color32::from_rgb(0x6e, 0xa8, 0xfe),
                bars: egui::Color32::from_rgb(0x8f, 0xb8, 0xe8),
                histogram: egui::Color32::from_rgb(0x75, 0xb7, 0x98),
                mean_marker: egui::Color32::from_rgb(0xff, 0x6b, 0x6b),
                sigma_marker: egui::Color32::from_rgb(0xff, 0xc0, 0x78),
            },
        }
    }

    /// Ball colour for `lane`: a blue ramp in light mode, a warm ramp in dark mode.
    pub fn lane_color(self, lane: usize, num_lanes: usize) -> Color {
        let t = if num_lanes > 1 {
            lane as f32 / (num_lanes - 1) as f32
        } else {
            0.5
        };
        match self {
            Self::Light => ramp(&LIGHT_RAMP, t * 0.8 + 0.2),
            Self::Dark => ramp(&DARK_RAMP, t * 0.9 + 0.1),
        }
    }
}

/// Colours for the lane canvas (macroquad) and the chart panel (egui).
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub canvas: Color,
    pub lane_line: Color,
    pub chart_bg: egui::Color32,
    pub axis: egui::Color32,
    pub text: egui::Color32,
    pub curve: egui::Color32,
    pub bars: egui::Color32,
    pub histogram: egui::Color32,
    pub mean_marker: egui::Color32,
    pub sigma_marker: egui::Color32,
}

const LIGHT_RAMP: [[f32; 3]; 4] = [
    [0.97, 0.98, 1.00],
    [0.62, 0.79, 0.88],
    [0.26, 0.57, 0.78],
    [0.03, 0.19, 0.42],
];

const DARK_RAMP: [[f32; 3]; 5] = [
    [0.00, 0.00, 0.02],
    [0.34, 0.06, 0.43],
    [0.73, 0.21, 0.33],
    [0.98, 0.55, 0.04],
    [0.99, 1.00, 0.64],
];

fn ramp(stops: &[[f32; 3]], t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let segments = (stops.len() - 1) as f32;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let f = pos - i as f32;
    let (a, b) = (stops[i], stops[i + 1]);
    Color::new(
        a[0] + (b[0] - a[0]) * f,
        a[1] + (b[1] - a[1]) * f,
        a[2] + (b[2] - a[2]) * f,
        1.0,
    )
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba(r, g, b, 255)
}
