// All tunable simulation constants in one place.

// Lanes
pub const DEFAULT_NUM_LANES: usize = 51;
pub const MIN_NUM_LANES: usize = 2;
pub const MAX_NUM_LANES: usize = 201;

// Distribution defaults
pub const DEFAULT_UNIFORM_MIN: f64 = 1.0;
pub const DEFAULT_UNIFORM_MAX: f64 = 9.0;
pub const UNIFORM_SLIDER_LIMITS: (f64, f64) = (-50.0, 50.0);
pub const DEFAULT_NORMAL_MEAN: f64 = 0.0;
pub const DEFAULT_NORMAL_STD_DEV: f64 = 1.0;
pub const DEFAULT_POISSON_LAMBDA: f64 = 5.0;
pub const DEFAULT_GAMMA_ALPHA: f64 = 2.0;
pub const DEFAULT_GAMMA_BETA: f64 = 2.0;
pub const DEFAULT_BINOMIAL_N: u64 = 10;
pub const DEFAULT_BINOMIAL_P: f64 = 0.5;
pub const DEFAULT_EXPONENTIAL_RATE: f64 = 1.0;
pub const DEFAULT_STUDENT_T_DOF: f64 = 5.0;

// Sampling
pub const MAX_REDRAWS: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;

// Charts
pub const PDF_CURVE_POINTS: usize = 200;
pub const UNIFORM_CURVE_POINTS: usize = 5;
pub const HISTOGRAM_REFRESH_INTERVAL: f64 = 0.2; // seconds

// Balls
pub const DEFAULT_BALL_SPEED: f32 = 30.0; // px per second
pub const DEFAULT_GEN_RATE: f32 = 10.0; // balls per second
pub const DEFAULT_BALL_LIFETIME: f32 = 20.0; // seconds
pub const DEFAULT_BALL_SIZE: f32 = 8.0;
pub const MIN_BALL_SIZE: f32 = 1.0;
pub const MAX_POOL_SIZE: usize = 1000;
pub const MAX_FRAME_DT: f32 = 0.1;

// Layout
pub const CONTROLS_PANEL_WIDTH: f32 = 280.0;
pub const CHARTS_PANEL_WIDTH: f32 = 440.0;
pub const MIN_CANVAS_WIDTH: f32 = 100.0;

// Preferences
pub const PREFS_FILE: &str = "galton_prefs.json";
