use macroquad::prelude::*;

use galton::config;
use galton::histogram::HistogramBin;
use galton::{Engine, RefreshLimiter, SimulationConfig};

use crate::particles::BallSystem;
use crate::theme::ThemeMode;

/// Ball animation settings edited from the controls panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallSettings {
    pub speed: f32,
    pub gen_rate: f32,
    pub lifetime: f32,
    pub size: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            speed: config::DEFAULT_BALL_SPEED,
            gen_rate: config::DEFAULT_GEN_RATE,
            lifetime: config::DEFAULT_BALL_LIFETIME,
            size: config::DEFAULT_BALL_SIZE,
        }
    }
}

/// Geometry of the lane canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneLayout {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    pub num_lanes: usize,
}

impl LaneLayout {
    pub fn lane_width(&self) -> f32 {
        self.width / self.num_lanes.max(1) as f32
    }

    /// Screen x of the centre of `lane`.
    pub fn lane_center(&self, lane: usize) -> f32 {
        let w = self.lane_width();
        self.origin.x + lane as f32 * w + w / 2.0
    }

    /// Balls may not be wider than half a lane.
    pub fn max_ball_size(&self) -> f32 {
        ((self.lane_width() / 2.0).floor() - 1.0).max(config::MIN_BALL_SIZE)
    }
}

/// Balls to create after `elapsed` seconds at `rate` balls per second.
pub fn spawn_count(elapsed: f64, rate: f64) -> usize {
    if rate <= 0.0 || elapsed <= 0.0 {
        return 0;
    }
    (elapsed * rate).floor() as usize
}

pub struct SimState {
    pub engine: Engine,
    pub balls: BallSystem,
    pub settings: BallSettings,
    pub layout: LaneLayout,
    pub theme: ThemeMode,
    pub running: bool,
    pub total_created: u64,
    pub histogram_bins: Vec<HistogramBin>,
    pub last_error: Option<String>,
    refresh: RefreshLimiter,
    last_ball_time: f64,
}

impl SimState {
    pub fn new(seed: u64, theme: ThemeMode) -> galton::Result<Self> {
        let engine = Engine::new(SimulationConfig::default(), seed)?;
        let num_lanes = engine.num_lanes();
        Ok(Self {
            engine,
            balls: BallSystem::new(),
            settings: BallSettings::default(),
            layout: LaneLayout {
                origin: Vec2::ZERO,
                width: 800.0,
                height: 600.0,
                num_lanes,
            },
            theme,
            running: false,
            total_created: 0,
            histogram_bins: Vec::new(),
            last_error: None,
            refresh: RefreshLimiter::default(),
            last_ball_time: 0.0,
        })
    }

    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_ball_time = now;
        tracing::info!(distribution = self.engine.distribution().kind().tag(), "simulation started");
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            tracing::info!(total = self.total_created, "simulation stopped");
        }
    }

    pub fn toggle_running(&mut self, now: f64) {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.balls.recycle_all();
        self.total_created = 0;
        self.engine.reset();
        self.refresh.cancel();
        self.histogram_bins.clear();
    }

    /// Push an edited config into the engine. A rejected config is reported and the
    /// previous one stays active.
    pub fn apply_config(&mut self, next: SimulationConfig) {
        match self.engine.apply(next) {
            Ok(()) => {
                self.last_error = None;
                self.layout.num_lanes = self.engine.num_lanes();
                self.clamp_ball_size();
                self.refresh_histogram();
            }
            Err(e) => {
                tracing::warn!(error = %e, "configuration rejected");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Called when the canvas area moves or resizes.
    pub fn set_canvas(&mut self, origin: Vec2, width: f32, height: f32) {
        self.layout.origin = origin;
        self.layout.width = width.max(config::MIN_CANVAS_WIDTH);
        self.layout.height = height.max(1.0);
        self.clamp_ball_size();
    }

    pub fn clamp_ball_size(&mut self) {
        let max = self.layout.max_ball_size();
        self.settings.size = self.settings.size.clamp(config::MIN_BALL_SIZE, max);
    }

    /// Advance balls, spawn the ones due since the last spawn, and fire any deferred
    /// histogram refresh. A deferred refresh still fires after the simulation stops.
    pub fn update(&mut self, dt: f32, now: f64) {
        if self.running {
            self.advance(dt, now);
        }

        if self.refresh.poll(now) {
            self.refresh_histogram();
        }
    }

    fn advance(&mut self, dt: f32, now: f64) {
        let s = self.settings;
        self.balls.update(dt, s.speed, s.lifetime, s.size);

        let rate = s.gen_rate as f64;
        let count = spawn_count(now - self.last_ball_time, rate);
        if count > 0 {
            for _ in 0..count {
                self.spawn_ball();
            }
            self.last_ball_time = (self.last_ball_time + count as f64 / rate).min(now);
            if self.refresh.request(now) {
                self.refresh_histogram();
            }
        }
    }

    fn spawn_ball(&mut self) {
        match self.engine.draw_lane() {
            Ok(sample) => {
                let pos = vec2(
                    self.layout.lane_center(sample.lane_index),
                    self.layout.origin.y + self.layout.height + self.settings.size,
                );
                let color = self.theme.lane_color(sample.lane_index, self.layout.num_lanes);
                self.balls.spawn(pos, sample.lane_index, color);
                self.total_created += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping ball");
            }
        }
    }

    pub fn refresh_histogram(&mut self) {
        if self.engine.histogram().total() == 0 {
            self.histogram_bins.clear();
            return;
        }
        let num_bins = self.engine.num_lanes();
        match self.engine.histogram_bins(num_bins) {
            Ok(bins) => self.histogram_bins = bins,
            Err(e) => tracing::warn!(error = %e, "histogram refresh skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galton::{DistributionConfig, DistributionKind};

    fn sim() -> SimState {
        SimState::new(11, ThemeMode::Light).unwrap()
    }

    #[test]
    fn spawn_count_floors_elapsed_times_rate() {
        assert_eq!(spawn_count(0.35, 10.0), 3);
        assert_eq!(spawn_count(0.09, 10.0), 0);
        assert_eq!(spawn_count(1.0, 0.0), 0);
        assert_eq!(spawn_count(-1.0, 10.0), 0);
    }

    #[test]
    fn update_spawns_due_balls_and_carries_remainder() {
        let mut s = sim();
        s.start(0.0);
        s.update(0.016, 0.35);
        assert_eq!(s.total_created, 3);
        assert_eq!(s.balls.count(), 3);
        // 0.05s of credit remains, so 0.06s more yields one ball
        s.update(0.016, 0.41);
        assert_eq!(s.total_created, 4);
        assert_eq!(s.engine.histogram().total(), 4);
    }

    #[test]
    fn spawn_clock_never_runs_ahead_of_now() {
        let mut s = sim();
        s.settings.gen_rate = 3.0;
        s.start(0.0);
        s.update(0.016, 1.0);
        assert_eq!(s.total_created, 3);
        assert!(s.last_ball_time <= 1.0);
    }

    #[test]
    fn stopped_simulation_does_not_spawn() {
        let mut s = sim();
        s.update(0.016, 5.0);
        assert_eq!(s.total_created, 0);
        s.start(5.0);
        s.stop();
        s.update(0.016, 10.0);
        assert_eq!(s.total_created, 0);
    }

    #[test]
    fn deferred_refresh_fires_after_stop() {
        let mut s = sim();
        s.start(0.0);
        s.update(0.016, 0.35);
        // one more ball inside the refresh interval, so its refresh is deferred
        s.update(0.016, 0.40);
        assert_eq!(s.engine.histogram().total(), 4);
        s.stop();
        s.update(0.016, 1.0);
        let shown: usize = s.histogram_bins.iter().map(|b| b.count).sum();
        assert_eq!(shown, s.engine.histogram().total());
        assert_eq!(s.total_created, 4);
    }

    #[test]
    fn reset_clears_balls_counts_and_histogram() {
        let mut s = sim();
        s.start(0.0);
        s.update(0.016, 1.0);
        assert!(s.total_created > 0);
        s.reset();
        assert!(!s.running);
        assert_eq!(s.total_created, 0);
        assert_eq!(s.balls.count(), 0);
        assert_eq!(s.engine.histogram().total(), 0);
        assert!(s.histogram_bins.is_empty());
    }

    #[test]
    fn first_spawn_refreshes_histogram_immediately() {
        let mut s = sim();
        s.start(0.0);
        s.update(0.016, 0.5);
        let total: usize = s.histogram_bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 5);
        assert_eq!(s.histogram_bins.len(), s.engine.num_lanes());
    }

    #[test]
    fn rejected_config_keeps_previous_one() {
        let mut s = sim();
        let mut next = s.engine.config().clone();
        next.params.set(DistributionConfig::normal(0.0, 0.0));
        s.apply_config(next);
        assert!(s.last_error.is_some());
        assert_eq!(s.engine.distribution(), &DistributionConfig::normal(0.0, 1.0));
    }

    #[test]
    fn switching_to_uniform_follows_bounds() {
        let mut s = sim();
        let mut next = s.engine.config().clone();
        next.switch_distribution(DistributionKind::Uniform);
        s.apply_config(next);
        assert_eq!(s.engine.num_lanes(), 16);
        assert_eq!(s.layout.num_lanes, 16);
    }

    #[test]
    fn ball_size_is_capped_by_lane_width() {
        let mut s = sim();
        s.set_canvas(Vec2::ZERO, 510.0, 400.0);
        // 51 lanes of 10px
        assert_eq!(s.layout.max_ball_size(), 4.0);
        assert_eq!(s.settings.size, 4.0);
        assert!((s.layout.lane_center(0) - 5.0).abs() < 1e-4);
    }
}
