use macroquad::prelude::*;

use galton::config;

/// One ball rising up its lane.
#[derive(Clone, Copy, Debug)]
pub struct Ball {
    pub pos: Vec2,
    pub lane: usize,
    pub color: Color,
    pub age: f32,
}

/// Live balls plus a bounded pool of retired ones for reuse.
pub struct BallSystem {
    balls: Vec<Ball>,
    pool: Vec<Ball>,
}

impl BallSystem {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(config::MAX_POOL_SIZE),
            pool: Vec::with_capacity(config::MAX_POOL_SIZE),
        }
    }

    pub fn spawn(&mut self, pos: Vec2, lane: usize, color: Color) {
        let ball = match self.pool.pop() {
            Some(mut ball) => {
                ball.pos = pos;
                ball.lane = lane;
                ball.color = color;
                ball.age = 0.0;
                ball
            }
            None => Ball {
                pos,
                lane,
                color,
                age: 0.0,
            },
        };
        self.balls.push(ball);
    }

    /// Move every ball up by `speed * dt` and retire the ones that expired or left
    /// the top of the canvas. Returns how many were retired.
    pub fn update(&mut self, dt: f32, speed: f32, lifetime: f32, size: f32) -> usize {
        let mut retired = 0;
        let mut i = 0;
        while i < self.balls.len() {
            let ball = self.balls[i];
            if ball.age >= lifetime || ball.pos.y < -size {
                let ball = self.balls.swap_remove(i);
                self.retire(ball);
                retired += 1;
            } else {
                let b = &mut self.balls[i];
                b.pos.y -= speed * dt;
                b.age += dt;
                i += 1;
            }
        }
        retired
    }

    pub fn recycle_all(&mut self) {
        while let Some(ball) = self.balls.pop() {
            self.retire(ball);
        }
    }

    fn retire(&mut self, ball: Ball) {
        if self.pool.len() < config::MAX_POOL_SIZE {
            self.pool.push(ball);
        }
    }

    pub fn count(&self) -> usize {
        self.balls.len()
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }
}
