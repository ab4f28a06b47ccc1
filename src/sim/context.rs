//! Simulation context: world size, debug flag and frame clock
//!
//! Mutated only at the start of a tick (resize, debug toggle, clock advance);
//! agent updates receive it by shared reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FALLBACK_DT, MAX_FRAME_DT};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimContext {
    /// World width/height
    pub world: Vec2,
    pub debug: bool,
    /// Clamped delta of the current tick (seconds)
    pub dt: f32,
    /// Accumulated simulated time (seconds)
    pub elapsed: f64,
    /// Ticks since the context was created
    pub frame: u64,
}

impl SimContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            world: Vec2::new(width, height),
            debug: false,
            dt: FALLBACK_DT,
            elapsed: 0.0,
            frame: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.world.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.world.y
    }

    pub fn center(&self) -> Vec2 {
        self.world / 2.0
    }

    /// Adopt a new world size; non-finite sizes are ignored
    pub fn resize(&mut self, size: Vec2) {
        if !size.is_finite() {
            log::warn!("Ignoring non-finite world size {}x{}", size.x, size.y);
            return;
        }
        log::debug!("World resized to {}x{}", size.x, size.y);
        self.world = size.max(Vec2::ZERO);
    }

    /// Advance the clock by a measured delta, replacing unusable ones
    pub fn begin_frame(&mut self, raw_dt: f32) {
        self.dt = clamp_dt(raw_dt);
        self.elapsed += self.dt as f64;
        self.frame += 1;
    }
}

/// Frame deltas that are non-finite, negative or too large fall back to 1/60 s
pub fn clamp_dt(raw_dt: f32) -> f32 {
    if raw_dt.is_finite() && (0.0..=MAX_FRAME_DT).contains(&raw_dt) {
        raw_dt
    } else {
        FALLBACK_DT
    }
}
