//! Kinematic body shared by every agent
//!
//! Forces accumulate into acceleration during a tick; `integrate` folds them
//! into velocity (capped at `max_speed`) and position, then clears them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position/velocity/acceleration state plus health and collision radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Body {
    /// Body at rest with the generic vehicle profile
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            max_speed: 4.0,
            max_force: 0.1,
            radius: 16.0,
            health: 100.0,
            max_health: 100.0,
        }
    }

    pub fn with_motion(mut self, max_speed: f32, max_force: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self.max_force = max_force.max(0.0);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Full health at `max_health`
    pub fn with_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health.max(0.0);
        self.health = self.max_health;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Accumulate a force for this tick
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Advance one tick. Must run once, after every `apply_force` of the tick.
    pub fn integrate(&mut self) {
        self.vel = (self.vel + self.acc).clamp_length_max(self.max_speed);
        self.pos += self.vel;
        self.acc = Vec2::ZERO;
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Health as a fraction of max health (0 when max health is 0)
    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    /// Circle-circle overlap
    pub fn collides_with(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// Overlap with a circle of `radius` around `point`
    pub fn collides_with_point(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) < self.radius + radius
    }

    /// Toroidal wrap: leaving by more than the radius re-enters on the opposite side
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        let r = self.radius;
        if self.pos.x > width + r {
            self.pos.x = -r;
        } else if self.pos.x < -r {
            self.pos.x = width + r;
        }
        if self.pos.y > height + r {
            self.pos.y = -r;
        } else if self.pos.y < -r {
            self.pos.y = height + r;
        }
    }

    /// Hard clamp inside the world, keeping the whole body visible
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        let r = self.radius;
        // min/max instead of f32::clamp: a world narrower than the body must not panic
        self.pos.x = self.pos.x.min(width - r).max(r);
        self.pos.y = self.pos.y.min(height - r).max(r);
    }
}
