//! Steering behaviors
//!
//! Every behavior reads a body (and a target or peer set) and returns a force
//! already limited to the body's `max_force`. Nothing here mutates a body; the
//! caller weights the forces and feeds them to `Body::apply_force`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::*;
use crate::with_length;

/// Something to steer toward: a point, or a moving point when velocity is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Option<Vec2>,
}

impl Target {
    pub fn moving(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel: Some(vel) }
    }
}

impl From<Vec2> for Target {
    fn from(pos: Vec2) -> Self {
        Self { pos, vel: None }
    }
}

impl From<&Body> for Target {
    fn from(body: &Body) -> Self {
        Self::moving(body.pos, body.vel)
    }
}

/// Convert a desired velocity into a bounded steering force
#[inline]
pub fn steer_toward(body: &Body, desired: Vec2) -> Vec2 {
    (desired - body.vel).clamp_length_max(body.max_force)
}

/// Velocity the body would like to have when heading for `target`
pub fn desired_velocity(body: &Body, target: Vec2, arrival: bool) -> Vec2 {
    let offset = target - body.pos;
    let distance = offset.length();
    let speed = if arrival && distance < ARRIVAL_RADIUS {
        distance / ARRIVAL_RADIUS * body.max_speed
    } else {
        body.max_speed
    };
    with_length(offset, speed)
}

/// Head for `target`; with `arrival` the approach slows down inside the arrival radius
pub fn seek(body: &Body, target: Vec2, arrival: bool) -> Vec2 {
    steer_toward(body, desired_velocity(body, target, arrival))
}

pub fn flee(body: &Body, target: Vec2) -> Vec2 {
    -seek(body, target, false)
}

/// Seek where the target will be in `frames` ticks at its current velocity.
/// Without a known velocity this is a plain seek.
pub fn pursue(body: &Body, target: Target, frames: f32) -> Vec2 {
    match target.vel {
        Some(vel) => seek(body, target.pos + vel * frames, false),
        None => seek(body, target.pos, false),
    }
}

pub fn evade(body: &Body, target: Target, frames: f32) -> Vec2 {
    -pursue(body, target, frames)
}

/// Persistent wander heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wander {
    /// Current angle on the wander circle (radians)
    pub angle: f32,
    /// Maximum perturbation per tick
    pub change: f32,
}

impl Wander {
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            change: WANDER_CHANGE,
        }
    }

    /// Random starting angle
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(rng.random_range(0.0..std::f32::consts::TAU))
    }

    /// Nudge the angle and seek the matching point on the circle ahead
    pub fn force(&mut self, body: &Body, rng: &mut impl Rng) -> Vec2 {
        let heading = if body.vel.length() < WANDER_MIN_SPEED {
            Vec2::from_angle(self.angle)
        } else {
            body.vel
        };
        let circle_center = body.pos + with_length(heading, WANDER_DISTANCE);

        self.angle += rng.random_range(-self.change..=self.change);
        let target = circle_center + Vec2::from_angle(self.angle) * WANDER_RADIUS;

        seek(body, target, false)
    }
}

/// Repulsion from peers closer than `desired`, weighted by inverse distance
pub fn separate(body: &Body, peers: &[Body], desired: f32) -> Vec2 {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    for other in peers {
        let d = body.pos.distance(other.pos);
        if d > 0.0 && d < desired {
            sum += (body.pos - other.pos).normalize_or_zero() / d;
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    let average = sum / count as f32;
    steer_toward(body, with_length(average, body.max_speed))
}

/// Match the average heading of neighbors within `radius`
pub fn align(body: &Body, peers: &[Body], radius: f32) -> Vec2 {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    for other in peers {
        let d = body.pos.distance(other.pos);
        if d > 0.0 && d < radius {
            sum += other.vel;
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    steer_toward(body, with_length(sum / count as f32, body.max_speed))
}

/// Seek the centroid of neighbors within `radius`
pub fn cohesion(body: &Body, peers: &[Body], radius: f32) -> Vec2 {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    for other in peers {
        let d = body.pos.distance(other.pos);
        if d > 0.0 && d < radius {
            sum += other.pos;
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    seek(body, sum / count as f32, false)
}

/// Relative weights for `flock`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
}

impl Default for FlockWeights {
    fn default() -> Self {
        Self {
            separation: 1.5,
            alignment: 1.0,
            cohesion: 1.0,
        }
    }
}

/// Classic boids: weighted separation + alignment + cohesion
pub fn flock(body: &Body, peers: &[Body], weights: FlockWeights) -> Vec2 {
    separate(body, peers, DEFAULT_SEPARATION) * weights.separation
        + align(body, peers, DEFAULT_NEIGHBOR_RADIUS) * weights.alignment
        + cohesion(body, peers, DEFAULT_NEIGHBOR_RADIUS) * weights.cohesion
}

/// Push back toward the interior when within `margin` of a world edge.
/// Each axis is handled on its own; the other axis keeps the current velocity.
/// In a corner both axes are corrected; the y correction never replaces the
/// x one.
pub fn boundaries(body: &Body, world: Vec2, margin: f32) -> Vec2 {
    let mut desired = body.vel;
    let mut near_edge = false;

    if body.pos.x < margin {
        desired.x = body.max_speed;
        near_edge = true;
    } else if body.pos.x > world.x - margin {
        desired.x = -body.max_speed;
        near_edge = true;
    }

    if body.pos.y < margin {
        desired.y = body.max_speed;
        near_edge = true;
    } else if body.pos.y > world.y - margin {
        desired.y = -body.max_speed;
        near_edge = true;
    }

    if !near_edge {
        return Vec2::ZERO;
    }
    steer_toward(body, with_length(desired, body.max_speed))
}
