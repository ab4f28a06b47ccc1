//! Player projectiles
//!
//! Launched fast along the fire direction, then curved toward the point the
//! pointer was at when fired. The homing force ramps up with age so the shot
//! visibly leaves the ship in a straight line first.

use glam::Vec2;

use super::agent::{Agent, AgentTag, EntityId};
use super::body::Body;
use super::context::SimContext;
use super::enemy::Enemy;
use super::obstacle::{Obstacle, avoid};
use super::steering::seek;

pub const PROJECTILE_SPEED: f32 = 10.0;
pub const PROJECTILE_RADIUS: f32 = 5.0;
/// Seconds before a projectile expires on its own
pub const PROJECTILE_LIFETIME: f32 = 2.0;
/// Homing strength gained per second of age
const HOMING_RAMP: f32 = 0.5;
const HOMING_MAX: f32 = 0.5;
const AVOID_WEIGHT: f32 = 1.5;

/// Scale of the homing force at `age` seconds
#[inline]
pub fn homing_strength(age: f32) -> f32 {
    (age * HOMING_RAMP).min(HOMING_MAX)
}

/// An enemy struck this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub projectile: EntityId,
    pub enemy: EntityId,
    pub damage: f32,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    pub damage: f32,
    pub lifetime: f32,
    /// Seconds since launch
    pub age: f32,
    /// Pointer position captured at fire time
    pub target: Option<Vec2>,
    expired: bool,
}

impl Projectile {
    /// `direction` should be normalized
    pub fn new(
        id: EntityId,
        pos: Vec2,
        direction: Vec2,
        damage: f32,
        target: Option<Vec2>,
    ) -> Self {
        let body = Body::new(pos)
            .with_motion(PROJECTILE_SPEED, 0.1)
            .with_radius(PROJECTILE_RADIUS)
            .with_velocity(direction * PROJECTILE_SPEED);
        Self {
            id,
            body,
            damage,
            lifetime: PROJECTILE_LIFETIME,
            age: 0.0,
            target,
            expired: false,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Homing contribution for the current age
    pub fn homing_force(&self) -> Vec2 {
        match self.target {
            Some(target) => seek(&self.body, target, false) * homing_strength(self.age),
            None => Vec2::ZERO,
        }
    }

    /// Move, then check obstacles and enemies. Returns the enemy hit, if any.
    pub fn update(
        &mut self,
        ctx: &SimContext,
        enemies: &mut [Enemy],
        obstacles: &[Obstacle],
    ) -> Option<ProjectileHit> {
        if self.expired {
            return None;
        }

        self.body.apply_force(self.homing_force());
        if !obstacles.is_empty() {
            self.body.apply_force(avoid(&self.body, obstacles) * AVOID_WEIGHT);
        }
        self.body.integrate();

        if obstacles
            .iter()
            .any(|o| o.collides_with_circle(self.body.pos, self.body.radius))
        {
            self.expired = true;
            return None;
        }

        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| !e.body.is_dead() && self.body.collides_with(&e.body))
        {
            enemy.body.take_damage(self.damage);
            self.expired = true;
            return Some(ProjectileHit {
                projectile: self.id,
                enemy: enemy.id,
                damage: self.damage,
            });
        }

        self.age += ctx.dt;
        if self.age >= self.lifetime {
            self.expired = true;
        }

        self.body.wrap_edges(ctx.width(), ctx.height());
        None
    }
}

impl Agent for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn tag(&self) -> AgentTag {
        AgentTag::Projectile
    }
}
