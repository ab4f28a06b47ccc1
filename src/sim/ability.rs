//! Passive player abilities unlocked by leveling
//!
//! - Orbital: a blade circling the player, hitting each enemy at most once per cooldown
//! - Pulse: periodic area damage around the player

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::EntityId;
use super::body::Body;
use super::context::SimContext;
use super::enemy::Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Orbital,
    Pulse,
}

#[derive(Debug, Clone)]
pub struct Ability {
    pub kind: AbilityKind,
    pub damage: f32,
    /// Seconds between hits (per enemy for orbital, global for pulse)
    pub cooldown: f32,
    /// Orbit radius or pulse radius
    pub radius: f32,
    /// Orbital angle (radians)
    pub angle: f32,
    /// Orbital angular speed (radians per tick)
    pub angular_speed: f32,
    /// Seconds until the next pulse
    pulse_timer: f32,
    /// Last orbital hit time per enemy, in simulated seconds
    last_hit: HashMap<EntityId, f64>,
}

impl Ability {
    pub fn orbital() -> Self {
        Self {
            kind: AbilityKind::Orbital,
            damage: 15.0,
            cooldown: 0.3,
            radius: 60.0,
            angle: 0.0,
            angular_speed: 0.1,
            pulse_timer: 0.0,
            last_hit: HashMap::new(),
        }
    }

    pub fn pulse() -> Self {
        Self {
            kind: AbilityKind::Pulse,
            damage: 30.0,
            cooldown: 2.0,
            radius: 80.0,
            angle: 0.0,
            angular_speed: 0.0,
            pulse_timer: 0.0,
            last_hit: HashMap::new(),
        }
    }

    /// World position of the orbital blade
    pub fn orbital_position(&self, owner: &Body) -> Option<Vec2> {
        match self.kind {
            AbilityKind::Orbital => Some(owner.pos + Vec2::from_angle(self.angle) * self.radius),
            AbilityKind::Pulse => None,
        }
    }

    /// Advance and apply damage. Returns the enemies hit this tick.
    pub fn update(
        &mut self,
        ctx: &SimContext,
        owner: &Body,
        enemies: &mut [Enemy],
    ) -> Vec<EntityId> {
        match self.kind {
            AbilityKind::Orbital => self.update_orbital(ctx, owner, enemies),
            AbilityKind::Pulse => self.update_pulse(ctx, owner, enemies),
        }
    }

    fn update_orbital(
        &mut self,
        ctx: &SimContext,
        owner: &Body,
        enemies: &mut [Enemy],
    ) -> Vec<EntityId> {
        self.angle = (self.angle + self.angular_speed) % std::f32::consts::TAU;
        let blade = owner.pos + Vec2::from_angle(self.angle) * self.radius;

        // Forget enemies that no longer exist
        self.last_hit
            .retain(|id, _| enemies.iter().any(|e| e.id == *id));

        let mut hits = Vec::new();
        for enemy in enemies.iter_mut().filter(|e| !e.body.is_dead()) {
            let ready = self
                .last_hit
                .get(&enemy.id)
                .is_none_or(|&t| ctx.elapsed - t >= self.cooldown as f64);
            if ready && enemy.body.collides_with_point(blade, owner.radius) {
                enemy.body.take_damage(self.damage);
                self.last_hit.insert(enemy.id, ctx.elapsed);
                hits.push(enemy.id);
            }
        }
        hits
    }

    fn update_pulse(
        &mut self,
        ctx: &SimContext,
        owner: &Body,
        enemies: &mut [Enemy],
    ) -> Vec<EntityId> {
        self.pulse_timer -= ctx.dt;
        if self.pulse_timer > 0.0 {
            return Vec::new();
        }
        self.pulse_timer = self.cooldown;

        let mut hits = Vec::new();
        for enemy in enemies.iter_mut().filter(|e| !e.body.is_dead()) {
            if enemy.body.collides_with_point(owner.pos, self.radius) {
                enemy.body.take_damage(self.damage);
                hits.push(enemy.id);
            }
        }
        hits
    }
}
