//! Autonomous enemies
//!
//! Each kind carries a fixed behavior profile (motion limits, detection range,
//! pursue horizon). The profile is resolved once at spawn and the update reads
//! it instead of branching on the kind.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentTag, EntityId};
use super::body::Body;
use super::context::SimContext;
use super::obstacle::{Obstacle, avoid};
use super::steering::{Target, Wander, boundaries, pursue, separate};
use crate::consts::{BOUNDARY_MARGIN, DEFAULT_PREDICTION_FRAMES};

/// Base contact damage before the difficulty multiplier
pub const BASE_ENEMY_DAMAGE: f32 = 10.0;
/// Seconds between two contact attacks of one enemy
pub const ENEMY_ATTACK_RATE: f32 = 1.5;
/// Experience dropped on death
pub const ENEMY_XP_VALUE: u32 = 5;

/// Weight of the separation force relative to the chase/wander force
const SEPARATION_WEIGHT: f32 = 0.5;
const AVOID_WEIGHT: f32 = 3.0;
const BOUNDARY_WEIGHT: f32 = 3.0;
/// Velocity kept after bumping into an obstacle
const OBSTACLE_BUMP_DAMPING: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    Wanderer,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Wanderer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Wanderer => "wanderer",
        }
    }

    pub fn profile(&self) -> EnemyProfile {
        match self {
            EnemyKind::Basic => EnemyProfile {
                max_speed: 2.0,
                max_force: 0.1,
                radius: 18.0,
                health: 50.0,
                detection_radius: 250.0,
                prediction_frames: DEFAULT_PREDICTION_FRAMES,
                engage_fraction: 1.0,
            },
            // Aggressive: looks further ahead when pursuing
            EnemyKind::Fast => EnemyProfile {
                max_speed: 3.0,
                max_force: 0.15,
                radius: 12.0,
                health: 30.0,
                detection_radius: 300.0,
                prediction_frames: 15.0,
                engage_fraction: 1.0,
            },
            EnemyKind::Tank => EnemyProfile {
                max_speed: 1.5,
                max_force: 0.08,
                radius: 30.0,
                health: 150.0,
                detection_radius: 400.0,
                prediction_frames: 20.0,
                engage_fraction: 1.0,
            },
            // Mostly wanders, only engages up close
            EnemyKind::Wanderer => EnemyProfile {
                max_speed: 2.0,
                max_force: 0.1,
                radius: 15.0,
                health: 40.0,
                detection_radius: 200.0,
                prediction_frames: DEFAULT_PREDICTION_FRAMES,
                engage_fraction: 0.5,
            },
        }
    }
}

/// Static tuning of an enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub max_speed: f32,
    pub max_force: f32,
    pub radius: f32,
    pub health: f32,
    pub detection_radius: f32,
    /// Pursue prediction horizon (ticks)
    pub prediction_frames: f32,
    /// Fraction of the detection radius inside which the enemy gives chase
    pub engage_fraction: f32,
}

impl EnemyProfile {
    pub fn engage_radius(&self) -> f32 {
        self.detection_radius * self.engage_fraction
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorState {
    Wander,
    Pursue,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    pub body: Body,
    pub state: BehaviorState,
    pub wander: Wander,
    pub xp_value: u32,
    /// Contact damage (already scaled by difficulty)
    pub damage: f32,
    pub attack_rate: f32,
    /// Seconds until the next attack is allowed
    pub attack_cooldown: f32,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2, kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let profile = kind.profile();
        let body = Body::new(pos)
            .with_motion(profile.max_speed, profile.max_force)
            .with_radius(profile.radius)
            .with_health(profile.health);
        Self {
            id,
            kind,
            profile,
            body,
            state: BehaviorState::Wander,
            wander: Wander::random(rng),
            xp_value: ENEMY_XP_VALUE,
            damage: BASE_ENEMY_DAMAGE,
            attack_rate: ENEMY_ATTACK_RATE,
            attack_cooldown: 0.0,
        }
    }

    /// Scale contact damage, flooring like whole hit points
    pub fn with_damage_multiplier(mut self, multiplier: f32) -> Self {
        self.damage = (BASE_ENEMY_DAMAGE * multiplier).floor();
        self
    }

    /// Chase when the player is inside the engage radius, wander otherwise
    pub fn select_behavior(&self, distance_to_player: f32) -> BehaviorState {
        if distance_to_player < self.profile.engage_radius() {
            BehaviorState::Pursue
        } else {
            BehaviorState::Wander
        }
    }

    /// Compose this tick's forces, integrate, resolve obstacle contact and wrap
    pub fn update(
        &mut self,
        ctx: &SimContext,
        player: &Body,
        peers: &[Body],
        obstacles: &[Obstacle],
        rng: &mut impl Rng,
    ) {
        self.state = self.select_behavior(self.body.pos.distance(player.pos));
        let mut force = match self.state {
            BehaviorState::Pursue => {
                pursue(&self.body, Target::from(player), self.profile.prediction_frames)
            }
            BehaviorState::Wander => self.wander.force(&self.body, rng),
        };

        if peers.len() > 1 {
            force += separate(&self.body, peers, self.body.radius * 3.0) * SEPARATION_WEIGHT;
        }
        self.body.apply_force(force);
        self.body.apply_force(avoid(&self.body, obstacles) * AVOID_WEIGHT);
        self.body
            .apply_force(boundaries(&self.body, ctx.world, BOUNDARY_MARGIN) * BOUNDARY_WEIGHT);

        let previous = self.body.pos;
        self.body.integrate();
        if obstacles
            .iter()
            .any(|o| o.collides_with_circle(self.body.pos, self.body.radius))
        {
            self.body.pos = previous;
            self.body.vel *= OBSTACLE_BUMP_DAMPING;
        }

        self.body.wrap_edges(ctx.width(), ctx.height());

        if self.attack_cooldown > 0.0 {
            self.attack_cooldown -= ctx.dt;
        }
    }

    /// Damage the player on contact when the attack cooldown has run out
    pub fn attack(&mut self, player: &mut Body) -> bool {
        if self.attack_cooldown <= 0.0 && self.body.collides_with(player) {
            player.take_damage(self.damage);
            self.attack_cooldown = self.attack_rate;
            return true;
        }
        false
    }
}

impl Agent for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn tag(&self) -> AgentTag {
        AgentTag::Enemy(self.kind)
    }
}
