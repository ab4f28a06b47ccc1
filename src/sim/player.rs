//! The pointer-following player vehicle

use glam::Vec2;

use super::ability::Ability;
use super::agent::{Agent, AgentTag, EntityId};
use super::body::Body;
use super::context::SimContext;
use super::obstacle::{Obstacle, avoid};
use super::projectile::Projectile;
use super::steering::{boundaries, seek};
use crate::consts::BOUNDARY_MARGIN;

/// Seconds between shots at level 1
pub const BASE_FIRE_RATE: f32 = 0.5;
pub const BASE_PROJECTILE_DAMAGE: f32 = 20.0;
/// Damage added per weapon upgrade
pub const WEAPON_UPGRADE_DAMAGE: f32 = 15.0;
/// Kills between weapon upgrades
pub const KILLS_PER_UPGRADE: u32 = 10;
/// Pointer movement (per tick) below which the pointer counts as stopped
pub const POINTER_STOP_THRESHOLD: f32 = 2.0;

pub const ORBITAL_UNLOCK_LEVEL: u32 = 3;
pub const PULSE_UNLOCK_LEVEL: u32 = 5;

const SEEK_WEIGHT: f32 = 0.2;
const AVOID_WEIGHT: f32 = 3.0;
const BOUNDARY_WEIGHT: f32 = 3.0;
const OBSTACLE_BUMP_DAMPING: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    /// Seconds between shots
    pub fire_rate: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub kills: u32,
    pub weapon_level: u32,
    pub projectile_damage: f32,
    /// True when the pointer barely moved during the last update
    pub pointer_stopped: bool,
    last_pointer: Option<Vec2>,
    pub abilities: Vec<Ability>,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos)
                .with_motion(5.0, 0.2)
                .with_radius(20.0)
                .with_health(100.0),
            fire_rate: BASE_FIRE_RATE,
            fire_cooldown: 0.0,
            level: 1,
            xp: 0,
            xp_to_next_level: 10,
            kills: 0,
            weapon_level: 0,
            projectile_damage: BASE_PROJECTILE_DAMAGE,
            pointer_stopped: false,
            last_pointer: None,
            abilities: Vec::new(),
        }
    }

    /// Follow the pointer, avoid obstacles, stay inside the world
    pub fn update(&mut self, ctx: &SimContext, pointer: Vec2, obstacles: &[Obstacle]) {
        // Arrival only once the pointer rests, so hovering does not oscillate
        self.pointer_stopped = self
            .last_pointer
            .is_some_and(|last| last.distance(pointer) < POINTER_STOP_THRESHOLD);
        self.last_pointer = Some(pointer);

        self.body
            .apply_force(seek(&self.body, pointer, self.pointer_stopped) * SEEK_WEIGHT);
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

        self.body.clamp_to(ctx.width(), ctx.height());

        if self.fire_cooldown > 0.0 {
            self.fire_cooldown = (self.fire_cooldown - ctx.dt).max(0.0);
        }
    }

    /// Fire toward `pointer` if the cooldown allows. The shot starts at the
    /// player's center and homes on the pointer position captured now.
    pub fn try_fire(&mut self, id: EntityId, pointer: Vec2) -> Option<Projectile> {
        if self.fire_cooldown > 0.0 {
            return None;
        }
        let direction = (pointer - self.body.pos).try_normalize()?;
        self.fire_cooldown = self.fire_rate;
        Some(Projectile::new(
            id,
            self.body.pos,
            direction,
            self.projectile_damage,
            Some(pointer),
        ))
    }

    /// Add experience; returns the number of levels gained
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.xp_to_next_level = (self.xp_to_next_level as f32 * 1.5).floor() as u32;

        self.body.max_speed += 0.2;
        self.fire_rate *= 0.95;
        self.body.max_health += 10.0;
        self.body.heal(20.0);

        match self.level {
            ORBITAL_UNLOCK_LEVEL => self.abilities.push(Ability::orbital()),
            PULSE_UNLOCK_LEVEL => self.abilities.push(Ability::pulse()),
            _ => {}
        }
        log::info!("Level up! Level {}", self.level);
    }

    /// Count a kill; returns true when it triggered a weapon upgrade
    pub fn add_kill(&mut self) -> bool {
        self.kills += 1;
        if self.kills % KILLS_PER_UPGRADE == 0 {
            self.weapon_level += 1;
            self.projectile_damage += WEAPON_UPGRADE_DAMAGE;
            log::info!("Weapon upgraded: damage {}", self.projectile_damage);
            return true;
        }
        false
    }
}

impl Agent for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn tag(&self) -> AgentTag {
        AgentTag::Player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(EntityId(1), Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_moves_toward_pointer() {
        let ctx = SimContext::new(800.0, 600.0);
        let mut p = player();
        for _ in 0..20 {
            p.update(&ctx, Vec2::new(700.0, 300.0), &[]);
        }
        assert!(p.body.pos.x > 400.0);
        assert!(p.body.vel.length() <= p.body.max_speed + 1e-4);
    }

    #[test]
    fn test_pointer_stopped_detection() {
        let ctx = SimContext::new(800.0, 600.0);
        let mut p = player();
        p.update(&ctx, Vec2::new(500.0, 300.0), &[]);
        assert!(!p.pointer_stopped);
        p.update(&ctx, Vec2::new(501.0, 300.0), &[]);
        assert!(p.pointer_stopped);
        p.update(&ctx, Vec2::new(520.0, 300.0), &[]);
        assert!(!p.pointer_stopped);
    }

    #[test]
    fn test_clamped_not_wrapped() {
        let ctx = SimContext::new(800.0, 600.0);
        let mut p = player();
        p.body.pos = Vec2::new(795.0, 300.0);
        p.body.vel = Vec2::new(5.0, 0.0);
        p.update(&ctx, Vec2::new(2000.0, 300.0), &[]);
        assert_eq!(p.body.pos.x, 780.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let ctx = SimContext::new(800.0, 600.0);
        let mut p = player();
        let pointer = Vec2::new(500.0, 300.0);

        let shot = p.try_fire(EntityId(2), pointer).expect("first shot fires");
        assert_eq!(shot.body.pos, p.body.pos);
        assert_eq!(shot.target, Some(pointer));
        assert!((shot.body.vel - Vec2::new(10.0, 0.0)).length() < 1e-5);
        assert!(p.try_fire(EntityId(3), pointer).is_none());

        // 0.5 s later
        for _ in 0..31 {
            p.update(&ctx, p.body.pos, &[]);
        }
        assert!(p.try_fire(EntityId(4), pointer).is_some());
    }

    #[test]
    fn test_no_fire_at_own_position() {
        let mut p = player();
        assert!(p.try_fire(EntityId(2), p.body.pos).is_none());
        assert_eq!(p.fire_cooldown, 0.0);
    }

    #[test]
    fn test_level_up_progression() {
        let mut p = player();
        assert_eq!(p.add_xp(9), 0);
        assert_eq!(p.add_xp(1), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_to_next_level, 15);
        assert_eq!(p.body.max_health, 110.0);
        assert!((p.body.max_speed - 5.2).abs() < 1e-5);
        assert!((p.fire_rate - 0.475).abs() < 1e-6);
    }

    #[test]
    fn test_multiple_levels_and_ability_unlocks() {
        let mut p = player();
        // 10 + 15 + 22 + 33 = 80 xp to reach level 5
        assert_eq!(p.add_xp(80), 4);
        assert_eq!(p.level, 5);
        assert_eq!(p.abilities.len(), 2);
    }

    #[test]
    fn test_weapon_upgrade_every_ten_kills() {
        let mut p = player();
        for _ in 0..9 {
            assert!(!p.add_kill());
        }
        assert!(p.add_kill());
        assert_eq!(p.weapon_level, 1);
        assert_eq!(p.projectile_damage, 35.0);
    }
}
