//! Resource orbs dropped by dead enemies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentTag, EntityId};
use super::body::Body;
use super::context::SimContext;
use super::obstacle::{Obstacle, avoid};
use super::steering::seek;

/// Player distance under which an orb starts homing
pub const ATTRACTION_RADIUS: f32 = 100.0;
const DRIFT_SPEED: f32 = 2.0;
const SEEK_WEIGHT: f32 = 0.2;
const AVOID_WEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrbKind {
    Experience(u32),
    Health(f32),
}

impl OrbKind {
    fn radius(&self) -> f32 {
        match self {
            OrbKind::Experience(_) => 8.0,
            OrbKind::Health(_) => 10.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Orb {
    pub id: EntityId,
    pub kind: OrbKind,
    pub body: Body,
    pub attraction_radius: f32,
    pub collected: bool,
}

impl Orb {
    /// Orb with a small random drift
    pub fn new(id: EntityId, pos: Vec2, kind: OrbKind, rng: &mut impl Rng) -> Self {
        let drift = Vec2::from_angle(rng.random_range(0.0..std::f32::consts::TAU)) * DRIFT_SPEED;
        let body = Body::new(pos)
            .with_motion(3.0, 0.15)
            .with_radius(kind.radius())
            .with_velocity(drift);
        Self {
            id,
            kind,
            body,
            attraction_radius: ATTRACTION_RADIUS,
            collected: false,
        }
    }

    /// Drift or home in on the player. Returns the reward once collected.
    pub fn update(
        &mut self,
        ctx: &SimContext,
        player: &Body,
        obstacles: &[Obstacle],
    ) -> Option<OrbKind> {
        if self.collected {
            return None;
        }

        if self.body.pos.distance(player.pos) < self.attraction_radius {
            self.body
                .apply_force(seek(&self.body, player.pos, true) * SEEK_WEIGHT);
        }
        if !obstacles.is_empty() {
            self.body.apply_force(avoid(&self.body, obstacles) * AVOID_WEIGHT);
        }
        self.body.integrate();

        if self.body.collides_with(player) {
            self.collected = true;
            return Some(self.kind);
        }

        self.body.wrap_edges(ctx.width(), ctx.height());
        None
    }
}

impl Agent for Orb {
    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn tag(&self) -> AgentTag {
        match self.kind {
            OrbKind::Experience(_) => AgentTag::XpOrb,
            OrbKind::Health(_) => AgentTag::HealthOrb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn orb_at(pos: Vec2, kind: OrbKind) -> Orb {
        let mut rng = Pcg32::seed_from_u64(11);
        Orb::new(EntityId(5), pos, kind, &mut rng)
    }

    #[test]
    fn test_initial_drift() {
        let orb = orb_at(Vec2::ZERO, OrbKind::Experience(5));
        assert!((orb.body.vel.length() - 2.0).abs() < 1e-5);
        assert_eq!(orb.body.radius, 8.0);
        assert_eq!(orb_at(Vec2::ZERO, OrbKind::Health(5.0)).body.radius, 10.0);
    }

    #[test]
    fn test_ignores_distant_player() {
        let ctx = SimContext::new(2000.0, 2000.0);
        let mut orb = orb_at(Vec2::new(500.0, 500.0), OrbKind::Experience(5));
        let vel = orb.body.vel;
        let player = Body::new(Vec2::new(1500.0, 500.0));
        assert!(orb.update(&ctx, &player, &[]).is_none());
        // No steering applied: pure drift
        assert_eq!(orb.body.vel, vel);
        assert_eq!(orb.body.pos, Vec2::new(500.0, 500.0) + vel);
    }

    #[test]
    fn test_homes_in_and_is_collected() {
        let ctx = SimContext::new(2000.0, 2000.0);
        let mut orb = orb_at(Vec2::new(560.0, 500.0), OrbKind::Health(12.0));
        orb.body.vel = Vec2::ZERO;
        let player = Body::new(Vec2::new(500.0, 500.0)).with_radius(20.0);

        let mut reward = None;
        for _ in 0..600 {
            reward = orb.update(&ctx, &player, &[]);
            if reward.is_some() {
                break;
            }
        }
        assert_eq!(reward, Some(OrbKind::Health(12.0)));
        assert!(orb.collected);
        // Only collected once
        assert!(orb.update(&ctx, &player, &[]).is_none());
    }
}
