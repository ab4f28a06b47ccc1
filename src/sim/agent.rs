//! Shared agent identity and the render-facing view of an agent

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::enemy::EnemyKind;
use crate::heading;

/// Stable identifier assigned at spawn, never reused within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role tag used by the renderer for sprite/color selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentTag {
    Player,
    Enemy(EnemyKind),
    Projectile,
    XpOrb,
    HealthOrb,
}

/// Anything simulated with a kinematic body
pub trait Agent {
    fn id(&self) -> EntityId;
    fn body(&self) -> &Body;
    fn tag(&self) -> AgentTag;

    /// Snapshot for the render sink
    fn view(&self) -> AgentView {
        let body = self.body();
        AgentView {
            id: self.id(),
            tag: self.tag(),
            pos: body.pos,
            heading: heading(body.vel),
            radius: body.radius,
            health_ratio: body.health_ratio(),
        }
    }
}

/// Per-agent tick output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: EntityId,
    pub tag: AgentTag,
    pub pos: Vec2,
    /// Velocity heading (radians)
    pub heading: f32,
    pub radius: f32,
    pub health_ratio: f32,
}
