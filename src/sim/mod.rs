//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed and the same inputs a
//! run replays exactly:
//! - Seeded RNG only
//! - Frame deltas clamped before use
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod ability;
pub mod agent;
pub mod body;
pub mod context;
pub mod enemy;
pub mod obstacle;
pub mod orb;
pub mod player;
pub mod projectile;
pub mod state;
pub mod steering;
pub mod tick;
pub mod waves;

pub use ability::{Ability, AbilityKind};
pub use agent::{Agent, AgentTag, AgentView, EntityId};
pub use body::Body;
pub use context::{SimContext, clamp_dt};
pub use enemy::{BehaviorState, Enemy, EnemyKind, EnemyProfile};
pub use obstacle::{Obstacle, ObstacleLayout, avoid, avoid_radius, nearest_obstacle};
pub use orb::{Orb, OrbKind};
pub use player::Player;
pub use projectile::{Projectile, ProjectileHit};
pub use state::{AgentCounts, DeathDrops, Frame, GameEvent, GamePhase, GameState};
pub use steering::{
    FlockWeights, Target, Wander, align, boundaries, cohesion, evade, flee, flock, pursue,
    seek, separate,
};
pub use tick::{TickInput, tick};
pub use waves::WaveDirector;
