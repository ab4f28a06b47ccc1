//! Game state and the spawner interface
//!
//! Everything a run needs lives here: the context, the agents, the obstacle
//! field, wave bookkeeping and the seeded RNG all randomness draws from.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentView, EntityId};
use super::context::SimContext;
use super::enemy::{Enemy, EnemyKind};
use super::obstacle::{Obstacle, ObstacleLayout};
use super::orb::{Orb, OrbKind};
use super::player::Player;
use super::projectile::Projectile;
use super::waves::WaveDirector;
use crate::settings::Settings;

/// Share of an enemy's max health restored by its health orb
const HEALTH_DROP_FRACTION: f32 = 0.1;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player died
    GameOver,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    EnemySpawned { id: EntityId, kind: EnemyKind },
    ProjectileFired { id: EntityId },
    EnemyHit { enemy: EntityId, damage: f32 },
    EnemyKilled { id: EntityId, kind: EnemyKind },
    PlayerHit { by: EntityId, damage: f32 },
    OrbCollected { id: EntityId, kind: OrbKind },
    LevelUp { level: u32 },
    WeaponUpgraded { level: u32 },
    WaveStarted { wave: u32 },
    AchievementUnlocked { level: u8 },
    GameOver { score: u64 },
}

/// Orbs left behind by a dead enemy
#[derive(Debug, Clone)]
pub struct DeathDrops {
    pub xp: Orb,
    pub health: Orb,
}

/// Aggregate counts for the debug overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCounts {
    pub enemies: usize,
    pub projectiles: usize,
    pub orbs: usize,
}

/// Everything the renderer/UI reads after a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u64,
    pub level: u32,
    pub kills: u32,
    pub player_health: f32,
    pub player_max_health: f32,
    pub achievement_pending: Option<u8>,
    /// Achievements unlocked so far
    pub achievements: usize,
    pub debug: bool,
    pub counts: AgentCounts,
    pub agents: Vec<AgentView>,
    pub obstacles: Vec<Obstacle>,
    /// Orbital blade positions
    pub orbitals: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub ctx: SimContext,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub orbs: Vec<Orb>,
    pub obstacles: Vec<Obstacle>,
    pub layout: ObstacleLayout,
    pub director: WaveDirector,
    /// Events of the last tick
    pub events: Vec<GameEvent>,
    spawn_interval_override: Option<f32>,
    next_id: u32,
}

impl GameState {
    /// New session in the menu phase
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut ctx = SimContext::new(settings.world_width, settings.world_height);
        ctx.debug = settings.debug;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ctx,
            phase: GamePhase::Menu,
            player: Player::new(EntityId(0), ctx.center()),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            orbs: Vec::new(),
            obstacles: Vec::new(),
            layout: settings.obstacles,
            director: WaveDirector::new(),
            events: Vec::new(),
            spawn_interval_override: settings.spawn_interval,
            next_id: 1,
        };
        state.reset_world();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fresh player, obstacles and wave bookkeeping; keeps the context
    fn reset_world(&mut self) {
        let id = self.next_entity_id();
        self.player = Player::new(id, self.ctx.center());
        self.enemies.clear();
        self.projectiles.clear();
        self.orbs.clear();
        self.obstacles = self
            .layout
            .generate(&mut self.rng, self.ctx.world, self.player.body.pos);
        self.director = WaveDirector::new();
        self.director.spawn_interval_override = self.spawn_interval_override;
    }

    /// Menu -> Playing
    pub fn start_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("Game started (seed {})", self.seed);
    }

    /// GameOver -> Playing with a new world
    pub fn restart(&mut self) {
        self.reset_world();
        self.start_game();
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Create an enemy of `kind` at `pos`, scaled by the current difficulty
    pub fn spawn_enemy(&mut self, pos: Vec2, kind: EnemyKind) -> EntityId {
        let id = self.next_entity_id();
        let enemy = Enemy::new(id, pos, kind, &mut self.rng)
            .with_damage_multiplier(self.director.damage_multiplier);
        log::debug!("Spawned {} enemy {} at ({:.0}, {:.0})", kind.as_str(), id, pos.x, pos.y);
        self.enemies.push(enemy);
        self.events.push(GameEvent::EnemySpawned { id, kind });
        id
    }

    /// Experience and health orbs for a dead enemy
    pub fn on_enemy_death(&mut self, enemy: &Enemy) -> DeathDrops {
        let xp_id = self.next_entity_id();
        let xp_kind = OrbKind::Experience(enemy.xp_value);
        let xp = Orb::new(xp_id, enemy.body.pos, xp_kind, &mut self.rng);
        let health_id = self.next_entity_id();
        let heal = (enemy.body.max_health * HEALTH_DROP_FRACTION).floor();
        let health = Orb::new(health_id, enemy.body.pos, OrbKind::Health(heal), &mut self.rng);
        DeathDrops { xp, health }
    }

    pub fn counts(&self) -> AgentCounts {
        AgentCounts {
            enemies: self.enemies.len(),
            projectiles: self.projectiles.len(),
            orbs: self.orbs.len(),
        }
    }

    /// Render-facing snapshot
    pub fn frame(&self) -> Frame {
        let counts = self.counts();
        let mut agents =
            Vec::with_capacity(1 + counts.enemies + counts.projectiles + counts.orbs);
        agents.push(self.player.view());
        agents.extend(self.enemies.iter().map(Agent::view));
        agents.extend(self.projectiles.iter().map(Agent::view));
        agents.extend(self.orbs.iter().map(Agent::view));

        Frame {
            phase: self.phase,
            wave: self.director.wave,
            score: self.director.score,
            level: self.player.level,
            kills: self.player.kills,
            player_health: self.player.body.health,
            player_max_health: self.player.body.max_health,
            achievement_pending: self.director.achievement_pending,
            achievements: self.director.achievement_count(),
            debug: self.ctx.debug,
            counts,
            agents,
            obstacles: self.obstacles.clone(),
            orbitals: self
                .player
                .abilities
                .iter()
                .filter_map(|a| a.orbital_position(&self.player.body))
                .collect(),
        }
    }
}
