//! Per-frame simulation tick
//!
//! Order within a tick:
//! 1. Context (resize, debug flag, clock) and phase commands
//! 2. Player, then firing
//! 3. Wave spawning
//! 4. Enemies, projectiles, orbs, abilities
//! 5. Deaths, wave progression, achievements, game over
//!
//! Forces are computed against snapshots taken before each group updates, and
//! removals happen after the group finished iterating.

use glam::Vec2;

use super::agent::EntityId;
use super::body::Body;
use super::enemy::Enemy;
use super::orb::OrbKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::FALLBACK_DT;

/// Input commands for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Measured frame delta in seconds (clamped before use)
    pub dt: f32,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
    /// Fire toward the pointer
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Debug overlay toggle
    pub toggle_debug: bool,
    /// Start / dismiss achievement / restart
    pub confirm: bool,
    /// New world size
    pub resize: Option<Vec2>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            dt: FALLBACK_DT,
            pointer: Vec2::ZERO,
            fire: false,
            pause: false,
            toggle_debug: false,
            confirm: false,
            resize: None,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if let Some(size) = input.resize {
        state.ctx.resize(size);
    }
    if input.toggle_debug {
        state.ctx.debug = !state.ctx.debug;
    }

    if input.confirm {
        confirm(state);
    }
    if input.pause {
        state.toggle_pause();
    }

    // Achievement screen holds the world like a pause
    if state.phase != GamePhase::Playing || state.director.achievement_pending.is_some() {
        return;
    }

    state.ctx.begin_frame(input.dt);
    let ctx = state.ctx;

    // === Player ===
    state.player.update(&ctx, input.pointer, &state.obstacles);
    if input.fire && state.player.fire_cooldown <= 0.0 {
        let id = state.next_entity_id();
        if let Some(projectile) = state.player.try_fire(id, input.pointer) {
            state.projectiles.push(projectile);
            state.events.push(GameEvent::ProjectileFired { id });
        }
    }

    // === Spawning ===
    if state.director.advance(ctx.dt) {
        let kind = state.director.pick_kind(&mut state.rng);
        let pos = state.director.spawn_position(&mut state.rng, ctx.world);
        state.spawn_enemy(pos, kind);
    }

    // === Enemies ===
    let peers: Vec<Body> = state.enemies.iter().map(|e| e.body).collect();
    let player_body = state.player.body;
    for enemy in &mut state.enemies {
        enemy.update(&ctx, &player_body, &peers, &state.obstacles, &mut state.rng);
        if enemy.attack(&mut state.player.body) {
            state.events.push(GameEvent::PlayerHit {
                by: enemy.id,
                damage: enemy.damage,
            });
        }
    }

    // === Projectiles ===
    for projectile in &mut state.projectiles {
        if let Some(hit) = projectile.update(&ctx, &mut state.enemies, &state.obstacles) {
            state.events.push(GameEvent::EnemyHit {
                enemy: hit.enemy,
                damage: hit.damage,
            });
        }
    }
    state.projectiles.retain(|p| !p.is_expired());

    // === Orbs ===
    let player_body = state.player.body;
    let mut rewards: Vec<(EntityId, OrbKind)> = Vec::new();
    for orb in &mut state.orbs {
        if let Some(kind) = orb.update(&ctx, &player_body, &state.obstacles) {
            rewards.push((orb.id, kind));
        }
    }
    state.orbs.retain(|o| !o.collected);
    for (id, kind) in rewards {
        collect_orb(state, id, kind);
    }

    // === Abilities ===
    let owner = state.player.body;
    for ability in &mut state.player.abilities {
        for enemy in ability.update(&ctx, &owner, &mut state.enemies) {
            state.events.push(GameEvent::EnemyHit {
                enemy,
                damage: ability.damage,
            });
        }
    }

    resolve_deaths(state);

    // === Progression ===
    if state.director.is_wave_complete(state.enemies.len()) {
        state.director.next_wave();
        state.events.push(GameEvent::WaveStarted {
            wave: state.director.wave,
        });
    }

    if let Some(level) = state.director.check_achievements(state.player.kills) {
        state.events.push(GameEvent::AchievementUnlocked { level });
    }

    if state.player.body.is_dead() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.director.score,
        });
        log::info!(
            "Game over: wave {}, score {}, {} kills",
            state.director.wave,
            state.director.score,
            state.player.kills
        );
    }
}

fn confirm(state: &mut GameState) {
    match state.phase {
        GamePhase::Menu => state.start_game(),
        GamePhase::GameOver => state.restart(),
        GamePhase::Playing => {
            if state.director.achievement_pending.take().is_some() {
                log::debug!("Achievement screen dismissed");
            }
        }
        GamePhase::Paused => {}
    }
}

fn collect_orb(state: &mut GameState, id: EntityId, kind: OrbKind) {
    match kind {
        OrbKind::Experience(xp) => {
            if state.player.add_xp(xp) > 0 {
                state.events.push(GameEvent::LevelUp {
                    level: state.player.level,
                });
            }
        }
        OrbKind::Health(amount) => state.player.body.heal(amount),
    }
    state.events.push(GameEvent::OrbCollected { id, kind });
}

/// Remove dead enemies, then drop orbs and award the kills
fn resolve_deaths(state: &mut GameState) {
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.body.is_dead());
    state.enemies = alive;

    for enemy in dead {
        let drops = state.on_enemy_death(&enemy);
        state.orbs.push(drops.xp);
        state.orbs.push(drops.health);

        state.director.record_kill(enemy.xp_value);
        if state.player.add_kill() {
            state.events.push(GameEvent::WeaponUpgraded {
                level: state.player.weapon_level,
            });
        }
        state.events.push(GameEvent::EnemyKilled {
            id: enemy.id,
            kind: enemy.kind,
        });
        log::debug!("{} enemy {} killed", enemy.kind.as_str(), enemy.id);
    }
}
