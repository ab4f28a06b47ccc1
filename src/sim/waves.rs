//! Wave pacing, weighted enemy selection, scoring and achievements
//!
//! Pure bookkeeping: the director decides *when* and *what* to spawn, the game
//! state creates the agents.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;

/// Enemies spawn this far outside the world edge
pub const SPAWN_OFFSET: f32 = 20.0;
/// Minimum seconds a wave lasts
pub const WAVE_DURATION: f32 = 30.0;
const FIRST_WAVE_ENEMIES: u32 = 5;
const BASE_SPAWN_INTERVAL: f32 = 1.5;
const MIN_SPAWN_INTERVAL: f32 = 0.5;
/// Weight added to fast and tank enemies every wave
const HARD_WEIGHT_STEP: u32 = 2;
const SCORE_PER_XP: u64 = 10;

/// Kill thresholds and the enemy damage multiplier each one unlocks
pub const ACHIEVEMENTS: [(u32, f32); 3] = [(10, 1.2), (25, 1.5), (50, 2.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub kind: EnemyKind,
    pub weight: u32,
}

fn default_weights() -> Vec<SpawnWeight> {
    vec![
        SpawnWeight { kind: EnemyKind::Basic, weight: 50 },
        SpawnWeight { kind: EnemyKind::Fast, weight: 25 },
        SpawnWeight { kind: EnemyKind::Tank, weight: 15 },
        SpawnWeight { kind: EnemyKind::Wanderer, weight: 10 },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Current wave (1-based)
    pub wave: u32,
    pub enemies_per_wave: u32,
    pub spawned_this_wave: u32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Fixed interval overriding the per-wave one (debug tuning)
    pub spawn_interval_override: Option<f32>,
    /// Seconds until the next spawn is allowed
    spawn_timer: f32,
    /// Seconds since the wave started
    pub wave_elapsed: f32,
    pub weights: Vec<SpawnWeight>,
    pub score: u64,
    pub enemies_killed: u32,
    pub achievements: [bool; 3],
    /// Achievement level waiting for the player's acknowledgement
    pub achievement_pending: Option<u8>,
    pub damage_multiplier: f32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            wave: 1,
            enemies_per_wave: FIRST_WAVE_ENEMIES,
            spawned_this_wave: 0,
            spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_interval_override: None,
            spawn_timer: 0.0,
            wave_elapsed: 0.0,
            weights: default_weights(),
            score: 0,
            enemies_killed: 0,
            achievements: [false; 3],
            achievement_pending: None,
            damage_multiplier: 1.0,
        }
    }
}

impl WaveDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance wave timers; returns true when an enemy should spawn now
    pub fn advance(&mut self, dt: f32) -> bool {
        self.wave_elapsed += dt;
        self.spawn_timer -= dt;

        if self.spawn_timer <= 0.0 && self.spawned_this_wave < self.enemies_per_wave {
            self.spawn_timer = self.spawn_interval_override.unwrap_or(self.spawn_interval);
            self.spawned_this_wave += 1;
            return true;
        }
        false
    }

    /// Weighted random enemy kind
    pub fn pick_kind(&self, rng: &mut impl Rng) -> EnemyKind {
        let total: u32 = self.weights.iter().map(|w| w.weight).sum();
        if total == 0 {
            return EnemyKind::Basic;
        }
        let mut roll = rng.random_range(0..total);
        for entry in &self.weights {
            if roll < entry.weight {
                return entry.kind;
            }
            roll -= entry.weight;
        }
        EnemyKind::Basic
    }

    /// Random point just outside one of the four world edges
    pub fn spawn_position(&self, rng: &mut impl Rng, world: Vec2) -> Vec2 {
        let along_x = rng.random::<f32>() * world.x;
        let along_y = rng.random::<f32>() * world.y;
        match rng.random_range(0..4) {
            0 => Vec2::new(along_x, -SPAWN_OFFSET),
            1 => Vec2::new(world.x + SPAWN_OFFSET, along_y),
            2 => Vec2::new(along_x, world.y + SPAWN_OFFSET),
            _ => Vec2::new(-SPAWN_OFFSET, along_y),
        }
    }

    /// A wave ends once everything spawned is dead and the minimum duration passed
    pub fn is_wave_complete(&self, alive_enemies: usize) -> bool {
        alive_enemies == 0
            && self.spawned_this_wave >= self.enemies_per_wave
            && self.wave_elapsed >= WAVE_DURATION
    }

    pub fn next_wave(&mut self) {
        self.wave += 1;
        self.enemies_per_wave = 20 + self.wave * 5;
        self.spawned_this_wave = 0;
        self.spawn_timer = 0.0;
        self.wave_elapsed = 0.0;
        self.spawn_interval =
            (BASE_SPAWN_INTERVAL - self.wave as f32 * 0.05).max(MIN_SPAWN_INTERVAL);

        for entry in &mut self.weights {
            if matches!(entry.kind, EnemyKind::Fast | EnemyKind::Tank) {
                entry.weight += HARD_WEIGHT_STEP;
            }
        }
        log::info!(
            "Wave {} begins: {} enemies, one every {:.2}s",
            self.wave,
            self.enemies_per_wave,
            self.spawn_interval
        );
    }

    pub fn record_kill(&mut self, xp_value: u32) {
        self.enemies_killed += 1;
        self.score += xp_value as u64 * SCORE_PER_XP;
    }

    /// Unlock achievements reached by `player_kills`; returns the highest new level
    pub fn check_achievements(&mut self, player_kills: u32) -> Option<u8> {
        let mut unlocked = None;
        for (i, &(threshold, multiplier)) in ACHIEVEMENTS.iter().enumerate() {
            if !self.achievements[i] && player_kills >= threshold {
                self.achievements[i] = true;
                self.damage_multiplier = multiplier;
                unlocked = Some(i as u8 + 1);
            }
        }
        if let Some(level) = unlocked {
            self.achievement_pending = Some(level);
            log::info!(
                "Achievement {} unlocked, enemy damage x{}",
                level,
                self.damage_multiplier
            );
        }
        unlocked
    }

    pub fn achievement_count(&self) -> usize {
        self.achievements.iter().filter(|a| **a).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_spawn_is_immediate_then_paced() {
        let mut director = WaveDirector::new();
        assert!(director.advance(0.016));
        assert!(!director.advance(1.0));
        assert!(director.advance(0.6));
        assert_eq!(director.spawned_this_wave, 2);
    }

    #[test]
    fn test_spawn_stops_at_wave_quota() {
        let mut director = WaveDirector::new();
        let spawned = (0..100).filter(|_| director.advance(2.0)).count();
        assert_eq!(spawned, 5);
    }

    #[test]
    fn test_spawn_interval_override() {
        let mut director = WaveDirector::new();
        director.spawn_interval_override = Some(0.1);
        assert!(director.advance(0.016));
        assert!(director.advance(0.1));
    }

    #[test]
    fn test_wave_completion_requires_duration() {
        let mut director = WaveDirector::new();
        director.spawned_this_wave = director.enemies_per_wave;
        director.wave_elapsed = 10.0;
        assert!(!director.is_wave_complete(0));
        director.wave_elapsed = 30.0;
        assert!(director.is_wave_complete(0));
        assert!(!director.is_wave_complete(1));
    }

    #[test]
    fn test_next_wave_scaling() {
        let mut director = WaveDirector::new();
        director.next_wave();
        assert_eq!(director.wave, 2);
        assert_eq!(director.enemies_per_wave, 30);
        assert!((director.spawn_interval - 1.4).abs() < 1e-6);
        let fast = director.weights.iter().find(|w| w.kind == EnemyKind::Fast).unwrap();
        assert_eq!(fast.weight, 27);
        let basic = director.weights.iter().find(|w| w.kind == EnemyKind::Basic).unwrap();
        assert_eq!(basic.weight, 50);

        for _ in 0..40 {
            director.next_wave();
        }
        assert_eq!(director.spawn_interval, 0.5);
    }

    #[test]
    fn test_pick_kind_follows_weights() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let director = WaveDirector::new();
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let kind = director.pick_kind(&mut rng);
            let idx = EnemyKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }
        // basic ~50%, wanderer ~10%
        assert!((4500..5500).contains(&counts[0]));
        assert!((700..1300).contains(&counts[3]));
    }

    #[test]
    fn test_pick_kind_single_weight() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut director = WaveDirector::new();
        director.weights = vec![SpawnWeight { kind: EnemyKind::Tank, weight: 1 }];
        assert_eq!(director.pick_kind(&mut rng), EnemyKind::Tank);
    }

    #[test]
    fn test_spawn_position_outside_world() {
        let mut rng = Pcg32::seed_from_u64(8);
        let director = WaveDirector::new();
        let world = Vec2::new(800.0, 600.0);
        for _ in 0..200 {
            let pos = director.spawn_position(&mut rng, world);
            let outside = pos.x < 0.0 || pos.y < 0.0 || pos.x > world.x || pos.y > world.y;
            assert!(outside, "{pos:?} is inside the world");
        }
    }

    #[test]
    fn test_score_and_kills() {
        let mut director = WaveDirector::new();
        director.record_kill(5);
        director.record_kill(5);
        assert_eq!(director.enemies_killed, 2);
        assert_eq!(director.score, 100);
    }

    #[test]
    fn test_achievements_unlock_once() {
        let mut director = WaveDirector::new();
        assert_eq!(director.check_achievements(9), None);
        assert_eq!(director.check_achievements(10), Some(1));
        assert_eq!(director.damage_multiplier, 1.2);
        director.achievement_pending = None;
        assert_eq!(director.check_achievements(12), None);

        // Jumping past two thresholds reports the highest
        assert_eq!(director.check_achievements(60), Some(3));
        assert_eq!(director.damage_multiplier, 2.0);
        assert_eq!(director.achievement_count(), 3);
    }
}
