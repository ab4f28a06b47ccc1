//! Dragon Orbit - a steering-driven arena shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, steering, agents, waves)
//! - `settings`: Session configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Frame delta used when the measured one is unusable (stalled tab, clock jump)
    pub const FALLBACK_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted as-is
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Distance under which arrival damping kicks in
    pub const ARRIVAL_RADIUS: f32 = 100.0;

    /// Wander circle projected this far ahead of the heading
    pub const WANDER_DISTANCE: f32 = 50.0;
    pub const WANDER_RADIUS: f32 = 30.0;
    /// Maximum wander angle change per tick (radians)
    pub const WANDER_CHANGE: f32 = 0.3;
    /// Below this speed wander uses its own angle as heading
    pub const WANDER_MIN_SPEED: f32 = 0.1;

    /// Distance from a world edge where the boundary force engages
    pub const BOUNDARY_MARGIN: f32 = 25.0;

    /// Obstacle lookahead scales (multiples of velocity)
    pub const AHEAD_FAR: f32 = 30.0;
    pub const AHEAD_NEAR: f32 = 15.0;

    /// Flocking defaults
    pub const DEFAULT_SEPARATION: f32 = 50.0;
    pub const DEFAULT_NEIGHBOR_RADIUS: f32 = 100.0;

    /// Default pursue prediction horizon (ticks)
    pub const DEFAULT_PREDICTION_FRAMES: f32 = 10.0;

    /// Default world size when none is configured
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;
}

/// Rescale `v` to `len`, keeping its direction. Zero stays zero.
#[inline]
pub fn with_length(v: Vec2, len: f32) -> Vec2 {
    v.normalize_or_zero() * len
}

/// Heading angle of a vector (radians, 0 = +x)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_length_keeps_direction() {
        let v = with_length(Vec2::new(3.0, 4.0), 10.0);
        assert!((v - Vec2::new(6.0, 8.0)).length() < 1e-5);
    }

    #[test]
    fn test_with_length_zero_vector() {
        assert_eq!(with_length(Vec2::ZERO, 5.0), Vec2::ZERO);
    }

    #[test]
    fn test_heading() {
        assert!((heading(Vec2::new(0.0, 1.0)) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
