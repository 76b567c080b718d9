//! Wave Defender - a wave-survival arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemies, weapons, collisions, progression)
//! - `settings`: Run configuration loaded from JSON
//! - `input`: Key bindings mapped to per-actor intents
//! - `web`: Browser boundary (wasm32 only)

pub mod input;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Action, Binding, InputMap, InputState};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds (~16.67)
    pub const TICK_MS: f64 = 1000.0 / TICKS_PER_SECOND;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (y grows downward)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Enemies whose bottom edge reaches this line hit the players
    pub const DANGER_LINE: f32 = WORLD_HEIGHT - 50.0;
    /// Drop applied once each time an enemy bounces off a side wall
    pub const STEP_DOWN: f32 = 20.0;

    /// Player ship defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_HEALTH: f32 = 3.0;
    pub const PLAYER_MAX_SHIELD: f32 = 3.0;
    /// Gap between the ship and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    pub const MAX_WEAPONS: usize = 5;
    /// Supported number of simultaneous players
    pub const MAX_PLAYERS: usize = 2;

    /// Enemy grid layout
    pub const GRID_CELL_WIDTH: f32 = 60.0;
    pub const GRID_CELL_HEIGHT: f32 = 50.0;
    pub const GRID_TOP: f32 = 50.0;
    /// Milestone boss spawn height
    pub const BOSS_SPAWN_Y: f32 = 80.0;

    /// Enemy projectile defaults
    pub const ENEMY_PROJECTILE_SIZE: f32 = 10.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 3.0;

    /// Explosions reach full radius after this many ticks
    pub const EXPLOSION_GROWTH_TICKS: u32 = 10;
    /// Delay between a jumper leaving the ground and landing
    pub const JUMP_AIRTIME_MS: f64 = 500.0;
}

/// Convert a duration in milliseconds to whole simulation ticks (at least one)
#[inline]
pub fn ms_to_ticks(ms: f64) -> u64 {
    ((ms * consts::TICKS_PER_SECOND / 1000.0).round() as u64).max(1)
}

/// Unit vector for an angle in radians (0 = +x, y grows downward)
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(500.0), 30);
        assert_eq!(ms_to_ticks(1000.0), 60);
        assert_eq!(ms_to_ticks(1.0), 1);
        assert_eq!(ms_to_ticks(0.0), 1);
    }

    #[test]
    fn test_direction() {
        let d = direction(std::f32::consts::FRAC_PI_2);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }
}
