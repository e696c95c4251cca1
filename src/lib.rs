//! Turret Arena - a turret-in-the-middle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, ray casting, game state)
//! - `renderer`: Backend-free vertex generation for top-down and first-person views
//! - `settings`: Data-driven tuning, loaded from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::TAU;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Vertex count that marks a body as a circle instead of a polygon
    pub const CIRCLE_SENTINEL: u32 = 1;

    /// Draw sizes (diameters)
    pub const PLAYER_DRAW_SIZE: f32 = 35.0;
    pub const ENEMY_DRAW_SIZE: f32 = 70.0;

    /// Turret steering
    pub const MAX_TURN: f32 = TAU / 360.0 * 2.0;
    pub const TURN_ACCELERATION: f32 = TAU / 360.0 * 4.0;
    pub const TURN_DECELERATION: f32 = 0.1;

    /// Turret wheel
    pub const WHEEL_SPEED_MAX: f32 = 6.0;
    pub const WHEEL_ACCELERATION: f32 = 3.0;
    pub const WHEEL_DECELERATION: f32 = 0.07;

    /// Starting lives
    pub const PLAYER_LIVES: u8 = 5;
    /// Ticks the turret shakes after being hit
    pub const HIT_SHAKE_TICKS: u32 = 60;

    /// Cannon
    pub const MAX_CANNON_RANGE: f32 = 1000.0;
    pub const CHARGE_PER_TICK: f32 = 5.0;

    /// First-person projection
    pub const VIEW_BASE_DEPTH: f32 = 1000.0;
    pub const ENEMY_SPRITE_SIZE: f32 = 100.0;
    pub const MAX_SIGHT: f32 = 1000.0;
    pub const MAX_DISTANCE: f32 = 2200.0;

    /// Spawn band half-width for direction-based emergence
    pub const MAX_AXIS_DISTANCE: f32 = 1500.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
