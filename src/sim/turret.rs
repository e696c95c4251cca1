//! The player's turret
//!
//! Sits near the arena center, turns with an eased turn rate and rolls along
//! its facing. The facing vector is kept unit length by `rotated`, which the
//! projection and cannon code rely on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Collidable, Shape, ShapeError};
use super::vector::{VectorExt, lerp};
use crate::consts::*;
use crate::settings::Settings;

/// Hexagonal turret hull
const TURRET_EDGES: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub body: Body,
    /// Unit facing direction
    pub facing: Vec2,
    /// Radians per tick
    pub turn_rate: f32,
    /// Units per tick along `facing`
    pub wheel_speed: f32,
    pub lives: u8,
    /// Ticks of hit shake remaining
    pub shake_ticks: u32,
}

impl Turret {
    pub fn new(position: Vec2, settings: &Settings) -> Result<Self, ShapeError> {
        Ok(Self {
            body: Body::with_vertex_count(position, TURRET_EDGES, settings.player_draw_size / 2.0)?,
            facing: Vec2::Y,
            turn_rate: 0.0,
            wheel_speed: 0.0,
            lives: settings.player_lives,
            shake_ticks: 0,
        })
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    /// Update turn rate from input and rotate the facing
    pub fn steer(&mut self, turn_left: bool, turn_right: bool, dt: f32, settings: &Settings) {
        if turn_left {
            self.turn_rate += settings.turn_acceleration * dt;
        }
        if turn_right {
            self.turn_rate -= settings.turn_acceleration * dt;
        }
        self.turn_rate = self.turn_rate.clamp(-MAX_TURN, MAX_TURN);

        if !turn_left && !turn_right {
            self.turn_rate = lerp(self.turn_rate, 0.0, TURN_DECELERATION);
        }

        self.facing = self.facing.rotated(self.turn_rate);
    }

    /// Update wheel speed from input and roll along the facing
    pub fn drive(&mut self, forward: bool, backward: bool, dt: f32, settings: &Settings) {
        if backward {
            self.wheel_speed -= settings.wheel_acceleration * dt;
        }
        if forward {
            self.wheel_speed += settings.wheel_acceleration * dt;
        }
        self.wheel_speed = self.wheel_speed.clamp(-WHEEL_SPEED_MAX, WHEEL_SPEED_MAX);

        if !forward && !backward {
            self.wheel_speed = lerp(self.wheel_speed, 0.0, WHEEL_DECELERATION);
        }

        self.body.translate(self.facing * self.wheel_speed);
    }

    /// Take a hit from an enemy
    pub fn on_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.shake_ticks = HIT_SHAKE_TICKS;
        log::info!("Turret hit, {} lives left", self.lives);
    }

    /// Per-tick housekeeping
    pub fn decay_shake(&mut self) {
        self.shake_ticks = self.shake_ticks.saturating_sub(1);
    }
}

impl Collidable for Turret {
    #[inline]
    fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    fn shape(&self) -> &Shape {
        self.body.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turret() -> Turret {
        Turret::new(Vec2::ZERO, &Settings::default()).unwrap()
    }

    #[test]
    fn test_new_turret_faces_up_with_hexagon_hull() {
        let t = turret();
        assert_eq!(t.facing, Vec2::Y);
        assert_eq!(t.world_edges().len(), 6);
        assert_eq!(t.lives, PLAYER_LIVES);
    }

    #[test]
    fn test_turn_rate_is_clamped_and_facing_stays_unit() {
        let settings = Settings::default();
        let mut t = turret();
        for _ in 0..600 {
            t.steer(true, false, SIM_DT, &settings);
            assert!(t.turn_rate <= MAX_TURN);
            assert!((t.facing.length() - 1.0).abs() < 1e-4);
        }
        assert!((t.turn_rate - MAX_TURN).abs() < 1e-6);
    }

    #[test]
    fn test_turn_eases_out_without_input() {
        let settings = Settings::default();
        let mut t = turret();
        t.turn_rate = MAX_TURN;
        for _ in 0..100 {
            t.steer(false, false, SIM_DT, &settings);
        }
        assert!(t.turn_rate.abs() < MAX_TURN * 0.001);
    }

    #[test]
    fn test_left_turn_is_counter_clockwise() {
        let settings = Settings::default();
        let mut t = turret();
        t.steer(true, false, SIM_DT, &settings);
        // Rotating +y counter-clockwise moves toward -x
        assert!(t.facing.x < 0.0);
    }

    #[test]
    fn test_drive_moves_along_facing() {
        let settings = Settings::default();
        let mut t = turret();
        for _ in 0..10 {
            t.drive(true, false, SIM_DT, &settings);
        }
        assert!(t.position().y > 0.0);
        assert!(t.position().x.abs() < 1e-5);

        for _ in 0..1000 {
            t.drive(true, false, 1.0, &settings);
        }
        assert_eq!(t.wheel_speed, WHEEL_SPEED_MAX);
    }

    #[test]
    fn test_on_hit() {
        let mut t = turret();
        t.on_hit();
        assert_eq!(t.lives, PLAYER_LIVES - 1);
        assert_eq!(t.shake_ticks, HIT_SHAKE_TICKS);
        for _ in 0..HIT_SHAKE_TICKS + 5 {
            t.decay_shake();
        }
        assert_eq!(t.shake_ticks, 0);
    }
}
