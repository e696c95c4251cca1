//! Enemies
//!
//! Every enemy is a circle that homes in on the turret. Kinds differ in
//! thrust, and two have a twist: zigzaggers veer off their heading and flip
//! sides every few seconds, warpers periodically jump toward the turret.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use super::body::{Body, Collidable, Shape, ShapeError};
use super::vector::{VectorExt, lerp};
use crate::consts::{CIRCLE_SENTINEL, TURN_DECELERATION};
use crate::settings::Settings;

/// Seconds an enemy spends dying before it is removed
pub const DYING_TIME: f32 = 2.0;
/// Ticks between zigzag flips
pub const ZIGZAG_FLIP_TICKS: u32 = 180;
/// Heading offset of a zigzagging enemy
pub const ZIGZAG_ANGLE: f32 = FRAC_PI_4 * 0.9;
/// Ticks between warp jumps
pub const WARP_INTERVAL_TICKS: u32 = 300;
pub const WARP_DISTANCE: f32 = 100.0;
/// Detection level that triggers a ping
pub const DETECTION_THRESHOLD: f32 = 5.0;
/// Detection gained per second at unit distance
pub const DETECTION_RATE: f32 = 2000.0;

/// Where an enemy is drawn before the first perception pass
pub const UNSEEN_VIEW: Vec2 = Vec2::new(2000.0, 2000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Easy,
    Moderate,
    Hard,
    Zigzag,
    Warp,
    SuperFast,
}

impl EnemyKind {
    /// Acceleration applied toward the turret each tick
    pub fn thrust(self) -> f32 {
        match self {
            EnemyKind::Easy => 5.0,
            EnemyKind::Moderate => 7.0,
            EnemyKind::Hard => 9.0,
            EnemyKind::Zigzag => 10.0,
            EnemyKind::Warp => 2.0,
            EnemyKind::SuperFast => 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    Alive,
    /// Shot down; still drawn until the timer runs out
    Dying { remaining: f32 },
}

/// Something that happened to an enemy during its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyUpdate {
    /// Rammed the turret
    Contact,
    /// Detection crossed the threshold (blink + sound)
    Pinged,
    /// Finished dying
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub velocity: Vec2,
    /// Position in the turret's view frame, refreshed by perception
    pub view: Vec2,
    zigzag_ticks: u32,
    zigzag_left: bool,
    warp_ticks: u32,
    detection: f32,
}

impl Enemy {
    pub fn new(position: Vec2, kind: EnemyKind, settings: &Settings) -> Result<Self, ShapeError> {
        Ok(Self {
            body: Body::with_vertex_count(
                position,
                CIRCLE_SENTINEL,
                settings.enemy_draw_size / 2.0,
            )?,
            kind,
            state: EnemyState::Alive,
            velocity: Vec2::ZERO,
            view: UNSEEN_VIEW,
            zigzag_ticks: ZIGZAG_FLIP_TICKS,
            zigzag_left: false,
            warp_ticks: 0,
            detection: 0.0,
        })
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        matches!(self.state, EnemyState::Dying { .. })
    }

    /// Start dying. Returns false if already dying.
    pub fn make_dying(&mut self) -> bool {
        if self.is_dying() {
            return false;
        }
        self.state = EnemyState::Dying {
            remaining: DYING_TIME,
        };
        true
    }

    /// Fraction of the dying animation left (1 when alive)
    pub fn life_fraction(&self) -> f32 {
        match self.state {
            EnemyState::Alive => 1.0,
            EnemyState::Dying { remaining } => (remaining / DYING_TIME).clamp(0.0, 1.0),
        }
    }

    /// Advance one tick toward the turret
    pub fn update(
        &mut self,
        turret_pos: Vec2,
        dt: f32,
        settings: &Settings,
    ) -> Option<EnemyUpdate> {
        if let EnemyState::Dying { remaining } = &mut self.state {
            *remaining -= dt;
            return (*remaining <= 0.0).then_some(EnemyUpdate::Expired);
        }

        let distance = (turret_pos - self.body.position).length();
        if distance <= (settings.player_draw_size + settings.enemy_draw_size) / 2.0 {
            return Some(EnemyUpdate::Contact);
        }

        if self.zigzag_ticks > 0 {
            self.zigzag_ticks -= 1;
        } else {
            self.zigzag_ticks = ZIGZAG_FLIP_TICKS;
            self.zigzag_left = !self.zigzag_left;
        }

        if self.kind == EnemyKind::Warp {
            self.warp_ticks += 1;
            if self.warp_ticks == WARP_INTERVAL_TICKS {
                self.warp(turret_pos);
                self.warp_ticks = 0;
            }
        }

        self.thrust_toward(turret_pos, dt);
        self.velocity = lerp(self.velocity, Vec2::ZERO, TURN_DECELERATION);

        let distance = (turret_pos - self.body.position).length().max(1.0);
        self.detection += dt * DETECTION_RATE / distance;
        if self.detection > DETECTION_THRESHOLD {
            self.detection = 0.0;
            return Some(EnemyUpdate::Pinged);
        }
        None
    }

    fn thrust_toward(&mut self, turret_pos: Vec2, dt: f32) {
        let to_turret = turret_pos - self.body.position;
        if to_turret == Vec2::ZERO {
            return;
        }
        let heading = match self.kind {
            EnemyKind::Zigzag if self.zigzag_left => to_turret.rotated(ZIGZAG_ANGLE),
            EnemyKind::Zigzag => to_turret.rotated(-ZIGZAG_ANGLE),
            _ => to_turret.unit(),
        };
        self.velocity += heading * self.kind.thrust();
        self.body.translate(self.velocity * dt);
    }

    fn warp(&mut self, turret_pos: Vec2) {
        let to_turret = turret_pos - self.body.position;
        if to_turret != Vec2::ZERO {
            self.body.translate(to_turret.unit() * WARP_DISTANCE);
            log::trace!("Warp enemy jumped to {}", self.body.position);
        }
    }
}

impl Collidable for Enemy {
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
    use crate::consts::SIM_DT;

    fn enemy(kind: EnemyKind, x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), kind, &Settings::default()).unwrap()
    }

    #[test]
    fn test_enemies_are_circles() {
        let e = enemy(EnemyKind::Easy, 0.0, 500.0);
        assert!(e.is_circle());
        assert_eq!(e.view, UNSEEN_VIEW);
    }

    #[test]
    fn test_homes_in_on_turret() {
        let settings = Settings::default();
        let mut e = enemy(EnemyKind::Hard, 0.0, 500.0);
        let start = e.position().length();
        for _ in 0..30 {
            e.update(Vec2::ZERO, SIM_DT, &settings);
        }
        assert!(e.position().length() < start);
        assert!(e.position().x.abs() < 1e-3);
    }

    #[test]
    fn test_zigzag_veers_off_axis() {
        let settings = Settings::default();
        let mut e = enemy(EnemyKind::Zigzag, 0.0, 800.0);
        for _ in 0..30 {
            e.update(Vec2::ZERO, SIM_DT, &settings);
        }
        assert!(e.position().x.abs() > 1.0);
    }

    #[test]
    fn test_warp_jumps_forward() {
        let settings = Settings::default();
        let mut warper = enemy(EnemyKind::Warp, 0.0, 1400.0);
        for _ in 0..WARP_INTERVAL_TICKS {
            warper.update(Vec2::ZERO, SIM_DT, &settings);
        }
        // Thrust alone covers just under 100 units in this time
        assert!(warper.position().y < 1400.0 - WARP_DISTANCE - 50.0);
        assert!(warper.position().y > 1400.0 - WARP_DISTANCE - 150.0);
    }

    #[test]
    fn test_contact_with_turret() {
        let settings = Settings::default();
        let mut e = enemy(EnemyKind::Easy, 0.0, 50.0);
        assert_eq!(e.update(Vec2::ZERO, SIM_DT, &settings), Some(EnemyUpdate::Contact));
    }

    #[test]
    fn test_dying_expires_after_timer() {
        let settings = Settings::default();
        let mut e = enemy(EnemyKind::Easy, 0.0, 900.0);
        assert!(e.make_dying());
        assert!(!e.make_dying());
        let pos = e.position();

        let mut ticks = 0;
        while e.update(Vec2::ZERO, SIM_DT, &settings) != Some(EnemyUpdate::Expired) {
            ticks += 1;
            assert!(ticks < 200);
        }
        assert!(ticks >= 115);
        // Dying enemies stop moving
        assert_eq!(e.position(), pos);
    }

    #[test]
    fn test_close_enemies_ping_sooner() {
        let settings = Settings::default();
        let ticks_to_ping = |y: f32| {
            // Zero thrust difference: compare pings before the enemy moves far
            let mut e = enemy(EnemyKind::Warp, 0.0, y);
            (1..10_000)
                .find(|_| e.update(Vec2::ZERO, SIM_DT, &settings) == Some(EnemyUpdate::Pinged))
                .unwrap()
        };
        assert!(ticks_to_ping(300.0) < ticks_to_ping(1200.0));
    }
}
