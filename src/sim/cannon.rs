//! Charged cannon
//!
//! Holding fire (in first-person mode) charges the shot range; every charging
//! tick runs a preview ray query so the HUD can show whether something is in
//! the line of fire. Releasing fires along the same ray and reports the
//! nearest body it crosses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Collidable;
use super::raycast::{RayHit, find_nearest_hit};
use crate::settings::Settings;

/// A resolved shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot<C> {
    pub origin: Vec2,
    pub end: Vec2,
    pub range: f32,
    pub hit: Option<RayHit<C>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cannon {
    pub charging: bool,
    /// Range accumulated by the current charge
    pub charged_range: f32,
    /// Range of the last shot fired (for drawing the beam)
    pub shot_range: f32,
    /// True while the last shot is still being fired; steering is locked
    pub firing: bool,
    /// Seconds left on the current shot
    pub fire_timer: f32,
    /// Whether the preview ray currently crosses a target
    pub target_in_range: bool,
}

impl Cannon {
    /// Advance one tick.
    ///
    /// `candidates` is the live target snapshot; it is only queried while
    /// charging or on release. Returns the shot when one is fired.
    #[allow(clippy::too_many_arguments)]
    pub fn update<I, C>(
        &mut self,
        fire_held: bool,
        first_person: bool,
        origin: Vec2,
        facing: Vec2,
        candidates: I,
        dt: f32,
        settings: &Settings,
    ) -> Option<Shot<C>>
    where
        I: IntoIterator<Item = C>,
        C: Collidable,
    {
        self.target_in_range = false;

        if self.fire_timer > 0.0 {
            self.fire_timer -= dt;
        } else {
            self.firing = false;
        }

        if fire_held && first_person {
            if !self.firing {
                if self.charging {
                    self.charge(origin, facing, candidates, settings);
                } else {
                    self.charging = true;
                }
            }
            None
        } else if self.charging {
            self.firing = true;
            self.fire_timer = self.charged_range / settings.max_cannon_range;
            Some(self.fire(origin, facing, candidates))
        } else {
            None
        }
    }

    /// Grow the range and refresh the preview
    fn charge<I, C>(&mut self, origin: Vec2, facing: Vec2, candidates: I, settings: &Settings)
    where
        I: IntoIterator<Item = C>,
        C: Collidable,
    {
        self.charged_range =
            (self.charged_range + settings.charge_per_tick).min(settings.max_cannon_range);
        let end = origin + facing * self.charged_range;
        self.target_in_range = find_nearest_hit(origin, end, candidates).is_some();
    }

    /// Release the charge along the facing
    fn fire<I, C>(&mut self, origin: Vec2, facing: Vec2, candidates: I) -> Shot<C>
    where
        I: IntoIterator<Item = C>,
        C: Collidable,
    {
        let range = self.charged_range;
        let end = origin + facing * range;
        let hit = find_nearest_hit(origin, end, candidates);
        log::debug!(
            "Cannon fired: range={range:.0}, hit={}",
            hit.as_ref().map_or("none".to_string(), |h| h.point.to_string())
        );

        self.shot_range = range;
        self.charging = false;
        self.charged_range = 0.0;

        Shot {
            origin,
            end,
            range,
            hit,
        }
    }
}
