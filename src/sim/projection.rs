//! Point projection and first-person view math
//!
//! The turret perceives the world in its own frame: `x` is the signed offset
//! to the right of the facing axis, `y` the signed distance ahead of it.
//! From that view position we derive where an enemy sprite lands on screen
//! and where its sound emitter sits.

use glam::{Vec2, Vec3};

use super::line::LineSegment;
use super::vector::{VectorExt, lerp};
use crate::consts::{ENEMY_SPRITE_SIZE, MAX_DISTANCE, MAX_SIGHT, VIEW_BASE_DEPTH};

/// Closest point to `p` on the infinite line through `line`.
///
/// Panics if the line's endpoints coincide.
pub fn project_point_onto_line(p: Vec2, line: &LineSegment) -> Vec2 {
    let sqr_len = line.sqr_length();
    assert!(
        sqr_len > 0.0,
        "cannot project onto a degenerate line at {}",
        line.p1
    );
    let dir = line.direction();
    line.p1 + dir * ((p - line.p1).dot(dir) / sqr_len)
}

/// Position of `target` in the observer's view frame.
///
/// `facing` must be non-zero; the turret keeps it unit length.
pub fn view_position(observer: Vec2, facing: Vec2, target: Vec2) -> Vec2 {
    // Lateral axis through the observer, pointing to the facing's left
    let lateral = Vec2::new(-facing.y, facing.x);
    let axis = LineSegment::new(observer, observer + lateral);
    let on_axis = project_point_onto_line(target, &axis);

    let mut view = Vec2::new(
        (on_axis - observer).length(),
        (target - on_axis).length(),
    );

    let to_target = target - observer;
    if to_target.dot(facing) < 0.0 {
        view.y = -view.y;
    }
    if to_target.cross(facing) < 0.0 {
        view.x = -view.x;
    }
    view
}

/// Where and how large an enemy appears in the first-person view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSprite {
    /// Horizontal screen offset from the view center
    pub x: f32,
    /// Sprite diameter
    pub size: f32,
    /// Opacity, 0-255
    pub alpha: f32,
}

/// Perspective-project a view position.
///
/// Returns `None` for anything at or behind the observer.
pub fn screen_sprite(view: Vec2) -> Option<ScreenSprite> {
    if view.y <= 0.0 {
        return None;
    }

    let alpha = if view.y.abs() < MAX_SIGHT {
        lerp(0.0, 255.0, (view.y - MAX_SIGHT).abs() / MAX_DISTANCE)
    } else {
        0.0
    };

    Some(ScreenSprite {
        x: view.x * VIEW_BASE_DEPTH / view.y,
        size: ENEMY_SPRITE_SIZE * VIEW_BASE_DEPTH / view.length(),
        alpha,
    })
}

/// 3D position for a positional sound source.
///
/// The view plane maps onto the listener's horizontal plane.
#[inline]
pub fn emitter_position(view: Vec2, stereo_reversed: bool) -> Vec3 {
    let x = if stereo_reversed { -view.x } else { view.x };
    Vec3::new(x, 0.0, view.y)
}
