//! Backend-free rendering
//!
//! Builds triangle lists for the two views; uploading and drawing them is up
//! to the frontend.
//! - Top-down: world space, turret at its position, enemies as circles
//! - First-person: screen space centered on the view, enemies as sprites on
//!   the horizon (y = 0)

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::{Collidable, GameState, screen_sprite};
pub use vertex::{Vertex, as_bytes, colors};

const OUTLINE_WIDTH: f32 = 3.0;
const BEAM_WIDTH: f32 = 4.0;
const AIM_WIDTH: f32 = 1.5;
const CIRCLE_SEGMENTS: u32 = 32;
/// Half-width of the first-person horizon line
const HORIZON_HALF_WIDTH: f32 = 1000.0;

/// Offset applied to the whole top-down scene while the turret shakes
fn shake_offset(state: &GameState) -> Vec2 {
    let amount = state.settings.shake_amount(state.turret.shake_ticks);
    if amount <= 0.0 {
        return Vec2::ZERO;
    }
    // Alternate direction every tick
    let sign = if state.time_ticks % 2 == 0 { 1.0 } else { -1.0 };
    Vec2::new(sign * amount * 0.1, 0.0)
}

/// Top-down view in world coordinates
pub fn top_down(state: &GameState) -> Vec<Vertex> {
    let offset = shake_offset(state);
    let mut vertices = Vec::new();

    for entry in state.enemies.alive() {
        let enemy = entry.value;
        let color = if enemy.is_dying() {
            vertex::faded(colors::ENEMY_DYING, enemy.life_fraction())
        } else {
            colors::ENEMY
        };
        vertices.extend(shapes::circle(
            enemy.position() + offset,
            state.settings.enemy_draw_size / 2.0,
            color,
            CIRCLE_SEGMENTS,
        ));
    }

    let turret = &state.turret;
    let hull: Vec<_> = turret
        .world_edges()
        .iter()
        .map(|edge| edge.translated(offset))
        .collect();
    vertices.extend(shapes::polygon_outline(&hull, OUTLINE_WIDTH, colors::TURRET));

    let origin = turret.position() + offset;
    let cannon = &state.cannon;
    if cannon.firing {
        let end = origin + turret.facing * cannon.shot_range;
        vertices.extend(shapes::beam(origin, end, BEAM_WIDTH, colors::BEAM));
    } else if cannon.charging {
        let end = origin + turret.facing * cannon.charged_range;
        let color = if cannon.target_in_range {
            colors::AIM_LOCKED
        } else {
            colors::AIM
        };
        vertices.extend(shapes::beam(origin, end, AIM_WIDTH, color));
    }

    vertices
}

/// First-person view in screen coordinates, nearest enemy drawn last
pub fn first_person(state: &GameState) -> Vec<Vertex> {
    let mut vertices = shapes::beam(
        Vec2::new(-HORIZON_HALF_WIDTH, 0.0),
        Vec2::new(HORIZON_HALF_WIDTH, 0.0),
        AIM_WIDTH,
        colors::HORIZON,
    );

    let mut visible: Vec<_> = state
        .enemies
        .alive()
        .filter_map(|entry| {
            let enemy = entry.value;
            let sprite = screen_sprite(enemy.view)?;
            let color = if enemy.is_dying() {
                vertex::faded(colors::ENEMY_DYING, enemy.life_fraction())
            } else {
                colors::ENEMY
            };
            Some((enemy.view.y, sprite, color))
        })
        .collect();
    // Far to near
    visible.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    for (_, sprite, color) in &visible {
        vertices.extend(shapes::sprite(sprite, 0.0, *color));
    }

    vertices
}
