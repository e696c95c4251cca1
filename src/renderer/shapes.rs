//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, faded};
use crate::polar_to_cartesian;
use crate::sim::{LineSegment, ScreenSprite};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let edge1 = center + polar_to_cartesian(radius, theta1);
        let edge2 = center + polar_to_cartesian(radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(edge1.x, edge1.y, color));
        vertices.push(Vertex::new(edge2.x, edge2.y, color));
    }

    vertices
}

/// Quad of the given width along a line (empty for a zero-length line)
pub fn thick_line(line: &LineSegment, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = line.direction().normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = line.p1 + perp;
    let b1 = line.p1 - perp;
    let a2 = line.p2 + perp;
    let b2 = line.p2 - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Outline of a polygon from its world-space edges
pub fn polygon_outline(edges: &[LineSegment], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    edges
        .iter()
        .flat_map(|edge| thick_line(edge, width, color))
        .collect()
}

/// Cannon shot from `origin` to `end`
pub fn beam(origin: Vec2, end: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    thick_line(&LineSegment::new(origin, end), width, color)
}

/// First-person enemy disc.
///
/// Screen x comes from the sprite, `horizon` is the screen y it sits on.
pub fn sprite(sprite: &ScreenSprite, horizon: f32, color: [f32; 4]) -> Vec<Vertex> {
    if sprite.alpha <= 0.0 {
        return Vec::new();
    }
    let color = faded(color, sprite.alpha / 255.0);
    circle(Vec2::new(sprite.x, horizon), sprite.size / 2.0, color, 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;

    #[test]
    fn test_circle_vertices_on_radius() {
        let verts = circle(Vec2::new(10.0, 0.0), 5.0, colors::ENEMY, 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 0.0]);
            let edge = Vec2::from(tri[1].position) - Vec2::new(10.0, 0.0);
            assert!((edge.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_beam_width() {
        let verts = beam(Vec2::ZERO, Vec2::new(0.0, 100.0), 4.0, colors::BEAM);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|x| (x.abs() - 2.0).abs() < 1e-5));
        assert!(beam(Vec2::ONE, Vec2::ONE, 4.0, colors::BEAM).is_empty());
    }

    #[test]
    fn test_polygon_outline_one_quad_per_edge() {
        let square = [
            LineSegment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            LineSegment::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)),
            LineSegment::new(Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)),
            LineSegment::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0)),
        ];
        assert_eq!(polygon_outline(&square, 0.1, colors::TURRET).len(), 24);
    }

    #[test]
    fn test_sprite_alpha_and_size() {
        let visible = ScreenSprite {
            x: 50.0,
            size: 40.0,
            alpha: 127.5,
        };
        let verts = sprite(&visible, -10.0, colors::ENEMY);
        assert_eq!(verts[0].position, [50.0, -10.0]);
        assert!((verts[0].color[3] - 0.5).abs() < 1e-6);
        let edge = Vec2::from(verts[1].position) - Vec2::new(50.0, -10.0);
        assert!((edge.length() - 20.0).abs() < 1e-4);

        let hidden = ScreenSprite { alpha: 0.0, ..visible };
        assert!(sprite(&hidden, 0.0, colors::ENEMY).is_empty());
    }
}
