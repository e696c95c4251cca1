//! Segment, ray and circle intersection
//!
//! Every test here uses the same interval policy: a hit requires the
//! parameter along *each* shape to lie strictly inside `(0, 1)`. Touching at
//! an endpoint, grazing a circle tangentially, and parallel or collinear
//! configurations all report no intersection.

use glam::Vec2;

use super::line::LineSegment;
use super::vector::VectorExt;

/// Determinant magnitude below which two directions count as parallel
pub const PARALLEL_EPSILON: f32 = f32::EPSILON;

#[inline]
fn strictly_inside(t: f32) -> bool {
    t > 0.0 && t < 1.0
}

/// Parameters `(s, t)` where segment `p1→p2` at `s` meets segment `p3→p4` at `t`.
///
/// Returns `None` for parallel segments. No bounds are checked.
fn solve(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<(f32, f32)> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let det = d1.cross(d2);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let offset = p3 - p1;
    let s = offset.cross(d2) / det;
    let t = offset.cross(d1) / det;
    Some((s, t))
}

/// Intersection point of the finite segments `p1→p2` and `p3→p4`
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let (s, t) = solve(p1, p2, p3, p4)?;
    if strictly_inside(s) && strictly_inside(t) {
        Some(p1 + (p2 - p1) * s)
    } else {
        None
    }
}

/// Intersection of a ray (bounded to its own length) with an edge.
///
/// Shares the contract of [`segment_intersection`]: the ray does not extend
/// past its endpoint and the hit must fall inside the edge.
#[inline]
pub fn ray_intersection(ray: &LineSegment, edge: &LineSegment) -> Option<Vec2> {
    segment_intersection(ray.p1, ray.p2, edge.p1, edge.p2)
}

/// Point where a bounded ray first enters a circle.
///
/// A ray whose origin is already inside the circle, or on it and heading
/// inward, hits at the origin.
pub fn ray_circle_intersection(ray: &LineSegment, center: Vec2, radius: f32) -> Option<Vec2> {
    let d = ray.direction();
    let a = d.length_squared();
    if a <= f32::EPSILON {
        return None;
    }

    let f = ray.p1 - center;
    let c = f.length_squared() - radius * radius;
    let b = f.dot(d);
    if c < 0.0 || (c == 0.0 && b < 0.0) {
        return Some(ray.p1);
    }

    let discriminant = b * b - a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / a;
    strictly_inside(t).then(|| ray.point_at(t))
}
