//! Nearest-hit ray query over a snapshot of live bodies
//!
//! Candidates are ordered by squared distance from the ray origin to their
//! center and tested in that order; the first one the ray actually crosses
//! wins. This is a center-distance heuristic, not a sweep along the ray: a
//! large body whose center is farther away can still be struck first in
//! world space without winning.
//!
//! Within one polygon the edge hit nearest the ray origin is reported, not
//! the first crossing edge in vertex order. Earlier versions took the first
//! in list order, which could report a far-side edge.

use glam::Vec2;

use super::body::{Collidable, Shape};
use super::intersect::{ray_circle_intersection, ray_intersection};
use super::line::LineSegment;
use super::vector::VectorExt;

/// Result of a successful ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<C> {
    /// The candidate that was hit
    pub target: C,
    /// Where the ray meets it
    pub point: Vec2,
}

/// Where `ray` meets a single body, if anywhere.
///
/// For polygons the edge hit closest to the ray origin is reported.
pub fn intersect_body<C: Collidable + ?Sized>(ray: &LineSegment, body: &C) -> Option<Vec2> {
    match body.shape() {
        Shape::Circle { radius } => ray_circle_intersection(ray, body.position(), *radius),
        Shape::Polygon { .. } => body
            .world_edges()
            .iter()
            .filter_map(|edge| ray_intersection(ray, edge))
            .min_by(|a, b| {
                (*a - ray.p1)
                    .sqr_length()
                    .partial_cmp(&(*b - ray.p1).sqr_length())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
    }
}

/// Find the first candidate, nearest center first, crossed by the ray from
/// `origin` to `target`.
///
/// The caller supplies only live candidates. A zero-length ray hits nothing.
pub fn find_nearest_hit<I, C>(origin: Vec2, target: Vec2, candidates: I) -> Option<RayHit<C>>
where
    I: IntoIterator<Item = C>,
    C: Collidable,
{
    let ray = LineSegment::new(origin, target);
    if ray.is_degenerate() {
        log::trace!("Ray query from {origin} has zero length, skipping");
        return None;
    }

    let mut ordered: Vec<(f32, C)> = candidates
        .into_iter()
        .map(|c| ((c.position() - origin).sqr_length(), c))
        .collect();
    ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    ordered.into_iter().find_map(|(_, candidate)| {
        intersect_body(&ray, &candidate).map(|point| RayHit {
            target: candidate,
            point,
        })
    })
}
