//! Collidable body geometry
//!
//! A body is either a circle or a closed regular polygon, built once in local
//! space around the body's origin. Only the world position changes after
//! construction; world-space edges are derived on demand.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use thiserror::Error;

use super::line::LineSegment;
use crate::consts::CIRCLE_SENTINEL;
use crate::polar_to_cartesian;

/// Errors building body geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Too few vertices for a closed polygon (and not the circle sentinel)
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(u32),
}

/// Local-space shape of a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Circle centered on the body origin; carries no edges
    Circle { radius: f32 },
    /// Closed polygon, last edge wraps back to the first vertex
    Polygon { edges: Vec<LineSegment> },
}

impl Shape {
    /// Build a shape from a vertex count.
    ///
    /// [`CIRCLE_SENTINEL`] yields a circle of `radius`; any other count yields a
    /// regular polygon whose vertices lie on a circle of `radius`.
    pub fn from_vertex_count(n_edges: u32, radius: f32) -> Result<Self, ShapeError> {
        if n_edges == CIRCLE_SENTINEL {
            return Ok(Shape::Circle { radius });
        }
        let edges = regular_polygon_edges(n_edges)?
            .into_iter()
            .map(|edge| LineSegment::new(edge.p1 * radius, edge.p2 * radius))
            .collect();
        Ok(Shape::Polygon { edges })
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }

    /// Stored local edges (empty for circles)
    pub fn local_edges(&self) -> &[LineSegment] {
        match self {
            Shape::Circle { .. } => &[],
            Shape::Polygon { edges } => edges.as_slice(),
        }
    }
}

/// Edges of a regular `n_edges`-gon on the unit circle.
///
/// Vertices start at angle 0 and are spaced `2π / n`. Odd counts are rotated
/// by `π / n` so they rest on a flat side.
pub fn regular_polygon_edges(n_edges: u32) -> Result<Vec<LineSegment>, ShapeError> {
    if n_edges < 3 {
        return Err(ShapeError::TooFewVertices(n_edges));
    }

    let step = TAU / n_edges as f32;
    let start = if n_edges % 2 == 1 {
        PI / n_edges as f32
    } else {
        0.0
    };

    let vertices: Vec<Vec2> = (0..n_edges)
        .map(|i| polar_to_cartesian(1.0, start + i as f32 * step))
        .collect();

    let edges = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&a, &b)| LineSegment::new(a, b))
        .collect();
    Ok(edges)
}

/// Anything the ray-cast query can test against
pub trait Collidable {
    /// Current world position of the body origin
    fn position(&self) -> Vec2;

    /// Local-space shape
    fn shape(&self) -> &Shape;

    fn is_circle(&self) -> bool {
        self.shape().is_circle()
    }

    /// Local edges translated to the current position
    fn world_edges(&self) -> Vec<LineSegment> {
        let offset = self.position();
        self.shape()
            .local_edges()
            .iter()
            .map(|edge| edge.translated(offset))
            .collect()
    }

    fn local_edges(&self) -> &[LineSegment] {
        self.shape().local_edges()
    }
}

impl<T: Collidable + ?Sized> Collidable for &T {
    #[inline]
    fn position(&self) -> Vec2 {
        (**self).position()
    }

    #[inline]
    fn shape(&self) -> &Shape {
        (**self).shape()
    }
}

/// A positioned shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    shape: Shape,
}

impl Body {
    pub fn new(position: Vec2, shape: Shape) -> Self {
        Self { position, shape }
    }

    /// Build from a vertex count, see [`Shape::from_vertex_count`]
    pub fn with_vertex_count(position: Vec2, n_edges: u32, radius: f32) -> Result<Self, ShapeError> {
        Ok(Self::new(position, Shape::from_vertex_count(n_edges, radius)?))
    }

    /// Move the whole body
    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}

impl Collidable for Body {
    #[inline]
    fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    fn shape(&self) -> &Shape {
        &self.shape
    }
}
