//! Line segments
//!
//! A segment owns both endpoints by value. Direction and length are derived on
//! each call rather than cached.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A finite segment from `p1` to `p2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl LineSegment {
    pub const fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Both endpoints, in order
    #[inline]
    pub fn points(&self) -> (Vec2, Vec2) {
        (self.p1, self.p2)
    }

    /// `p2 - p1`, not normalized
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    #[inline]
    pub fn sqr_length(&self) -> f32 {
        self.direction().length_squared()
    }

    /// Point at parameter `t` along the segment (0 = `p1`, 1 = `p2`)
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.p1 + self.direction() * t
    }

    /// Same segment moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.p1 + offset, self.p2 + offset)
    }

    /// Whether both endpoints coincide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.sqr_length() <= f32::EPSILON
    }
}
