//! Scalar and 2D vector helpers on top of `glam::Vec2`
//!
//! glam already provides the component-wise arithmetic, compound assignment,
//! `dot` and `length`. This module adds the pieces the game relies on with
//! their exact behavior:
//! - `cross`: 2D scalar cross product (turn direction / parallel test)
//! - `unit`: normalization that refuses the zero vector
//! - `rotated`: rotation that always yields a unit vector
//! - `lerp`: interpolation with a hard `[0, 1]` precondition

use std::ops::{Add, Mul, Sub};

use glam::Vec2;

/// Extra vector operations used by the geometry code
pub trait VectorExt {
    /// Scalar cross product `a.x * b.y - a.y * b.x`
    fn cross(self, other: Vec2) -> f32;

    /// Squared length, for ordering without a square root
    fn sqr_length(self) -> f32;

    /// Unit vector in the same direction.
    ///
    /// Panics on the zero vector: callers must guarantee a direction exists.
    fn unit(self) -> Vec2;

    /// Rotate by `radians` and re-normalize.
    ///
    /// The input magnitude is discarded; the result is always unit length.
    fn rotated(self, radians: f32) -> Vec2;
}

impl VectorExt for Vec2 {
    #[inline]
    fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn sqr_length(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    fn unit(self) -> Vec2 {
        let len = self.length();
        assert!(
            len > 0.0 && len.is_finite(),
            "cannot normalize vector {self} with length {len}"
        );
        self / len
    }

    fn rotated(self, radians: f32) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        // Both components read the unrotated input
        Vec2::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y).unit()
    }
}

/// Linear interpolation between `start` and `end`.
///
/// Panics when `t` lies outside `[0, 1]`; this is a precondition, not a clamp.
#[inline]
pub fn lerp<T>(start: T, end: T, t: f32) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
{
    assert!(
        (0.0..=1.0).contains(&t),
        "lerp parameter {t} must lie in [0, 1]"
    );
    start + (end - start) * t
}
