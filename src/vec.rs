//! 2D vector type used for positions, velocities and forces.

use crate::float::Float;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 2D vector for planar physics.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// Unit vector pointing towards negative Y (the direction gravity pulls).
    pub fn down() -> Self { Vec2 { x: F::zero(), y: -F::one() } }

    /// Dot product.
    pub fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }

    /// 2D cross product (returns scalar): self.x * other.y - self.y * other.x
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector (rotated 90 degrees counter-clockwise).
    pub fn perp(self) -> Self {
        Vec2 { x: -self.y, y: self.x }
    }

    /// Scale both components by a scalar.
    pub fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(F::epsilon()) {
            Self::zero()
        } else {
            self.scale(F::one() / len)
        }
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Squared distance between two points.
    pub fn distance_sq(self, other: Self) -> F {
        (self - other).length_sq()
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Vec2 { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Vec2 { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    /// Whether both components are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> AddAssign for Vec2<F> {
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl<F: Float> SubAssign for Vec2<F> {
    fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_length() {
        let v = Vec2::new(3.0f32, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn cross_of_axes() {
        let i = Vec2::new(1.0f32, 0.0);
        let j = Vec2::new(0.0f32, 1.0);
        assert_eq!(i.cross(j), 1.0);
        assert_eq!(j.cross(i), -1.0);
        assert_eq!(i.cross(i), 0.0);
    }

    #[test]
    fn normalize_zero_vector() {
        let v = Vec2::<f32>::zero();
        let n = v.normalize();
        assert_eq!(n, Vec2::zero());
    }

    #[test]
    fn lerp_midpoint() {
        let a = Vec2::new(0.0f32, 0.0);
        let b = Vec2::new(10.0f32, 10.0);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-6);
        assert!((mid.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn assign_operators() {
        let mut v = Vec2::new(1.0f64, 2.0);
        v += Vec2::new(0.5, 0.5);
        v -= Vec2::new(1.0, 0.0);
        assert_eq!(v, Vec2::new(0.5, 2.5));
    }

    #[test]
    fn component_min_max() {
        let a = Vec2::new(1.0f32, 5.0);
        let b = Vec2::new(3.0f32, -2.0);
        assert_eq!(a.min(b), Vec2::new(1.0, -2.0));
        assert_eq!(a.max(b), Vec2::new(3.0, 5.0));
    }
}
