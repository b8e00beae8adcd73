//! Scalar and RGB helpers with shader semantics.

use std::ops::Mul;

/// `min(max(x, lo), hi)`.
///
/// Follows IEEE-754 `maxNum`/`minNum`, the same as WGSL's `clamp`: a NaN `x`
/// comes out as `lo`, and `±inf` saturates. This differs from [`f32::clamp`],
/// which would propagate the NaN.
///
/// Loops stay consistent with this: the orbit loop in [`crate::orbit`] runs
/// only while `|z|² <= 4` holds, so a NaN orbit exits at once, and its NaN
/// smoothing value then clamps to the lower bound. The trap-shape loop breaks
/// only on `|z|² > 400`, so a NaN input runs to the cap and clamps to `0`.
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// Linear interpolation, `a + (b - a) * t`. `t` is not clamped.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn mix(self, other: Self, t: f32) -> Self {
        Self {
            x: mix(self.x, other.x, t),
            y: mix(self.y, other.y, t),
            z: mix(self.z, other.z, t),
        }
    }
}

impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}
