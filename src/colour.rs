//! Colouring: smoothed escape value and trap distance to RGBA.

use bytemuck::{Pod, Zeroable};

use crate::numeric::{clamp, Vec3};

/// Tone curve of the blend factor, `pow(NUMERATOR * f / DENOMINATOR, EXPONENT)`.
pub const BLEND_CURVE_NUMERATOR: f32 = 7.0;
pub const BLEND_CURVE_DENOMINATOR: f32 = 6.0;
pub const BLEND_CURVE_EXPONENT: f32 = 0.5;

/// Background, brightened by `0.2 + sqrt(f)`.
pub const BACKGROUND: Vec3 = Vec3::new(0.6, 0.4, 0.9);
pub const BACKGROUND_WEIGHT: f32 = 0.6;
pub const BACKGROUND_LIFT: f32 = 0.2;

/// Multiplied into the background where the blend factor is low.
pub const SHADOW: Vec3 = Vec3::new(0.6, 0.7, 0.6);
pub const SHADOW_WEIGHT: f32 = 0.2;
pub const SHADOW_LIFT: f32 = 0.2;

/// Foreground, brightened by `0.3 + sqrt(1 - f)`.
pub const FOREGROUND: Vec3 = Vec3::new(0.2, 0.8, 0.9);
pub const FOREGROUND_WEIGHT: f32 = 0.5;
pub const FOREGROUND_LIFT: f32 = 0.3;

/// Linear RGBA output for a single pixel.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub fn opaque(rgb: Vec3) -> Self {
        Self {
            r: rgb.x,
            g: rgb.y,
            b: rgb.z,
            a: 1.0,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize like an `Rgba8Unorm` target does.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|channel| (clamp(channel, 0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Compose the final colour from the smoothed escape value `f` (in
/// `[0.01, 1.0]`) and the minimum trap distance.
///
/// `min_trap_distance` is the mix factor between foreground and background
/// and is not clamped, so values outside `[0, 1]` extrapolate.
pub fn composite(f: f32, min_trap_distance: f32) -> Colour {
    let g = clamp(
        (BLEND_CURVE_NUMERATOR * f / BLEND_CURVE_DENOMINATOR).powf(BLEND_CURVE_EXPONENT),
        0.0,
        1.0,
    );

    let escaped = f.sqrt();
    let trapped = (1.0 - f).sqrt();
    let bg = BACKGROUND_WEIGHT * BACKGROUND * (BACKGROUND_LIFT + escaped);
    let bg2 = SHADOW_WEIGHT * SHADOW * (SHADOW_LIFT + escaped);
    let fg = FOREGROUND_WEIGHT * FOREGROUND * (FOREGROUND_LIFT + trapped);

    let colour = fg.mix(bg, min_trap_distance);
    let colour = (colour * bg2).mix(colour, g);

    Colour::opaque(colour)
}
