//! Orbit-trapped escape-time evaluation.
//!
//! One function covers both families: the Mandelbrot set varies `c` over the
//! image with a fixed `z0`, a Julia set fixes `c` and varies `z0`. See
//! [`FractalKind`].

use crate::{
    complex::{self, Complex},
    numeric::clamp,
    trap::{evaluate_trap_shape, MAX_ITER},
};

/// Escape radius, squared.
pub const ESCAPE_NORM_SQR: f32 = 4.0;

/// Starting trap distance; larger than anything the trap shape returns.
pub const INITIAL_TRAP_DISTANCE: f32 = 100.0;

/// Where each iterate is sampled in the trap shape, as `(x, y, z)`: the
/// orbit point is scaled by `z` and offset by `(x, z)`. `y` is not read.
pub const TRAP_SAMPLE: [f32; 3] = [-0.17, 0.6, 2.0];

/// Keeps the smoothing correction finite when `|z|²` barely moved.
pub const SMOOTHING_BIAS: f32 = 0.1;

/// Bounds of the smoothed escape value.
pub const SMOOTHED_MIN: f32 = 0.01;
pub const SMOOTHED_MAX: f32 = 1.0;

/// Default starting point for Mandelbrot rendering. Not the origin.
pub const MANDELBROT_BIAS: Complex = Complex::new(0.1, 0.1);

#[derive(Clone, Copy, Debug)]
pub struct TrapResult {
    pub iteration_count: u32,
    pub min_trap_distance: f32,
    /// Final orbit state.
    pub last: Complex,
    /// Orbit state one step before `last`. Equal to `z0` if nothing ran.
    pub second_last: Complex,
    /// Continuous escape estimate in `[0.01, 1.0]`.
    pub smoothed: f32,
}

fn trap_sample_point(z: Complex) -> Complex {
    let [x, _, scale] = TRAP_SAMPLE;
    complex::add(z.scale(scale), Complex::new(x, scale))
}

/// Removes banding between integer iteration counts.
///
/// `(n + (4 - |old|²) / (0.1 + ||z|² - |old|²|)) / 100`, clamped.
pub fn smoothed_escape(iteration_count: u32, last: Complex, second_last: Complex) -> f32 {
    let last_norm = last.norm_sqr();
    let second_last_norm = second_last.norm_sqr();
    let correction = (ESCAPE_NORM_SQR - second_last_norm)
        / (SMOOTHING_BIAS + (last_norm - second_last_norm).abs());
    let f = (iteration_count as f32 + correction) / MAX_ITER as f32;
    clamp(f, SMOOTHED_MIN, SMOOTHED_MAX)
}

pub fn evaluate_fractal(c: Complex, z0: Complex) -> TrapResult {
    let mut z = z0;
    let mut old = z0;
    let mut min_trap_distance = INITIAL_TRAP_DISTANCE;
    let mut n = 0;

    // Continue only while bounded; a NaN `|z|²` ends the loop.
    while z.norm_sqr() <= ESCAPE_NORM_SQR && n < MAX_ITER {
        old = z;
        z = complex::add(complex::square(z), c);
        let sampled = evaluate_trap_shape(trap_sample_point(z));
        min_trap_distance = min_trap_distance.min(sampled);
        n += 1;
    }

    TrapResult {
        iteration_count: n,
        min_trap_distance,
        last: z,
        second_last: old,
        smoothed: smoothed_escape(n, z, old),
    }
}

/// Which parameter of [`evaluate_fractal`] the image plane drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FractalKind {
    Mandelbrot { bias: Complex },
    Julia { c: Complex },
}

impl FractalKind {
    pub fn evaluate(self, position: Complex) -> TrapResult {
        match self {
            FractalKind::Mandelbrot { bias } => evaluate_fractal(position, bias),
            FractalKind::Julia { c } => evaluate_fractal(c, position),
        }
    }
}

impl Default for FractalKind {
    fn default() -> Self {
        FractalKind::Mandelbrot {
            bias: MANDELBROT_BIAS,
        }
    }
}
