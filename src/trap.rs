//! The trap shape: a distance-estimated rendering of a fixed Julia set.
//!
//! [`evaluate_trap_shape`] is sampled once per iterate by the orbit-trap
//! evaluator in [`crate::orbit`]. Its value in `[0, 1]` is the lookup the
//! compositor eventually mixes colours with.

use crate::{
    complex::{self, Complex},
    numeric::clamp,
};

/// Iteration cap, shared with [`crate::orbit`].
pub const MAX_ITER: u32 = 100;

/// Julia parameter of the trap shape.
pub const TRAP_C: Complex = Complex::new(0.35, 0.5);

/// Inputs are divided by this before iterating.
pub const TRAP_INPUT_SCALE: f32 = 1.1;

/// Added to the scaled input to give `z0`.
pub const TRAP_INPUT_OFFSET: Complex = Complex::new(0.3, -0.5);

/// Escape radius, squared.
pub const TRAP_ESCAPE_NORM_SQR: f32 = 400.0;

/// Tone curve `pow(NUMERATOR * d / DENOMINATOR, EXPONENT)`.
pub const TRAP_CURVE_NUMERATOR: f32 = 9.0;
pub const TRAP_CURVE_DENOMINATOR: f32 = 6.0;
pub const TRAP_CURVE_EXPONENT: f32 = 0.12;

#[derive(Clone, Copy, Debug)]
pub struct IterationResult {
    pub distance_estimate: f32,
    pub iteration_count: u32,
    pub z: Complex,
    pub dz: Complex,
}

/// Run the escape-time iteration for the trap shape at `p`, tracking the
/// derivative.
///
/// `dz` starts at zero, so it is non-zero as soon as one iteration has run.
/// An input that has already escaped (`|z0|² > 400`) exits with zero
/// iterations and `dz = 0`; the quotient in the estimator is then `+inf`.
pub fn iterate_primary(p: Complex) -> IterationResult {
    let mut z = complex::add(
        Complex::new(p.real / TRAP_INPUT_SCALE, p.imaginary / TRAP_INPUT_SCALE),
        TRAP_INPUT_OFFSET,
    );
    let mut dz = Complex::ZERO;
    let mut n = 0;

    while n < MAX_ITER {
        if z.norm_sqr() > TRAP_ESCAPE_NORM_SQR {
            break;
        }
        dz = complex::add(complex::multiply(z.scale(2.0), dz), Complex::ONE);
        z = complex::add(complex::square(z), TRAP_C);
        n += 1;
    }

    let m2 = z.norm_sqr();
    let distance_estimate = (m2 / dz.norm_sqr()).sqrt() * m2.ln();

    IterationResult {
        distance_estimate,
        iteration_count: n,
        z,
        dz,
    }
}

/// Trap-shape value at `p`, always in `[0, 1]`.
///
/// A NaN produced along the way (a negative estimate raised to a fractional
/// power, or a NaN input) clamps to `0`.
pub fn evaluate_trap_shape(p: Complex) -> f32 {
    let IterationResult {
        distance_estimate, ..
    } = iterate_primary(p);
    let curved = (TRAP_CURVE_NUMERATOR * distance_estimate / TRAP_CURVE_DENOMINATOR)
        .powf(TRAP_CURVE_EXPONENT);
    clamp(curved, 0.0, 1.0)
}
