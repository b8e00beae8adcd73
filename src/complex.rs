//! Complex arithmetic on a plain two-component value.
//!
//! Everything here is written out component by component so the results are
//! exactly reproducible: each operation is a fixed sequence of `f32` adds and
//! multiplies.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Default)]
pub struct Complex {
    pub real: f32,
    pub imaginary: f32,
}

impl Complex {
    pub const ZERO: Self = Complex {
        real: 0.0,
        imaginary: 0.0,
    };

    pub const ONE: Self = Complex {
        real: 1.0,
        imaginary: 0.0,
    };

    pub const fn new(real: f32, imaginary: f32) -> Self {
        Self { real, imaginary }
    }

    /// `|z|²`
    pub fn norm_sqr(self) -> f32 {
        self.real * self.real + self.imaginary * self.imaginary
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            real: factor * self.real,
            imaginary: factor * self.imaginary,
        }
    }
}

pub fn add(a: Complex, b: Complex) -> Complex {
    Complex {
        real: a.real + b.real,
        imaginary: a.imaginary + b.imaginary,
    }
}

/// `(x, y)² = (x² - y², 2xy)`
pub fn square(z: Complex) -> Complex {
    Complex {
        real: z.real * z.real - z.imaginary * z.imaginary,
        imaginary: 2.0 * z.real * z.imaginary,
    }
}

pub fn multiply(a: Complex, b: Complex) -> Complex {
    Complex {
        real: a.real * b.real - a.imaginary * b.imaginary,
        imaginary: a.real * b.imaginary + a.imaginary * b.real,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_matches_multiply_by_self() {
        let z = Complex::new(0.75, -1.25);
        assert_eq!(square(z), multiply(z, z));
    }

    #[test]
    fn i_squared_is_minus_one() {
        let i = Complex::new(0.0, 1.0);
        assert_eq!(square(i), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn multiply_by_one_is_identity() {
        let z = Complex::new(-3.5, 0.125);
        assert_eq!(multiply(z, Complex::ONE), z);
        assert_eq!(multiply(Complex::ONE, z), z);
    }

    #[test]
    fn add_is_componentwise() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(0.5, -4.0);
        assert_eq!(add(a, b), Complex::new(1.5, -2.0));
    }

    #[test]
    fn norm_sqr() {
        assert_eq!(Complex::new(3.0, 4.0).norm_sqr(), 25.0);
        assert_eq!(Complex::ZERO.norm_sqr(), 0.0);
    }
}
