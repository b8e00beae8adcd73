//! The per-pixel pipeline: camera projection, orbit-trap evaluation,
//! compositing. Each call is independent of every other.

use crate::{
    camera::{project, CameraConfig},
    colour::{composite, Colour},
    orbit::FractalKind,
};

pub fn shade(frag_coord: [f32; 2], camera: &CameraConfig, kind: FractalKind) -> Colour {
    let position = project(frag_coord, camera);
    let result = kind.evaluate(position);
    composite(result.smoothed, result.min_trap_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{complex::Complex, orbit::MANDELBROT_BIAS};

    #[test]
    fn centre_of_identity_view() {
        let colour = shade([0.0, 0.0], &CameraConfig::default(), FractalKind::default());
        let expected = [0.432, 0.288, 0.648, 1.0];
        for (actual, expected) in colour.to_array().iter().zip(expected.iter()) {
            assert!((actual - expected).abs() <= 1e-5, "{colour:?}");
        }
        assert_eq!(colour.to_rgba8(), [110, 73, 165, 255]);
    }

    #[test]
    fn camera_moves_the_sample() {
        // Offset is subtracted, so an offset of (0.75, -0.1) centres (-0.75, 0.1).
        let camera = CameraConfig::default().with_offset(Complex::new(0.75, -0.1));
        let shaded = shade([0.0, 0.0], &camera, FractalKind::default());
        let result = FractalKind::default().evaluate(Complex::new(-0.75, 0.1));
        assert_eq!(
            shaded,
            composite(result.smoothed, result.min_trap_distance)
        );
        assert_ne!(
            shaded,
            shade([0.0, 0.0], &CameraConfig::default(), FractalKind::default())
        );
    }

    #[test]
    fn nan_zoom_gives_fast_escape_colour() {
        let camera = CameraConfig::default().with_zoom(f32::NAN);
        let colour = shade([0.5, -0.5], &camera, FractalKind::default());
        assert_eq!(colour, composite(0.01, 0.0));
    }

    #[test]
    fn julia_kind_uses_position_as_start() {
        let c = Complex::new(-0.75, 0.1);
        let camera = CameraConfig::default().with_offset(Complex::new(-0.1, -0.1));
        let julia = shade([0.0, 0.0], &camera, FractalKind::Julia { c });
        let mandelbrot = shade(
            [0.0, 0.0],
            &CameraConfig::default().with_offset(Complex::new(0.75, -0.1)),
            FractalKind::Mandelbrot {
                bias: MANDELBROT_BIAS,
            },
        );
        assert_eq!(julia, mandelbrot);
    }
}
