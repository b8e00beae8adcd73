//! CPU frame rendering: every pixel is shaded independently on a rayon pool.

use log::trace;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{camera::CameraConfig, orbit::FractalKind, pixel, screen};

pub struct Renderer {
    pool: rayon::ThreadPool,
    kind: FractalKind,
}

impl Renderer {
    pub fn new(threads: usize, kind: FractalKind) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("render-{index}"))
            .build()?;
        Ok(Self { pool, kind })
    }

    pub fn kind(&self) -> FractalKind {
        self.kind
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Shade a `screen_size` frame into `pixels`, row-major from the top.
    pub fn render(
        &self,
        screen_size: screen::Size,
        camera: &CameraConfig,
        pixels: &mut [[u8; 4]],
    ) {
        trace!("begin render");
        assert_eq!(
            pixels.len(),
            screen_size.area(),
            "pixel buffer does not match {screen_size:?}"
        );

        let kind = self.kind;
        self.pool.install(|| {
            pixels
                .par_chunks_mut(screen_size.width as usize)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        let frag_coord = screen_size.ndc(x as u32, y as u32);
                        *pixel = pixel::shade(frag_coord, camera, kind).to_rgba8();
                    }
                });
        });
        trace!("end render");
    }

    pub fn render_image(
        &self,
        screen_size: screen::Size,
        camera: &CameraConfig,
    ) -> image::RgbaImage {
        let mut pixels = vec![[0u8; 4]; screen_size.area()];
        self.render(screen_size, camera, &mut pixels);
        image::RgbaImage::from_fn(screen_size.width, screen_size.height, |x, y| {
            image::Rgba(pixels[y as usize * screen_size.width as usize + x as usize])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;

    fn render(threads: usize, size: screen::Size, camera: &CameraConfig) -> Vec<[u8; 4]> {
        let renderer = Renderer::new(threads, FractalKind::default()).unwrap();
        let mut pixels = vec![[0u8; 4]; size.area()];
        renderer.render(size, camera, &mut pixels);
        pixels
    }

    #[test]
    fn every_pixel_is_opaque() {
        let size = screen::Size::new(24, 16);
        let camera = CameraConfig::new(size.aspect_ratio()).with_zoom(1.5);
        let pixels = render(2, size, &camera);
        assert!(pixels.iter().all(|pixel| pixel[3] == 255));
    }

    #[test]
    fn thread_count_does_not_change_output() {
        let size = screen::Size::new(33, 17);
        let camera = CameraConfig::new(size.aspect_ratio())
            .with_zoom(1.25)
            .with_offset(Complex::new(0.5, 0.0));
        assert_eq!(render(1, size, &camera), render(4, size, &camera));
    }

    #[test]
    fn centre_pixel_matches_shade() {
        let size = screen::Size::new(5, 5);
        let camera = CameraConfig::default();
        let pixels = render(2, size, &camera);
        assert_eq!(pixels[2 * 5 + 2], [110, 73, 165, 255]);
    }

    #[test]
    fn image_has_frame_dimensions() {
        let renderer = Renderer::new(1, FractalKind::default()).unwrap();
        let size = screen::Size::new(7, 3);
        let image = renderer.render_image(size, &CameraConfig::new(size.aspect_ratio()));
        assert_eq!(image.dimensions(), (7, 3));
        assert_eq!(renderer.threads(), 1);
    }

    #[test]
    #[should_panic(expected = "pixel buffer does not match")]
    fn mismatched_buffer_panics() {
        let renderer = Renderer::new(1, FractalKind::default()).unwrap();
        let mut pixels = vec![[0u8; 4]; 3];
        renderer.render(screen::Size::new(2, 2), &CameraConfig::default(), &mut pixels);
    }
}
