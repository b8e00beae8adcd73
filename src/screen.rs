use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size divided by `scale`, never smaller than one pixel on a side.
    pub fn downscaled(&self, scale: u32) -> Self {
        Self {
            width: (self.width / scale).max(1),
            height: (self.height / scale).max(1),
        }
    }

    /// Normalized device coordinate of the centre of pixel `(x, y)`. Row 0 is
    /// the top of the image, i.e. `y = 1`.
    pub fn ndc(&self, x: u32, y: u32) -> [f32; 2] {
        [
            2.0 * (x as f32 + 0.5) / self.width as f32 - 1.0,
            1.0 - 2.0 * (y as f32 + 0.5) / self.height as f32,
        ]
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_covers_pixel_centres() {
        let size = Size::new(4, 2);
        assert_eq!(size.ndc(0, 0), [-0.75, 0.5]);
        assert_eq!(size.ndc(3, 1), [0.75, -0.5]);
    }

    #[test]
    fn odd_sizes_have_a_centre_pixel() {
        let size = Size::new(3, 3);
        assert_eq!(size.ndc(1, 1), [0.0, 0.0]);
    }

    #[test]
    fn downscale_keeps_at_least_one_pixel() {
        assert_eq!(Size::new(1920, 1080).downscaled(2), Size::new(960, 540));
        assert_eq!(Size::new(3, 1).downscaled(4), Size::new(1, 1));
    }

    #[test]
    fn aspect_ratio() {
        assert_eq!(Size::new(200, 100).aspect_ratio(), 2.0);
        assert_eq!(Size::new(1280, 720).area(), 921_600);
    }
}
