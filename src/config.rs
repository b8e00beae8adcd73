use std::path::PathBuf;

use clap::Parser;

use crate::{
    camera::CameraConfig,
    complex::Complex,
    orbit::FractalKind,
    screen,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wgpu-orbit-trap",
    version,
    about = "Orbit-trapped Mandelbrot/Julia viewer"
)]
pub struct Config {
    /// Window or image width in pixels.
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window or image height in pixels.
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    #[arg(long, default_value_t = 1.0)]
    pub zoom: f32,

    /// Camera offset as `re,im`. Subtracted from the projected position.
    #[arg(long, default_value = "0,0", value_parser = parse_complex, allow_hyphen_values = true)]
    pub offset: Complex,

    /// Render the Julia set for this `re,im` instead of the Mandelbrot set.
    #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
    pub julia: Option<Complex>,

    /// Starting point of the Mandelbrot iteration, as `re,im`.
    #[arg(long, default_value = "0.1,0.1", value_parser = parse_complex, allow_hyphen_values = true)]
    pub bias: Complex,

    /// Render threads.
    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Interactive mode renders at window size divided by this; the frame is
    /// shaded on the event-loop thread, so a held key redraws every frame.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub scale: u32,

    /// Render a single frame to this PNG and exit instead of opening a window.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn size(&self) -> screen::Size {
        screen::Size::new(self.width, self.height)
    }

    pub fn fractal_kind(&self) -> FractalKind {
        match self.julia {
            Some(c) => FractalKind::Julia { c },
            None => FractalKind::Mandelbrot { bias: self.bias },
        }
    }

    pub fn camera(&self, size: screen::Size) -> CameraConfig {
        CameraConfig::new(size.aspect_ratio())
            .with_zoom(self.zoom)
            .with_offset(self.offset)
    }
}

/// Parse `re,im`.
pub fn parse_complex(s: &str) -> Result<Complex, String> {
    let (real, imaginary) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `re,im`, got `{s}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|err| format!("invalid number `{part}`: {err}"))
    };
    Ok(Complex::new(parse(real)?, parse(imaginary)?))
}
