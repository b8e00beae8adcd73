mod app;
mod camera;
mod colour;
mod complex;
mod config;
mod error;
mod gpu;
mod numeric;
mod orbit;
mod pixel;
mod render;
mod screen;
mod trap;

use std::{path::Path, time::Instant};

use anyhow::Context;
use clap::Parser;
use log::info;

use crate::{config::Config, render::Renderer};

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let config = Config::parse();
    let renderer = Renderer::new(config.threads, config.fractal_kind())
        .context("failed to build render thread pool")?;
    info!("rendering {:?}", renderer.kind());

    match &config.output {
        Some(path) => render_to_file(&config, &renderer, path),
        None => {
            let (app, event_loop) = app::App::new(&config, renderer)?;
            app.run(event_loop)
        }
    }
}

fn render_to_file(config: &Config, renderer: &Renderer, path: &Path) -> anyhow::Result<()> {
    let size = config.size();
    let camera = config.camera(size);

    let started = Instant::now();
    let image = renderer.render_image(size, &camera);
    info!(
        "rendered {}x{} on {} threads in {:?}",
        size.width,
        size.height,
        renderer.threads(),
        started.elapsed()
    );

    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
