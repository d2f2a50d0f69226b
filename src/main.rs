// fshape: the letter F drawn through a hand-built row-major matrix chain

// Module declarations
mod config;
mod geometry;
mod input;
mod logging;
mod math;
mod renderer;
mod scene;
mod texture;

use anyhow::{Context, Result};
use winit::event_loop::EventLoop;

use crate::config::Config;
use crate::scene::Scene;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            logging::init_logging(None);
            log::error!("{err}");
            std::process::exit(2);
        }
    };

    logging::init_logging(config.log_filter.as_deref());

    if let Err(err) = run(config).await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    log::info!(
        "starting {}x{} window, depth {}, mode {:?}",
        config.width,
        config.height,
        config.depth,
        config.mode
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let scene = Scene::new(&config);
    let renderer = renderer::Renderer::new(&event_loop, &config, scene).await?;

    renderer.run(event_loop)
}
