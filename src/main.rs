use clap::Parser;
use log::{error, info};
use meshview::app::Viewer;
use meshview::error::Result;
use meshview::io::config::Config;
use meshview::io::export::{
    default_gif_path, default_screenshot_path, render_turntable, save_gif, save_png,
};
use meshview::render::renderer::{Background, Renderer};
use meshview::scene::context::ViewerScene;
use std::path::PathBuf;

/// Headless 3D model viewer: auto-fit a model and export screenshots.
#[derive(Parser, Debug)]
#[command(name = "meshview")]
#[command(about = "Load a 3D model, fit it into view and export a PNG screenshot or turntable GIF")]
struct Cli {
    /// Model file to view (.obj, .gltf, .glb)
    model: PathBuf,

    /// Viewer configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Screenshot output path (PNG)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also record a turntable GIF (to FILE, or a timestamped default)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    gif: Option<Option<PathBuf>>,

    /// Override the turntable frame count from the config
    #[arg(long)]
    frames: Option<usize>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("No config given, using defaults");
            Config::default()
        }
    };

    let scene = ViewerScene::from_config(&config);
    let mut viewer = Viewer::new(scene, config.fit.to_params());
    viewer.load_model(&cli.model)?;

    let background = Background::from_config(&config.render);
    let mut renderer = Renderer::new(config.render.width, config.render.height);
    let camera = viewer.scene().camera.clone();
    renderer.render(viewer.scene(), &camera, &background);

    let output = cli.output.unwrap_or_else(default_screenshot_path);
    save_png(&renderer.framebuffer, &output)?;
    info!("Screenshot saved to {}", output.display());

    if let Some(gif) = cli.gif {
        let gif_path = gif.unwrap_or_else(default_gif_path);
        let frames = cli.frames.unwrap_or(config.export.frames);
        let images = render_turntable(
            viewer.scene(),
            &background,
            config.render.width,
            config.render.height,
            frames,
        );
        save_gif(images, config.export.frame_delay_ms, &gif_path)?;
        info!("Turntable GIF saved to {}", gif_path.display());
    }

    Ok(())
}
