use crate::core::math::transform::TransformFactory;
use crate::error::{Error, Result};
use crate::render::framebuffer::FrameBuffer;
use crate::render::renderer::{Background, Renderer};
use crate::scene::context::ViewerScene;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use log::info;
use rayon::prelude::*;
use std::f32::consts::TAU;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Converts a linear-RGB framebuffer to an 8-bit RGBA image, gamma-encoded.
pub fn framebuffer_to_rgba(framebuffer: &FrameBuffer) -> RgbaImage {
    let gamma = 1.0 / 2.2;
    RgbaImage::from_fn(
        framebuffer.width as u32,
        framebuffer.height as u32,
        |x, y| {
            let linear = framebuffer
                .get_pixel(x as usize, y as usize)
                .unwrap_or_else(nalgebra::Vector3::zeros);
            let encode = |c: f32| (c.max(0.0).powf(gamma).clamp(0.0, 1.0) * 255.0) as u8;
            Rgba([encode(linear.x), encode(linear.y), encode(linear.z), 255])
        },
    )
}

/// Saves one rendered frame as a PNG screenshot.
pub fn save_png(framebuffer: &FrameBuffer, path: &Path) -> Result<()> {
    framebuffer_to_rgba(framebuffer)
        .save(path)
        .map_err(|e| Error::Image(format!("failed to save '{}': {e}", path.display())))
}

/// Renders one full camera revolution around the fitted model.
///
/// Each frame orbits the scene's camera around the world Y axis through the
/// origin (where the fit placed the model's center). Frames are independent,
/// so they render in parallel.
pub fn render_turntable(
    scene: &ViewerScene,
    background: &Background,
    width: usize,
    height: usize,
    frames: usize,
) -> Vec<RgbaImage> {
    info!("Recording turntable: {frames} frames at {width}x{height}");
    (0..frames)
        .into_par_iter()
        .map(|i| {
            let angle = TAU * i as f32 / frames as f32;
            let mut camera = scene.camera.clone();
            let rotation = TransformFactory::rotation_y(angle);
            camera.position = rotation.transform_point(&scene.camera.position);

            let mut renderer = Renderer::new(width, height);
            renderer.render(scene, &camera, background);
            framebuffer_to_rgba(&renderer.framebuffer)
        })
        .collect()
}

/// Encodes turntable frames as a looping GIF.
pub fn save_gif(frames: Vec<RgbaImage>, frame_delay_ms: u32, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| Error::Image(format!("gif: {e}")))?;

    let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
    encoder
        .encode_frames(
            frames
                .into_iter()
                .map(|image| Frame::from_parts(image, 0, 0, delay)),
        )
        .map_err(|e| Error::Image(format!("gif: {e}")))?;
    Ok(())
}

/// Timestamped default output names, so repeated runs don't clobber each other.
pub fn default_screenshot_path() -> PathBuf {
    PathBuf::from(format!(
        "screenshot_{}.png",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

pub fn default_gif_path() -> PathBuf {
    PathBuf::from(format!(
        "turntable_{}.gif",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::Camera;
    use crate::scene::light::Light;
    use crate::scene::mesh::Mesh;
    use crate::scene::model::Model;
    use crate::scene::node::SceneNode;
    use nalgebra::{Point3, Vector3};

    fn fitted_cube_scene() -> ViewerScene {
        let camera = Camera::perspective(
            Point3::new(0.0, 3.75, 7.5),
            Point3::origin(),
            75.0_f32.to_radians(),
            1.0,
            0.1,
            1000.0,
        );
        let lights = vec![Light::directional(
            Vector3::new(-1.0, -1.0, -2.0),
            Vector3::new(1.0, 1.0, 1.0),
            1.0,
        )];
        let mut scene = ViewerScene::new(camera, lights, Vector3::new(0.25, 0.25, 0.25));
        let mut node = SceneNode::new(Model::new(
            "cube",
            vec![Mesh::cube(Point3::origin(), 1.0)],
        ));
        node.scale = 2.5;
        scene.replace_node(node);
        scene
    }

    #[test]
    fn gamma_encoding_is_monotonic() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.clear(Vector3::zeros());
        fb.set_pixel(0, 0, 0.0, Vector3::new(0.25, 0.25, 0.25));
        fb.set_pixel(1, 0, 0.0, Vector3::new(1.0, 1.0, 1.0));
        let image = framebuffer_to_rgba(&fb);
        let dim = image.get_pixel(0, 0)[0];
        let bright = image.get_pixel(1, 0)[0];
        assert!(dim > 0);
        assert!(bright == 255);
        assert!(dim < bright);
    }

    #[test]
    fn turntable_produces_distinct_frames() {
        let scene = fitted_cube_scene();
        let frames = render_turntable(&scene, &Background::Solid(Vector3::zeros()), 32, 32, 4);
        assert_eq!(frames.len(), 4);
        // A quarter-turn of an asymmetrically lit cube cannot be identical.
        assert_ne!(frames[0].as_raw(), frames[1].as_raw());
    }
}
