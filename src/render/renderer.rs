use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::io::config::RenderConfig;
use crate::render::framebuffer::FrameBuffer;
use crate::scene::camera::Camera;
use crate::scene::context::ViewerScene;
use crate::scene::mesh::Mesh;
use crate::scene::node::SceneNode;
use nalgebra::{Point2, Point3, Vector3};

/// Frame background, from config.
#[derive(Debug, Clone, Copy)]
pub enum Background {
    Solid(Vector3<f32>),
    Gradient {
        top: Vector3<f32>,
        bottom: Vector3<f32>,
    },
}

impl Background {
    pub fn from_config(render: &RenderConfig) -> Self {
        if let (Some(top), Some(bottom)) = (
            render.background_gradient_top,
            render.background_gradient_bottom,
        ) {
            Self::Gradient {
                top: Vector3::from(top),
                bottom: Vector3::from(bottom),
            }
        } else if let Some(color) = render.background_color {
            Self::Solid(Vector3::from(color))
        } else {
            Self::Solid(Vector3::new(0.1, 0.1, 0.1))
        }
    }
}

/// Base surface color of the preview; materials are out of scope, so every
/// model renders in the same neutral tone.
#[inline]
fn albedo() -> Vector3<f32> {
    Vector3::new(0.72, 0.72, 0.75)
}

/// Minimal flat-shaded software preview.
///
/// One depth-buffered pass: transform, near-plane reject, back-face cull,
/// barycentric fill, one Lambert evaluation per triangle. Just enough to
/// give the screenshot and GIF exports something real to encode; a real
/// renderer is an external collaborator.
pub struct Renderer {
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Renders the scene's current model (if any) from `camera`.
    ///
    /// The camera is a parameter rather than read from the scene so the
    /// turntable can orbit without touching the fitted camera placement.
    pub fn render(&mut self, scene: &ViewerScene, camera: &Camera, background: &Background) {
        match *background {
            Background::Solid(color) => self.framebuffer.clear(color),
            Background::Gradient { top, bottom } => self.framebuffer.clear_gradient(top, bottom),
        }

        if let Some(node) = scene.node() {
            self.draw_node(node, scene, camera);
        }
    }

    fn draw_node(&mut self, node: &SceneNode, scene: &ViewerScene, camera: &Camera) {
        let view_projection = camera.view_projection();
        for mesh in &node.model.meshes {
            self.draw_mesh(mesh, node, scene, &view_projection);
        }
    }

    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        node: &SceneNode,
        scene: &ViewerScene,
        view_projection: &nalgebra::Matrix4<f32>,
    ) {
        let width = self.framebuffer.width as f32;
        let height = self.framebuffer.height as f32;

        for chunk in mesh.indices.chunks_exact(3) {
            let world: [Point3<f32>; 3] = [
                node.position + (mesh.vertices[chunk[0] as usize].position * node.scale).coords,
                node.position + (mesh.vertices[chunk[1] as usize].position * node.scale).coords,
                node.position + (mesh.vertices[chunk[2] as usize].position * node.scale).coords,
            ]
            .map(Point3::from);

            let clip = world.map(|p| view_projection * p.to_homogeneous());
            // No polygon clipping in the preview: reject the whole triangle
            // when any vertex sits behind the projection plane.
            if clip.iter().any(|c| c.w <= 1e-6) {
                continue;
            }

            let ndc = clip.map(|c| apply_perspective_division(&c));
            if outside_ndc(&ndc) {
                continue;
            }

            // Back-face cull in NDC (Y up): front faces wind CCW.
            let signed_area = (ndc[1].x - ndc[0].x) * (ndc[2].y - ndc[0].y)
                - (ndc[1].y - ndc[0].y) * (ndc[2].x - ndc[0].x);
            if signed_area <= 0.0 {
                continue;
            }

            let screen = ndc.map(|p| ndc_to_screen(p.x, p.y, width, height));
            let depths = [ndc[0].z, ndc[1].z, ndc[2].z];
            let color = self.shade_flat(&world, scene);
            self.fill_triangle(&screen, &depths, color);
        }
    }

    /// One Lambert evaluation per triangle, at its centroid, using the
    /// geometric face normal.
    fn shade_flat(&self, world: &[Point3<f32>; 3], scene: &ViewerScene) -> Vector3<f32> {
        let edge1 = world[1] - world[0];
        let edge2 = world[2] - world[0];
        let cross = edge1.cross(&edge2);
        let norm = cross.norm();
        let base = albedo();
        if norm < 1e-12 {
            return scene.ambient.component_mul(&base);
        }
        let face_normal = cross / norm;
        let centroid = Point3::from((world[0].coords + world[1].coords + world[2].coords) / 3.0);

        let mut color = scene.ambient.component_mul(&base);
        for light in &scene.lights {
            let (to_light, radiance) = light.illumination(&centroid);
            let lambert = face_normal.dot(&to_light).max(0.0);
            color += radiance.component_mul(&base) * lambert;
        }
        color
    }

    fn fill_triangle(&mut self, screen: &[Point2<f32>; 3], depths: &[f32; 3], color: Vector3<f32>) {
        let area = edge(&screen[0], &screen[1], &screen[2]);
        if area.abs() < 1e-12 {
            return;
        }

        let min_x = screen.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = screen.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = screen.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = screen.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let x0 = (min_x.floor().max(0.0)) as usize;
        let x1 = (max_x.ceil().min(self.framebuffer.width as f32 - 1.0)) as usize;
        let y0 = (min_y.floor().max(0.0)) as usize;
        let y1 = (max_y.ceil().min(self.framebuffer.height as f32 - 1.0)) as usize;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(&screen[1], &screen[2], &p) / area;
                let w1 = edge(&screen[2], &screen[0], &p) / area;
                let w2 = edge(&screen[0], &screen[1], &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = w0 * depths[0] + w1 * depths[1] + w2 * depths[2];
                self.framebuffer.set_pixel(x, y, depth, color);
            }
        }
    }
}

/// Signed parallelogram area of the edge function for `p` against `a -> b`.
#[inline]
fn edge(a: &Point2<f32>, b: &Point2<f32>, p: &Point2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// True when the whole triangle lies outside one NDC face.
fn outside_ndc(ndc: &[Point3<f32>; 3]) -> bool {
    (ndc.iter().all(|p| p.x < -1.0) || ndc.iter().all(|p| p.x > 1.0))
        || (ndc.iter().all(|p| p.y < -1.0) || ndc.iter().all(|p| p.y > 1.0))
        || (ndc.iter().all(|p| p.z < -1.0) || ndc.iter().all(|p| p.z > 1.0))
}
