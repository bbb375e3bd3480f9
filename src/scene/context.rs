use crate::io::config::Config;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::SceneNode;
use nalgebra::{Point3, Vector3};

/// Explicit viewer context replacing global scene/camera state: the camera,
/// the light rig and the single "current model" slot.
///
/// The slot is a single-writer resource. Loading a new model fully replaces
/// the previous node via [`ViewerScene::replace_node`]; mutations of two
/// loads never interleave because replacement takes `&mut self`.
pub struct ViewerScene {
    pub camera: Camera,
    pub lights: Vec<Light>,
    /// Ambient term applied to every surface, linear RGB.
    pub ambient: Vector3<f32>,
    node: Option<SceneNode>,
}

impl ViewerScene {
    pub fn new(camera: Camera, lights: Vec<Light>, ambient: Vector3<f32>) -> Self {
        Self {
            camera,
            lights,
            ambient,
            node: None,
        }
    }

    /// Builds camera and light rig from the viewer configuration.
    pub fn from_config(config: &Config) -> Self {
        let aspect_ratio = config.render.width as f32 / config.render.height as f32;
        let position = Point3::from(config.camera.position);
        let target = Point3::from(config.camera.target);

        let camera = if config.camera.projection == "orthographic" {
            Camera::orthographic(
                position,
                target,
                config.camera.ortho_height,
                aspect_ratio,
                config.camera.near,
                config.camera.far,
            )
        } else {
            Camera::perspective(
                position,
                target,
                config.camera.fov.to_radians(),
                aspect_ratio,
                config.camera.near,
                config.camera.far,
            )
        };

        let lights = config
            .lights
            .iter()
            .filter_map(|l| {
                let color = Vector3::from(l.color);
                match l.r#type.as_str() {
                    "directional" => l
                        .direction
                        .map(|d| Light::directional(Vector3::from(d), color, l.intensity)),
                    "point" => l.position.map(|p| {
                        let mut light = Light::point(Point3::from(p), color, l.intensity);
                        if let (Light::Point { attenuation, .. }, Some(a)) = (&mut light, l.attenuation)
                        {
                            *attenuation = (a[0], a[1], a[2]);
                        }
                        light
                    }),
                    other => {
                        log::warn!("Ignoring light with unknown type '{other}'");
                        None
                    }
                }
            })
            .collect();

        Self::new(camera, lights, Vector3::from(config.render.ambient_light))
    }

    pub fn node(&self) -> Option<&SceneNode> {
        self.node.as_ref()
    }

    pub fn has_node(&self) -> bool {
        self.node.is_some()
    }

    /// Evicts the current node (if any) and installs the new one in a
    /// single step. Returns the evicted node.
    pub fn replace_node(&mut self, node: SceneNode) -> Option<SceneNode> {
        self.node.replace(node)
    }
}
