use crate::core::fit::{FitParams, FitResult, apply_fit, compute_fit};
use crate::error::{Error, Result};
use crate::io::loader::load_model;
use crate::scene::context::ViewerScene;
use crate::scene::node::SceneNode;
use log::{debug, info};
use std::path::Path;

/// Viewer lifecycle: `Idle -> Loading -> Fitted`, then back to `Idle` (or
/// `Fitted`, if a previous model survives a failed load) on each new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Idle,
    Loading,
    Fitted,
}

/// One viewer session: the scene, the fit policy, and the load/fit flow.
///
/// `&mut self` on [`Viewer::load_model`] makes the scene's model slot a
/// single-writer resource; two loads can never interleave their mutations.
pub struct Viewer {
    scene: ViewerScene,
    params: FitParams,
    state: ViewerState,
}

impl Viewer {
    pub fn new(scene: ViewerScene, params: FitParams) -> Self {
        Self {
            scene,
            params,
            state: ViewerState::Idle,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn scene(&self) -> &ViewerScene {
        &self.scene
    }

    /// Loads a model file, fits it, and installs it as the current model.
    ///
    /// On any failure (unsupported format, parse error, degenerate
    /// geometry) the scene is left exactly as it was: nothing is mutated
    /// until the model is parsed and the fit fully computed.
    pub fn load_model(&mut self, path: &Path) -> Result<FitResult> {
        self.state = ViewerState::Loading;
        let outcome = self.load_and_fit(path);
        self.state = match (&outcome, self.scene.has_node()) {
            (Ok(_), _) => ViewerState::Fitted,
            (Err(_), true) => ViewerState::Fitted,
            (Err(_), false) => ViewerState::Idle,
        };
        outcome
    }

    fn load_and_fit(&mut self, path: &Path) -> Result<FitResult> {
        let model = load_model(path)?;
        let bounds = model.bounds().ok_or(Error::DegenerateGeometry)?;
        let fit = compute_fit(&bounds, &self.params)?;

        // The fit is complete; only now does mutation start. Applying to the
        // node before installing it makes the slot swap a single step.
        let mut node = SceneNode::new(model);
        apply_fit(&mut node, &mut self.scene.camera, &fit);
        if let Some(evicted) = self.scene.replace_node(node) {
            debug!("Evicted previous model '{}'", evicted.model.name);
        }

        info!(
            "Fitted '{}': scale {:.4}, camera at distance {:.2}",
            self.scene.node().map(|n| n.model.name.as_str()).unwrap_or("?"),
            fit.scale_factor,
            fit.camera_distance
        );
        Ok(fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::Camera;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use std::fs;
    use std::path::PathBuf;

    fn test_viewer(params: FitParams) -> Viewer {
        let camera = Camera::perspective(
            Point3::new(0.0, 1.0, 5.0),
            Point3::origin(),
            75.0_f32.to_radians(),
            4.0 / 3.0,
            0.1,
            1000.0,
        );
        let scene = ViewerScene::new(camera, Vec::new(), Vector3::zeros());
        Viewer::new(scene, params)
    }

    fn write_temp_obj(tag: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "meshview_{}_{}_{tag}.obj",
            std::process::id(),
            std::thread::current().name().unwrap_or("t").replace("::", "_"),
        ));
        fs::write(&path, content).unwrap();
        path
    }

    const TRIANGLE_OBJ: &str = "v 0.0 0.0 0.0\nv 2.0 0.0 0.0\nv 0.0 4.0 1.0\nf 1 2 3\n";

    #[test]
    fn successful_load_reaches_fitted_state() {
        let mut viewer = test_viewer(FitParams {
            target_size: 1.0,
            ..Default::default()
        });
        assert_eq!(viewer.state(), ViewerState::Idle);

        let path = write_temp_obj("ok", TRIANGLE_OBJ);
        let fit = viewer.load_model(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(viewer.state(), ViewerState::Fitted);
        assert_relative_eq!(fit.scale_factor, 0.25);

        let bounds = viewer.scene().node().unwrap().world_bounds().unwrap();
        assert_relative_eq!(bounds.max_dimension(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.center().coords.norm(), 0.0, epsilon = 1e-6);
        assert_eq!(viewer.scene().camera.position, fit.camera_position);
        assert_eq!(viewer.scene().camera.target, Point3::origin());
    }

    #[test]
    fn unsupported_format_returns_to_idle() {
        let mut viewer = test_viewer(FitParams::default());
        let err = viewer.load_model(Path::new("model.fbx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert_eq!(viewer.state(), ViewerState::Idle);
        assert!(!viewer.scene().has_node());
    }

    #[test]
    fn failed_load_keeps_previous_model() {
        let mut viewer = test_viewer(FitParams::default());
        let path = write_temp_obj("keep", TRIANGLE_OBJ);
        viewer.load_model(&path).unwrap();
        fs::remove_file(&path).ok();
        let fitted_camera = viewer.scene().camera.position;

        // A degenerate follow-up load must not disturb the displayed model.
        let degenerate = write_temp_obj("degen", "v 1.0 1.0 1.0\nv 1.0 1.0 1.0\nv 1.0 1.0 1.0\nf 1 2 3\n");
        let err = viewer.load_model(&degenerate).unwrap_err();
        fs::remove_file(&degenerate).ok();

        assert!(matches!(err, Error::DegenerateGeometry));
        assert_eq!(viewer.state(), ViewerState::Fitted);
        assert!(viewer.scene().has_node());
        assert_eq!(viewer.scene().camera.position, fitted_camera);
    }

    #[test]
    fn reload_replaces_the_slot() {
        let mut viewer = test_viewer(FitParams::default());
        let first = write_temp_obj("first", TRIANGLE_OBJ);
        let second = write_temp_obj("second", TRIANGLE_OBJ);
        viewer.load_model(&first).unwrap();
        viewer.load_model(&second).unwrap();
        fs::remove_file(&first).ok();
        fs::remove_file(&second).ok();

        let name = &viewer.scene().node().unwrap().model.name;
        assert!(name.contains("second"));
    }
}
