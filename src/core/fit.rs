use crate::core::bounds::Aabb;
use crate::error::{Error, Result};
use crate::scene::camera::Camera;
use crate::scene::node::SceneNode;
use nalgebra::{Point3, Vector3};

/// Policy constants for the fit.
///
/// `target_size` is the max dimension the fitted model should occupy,
/// `distance_multiplier` scales the camera's pull-back from that size, and
/// `elevation_ratio` fixes how high above the model the camera sits relative
/// to its distance.
#[derive(Debug, Clone, Copy)]
pub struct FitParams {
    pub target_size: f32,
    pub distance_multiplier: f32,
    pub elevation_ratio: f32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            target_size: 5.0,
            distance_multiplier: 1.5,
            elevation_ratio: 0.5,
        }
    }
}

/// The outcome of fitting one bounding box: computed once per load,
/// applied once, then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Uniform scale bringing the box's max dimension to `target_size`.
    pub scale_factor: f32,
    /// Parent-frame offset moving the scaled box's center to the origin.
    pub translation: Vector3<f32>,
    /// Camera pull-back from the origin, in post-fit units.
    pub camera_distance: f32,
    /// Recommended camera placement framing the fitted model.
    pub camera_position: Point3<f32>,
}

/// Computes the scale, centering translation and camera placement that fit
/// `bounds` into the canonical viewing volume. Pure: the caller applies the
/// result via [`apply_fit`].
///
/// The translation is expressed in the node's parent frame and applied
/// *after* scaling, so the pre-scale center must be multiplied by the scale
/// factor. Subtracting the unscaled center (as the original viewer did)
/// mis-centers any model whose scale factor is not 1.
///
/// The camera distance uses the post-scale basis `target_size *
/// distance_multiplier`: the camera frames the model as it exists after the
/// fit, not at its original size.
///
/// Fails with [`Error::Config`] when `target_size` or `distance_multiplier`
/// is non-positive or non-finite, and with [`Error::DegenerateGeometry`]
/// when the box has no usable extent.
pub fn compute_fit(bounds: &Aabb, params: &FitParams) -> Result<FitResult> {
    if !(params.target_size.is_finite() && params.target_size > 0.0) {
        return Err(Error::Config(format!(
            "fit target_size must be positive and finite, got {}",
            params.target_size
        )));
    }
    if !(params.distance_multiplier.is_finite() && params.distance_multiplier > 0.0) {
        return Err(Error::Config(format!(
            "fit distance_multiplier must be positive and finite, got {}",
            params.distance_multiplier
        )));
    }

    if bounds.is_degenerate() {
        return Err(Error::DegenerateGeometry);
    }

    let max_dimension = bounds.max_dimension();
    let scale_factor = params.target_size / max_dimension;
    let translation = -bounds.center().coords * scale_factor;

    let camera_distance = params.target_size * params.distance_multiplier;
    let camera_position = Point3::new(
        0.0,
        camera_distance * params.elevation_ratio,
        camera_distance,
    );

    Ok(FitResult {
        scale_factor,
        translation,
        camera_distance,
        camera_position,
    })
}

/// Applies a fully computed fit: node scale, node position, then camera.
///
/// The camera is retargeted at the origin, where the fitted model's center
/// now lies. Re-applying the same result to an already-fitted node is a
/// no-op up to floating-point rounding.
pub fn apply_fit(node: &mut SceneNode, camera: &mut Camera, fit: &FitResult) {
    node.scale = fit.scale_factor;
    node.position = fit.translation;
    camera.position = fit.camera_position;
    camera.target = Point3::origin();
}
