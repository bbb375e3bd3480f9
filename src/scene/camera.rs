use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

#[derive(Debug, Clone, Copy)]
pub enum Projection {
    Perspective { fov_y_rad: f32 },
    Orthographic { height: f32 },
}

/// View camera. Matrices are derived on demand from the current
/// position/target, so there is no cached state to invalidate when the
/// fit engine (or the turntable) moves the camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
    pub projection: Projection,
}

impl Camera {
    pub fn perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
            near,
            far,
            aspect_ratio,
            projection: Projection::Perspective { fov_y_rad },
        }
    }

    pub fn orthographic(
        position: Point3<f32>,
        target: Point3<f32>,
        height: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vector3::y(),
            near,
            far,
            aspect_ratio,
            projection: Projection::Orthographic { height },
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.projection {
            Projection::Perspective { fov_y_rad } => {
                TransformFactory::perspective(self.aspect_ratio, fov_y_rad, self.near, self.far)
            }
            Projection::Orthographic { height } => {
                let half_height = height / 2.0;
                let half_width = half_height * self.aspect_ratio;
                TransformFactory::orthographic(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Combined projection * view matrix.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}
