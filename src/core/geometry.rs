use nalgebra::{Point3, Vector2, Vector3};

/// A single vertex in local object space.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// Normal vector for lighting.
    pub normal: Vector3<f32>,
    /// Texture coordinates (UV), carried through from loaders that provide them.
    pub texcoord: Vector2<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, texcoord: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }
}
