use crate::core::bounds::Aabb;
use crate::core::geometry::Vertex;
use nalgebra::{Point3, Vector2, Vector3};

/// A collection of vertices and triangle indices (3 per face).
#[derive(Debug)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Local-space bounding box, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }

    /// Axis-aligned cube spanning `center ± half_extent`, with face normals.
    /// Used by tests and as a stand-in model.
    pub fn cube(center: Point3<f32>, half_extent: f32) -> Self {
        let h = half_extent;
        // (normal, four corners CCW when viewed from outside)
        let faces: [(Vector3<f32>, [Vector3<f32>; 4]); 6] = [
            (
                Vector3::new(0.0, 0.0, 1.0),
                [
                    Vector3::new(-h, -h, h),
                    Vector3::new(h, -h, h),
                    Vector3::new(h, h, h),
                    Vector3::new(-h, h, h),
                ],
            ),
            (
                Vector3::new(0.0, 0.0, -1.0),
                [
                    Vector3::new(h, -h, -h),
                    Vector3::new(-h, -h, -h),
                    Vector3::new(-h, h, -h),
                    Vector3::new(h, h, -h),
                ],
            ),
            (
                Vector3::new(1.0, 0.0, 0.0),
                [
                    Vector3::new(h, -h, h),
                    Vector3::new(h, -h, -h),
                    Vector3::new(h, h, -h),
                    Vector3::new(h, h, h),
                ],
            ),
            (
                Vector3::new(-1.0, 0.0, 0.0),
                [
                    Vector3::new(-h, -h, -h),
                    Vector3::new(-h, -h, h),
                    Vector3::new(-h, h, h),
                    Vector3::new(-h, h, -h),
                ],
            ),
            (
                Vector3::new(0.0, 1.0, 0.0),
                [
                    Vector3::new(-h, h, h),
                    Vector3::new(h, h, h),
                    Vector3::new(h, h, -h),
                    Vector3::new(-h, h, -h),
                ],
            ),
            (
                Vector3::new(0.0, -1.0, 0.0),
                [
                    Vector3::new(-h, -h, -h),
                    Vector3::new(h, -h, -h),
                    Vector3::new(h, -h, h),
                    Vector3::new(-h, -h, h),
                ],
            ),
        ];

        let uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.into_iter().zip(uvs) {
                vertices.push(Vertex::new(center + corner, normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }
}
