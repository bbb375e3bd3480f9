use crate::core::bounds::Aabb;
use crate::scene::mesh::Mesh;

/// A complete loaded 3D object: one or more meshes under a single name.
#[derive(Debug)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
        }
    }

    /// Local-space box enclosing every mesh; `None` when the model carries
    /// no vertices at all. Recomputed on each call, never cached.
    pub fn bounds(&self) -> Option<Aabb> {
        self.meshes
            .iter()
            .filter_map(Mesh::bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn bounds_union_over_meshes() {
        let model = Model::new(
            "two-cubes",
            vec![
                Mesh::cube(Point3::new(-2.0, 0.0, 0.0), 1.0),
                Mesh::cube(Point3::new(3.0, 1.0, 0.0), 0.5),
            ],
        );
        let bounds = model.bounds().unwrap();
        assert_eq!(bounds.min, Point3::new(-3.0, -1.0, -1.0));
        assert_eq!(bounds.max, Point3::new(3.5, 1.5, 1.0));
    }

    #[test]
    fn empty_model_has_no_bounds() {
        let model = Model::new("empty", vec![Mesh::new(Vec::new(), Vec::new())]);
        assert!(model.bounds().is_none());
    }
}
