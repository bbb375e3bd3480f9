use crate::core::bounds::Aabb;
use crate::scene::model::Model;
use nalgebra::Vector3;

/// A model placed in the scene with the two mutable transform fields the
/// fit engine writes: a uniform scale and a parent-frame position. The
/// world transform is scale-then-translate, matching the order fixed by
/// the fit computation.
pub struct SceneNode {
    pub model: Model,
    pub scale: f32,
    pub position: Vector3<f32>,
}

impl SceneNode {
    /// Places a model with the identity transform.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            scale: 1.0,
            position: Vector3::zeros(),
        }
    }

    /// World-space bounding box: the local box mapped through the node's
    /// transform. `None` when the model has no vertices.
    pub fn world_bounds(&self) -> Option<Aabb> {
        self.model
            .bounds()
            .map(|b| b.scaled_translated(self.scale, &self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::Mesh;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn world_bounds_follow_transform() {
        let model = Model::new("cube", vec![Mesh::cube(Point3::new(1.0, 1.0, 1.0), 1.0)]);
        let mut node = SceneNode::new(model);
        node.scale = 2.0;
        node.position = Vector3::new(-2.0, -2.0, -2.0);

        let bounds = node.world_bounds().unwrap();
        assert_relative_eq!(bounds.center().coords.norm(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max_dimension(), 4.0);
    }
}
