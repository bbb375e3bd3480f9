pub mod camera;
pub mod context;
pub mod light;
pub mod mesh;
pub mod model;
pub mod node;
