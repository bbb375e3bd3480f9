pub mod bounds;
pub mod fit;
pub mod geometry;
pub mod math;
