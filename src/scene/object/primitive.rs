pub mod plane;
pub mod shape;
pub mod sphere;
