pub mod approx_eq;
pub mod color;
pub mod matrix;
pub mod point;
pub mod transform;
pub mod tuple;
pub mod vector;
