pub mod camera;
pub mod canvas;
pub mod intersection;
pub mod ray;
