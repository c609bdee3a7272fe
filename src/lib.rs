pub mod math;
pub mod render;
pub mod scene;
