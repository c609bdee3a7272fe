use crate::math::{matrix::Matrix, point::Point, transform::Transform, vector::Vector};

#[derive(Clone, Copy, Debug, Default)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Transform for Ray {
    fn transform(&mut self, matrix: &Matrix) {
        self.origin.transform(matrix);
        self.direction.transform(matrix);
    }
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    pub fn position(&self, time: f64) -> Point {
        self.origin + self.direction * time
    }

    pub fn origin(&self) -> &Point {
        &self.origin
    }

    pub fn direction(&self) -> &Vector {
        &self.direction
    }
}
