use std::ops::{Add, Sub};

use super::{
    tuple::{Tuple, homogeneous_tuple, zip_with},
    vector::Vector,
};

homogeneous_tuple!(Point, 1.);

impl Point {
    pub fn distance(&self, other: Point) -> f64 {
        (other - *self).magnitude()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::from_coords(zip_with(self.coords, rhs.xyz(), |a, b| a + b))
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::from_coords(zip_with(self.coords, rhs.xyz(), |a, b| a - b))
    }
}

/// The offset between two points is a vector.
impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        let [x, y, z] = zip_with(self.coords, rhs.coords, |a, b| a - b);
        Vector::new(x, y, z)
    }
}
