use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{
    point::Point,
    tuple::{Tuple, homogeneous_tuple, zip_with},
};

homogeneous_tuple!(Vector, 0.);

impl Vector {
    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_coords(self.coords.map(f))
    }

    pub fn dot(&self, rhs: Self) -> f64 {
        zip_with(self.coords, rhs.coords, |a, b| a * b).iter().sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(&self) -> Self {
        let len = self.magnitude();
        if len == 0. { *self } else { *self / len }
    }

    pub fn cross(&self, rhs: Self) -> Self {
        let [ax, ay, az] = self.coords;
        let [bx, by, bz] = rhs.coords;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Mirrors the vector around `normal`, which is expected to be normalized.
    pub fn reflect(&self, normal: Self) -> Self {
        *self - normal * (2. * self.dot(normal))
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_coords(zip_with(self.coords, rhs.coords, |a, b| a + b))
    }
}

impl Add<Point> for Vector {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        rhs + self
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_coords(zip_with(self.coords, rhs.coords, |a, b| a - b))
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|c| c * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.map(|c| c / rhs)
    }
}
