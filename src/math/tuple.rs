#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub(crate) fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Homogeneous coordinates. `w` is fixed by the implementing type,
/// 1 for points and 0 for vectors.
pub trait Tuple {
    const W: f64;

    fn new(x: f64, y: f64, z: f64) -> Self;

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;

    fn w(&self) -> f64 {
        Self::W
    }

    fn xyz(&self) -> [f64; 3] {
        [self.x(), self.y(), self.z()]
    }
}

pub(crate) fn zip_with(lhs: [f64; 3], rhs: [f64; 3], f: impl Fn(f64, f64) -> f64) -> [f64; 3] {
    [f(lhs[0], rhs[0]), f(lhs[1], rhs[1]), f(lhs[2], rhs[2])]
}

/// Shared plumbing of `Point` and `Vector`: both are three stored coordinates
/// and an implicit `w`.
macro_rules! homogeneous_tuple {
    ($name:ident, $w:expr) => {
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $name {
            coords: [f64; 3],
        }

        impl $name {
            pub fn zero() -> Self {
                Self { coords: [0.; 3] }
            }

            fn from_coords(coords: [f64; 3]) -> Self {
                Self { coords }
            }
        }

        impl $crate::math::tuple::Tuple for $name {
            const W: f64 = $w;

            fn new(x: f64, y: f64, z: f64) -> Self {
                Self { coords: [x, y, z] }
            }

            fn x(&self) -> f64 {
                self.coords[0]
            }

            fn y(&self) -> f64 {
                self.coords[1]
            }

            fn z(&self) -> f64 {
                self.coords[2]
            }
        }

        impl std::ops::Index<$crate::math::tuple::Axis> for $name {
            type Output = f64;

            fn index(&self, axis: $crate::math::tuple::Axis) -> &f64 {
                &self.coords[axis.index()]
            }
        }

        impl $crate::math::approx_eq::ApproxEq for $name {
            fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
                self.coords
                    .iter()
                    .zip(other.coords.iter())
                    .all(|(a, b)| $crate::math::approx_eq::ApproxEq::approx_eq_epsilon(a, b, epsilon))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::math::approx_eq::ApproxEq::approx_eq(self, other)
            }
        }

        impl $crate::math::transform::Transform for $name {
            fn transform(&mut self, matrix: &$crate::math::matrix::Matrix) {
                *self = matrix * *self;
            }
        }
    };
}

pub(crate) use homogeneous_tuple;
