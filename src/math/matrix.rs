use std::ops::Mul;

use super::{point::Point, transform::Transform, tuple::Tuple, vector::Vector};

pub mod square;

use square::SquareMatrix;

/// Affine transform over homogeneous coordinates.
pub type Matrix = SquareMatrix<4>;
pub type Matrix3 = SquareMatrix<3>;
pub type Matrix2 = SquareMatrix<2>;

fn dot4(lhs: [f64; 4], rhs: [f64; 4]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

fn homogeneous<T: Tuple>(t: &T) -> [f64; 4] {
    [t.x(), t.y(), t.z(), t.w()]
}

impl Transform for Matrix {
    fn transform(&mut self, matrix: &Matrix) {
        *self = matrix * &*self;
    }
}

impl Matrix {
    /// Same as `self.transpose() * rhs` without building the transposed matrix.
    pub fn mul_transposed<T: Tuple>(&self, rhs: T) -> T {
        let h = homogeneous(&rhs);
        T::new(
            dot4(self.column(0), h),
            dot4(self.column(1), h),
            dot4(self.column(2), h),
        )
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;
        m
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 0)] = x;
        m[(1, 1)] = y;
        m[(2, 2)] = z;
        m
    }

    pub fn scaling_uniform(factor: f64) -> Matrix {
        Self::scaling(factor, factor, factor)
    }

    /// Rotation in the plane spanned by axes `a` and `b`, turning `a` toward `b`.
    fn plane_rotation(a: usize, b: usize, radians: f64) -> Matrix {
        let (sin, cos) = radians.sin_cos();
        let mut m = Matrix::identity();
        m[(a, a)] = cos;
        m[(a, b)] = -sin;
        m[(b, a)] = sin;
        m[(b, b)] = cos;
        m
    }

    pub fn rotation_x(radians: f64) -> Matrix {
        Self::plane_rotation(1, 2, radians)
    }

    pub fn rotation_y(radians: f64) -> Matrix {
        Self::plane_rotation(2, 0, radians)
    }

    pub fn rotation_z(radians: f64) -> Matrix {
        Self::plane_rotation(0, 1, radians)
    }

    /// Each coordinate moves in proportion to the other two,
    /// e.g. `x_by_y` adds `x_by_y * y` to `x`.
    pub fn shearing(
        x_by_y: f64,
        x_by_z: f64,
        y_by_x: f64,
        y_by_z: f64,
        z_by_x: f64,
        z_by_y: f64,
    ) -> Matrix {
        Matrix::from_rows([
            [1., x_by_y, x_by_z, 0.],
            [y_by_x, 1., y_by_z, 0.],
            [z_by_x, z_by_y, 1., 0.],
            [0., 0., 0., 1.],
        ])
    }

    /// World-to-eye transform for an eye at `from` looking at `to`.
    pub fn view_transformation(from: Point, to: Point, up: Vector) -> Matrix {
        let forward = (to - from).normalize();
        let left = forward.cross(up.normalize());
        let true_up = left.cross(forward);

        let orientation = Matrix::from_rows([
            [left.x(), left.y(), left.z(), 0.],
            [true_up.x(), true_up.y(), true_up.z(), 0.],
            [-forward.x(), -forward.y(), -forward.z(), 0.],
            [0., 0., 0., 1.],
        ]);

        orientation * Matrix::translation(-from.x(), -from.y(), -from.z())
    }
}

impl<T: Tuple> Mul<T> for &Matrix {
    type Output = T;

    fn mul(self, rhs: T) -> T {
        let h = homogeneous(&rhs);
        T::new(dot4(self.row(0), h), dot4(self.row(1), h), dot4(self.row(2), h))
    }
}

impl<T: Tuple> Mul<T> for Matrix {
    type Output = T;

    fn mul(self, rhs: T) -> T {
        (&self).mul(rhs)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

    use super::*;
    use crate::assert_approx_eq_low_prec;

    fn sample() -> Matrix {
        Matrix::from_rows([
            [8., -5., 9., 2.],
            [7., 5., 6., 1.],
            [-6., 0., 9., 6.],
            [-3., 0., -9., -4.],
        ])
    }

    #[test]
    fn product_of_matrices() {
        let a = Matrix::from_rows([
            [1., 2., 3., 4.],
            [5., 6., 7., 8.],
            [9., 8., 7., 6.],
            [5., 4., 3., 2.],
        ]);
        let b = Matrix::from_rows([
            [-2., 1., 2., 3.],
            [3., 2., 1., -1.],
            [4., 3., 6., 5.],
            [1., 2., 7., 8.],
        ]);
        let expected = Matrix::from_rows([
            [20., 22., 50., 48.],
            [44., 54., 114., 108.],
            [40., 58., 110., 102.],
            [16., 26., 46., 42.],
        ]);

        assert_approx_eq_low_prec!(a * b, expected);
        let mut c = a;
        c *= b;
        assert_approx_eq_low_prec!(c, expected);
        assert_approx_eq_low_prec!(a * Matrix::identity(), a);
    }

    #[test]
    fn product_with_point_and_vector() {
        let m = Matrix::from_rows([
            [1., 2., 3., 4.],
            [2., 4., 4., 2.],
            [8., 6., 4., 1.],
            [0., 0., 0., 1.],
        ]);

        assert_approx_eq_low_prec!(m * Point::new(1., 2., 3.), Point::new(18., 24., 33.));
        // vectors ignore the translation column
        assert_approx_eq_low_prec!(m * Vector::new(1., 2., 3.), Vector::new(14., 22., 32.));
    }

    #[test]
    fn mul_transposed_matches_transpose() {
        let m = sample();
        let v = Vector::new(1., -2., 0.5);

        assert_approx_eq_low_prec!(m.mul_transposed(v), m.transpose() * v);
    }

    #[test]
    fn four_by_four_determinant() {
        let m = Matrix::from_rows([
            [-2., -8., 3., 5.],
            [-3., 1., 7., 3.],
            [1., 2., -9., 6.],
            [-6., 7., 7., -9.],
        ]);

        assert_approx_eq_low_prec!(m.cofactor(0, 0), 690.);
        assert_approx_eq_low_prec!(m.cofactor(0, 1), 447.);
        assert_approx_eq_low_prec!(m.cofactor(0, 2), 210.);
        assert_approx_eq_low_prec!(m.cofactor(0, 3), 51.);
        assert_approx_eq_low_prec!(m.determinant(), -4071.);
        let sub: Matrix3 = m.submatrix(0, 0);
        assert_approx_eq_low_prec!(sub.determinant(), 690.);
    }

    #[test]
    fn known_inverse() {
        let expected = Matrix::from_rows([
            [-0.15385, -0.15385, -0.28205, -0.53846],
            [-0.07692, 0.12308, 0.02564, 0.03077],
            [0.35897, 0.35897, 0.43590, 0.92308],
            [-0.69231, -0.69231, -0.76923, -1.92308],
        ]);

        assert_approx_eq_low_prec!(sample().inverse().unwrap(), expected);
    }

    #[test]
    fn inverse_undoes_product() {
        let a = Matrix::from_rows([
            [3., -9., 7., 3.],
            [3., -8., 2., -9.],
            [-4., 4., 4., 1.],
            [-6., 4., -1., 1.],
        ]);
        let b = sample();
        let b_inv = b.inverse().unwrap();

        assert_approx_eq_low_prec!(a * b * b_inv, a);
        assert_approx_eq_low_prec!(b * b_inv, Matrix::identity());
        assert_approx_eq_low_prec!(b.transpose().inverse().unwrap(), b_inv.transpose());
    }

    #[test]
    fn singular_matrices_have_no_inverse() {
        let m = Matrix::from_rows([
            [-4., 2., -2., -3.],
            [9., 6., 2., 6.],
            [0., -5., 1., -5.],
            [0., 0., 0., 0.],
        ]);

        assert_approx_eq_low_prec!(m.determinant(), 0.);
        assert!(m.inverse().is_none());
        assert!(Matrix::scaling(1., 0., 1.).inverse().is_none());
    }

    #[test]
    fn small_uniform_scale_is_invertible() {
        let tiny = Matrix::scaling_uniform(0.02);
        let inverse = tiny.inverse().unwrap();

        assert_approx_eq_low_prec!(inverse, Matrix::scaling_uniform(50.));
        assert_approx_eq_low_prec!(tiny * inverse, Matrix::identity());
    }

    #[test]
    fn translation_moves_points_only() {
        let t = Matrix::translation(5., -3., 2.);
        let p = Point::new(-3., 4., 5.);
        let v = Vector::new(-3., 4., 5.);

        assert_approx_eq_low_prec!(t * p, Point::new(2., 1., 7.));
        assert_approx_eq_low_prec!(t.inverse().unwrap() * p, Point::new(-8., 7., 3.));
        assert_approx_eq_low_prec!(t * v, v);
    }

    #[test]
    fn scaling_and_reflection() {
        let s = Matrix::scaling(2., 3., 4.);

        assert_approx_eq_low_prec!(s * Point::new(-4., 6., 8.), Point::new(-8., 18., 32.));
        assert_approx_eq_low_prec!(
            s.inverse().unwrap() * Vector::new(-4., 6., 8.),
            Vector::new(-2., 2., 2.)
        );
        assert_approx_eq_low_prec!(
            Matrix::scaling(-1., 1., 1.) * Point::new(2., 3., 4.),
            Point::new(-2., 3., 4.)
        );
    }

    #[test]
    fn rotations_follow_the_left_hand_rule() {
        let half = SQRT_2 / 2.;

        assert_approx_eq_low_prec!(
            Matrix::rotation_x(FRAC_PI_4) * Point::new(0., 1., 0.),
            Point::new(0., half, half)
        );
        assert_approx_eq_low_prec!(
            Matrix::rotation_x(FRAC_PI_4).inverse().unwrap() * Point::new(0., 1., 0.),
            Point::new(0., half, -half)
        );
        assert_approx_eq_low_prec!(
            Matrix::rotation_y(FRAC_PI_4) * Point::new(0., 0., 1.),
            Point::new(half, 0., half)
        );
        assert_approx_eq_low_prec!(
            Matrix::rotation_y(FRAC_PI_2) * Point::new(0., 0., 1.),
            Point::new(1., 0., 0.)
        );
        assert_approx_eq_low_prec!(
            Matrix::rotation_z(FRAC_PI_4) * Point::new(0., 1., 0.),
            Point::new(-half, half, 0.)
        );
        assert_approx_eq_low_prec!(
            Matrix::rotation_z(FRAC_PI_2) * Point::new(0., 1., 0.),
            Point::new(-1., 0., 0.)
        );
    }

    #[test]
    fn shearing_each_pair() {
        let p = Point::new(2., 3., 4.);
        let cases = [
            ([1., 0., 0., 0., 0., 0.], Point::new(5., 3., 4.)),
            ([0., 1., 0., 0., 0., 0.], Point::new(6., 3., 4.)),
            ([0., 0., 1., 0., 0., 0.], Point::new(2., 5., 4.)),
            ([0., 0., 0., 1., 0., 0.], Point::new(2., 7., 4.)),
            ([0., 0., 0., 0., 1., 0.], Point::new(2., 3., 6.)),
            ([0., 0., 0., 0., 0., 1.], Point::new(2., 3., 7.)),
        ];

        for ([xy, xz, yx, yz, zx, zy], expected) in cases {
            assert_approx_eq_low_prec!(Matrix::shearing(xy, xz, yx, yz, zx, zy) * p, expected);
        }
    }

    #[test]
    fn chained_calls_apply_in_reading_order() {
        let chained = Matrix::rotation_x(FRAC_PI_2)
            .scale_uniform(5.)
            .translate(10., 5., 7.)
            .transformed();

        assert_approx_eq_low_prec!(chained * Point::new(1., 0., 1.), Point::new(15., 0., 7.));
    }

    #[test]
    fn view_transformation_defaults_to_identity() {
        let view = Matrix::view_transformation(
            Point::zero(),
            Point::new(0., 0., -1.),
            Vector::new(0., 1., 0.),
        );

        assert_approx_eq_low_prec!(view, Matrix::identity());
    }

    #[test]
    fn looking_toward_positive_z_mirrors_x_and_z() {
        let view = Matrix::view_transformation(
            Point::zero(),
            Point::new(0., 0., 1.),
            Vector::new(0., 1., 0.),
        );

        assert_approx_eq_low_prec!(view, Matrix::scaling(-1., 1., -1.));
    }

    #[test]
    fn view_transformation_moves_the_world() {
        let view = Matrix::view_transformation(
            Point::new(0., 0., 8.),
            Point::zero(),
            Vector::new(0., 1., 0.),
        );

        assert_approx_eq_low_prec!(view, Matrix::translation(0., 0., -8.));
    }

    #[test]
    fn arbitrary_view_transformation() {
        let view = Matrix::view_transformation(
            Point::new(1., 3., 2.),
            Point::new(4., -2., 8.),
            Vector::new(1., 1., 0.),
        );
        let expected = Matrix::from_rows([
            [-0.50709, 0.50709, 0.67612, -2.36643],
            [0.76772, 0.60609, 0.12122, -2.82843],
            [-0.35857, 0.59761, -0.71714, 0.],
            [0., 0., 0., 1.],
        ]);

        assert_approx_eq_low_prec!(view, expected);
    }
}
