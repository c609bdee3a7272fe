use super::{matrix::Matrix, tuple::Axis};

/// One affine step, as listed in scene files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transformation {
    Translation(f64, f64, f64),
    Scaling(f64, f64, f64),
    Rotation(Axis, f64),
    Shearing(f64, f64, f64, f64, f64, f64),
    Identity,
}

impl Transformation {
    pub fn scaling_uniform(factor: f64) -> Self {
        Self::Scaling(factor, factor, factor)
    }

    pub fn matrix(&self) -> Matrix {
        match *self {
            Self::Translation(x, y, z) => Matrix::translation(x, y, z),
            Self::Scaling(x, y, z) => Matrix::scaling(x, y, z),
            Self::Rotation(Axis::X, radians) => Matrix::rotation_x(radians),
            Self::Rotation(Axis::Y, radians) => Matrix::rotation_y(radians),
            Self::Rotation(Axis::Z, radians) => Matrix::rotation_z(radians),
            Self::Shearing(xy, xz, yx, yz, zx, zy) => Matrix::shearing(xy, xz, yx, yz, zx, zy),
            Self::Identity => Matrix::identity(),
        }
    }
}

impl From<Transformation> for Matrix {
    fn from(step: Transformation) -> Self {
        step.matrix()
    }
}

/// Steps are applied in list order: the first entry acts on the object first.
impl From<&[Transformation]> for Matrix {
    fn from(steps: &[Transformation]) -> Self {
        steps
            .iter()
            .fold(Matrix::identity(), |acc, step| step.matrix() * acc)
    }
}

impl From<Vec<Transformation>> for Matrix {
    fn from(steps: Vec<Transformation>) -> Self {
        Matrix::from(steps.as_slice())
    }
}

/// Anything a matrix can move. Chained calls left-multiply, so
/// `x.rotate_x(a).translate(..)` rotates first and translates second.
pub trait Transform: Sized + Clone {
    fn transform(&mut self, matrix: &Matrix);

    fn transform_new(&self, matrix: &Matrix) -> Self {
        let mut moved = self.clone();
        moved.transform(matrix);
        moved
    }

    /// Ends a chain of `&mut` calls with an owned copy.
    fn transformed(&mut self) -> Self {
        self.clone()
    }

    fn apply(&mut self, step: Transformation) -> &mut Self {
        self.transform(&step.matrix());
        self
    }

    fn translate(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.apply(Transformation::Translation(x, y, z))
    }

    fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.apply(Transformation::Scaling(x, y, z))
    }

    fn scale_uniform(&mut self, factor: f64) -> &mut Self {
        self.apply(Transformation::scaling_uniform(factor))
    }

    fn rotate_x(&mut self, radians: f64) -> &mut Self {
        self.apply(Transformation::Rotation(Axis::X, radians))
    }

    fn rotate_y(&mut self, radians: f64) -> &mut Self {
        self.apply(Transformation::Rotation(Axis::Y, radians))
    }

    fn rotate_z(&mut self, radians: f64) -> &mut Self {
        self.apply(Transformation::Rotation(Axis::Z, radians))
    }

    fn shear(&mut self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> &mut Self {
        self.apply(Transformation::Shearing(xy, xz, yx, yz, zx, zy))
    }
}
