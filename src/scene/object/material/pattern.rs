use crate::{
    math::{color::Color, matrix::Matrix, point::Point, tuple::Tuple},
    scene::object::Object,
};

/// Color function of a point in pattern space.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates every unit along x.
    Stripe(Color, Color),
    /// Blends from the first color to the second within every unit along x.
    Gradient(Color, Color),
    /// Concentric unit bands around the y axis.
    Ring(Color, Color),
    /// Unit cubes alternating in all three dimensions.
    Checkers(Color, Color),
    /// Echoes the pattern space coordinates back as a color.
    Coordinates,
}

/// Surface coloring. Spatial patterns own a transformation that is applied on
/// top of the object's one.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Const(Color),
    Spatial {
        kind: PatternKind,
        inverse_transformation: Matrix,
    },
}

/// Picks `even` for cells with an even index. Works for negative cells too.
fn alternate(cell: f64, even: Color, odd: Color) -> Color {
    if cell.floor().rem_euclid(2.) == 0. { even } else { odd }
}

impl PatternKind {
    fn color_at(&self, point: Point) -> Color {
        match self {
            Self::Stripe(a, b) => alternate(point.x(), *a, *b),
            Self::Gradient(from, to) => *from + (*to - *from) * (point.x() - point.x().floor()),
            Self::Ring(a, b) => alternate(point.x().hypot(point.z()), *a, *b),
            Self::Checkers(a, b) => {
                let cell = point.x().floor() + point.y().floor() + point.z().floor();
                alternate(cell, *a, *b)
            }
            Self::Coordinates => Color::new(point.x(), point.y(), point.z()),
        }
    }
}

impl Pattern {
    /// Panics if `transformation` is singular.
    pub fn spatial(kind: PatternKind, transformation: Option<Matrix>) -> Self {
        let inverse_transformation = transformation
            .unwrap_or_default()
            .inverse()
            .expect("pattern transformation matrix must be inversible");
        Self::Spatial {
            kind,
            inverse_transformation,
        }
    }

    pub fn stripe(a: Color, b: Color, transformation: Option<Matrix>) -> Self {
        Self::spatial(PatternKind::Stripe(a, b), transformation)
    }

    pub fn gradient(from: Color, to: Color, transformation: Option<Matrix>) -> Self {
        Self::spatial(PatternKind::Gradient(from, to), transformation)
    }

    pub fn ring(a: Color, b: Color, transformation: Option<Matrix>) -> Self {
        Self::spatial(PatternKind::Ring(a, b), transformation)
    }

    pub fn checkers(a: Color, b: Color, transformation: Option<Matrix>) -> Self {
        Self::spatial(PatternKind::Checkers(a, b), transformation)
    }

    pub fn coordinates(transformation: Option<Matrix>) -> Self {
        Self::spatial(PatternKind::Coordinates, transformation)
    }

    /// Color at a point already expressed in pattern space.
    pub fn color_at(&self, pattern_point: Point) -> Color {
        match self {
            Self::Const(color) => *color,
            Self::Spatial { kind, .. } => kind.color_at(pattern_point),
        }
    }

    /// Color of `object` at a world space point: world to object space,
    /// then object to pattern space.
    pub fn color_on(&self, object: &Object, world_point: Point) -> Color {
        match self {
            Self::Const(color) => *color,
            Self::Spatial {
                kind,
                inverse_transformation,
            } => {
                let object_point = object.transformation_inverse() * world_point;
                kind.color_at(inverse_transformation * object_point)
            }
        }
    }
}
