use std::ops::{Add, AddAssign, Div, Mul, Sub};

use crate::math::approx_eq::ApproxEq;

/// Linear RGB. Channels are unbounded while shading and only clamped on output.
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    rgb: [f64; 3],
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { rgb: [r, g, b] }
    }

    pub const fn black() -> Self {
        Self::new(0., 0., 0.)
    }

    pub const fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    pub const fn red() -> Self {
        Self::new(1., 0., 0.)
    }

    pub const fn green() -> Self {
        Self::new(0., 1., 0.)
    }

    pub const fn blue() -> Self {
        Self::new(0., 0., 1.)
    }

    pub fn r(&self) -> f64 {
        self.rgb[0]
    }

    pub fn g(&self) -> f64 {
        self.rgb[1]
    }

    pub fn b(&self) -> f64 {
        self.rgb[2]
    }

    fn combine(self, other: Color, op: impl Fn(f64, f64) -> f64) -> Color {
        let [r1, g1, b1] = self.rgb;
        let [r2, g2, b2] = other.rgb;
        Color::new(op(r1, r2), op(g1, g2), op(b1, b2))
    }

    /// 8 bit channels, clamped to [0, 1] before scaling.
    pub fn as_scaled_values(&self) -> [u8; 3] {
        self.rgb.map(|c| (c.clamp(0., 1.) * 255.).round() as u8)
    }
}

impl ApproxEq for Color {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.rgb
            .iter()
            .zip(&other.rgb)
            .all(|(a, b)| a.approx_eq_epsilon(b, epsilon))
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a + b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a - b)
    }
}

/// Hadamard product, used to filter light through a surface color.
impl Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.combine(rhs, |a, b| a * b)
    }
}

impl Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            rgb: self.rgb.map(|c| c * rhs),
        }
    }
}

impl Div<f64> for Color {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self * rhs.recip()
    }
}
