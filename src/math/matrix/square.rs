use std::ops::{Index, IndexMut, Mul, MulAssign};

use crate::math::approx_eq::ApproxEq;

/// Pivots smaller than this fraction of the largest entry are treated as zero
/// during elimination. Relative, so uniformly tiny transforms stay invertible.
const SINGULAR_PIVOT_RATIO: f64 = 1e-12;

/// Row-major `N`x`N` matrix.
#[derive(Debug, Clone, Copy)]
pub struct SquareMatrix<const N: usize> {
    rows: [[f64; N]; N],
}

impl<const N: usize> SquareMatrix<N> {
    pub const fn from_rows(rows: [[f64; N]; N]) -> Self {
        Self { rows }
    }

    pub fn zero() -> Self {
        Self::from_rows([[0.; N]; N])
    }

    pub fn identity() -> Self {
        let mut res = Self::zero();
        (0..N).for_each(|i| res.rows[i][i] = 1.);
        res
    }

    pub fn row(&self, row: usize) -> [f64; N] {
        self.rows[row]
    }

    pub fn column(&self, col: usize) -> [f64; N] {
        self.rows.map(|row| row[col])
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(std::array::from_fn(|row| self.column(row)))
    }

    /// Copy without `row` and `col`. `M` has to be `N - 1`.
    pub fn submatrix<const M: usize>(&self, row: usize, col: usize) -> SquareMatrix<M> {
        assert_eq!(M + 1, N, "submatrix drops exactly one row and column");
        SquareMatrix::from_rows(std::array::from_fn(|r| {
            let src_row = if r < row { r } else { r + 1 };
            std::array::from_fn(|c| {
                let src_col = if c < col { c } else { c + 1 };
                self.rows[src_row][src_col]
            })
        }))
    }

    pub fn minor(&self, row: usize, col: usize) -> f64 {
        let mut reduced = [[0.; N]; N];
        for (r, src) in (0..N).filter(|&r| r != row).enumerate() {
            for (c, src_col) in (0..N).filter(|&c| c != col).enumerate() {
                reduced[r][c] = self.rows[src][src_col];
            }
        }
        eliminate_determinant(reduced, N - 1)
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let sign = if (row + col) % 2 == 0 { 1. } else { -1. };
        sign * self.minor(row, col)
    }

    pub fn determinant(&self) -> f64 {
        eliminate_determinant(self.rows, N)
    }

    /// Gauss-Jordan elimination with partial pivoting.
    /// Returns `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let scale = self
            .rows
            .iter()
            .flatten()
            .fold(0_f64, |acc, v| acc.max(v.abs()));
        if scale == 0. || !scale.is_finite() {
            return None;
        }

        let mut left = self.rows;
        let mut right = Self::identity().rows;

        for col in 0..N {
            let pivot_row = pick_pivot(&left, col, N);
            let pivot = left[pivot_row][col];
            if pivot.abs() <= scale * SINGULAR_PIVOT_RATIO {
                return None;
            }
            left.swap(col, pivot_row);
            right.swap(col, pivot_row);

            for c in 0..N {
                left[col][c] /= pivot;
                right[col][c] /= pivot;
            }

            for row in (0..N).filter(|&row| row != col) {
                let factor = left[row][col];
                if factor == 0. {
                    continue;
                }
                for c in 0..N {
                    left[row][c] -= factor * left[col][c];
                    right[row][c] -= factor * right[col][c];
                }
            }
        }

        Some(Self::from_rows(right))
    }
}

/// Row with the largest magnitude in `col`, at or below the diagonal.
fn pick_pivot<const N: usize>(rows: &[[f64; N]; N], col: usize, size: usize) -> usize {
    (col..size)
        .max_by(|&a, &b| rows[a][col].abs().total_cmp(&rows[b][col].abs()))
        .unwrap_or(col)
}

/// Determinant of the leading `size`x`size` block, by reduction to upper
/// triangular form.
fn eliminate_determinant<const N: usize>(mut rows: [[f64; N]; N], size: usize) -> f64 {
    let mut det = 1.;
    for col in 0..size {
        let pivot_row = pick_pivot(&rows, col, size);
        let pivot = rows[pivot_row][col];
        if pivot == 0. {
            return 0.;
        }
        if pivot_row != col {
            rows.swap(col, pivot_row);
            det = -det;
        }
        det *= pivot;

        for row in col + 1..size {
            let factor = rows[row][col] / pivot;
            for c in col..size {
                rows[row][c] -= factor * rows[col][c];
            }
        }
    }
    det
}

impl<const N: usize> Default for SquareMatrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> ApproxEq for SquareMatrix<N> {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.approx_eq_epsilon(b, epsilon))
    }
}

impl<const N: usize> PartialEq for SquareMatrix<N> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl<const N: usize> Index<(usize, usize)> for SquareMatrix<N> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.rows[row][col]
    }
}

impl<const N: usize> IndexMut<(usize, usize)> for SquareMatrix<N> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.rows[row][col]
    }
}

impl<const N: usize> Mul<&SquareMatrix<N>> for &SquareMatrix<N> {
    type Output = SquareMatrix<N>;

    fn mul(self, rhs: &SquareMatrix<N>) -> SquareMatrix<N> {
        SquareMatrix::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let column = rhs.column(col);
                self.rows[row]
                    .iter()
                    .zip(column.iter())
                    .map(|(a, b)| a * b)
                    .sum()
            })
        }))
    }
}

impl<const N: usize> Mul for SquareMatrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<const N: usize> MulAssign for SquareMatrix<N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
