//! 4x4 Matrices

use super::Float;
use std::ops::{Index, Mul};

/// Stores a 4x4 matrix of `Float` values in row-major order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4x4 {
    pub m: [[Float; 4]; 4],
}

/// The identity matrix.
pub const IDENTITY_MATRIX: Matrix4x4 = Matrix4x4 {
    m: [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ],
};

impl Default for Matrix4x4 {
    /// Returns the identity matrix.
    fn default() -> Self {
        IDENTITY_MATRIX
    }
}

/// Creates a new 4x4 matrix from its elements in row-major order.
#[allow(clippy::too_many_arguments)]
#[rustfmt::skip]
pub fn matrix4x4(
    t00: Float, t01: Float, t02: Float, t03: Float,
    t10: Float, t11: Float, t12: Float, t13: Float,
    t20: Float, t21: Float, t22: Float, t23: Float,
    t30: Float, t31: Float, t32: Float, t33: Float,
) -> Matrix4x4 {
    Matrix4x4 {
        m: [
            [t00, t01, t02, t03],
            [t10, t11, t12, t13],
            [t20, t21, t22, t23],
            [t30, t31, t32, t33],
        ],
    }
}

impl Matrix4x4 {
    /// Returns the transpose of the matrix.
    pub fn transpose(&self) -> Matrix4x4 {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[j][i];
            }
        }
        Matrix4x4 { m: r }
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [Float; 4];

    /// Returns a row of the matrix.
    ///
    /// * `i` - Row index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.m[i]
    }
}

impl Mul for Matrix4x4 {
    type Output = Matrix4x4;

    /// Post-multiply the given matrix.
    ///
    /// * `other` - The matrix to post-multiply.
    fn mul(self, other: Self) -> Self::Output {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Matrix4x4 { m: r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral() {
        let a = matrix4x4(
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        );
        assert_eq!(a * IDENTITY_MATRIX, a);
        assert_eq!(IDENTITY_MATRIX * a, a);
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!(a.transpose()[0][3], 13.0);
    }
}
