/*!
 * Arithmetic operator implementations for [Matrix](crate::matrices::Matrix).
 *
 * Every operation is implemented for each combination of owned and referenced
 * operands, always returning a new Matrix.
 */

use crate::matrices::{Matrix, dot};

use std::ops::{Add, Mul, Sub};

#[track_caller]
#[inline]
fn matrix_addition(left: &Matrix, right: &Matrix) -> Matrix {
    // LxM + LxM -> LxM
    assert!(left.size() == right.size(),
        "Mismatched matrices, left is {}x{}, right is {}x{}, + is only defined for MxN + MxN",
        left.rows(), left.columns(), right.rows(), right.columns());

    let values = left
        .row_major_iter()
        .zip(right.row_major_iter())
        .map(|(x, y)| x + y)
        .collect();
    Matrix::from_flat_row_major(left.size(), values)
}

#[track_caller]
#[inline]
fn matrix_subtraction(left: &Matrix, right: &Matrix) -> Matrix {
    // LxM - LxM -> LxM
    assert!(left.size() == right.size(),
        "Mismatched matrices, left is {}x{}, right is {}x{}, - is only defined for MxN - MxN",
        left.rows(), left.columns(), right.rows(), right.columns());

    let values = left
        .row_major_iter()
        .zip(right.row_major_iter())
        .map(|(x, y)| x - y)
        .collect();
    Matrix::from_flat_row_major(left.size(), values)
}

#[track_caller]
#[inline]
fn matrix_multiplication(left: &Matrix, right: &Matrix) -> Matrix {
    // LxM * MxN -> LxN
    assert!(left.columns() == right.rows(),
        "Mismatched Matrices, left is {}x{}, right is {}x{}, * is only defined for MxN * NxL",
        left.rows(), left.columns(), right.rows(), right.columns());

    // transposing the right hand side once lets every dot product read two contiguous rows
    let right = right.transpose();
    let mut values = Vec::with_capacity(left.rows() * right.rows());
    for i in 0..left.rows() {
        for j in 0..right.rows() {
            values.push(dot(left.row_values(i), right.row_values(j)));
        }
    }
    Matrix::from_flat_row_major((left.rows(), right.rows()), values)
}

macro_rules! matrix_operation {
    (impl $op:tt for Matrix { fn $method:ident } $implementation:ident $doc:tt) => {
        #[doc=$doc]
        impl $op<&Matrix> for &Matrix {
            type Output = Matrix;

            #[track_caller]
            #[inline]
            fn $method(self, rhs: &Matrix) -> Self::Output {
                $implementation(self, rhs)
            }
        }

        #[doc=$doc]
        impl $op<Matrix> for &Matrix {
            type Output = Matrix;

            #[track_caller]
            #[inline]
            fn $method(self, rhs: Matrix) -> Self::Output {
                $implementation(self, &rhs)
            }
        }

        #[doc=$doc]
        impl $op<&Matrix> for Matrix {
            type Output = Matrix;

            #[track_caller]
            #[inline]
            fn $method(self, rhs: &Matrix) -> Self::Output {
                $implementation(&self, rhs)
            }
        }

        #[doc=$doc]
        impl $op<Matrix> for Matrix {
            type Output = Matrix;

            #[track_caller]
            #[inline]
            fn $method(self, rhs: Matrix) -> Self::Output {
                $implementation(&self, &rhs)
            }
        }
    };
}

matrix_operation!(impl Add for Matrix { fn add } matrix_addition "Elementwise addition for two matrices");
matrix_operation!(impl Sub for Matrix { fn sub } matrix_subtraction "Elementwise subtraction for two matrices");
matrix_operation!(impl Mul for Matrix { fn mul } matrix_multiplication "Matrix multiplication for two matrices");
