/*!
 * Linear algebra algorithms on numbers and matrices
 *
 * Every solve in this crate goes through the [Cholesky decomposition](cholesky_decomposition)
 * of a symmetric positive definite matrix followed by forward and backward substitution.
 * Explicit matrix inverses are only ever formed from a Cholesky factor, and only when the
 * inverse itself is wanted, such as for a posterior covariance over weights.
 */

use crate::error::{Error, Result};
use crate::matrices::Matrix;

/**
 * Computes the cholesky decomposition of a matrix. This yields a matrix `L`
 * such that for the provided matrix `A`, `L * L^T = A`. `L` will always be
 * lower triangular, ie all entries above the diagonal will be 0. Hence cholesky
 * decomposition can be interpreted as a generalised square root function.
 *
 * Cholesky decomposition is defined for
 * [Hermitian](https://en.wikipedia.org/wiki/Hermitian_matrix),
 * [positive definite](https://en.wikipedia.org/wiki/Definiteness_of_a_matrix)
 * matrices. For a real valued (ie not containing complex numbers) matrix, if it is
 * [Symmetric](https://en.wikipedia.org/wiki/Symmetric_matrix) it is Hermitian.
 *
 * Only the lower triangle of the provided matrix is read, so a symmetric matrix with
 * tiny rounding differences above the diagonal decomposes the same as its exactly
 * symmetric counterpart.
 *
 * `None` is returned if the matrix is not square, or if it is not positive definite,
 * which shows up as a diagonal pivot that is zero, negative or not finite. A positive
 * semi definite matrix can usually be made decomposable by adding a small jitter to its
 * diagonal.
 *
 * ```
 * use semilinear::matrices::Matrix;
 * use semilinear::linear_algebra;
 * let matrix = Matrix::from(vec![
 *     vec![ 25.0, 15.0, -5.0 ],
 *     vec![ 15.0, 18.0,  0.0 ],
 *     vec![ -5.0,  0.0, 11.0 ]]);
 * let lower_triangular = linear_algebra::cholesky_decomposition(&matrix).unwrap();
 * assert_eq!(lower_triangular, Matrix::from(vec![
 *     vec![  5.0, 0.0, 0.0 ],
 *     vec![  3.0, 3.0, 0.0 ],
 *     vec![ -1.0, 1.0, 3.0 ]]));
 * ```
 */
pub fn cholesky_decomposition(matrix: &Matrix) -> Option<Matrix> {
    if !matrix.is_square() {
        return None;
    }
    // The computation steps are outlined nicely at https://rosettacode.org/wiki/Cholesky_decomposition
    let mut lower_triangular = Matrix::empty(0.0, matrix.size());
    for i in 0..lower_triangular.rows() {
        // Each row only depends on the rows above it, so filling in row by row
        // left to right always has the needed entries computed already.
        for k in 0..=i {
            let mut sum = 0.0;
            for j in 0..k {
                sum += lower_triangular.get(i, j) * lower_triangular.get(k, j);
            }
            if i == k {
                let pivot = matrix.get(i, i) - sum;
                if !(pivot.is_finite() && pivot > 0.0) {
                    return None;
                }
                lower_triangular.set(i, k, pivot.sqrt());
            } else {
                lower_triangular.set(
                    i,
                    k,
                    (matrix.get(i, k) - sum) / lower_triangular.get(k, k),
                );
            }
        }
    }
    Some(lower_triangular)
}

/**
 * Adds the jitter to a copy of the matrix's diagonal and Cholesky decomposes it,
 * returning a [SingularMatrix](Error::SingularMatrix) error naming the matrix if the
 * decomposition is not possible.
 */
pub(crate) fn cholesky_with_jitter(
    matrix: &Matrix,
    jitter: f64,
    name: &'static str,
) -> Result<Matrix> {
    let mut stabilised = matrix.clone();
    if jitter > 0.0 {
        stabilised.add_diagonal_mut(jitter);
    }
    cholesky_decomposition(&stabilised).ok_or(Error::SingularMatrix {
        matrix: name,
        jitter,
    })
}

/**
 * Solves `L * X = B` for `X` by forward substitution, where `L` is lower triangular
 * with a non zero diagonal, such as a Cholesky factor.
 *
 * # Panics
 *
 * If `L` is not square or does not have as many rows as `B`.
 */
#[track_caller]
pub fn solve_lower_triangular(lower_triangular: &Matrix, b: &Matrix) -> Matrix {
    let n = lower_triangular.rows();
    assert!(lower_triangular.is_square(), "Triangular matrix must be square");
    assert!(b.rows() == n, "Right hand side must have {} rows, but has {}", n, b.rows());
    let mut x = b.clone();
    for column in 0..b.columns() {
        for i in 0..n {
            let mut sum = x.get(i, column);
            for j in 0..i {
                sum -= lower_triangular.get(i, j) * x.get(j, column);
            }
            x.set(i, column, sum / lower_triangular.get(i, i));
        }
    }
    x
}

/**
 * Solves `L^T * X = B` for `X` by backward substitution, where `L` is lower triangular
 * with a non zero diagonal. The transpose of `L` is never constructed.
 *
 * # Panics
 *
 * If `L` is not square or does not have as many rows as `B`.
 */
#[track_caller]
pub fn solve_lower_triangular_transpose(lower_triangular: &Matrix, b: &Matrix) -> Matrix {
    let n = lower_triangular.rows();
    assert!(lower_triangular.is_square(), "Triangular matrix must be square");
    assert!(b.rows() == n, "Right hand side must have {} rows, but has {}", n, b.rows());
    let mut x = b.clone();
    for column in 0..b.columns() {
        for i in (0..n).rev() {
            let mut sum = x.get(i, column);
            for j in (i + 1)..n {
                // (L^T)[i][j] == L[j][i]
                sum -= lower_triangular.get(j, i) * x.get(j, column);
            }
            x.set(i, column, sum / lower_triangular.get(i, i));
        }
    }
    x
}

/**
 * Given the Cholesky factor `L` of a matrix `A`, solves `A * X = B` for `X`.
 */
#[track_caller]
pub fn cholesky_solve(lower_triangular: &Matrix, b: &Matrix) -> Matrix {
    let y = solve_lower_triangular(lower_triangular, b);
    solve_lower_triangular_transpose(lower_triangular, &y)
}

/**
 * Given the Cholesky factor `L` of a matrix `A`, solves `A * x = b` for a single
 * column vector `x`.
 */
#[track_caller]
pub fn cholesky_solve_vector(lower_triangular: &Matrix, b: &[f64]) -> Vec<f64> {
    let x = cholesky_solve(lower_triangular, &Matrix::column(b.to_vec()));
    x.column_iter(0).collect()
}

/**
 * Given the Cholesky factor `L` of a matrix `A`, computes `A^-1` by solving against
 * the identity matrix. The result is symmetrised to remove rounding asymmetry.
 */
pub fn cholesky_inverse(lower_triangular: &Matrix) -> Matrix {
    let mut inverse = cholesky_solve(lower_triangular, &Matrix::identity(lower_triangular.rows()));
    inverse.symmetrize_mut();
    inverse
}

/**
 * Given the Cholesky factor `L` of a matrix `A`, computes `ln |A|` as
 * `2 * sum(ln L_ii)`, which does not overflow for large matrices the way
 * the determinant itself can.
 */
pub fn cholesky_log_determinant(lower_triangular: &Matrix) -> f64 {
    2.0 * lower_triangular
        .diagonal_values()
        .iter()
        .map(|x| x.ln())
        .sum::<f64>()
}

/**
 * Computes the mean of the values in an iterator, consuming the iterator.
 *
 * Returns `None` if the iterator is empty.
 */
pub fn mean<I>(data: I) -> Option<f64>
where
    I: Iterator<Item = f64>,
{
    let mut count = 0usize;
    let mut mean = 0.0;
    for x in data {
        count += 1;
        let n = count as f64;
        // a running mean stays within the range of the data, where a sum of large
        // values could overflow
        mean += (x / n) - (mean / n);
    }
    if count == 0 { None } else { Some(mean) }
}

/**
 * Computes the variance of the values in an iterator, consuming the iterator.
 *
 * Variance is defined as expected value of of the squares of the zero mean data.
 * It captures how much data varies from its mean, ie the spread of the data.
 *
 * This function does not perform [Bessel's correction](https://en.wikipedia.org/wiki/Bessel%27s_correction)
 *
 * Variance may also be computed as the mean of each squared datapoint minus the
 * square of the mean of the data. Although this method would allow for a streaming
 * implementation the [wikipedia page](https://en.wikipedia.org/wiki/Variance#Definition)
 * cautions: "This equation should not be used for computations using floating point
 * arithmetic because it suffers from catastrophic cancellation if the two components
 * of the equation are similar in magnitude".
 *
 * Returns `None` if the iterator is empty.
 */
pub fn variance<I>(data: I) -> Option<f64>
where
    I: Iterator<Item = f64>,
{
    let list: Vec<f64> = data.collect();
    let m = mean(list.iter().copied())?;
    mean(list.iter().map(|x| (x - m) * (x - m)))
}
