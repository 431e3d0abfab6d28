/*!
 * Dense matrix type used for design matrices, covariance matrices and drawn samples.
 *
 * Vectors such as targets, means and variances are passed around as plain `&[f64]`
 * slices and `Vec<f64>` lists, and only two dimensional data is stored in a [Matrix].
 */

pub mod iterators;
mod operations;

use crate::matrices::iterators::ColumnIterator;

/**
 * A matrix of `f64` values stored in row major order.
 *
 * Matrices may have zero rows or zero columns, which is how a Gaussian Process with
 * no training data or a query with no points is represented.
 *
 * When doing numeric operations with Matrices you should be careful to not
 * consume a matrix by accidentally using it by value. All the operations are
 * also defined on references to matrices so you should favor `&x * &y` style
 * notation for matrices you intend to continue using.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: Row,
    columns: Column,
}

/// Row index or row count of a Matrix
pub type Row = usize;
/// Column index or column count of a Matrix
pub type Column = usize;

impl Matrix {
    /**
     * Creates a matrix of the provided size with all elements initialised to the provided value
     */
    pub fn empty(value: f64, size: (Row, Column)) -> Matrix {
        Matrix {
            data: vec![value; size.0 * size.1],
            rows: size.0,
            columns: size.1,
        }
    }

    /**
     * Creates a column vector (Nx1) from a list
     */
    pub fn column(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: values.len(),
            columns: 1,
            data: values,
        }
    }

    /**
     * Creates a row vector (1xN) from a list
     */
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            columns: values.len(),
            data: values,
        }
    }

    /**
     * Creates a matrix from a nested array of values, each inner vector
     * being a row, and hence the outer vector containing all rows in sequence, the
     * same way as when writing matrices in mathematics.
     *
     * Example of a 2 x 3 matrix in both notations:
     * ```ignore
     *   [
     *      1, 2, 4
     *      8, 9, 3
     *   ]
     * ```
     * ```
     * use semilinear::matrices::Matrix;
     * let matrix = Matrix::from(vec![
     *     vec![ 1.0, 2.0, 4.0 ],
     *     vec![ 8.0, 9.0, 3.0 ]]);
     * assert_eq!(matrix.size(), (2, 3));
     * ```
     *
     * # Panics
     *
     * If the rows are not all the same length.
     */
    #[track_caller]
    pub fn from(values: Vec<Vec<f64>>) -> Matrix {
        let rows = values.len();
        let columns = values.first().map(|row| row.len()).unwrap_or(0);
        assert!(
            values.iter().all(|row| row.len() == columns),
            "Inconsistent size"
        );
        Matrix {
            data: values.into_iter().flatten().collect(),
            rows,
            columns,
        }
    }

    /**
     * Creates a matrix with the specified size from a row major vec of data.
     * The length of the vec must match the size of the matrix or this function
     * will panic.
     */
    #[track_caller]
    pub fn from_flat_row_major(size: (Row, Column), values: Vec<f64>) -> Matrix {
        assert!(
            size.0 * size.1 == values.len(),
            "Inconsistent size, attempted to construct a {}x{} matrix but provided with {} elements.",
            size.0,
            size.1,
            values.len()
        );
        Matrix {
            data: values,
            rows: size.0,
            columns: size.1,
        }
    }

    /**
     * Creates a square matrix of the provided size with the value along the diagonal
     * and zero everywhere else.
     */
    pub fn diagonal(value: f64, size: Row) -> Matrix {
        let mut matrix = Matrix::empty(0.0, (size, size));
        matrix.add_diagonal_mut(value);
        matrix
    }

    /**
     * Creates the NxN identity matrix.
     */
    pub fn identity(size: Row) -> Matrix {
        Matrix::diagonal(1.0, size)
    }

    /**
     * Returns the dimensionality of this matrix in Row, Column format
     */
    pub fn size(&self) -> (Row, Column) {
        (self.rows, self.columns)
    }

    /**
     * Gets the number of rows in this matrix.
     */
    pub fn rows(&self) -> Row {
        self.rows
    }

    /**
     * Gets the number of columns in this matrix.
     */
    pub fn columns(&self) -> Column {
        self.columns
    }

    /**
     * Returns true if this matrix has as many rows as columns.
     */
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /**
     * Gets a copy of the value at this row and column. Rows and Columns are 0 indexed.
     */
    #[track_caller]
    pub fn get(&self, row: Row, column: Column) -> f64 {
        self.data[self.index(row, column)]
    }

    /**
     * Sets a new value to this row and column. Rows and Columns are 0 indexed.
     */
    #[track_caller]
    pub fn set(&mut self, row: Row, column: Column, value: f64) {
        let index = self.index(row, column);
        self.data[index] = value;
    }

    #[track_caller]
    fn index(&self, row: Row, column: Column) -> usize {
        assert!(row < self.rows, "Row out of index");
        assert!(column < self.columns, "Column out of index");
        row * self.columns + column
    }

    /**
     * Returns the values of a row as a slice. For a Gaussian Process input matrix
     * this is the coordinates of a single point.
     */
    #[track_caller]
    pub fn row_values(&self, row: Row) -> &[f64] {
        assert!(row < self.rows, "Row out of index");
        let start = row * self.columns;
        &self.data[start..start + self.columns]
    }

    /**
     * Returns an iterator over a row vector in this matrix. Rows are 0 indexed.
     */
    pub fn row_iter(&self, row: Row) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.row_values(row).iter().copied()
    }

    /**
     * Returns an iterator over a column vector in this matrix. Columns are 0 indexed.
     *
     * If you have a matrix such as:
     * ```ignore
     * [
     *    1, 2, 3
     *    4, 5, 6
     *    7, 8, 9
     * ]
     * ```
     * then a column of 0, 1, and 2 will yield [1, 4, 7], [2, 5, 8] and [3, 6, 9]
     * respectively.
     */
    pub fn column_iter(&self, column: Column) -> ColumnIterator<'_> {
        ColumnIterator::new(self, column)
    }

    /**
     * Returns a row major iterator over all values in this matrix.
     */
    pub fn row_major_iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.data.iter().copied()
    }

    /**
     * Returns the values along the main diagonal, for a covariance matrix these are the
     * variances of each dimension.
     */
    pub fn diagonal_values(&self) -> Vec<f64> {
        (0..self.rows.min(self.columns))
            .map(|i| self.get(i, i))
            .collect()
    }

    /**
     * Computes and returns the transpose of this matrix
     *
     * ```
     * use semilinear::matrices::Matrix;
     * let x = Matrix::from(vec![
     *    vec![ 1.0, 2.0 ],
     *    vec![ 3.0, 4.0 ]]);
     * let y = Matrix::from(vec![
     *    vec![ 1.0, 3.0 ],
     *    vec![ 2.0, 4.0 ]]);
     * assert_eq!(x.transpose(), y);
     * ```
     */
    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::empty(0.0, (self.columns, self.rows));
        for i in 0..self.columns {
            for j in 0..self.rows {
                result.set(i, j, self.get(j, i));
            }
        }
        result
    }

    /**
     * Creates and returns a new matrix with all values from the original with the
     * function applied to each.
     */
    pub fn map(&self, mapping_function: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&x| mapping_function(x)).collect(),
            rows: self.rows,
            columns: self.columns,
        }
    }

    /**
     * Adds a value to every element on the main diagonal. This is how jitter
     * and noise terms are applied to covariance matrices.
     */
    pub fn add_diagonal_mut(&mut self, value: f64) {
        for i in 0..self.rows.min(self.columns) {
            let index = i * self.columns + i;
            self.data[index] += value;
        }
    }

    /**
     * Replaces each pair of mirrored off diagonal elements with their average.
     *
     * Numerical solves leave tiny asymmetries in matrices that are symmetric in exact
     * arithmetic, such as posterior covariances.
     *
     * # Panics
     *
     * If the matrix is not square.
     */
    #[track_caller]
    pub fn symmetrize_mut(&mut self) {
        assert!(self.is_square(), "Only square matrices can be symmetric");
        for i in 0..self.rows {
            for j in (i + 1)..self.columns {
                let average = 0.5 * (self.get(i, j) + self.get(j, i));
                self.set(i, j, average);
                self.set(j, i, average);
            }
        }
    }

    /**
     * Checks if this matrix is square and equal to its transpose, with each
     * mirrored pair of elements differing by at most the tolerance.
     */
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.columns {
                if (self.get(i, j) - self.get(j, i)).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /**
     * Multiplies this matrix by a column vector given as a slice, returning the
     * resulting column vector as a list.
     *
     * ```
     * use semilinear::matrices::Matrix;
     * let x = Matrix::from(vec![
     *    vec![ 1.0, 2.0 ],
     *    vec![ 3.0, 4.0 ]]);
     * assert_eq!(x.multiply_column(&[1.0, 1.0]), vec![ 3.0, 7.0 ]);
     * ```
     *
     * # Panics
     *
     * If the vector's length is not the number of columns in this matrix.
     */
    #[track_caller]
    pub fn multiply_column(&self, vector: &[f64]) -> Vec<f64> {
        assert!(
            vector.len() == self.columns,
            "Mismatched matrix and vector, matrix is {}x{}, vector has length {}",
            self.rows,
            self.columns,
            vector.len()
        );
        (0..self.rows)
            .map(|row| dot(self.row_values(row), vector))
            .collect()
    }

    /**
     * Computes `self^T * self` without materialising the transpose.
     */
    pub fn gram(&self) -> Matrix {
        let mut result = Matrix::empty(0.0, (self.columns, self.columns));
        for i in 0..self.columns {
            for j in i..self.columns {
                let value: f64 = (0..self.rows)
                    .map(|row| self.get(row, i) * self.get(row, j))
                    .sum();
                result.set(i, j, value);
                result.set(j, i, value);
            }
        }
        result
    }
}

/**
 * The dot product of two equal length slices.
 */
pub(crate) fn dot(left: &[f64], right: &[f64]) -> f64 {
    left.iter().zip(right).map(|(x, y)| x * y).sum()
}
