/*!
 * Iterators over parts of a Matrix
 */

use crate::matrices::{Column, Matrix, Row};

/**
 * An iterator over a column in a matrix.
 *
 * For a 2x2 matrix such as `[ 1, 2; 3, 4]`: ie
 * ```ignore
 * [
 *   1, 2
 *   3, 4
 * ]
 * ```
 * Depending on the column iterator you want to obtain,
 * can either iterate through 1, 3 or 2, 4.
 */
#[derive(Debug)]
pub struct ColumnIterator<'a> {
    matrix: &'a Matrix,
    column: Column,
    row: Row,
}

impl<'a> ColumnIterator<'a> {
    /**
     * Constructs a column iterator over this matrix.
     */
    pub fn new(matrix: &'a Matrix, column: Column) -> ColumnIterator<'a> {
        ColumnIterator {
            matrix,
            column,
            row: 0,
        }
    }
}

impl<'a> Iterator for ColumnIterator<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.matrix.rows() {
            return None;
        }
        let value = self.matrix.get(self.row, self.column);
        self.row += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.matrix.rows().saturating_sub(self.row);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ColumnIterator<'a> {}
