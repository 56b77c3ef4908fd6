//! Dense row-major matrices. The remaining-games schedule of a division is a square,
//! symmetric [Matrix] with a zero diagonal.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}
impl<T: Default + Clone> Matrix<T> {
    pub fn allocate(rows: usize, cols: usize) -> Self {
        let (len, overflow) = rows.overflowing_mul(cols);
        assert!(!overflow, "allocation of a {rows}x{cols} matrix failed due to overflow");
        let data = vec![T::default(); len];
        Self { data, rows, cols }
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        debug_assert!(self.validate_row_index(row));
        let row_start = row * self.cols;
        &self.data[row_start..(row_start + self.cols)]
    }

    /// Iterates over the main diagonal. For non-square matrices, the diagonal stops at the
    /// shorter dimension.
    pub fn diagonal(&self) -> impl Iterator<Item = &T> {
        (0..usize::min(self.rows, self.cols)).map(move |index| &self[(index, index)])
    }

    /// Locates the first `(row, col)` pair above the diagonal where `self[(row, col)]` differs
    /// from `self[(col, row)]`. Returns `None` for a symmetric matrix.
    pub fn find_asymmetry(&self) -> Option<(usize, usize)>
    where
        T: PartialEq,
    {
        assert!(self.is_square(), "symmetry is undefined for a {}x{} matrix", self.rows, self.cols);
        (0..self.rows)
            .flat_map(|row| (row + 1..self.cols).map(move |col| (row, col)))
            .find(|&(row, col)| self[(row, col)] != self[(col, row)])
    }

    pub fn is_symmetric(&self) -> bool
    where
        T: PartialEq,
    {
        self.find_asymmetry().is_none()
    }

    fn validate_row_index(&self, row: usize) -> bool {
        assert!(row < self.rows, "invalid row index {row} for a {}x{} matrix", self.rows, self.cols);
        true
    }

    fn validate_col_index(&self, col: usize) -> bool {
        assert!(col < self.cols, "invalid column index {col} for a {}x{} matrix", self.rows, self.cols);
        true
    }
}

impl<T: Default + Clone> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = RaggedRows;

    fn try_from(nested: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let rows = nested.len();
        let cols = nested.first().map(Vec::len).unwrap_or_default();
        if let Some((row, values)) = nested
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != cols)
        {
            return Err(RaggedRows {
                row,
                expected: cols,
                actual: values.len(),
            });
        }
        let data: Vec<_> = nested.into_iter().flatten().collect();
        Ok(Self { data, rows, cols })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {row} has {actual} columns, expected {expected}")]
pub struct RaggedRows {
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        debug_assert!(self.validate_row_index(row));
        debug_assert!(self.validate_col_index(col));
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let (row, col) = index;
        debug_assert!(self.validate_row_index(row));
        debug_assert!(self.validate_col_index(col));
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index() {
        let mut matrix = Matrix::<u32>::allocate(4, 3);
        assert_eq!(4, matrix.rows());
        assert_eq!(3, matrix.cols());
        for row in 0..matrix.rows() {
            for col in 0..matrix.cols() {
                assert_eq!(0, matrix[(row, col)]);
                let new_val = (row * matrix.cols() + col) as u32 * 10;
                matrix[(row, col)] = new_val;
                assert_eq!(new_val, matrix[(row, col)]);
            }
        }
        assert_eq!(&[30, 40, 50], matrix.row_slice(1));
    }

    #[test]
    #[should_panic = "invalid row index 4 for a 4x3 matrix"]
    fn row_overflow_panics() {
        let matrix = Matrix::<u32>::allocate(4, 3);
        matrix[(matrix.rows(), 0)];
    }

    #[test]
    #[should_panic = "invalid column index 3 for a 4x3 matrix"]
    fn col_overflow_panics() {
        let matrix = Matrix::<u32>::allocate(4, 3);
        matrix[(0, matrix.cols())];
    }

    #[test]
    fn try_from_nested() {
        let matrix = Matrix::try_from(vec![vec![0, 1, 6], vec![1, 0, 2], vec![6, 2, 0]]).unwrap();
        assert!(matrix.is_square());
        assert!(matrix.is_symmetric());
        assert_eq!(vec![0, 0, 0], matrix.diagonal().copied().collect::<Vec<_>>());
        assert_eq!(2, matrix[(2, 1)]);
    }

    #[test]
    fn try_from_ragged() {
        assert_eq!(
            RaggedRows {
                row: 1,
                expected: 2,
                actual: 3
            },
            Matrix::try_from(vec![vec![0, 1], vec![1, 0, 4]]).unwrap_err()
        );
    }

    #[test]
    fn try_from_ragged_wide_first_row() {
        let mut nested = vec![vec![0u32; 1 << 20]];
        nested.extend((1..1 << 20).map(|_| vec![0]));
        assert_eq!(
            RaggedRows {
                row: 1,
                expected: 1 << 20,
                actual: 1
            },
            Matrix::try_from(nested).unwrap_err()
        );
    }

    #[test]
    fn asymmetry() {
        let matrix = Matrix::try_from(vec![vec![0, 1, 6], vec![1, 0, 2], vec![6, 3, 0]]).unwrap();
        assert_eq!(Some((1, 2)), matrix.find_asymmetry());
        assert!(!matrix.is_symmetric());
    }

    #[test]
    fn empty() {
        let matrix = Matrix::<u32>::try_from(vec![]).unwrap();
        assert_eq!(0, matrix.rows());
        assert!(matrix.is_symmetric());
    }
}
