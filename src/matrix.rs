//! Dense square matrices stored column-major.
//!
//! Every matrix in this crate follows one indexing convention: the outer
//! index selects a column and the inner index selects the row within it.
//! `m[(col, row)]` and [`Matrix::get`] take their arguments in that order,
//! and the backing buffer keeps each column contiguous
//! (`data[col * n + row]`). Nothing else in the crate re-derives the layout.

use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

use num_traits::{One, Zero};

use crate::error::{MatrixError, Result};

/// Numeric element of a [`Matrix`].
///
/// Use signed types: Strassen's intermediate differences go negative even
/// when every input and output element is non-negative.
pub trait Scalar:
    Clone
    + PartialEq
    + fmt::Debug
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
{
}

impl<T> Scalar for T where
    T: Clone
        + PartialEq
        + fmt::Debug
        + Zero
        + One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Send
        + Sync
{
}

/// An `n x n` matrix. Immutable through the algebra in this crate: every
/// operation returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Build a matrix from its columns, each listed top to bottom.
    ///
    /// ```
    /// use strassen_power::Matrix;
    /// let m = Matrix::from_columns(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m[(1, 0)], 3);
    /// ```
    pub fn from_columns(columns: Vec<Vec<T>>) -> Result<Self> {
        let n = columns.len();
        if let Some(bad) = columns.iter().find(|column| column.len() != n) {
            return Err(MatrixError::NotSquare {
                columns: n,
                rows: bad.len(),
            });
        }
        Ok(Self {
            n,
            data: columns.into_iter().flatten().collect(),
        })
    }

    /// Build a matrix by evaluating `f(col, row)` for every element.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(n * n);
        for col in 0..n {
            for row in 0..n {
                data.push(f(col, row));
            }
        }
        Self { n, data }
    }

    /// Wrap a buffer already laid out as `data[col * n + row]`.
    pub(crate) fn from_column_major(n: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        Self { n, data }
    }

    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![T::zero(); n * n],
        }
    }

    /// The `n x n` identity. `identity(0)` is the empty matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, |col, row| if col == row { T::one() } else { T::zero() })
    }

    pub fn is_identity(&self) -> bool {
        self.data.iter().enumerate().all(|(i, value)| {
            let (col, row) = (i / self.n, i % self.n);
            if col == row {
                value.is_one()
            } else {
                value.is_zero()
            }
        })
    }

    /// Consume the matrix, returning its columns.
    pub fn into_columns(self) -> Vec<Vec<T>> {
        if self.n == 0 {
            return Vec::new();
        }
        let n = self.n;
        let mut columns = Vec::with_capacity(n);
        let mut elements = self.data.into_iter();
        for _ in 0..n {
            columns.push(elements.by_ref().take(n).collect());
        }
        columns
    }
}

impl<T> Matrix<T> {
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        if col >= self.n || row >= self.n {
            return None;
        }
        self.data.get(col * self.n + row)
    }

    /// Column `col` as a contiguous slice, top to bottom.
    pub fn column(&self, col: usize) -> &[T] {
        &self.data[col * self.n..(col + 1) * self.n]
    }

    pub fn columns(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.n.max(1))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// `m[(col, row)]`; panics when out of range.
    fn index(&self, (col, row): (usize, usize)) -> &T {
        assert!(
            col < self.n && row < self.n,
            "index ({col}, {row}) out of range for dimension {}",
            self.n
        );
        &self.data[col * self.n + row]
    }
}

/// Rows in visual order, one per line.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.n {
            write!(f, "[")?;
            for col in 0..self.n {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[col * self.n + row])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

fn check_same_dim<T>(a: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    if a.n != b.n {
        tracing::debug!(left = a.n, right = b.n, "dimension mismatch");
        return Err(MatrixError::DimensionMismatch {
            left: a.n,
            right: b.n,
        });
    }
    Ok(())
}

fn zip_with<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, op: impl Fn(T, T) -> T) -> Result<Matrix<T>> {
    check_same_dim(a, b)?;
    Ok(Matrix {
        n: a.n,
        data: a
            .data
            .iter()
            .zip(&b.data)
            .map(|(x, y)| op(x.clone(), y.clone()))
            .collect(),
    })
}

/// The `n x n` identity matrix.
pub fn identity<T: Scalar>(n: usize) -> Matrix<T> {
    Matrix::identity(n)
}

/// Elementwise `a + b`.
pub fn sum<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(a, b, |x, y| x + y)
}

/// Elementwise `a - b`.
pub fn difference<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    zip_with(a, b, |x, y| x - y)
}

/// `result[(col, row)] == a[(row, col)]`.
pub fn transpose<T: Scalar>(a: &Matrix<T>) -> Matrix<T> {
    Matrix::from_fn(a.n, |col, row| a[(row, col)].clone())
}

/// Transpose a rectangular matrix given as `m` columns of equal length `r`,
/// producing `r` columns of length `m`.
pub fn transpose_columns<T: Clone>(columns: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    let Some(first) = columns.first() else {
        return Ok(Vec::new());
    };
    let rows = first.len();
    if let Some(bad) = columns.iter().find(|column| column.len() != rows) {
        return Err(MatrixError::RaggedColumns {
            expected: rows,
            found: bad.len(),
        });
    }
    Ok((0..rows)
        .map(|row| columns.iter().map(|column| column[row].clone()).collect())
        .collect())
}

/// Classical cubic product `a * b`.
pub fn multiply_schoolbook<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    check_same_dim(a, b)?;
    let n = a.n;
    Ok(Matrix::from_fn(n, |col, row| {
        (0..n).fold(T::zero(), |acc, k| {
            acc + a.data[k * n + row].clone() * b.data[col * n + k].clone()
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(columns: Vec<Vec<i64>>) -> Matrix<i64> {
        Matrix::from_columns(columns).unwrap()
    }

    #[test]
    fn identity_layout() {
        let id: Matrix<i64> = identity(3);
        assert!(id.is_identity());
        assert_eq!(id.column(1), &[0, 1, 0]);
    }

    #[test]
    fn identity_zero_is_empty() {
        let id: Matrix<i64> = identity(0);
        assert!(id.is_empty());
        assert_eq!(id.into_columns(), Vec::<Vec<i64>>::new());
    }

    #[test]
    fn from_columns_rejects_non_square() {
        let err = Matrix::from_columns(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err, MatrixError::NotSquare { columns: 2, rows: 1 });
    }

    #[test]
    fn column_major_access() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(a[(0, 1)], 2);
        assert_eq!(a.get(1, 1), Some(&4));
        assert_eq!(a.get(2, 0), None);
    }

    #[test]
    fn sum_and_difference() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![10, 20], vec![30, 40]]);
        assert_eq!(sum(&a, &b).unwrap(), m(vec![vec![11, 22], vec![33, 44]]));
        assert_eq!(difference(&b, &a).unwrap(), m(vec![vec![9, 18], vec![27, 36]]));
    }

    #[test]
    fn sum_dimension_mismatch() {
        let a: Matrix<i64> = identity(2);
        let b: Matrix<i64> = identity(4);
        assert_eq!(
            sum(&a, &b),
            Err(MatrixError::DimensionMismatch { left: 2, right: 4 })
        );
        assert!(difference(&b, &a).is_err());
    }

    #[test]
    fn operations_leave_inputs_untouched() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let before = a.clone();
        let _ = sum(&a, &a).unwrap();
        let _ = transpose(&a);
        assert_eq!(a, before);
    }

    #[test]
    fn transpose_square() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        let t = transpose(&a);
        assert_eq!(t.column(0), &[1, 4, 7]);
        assert_eq!(transpose(&t), a);
    }

    #[test]
    fn transpose_rectangular() {
        let columns = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(
            transpose_columns(&columns).unwrap(),
            vec![vec![1, 4], vec![2, 5], vec![3, 6]]
        );
        assert_eq!(
            transpose_columns(&[vec![1, 2], vec![3]]),
            Err(MatrixError::RaggedColumns { expected: 2, found: 1 })
        );
    }

    #[test]
    fn schoolbook_column_major_product() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let product = multiply_schoolbook(&a, &a).unwrap();
        assert_eq!(product, m(vec![vec![7, 10], vec![15, 22]]));
    }

    #[test]
    fn display_is_row_major() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(a.to_string(), "[1, 3]\n[2, 4]\n");
    }

    #[test]
    fn into_columns_round_trip() {
        let columns = vec![vec![1, 2], vec![3, 4]];
        let a = m(columns.clone());
        assert!(a.columns().eq(columns.iter().map(Vec::as_slice)));
        assert_eq!(a.into_columns(), columns);
    }
}
