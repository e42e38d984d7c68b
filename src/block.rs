//! Quadrant extraction and recombination for divide-and-conquer products.
//!
//! Quadrants are named by where they sit when the matrix is drawn with rows
//! running top to bottom and columns left to right; `TopRight` is therefore
//! the upper half of the right-hand columns.

use crate::error::{MatrixError, Result};
use crate::matrix::{Matrix, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Quadrant {
    /// The order used by [`split`] and [`join`]: `[A11, A12, A21, A22]`.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// `(col, row)` of this quadrant's first element in a matrix of
    /// half-dimension `half`.
    pub fn offset(self, half: usize) -> (usize, usize) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (half, 0),
            Quadrant::BottomLeft => (0, half),
            Quadrant::BottomRight => (half, half),
        }
    }

    fn locate(col: usize, row: usize, half: usize) -> (Quadrant, usize, usize) {
        let quadrant = match (col < half, row < half) {
            (true, true) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        };
        let (dc, dr) = quadrant.offset(half);
        (quadrant, col - dc, row - dr)
    }

    fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }
}

fn half_of(n: usize) -> Result<usize> {
    if n % 2 != 0 {
        tracing::debug!(dim = n, "cannot halve odd dimension");
        return Err(MatrixError::OddDimension(n));
    }
    Ok(n / 2)
}

/// Copy out the `n/2 x n/2` block at `pos`.
pub fn get_quadrant<T: Scalar>(m: &Matrix<T>, pos: Quadrant) -> Result<Matrix<T>> {
    let half = half_of(m.dim())?;
    let (dc, dr) = pos.offset(half);
    Ok(Matrix::from_fn(half, |col, row| m[(col + dc, row + dr)].clone()))
}

/// Return a copy of `main` whose quadrant `pos` is replaced by `sub`.
pub fn merge_quadrant<T: Scalar>(
    main: &Matrix<T>,
    sub: &Matrix<T>,
    pos: Quadrant,
) -> Result<Matrix<T>> {
    let half = sub.dim();
    if main.dim() != 2 * half {
        tracing::debug!(main = main.dim(), sub = half, "quadrant does not fit");
        return Err(MatrixError::DimensionMismatch {
            left: main.dim(),
            right: 2 * half,
        });
    }
    Ok(Matrix::from_fn(main.dim(), |col, row| {
        let (quadrant, c, r) = Quadrant::locate(col, row, half);
        if quadrant == pos {
            sub[(c, r)].clone()
        } else {
            main[(col, row)].clone()
        }
    }))
}

/// All four quadrants, in [`Quadrant::ALL`] order.
pub fn split<T: Scalar>(m: &Matrix<T>) -> Result<[Matrix<T>; 4]> {
    Ok([
        get_quadrant(m, Quadrant::TopLeft)?,
        get_quadrant(m, Quadrant::TopRight)?,
        get_quadrant(m, Quadrant::BottomLeft)?,
        get_quadrant(m, Quadrant::BottomRight)?,
    ])
}

/// Reassemble four equal quadrants given in [`Quadrant::ALL`] order.
pub fn join<T: Scalar>(quadrants: &[Matrix<T>; 4]) -> Result<Matrix<T>> {
    let half = quadrants[0].dim();
    if let Some(bad) = quadrants.iter().find(|q| q.dim() != half) {
        tracing::debug!(expected = half, found = bad.dim(), "unequal quadrants");
        return Err(MatrixError::DimensionMismatch {
            left: half,
            right: bad.dim(),
        });
    }
    Ok(Matrix::from_fn(2 * half, |col, row| {
        let (quadrant, c, r) = Quadrant::locate(col, row, half);
        quadrants[quadrant.index()][(c, r)].clone()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<i64> {
        // rows drawn top to bottom:
        // [ 1  5  9 13]
        // [ 2  6 10 14]
        // [ 3  7 11 15]
        // [ 4  8 12 16]
        Matrix::from_columns(vec![
            vec![1, 2, 3, 4],
            vec![5, 6, 7, 8],
            vec![9, 10, 11, 12],
            vec![13, 14, 15, 16],
        ])
        .unwrap()
    }

    fn m(columns: Vec<Vec<i64>>) -> Matrix<i64> {
        Matrix::from_columns(columns).unwrap()
    }

    #[test]
    fn extracts_each_corner() {
        let s = sample();
        assert_eq!(
            get_quadrant(&s, Quadrant::TopLeft).unwrap(),
            m(vec![vec![1, 2], vec![5, 6]])
        );
        assert_eq!(
            get_quadrant(&s, Quadrant::TopRight).unwrap(),
            m(vec![vec![9, 10], vec![13, 14]])
        );
        assert_eq!(
            get_quadrant(&s, Quadrant::BottomLeft).unwrap(),
            m(vec![vec![3, 4], vec![7, 8]])
        );
        assert_eq!(
            get_quadrant(&s, Quadrant::BottomRight).unwrap(),
            m(vec![vec![11, 12], vec![15, 16]])
        );
    }

    #[test]
    fn odd_dimension_cannot_split() {
        let odd: Matrix<i64> = Matrix::identity(3);
        assert_eq!(
            get_quadrant(&odd, Quadrant::TopLeft),
            Err(MatrixError::OddDimension(3))
        );
        assert!(split(&odd).is_err());
    }

    #[test]
    fn merge_replaces_only_target() {
        let main: Matrix<i64> = Matrix::zeros(4);
        let sub = m(vec![vec![1, 2], vec![3, 4]]);
        let merged = merge_quadrant(&main, &sub, Quadrant::BottomLeft).unwrap();
        assert_eq!(merged.column(0), &[0, 0, 1, 2]);
        assert_eq!(merged.column(1), &[0, 0, 3, 4]);
        assert_eq!(merged.column(2), &[0, 0, 0, 0]);
        assert!(main.column(0).iter().all(|&x| x == 0));
    }

    #[test]
    fn merge_rejects_wrong_size() {
        let main: Matrix<i64> = Matrix::zeros(4);
        let sub: Matrix<i64> = Matrix::zeros(3);
        assert_eq!(
            merge_quadrant(&main, &sub, Quadrant::TopLeft),
            Err(MatrixError::DimensionMismatch { left: 4, right: 6 })
        );
    }

    #[test]
    fn merge_quadrants_rebuilds_original() {
        let s = sample();
        let rebuilt = Quadrant::ALL.iter().try_fold(Matrix::zeros(4), |acc, &pos| {
            merge_quadrant(&acc, &get_quadrant(&s, pos)?, pos)
        });
        assert_eq!(rebuilt.unwrap(), s);
    }

    #[test]
    fn split_join_round_trip() {
        let s = sample();
        assert_eq!(join(&split(&s).unwrap()).unwrap(), s);
    }

    #[test]
    fn join_rejects_unequal_quadrants() {
        let quads: [Matrix<i64>; 4] = [
            Matrix::zeros(2),
            Matrix::zeros(2),
            Matrix::zeros(1),
            Matrix::zeros(2),
        ];
        assert_eq!(
            join(&quads),
            Err(MatrixError::DimensionMismatch { left: 2, right: 1 })
        );
    }
}
