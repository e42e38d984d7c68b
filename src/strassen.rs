//! Strassen multiplication over column-major block matrices.
//!
//! Both the scalar 2x2 base case and the block recursion use the same ten
//! sums and seven products. With `X11..X22` naming the quadrants of `X`
//! (`X12` is top-right), and the scalar case indexing `X[col][row]`:
//!
//! ```text
//! s1 = B12 - B22   s2 = A11 + A12   s3 = A21 + A22   s4 = B21 - B11
//! s5 = A11 + A22   s6 = B11 + B22   s7 = A12 - A22   s8 = B21 + B22
//! s9 = A11 - A21   s10 = B11 + B12
//!
//! p1 = A11 s1   p2 = s2 B22   p3 = s3 B11   p4 = A22 s4
//! p5 = s5 s6    p6 = s7 s8    p7 = s9 s10
//!
//! C11 = p5 + p4 - p2 + p6   C12 = p1 + p2
//! C21 = p3 + p4             C22 = p5 + p1 - p3 - p7
//! ```
//!
//! Operand order in the products matters once the entries are blocks.

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{debug, trace};

use crate::block::{join, split};
use crate::config::{MultiplyConfig, OddDimensionPolicy};
use crate::error::{MatrixError, Result};
use crate::matrix::{difference, multiply_schoolbook, sum, Matrix, Scalar};

/// `a * b` with the default [`MultiplyConfig`].
///
/// ```
/// use strassen_power::{multiply, Matrix};
/// let a = Matrix::from_columns(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let c = multiply(&a, &a).unwrap();
/// assert_eq!(c.into_columns(), vec![vec![7, 10], vec![15, 22]]);
/// ```
pub fn multiply<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    multiply_with(a, b, &MultiplyConfig::default())
}

/// `a * b` using Strassen's recursion down to 2x2 blocks.
pub fn multiply_with<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    config: &MultiplyConfig,
) -> Result<Matrix<T>> {
    let n = a.dim();
    if n != b.dim() {
        debug!(left = n, right = b.dim(), "cannot multiply");
        return Err(MatrixError::DimensionMismatch {
            left: n,
            right: b.dim(),
        });
    }
    let config = config.normalize();

    match config.odd_policy {
        OddDimensionPolicy::Reject => {
            if let Some(odd) = first_odd_level(n) {
                debug!(dim = n, odd, "odd block above the base case");
                return Err(MatrixError::OddDimension(odd));
            }
            strassen(a, b, &config)
        }
        OddDimensionPolicy::Pad if first_odd_level(n).is_some() => {
            let padded = n.next_power_of_two();
            debug!(dim = n, padded, "padding operands to a power of two");
            let product = strassen(&pad(a, padded), &pad(b, padded), &config)?;
            Ok(crop(&product, n))
        }
        _ => strassen(a, b, &config),
    }
}

/// The first odd dimension the recursion would try to split, if any.
fn first_odd_level(mut n: usize) -> Option<usize> {
    while n > 2 {
        if n % 2 != 0 {
            return Some(n);
        }
        n /= 2;
    }
    None
}

/// `diag(m, I)` of dimension `size`.
fn pad<T: Scalar>(m: &Matrix<T>, size: usize) -> Matrix<T> {
    let n = m.dim();
    Matrix::from_fn(size, |col, row| {
        if col < n && row < n {
            m[(col, row)].clone()
        } else if col == row {
            T::one()
        } else {
            T::zero()
        }
    })
}

fn crop<T: Scalar>(m: &Matrix<T>, n: usize) -> Matrix<T> {
    Matrix::from_fn(n, |col, row| m[(col, row)].clone())
}

fn strassen<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, config: &MultiplyConfig) -> Result<Matrix<T>> {
    match a.dim() {
        0 => Ok(Matrix::zeros(0)),
        1 => Ok(Matrix::from_fn(1, |_, _| a[(0, 0)].clone() * b[(0, 0)].clone())),
        2 => Ok(base_case(a, b)),
        n if n % 2 != 0 => match config.odd_policy {
            OddDimensionPolicy::Schoolbook => {
                debug!(dim = n, "schoolbook product for odd block");
                multiply_schoolbook(a, b)
            }
            OddDimensionPolicy::Reject | OddDimensionPolicy::Pad => {
                Err(MatrixError::OddDimension(n))
            }
        },
        _ => recursive_case(a, b, config),
    }
}

fn base_case<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    let a = |col: usize, row: usize| a[(col, row)].clone();
    let b = |col: usize, row: usize| b[(col, row)].clone();

    let s1 = b(1, 0) - b(1, 1);
    let s2 = a(0, 0) + a(1, 0);
    let s3 = a(0, 1) + a(1, 1);
    let s4 = b(0, 1) - b(0, 0);
    let s5 = a(0, 0) + a(1, 1);
    let s6 = b(0, 0) + b(1, 1);
    let s7 = a(1, 0) - a(1, 1);
    let s8 = b(0, 1) + b(1, 1);
    let s9 = a(0, 0) - a(0, 1);
    let s10 = b(0, 0) + b(1, 0);

    let p1 = a(0, 0) * s1;
    let p2 = s2 * b(1, 1);
    let p3 = s3 * b(0, 0);
    let p4 = a(1, 1) * s4;
    let p5 = s5 * s6;
    let p6 = s7 * s8;
    let p7 = s9 * s10;

    let c00 = p5.clone() + p4.clone() - p2.clone() + p6;
    let c10 = p1.clone() + p2;
    let c01 = p3.clone() + p4;
    let c11 = p5 + p1 - p3 - p7;

    Matrix::from_column_major(2, vec![c00, c01, c10, c11])
}

fn recursive_case<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    config: &MultiplyConfig,
) -> Result<Matrix<T>> {
    let n = a.dim();
    let [a11, a12, a21, a22] = split(a)?;
    let [b11, b12, b21, b22] = split(b)?;

    let s1 = difference(&b12, &b22)?;
    let s2 = sum(&a11, &a12)?;
    let s3 = sum(&a21, &a22)?;
    let s4 = difference(&b21, &b11)?;
    let s5 = sum(&a11, &a22)?;
    let s6 = sum(&b11, &b22)?;
    let s7 = difference(&a12, &a22)?;
    let s8 = sum(&b21, &b22)?;
    let s9 = difference(&a11, &a21)?;
    let s10 = sum(&b11, &b12)?;

    let factors = vec![
        (&a11, &s1),
        (&s2, &b22),
        (&s3, &b11),
        (&a22, &s4),
        (&s5, &s6),
        (&s7, &s8),
        (&s9, &s10),
    ];

    let parallel = config.is_parallel(n);
    trace!(dim = n, parallel, "strassen level");

    // p[i] holds product p(i + 1)
    let p: Vec<Matrix<T>> = if parallel {
        factors
            .into_par_iter()
            .map(|(l, r)| strassen(l, r, config))
            .collect::<Result<_>>()?
    } else {
        factors
            .into_iter()
            .map(|(l, r)| strassen(l, r, config))
            .collect::<Result<_>>()?
    };

    let c11 = sum(&difference(&sum(&p[4], &p[3])?, &p[1])?, &p[5])?;
    let c12 = sum(&p[0], &p[1])?;
    let c21 = sum(&p[2], &p[3])?;
    let c22 = difference(&difference(&sum(&p[4], &p[0])?, &p[2])?, &p[6])?;

    join(&[c11, c12, c21, c22])
}
