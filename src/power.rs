//! Matrix exponentiation by squaring.

use std::sync::Arc;

use async_recursion::async_recursion;
use tokio::task::{self, JoinError};
use tracing::debug_span;

use crate::config::MultiplyConfig;
use crate::error::{MatrixError, Result};
use crate::matrix::{Matrix, Scalar};
use crate::strassen::multiply_with;

/// `matrix^exponent` with the default [`MultiplyConfig`].
///
/// ```
/// use strassen_power::{power, Matrix};
/// let q = Matrix::from_columns(vec![vec![1, 1], vec![1, 0]]).unwrap();
/// assert_eq!(power(&q, 10).unwrap()[(0, 0)], 89);
/// ```
pub fn power<T: Scalar>(matrix: &Matrix<T>, exponent: i64) -> Result<Matrix<T>> {
    power_with(matrix, exponent, &MultiplyConfig::default())
}

/// `matrix^exponent`, halving the exponent at each step so the critical
/// path holds about `log2(exponent)` squarings.
pub fn power_with<T: Scalar>(
    matrix: &Matrix<T>,
    exponent: i64,
    config: &MultiplyConfig,
) -> Result<Matrix<T>> {
    let _span = debug_span!("power", dim = matrix.dim(), exponent).entered();
    let exponent = check_exponent(exponent)?;
    power_rec(matrix, exponent, config)
}

fn check_exponent(exponent: i64) -> Result<u64> {
    u64::try_from(exponent).map_err(|_| {
        tracing::debug!(exponent, "negative exponent");
        MatrixError::InvalidExponent(exponent)
    })
}

fn power_rec<T: Scalar>(matrix: &Matrix<T>, exponent: u64, config: &MultiplyConfig) -> Result<Matrix<T>> {
    match exponent {
        0 => Ok(Matrix::identity(matrix.dim())),
        1 => Ok(matrix.clone()),
        _ => {
            let half = power_rec(matrix, exponent / 2, config)?;
            let squared = multiply_with(&half, &half, config)?;
            if exponent % 2 == 0 {
                Ok(squared)
            } else {
                multiply_with(matrix, &squared, config)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PowerTaskError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error("Tokio Join error: {0:?}")]
    TokioJoin(#[from] JoinError),
}

/// Async variant of [`power_with`]. Each multiplication runs on tokio's
/// blocking pool so the calling runtime stays responsive.
pub async fn power_async<T: Scalar + 'static>(
    matrix: Matrix<T>,
    exponent: i64,
    config: MultiplyConfig,
) -> std::result::Result<Matrix<T>, PowerTaskError> {
    let exponent = check_exponent(exponent)?;
    power_task(Arc::new(matrix), exponent, config).await
}

#[async_recursion]
async fn power_task<T: Scalar + 'static>(
    matrix: Arc<Matrix<T>>,
    exponent: u64,
    config: MultiplyConfig,
) -> std::result::Result<Matrix<T>, PowerTaskError> {
    match exponent {
        0 => Ok(Matrix::identity(matrix.dim())),
        1 => Ok(matrix.as_ref().clone()),
        _ => {
            let half = Arc::new(power_task(Arc::clone(&matrix), exponent / 2, config).await?);
            let squared = spawn_multiply(Arc::clone(&half), half, config).await?;
            if exponent % 2 == 0 {
                Ok(squared)
            } else {
                spawn_multiply(matrix, Arc::new(squared), config).await
            }
        }
    }
}

async fn spawn_multiply<T: Scalar + 'static>(
    a: Arc<Matrix<T>>,
    b: Arc<Matrix<T>>,
    config: MultiplyConfig,
) -> std::result::Result<Matrix<T>, PowerTaskError> {
    let product = task::spawn_blocking(move || multiply_with(&a, &b, &config)).await??;
    Ok(product)
}
