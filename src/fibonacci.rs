use kanal::{bounded, SendError};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::sync::Arc;
use std::thread;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{self, JoinError, JoinHandle};
use tracing::{debug, info};

use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::power::power;

#[derive(Debug, thiserror::Error)]
pub enum FibonacciError {
    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),
    #[error("Tokio Join error: {0:?}")]
    TokioJoin(#[from] JoinError),
    #[error("Std Join error: {0:?}")]
    StdJoin(String),
    #[error("Acquire error: {0:?}")]
    Acquire(#[from] AcquireError),
    #[error("Send error: {0:?}")]
    Send(#[from] SendError),
}

/// The Fibonacci Q matrix, columns `[1, 1]` and `[1, 0]`.
pub fn q_matrix() -> Matrix<BigInt> {
    Matrix::from_fn(2, |col, row| {
        if col == 1 && row == 1 {
            BigInt::zero()
        } else {
            BigInt::one()
        }
    })
}

/// `(F(n-1), F(n))` read off a single power `Q^(n-1)`. `pair(0)` is
/// `(1, 0)`, taking `F(-1) = 1`.
pub fn pair(n: usize) -> Result<(BigInt, BigInt), FibonacciError> {
    if n == 0 {
        return Ok((BigInt::one(), BigInt::zero()));
    }
    let exponent = i64::try_from(n - 1).map_err(|_| MatrixError::InvalidExponent(i64::MAX))?;
    let qn = power(&q_matrix(), exponent)?;
    // Q^k = [[F(k+1), F(k)], [F(k), F(k-1)]]
    Ok((qn[(1, 0)].clone(), qn[(0, 0)].clone()))
}

/// F(n), with F(0) = 0 and F(1) = F(2) = 1.
///
/// ```
/// use strassen_power::fibonacci;
/// assert_eq!(fibonacci::nth(21).unwrap().to_string(), "10946");
/// ```
pub fn nth(n: usize) -> Result<BigInt, FibonacciError> {
    match n {
        0 => Ok(BigInt::zero()),
        1 | 2 => Ok(BigInt::one()),
        _ => Ok(pair(n)?.1),
    }
}

/// `F(start)..=F(end)` by iteration from `F(start-1)` and `F(start)`.
pub fn chunk(start: usize, end: usize, f_prev: BigInt, f_cur: BigInt) -> Vec<BigInt> {
    let mut fibs = Vec::with_capacity(end.saturating_sub(start) + 1);
    let mut a = f_prev;
    let mut b = f_cur;

    for _ in start..=end {
        let next = &a + &b;
        fibs.push(b.clone());
        a = b;
        b = next;
    }

    fibs
}

/// The first `limit` Fibonacci numbers, computed iteratively.
pub fn sequence(limit: usize) -> Vec<BigInt> {
    let mut fibs = Vec::with_capacity(limit);
    let (mut a, mut b) = (BigInt::zero(), BigInt::one());
    for _ in 0..limit {
        let next = &a + &b;
        fibs.push(a);
        a = b;
        b = next;
    }
    fibs
}

/// Chunk boundaries `(start, end)` covering `2..limit`.
fn chunk_bounds(limit: usize, chunk_size: usize) -> Vec<(usize, usize)> {
    let chunk_size = chunk_size.max(1);
    (2..limit)
        .step_by(chunk_size)
        .map(|start| (start, (start + chunk_size - 1).min(limit - 1)))
        .collect()
}

fn seeded_chunk(start: usize, end: usize) -> Result<Vec<BigInt>, FibonacciError> {
    let (f_prev, f_cur) = pair(start)?;
    Ok(chunk(start, end, f_prev, f_cur))
}

fn head(limit: usize) -> Vec<BigInt> {
    sequence(limit.min(2))
}

/// First `limit` numbers; each chunk is seeded from a matrix power and the
/// chunks are filled on the rayon pool.
pub fn sequence_rayon(limit: usize, chunk_size: usize) -> Result<Vec<BigInt>, FibonacciError> {
    let mut result = head(limit);
    let bounds = chunk_bounds(limit, chunk_size);
    debug!(limit, chunks = bounds.len(), "scheduling rayon chunks");

    let chunks: Vec<Vec<BigInt>> = bounds
        .into_par_iter()
        .map(|(start, end)| seeded_chunk(start, end))
        .collect::<Result<_, _>>()?;

    for chunk in chunks {
        result.extend(chunk);
    }
    info!(limit, "rayon sequence complete");
    Ok(result)
}

/// Tokio variant of [`sequence_rayon`] with at most `max_concurrent_tasks`
/// chunks in flight.
pub async fn sequence_tokio(
    limit: usize,
    chunk_size: usize,
    max_concurrent_tasks: usize,
) -> Result<Vec<BigInt>, FibonacciError> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent_tasks.max(1)));
    let mut result = head(limit);
    result.resize(limit, BigInt::zero());

    let mut tasks = vec![];
    for (start, end) in chunk_bounds(limit, chunk_size) {
        let semaphore = Arc::clone(&semaphore);
        debug!(start, end, "spawning chunk task");
        let task: JoinHandle<Result<(usize, Vec<BigInt>), FibonacciError>> =
            task::spawn(async move {
                let _permit = semaphore.acquire().await?;
                let chunk = task::spawn_blocking(move || seeded_chunk(start, end)).await??;
                Ok((start, chunk))
            });
        tasks.push(task);
    }

    for task in tasks {
        let (start, chunk) = task.await??;
        for (i, value) in chunk.into_iter().enumerate() {
            result[start + i] = value;
        }
    }

    info!(limit, "tokio sequence complete");
    Ok(result)
}

/// Thread-per-chunk variant; chunks come back over a kanal channel and are
/// reordered by start index.
pub fn sequence_kanal(limit: usize, chunk_size: usize) -> Result<Vec<BigInt>, FibonacciError> {
    let bounds = chunk_bounds(limit, chunk_size);
    let (sender, receiver) = bounded::<(usize, Vec<BigInt>)>(bounds.len() + 1);

    let mut handles = Vec::with_capacity(bounds.len());
    for (start, end) in bounds {
        let sender = sender.clone();
        debug!(start, end, "spawning chunk thread");
        handles.push(thread::spawn(move || -> Result<(), FibonacciError> {
            let chunk = seeded_chunk(start, end)?;
            sender.send((start, chunk))?;
            Ok(())
        }));
    }
    // receiver stops once every clone is gone
    drop(sender);

    for handle in handles {
        handle
            .join()
            .map_err(|e| FibonacciError::StdJoin(format!("Thread panicked: {:?}", e)))??;
    }

    let mut chunks: Vec<(usize, Vec<BigInt>)> = receiver.into_iter().collect();
    chunks.sort_by_key(|(start, _)| *start);

    let mut result = head(limit);
    for (_, chunk) in chunks {
        result.extend(chunk);
    }
    info!(limit, "kanal sequence complete");
    Ok(result)
}
