//! # Strassen Matrix Power Library
//!
//! This library computes the k-th power of a square matrix by exponentiation by squaring, with
//! every multiplication done by Strassen's divide-and-conquer algorithm. It is the kernel behind
//! closed-form Fibonacci evaluation and other linear recurrences.
//!
//! ## Conventions
//! Matrices are square and **column-major**: `m[(col, row)]` selects a column first and the row
//! within it second. [`Matrix::from_columns`] takes a list of columns, and
//! [`Matrix::into_columns`] gives them back. Every operation returns a new matrix; inputs are
//! never modified.
//!
//! ## Overview of Modules
//!
//! ### `matrix`
//! The dense [`Matrix`] type and its elementwise algebra: [`identity`], [`sum`], [`difference`],
//! [`transpose`], plus the classical [`multiply_schoolbook`] product used as a reference and as an
//! odd-dimension fallback.
//!
//! ### `block`
//! [`get_quadrant`] and [`merge_quadrant`] copy a quadrant out of an even-dimensioned matrix and
//! write one back into a copy of a larger matrix. [`block::split`] and [`block::join`] do all four
//! at once for the multiplier.
//!
//! ### `strassen`
//! [`multiply`] recurses on quadrants with seven products per level instead of eight, giving
//! O(n^2.807) work. Above [`MultiplyConfig::parallel_threshold`] the seven products run on the
//! Rayon pool. Odd dimensions above the 2x2 base case follow [`OddDimensionPolicy`]: rejected by
//! default, or handled by a schoolbook fallback or by padding to a power of two.
//!
//! ### `power`
//! [`power`] halves the exponent recursively. [`power_async`] does the same on Tokio, moving each
//! multiplication onto the blocking pool.
//!
//! ### `fibonacci`
//! A consumer of the core: `F(n)` is read from `Q^(n-1)` with `Q` the matrix with columns
//! `[1, 1]` and `[1, 0]`. Hybrid sequence builders seed each chunk from a matrix power and fill it
//! iteratively, on Rayon, Tokio, or threads joined by a `kanal` channel.
//!
//! ### Errors
//! - [`MatrixError`]: dimension mismatches, odd dimensions that must be halved, negative
//!   exponents, and malformed input columns. All are returned, never printed.
//! - [`PowerTaskError`] and [`fibonacci::FibonacciError`] add the task and channel failures of the
//!   concurrent entry points.
//!
//! ## Usage Example
//! ```rust
//! use strassen_power::{multiply, power, Matrix};
//! let a = Matrix::from_columns(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! assert_eq!(multiply(&a, &a).unwrap().into_columns(), vec![vec![7, 10], vec![15, 22]]);
//!
//! let q = Matrix::from_columns(vec![vec![1i64, 1], vec![1, 0]]).unwrap();
//! assert_eq!(power(&q, 20).unwrap()[(0, 0)], 10946);
//! ```

pub mod block;
pub mod config;
pub mod error;
pub mod fibonacci;
pub mod matrix;
pub mod power;
pub mod strassen;

pub use block::{get_quadrant, merge_quadrant, Quadrant};
pub use config::{MultiplyConfig, OddDimensionPolicy, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{MatrixError, Result};
pub use matrix::{
    difference, identity, multiply_schoolbook, sum, transpose, transpose_columns, Matrix, Scalar,
};
pub use power::{power, power_async, power_with, PowerTaskError};
pub use strassen::{multiply, multiply_with};
