/// Failures of the matrix core. All of them are caller input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("cannot split a matrix of odd dimension {0}")]
    OddDimension(usize),
    #[error("invalid exponent {0}: must be non-negative")]
    InvalidExponent(i64),
    #[error("matrix is not square: {columns} columns of length {rows}")]
    NotSquare { columns: usize, rows: usize },
    #[error("ragged columns: expected length {expected}, found {found}")]
    RaggedColumns { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
