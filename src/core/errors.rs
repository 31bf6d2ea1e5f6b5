use ndarray::ShapeError;
use thiserror::Error;

/// Result type for chain operations
pub type Result<T> = std::result::Result<T, MpsError>;

#[derive(Error, Debug, Clone)]
pub enum GateError {
    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions: single-site gates must be 2x2, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

#[derive(Error, Debug, Clone)]
pub enum MpsError {
    #[error("Site count and bond dimension must be positive (got N={site_count}, D={bond_dimension})")]
    InvalidDimensions {
        site_count: usize,
        bond_dimension: usize,
    },

    #[error("Invalid initialization range [{low}, {high})")]
    InvalidInitRange { low: f64, high: f64 },

    #[error("Chain must have at least one site")]
    EmptyChain,

    #[error("Site index {index} out of bounds for chain of {num_sites} sites")]
    IndexOutOfBounds { index: usize, num_sites: usize },

    #[error("Basis index {index} out of range for chain of {num_sites} sites")]
    BasisIndexOutOfRange { index: usize, num_sites: usize },

    #[error("Dimension mismatch: expected {expected_rows}x{expected_cols}, got {got_rows}x{got_cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Label sequence length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Invalid physical label {label} at site {position} (must be 0 or 1)")]
    InvalidLabel { position: usize, label: usize },

    #[error("Chain of {num_sites} sites is too large to enumerate")]
    TooManySites { num_sites: usize },

    #[error("Reshape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
}
