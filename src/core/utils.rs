//! Utility functions for site tensor manipulation.
//!
//! This module contains helper functions for:
//! - Matrix trace.
//! - Row-major flattening and unflattening of square matrices.
//! - Shape validation.

use crate::core::Scalar;
use crate::core::errors::{MpsError, Result};
use ndarray::{Array1, Array2, ArrayView1};

/// Computes the trace of a matrix (sum of diagonal elements).
pub fn trace<T: Scalar>(matrix: &Array2<T>) -> T {
    matrix.diag().sum()
}

/// Flattens a matrix into a vector in logical row-major order.
///
/// Iteration follows the logical index order, so the result does not depend
/// on the memory layout of `matrix`.
pub fn flatten_row_major<T: Scalar>(matrix: &Array2<T>) -> Array1<T> {
    matrix.iter().copied().collect()
}

/// Rebuilds a `dim x dim` matrix from a row-major vector.
///
/// Inverse of [`flatten_row_major`] for square matrices.
pub fn unflatten_row_major<T: Scalar>(row: ArrayView1<'_, T>, dim: usize) -> Result<Array2<T>> {
    let data: Vec<T> = row.iter().copied().collect();
    Ok(Array2::from_shape_vec((dim, dim), data)?)
}

/// Checks that `matrix` has exactly `rows x cols` entries.
pub fn check_dims<T>(matrix: &Array2<T>, rows: usize, cols: usize) -> Result<()> {
    let (got_rows, got_cols) = matrix.dim();
    if got_rows != rows || got_cols != cols {
        return Err(MpsError::DimensionMismatch {
            expected_rows: rows,
            expected_cols: cols,
            got_rows,
            got_cols,
        });
    }
    Ok(())
}
