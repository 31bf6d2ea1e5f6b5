use crate::core::Scalar;
use crate::core::errors::GateError;
use crate::core::mps::PHYSICAL_DIM;
use ndarray::{Array2, arr2};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Represents a single-site quantum gate.
///
/// A gate is a 2x2 matrix acting on the physical label of one site. Unitarity
/// is not enforced; use [`Gate::is_unitary`] to check it.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate<T: Scalar = f64> {
    /// The 2x2 matrix of the gate.
    pub matrix: Array2<T>,
}

impl<T: Scalar> Gate<T> {
    /// Creates a new `Gate` from a 2x2 matrix.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not square.
    /// - The matrix is not 2x2.
    pub fn new(matrix: Array2<T>) -> Result<Self, GateError> {
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(GateError::NotSquareMatrix);
        }

        if rows != PHYSICAL_DIM {
            return Err(GateError::InvalidDimensions { rows, cols });
        }

        Ok(Self { matrix })
    }

    /// Checks if the gate matrix is unitary (U U† = I).
    pub fn is_unitary(&self) -> bool {
        let eye = Array2::<T>::eye(PHYSICAL_DIM);
        let u_dagger = self.matrix.t().mapv(T::conj);
        let product = self.matrix.dot(&u_dagger);

        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (*a - *b).modulus() < 1e-6)
    }

    fn real(entries: [[f64; 2]; 2]) -> Self {
        let [[a, b], [c, d]] = entries;
        Self {
            matrix: arr2(&[
                [T::from_f64(a), T::from_f64(b)],
                [T::from_f64(c), T::from_f64(d)],
            ]),
        }
    }

    // --- Standard Gates ---

    /// Creates an Identity gate.
    pub fn i() -> Self {
        Self::real([[1.0, 0.0], [0.0, 1.0]])
    }

    /// Creates a Pauli-X gate (NOT gate), swapping the two physical labels.
    pub fn x() -> Self {
        Self::real([[0.0, 1.0], [1.0, 0.0]])
    }

    /// Creates a Pauli-Z gate.
    pub fn z() -> Self {
        Self::real([[1.0, 0.0], [0.0, -1.0]])
    }

    /// Creates a Hadamard gate.
    pub fn h() -> Self {
        let factor = 1.0 / 2.0_f64.sqrt();
        Self::real([[factor, factor], [factor, -factor]])
    }
}

impl Gate<Complex64> {
    /// Creates a Pauli-Y gate.
    pub fn y() -> Self {
        Self {
            matrix: arr2(&[
                [Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
                [Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)],
            ]),
        }
    }

    /// Creates an S gate (Phase gate, Z^1/2).
    pub fn s() -> Self {
        Self {
            matrix: arr2(&[
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                [Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0)],
            ]),
        }
    }

    /// Creates a T gate (Z^1/4).
    pub fn t_gate() -> Self {
        let angle = PI / 4.0;
        Self {
            matrix: arr2(&[
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                [
                    Complex64::new(0.0, 0.0),
                    Complex64::new(angle.cos(), angle.sin()),
                ],
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_rejects_bad_shapes() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(matches!(Gate::new(rect), Err(GateError::NotSquareMatrix)));

        let big = Array2::<f64>::eye(4);
        assert!(matches!(
            Gate::new(big),
            Err(GateError::InvalidDimensions { rows: 4, cols: 4 })
        ));
    }

    #[test]
    fn test_new_accepts_non_unitary() {
        let gate = Gate::new(arr2(&[[2.0, 0.0], [0.0, 1.0]])).unwrap();
        assert!(!gate.is_unitary());
    }

    #[test]
    fn test_standard_gates_are_unitary() {
        assert!(Gate::<f64>::i().is_unitary());
        assert!(Gate::<f64>::x().is_unitary());
        assert!(Gate::<f64>::z().is_unitary());
        assert!(Gate::<f64>::h().is_unitary());
        assert!(Gate::<Complex64>::h().is_unitary());
        assert!(Gate::<Complex64>::y().is_unitary());
        assert!(Gate::<Complex64>::s().is_unitary());
        assert!(Gate::<Complex64>::t_gate().is_unitary());
    }

    #[test]
    fn test_t_squared_is_s() {
        let t = Gate::<Complex64>::t_gate();
        let tt = t.matrix.dot(&t.matrix);
        let s = Gate::<Complex64>::s();
        for (a, b) in tt.iter().zip(s.matrix.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}
