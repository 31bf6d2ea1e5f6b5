use ndarray::LinalgScalar;
use num_complex::Complex64;
use rand::Rng;
use std::fmt::{Debug, Display};

/// Element type of the site tensors.
///
/// Implemented for `f64` (real chains) and `Complex64`.
pub trait Scalar: LinalgScalar + Debug + Display + PartialEq + Send + Sync {
    /// Lifts a real constant into the scalar type.
    fn from_f64(value: f64) -> Self;

    /// Complex conjugate (identity for real scalars).
    fn conj(self) -> Self;

    /// Absolute value.
    fn modulus(self) -> f64;

    /// Draws a value uniformly from `[low, high)`.
    ///
    /// Complex scalars draw real and imaginary parts independently.
    fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> Self;
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn conj(self) -> Self {
        self
    }

    fn modulus(self) -> f64 {
        self.abs()
    }

    fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> Self {
        rng.random_range(low..high)
    }
}

impl Scalar for Complex64 {
    fn from_f64(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    fn modulus(self) -> f64 {
        self.norm()
    }

    fn sample<R: Rng>(rng: &mut R, low: f64, high: f64) -> Self {
        let re = rng.random_range(low..high);
        let im = rng.random_range(low..high);
        Complex64::new(re, im)
    }
}
