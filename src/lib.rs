//! Trace-closed matrix product states for qubit registers.
//!
//! An [`MpsChain`] stores two D x D matrices per site. The amplitude of a
//! basis string is the trace of the product of the matrices it selects, and
//! single-site gates act on the physical label of one site in place.
//!
//! ```
//! use qmps::{Gate, MpsChain};
//!
//! let mut chain = MpsChain::<f64>::new(5, 3).unwrap();
//! let before = chain.coefficient(&[0, 1, 1, 0, 1]).unwrap();
//!
//! // X at site 1 swaps the amplitudes of strings that differ there
//! chain.apply(&Gate::x(), 1).unwrap();
//! let after = chain.coefficient(&[0, 0, 1, 0, 1]).unwrap();
//! assert_eq!(before, after);
//! ```

mod config;
mod core;
mod shared;

pub use crate::config::MpsConfig;
pub use crate::core::errors::{GateError, MpsError, Result};
pub use crate::core::{Gate, MpsChain, PHYSICAL_DIM, Scalar, errors, utils};
pub use crate::shared::SharedMpsChain;
