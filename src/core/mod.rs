pub mod errors;
mod gates;
mod mps;
mod scalar;
pub mod utils;

pub use gates::Gate;
pub use mps::{MpsChain, PHYSICAL_DIM};
pub(crate) use mps::{check_labels, check_position, contract_physical};
pub use scalar::Scalar;
