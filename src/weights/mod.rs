//! Weight Tensor Module
//!
//! Shape-aware containers for model parameters:
//! - Per-layer `Tensor` values with checked construction
//! - `WeightSet` ordered layer collections
//! - Double-precision accumulation for order-stable averaging

pub mod set;
pub mod tensor;

pub use set::WeightSet;
pub use tensor::{Tensor, TensorAccumulator};
