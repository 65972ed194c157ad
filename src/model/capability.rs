//! The capability surface a neural-network backend must expose.

use crate::core::Result;
use crate::model::ModelConfig;
use crate::weights::WeightSet;

/// Operations FLARE requires of a model implementation.
///
/// Both coordinator and participants depend on this trait; the backing
/// network library (training, layer math) stays behind it. FLARE never
/// inspects internals, only the shape-compatibility contract.
pub trait Model {
    /// Return the architecture description.
    fn get_config(&self) -> ModelConfig;

    /// Return current trainable parameters in a stable per-layer order.
    fn get_weights(&self) -> WeightSet;

    /// Replace all trainable parameters.
    ///
    /// Fails with `Error::ShapeMismatch` when `weights` does not match the
    /// model's expected structure.
    fn set_weights(&mut self, weights: WeightSet) -> Result<()>;

    /// Instantiate an untrained model matching the given architecture.
    ///
    /// Used by participants to mirror the coordinator's topology.
    fn from_config(config: &ModelConfig) -> Result<Self>
    where
        Self: Sized;
}
