//! Ordered collections of per-layer weight tensors.

use crate::weights::Tensor;
use serde::{Deserialize, Serialize};

/// The full ordered collection of a model's trainable parameter tensors,
/// one tensor per layer.
///
/// Structural compatibility (same layer count, same per-layer shapes) across
/// every participant and the global set within a round is a precondition of
/// aggregation; nothing in this crate repairs an incompatible set silently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    layers: Vec<Tensor>,
}

impl WeightSet {
    /// Create a weight set from per-layer tensors in model order.
    pub fn new(layers: Vec<Tensor>) -> Self {
        Self { layers }
    }

    /// Create an empty weight set.
    pub fn empty() -> Self {
        Self { layers: Vec::new() }
    }

    /// Number of trainable layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Per-layer shapes, in model order.
    pub fn shapes(&self) -> Vec<Vec<usize>> {
        self.layers.iter().map(|t| t.shape().to_vec()).collect()
    }

    /// Whether `other` has the same layer count and per-layer shapes.
    pub fn same_shape(&self, other: &WeightSet) -> bool {
        self.layers.len() == other.layers.len()
            && self
                .layers
                .iter()
                .zip(other.layers.iter())
                .all(|(a, b)| a.shape() == b.shape())
    }

    /// First layer index at which `other`'s shape diverges, if any.
    /// A missing or extra layer reports at the shorter set's length.
    pub fn first_shape_divergence(&self, other: &WeightSet) -> Option<usize> {
        if self.layers.len() != other.layers.len() {
            return Some(self.layers.len().min(other.layers.len()));
        }
        self.layers
            .iter()
            .zip(other.layers.iter())
            .position(|(a, b)| a.shape() != b.shape())
    }

    /// Get a layer tensor by index.
    pub fn layer(&self, index: usize) -> Option<&Tensor> {
        self.layers.get(index)
    }

    /// Iterate over layer tensors in model order.
    pub fn iter(&self) -> impl Iterator<Item = &Tensor> {
        self.layers.iter()
    }

    /// Re-check every layer's shape/buffer agreement (see
    /// [`Tensor::validate`]).
    pub fn validate(&self) -> crate::core::Result<()> {
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    /// Compare all layers elementwise within a tolerance.
    pub fn approx_eq(&self, other: &WeightSet, tolerance: f32) -> bool {
        self.layers.len() == other.layers.len()
            && self
                .layers
                .iter()
                .zip(other.layers.iter())
                .all(|(a, b)| a.approx_eq(b, tolerance))
    }
}

impl From<Vec<Tensor>> for WeightSet {
    fn from(layers: Vec<Tensor>) -> Self {
        Self::new(layers)
    }
}

impl<'a> IntoIterator for &'a WeightSet {
    type Item = &'a Tensor;
    type IntoIter = std::slice::Iter<'a, Tensor>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
