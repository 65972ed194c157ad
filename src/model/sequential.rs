//! In-memory reference model.
//!
//! A stand-in for a real network backend: it keeps a weight set and an
//! architecture document but performs no training. Coordinator/participant
//! tests and examples run against it.

use crate::core::{Error, Result};
use crate::model::{Model, ModelConfig};
use crate::weights::{Tensor, WeightSet};
use serde::{Deserialize, Serialize};

/// Architecture document the reference model reads and writes.
///
/// This is the model's own format; the surrounding coordination layer still
/// treats it as an opaque `ModelConfig`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SequentialSpec {
    /// Per-layer parameter tensor shapes, in model order.
    layer_shapes: Vec<Vec<usize>>,
}

/// A minimal sequential model: an ordered list of parameter tensors.
pub struct SequentialModel {
    spec: SequentialSpec,
    weights: WeightSet,
}

impl SequentialModel {
    /// Create with the given layer shapes, parameters randomly initialized.
    pub fn with_layer_shapes(layer_shapes: Vec<Vec<usize>>) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        let layers = layer_shapes
            .iter()
            .map(|shape| {
                let count: usize = shape.iter().product();
                let scale = (2.0 / count.max(1) as f32).sqrt();
                let data: Vec<f32> = (0..count)
                    .map(|_| rng.gen::<f32>() * scale - scale / 2.0)
                    .collect();
                // Shape and buffer lengths agree by construction.
                Tensor::new(shape.clone(), data).unwrap()
            })
            .collect();

        Self {
            spec: SequentialSpec { layer_shapes },
            weights: WeightSet::new(layers),
        }
    }

    /// Create with explicit initial weights.
    pub fn with_weights(weights: WeightSet) -> Self {
        Self {
            spec: SequentialSpec {
                layer_shapes: weights.shapes(),
            },
            weights,
        }
    }
}

impl Model for SequentialModel {
    fn get_config(&self) -> ModelConfig {
        // The spec is a plain serializable struct; conversion cannot fail.
        ModelConfig::from_value(&self.spec).expect("architecture spec serializes")
    }

    fn get_weights(&self) -> WeightSet {
        self.weights.clone()
    }

    fn set_weights(&mut self, weights: WeightSet) -> Result<()> {
        if let Some(layer) = self.weights.first_shape_divergence(&weights) {
            return Err(Error::ShapeMismatch {
                participant: "local".to_string(),
                layer,
                expected: self
                    .weights
                    .layer(layer)
                    .map(|t| t.shape().to_vec())
                    .unwrap_or_default(),
                actual: weights
                    .layer(layer)
                    .map(|t| t.shape().to_vec())
                    .unwrap_or_default(),
            });
        }
        self.weights = weights;
        Ok(())
    }

    fn from_config(config: &ModelConfig) -> Result<Self> {
        let spec: SequentialSpec = serde_json::from_str(config.as_json())?;
        Ok(Self::with_layer_shapes(spec.layer_shapes))
    }
}
