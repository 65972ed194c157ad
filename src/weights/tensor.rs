//! Shaped floating-point tensors.
//!
//! A `Tensor` stores one trainable layer's parameters as a shape descriptor
//! plus a flat row-major buffer, keeping the aggregation math independent of
//! any particular array library.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A multi-dimensional array of `f32` values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    /// Dimension sizes, outermost first.
    shape: Vec<usize>,
    /// Elements in row-major order. Length always equals the shape product.
    data: Vec<f32>,
}

impl Tensor {
    /// Create a tensor, validating that the data length matches the shape.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(Error::MalformedUpdate(format!(
                "tensor shape {:?} implies {} elements, buffer holds {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Create a one-dimensional tensor from a value slice.
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Create a zero-filled tensor with the same shape as `other`.
    pub fn zeros_like(other: &Tensor) -> Self {
        Self {
            shape: other.shape.clone(),
            data: vec![0.0; other.data.len()],
        }
    }

    /// Get the shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get total element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the flat element buffer.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Elementwise `self += other * factor` in single precision. Averaging
    /// goes through [`TensorAccumulator`] instead, which sums in `f64`.
    pub fn scaled_add(&mut self, other: &Tensor, factor: f32) -> Result<()> {
        if self.shape != other.shape {
            return Err(Error::MalformedUpdate(format!(
                "cannot accumulate tensor of shape {:?} into shape {:?}",
                other.shape, self.shape
            )));
        }
        for (acc, v) in self.data.iter_mut().zip(other.data.iter()) {
            *acc += v * factor;
        }
        Ok(())
    }

    /// Re-check the shape/buffer agreement. Serde deserialization fills the
    /// fields directly, so decoded tensors go through this before acceptance.
    pub fn validate(&self) -> Result<()> {
        let expected: usize = self.shape.iter().product();
        if expected != self.data.len() {
            return Err(Error::MalformedUpdate(format!(
                "tensor shape {:?} implies {} elements, buffer holds {}",
                self.shape,
                expected,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Compare elementwise within a tolerance.
    pub fn approx_eq(&self, other: &Tensor, tolerance: f32) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

/// Double-precision accumulator with the shape of a target tensor.
///
/// Aggregation sums many scaled `f32` tensors; accumulating in `f64` keeps
/// the result independent of participant ordering beyond ordinary rounding.
#[derive(Clone, Debug)]
pub struct TensorAccumulator {
    shape: Vec<usize>,
    sums: Vec<f64>,
}

impl TensorAccumulator {
    /// Start an accumulator shaped like `template`, initialized to zero.
    pub fn zeros_like(template: &Tensor) -> Self {
        Self {
            shape: template.shape.clone(),
            sums: vec![0.0; template.data.len()],
        }
    }

    /// Accumulate `tensor * factor`. Shapes must already be verified equal.
    pub fn scaled_add(&mut self, tensor: &Tensor, factor: f64) {
        debug_assert_eq!(self.shape, tensor.shape);
        for (acc, v) in self.sums.iter_mut().zip(tensor.data.iter()) {
            *acc += *v as f64 * factor;
        }
    }

    /// Finish, rounding back down to an `f32` tensor.
    pub fn finish(self) -> Tensor {
        Tensor {
            shape: self.shape,
            data: self.sums.into_iter().map(|v| v as f32).collect(),
        }
    }
}
