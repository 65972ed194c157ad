//! Dataset Module
//!
//! IDX image/label loading so participants can report contribution sizes
//! consistent with the data they trained on.

pub mod idx;

pub use idx::{parse_idx_images, parse_idx_labels, Dataset, DatasetPaths, SliceSpec};
