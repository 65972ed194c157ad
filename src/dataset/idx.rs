//! IDX-format dataset loading.
//!
//! Reads MNIST-style idx3 image and idx1 label files, normalizes pixels to
//! `[0, 1]`, and slices train/test partitions. The coordination core only
//! needs this so a participant can report a contribution size consistent
//! with the data it trained on.

use crate::core::{Error, Result};
use crate::weights::Tensor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// idx3 image file header length.
const IMAGE_HEADER: usize = 16;
/// idx1 label file header length.
const LABEL_HEADER: usize = 8;
/// Image side length; images are stored as 28x28 grayscale.
const IMAGE_SIDE: usize = 28;
/// Bytes per stored image.
const IMAGE_BYTES: usize = IMAGE_SIDE * IMAGE_SIDE;

/// File locations for a train/test image-label quadruple.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    pub test_images: PathBuf,
    pub test_labels: PathBuf,
}

/// Which contiguous slice of each partition a participant uses, so
/// federation members can carve disjoint shards out of one file set.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SliceSpec {
    pub start_train: usize,
    pub len_train: usize,
    pub start_test: usize,
    pub len_test: usize,
}

impl Default for SliceSpec {
    fn default() -> Self {
        Self {
            start_train: 0,
            len_train: 12_000,
            start_test: 0,
            len_test: 2_000,
        }
    }
}

/// A loaded train/test split.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Training images, each a `[28, 28]` tensor of normalized pixels.
    pub train_images: Vec<Tensor>,
    /// Training labels, one per image.
    pub train_labels: Vec<u8>,
    /// Test images.
    pub test_images: Vec<Tensor>,
    /// Test labels.
    pub test_labels: Vec<u8>,
}

impl Dataset {
    /// Load and slice all four files.
    pub fn load(paths: &DatasetPaths, slices: &SliceSpec) -> Result<Self> {
        let train_images = slice_checked(
            read_idx_images(&paths.train_images)?,
            slices.start_train,
            slices.len_train,
            "train images",
        )?;
        let train_labels = slice_checked(
            read_idx_labels(&paths.train_labels)?,
            slices.start_train,
            slices.len_train,
            "train labels",
        )?;
        let test_images = slice_checked(
            read_idx_images(&paths.test_images)?,
            slices.start_test,
            slices.len_test,
            "test images",
        )?;
        let test_labels = slice_checked(
            read_idx_labels(&paths.test_labels)?,
            slices.start_test,
            slices.len_test,
            "test labels",
        )?;

        Ok(Self {
            train_images,
            train_labels,
            test_images,
            test_labels,
        })
    }

    /// Number of training samples; a participant's contribution size.
    pub fn train_len(&self) -> usize {
        self.train_images.len()
    }
}

fn slice_checked<T>(items: Vec<T>, start: usize, len: usize, what: &str) -> Result<Vec<T>> {
    let end = start
        .checked_add(len)
        .ok_or_else(|| Error::Dataset(format!("{what}: slice bounds overflow")))?;
    if end > items.len() {
        return Err(Error::Dataset(format!(
            "{what}: requested samples {start}..{end}, file holds {}",
            items.len()
        )));
    }
    Ok(items.into_iter().skip(start).take(len).collect())
}

/// Parse idx3 image bytes: skip the header, then one 784-byte grayscale
/// image per record, normalized by 1/255.
pub fn parse_idx_images(bytes: &[u8]) -> Result<Vec<Tensor>> {
    let body = bytes.get(IMAGE_HEADER..).ok_or_else(|| {
        Error::Dataset(format!(
            "image file too short: {} bytes, header is {IMAGE_HEADER}",
            bytes.len()
        ))
    })?;
    if body.len() % IMAGE_BYTES != 0 {
        return Err(Error::Dataset(format!(
            "image payload of {} bytes is not a whole number of {IMAGE_BYTES}-byte images",
            body.len()
        )));
    }

    body.chunks_exact(IMAGE_BYTES)
        .map(|chunk| {
            let pixels: Vec<f32> = chunk.iter().map(|b| *b as f32 / 255.0).collect();
            Tensor::new(vec![IMAGE_SIDE, IMAGE_SIDE], pixels)
        })
        .collect()
}

/// Parse idx1 label bytes: skip the header, one label byte per record.
pub fn parse_idx_labels(bytes: &[u8]) -> Result<Vec<u8>> {
    let body = bytes.get(LABEL_HEADER..).ok_or_else(|| {
        Error::Dataset(format!(
            "label file too short: {} bytes, header is {LABEL_HEADER}",
            bytes.len()
        ))
    })?;
    Ok(body.to_vec())
}

/// Read and parse an idx3 image file.
pub fn read_idx_images(path: &Path) -> Result<Vec<Tensor>> {
    let bytes =
        std::fs::read(path).map_err(|e| Error::Dataset(format!("{}: {e}", path.display())))?;
    parse_idx_images(&bytes)
}

/// Read and parse an idx1 label file.
pub fn read_idx_labels(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).map_err(|e| Error::Dataset(format!("{}: {e}", path.display())))?;
    parse_idx_labels(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_file(count: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; IMAGE_HEADER];
        for i in 0..count {
            bytes.extend(std::iter::repeat((i % 256) as u8).take(IMAGE_BYTES));
        }
        bytes
    }

    fn label_file(labels: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; LABEL_HEADER];
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn test_parse_images() {
        let images = parse_idx_images(&image_file(3)).unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].shape(), &[IMAGE_SIDE, IMAGE_SIDE]);
        // Second image is filled with byte 1 -> 1/255.
        assert!((images[1].values()[0] - 1.0 / 255.0).abs() < 1e-7);
    }

    #[test]
    fn test_parse_images_normalized_range() {
        let mut bytes = vec![0u8; IMAGE_HEADER];
        bytes.extend(std::iter::repeat(255u8).take(IMAGE_BYTES));
        let images = parse_idx_images(&bytes).unwrap();
        assert!(images[0].values().iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(images[0].values()[0], 1.0);
    }

    #[test]
    fn test_parse_labels() {
        let labels = parse_idx_labels(&label_file(&[7, 2, 9])).unwrap();
        assert_eq!(labels, vec![7, 2, 9]);
    }

    #[test]
    fn test_short_image_file_errors() {
        assert!(matches!(
            parse_idx_images(&[0u8; 4]),
            Err(Error::Dataset(_))
        ));
    }

    #[test]
    fn test_ragged_image_payload_errors() {
        let mut bytes = image_file(1);
        bytes.push(0);
        assert!(matches!(parse_idx_images(&bytes), Err(Error::Dataset(_))));
    }

    #[test]
    fn test_slice_out_of_range_errors() {
        let items: Vec<u8> = (0..10).collect();
        assert!(slice_checked(items, 8, 5, "labels").is_err());
    }

    #[test]
    fn test_slice_selects_window() {
        let items: Vec<u8> = (0..10).collect();
        let window = slice_checked(items, 2, 3, "labels").unwrap();
        assert_eq!(window, vec![2, 3, 4]);
    }
}
