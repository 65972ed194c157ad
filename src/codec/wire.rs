//! Lossless wire encoding for update and config messages.
//!
//! Bincode keeps `f32` values bit-exact, so `decode(encode(w)) == w` holds
//! for any valid weight set. An LZ4 framing is available for large weight
//! payloads.

use crate::codec::{ConfigMessage, UpdateMessage};
use crate::core::{Error, Result};
use crate::weights::WeightSet;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};

/// Serialize an update message.
pub fn encode_update(message: &UpdateMessage) -> Result<Vec<u8>> {
    Ok(bincode::serialize(message)?)
}

/// Parse an update message, re-validating tensor structure.
///
/// Fails with `Error::MalformedUpdate` when the bytes cannot be parsed into
/// a well-formed (weights, data_size) pair.
pub fn decode_update(bytes: &[u8]) -> Result<UpdateMessage> {
    let message: UpdateMessage =
        bincode::deserialize(bytes).map_err(|e| Error::MalformedUpdate(e.to_string()))?;
    message.weights.validate()?;
    Ok(message)
}

/// Serialize a config broadcast message.
pub fn encode_config(message: &ConfigMessage) -> Result<Vec<u8>> {
    Ok(bincode::serialize(message)?)
}

/// Parse a config broadcast message, re-validating tensor structure.
pub fn decode_config(bytes: &[u8]) -> Result<ConfigMessage> {
    let message: ConfigMessage =
        bincode::deserialize(bytes).map_err(|e| Error::MalformedUpdate(e.to_string()))?;
    message.weights.validate()?;
    Ok(message)
}

/// Serialize a bare weight set.
pub fn encode_weights(weights: &WeightSet) -> Result<Vec<u8>> {
    Ok(bincode::serialize(weights)?)
}

/// Parse a bare weight set.
pub fn decode_weights(bytes: &[u8]) -> Result<WeightSet> {
    let weights: WeightSet =
        bincode::deserialize(bytes).map_err(|e| Error::MalformedUpdate(e.to_string()))?;
    weights.validate()?;
    Ok(weights)
}

/// Serialize an update message with LZ4 compression.
pub fn encode_update_compressed(message: &UpdateMessage) -> Result<Vec<u8>> {
    Ok(compress_prepend_size(&encode_update(message)?))
}

/// Parse an LZ4-compressed update message.
pub fn decode_update_compressed(bytes: &[u8]) -> Result<UpdateMessage> {
    let raw =
        decompress_size_prepended(bytes).map_err(|e| Error::MalformedUpdate(e.to_string()))?;
    decode_update(&raw)
}
