//! Update Codec Module
//!
//! Transport-neutral serialization of the two protocol messages:
//! - `ConfigMessage` coordinator broadcasts (config + weights)
//! - `UpdateMessage` participant reports (weights + data size)
//! - Bincode wire functions with optional LZ4 framing

pub mod message;
pub mod wire;

pub use message::{ConfigMessage, UpdateMessage};
pub use wire::{
    decode_config, decode_update, decode_update_compressed, decode_weights, encode_config,
    encode_update, encode_update_compressed, encode_weights,
};
