//! Model Capability Module
//!
//! The seam between coordination and the network library:
//! - Opaque `ModelConfig` architecture blobs
//! - The `Model` capability trait (get/set weights, get/set config)
//! - An in-memory reference implementation for tests and stubs

pub mod capability;
pub mod config;
pub mod sequential;

pub use capability::Model;
pub use config::ModelConfig;
pub use sequential::SequentialModel;
