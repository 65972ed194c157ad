//! # FLARE - Federated Learning Aggregation & Round Engine
//!
//! A minimal federated-learning coordination layer:
//! - **Aggregation**: size-weighted averaging of per-client weight updates
//! - **Coordinator**: round lifecycle owning the authoritative global model
//! - **Participant**: client-side local model replicas
//! - **Codec**: lossless wire encoding of config broadcasts and updates
//!
//! ## Quick Start
//!
//! ```rust
//! use flare::client::Participant;
//! use flare::coordinator::Coordinator;
//! use flare::core::ParticipantId;
//! use flare::model::SequentialModel;
//!
//! #[tokio::main]
//! async fn main() {
//!     let global = SequentialModel::with_layer_shapes(vec![vec![4, 2], vec![2]]);
//!     let mut coordinator = Coordinator::new(global, 1);
//!
//!     let broadcast = coordinator.broadcast();
//!     let mut client =
//!         Participant::<SequentialModel>::join(ParticipantId::new("client-1"), &broadcast)
//!             .unwrap();
//!
//!     // ... local training happens here ...
//!     client.record_training(500);
//!
//!     let update = client.build_update().unwrap();
//!     coordinator.submit_update(client.id.clone(), update).await.unwrap();
//!     let report = coordinator.finish_round().await.unwrap();
//!     println!("round {} aggregated {} samples", report.round, report.total_size);
//! }
//! ```

pub mod aggregation;
pub mod client;
pub mod codec;
pub mod coordinator;
pub mod core;
pub mod dataset;
pub mod model;
pub mod weights;

pub use crate::core::error::{Error, Result};
