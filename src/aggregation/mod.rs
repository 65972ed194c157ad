//! Weighted Aggregation Module
//!
//! The core of FLARE:
//! - `ClientUpdate` / `AggregationRound` round bookkeeping
//! - `federated_average` size-weighted mean over weight tensors
//! - `WeightAggregator` round-state collection with quorum tracking

pub mod fedavg;
pub mod round;

pub use fedavg::{federated_average, WeightAggregator};
pub use round::{AggregationRound, ClientUpdate};
