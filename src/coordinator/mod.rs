//! Coordinator Module
//!
//! Aggregator-side round driving:
//! - `Coordinator` owning the authoritative global model
//! - Broadcast / collect / aggregate / install round lifecycle
//! - Typed-status persistence of model snapshots

pub mod driver;
pub mod persistence;

pub use driver::{Coordinator, RoundReport};
pub use persistence::{load_snapshot, save_snapshot, PersistenceStatus, Snapshot};
