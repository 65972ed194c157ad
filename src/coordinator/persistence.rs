//! Durable snapshots of the global model.
//!
//! Save/load failures are reported as a typed status rather than propagated,
//! so a bad disk never takes the coordination loop down with it.

use crate::core::{Error, Result, RoundId};
use crate::model::ModelConfig;
use crate::weights::WeightSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of a save or load attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistenceStatus {
    /// Whether the operation completed.
    pub ok: bool,
    /// Failure detail for the operator when `ok` is false.
    pub detail: Option<String>,
}

impl PersistenceStatus {
    /// A successful outcome.
    pub fn success() -> Self {
        Self {
            ok: true,
            detail: None,
        }
    }

    /// A failed outcome carrying the error text.
    pub fn failure(err: &Error) -> Self {
        Self {
            ok: false,
            detail: Some(err.to_string()),
        }
    }
}

/// On-disk image of the coordinator's model state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Round the weights were produced in.
    pub round: RoundId,
    /// Architecture description.
    pub config: ModelConfig,
    /// Global weights.
    pub weights: WeightSet,
}

/// Write a snapshot to `path`.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let bytes =
        bincode::serialize(snapshot).map_err(|e| Error::Persistence(e.to_string()))?;
    std::fs::write(path, bytes).map_err(|e| Error::Persistence(e.to_string()))
}

/// Read a snapshot from `path`, re-validating tensor structure.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = std::fs::read(path).map_err(|e| Error::Persistence(e.to_string()))?;
    let snapshot: Snapshot =
        bincode::deserialize(&bytes).map_err(|e| Error::Persistence(e.to_string()))?;
    snapshot
        .weights
        .validate()
        .map_err(|e| Error::Persistence(e.to_string()))?;
    Ok(snapshot)
}
