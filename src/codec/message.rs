//! Wire message types exchanged between coordinator and participants.

use crate::core::{now, Timestamp};
use crate::model::ModelConfig;
use crate::weights::WeightSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coordinator-to-participant broadcast at round start (or first join):
/// the architecture plus the current global weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigMessage {
    /// Message ID
    pub id: String,
    /// Round the weights belong to
    pub round: u64,
    /// Architecture description
    pub config: ModelConfig,
    /// Current global weights
    pub weights: WeightSet,
    /// Message timestamp
    pub timestamp: Timestamp,
}

impl ConfigMessage {
    /// Create a broadcast message for the given round.
    pub fn new(round: u64, config: ModelConfig, weights: WeightSet) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            round,
            config,
            weights,
            timestamp: now(),
        }
    }
}

/// Participant-to-coordinator report at round end: trained weights plus the
/// number of samples used to produce them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateMessage {
    /// Message ID
    pub id: String,
    /// Trained weights
    pub weights: WeightSet,
    /// Training sample count behind these weights
    pub data_size: u64,
    /// Message timestamp
    pub timestamp: Timestamp,
}

impl UpdateMessage {
    /// Create an update message stamped with the current time.
    pub fn new(weights: WeightSet, data_size: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            weights,
            data_size,
            timestamp: now(),
        }
    }
}
