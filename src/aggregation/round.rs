//! Round bookkeeping for collected client updates.

use crate::core::{now, ParticipantId, RoundId, Timestamp};
use crate::weights::WeightSet;
use serde::{Deserialize, Serialize};

/// One participant's contribution for a round: trained weights plus the
/// number of samples the training used. Created once per client per round
/// and consumed exactly once by aggregation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientUpdate {
    /// Contributing participant.
    pub participant_id: ParticipantId,
    /// Locally trained weights.
    pub weights: WeightSet,
    /// Number of training samples behind these weights. Must be positive.
    pub data_size: u64,
    /// Submission timestamp.
    pub timestamp: Timestamp,
}

impl ClientUpdate {
    /// Create an update stamped with the current time.
    pub fn new(participant_id: ParticipantId, weights: WeightSet, data_size: u64) -> Self {
        Self {
            participant_id,
            weights,
            data_size,
            timestamp: now(),
        }
    }
}

/// The set of client updates collected for one synchronization point.
#[derive(Clone, Debug, Default)]
pub struct AggregationRound {
    /// Round this collection belongs to.
    pub round: RoundId,
    updates: Vec<ClientUpdate>,
}

impl AggregationRound {
    /// Start an empty collection for the given round.
    pub fn new(round: RoundId) -> Self {
        Self {
            round,
            updates: Vec::new(),
        }
    }

    /// Build directly from collected updates.
    pub fn from_updates(round: RoundId, updates: Vec<ClientUpdate>) -> Self {
        Self { round, updates }
    }

    /// Add a collected update.
    pub fn push(&mut self, update: ClientUpdate) {
        self.updates.push(update);
    }

    /// Collected updates, in arrival order. Aggregation does not depend on
    /// this order beyond floating-point rounding.
    pub fn updates(&self) -> &[ClientUpdate] {
        &self.updates
    }

    /// Whether no updates have been collected.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Number of collected updates.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Sum of all contribution sizes.
    pub fn total_size(&self) -> u64 {
        self.updates.iter().map(|u| u.data_size).sum()
    }
}
