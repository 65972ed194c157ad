//! The aggregator-side round driver.
//!
//! Owns the authoritative global model, collects participant updates for the
//! current round, and installs the weighted average exactly once per round.

use crate::aggregation::{ClientUpdate, WeightAggregator};
use crate::codec::{ConfigMessage, UpdateMessage};
use crate::coordinator::persistence::{load_snapshot, save_snapshot, PersistenceStatus, Snapshot};
use crate::core::{now, ParticipantId, Result, RoundId, Timestamp};
use crate::model::Model;
use std::path::Path;
use tracing::{info, warn};

/// Summary of a completed round.
#[derive(Clone, Debug)]
pub struct RoundReport {
    /// Round that was aggregated.
    pub round: RoundId,
    /// Number of participants whose updates were combined.
    pub participants: usize,
    /// Sum of all contribution sizes.
    pub total_size: u64,
    /// When the new global weights were installed.
    pub completed_at: Timestamp,
}

/// Round coordinator owning the global model.
///
/// The model is the only shared mutable resource in the protocol; it is
/// mutated once per round in [`finish_round`](Coordinator::finish_round),
/// after every expected update has been collected.
pub struct Coordinator<M: Model> {
    model: M,
    aggregator: WeightAggregator,
    expected_participants: usize,
}

impl<M: Model> Coordinator<M> {
    /// Create a coordinator around an existing global model.
    pub fn new(model: M, expected_participants: usize) -> Self {
        Self {
            model,
            aggregator: WeightAggregator::new(),
            expected_participants,
        }
    }

    /// Current round number.
    pub fn current_round(&self) -> RoundId {
        self.aggregator.current_round()
    }

    /// Number of updates collected so far this round.
    pub fn collected(&self) -> usize {
        self.aggregator.participant_count()
    }

    /// Whether every expected update has arrived.
    pub fn round_complete(&self) -> bool {
        self.aggregator.has_quorum(self.expected_participants)
    }

    /// Read access to the global model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Build the round-start broadcast: current architecture and weights.
    pub fn broadcast(&self) -> ConfigMessage {
        ConfigMessage::new(
            self.current_round(),
            self.model.get_config(),
            self.model.get_weights(),
        )
    }

    /// Accept one participant's update for the current round.
    ///
    /// A structurally incompatible or zero-sized update is rejected here and
    /// surfaced to the transport; the round proceeds with the rest.
    pub async fn submit_update(
        &mut self,
        participant: ParticipantId,
        message: UpdateMessage,
    ) -> Result<()> {
        let update = ClientUpdate::new(participant.clone(), message.weights, message.data_size);
        match self.aggregator.submit(update) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(participant = %participant, %err, "rejected update");
                Err(err)
            }
        }
    }

    /// Aggregate the collected round and install the result.
    ///
    /// Fails without touching the model when the round is empty or the
    /// collected set is internally inconsistent; the global weights are never
    /// partially written.
    pub async fn finish_round(&mut self) -> Result<RoundReport> {
        let aggregated = self.aggregator.aggregate()?;
        self.model.set_weights(aggregated)?;

        let report = RoundReport {
            round: self.aggregator.current_round(),
            participants: self.aggregator.participant_count(),
            total_size: self.aggregator.total_size(),
            completed_at: now(),
        };
        info!(
            round = report.round,
            participants = report.participants,
            total_size = report.total_size,
            "round aggregated and installed"
        );

        self.aggregator.next_round();
        Ok(report)
    }

    /// Save the global model to durable storage.
    ///
    /// Failures are reported in the status and logged, never propagated, so
    /// the coordination loop continues.
    pub fn save(&self, path: &Path) -> PersistenceStatus {
        let snapshot = Snapshot {
            round: self.current_round(),
            config: self.model.get_config(),
            weights: self.model.get_weights(),
        };
        match save_snapshot(path, &snapshot) {
            Ok(()) => PersistenceStatus::success(),
            Err(err) => {
                warn!(path = %path.display(), %err, "model save failed");
                PersistenceStatus::failure(&err)
            }
        }
    }

    /// Restore the global model from durable storage.
    pub fn load(&mut self, path: &Path) -> PersistenceStatus {
        let snapshot = match load_snapshot(path) {
            Ok(s) => s,
            Err(err) => {
                warn!(path = %path.display(), %err, "model load failed");
                return PersistenceStatus::failure(&err);
            }
        };
        match self.model.set_weights(snapshot.weights) {
            Ok(()) => PersistenceStatus::success(),
            Err(err) => {
                warn!(path = %path.display(), %err, "loaded weights rejected by model");
                PersistenceStatus::failure(&err)
            }
        }
    }
}
