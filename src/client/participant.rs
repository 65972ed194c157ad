//! Client-side participant stub.
//!
//! Holds a local replica of the coordinator's model, tracks how much data
//! local training consumed, and builds the round-end update message.
//! The training itself happens outside this crate.

use crate::codec::{ConfigMessage, UpdateMessage};
use crate::core::{Error, ParticipantId, Result};
use crate::model::Model;
use crate::weights::WeightSet;
use tracing::debug;

/// One participating client.
pub struct Participant<M: Model> {
    /// This participant's identity, reported with every update.
    pub id: ParticipantId,
    model: M,
    /// Samples consumed by local training since the last update was built.
    trained_samples: u64,
}

impl<M: Model> Participant<M> {
    /// Join a federation: mirror the broadcast architecture and install the
    /// broadcast weights.
    pub fn join(id: ParticipantId, broadcast: &ConfigMessage) -> Result<Self> {
        let mut model = M::from_config(&broadcast.config)?;
        model.set_weights(broadcast.weights.clone())?;
        debug!(participant = %id, round = broadcast.round, "joined federation");
        Ok(Self {
            id,
            model,
            trained_samples: 0,
        })
    }

    /// Install the new global weights at the start of a round.
    pub fn apply_global(&mut self, broadcast: &ConfigMessage) -> Result<()> {
        self.model.set_weights(broadcast.weights.clone())
    }

    /// Record that local training consumed `samples` samples.
    pub fn record_training(&mut self, samples: u64) {
        self.trained_samples += samples;
    }

    /// Replace local weights with an externally trained set.
    pub fn set_local_weights(&mut self, weights: WeightSet) -> Result<()> {
        self.model.set_weights(weights)
    }

    /// Current local weights.
    pub fn local_weights(&self) -> WeightSet {
        self.model.get_weights()
    }

    /// Read access to the local model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Build the round-end update and reset the sample counter.
    ///
    /// Fails with `Error::InvalidContribution` when no training has been
    /// recorded, since a zero-sized contribution would be rejected by the
    /// coordinator anyway.
    pub fn build_update(&mut self) -> Result<UpdateMessage> {
        if self.trained_samples == 0 {
            return Err(Error::InvalidContribution {
                participant: self.id.to_string(),
                size: 0,
            });
        }
        let message = UpdateMessage::new(self.model.get_weights(), self.trained_samples);
        self.trained_samples = 0;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SequentialModel;
    use crate::weights::Tensor;

    fn broadcast(values: Vec<f32>) -> ConfigMessage {
        let model = SequentialModel::with_weights(WeightSet::new(vec![Tensor::from_vec(values)]));
        ConfigMessage::new(1, model.get_config(), model.get_weights())
    }

    #[test]
    fn test_join_mirrors_topology_and_weights() {
        let message = broadcast(vec![1.0, 2.0, 3.0]);
        let participant =
            Participant::<SequentialModel>::join(ParticipantId::new("p1"), &message).unwrap();
        assert_eq!(participant.local_weights(), message.weights);
    }

    #[test]
    fn test_build_update_reports_samples() {
        let message = broadcast(vec![0.5]);
        let mut participant =
            Participant::<SequentialModel>::join(ParticipantId::new("p1"), &message).unwrap();

        participant.record_training(120);
        let update = participant.build_update().unwrap();
        assert_eq!(update.data_size, 120);
        assert_eq!(update.weights, message.weights);
    }

    #[test]
    fn test_build_update_resets_counter() {
        let message = broadcast(vec![0.5]);
        let mut participant =
            Participant::<SequentialModel>::join(ParticipantId::new("p1"), &message).unwrap();

        participant.record_training(10);
        participant.build_update().unwrap();
        assert!(matches!(
            participant.build_update(),
            Err(Error::InvalidContribution { .. })
        ));
    }

    #[test]
    fn test_build_update_without_training_fails() {
        let message = broadcast(vec![0.5]);
        let mut participant =
            Participant::<SequentialModel>::join(ParticipantId::new("p1"), &message).unwrap();
        assert!(participant.build_update().is_err());
    }

    #[test]
    fn test_apply_global_rejects_mismatched_broadcast() {
        let message = broadcast(vec![0.5, 0.5]);
        let mut participant =
            Participant::<SequentialModel>::join(ParticipantId::new("p1"), &message).unwrap();

        let wrong = broadcast(vec![1.0, 2.0, 3.0]);
        assert!(participant.apply_global(&wrong).is_err());
    }
}
