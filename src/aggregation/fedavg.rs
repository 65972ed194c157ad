//! Size-weighted federated averaging.
//!
//! Each participant's data volume is its voting weight: layer by layer,
//! the new global tensor is `sum_p weights[p] * (size[p] / total_size)`.

use crate::aggregation::{AggregationRound, ClientUpdate};
use crate::core::{Error, ParticipantId, Result, RoundId};
use crate::weights::{TensorAccumulator, WeightSet};
use std::collections::HashMap;
use tracing::{debug, info};

/// Combine a round of client updates into a new global weight set.
///
/// Pure function of its input; installing the result into the live model is
/// the coordinator's separate, explicit step.
///
/// # Errors
///
/// - `Error::EmptyRound` when no updates were collected.
/// - `Error::ShapeMismatch` when any participant's layer count or tensor
///   shape differs from the first participant's.
/// - `Error::InvalidContribution` when any `data_size` is zero (which also
///   covers a zero total).
pub fn federated_average(round: &AggregationRound) -> Result<WeightSet> {
    let updates = round.updates();
    let first = updates.first().ok_or(Error::EmptyRound)?;

    for update in updates {
        if update.data_size == 0 {
            return Err(Error::InvalidContribution {
                participant: update.participant_id.to_string(),
                size: update.data_size,
            });
        }
        if let Some(layer) = first.weights.first_shape_divergence(&update.weights) {
            return Err(Error::ShapeMismatch {
                participant: update.participant_id.to_string(),
                layer,
                expected: first
                    .weights
                    .layer(layer)
                    .map(|t| t.shape().to_vec())
                    .unwrap_or_default(),
                actual: update
                    .weights
                    .layer(layer)
                    .map(|t| t.shape().to_vec())
                    .unwrap_or_default(),
            });
        }
    }

    let total_size = round.total_size();
    debug_assert!(total_size > 0);

    let mut accumulators: Vec<TensorAccumulator> = first
        .weights
        .iter()
        .map(TensorAccumulator::zeros_like)
        .collect();

    for update in updates {
        let fraction = update.data_size as f64 / total_size as f64;
        for (acc, tensor) in accumulators.iter_mut().zip(update.weights.iter()) {
            acc.scaled_add(tensor, fraction);
        }
    }

    debug!(
        round = round.round,
        participants = updates.len(),
        total_size,
        "federated average computed"
    );

    Ok(WeightSet::new(
        accumulators.into_iter().map(|a| a.finish()).collect(),
    ))
}

/// Round-state holder for the coordinator: collects one update per
/// participant, answers quorum queries, and aggregates on demand.
pub struct WeightAggregator {
    /// Updates keyed by participant; resubmission replaces the earlier one.
    participants: HashMap<ParticipantId, ClientUpdate>,
    /// Current aggregation round.
    round: RoundId,
}

impl WeightAggregator {
    /// Create an aggregator starting at round 1.
    pub fn new() -> Self {
        Self {
            participants: HashMap::new(),
            round: 1,
        }
    }

    /// Accept an update for the current round.
    ///
    /// Contribution size and shape compatibility with already-collected
    /// updates are validated here so a bad update is rejected before it can
    /// poison the round.
    pub fn submit(&mut self, update: ClientUpdate) -> Result<()> {
        if update.data_size == 0 {
            return Err(Error::InvalidContribution {
                participant: update.participant_id.to_string(),
                size: update.data_size,
            });
        }

        if let Some(existing) = self.participants.values().next() {
            if let Some(layer) = existing.weights.first_shape_divergence(&update.weights) {
                return Err(Error::ShapeMismatch {
                    participant: update.participant_id.to_string(),
                    layer,
                    expected: existing
                        .weights
                        .layer(layer)
                        .map(|t| t.shape().to_vec())
                        .unwrap_or_default(),
                    actual: update
                        .weights
                        .layer(layer)
                        .map(|t| t.shape().to_vec())
                        .unwrap_or_default(),
                });
            }
        }

        debug!(
            participant = %update.participant_id,
            data_size = update.data_size,
            round = self.round,
            "update accepted"
        );
        self.participants
            .insert(update.participant_id.clone(), update);
        Ok(())
    }

    /// Compute the weighted average of everything collected so far.
    pub fn aggregate(&self) -> Result<WeightSet> {
        let round = AggregationRound::from_updates(
            self.round,
            self.participants.values().cloned().collect(),
        );
        federated_average(&round)
    }

    /// Number of participants collected this round.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Sum of all collected contribution sizes this round.
    pub fn total_size(&self) -> u64 {
        self.participants.values().map(|u| u.data_size).sum()
    }

    /// Whether at least `min_participants` updates have been collected.
    pub fn has_quorum(&self, min_participants: usize) -> bool {
        self.participants.len() >= min_participants
    }

    /// Current round number.
    pub fn current_round(&self) -> RoundId {
        self.round
    }

    /// Clear all submissions and advance to the next round.
    pub fn next_round(&mut self) {
        info!(
            completed_round = self.round,
            participants = self.participants.len(),
            "advancing round"
        );
        self.participants.clear();
        self.round += 1;
    }
}

impl Default for WeightAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::Tensor;

    fn update(id: &str, layers: Vec<Vec<f32>>, size: u64) -> ClientUpdate {
        ClientUpdate::new(
            ParticipantId::new(id),
            WeightSet::new(layers.into_iter().map(Tensor::from_vec).collect()),
            size,
        )
    }

    #[test]
    fn test_weighted_two_participants() {
        // A: [1, 1] with 100 samples, B: [3, 3] with 300 samples.
        // Expected: 1*0.25 + 3*0.75 = 2.5 per element.
        let round = AggregationRound::from_updates(
            1,
            vec![
                update("a", vec![vec![1.0, 1.0]], 100),
                update("b", vec![vec![3.0, 3.0]], 300),
            ],
        );
        let result = federated_average(&round).unwrap();
        let expected = WeightSet::new(vec![Tensor::from_vec(vec![2.5, 2.5])]);
        assert!(result.approx_eq(&expected, 1e-6));
    }

    #[test]
    fn test_identical_weights_invariant_to_size_split() {
        let round = AggregationRound::from_updates(
            1,
            vec![
                update("a", vec![vec![5.0]], 10),
                update("b", vec![vec![5.0]], 20),
                update("c", vec![vec![5.0]], 30),
            ],
        );
        let result = federated_average(&round).unwrap();
        assert!((result.layer(0).unwrap().values()[0] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_equal_sizes_reduce_to_mean() {
        let round = AggregationRound::from_updates(
            1,
            vec![
                update("a", vec![vec![1.0, 2.0], vec![0.0]], 50),
                update("b", vec![vec![3.0, 4.0], vec![2.0]], 50),
                update("c", vec![vec![5.0, 6.0], vec![4.0]], 50),
            ],
        );
        let result = federated_average(&round).unwrap();
        let expected = WeightSet::new(vec![
            Tensor::from_vec(vec![3.0, 4.0]),
            Tensor::from_vec(vec![2.0]),
        ]);
        assert!(result.approx_eq(&expected, 1e-5));
    }

    #[test]
    fn test_single_participant_identity() {
        let weights = vec![vec![0.25, -1.5, 3.75]];
        let round = AggregationRound::from_updates(1, vec![update("solo", weights, 42)]);
        let result = federated_average(&round).unwrap();
        let expected = WeightSet::new(vec![Tensor::from_vec(vec![0.25, -1.5, 3.75])]);
        assert!(result.approx_eq(&expected, 0.0));
    }

    #[test]
    fn test_order_invariance() {
        let a = update("a", vec![vec![0.1, 0.9], vec![7.0]], 17);
        let b = update("b", vec![vec![2.3, -4.5], vec![1.0]], 120);
        let c = update("c", vec![vec![-0.7, 0.0], vec![3.5]], 64);

        let forward = AggregationRound::from_updates(1, vec![a.clone(), b.clone(), c.clone()]);
        let backward = AggregationRound::from_updates(1, vec![c, b, a]);

        let x = federated_average(&forward).unwrap();
        let y = federated_average(&backward).unwrap();
        assert!(x.approx_eq(&y, 1e-6));
    }

    #[test]
    fn test_empty_round_errors() {
        let round = AggregationRound::new(1);
        assert!(matches!(
            federated_average(&round),
            Err(Error::EmptyRound)
        ));
    }

    #[test]
    fn test_shape_mismatch_errors() {
        let round = AggregationRound::from_updates(
            1,
            vec![
                update("a", vec![vec![1.0, 2.0]], 10),
                update("b", vec![vec![1.0, 2.0, 3.0]], 10),
            ],
        );
        let err = federated_average(&round).unwrap_err();
        match err {
            Error::ShapeMismatch {
                participant,
                layer,
                expected,
                actual,
            } => {
                assert_eq!(participant, "b");
                assert_eq!(layer, 0);
                assert_eq!(expected, vec![2]);
                assert_eq!(actual, vec![3]);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_layer_count_mismatch_errors() {
        let round = AggregationRound::from_updates(
            1,
            vec![
                update("a", vec![vec![1.0], vec![2.0]], 10),
                update("b", vec![vec![1.0]], 10),
            ],
        );
        assert!(matches!(
            federated_average(&round),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_contribution_errors() {
        let round = AggregationRound::from_updates(
            1,
            vec![
                update("a", vec![vec![1.0]], 10),
                update("b", vec![vec![2.0]], 0),
            ],
        );
        assert!(matches!(
            federated_average(&round),
            Err(Error::InvalidContribution { .. })
        ));
    }

    #[test]
    fn test_aggregator_submit_and_quorum() {
        let mut agg = WeightAggregator::new();
        assert!(!agg.has_quorum(1));

        agg.submit(update("a", vec![vec![1.0]], 10)).unwrap();
        agg.submit(update("b", vec![vec![3.0]], 10)).unwrap();

        assert_eq!(agg.participant_count(), 2);
        assert!(agg.has_quorum(2));

        let result = agg.aggregate().unwrap();
        assert!((result.layer(0).unwrap().values()[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_aggregator_resubmission_replaces() {
        let mut agg = WeightAggregator::new();
        agg.submit(update("a", vec![vec![1.0]], 10)).unwrap();
        agg.submit(update("a", vec![vec![9.0]], 10)).unwrap();

        assert_eq!(agg.participant_count(), 1);
        let result = agg.aggregate().unwrap();
        assert!((result.layer(0).unwrap().values()[0] - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_aggregator_rejects_mismatched_submission() {
        let mut agg = WeightAggregator::new();
        agg.submit(update("a", vec![vec![1.0, 2.0]], 10)).unwrap();
        let err = agg.submit(update("b", vec![vec![1.0]], 10)).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
        // The round proceeds with the compatible participant.
        assert_eq!(agg.participant_count(), 1);
    }

    #[test]
    fn test_aggregator_rejects_zero_size() {
        let mut agg = WeightAggregator::new();
        assert!(matches!(
            agg.submit(update("a", vec![vec![1.0]], 0)),
            Err(Error::InvalidContribution { .. })
        ));
    }

    #[test]
    fn test_next_round_clears_state() {
        let mut agg = WeightAggregator::new();
        agg.submit(update("a", vec![vec![1.0]], 10)).unwrap();
        assert_eq!(agg.current_round(), 1);

        agg.next_round();
        assert_eq!(agg.current_round(), 2);
        assert_eq!(agg.participant_count(), 0);
        assert!(matches!(agg.aggregate(), Err(Error::EmptyRound)));
    }
}
