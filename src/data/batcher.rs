// ============================================================
// Layer 4 — Next-Token Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<NextTokenSample>
// into tensors the encoder can consume.
//
// How batching works here:
//   Input:  Vec of N samples, each with sequences of length L
//   Output: NextTokenBatch with two Int tensors of shape [N, L]
//
//   We flatten all ids into one long Vec, then reshape:
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// All samples come from the same generator run and therefore share
// one fixed length — no padding or masking is needed.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::NextTokenSample;

/// A batch of next-token samples ready for the model forward pass.
///
/// B is the Burn Backend (e.g. NdArray, Wgpu) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct NextTokenBatch<B: Backend> {
    /// Token id sequences — shape: [batch_size, seq_len]
    pub inputs: Tensor<B, 2, Int>,

    /// The token following each input position — shape: [batch_size, seq_len]
    pub targets: Tensor<B, 2, Int>,
}

/// Holds the target device so tensors are created in the right place.
#[derive(Clone, Debug)]
pub struct NextTokenBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> NextTokenBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<NextTokenSample, NextTokenBatch<B>> for NextTokenBatcher<B> {
    fn batch(&self, items: Vec<NextTokenSample>) -> NextTokenBatch<B> {
        let batch_size = items.len();
        // All sequences share one fixed length by construction
        let seq_len = items[0].seq_len();

        // Burn uses i32 for Int tensor construction
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input_ids.iter().map(|&x| x as i32))
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.target_ids.iter().map(|&x| x as i32))
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            target_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        NextTokenBatch { inputs, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device = Default::default();
        let batcher = NextTokenBatcher::<TestBackend>::new(device);
        let items = vec![
            NextTokenSample::from_sequence(&[0, 1, 2, 3], 5),
            NextTokenSample::from_sequence(&[4, 3, 2, 1], 5),
            NextTokenSample::from_sequence(&[1, 1, 1, 1], 5),
        ];
        let batch = batcher.batch(items);
        assert_eq!(batch.inputs.dims(), [3, 3]);
        assert_eq!(batch.targets.dims(), [3, 3]);
    }

    #[test]
    fn test_batch_preserves_sample_order() {
        let device = Default::default();
        let batcher = NextTokenBatcher::<TestBackend>::new(device);
        let items = vec![
            NextTokenSample::from_sequence(&[0, 1, 2], 5),
            NextTokenSample::from_sequence(&[3, 4, 0], 5),
        ];
        let batch = batcher.batch(items);

        let expected_inputs = Tensor::<TestBackend, 2, Int>::from_ints(
            [[0, 1], [3, 4]],
            &Default::default(),
        );
        let expected_targets = Tensor::<TestBackend, 2, Int>::from_ints(
            [[1, 2], [4, 0]],
            &Default::default(),
        );
        batch.inputs.into_data().assert_eq(&expected_inputs.into_data(), true);
        batch.targets.into_data().assert_eq(&expected_targets.into_data(), true);
    }
}
