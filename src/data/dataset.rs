use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One next-token training sample.
/// `target_ids` is `input_ids` shifted left by one position: the label at
/// position i is the token that followed position i in the source sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextTokenSample {
    pub input_ids:  Vec<u32>,
    pub target_ids: Vec<u32>,
}

impl NextTokenSample {
    /// Build a sample from a raw token sequence of length >= 2:
    /// input is `sequence[..len-1]`, target is `sequence[1..]`.
    ///
    /// Out-of-vocabulary ids are a programmer error — the generator is the
    /// only producer of sequences, so a bad id here means a bug upstream,
    /// not a recoverable condition.
    pub fn from_sequence(sequence: &[u32], vocab_size: usize) -> Self {
        assert!(
            sequence.len() >= 2,
            "next-token sample needs at least 2 tokens, got {}",
            sequence.len()
        );
        Self::new(
            sequence[..sequence.len() - 1].to_vec(),
            sequence[1..].to_vec(),
            vocab_size,
        )
    }

    pub fn new(input_ids: Vec<u32>, target_ids: Vec<u32>, vocab_size: usize) -> Self {
        assert_eq!(
            input_ids.len(),
            target_ids.len(),
            "input and target sequences must have the same length"
        );
        for &id in input_ids.iter().chain(target_ids.iter()) {
            assert!(
                (id as usize) < vocab_size,
                "token id {id} is outside the vocabulary range [0, {vocab_size})"
            );
        }
        Self { input_ids, target_ids }
    }

    pub fn seq_len(&self) -> usize {
        self.input_ids.len()
    }
}

/// An in-memory dataset of next-token samples.
/// Held for the lifetime of one training run — nothing is persisted.
pub struct SequenceDataset {
    samples: Vec<NextTokenSample>,
}

impl SequenceDataset {
    pub fn new(samples: Vec<NextTokenSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<NextTokenSample> for SequenceDataset {
    fn get(&self, index: usize) -> Option<NextTokenSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sequence_shifts_by_one() {
        let sample = NextTokenSample::from_sequence(&[3, 1, 4, 1, 5], 10);
        assert_eq!(sample.input_ids, vec![3, 1, 4, 1]);
        assert_eq!(sample.target_ids, vec![1, 4, 1, 5]);
        assert_eq!(sample.seq_len(), 4);
    }

    #[test]
    #[should_panic(expected = "outside the vocabulary range")]
    fn test_out_of_vocab_id_panics() {
        NextTokenSample::from_sequence(&[0, 1, 10], 10);
    }

    #[test]
    #[should_panic(expected = "at least 2 tokens")]
    fn test_single_token_sequence_panics() {
        NextTokenSample::from_sequence(&[7], 10);
    }

    #[test]
    fn test_dataset_get_and_len() {
        let samples = vec![
            NextTokenSample::from_sequence(&[0, 1, 2], 5),
            NextTokenSample::from_sequence(&[2, 3, 4], 5),
        ];
        let dataset = SequenceDataset::new(samples);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(1).unwrap().input_ids, vec![2, 3]);
        assert!(dataset.get(2).is_none());
    }
}
