// ============================================================
// Layer 4 — Synthetic Sequence Generator
// ============================================================
// Produces the training corpus for the demo: uniform-random
// token sequences with no structure whatsoever.
//
// Why random data?
//   The point of this repository is the positional-encoding
//   mechanism, not language modelling quality. On uniform
//   noise the model can still drive the loss below ln(V) by
//   exploiting whatever it can — which makes the wiring
//   (embedding + positions + attention + loss) easy to verify
//   without shipping a real corpus.
//
// Each raw sequence of length S becomes one sample:
//   input  = sequence[..S-1]
//   target = sequence[1..]      (next-token objective)
//
// Reference: rand crate documentation

use rand::Rng;

use crate::data::dataset::NextTokenSample;

/// Draw `num_sequences` random token sequences and turn each into a
/// next-token sample. Every id is uniform in [0, vocab_size).
///
/// The caller supplies the RNG so runs are reproducible from a seed.
pub fn generate_samples<R: Rng>(
    rng:           &mut R,
    num_sequences: usize,
    seq_len:       usize,
    vocab_size:    usize,
) -> Vec<NextTokenSample> {
    assert!(seq_len >= 2, "seq_len must be at least 2 to form input/target pairs");
    assert!(vocab_size > 0, "vocab_size must be positive");

    (0..num_sequences)
        .map(|_| {
            let sequence: Vec<u32> = (0..seq_len)
                .map(|_| rng.gen_range(0..vocab_size as u32))
                .collect();
            NextTokenSample::from_sequence(&sequence, vocab_size)
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sample_count_and_lengths() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = generate_samples(&mut rng, 10, 5, 7);
        assert_eq!(samples.len(), 10);
        for s in &samples {
            // Sequence of 5 tokens → input/target of 4 each
            assert_eq!(s.input_ids.len(), 4);
            assert_eq!(s.target_ids.len(), 4);
        }
    }

    #[test]
    fn test_target_is_input_shifted_by_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate_samples(&mut rng, 5, 6, 11);
        for s in &samples {
            // Both views come from the same raw sequence, so
            // input[1..] must equal target[..len-1].
            assert_eq!(s.input_ids[1..], s.target_ids[..s.seq_len() - 1]);
        }
    }

    #[test]
    fn test_ids_stay_in_vocabulary() {
        let mut rng = StdRng::seed_from_u64(99);
        let samples = generate_samples(&mut rng, 50, 10, 3);
        for s in &samples {
            assert!(s.input_ids.iter().all(|&id| id < 3));
            assert!(s.target_ids.iter().all(|&id| id < 3));
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        let a = generate_samples(&mut rng_a, 8, 10, 50);
        let b = generate_samples(&mut rng_b, 8, 10, 50);
        for (sa, sb) in a.iter().zip(b.iter()) {
            assert_eq!(sa.input_ids, sb.input_ids);
            assert_eq!(sa.target_ids, sb.target_ids);
        }
    }
}
