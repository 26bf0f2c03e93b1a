// ============================================================
// Layer 5 — Learnable Positional Encoding
// ============================================================
// The one piece of original design in this repository.
//
// Instead of the fixed sinusoidal table from the original
// transformer paper, positions get a trainable table of shape
// [max_len, d_model]: one row per absolute position, initialised
// to zero and adjusted by the optimizer like any other weight.
//
// Integration point: the encoder adds the first L rows of the
// table to a [batch, L, d_model] embedding tensor, elementwise.
// The slice always starts at row 0, so positions are relative to
// the start of the presented window — absolute document offsets
// never carry over between calls.
//
// Capacity is fixed at construction. A sequence longer than
// max_len is an input-contract violation and panics immediately
// rather than wrapping or clipping.
//
// Reference: Vaswani et al. (2017) §3.5 (learned vs. sinusoidal)
//            Burn Book §3 (custom Modules and Param)

use burn::{
    module::Param,
    prelude::*,
};

#[derive(Config, Debug)]
pub struct LearnedPositionalEncodingConfig {
    /// Maximum sequence length the table can serve
    pub max_len: usize,
    /// Width of each position vector — must match the token embedding
    pub d_model: usize,
}

impl LearnedPositionalEncodingConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LearnedPositionalEncoding<B> {
        // Zero initialisation: at step 0 the encoder behaves exactly as if
        // it had no positional signal, and the table only departs from zero
        // where gradients push it.
        let table = Tensor::zeros([self.max_len, self.d_model], device);
        LearnedPositionalEncoding {
            table:   Param::from_tensor(table),
            max_len: self.max_len,
            d_model: self.d_model,
        }
    }
}

/// A trainable table of positional offsets, owned by the encoder
/// and updated in place by the optimizer step.
#[derive(Module, Debug)]
pub struct LearnedPositionalEncoding<B: Backend> {
    pub table: Param<Tensor<B, 2>>,
    max_len:   usize,
    d_model:   usize,
}

impl<B: Backend> LearnedPositionalEncoding<B> {
    /// The first `len` rows of the table — shape [len, d_model].
    ///
    /// Panics if `len` exceeds the configured capacity.
    pub fn rows(&self, len: usize) -> Tensor<B, 2> {
        assert!(
            len <= self.max_len,
            "sequence length {len} exceeds positional table capacity {}",
            self.max_len
        );
        self.table.val().slice([0..len, 0..self.d_model])
    }

    /// Broadcast-add positional offsets to a [batch, seq_len, d_model]
    /// embedding tensor: output[b][i] = embeddings[b][i] + table[i].
    pub fn forward(&self, embeddings: Tensor<B, 3>) -> Tensor<B, 3> {
        let [_, seq_len, _] = embeddings.dims();
        embeddings + self.rows(seq_len).unsqueeze::<3>()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn encoding(max_len: usize, d_model: usize) -> LearnedPositionalEncoding<TestBackend> {
        LearnedPositionalEncodingConfig::new(max_len, d_model).init(&Default::default())
    }

    #[test]
    fn test_rows_shape_for_all_valid_lengths() {
        let pos = encoding(8, 4);
        for len in 1..=8 {
            assert_eq!(pos.rows(len).dims(), [len, 4]);
        }
    }

    #[test]
    fn test_rows_deterministic_with_unchanged_parameters() {
        let pos = encoding(6, 3);
        let a = pos.rows(5).into_data();
        let b = pos.rows(5).into_data();
        a.assert_eq(&b, true);
    }

    #[test]
    fn test_zero_table_is_identity() {
        // Freshly initialised table is all zeros, so the add must return
        // the embeddings bit-for-bit.
        let pos = encoding(10, 4);
        let input = Tensor::<TestBackend, 3>::ones([2, 7, 4], &Default::default());
        let output = pos.forward(input.clone());
        output.into_data().assert_eq(&input.into_data(), true);
    }

    #[test]
    fn test_add_is_elementwise() {
        let device = Default::default();
        let table = Tensor::<TestBackend, 2>::from_floats(
            [[0.5, -1.0], [2.0, 0.0], [-3.0, 0.25]],
            &device,
        );
        let pos = LearnedPositionalEncoding {
            table:   Param::from_tensor(table),
            max_len: 3,
            d_model: 2,
        };

        let input = Tensor::<TestBackend, 3>::from_floats(
            [[[1.0, 1.0], [1.0, 1.0]]],
            &device,
        );
        let expected = Tensor::<TestBackend, 3>::from_floats(
            [[[1.5, 0.0], [3.0, 1.0]]],
            &device,
        );
        // Only the first 2 rows of the table participate for L=2
        pos.forward(input).into_data().assert_eq(&expected.into_data(), true);
    }

    #[test]
    #[should_panic(expected = "exceeds positional table capacity")]
    fn test_length_beyond_capacity_panics() {
        let pos = encoding(4, 2);
        let input = Tensor::<TestBackend, 3>::ones([1, 5, 2], &Default::default());
        pos.forward(input);
    }
}
