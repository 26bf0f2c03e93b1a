// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn tensors directly — only the
// data layer's batcher and this one.
//
// What's in this layer:
//
//   positional.rs — The learnable positional-encoding table.
//                   The single piece of original design here:
//                   a zero-initialised [max_len, d_model] Param,
//                   sliced to the input length and added to the
//                   token embeddings.
//
//   model.rs      — The encoder architecture built from Burn's
//                   stock blocks:
//                   • Token embeddings
//                   • Learned positional offsets (positional.rs)
//                   • Multi-head self-attention
//                   • Feed-forward networks (GELU activation)
//                   • Layer normalisation + residual connections
//                   • Vocabulary projection head
//
//   trainer.rs    — The training loop: forward pass, next-token
//                   cross-entropy, backward pass, Adam step, and
//                   one average-loss line per epoch
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Vaswani et al. (2017) Attention Is All You Need

/// Learnable positional-encoding table
pub mod positional;

/// Transformer encoder with next-token projection head
pub mod model;

/// Training loop returning the per-epoch loss history
pub mod trainer;
