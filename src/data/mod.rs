// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer produces the synthetic training data and turns it
// into tensor batches.
//
// The pipeline flows in this order:
//
//   generator          → draws uniform-random token sequences
//       │
//       ▼
//   NextTokenSample    → pairs each sequence with its one-step shift
//       │
//       ▼
//   SequenceDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   NextTokenBatcher   → stacks samples into [batch, seq_len] tensors
//       │
//       ▼
//   DataLoader         → feeds shuffled batches to the training loop
//
// Everything lives in memory for the duration of one run —
// there are no files and no persistence in this layer.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Draws random token sequences for the demo task
pub mod generator;

/// Implements Burn's Dataset trait for next-token samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
