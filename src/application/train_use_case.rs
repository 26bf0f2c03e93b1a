// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full demo pipeline in order:
//
//   Step 1: Validate the configuration
//   Step 2: Generate synthetic sequences   (Layer 4 - data)
//   Step 3: Build the dataset              (Layer 4 - data)
//   Step 4: Wire the metrics logger        (Layer 6 - infra)
//   Step 5: Run the training loop          (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{dataset::SequenceDataset, generator::generate_samples};
use crate::infra::metrics::MetricsLogger;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a demo run. The defaults reproduce the
// reference run: 512 random sequences of 10 tokens over a vocabulary
// of 50, a 2-layer encoder of width 32, 10 epochs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub num_sequences: usize,
    pub seq_len:       usize,
    pub vocab_size:    usize,
    pub batch_size:    usize,
    pub epochs:        usize,
    pub lr:            f64,
    pub d_model:       usize,
    pub num_heads:     usize,
    pub num_layers:    usize,
    pub d_ff:          usize,
    pub dropout:       f64,
    pub seed:          u64,
    /// Where to write the metrics CSV; None disables metrics entirely
    pub metrics_dir:   Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_sequences: 512,
            seq_len:       10,
            vocab_size:    50,
            batch_size:    32,
            epochs:        10,
            lr:            1e-3,
            d_model:       32,
            num_heads:     4,
            num_layers:    2,
            d_ff:          128,
            dropout:       0.1,
            seed:          42,
            metrics_dir:   Some("runs".to_string()),
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full demo pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the demo end to end and return the per-epoch loss history.
    pub fn execute(&self) -> Result<Vec<f64>> {
        let cfg = &self.config;

        // ── Step 1: Validate the configuration ────────────────────────────────
        // Misconfiguration is caught here, before any tensor is allocated,
        // so the panics further down stay true programmer errors.
        ensure!(cfg.seq_len >= 2, "seq_len must be at least 2, got {}", cfg.seq_len);
        ensure!(cfg.vocab_size > 0, "vocab_size must be positive");
        ensure!(cfg.num_sequences > 0, "num_sequences must be positive");
        ensure!(cfg.batch_size > 0, "batch_size must be positive");
        ensure!(
            cfg.d_model % cfg.num_heads == 0,
            "d_model ({}) must be divisible by num_heads ({})",
            cfg.d_model, cfg.num_heads,
        );

        // ── Step 2: Generate synthetic sequences ──────────────────────────────
        // Uniform-random ids, seeded so runs are reproducible
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let samples = generate_samples(&mut rng, cfg.num_sequences, cfg.seq_len, cfg.vocab_size);

        // ── Step 3: Build the Burn dataset ────────────────────────────────────
        let dataset = SequenceDataset::new(samples);
        tracing::info!(
            "Generated {} synthetic sequences (seq_len={}, vocab_size={})",
            dataset.sample_count(), cfg.seq_len, cfg.vocab_size,
        );

        // ── Step 4: Wire the metrics logger (optional) ────────────────────────
        let metrics = match cfg.metrics_dir.as_deref() {
            Some(dir) => Some(MetricsLogger::new(dir)?),
            None      => None,
        };

        // ── Step 5: Run the training loop (Layer 5) ───────────────────────────
        let history = run_training(cfg, dataset, metrics.as_ref())?;

        if let Some(final_loss) = history.last() {
            tracing::info!("Final average loss: {:.4}", final_loss);
        }
        Ok(history)
    }
}
