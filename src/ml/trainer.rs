// ============================================================
// Layer 5 — Training Loop
// ============================================================
// One full pass over the batch source per epoch, using Burn's
// DataLoader and Adam.
//
// Backend note:
//   - Training uses Autodiff<NdArray> for gradients
//   - The demo is in-memory and CPU-only, so the plain ndarray
//     backend is all it needs — no GPU feature flags
//
// The loop does exactly what it says and nothing more: no
// checkpointing, no early stopping, no validation split. It runs
// the configured number of epochs and hands back the complete
// per-epoch average-loss history.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::NextTokenBatcher, dataset::SequenceDataset};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{EncoderConfig, NextTokenEncoder};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

pub fn run_training(
    cfg:     &TrainConfig,
    dataset: SequenceDataset,
    metrics: Option<&MetricsLogger>,
) -> Result<Vec<f64>> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);
    train_loop(cfg, dataset, metrics, device)
}

fn train_loop(
    cfg:     &TrainConfig,
    dataset: SequenceDataset,
    metrics: Option<&MetricsLogger>,
    device:  burn::backend::ndarray::NdArrayDevice,
) -> Result<Vec<f64>> {

    // ── Build model ───────────────────────────────────────────────────────────
    // The encoder only ever sees shifted inputs of length seq_len - 1,
    // so that is exactly the positional table capacity it gets.
    let model_cfg = EncoderConfig::new(
        cfg.vocab_size, cfg.seq_len - 1, cfg.d_model,
        cfg.num_heads, cfg.num_layers, cfg.d_ff, cfg.dropout,
    );
    let mut model: NextTokenEncoder<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} layers, d_model={}, positional table {}x{}",
        cfg.num_layers, cfg.d_model, cfg.seq_len - 1, cfg.d_model,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Data loader ───────────────────────────────────────────────────────────
    // shuffle(seed) reshuffles at every epoch boundary; one loader.iter()
    // pass is exactly one epoch over the batch source.
    let batcher = NextTokenBatcher::<TrainBackend>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.inputs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_loss = if batches > 0 {
            loss_sum / batches as f64
        } else { f64::NAN };

        println!("Epoch {:>3}/{} | avg_loss={:.4}", epoch, cfg.epochs, avg_loss);
        history.push(avg_loss);

        if let Some(logger) = metrics {
            logger.log(&EpochMetrics::new(epoch, avg_loss))?;
        }
    }

    tracing::info!("Training complete after {} epochs", cfg.epochs);
    Ok(history)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::generate_samples;
    use rand::{rngs::StdRng, SeedableRng};

    fn tiny_config(epochs: usize) -> TrainConfig {
        TrainConfig {
            num_sequences: 16,
            seq_len:       5,
            vocab_size:    20,
            batch_size:    4,
            epochs,
            lr:            1e-3,
            d_model:       8,
            num_heads:     2,
            num_layers:    1,
            d_ff:          16,
            dropout:       0.1,
            seed:          42,
            metrics_dir:   None,
        }
    }

    #[test]
    fn test_history_length_equals_epoch_count() {
        let cfg = tiny_config(3);
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let samples = generate_samples(&mut rng, cfg.num_sequences, cfg.seq_len, cfg.vocab_size);
        let history = run_training(&cfg, SequenceDataset::new(samples), None).unwrap();
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_epoch_losses_are_finite() {
        let cfg = tiny_config(2);
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate_samples(&mut rng, cfg.num_sequences, cfg.seq_len, cfg.vocab_size);
        let history = run_training(&cfg, SequenceDataset::new(samples), None).unwrap();
        assert!(history.iter().all(|l| l.is_finite() && *l >= 0.0));
    }
}
