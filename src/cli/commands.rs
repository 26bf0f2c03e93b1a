// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the single `train` subcommand and all its flags.
// The defaults reproduce the reference demo run, so a plain
// `positional-lm train` needs no arguments at all.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the demo encoder on synthetic next-token data
    Train(TrainArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of random token sequences to generate
    #[arg(long, default_value_t = 512)]
    pub num_sequences: usize,

    /// Length of each raw sequence — inputs and targets are one shorter
    #[arg(long, default_value_t = 10)]
    pub seq_len: usize,

    /// Total number of distinct token ids
    #[arg(long, default_value_t = 50)]
    pub vocab_size: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of full passes through the batch source
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Hidden dimension of the transformer (d_model in the paper)
    /// Every token is represented as a vector of this size
    #[arg(long, default_value_t = 32)]
    pub d_model: usize,

    /// Number of attention heads in multi-head attention
    /// d_model must be divisible by num_heads
    #[arg(long, default_value_t = 4)]
    pub num_heads: usize,

    /// Number of stacked encoder layers
    #[arg(long, default_value_t = 2)]
    pub num_layers: usize,

    /// Inner dimension of the feed-forward network
    /// Typically 4x d_model
    #[arg(long, default_value_t = 128)]
    pub d_ff: usize,

    /// Dropout probability — randomly zeroes activations during training
    /// to prevent overfitting
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Seed for data generation and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory for the metrics CSV
    #[arg(long, default_value = "runs")]
    pub metrics_dir: String,

    /// Skip writing the metrics CSV entirely
    #[arg(long)]
    pub no_metrics: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            num_sequences: a.num_sequences,
            seq_len:       a.seq_len,
            vocab_size:    a.vocab_size,
            batch_size:    a.batch_size,
            epochs:        a.epochs,
            lr:            a.lr,
            d_model:       a.d_model,
            num_heads:     a.num_heads,
            num_layers:    a.num_layers,
            d_ff:          a.d_ff,
            dropout:       a.dropout,
            seed:          a.seed,
            metrics_dir:   if a.no_metrics { None } else { Some(a.metrics_dir) },
        }
    }
}
