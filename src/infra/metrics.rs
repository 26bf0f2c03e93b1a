// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the average loss to a CSV file after each epoch.
//
// Why log metrics to CSV?
//   - Easy to open in Excel or Google Sheets
//   - Can plot the learning curve to check the table is learning
//   - Provides a record of each demo run
//
// The training results themselves stay in memory (the trainer
// returns the full loss history); this file is observability
// only, and the whole logger can be switched off with a flag.
//
// Example CSV output:
//   epoch,avg_loss
//   1,3.912400
//   2,3.887100
//   ...
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average cross-entropy loss over all batches in the epoch.
    /// On uniform-random data this starts near ln(vocab_size).
    pub avg_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, avg_loss: f64) -> Self {
        Self { epoch, avg_loss }
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Write the header only if the file is new — this allows
        // appending to an existing log across runs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,avg_loss")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{:.6}", m.epoch, m.avg_loss)?;

        tracing::debug!("Logged epoch {} metrics: avg_loss={:.4}", m.epoch, m.avg_loss);
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows_written() {
        let dir = std::env::temp_dir()
            .join(format!("positional-lm-metrics-{}", std::process::id()));
        let dir_str = dir.to_string_lossy().into_owned();

        let logger = MetricsLogger::new(dir_str).unwrap();
        logger.log(&EpochMetrics::new(1, 3.9124)).unwrap();
        logger.log(&EpochMetrics::new(2, 3.8871)).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "epoch,avg_loss");
        assert_eq!(lines[1], "1,3.912400");
        assert_eq!(lines[2], "2,3.887100");

        fs::remove_dir_all(dir).unwrap();
    }
}
