// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer. In this demo that is exactly one thing:
//
//   metrics.rs — Training metrics logging.
//                Writes epoch-level average loss to a CSV file
//                for later plotting. Optional — the run itself
//                keeps its loss history in memory.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Training metrics CSV logger
pub mod metrics;
