// crates/resdrift-sim/src/config.rs

//! Fixed simulation parameters, gathered into one documented struct.
//!
//! The generator is deliberately not tunable at runtime beyond this struct:
//! defaults reproduce the reference trace workload. No validation is
//! performed; callers are responsible for supplying sane values (e.g.
//! probabilities inside `[0, 1]`).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Minimum idle-gap injected between operations, inclusive (ns).
pub const IDLE_GAP_MIN_NS: u64 = 100;
/// Maximum idle-gap injected between operations, inclusive (ns).
pub const IDLE_GAP_MAX_NS: u64 = 10_000;

/// Common stem for the three per-set output files
/// (`<stem>_clean_<i>.nvt`, `<stem>_drift_<i>.nvt`, `<stem>_labels_<i>.csv`).
pub const FILE_STEM: &str = "solomon_trace";

/// Parameters for one generation run.
///
/// `Default` yields the reference workload: 100k cycles over 64 blocks of
/// 512 bits, zero-biased data, MLC cells two bits wide, and a mild
/// sub-linear drift law.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Directory the trace files are written into (created if absent).
    pub output_dir: PathBuf,
    /// Number of independent trace sets to generate.
    pub num_trace_sets: u32,
    /// Cycles (rows) per trace set.
    pub rows_per_trace: u64,
    /// Bits per block; also the stride between block addresses.
    pub block_size_bits: u64,
    /// Number of addressable block slots.
    pub num_blocks: u64,
    /// Probability an individual generated bit is '0'.
    pub zero_prob: f64,
    /// Probability an idle gap is inserted before an operation's latency.
    pub idle_prob: f64,
    /// Probability the address generator reuses a previously touched block.
    pub reuse_prob: f64,
    /// Width of one multi-level cell unit, in bits. Drift flips whole units.
    pub cell_bits: u64,
    /// Group emitted bit strings into `cell_bits`-wide chunks separated by
    /// spaces. Purely cosmetic; stripped before any bit-level processing.
    pub pretty_print: bool,
    /// Latency charged to a read operation (ns).
    pub read_latency_ns: u64,
    /// Latency charged to a write operation (ns).
    pub write_latency_ns: u64,
    /// Exponent of the drift law: elapsed seconds are raised to this power.
    pub drift_exponent: f64,
    /// Scale applied to the drift factor to obtain a per-unit flip probability.
    pub drift_sensitivity: f64,
    /// Seed for the run's RNG. `None` draws entropy from the OS; bit-exact
    /// reproducibility requires `Some`.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("traces"),
            num_trace_sets: 1,
            rows_per_trace: 100_000,
            block_size_bits: 512,
            num_blocks: 64,
            zero_prob: 0.88,
            idle_prob: 0.01,
            reuse_prob: 0.1,
            cell_bits: 2,
            pretty_print: false,
            read_latency_ns: 50,
            write_latency_ns: 500,
            drift_exponent: 0.1,
            drift_sensitivity: 0.01,
            seed: None,
        }
    }
}
