//! resdrift-sim — synthetic NVM trace generator with a resistance-drift model.
//!
//! Simulates a stream of read/write operations against a small non-volatile
//! memory device whose stored values degrade over time (resistance drift),
//! and emits three aligned files per trace set for training drift-detection
//! models:
//!
//! - a **clean** trace (ground truth as written),
//! - a **drifted** trace (data as read back after time-dependent decay),
//! - a **label** CSV marking which reads were corrupted.
//!
//! The whole generator is one sequential loop ([`sim::Simulator`]): address
//! selection with reuse bias ([`address`]), per-block write-history tracking
//! ([`store`]), and the drift law applied at read time ([`drift`]). There is
//! no concurrency and no real device physics.
//!
//! ```no_run
//! use resdrift_sim::{generate_trace_sets, SimConfig};
//!
//! let cfg = SimConfig { seed: Some(42), ..SimConfig::default() };
//! let sets = generate_trace_sets(&cfg)?;
//! println!("wrote {} trace set(s)", sets.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss
)]

/// Block-address selection with reuse bias.
pub mod address;
/// Fixed run parameters with documented defaults.
pub mod config;
/// Biased bit-string generation and cell grouping.
pub mod data;
/// The time-dependent drift error model.
pub mod drift;
/// Buffered writers for the three per-set output files.
pub mod emit;
/// The per-set simulator and driver loop.
pub mod sim;
/// Block state store (contents, last-write times, read counts).
pub mod store;

pub use config::SimConfig;
pub use emit::TraceSetPaths;
pub use sim::{generate_trace_set, generate_trace_sets, CycleRecord, Op, Simulator};
