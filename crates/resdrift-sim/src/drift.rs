// crates/resdrift-sim/src/drift.rs

//! Time-dependent resistance-drift error model.
//!
//! Stored values degrade as a function of the time since the block was last
//! written. The model works on fixed-width multi-level cell units: for each
//! unit it draws a flip with probability
//!
//! ```text
//! drift_prob = (elapsed_ns / 1e9) ^ drift_exponent * drift_sensitivity
//! ```
//!
//! and, on a flip, inverts every bit of the unit (a unit-wide event, not
//! independent per-bit noise). The sub-linear exponent makes the probability
//! rise quickly and then flatten with age. An elapsed time of 0 yields
//! `0^exp = 0`, i.e. no drift, through the same formula — but callers must
//! not invoke the model at all for blocks with no write history, where
//! "time since write" is undefined rather than zero.

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

use rand::Rng;

use crate::config::SimConfig;
use crate::data::{group_cells, strip_grouping};

/// Drifted view of a block plus its error statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftOutcome {
    /// Read-back data, regrouped like the input when pretty-printing is on.
    pub data: String,
    /// Number of bit positions differing from the input (grouping stripped).
    pub bit_errors: u64,
    /// `bit_errors` over the total bit length.
    pub fraction: f64,
}

/// Applies the drift law to block data at read time.
#[derive(Debug, Clone, Copy)]
pub struct DriftModel {
    cell_bits: u64,
    exponent: f64,
    sensitivity: f64,
    pretty_print: bool,
}

impl DriftModel {
    /// Build the model from the run configuration.
    #[must_use]
    pub const fn from_config(cfg: &SimConfig) -> Self {
        Self {
            cell_bits: cfg.cell_bits,
            exponent: cfg.drift_exponent,
            sensitivity: cfg.drift_sensitivity,
            pretty_print: cfg.pretty_print,
        }
    }

    /// Drift `data` as read `elapsed_ns` after its last write.
    ///
    /// Any pretty-print grouping is stripped before processing and reapplied
    /// to the output with the same unit width.
    pub fn apply(&self, rng: &mut impl Rng, data: &str, elapsed_ns: u64) -> DriftOutcome {
        let stripped = if self.pretty_print {
            strip_grouping(data)
        } else {
            data.to_owned()
        };

        let drift_factor = (elapsed_ns as f64 / 1e9).powf(self.exponent);
        let drift_prob = drift_factor * self.sensitivity;

        let width = self.cell_bits.max(1) as usize;
        let mut drifted = String::with_capacity(stripped.len());
        let chars: Vec<char> = stripped.chars().collect();
        for unit in chars.chunks(width) {
            if rng.random::<f64>() < drift_prob {
                for &b in unit {
                    drifted.push(if b == '0' { '1' } else { '0' });
                }
            } else {
                drifted.extend(unit);
            }
        }

        let bit_errors = stripped
            .chars()
            .zip(drifted.chars())
            .filter(|(a, b)| a != b)
            .count() as u64;
        let fraction = if stripped.is_empty() {
            0.0
        } else {
            bit_errors as f64 / stripped.len() as f64
        };

        let data = if self.pretty_print && self.cell_bits > 1 {
            group_cells(&drifted, self.cell_bits)
        } else {
            drifted
        };

        DriftOutcome {
            data,
            bit_errors,
            fraction,
        }
    }
}
