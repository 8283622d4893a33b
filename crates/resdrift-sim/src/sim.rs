// crates/resdrift-sim/src/sim.rs

//! The simulation loop: one [`Simulator`] per trace set, stepping cycle by
//! cycle and handing each [`CycleRecord`] to the emitter.
//!
//! All per-run state (address history, block store, simulated clock, RNG)
//! lives on the `Simulator`; generating the next set constructs a fresh
//! instance rather than clearing shared state.

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

use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng as _, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::AddressGenerator;
use crate::config::{SimConfig, IDLE_GAP_MAX_NS, IDLE_GAP_MIN_NS};
use crate::data;
use crate::drift::DriftModel;
use crate::emit::{TraceEmitter, TraceSetPaths};
use crate::store::BlockStore;

/// Operation kind for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Read the block back (drift applies if it has write history).
    Read,
    /// Store fresh data into the block.
    Write,
}

impl Op {
    /// CSV flag for the label file: reads are 1, writes are 0.
    #[must_use]
    pub const fn label_flag(self) -> u8 {
        matches!(self, Self::Read) as u8
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "R",
            Self::Write => "W",
        })
    }
}

/// Everything known about one simulated cycle, ready for emission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleRecord {
    /// 1-based sequential cycle index.
    pub cycle: u64,
    /// Read or write.
    pub op: Op,
    /// Block address (a multiple of the block size).
    pub address: u64,
    /// Ground-truth data for this cycle.
    pub clean_data: String,
    /// Read-back view; equals `clean_data` for writes and history-less reads.
    pub drifted_data: String,
    /// Simulated time at completion of the operation.
    pub timestamp_ns: u64,
    /// Did this read show at least one drift-induced bit flip?
    pub label: bool,
    /// Nanoseconds since the block's last write; `-1` if never written.
    pub time_since_write_ns: i64,
    /// Read count on the block after this cycle.
    pub read_count: u64,
    /// Fraction of bit positions flipped (0.0 for writes).
    pub drift_pct: f64,
}

/// Per-set simulation state and the cycle loop over it.
#[derive(Debug)]
pub struct Simulator {
    cfg: SimConfig,
    rng: StdRng,
    addresses: AddressGenerator,
    store: BlockStore,
    model: DriftModel,
    clock_ns: u64,
    cycle: u64,
}

impl Simulator {
    /// Fresh simulator for one trace set.
    ///
    /// A configured seed is offset by `set_index` so the sets of one run are
    /// reproducible yet mutually distinct; without a seed the RNG is drawn
    /// from OS entropy.
    #[must_use]
    pub fn for_set(cfg: &SimConfig, set_index: u32) -> Self {
        let rng = cfg.seed.map_or_else(StdRng::from_os_rng, |s| {
            StdRng::seed_from_u64(s.wrapping_add(u64::from(set_index)))
        });
        Self {
            addresses: AddressGenerator::new(cfg.num_blocks, cfg.block_size_bits),
            store: BlockStore::new(),
            model: DriftModel::from_config(cfg),
            rng,
            cfg: cfg.clone(),
            clock_ns: 0,
            cycle: 0,
        }
    }

    /// Simulated time at the end of the last completed cycle (ns).
    #[must_use]
    pub const fn clock_ns(&self) -> u64 {
        self.clock_ns
    }

    /// Simulate one cycle and return its record.
    pub fn step(&mut self) -> CycleRecord {
        self.cycle += 1;
        let op = if self.rng.random::<f64>() < 0.5 {
            Op::Read
        } else {
            Op::Write
        };
        let address = self.addresses.next(&mut self.rng, self.cfg.reuse_prob);
        self.store.touch(address);

        let (clean_data, drifted_data, latency, time_since_write_ns, drift_pct, label, read_count);
        match op {
            Op::Write => {
                let fresh = data::generate_block(&mut self.rng, &self.cfg);
                self.store.write(address, fresh.clone(), self.clock_ns);
                clean_data = fresh.clone();
                drifted_data = fresh;
                latency = self.cfg.write_latency_ns;
                time_since_write_ns = 0;
                drift_pct = 0.0;
                label = false;
                read_count = self.store.read_count(address);
            }
            Op::Read => {
                let rng = &mut self.rng;
                let cfg = &self.cfg;
                let read = self.store.read(address, || data::generate_block(rng, cfg));
                latency = self.cfg.read_latency_ns;
                if let Some(written_ns) = read.last_write_ns {
                    let elapsed = self.clock_ns - written_ns;
                    let outcome = self.model.apply(&mut self.rng, &read.data, elapsed);
                    clean_data = read.data;
                    drifted_data = outcome.data;
                    time_since_write_ns = i64::try_from(elapsed).unwrap_or(i64::MAX);
                    drift_pct = outcome.fraction;
                    label = outcome.bit_errors > 0;
                } else {
                    // No write history: time since write is undefined, not
                    // zero, so the drift model is skipped entirely.
                    clean_data = read.data.clone();
                    drifted_data = read.data;
                    time_since_write_ns = -1;
                    drift_pct = 0.0;
                    label = false;
                }
                read_count = self.store.record_read(address);
            }
        }

        if self.rng.random::<f64>() < self.cfg.idle_prob {
            self.clock_ns += self.rng.random_range(IDLE_GAP_MIN_NS..=IDLE_GAP_MAX_NS);
        }
        self.clock_ns += latency;

        CycleRecord {
            cycle: self.cycle,
            op,
            address,
            clean_data,
            drifted_data,
            timestamp_ns: self.clock_ns,
            label,
            time_since_write_ns,
            read_count,
            drift_pct,
        }
    }
}

/// Generate trace set `set_index` under `cfg.output_dir`.
///
/// Creates the output directory if absent, runs `rows_per_trace` cycles on a
/// fresh [`Simulator`], and returns the written file locations.
///
/// # Errors
/// I/O failures (unwritable directory, disk full, …) abort the set; its
/// partial files are not valid traces.
pub fn generate_trace_set(cfg: &SimConfig, set_index: u32) -> Result<TraceSetPaths> {
    std::fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("create output directory {}", cfg.output_dir.display()))?;

    let mut sim = Simulator::for_set(cfg, set_index);
    let mut emitter = TraceEmitter::create(&cfg.output_dir, set_index)?;
    for _ in 0..cfg.rows_per_trace {
        let rec = sim.step();
        emitter.emit(&rec)?;
    }
    emitter.finish()
}

/// Generate all `cfg.num_trace_sets` sets, strictly one after another.
///
/// # Errors
/// Stops at the first failing set and propagates its error.
pub fn generate_trace_sets(cfg: &SimConfig) -> Result<Vec<TraceSetPaths>> {
    (0..cfg.num_trace_sets)
        .map(|i| generate_trace_set(cfg, i))
        .collect()
}
