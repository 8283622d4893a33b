// crates/resdrift-sim/src/emit.rs

//! Buffered writers for the three aligned outputs of one trace set.
//!
//! Each set produces:
//! - `<stem>_clean_<i>.nvt`  — ground-truth data as written,
//! - `<stem>_drift_<i>.nvt`  — read-back data after drift,
//! - `<stem>_labels_<i>.csv` — per-cycle supervision labels.
//!
//! Lines are emitted incrementally; the files are only complete once
//! [`TraceEmitter::finish`] has flushed them. A failed or abandoned set
//! leaves partial files that consumers must treat as invalid.

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
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::FILE_STEM;
use crate::sim::CycleRecord;

/// Header row of the label CSV.
pub const LABEL_HEADER: &str = "cycle,label,time_since_last_write,op,read_count_on_block,drift_pct";

/// Locations of the three files making up one trace set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSetPaths {
    /// Clean (as-written) trace.
    pub clean: PathBuf,
    /// Drifted (as-read) trace.
    pub drifted: PathBuf,
    /// Label CSV.
    pub labels: PathBuf,
}

impl TraceSetPaths {
    /// File names for trace set `set_index` under `dir`.
    #[must_use]
    pub fn new(dir: &Path, set_index: u32) -> Self {
        Self {
            clean: dir.join(format!("{FILE_STEM}_clean_{set_index}.nvt")),
            drifted: dir.join(format!("{FILE_STEM}_drift_{set_index}.nvt")),
            labels: dir.join(format!("{FILE_STEM}_labels_{set_index}.csv")),
        }
    }
}

/// Owns the three buffered writers for one trace set.
#[derive(Debug)]
pub struct TraceEmitter {
    clean: BufWriter<File>,
    drifted: BufWriter<File>,
    labels: BufWriter<File>,
    paths: TraceSetPaths,
}

impl TraceEmitter {
    /// Create (truncating) the three output files and write the CSV header.
    ///
    /// # Errors
    /// Fails if any file cannot be created or the header cannot be written.
    pub fn create(dir: &Path, set_index: u32) -> Result<Self> {
        let paths = TraceSetPaths::new(dir, set_index);
        let clean = BufWriter::new(
            File::create(&paths.clean)
                .with_context(|| format!("create {}", paths.clean.display()))?,
        );
        let drifted = BufWriter::new(
            File::create(&paths.drifted)
                .with_context(|| format!("create {}", paths.drifted.display()))?,
        );
        let mut labels = BufWriter::new(
            File::create(&paths.labels)
                .with_context(|| format!("create {}", paths.labels.display()))?,
        );
        writeln!(labels, "{LABEL_HEADER}").context("write label header")?;
        Ok(Self {
            clean,
            drifted,
            labels,
            paths,
        })
    }

    /// Append one cycle to all three outputs.
    ///
    /// # Errors
    /// Propagates the first write failure; the set is invalid afterwards.
    pub fn emit(&mut self, rec: &CycleRecord) -> Result<()> {
        writeln!(
            self.clean,
            "{} {} {:#x} {} {}",
            rec.cycle, rec.op, rec.address, rec.clean_data, rec.timestamp_ns
        )
        .context("write clean trace line")?;
        writeln!(
            self.drifted,
            "{} {} {:#x} {} {}",
            rec.cycle, rec.op, rec.address, rec.drifted_data, rec.timestamp_ns
        )
        .context("write drifted trace line")?;
        writeln!(
            self.labels,
            "{},{},{},{},{},{}",
            rec.cycle,
            u8::from(rec.label),
            rec.time_since_write_ns,
            rec.op.label_flag(),
            rec.read_count,
            rec.drift_pct
        )
        .context("write label row")?;
        Ok(())
    }

    /// Flush and close the set, returning where it was written.
    ///
    /// # Errors
    /// Fails if any buffered bytes cannot be flushed.
    pub fn finish(mut self) -> Result<TraceSetPaths> {
        self.clean.flush().context("flush clean trace")?;
        self.drifted.flush().context("flush drifted trace")?;
        self.labels.flush().context("flush label file")?;
        Ok(self.paths)
    }
}
