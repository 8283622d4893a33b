// crates/resdrift-sim/src/store.rs

//! Per-block write-history tracking for one trace set.
//!
//! Reads of a never-written block fabricate fresh data on the spot WITHOUT
//! recording a write: the block keeps no `last_write_ns`, which is what lets
//! the driver distinguish "no history" (the `-1` sentinel) from "written at
//! the same instant" (elapsed 0). Read counts are independent of writes and
//! never reset while the store lives.

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

use std::collections::HashMap;

/// Result of a store read: the block's data and, if it was ever written,
/// the time of its most recent write.
#[derive(Debug, Clone)]
pub struct BlockRead {
    /// Last-written contents, or freshly fabricated data for virgin blocks.
    pub data: String,
    /// Timestamp of the most recent write, absent if never written.
    pub last_write_ns: Option<u64>,
}

/// Maps touched addresses to contents, last-write time, and read counts.
/// One instance per trace set; dropping it is the reset.
#[derive(Debug, Default)]
pub struct BlockStore {
    contents: HashMap<u64, String>,
    last_write_ns: HashMap<u64, u64>,
    read_counts: HashMap<u64, u64>,
}

impl BlockStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a read-count entry exists for `addr` (lazily initialised to 0).
    pub fn touch(&mut self, addr: u64) {
        let _ = self.read_counts.entry(addr).or_insert(0);
    }

    /// Read `addr`, fabricating data via `fabricate` if it was never written.
    ///
    /// Fabrication does not count as a write: repeated reads of a virgin
    /// block call `fabricate` again each time.
    pub fn read(&self, addr: u64, fabricate: impl FnOnce() -> String) -> BlockRead {
        let data = self
            .contents
            .get(&addr)
            .map_or_else(fabricate, Clone::clone);
        BlockRead {
            data,
            last_write_ns: self.last_write_ns.get(&addr).copied(),
        }
    }

    /// Overwrite the block's contents and stamp its last-write time.
    pub fn write(&mut self, addr: u64, data: String, now_ns: u64) {
        let _ = self.contents.insert(addr, data);
        let _ = self.last_write_ns.insert(addr, now_ns);
    }

    /// Record one read of `addr`, returning the post-increment count.
    pub fn record_read(&mut self, addr: u64) -> u64 {
        let count = self.read_counts.entry(addr).or_insert(0);
        *count += 1;
        *count
    }

    /// Current read count for `addr` (0 if never read).
    #[must_use]
    pub fn read_count(&self, addr: u64) -> u64 {
        self.read_counts.get(&addr).copied().unwrap_or(0)
    }
}
