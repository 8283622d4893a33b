// crates/resdrift-sim/src/address.rs

//! Block-address selection with reuse bias.
//!
//! Addresses are multiples of the block size drawn from a fixed number of
//! slots, so the set of distinct addresses a run can ever produce is bounded
//! by `num_blocks`.

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

/// Draws block addresses, preferring previously touched blocks with a
/// configurable probability.
#[derive(Debug)]
pub struct AddressGenerator {
    block_size_bits: u64,
    num_blocks: u64,
    used: Vec<u64>,
}

impl AddressGenerator {
    /// New generator over `num_blocks` slots spaced `block_size_bits` apart.
    #[must_use]
    pub const fn new(num_blocks: u64, block_size_bits: u64) -> Self {
        Self {
            block_size_bits,
            num_blocks,
            used: Vec::new(),
        }
    }

    /// Pick the next address.
    ///
    /// With probability `reuse_prob` (and a non-empty history) this returns
    /// a uniformly chosen previously used address; otherwise it draws a
    /// fresh uniform slot and records it. Always returns a valid address.
    pub fn next(&mut self, rng: &mut impl Rng, reuse_prob: f64) -> u64 {
        if !self.used.is_empty() && rng.random::<f64>() < reuse_prob {
            self.used[rng.random_range(0..self.used.len())]
        } else {
            let addr = rng.random_range(0..self.num_blocks) * self.block_size_bits;
            if !self.used.contains(&addr) {
                self.used.push(addr);
            }
            addr
        }
    }

    /// Addresses touched so far, in first-touch order.
    #[must_use]
    pub fn used(&self) -> &[u64] {
        &self.used
    }
}
