//! Benchmark workloads for the Crab ownership primitives.
//!
//! Provides pre-built workloads shared by the criterion benches:
//!
//! - [`Payload`]: a cache-line sized value, large enough that moves are not free
//! - [`payload_array`]: an exclusive array of payloads
//! - [`shared_fan_out`]: one shared value cloned into many handles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use crab_own::{ExclusiveOwner, SharedOwner};

/// Element count used by the array benchmarks.
pub const ARRAY_LEN: usize = 4096;

/// Handle count used by the fan-out benchmarks.
pub const FAN_OUT: usize = 1024;

/// A 64-byte value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Payload {
    pub words: [u64; 8],
}

impl Payload {
    pub fn seeded(seed: u64) -> Self {
        let mut words = [0; 8];
        for (i, word) in words.iter_mut().enumerate() {
            *word = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(i as u32 * 8);
        }
        Self { words }
    }
}

/// An exclusive array of `len` seeded payloads.
pub fn payload_array(len: usize) -> ExclusiveOwner<[Payload]> {
    let elements: Vec<Payload> = (0..len as u64).map(Payload::seeded).collect();
    ExclusiveOwner::from(elements)
}

/// `count` handles sharing one payload.
pub fn shared_fan_out(count: usize) -> Vec<SharedOwner<Payload>> {
    let root = SharedOwner::new(Payload::seeded(1));
    (0..count).map(|_| root.clone()).collect()
}
