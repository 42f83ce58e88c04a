//! Synthetic memory traffic.
//!
//! Issues one pseudo-random virtual read per tick so the replacement policy
//! has work to do without an external workload. The generator is a seeded
//! xorshift64, so a run with the same seed replays the same addresses.

use crate::common::VirtAddr;
use crate::config::MemoryTraffic;

/// Seeded address generator for synthetic reads.
#[derive(Debug, Clone)]
pub struct TrafficGenerator {
    mode: MemoryTraffic,
    state: u64,
    span: u64,
}

impl TrafficGenerator {
    /// Creates a generator over `[0, span)`.
    ///
    /// A zero seed would lock xorshift at zero, so it is replaced by one.
    pub const fn new(mode: MemoryTraffic, seed: u64, span: u64) -> Self {
        Self {
            mode,
            state: if seed == 0 { 1 } else { seed },
            span,
        }
    }

    /// Configured traffic mode.
    pub const fn mode(&self) -> MemoryTraffic {
        self.mode
    }

    /// Whether a synthetic read is due this tick.
    pub const fn is_due(&self, occupied: bool) -> bool {
        match self.mode {
            MemoryTraffic::Off => false,
            MemoryTraffic::EveryTick => self.span > 0,
            MemoryTraffic::EveryTickWithActiveUnit => occupied && self.span > 0,
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Next address in `[0, span)`.
    pub fn next_address(&mut self) -> VirtAddr {
        let span = self.span.max(1);
        VirtAddr::new(self.next_u64() % span)
    }
}
