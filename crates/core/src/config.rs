//! Configuration system for the simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline machine constants (memory geometry, quantum, pacing).
//! 2. **Structures:** Hierarchical config for the scheduler, memory subsystem, and driver.
//! 3. **Enums:** Scheduling policy, replacement policy, and synthetic memory traffic selectors.
//!
//! Configuration is supplied as JSON (usually inside a scenario file) or built
//! with `Config::default()`.

use serde::Deserialize;

use crate::common::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Round-robin time slice in ticks.
    pub const QUANTUM: u64 = 10;

    /// Physical memory size in bytes.
    pub const MEMORY_SIZE: usize = 0x10;

    /// Frame (and page) size in bytes.
    pub const FRAME_SIZE: usize = 0x2;

    /// Number of virtual pages described by the page table.
    pub const PAGE_COUNT: usize = 0x10;

    /// Seed for the synthetic traffic generator.
    pub const TRAFFIC_SEED: u64 = 0x2545_F491_4F6C_DD1D;
}

/// Largest physical memory or backing store accepted by [`Config::validate`], in bytes.
pub const MAX_REGION_SIZE: usize = 1 << 30;

/// Scheduling policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SchedulingPolicy {
    /// FIFO queue with quantum-based preemption.
    #[default]
    RoundRobin,
    /// First come, first served. Runs each unit to completion.
    #[serde(alias = "FCFS")]
    Fcfs,
    /// First come, last served. The most recently queued unit runs next.
    #[serde(alias = "FCLS", alias = "Lifo", alias = "LIFO")]
    Fcls,
    /// Shortest job first (non-preemptive).
    #[serde(alias = "SJF")]
    Sjf,
}

/// Page replacement policy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// First in, first out.
    #[default]
    #[serde(alias = "Fifo")]
    Fifo,
    /// Least frequently used (frequency tracked on hits, eviction in assignment order).
    #[serde(alias = "Lfu")]
    Lfu,
}

/// Synthetic memory traffic generated by the processing unit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemoryTraffic {
    /// No synthetic reads.
    #[default]
    Off,
    /// One random read on every tick.
    EveryTick,
    /// One random read on every tick that has a current unit of work.
    EveryTickWithActiveUnit,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use schedsim_core::config::{Config, ReplacementPolicy, SchedulingPolicy};
///
/// let json = r#"{
///     "scheduler": { "policy": "Sjf" },
///     "memory": { "policy": "LFU", "memory_size": 64, "frame_size": 8, "page_count": 32 },
///     "simulation": { "max_ticks": 100 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.scheduler.policy, SchedulingPolicy::Sjf);
/// assert_eq!(config.memory.policy, ReplacementPolicy::Lfu);
/// assert_eq!(config.memory.frame_count(), 8);
/// assert_eq!(config.simulation.tick_delay_ms, 0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Scheduling policy configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Memory subsystem configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Simulation driver configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Config {
    /// Checks that the configuration describes a working machine.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the frame size or page count is
    /// zero, when physical memory cannot hold a single frame, when either
    /// memory region exceeds [`MAX_REGION_SIZE`], or when round-robin is
    /// selected with a zero quantum.
    pub fn validate(&self) -> SimResult<()> {
        let mem = &self.memory;
        if mem.frame_size == 0 {
            return Err(SimError::InvalidConfig("frame_size must be non-zero".into()));
        }
        if mem.page_count == 0 {
            return Err(SimError::InvalidConfig("page_count must be non-zero".into()));
        }
        if mem.memory_size < mem.frame_size {
            return Err(SimError::InvalidConfig(format!(
                "memory_size {} cannot hold a frame of {} bytes",
                mem.memory_size, mem.frame_size
            )));
        }
        if mem.memory_size > MAX_REGION_SIZE {
            return Err(SimError::InvalidConfig(format!(
                "memory_size {} exceeds the {MAX_REGION_SIZE} byte limit",
                mem.memory_size
            )));
        }
        match mem.page_count.checked_mul(mem.frame_size) {
            Some(size) if size <= MAX_REGION_SIZE => {}
            _ => {
                return Err(SimError::InvalidConfig(format!(
                    "{} pages of {} bytes exceed the {MAX_REGION_SIZE} byte limit",
                    mem.page_count, mem.frame_size
                )));
            }
        }
        if self.scheduler.policy == SchedulingPolicy::RoundRobin && self.scheduler.quantum == 0 {
            return Err(SimError::InvalidConfig("round-robin quantum must be non-zero".into()));
        }
        Ok(())
    }
}

/// Scheduling policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Policy variant
    #[serde(default)]
    pub policy: SchedulingPolicy,

    /// Round-robin time slice in ticks (ignored by other policies)
    #[serde(default = "SchedulerConfig::default_quantum")]
    pub quantum: u64,
}

impl SchedulerConfig {
    /// Returns the default round-robin quantum.
    const fn default_quantum() -> u64 {
        defaults::QUANTUM
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::default(),
            quantum: defaults::QUANTUM,
        }
    }
}

/// Memory subsystem configuration.
///
/// Physical memory holds `memory_size / frame_size` frames. The backing store
/// covers the whole virtual address space, `page_count * frame_size` bytes.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Page replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Physical memory size in bytes
    #[serde(default = "MemoryConfig::default_memory_size")]
    pub memory_size: usize,

    /// Frame / page size in bytes
    #[serde(default = "MemoryConfig::default_frame_size")]
    pub frame_size: usize,

    /// Number of virtual pages
    #[serde(default = "MemoryConfig::default_page_count")]
    pub page_count: usize,

    /// Synthetic memory traffic mode
    #[serde(default)]
    pub traffic: MemoryTraffic,

    /// Seed for synthetic traffic addresses
    #[serde(default = "MemoryConfig::default_traffic_seed")]
    pub traffic_seed: u64,
}

impl MemoryConfig {
    /// Returns the default physical memory size.
    const fn default_memory_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default frame size.
    const fn default_frame_size() -> usize {
        defaults::FRAME_SIZE
    }

    /// Returns the default page count.
    const fn default_page_count() -> usize {
        defaults::PAGE_COUNT
    }

    /// Returns the default traffic seed.
    const fn default_traffic_seed() -> u64 {
        defaults::TRAFFIC_SEED
    }

    /// Number of physical frames.
    pub const fn frame_count(&self) -> usize {
        if self.frame_size == 0 {
            0
        } else {
            self.memory_size / self.frame_size
        }
    }

    /// Size of the virtual address space (and of the backing store) in bytes.
    ///
    /// Saturates on overflow; `Config::validate` rejects such geometries.
    pub const fn virtual_size(&self) -> usize {
        self.page_count.saturating_mul(self.frame_size)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            policy: ReplacementPolicy::default(),
            memory_size: defaults::MEMORY_SIZE,
            frame_size: defaults::FRAME_SIZE,
            page_count: defaults::PAGE_COUNT,
            traffic: MemoryTraffic::default(),
            traffic_seed: defaults::TRAFFIC_SEED,
        }
    }
}

/// Simulation driver configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationConfig {
    /// Delay between ticks in milliseconds; 0 runs synchronously
    #[serde(default)]
    pub tick_delay_ms: u64,

    /// Hard tick limit; 0 runs until natural termination
    #[serde(default)]
    pub max_ticks: u64,
}
