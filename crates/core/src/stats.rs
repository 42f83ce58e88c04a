//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of a simulation run. It provides:
//! 1. **Ticks:** Total, busy and idle ticks.
//! 2. **Scheduling:** Dispatches, preemptions, finished units and lifecycle errors.
//! 3. **Paging:** Hits, misses, evictions and the derived hit rate.

use std::time::Instant;

/// Simulation statistics structure tracking all run counters.
#[derive(Debug, Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total ticks elapsed.
    pub ticks: u64,
    /// Ticks on which a unit held the CPU.
    pub busy_ticks: u64,
    /// Ticks on which the CPU was free.
    pub idle_ticks: u64,

    /// Units put on the CPU.
    pub dispatches: u64,
    /// Units taken off the CPU before completion.
    pub preemptions: u64,
    /// Units that completed.
    pub processes_finished: u64,
    /// Nonzero return codes from unit ticks.
    pub lifecycle_errors: u64,

    /// Reads that found their page resident.
    pub page_hits: u64,
    /// Reads that faulted.
    pub page_misses: u64,
    /// Faults that displaced a resident page.
    pub evictions: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            ticks: 0,
            busy_ticks: 0,
            idle_ticks: 0,
            dispatches: 0,
            preemptions: 0,
            processes_finished: 0,
            lifecycle_errors: 0,
            page_hits: 0,
            page_misses: 0,
            evictions: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "scheduler", "memory"];

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

impl SimStats {
    /// Total page accesses.
    pub const fn page_accesses(&self) -> u64 {
        self.page_hits + self.page_misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`. Zero when nothing was read.
    pub fn hit_rate(&self) -> f64 {
        percent(self.page_hits, self.page_accesses()) / 100.0
    }

    /// Fraction of ticks with a unit on the CPU, in `[0, 1]`.
    pub fn utilization(&self) -> f64 {
        percent(self.busy_ticks, self.ticks) / 100.0
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            println!("\n==========================================================");
            println!("SCHEDULER SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_ticks                {}", self.ticks);
            println!(
                "ticks.busy               {} ({:.2}%)",
                self.busy_ticks,
                percent(self.busy_ticks, self.ticks)
            );
            println!(
                "ticks.idle               {} ({:.2}%)",
                self.idle_ticks,
                percent(self.idle_ticks, self.ticks)
            );
            println!("----------------------------------------------------------");
        }
        if want("scheduler") {
            println!("SCHEDULER");
            println!("  sched.dispatches       {}", self.dispatches);
            println!("  sched.preemptions      {}", self.preemptions);
            println!("  proc.finished          {}", self.processes_finished);
            println!("  proc.errors            {}", self.lifecycle_errors);
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            let accesses = self.page_accesses();
            println!("VIRTUAL MEMORY");
            println!(
                "  accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                accesses,
                self.page_hits,
                percent(self.page_misses, accesses)
            );
            println!("  page.evictions         {}", self.evictions);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
