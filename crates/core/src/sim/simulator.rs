//! Simulator: owns the processing unit, the arrival list and the observer.
//!
//! The driver is a state machine over ticks. Each tick enqueues the units whose
//! arrival time is the current processing-unit time and then ticks the
//! processing unit. Without a configured tick limit, the first idle tick with
//! nothing queued and nothing left to arrive latches the limit to the current
//! time.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, info_span};

use crate::common::SimResult;
use crate::config::Config;
use crate::core::ProcessingUnit;
use crate::core::cpu::{NoopObserver, Observer, TickStatus};
use crate::process::ProcessRef;

/// A registered unit of work and the tick it arrives on.
#[derive(Debug, Clone)]
pub struct Arrival {
    /// The unit.
    pub process: ProcessRef,
    /// Processing-unit time at which it is queued.
    pub arrival_time: u64,
}

/// Cloneable cancellation flag for a running simulation.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Requests that the run stops before its next tick. Idempotent.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn rearm(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Top-level simulator: processing unit plus arrival-driven tick loop.
pub struct Simulation {
    unit: ProcessingUnit,
    arrivals: Vec<Arrival>,
    observer: Box<dyn Observer>,
    max_ticks: u64,
    tick_delay: Duration,
    stop: StopHandle,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("unit", &self.unit)
            .field("arrivals", &self.arrivals)
            .field("max_ticks", &self.max_ticks)
            .field("tick_delay", &self.tick_delay)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates a simulation with no units and a no-op observer.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::InvalidConfig`] if the configuration is rejected.
    pub fn new(config: &Config) -> SimResult<Self> {
        Ok(Self {
            unit: ProcessingUnit::new(config)?,
            arrivals: Vec::new(),
            observer: Box::new(NoopObserver),
            max_ticks: config.simulation.max_ticks,
            tick_delay: Duration::from_millis(config.simulation.tick_delay_ms),
            stop: StopHandle::default(),
        })
    }

    /// Replaces the observer.
    #[must_use]
    pub fn with_observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Replaces the observer in place.
    pub fn set_observer(&mut self, observer: Box<dyn Observer>) {
        self.observer = observer;
    }

    /// Registers `process` to be queued when the processing unit reaches `arrival_time`.
    pub fn set_process(&mut self, process: ProcessRef, arrival_time: u64) {
        self.arrivals.push(Arrival {
            process,
            arrival_time,
        });
    }

    /// The processing unit.
    pub const fn processing_unit(&self) -> &ProcessingUnit {
        &self.unit
    }

    /// Mutable access to the processing unit, for queueing reads between ticks.
    pub const fn processing_unit_mut(&mut self) -> &mut ProcessingUnit {
        &mut self.unit
    }

    /// Registered units in registration order.
    pub fn arrivals(&self) -> &[Arrival] {
        &self.arrivals
    }

    /// Current processing-unit time.
    pub const fn time(&self) -> u64 {
        self.unit.time()
    }

    /// Tick limit; 0 while unlimited and not yet latched.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Whether the tick limit has been reached.
    pub const fn is_finished(&self) -> bool {
        self.max_ticks > 0 && self.unit.time() >= self.max_ticks
    }

    /// Handle that stops [`Simulation::run`] from an observer or another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stops the current run before its next tick. Safe to call at any time.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Runs a single tick.
    ///
    /// # Errors
    ///
    /// Propagates any processing-unit error.
    pub fn tick(&mut self) -> SimResult<TickStatus> {
        let time = self.unit.time();
        let span = info_span!("tick", tick = time);
        let _enter = span.enter();

        for arrival in self.arrivals.iter().filter(|a| a.arrival_time == time) {
            debug!(process = %arrival.process.borrow().name(), "process arrived");
            self.unit.add_process(arrival.process.clone());
        }

        let status = self.unit.tick(self.observer.as_mut())?;

        if status == TickStatus::Idle && self.max_ticks == 0 {
            let now = self.unit.time();
            let pending = self.arrivals.iter().any(|a| a.arrival_time >= now);
            if !pending && self.unit.queue().is_empty() {
                self.max_ticks = now;
                info!(max_ticks = now, "no work left, latching tick limit");
            }
        }
        Ok(status)
    }

    /// Runs until the tick limit is reached or a stop is requested.
    ///
    /// With a zero tick delay the loop is synchronous; otherwise the calling
    /// thread sleeps for the delay before every tick.
    ///
    /// # Errors
    ///
    /// The first tick error aborts the run and is returned.
    pub fn run(&mut self) -> SimResult<()> {
        self.stop.rearm();
        while !self.is_finished() {
            if !self.tick_delay.is_zero() {
                thread::sleep(self.tick_delay);
            }
            if self.stop.is_stopped() {
                info!(tick = self.time(), "simulation stopped");
                return Ok(());
            }
            let _ = self.tick()?;
        }
        info!(tick = self.time(), "tick limit reached");
        Ok(())
    }
}
