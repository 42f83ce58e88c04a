//! Scenario Loader.
//!
//! A scenario is a JSON document holding a configuration and an explicit list
//! of units of work:
//!
//! ```json
//! {
//!     "config": { "scheduler": { "policy": "RoundRobin", "quantum": 3 } },
//!     "processes": [
//!         { "name": "A", "burst_time": 10, "arrival_time": 0 },
//!         { "name": "B", "burst_time": 4 }
//!     ]
//! }
//! ```
//!
//! Missing config sections take their defaults and a missing arrival time is 0.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;

use super::Simulation;
use crate::common::{SimError, SimResult};
use crate::config::Config;
use crate::process::{SimulationProcess, SimulationProcessRef};

/// One burst-driven unit of work in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessSpec {
    /// Display name.
    pub name: String,
    /// Ticks of work.
    pub burst_time: u64,
    /// Tick on which the unit is queued.
    #[serde(default)]
    pub arrival_time: u64,
}

/// A configuration plus the units to run under it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    /// Machine configuration.
    #[serde(default)]
    pub config: Config,
    /// Units of work, in registration order.
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// [`SimError::Scenario`] on malformed JSON or unknown policy names.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| SimError::Scenario(e.to_string()))
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// [`SimError::Scenario`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SimError::Scenario(format!("could not read '{}': {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Builds a simulation with every unit registered.
    ///
    /// The returned handles share state with the registered units, so their
    /// accounting can be read back after the run.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] if the configuration is rejected.
    pub fn build(&self) -> SimResult<(Simulation, Vec<SimulationProcessRef>)> {
        let mut sim = Simulation::new(&self.config)?;
        let mut handles = Vec::with_capacity(self.processes.len());
        for spec in &self.processes {
            let unit = Rc::new(RefCell::new(SimulationProcess::new(
                spec.name.clone(),
                spec.burst_time,
            )));
            sim.set_process(unit.clone(), spec.arrival_time);
            handles.push(unit);
        }
        Ok((sim, handles))
    }
}
