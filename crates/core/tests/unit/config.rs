//! Configuration Tests.
//!
//! Defaults, JSON parsing with policy aliases, and validation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use schedsim_core::common::SimError;
use schedsim_core::config::{
    Config, MAX_REGION_SIZE, MemoryTraffic, ReplacementPolicy, SchedulingPolicy,
};

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn default_config_values() {
    let config = Config::default();
    assert_eq!(config.scheduler.policy, SchedulingPolicy::RoundRobin);
    assert_eq!(config.scheduler.quantum, 10);
    assert_eq!(config.memory.policy, ReplacementPolicy::Fifo);
    assert_eq!(config.memory.memory_size, 16);
    assert_eq!(config.memory.frame_size, 2);
    assert_eq!(config.memory.page_count, 16);
    assert_eq!(config.memory.traffic, MemoryTraffic::Off);
    assert_eq!(config.simulation.tick_delay_ms, 0);
    assert_eq!(config.simulation.max_ticks, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_json_is_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.scheduler.quantum, 10);
    assert_eq!(config.memory.frame_count(), 8);
    assert_eq!(config.memory.virtual_size(), 32);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config: Config =
        serde_json::from_str(r#"{ "memory": { "frame_size": 4 } }"#).unwrap();
    assert_eq!(config.memory.frame_size, 4);
    assert_eq!(config.memory.memory_size, 16);
    assert_eq!(config.memory.frame_count(), 4);
}

// ══════════════════════════════════════════════════════════
// 2. Policy names
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("RoundRobin", SchedulingPolicy::RoundRobin)]
#[case("Fcfs", SchedulingPolicy::Fcfs)]
#[case("FCFS", SchedulingPolicy::Fcfs)]
#[case("FCLS", SchedulingPolicy::Fcls)]
#[case("LIFO", SchedulingPolicy::Fcls)]
#[case("SJF", SchedulingPolicy::Sjf)]
fn scheduling_policy_names(#[case] name: &str, #[case] expected: SchedulingPolicy) {
    let json = format!(r#"{{ "scheduler": {{ "policy": "{name}" }} }}"#);
    let config: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(config.scheduler.policy, expected);
}

#[rstest]
#[case("FIFO", ReplacementPolicy::Fifo)]
#[case("Fifo", ReplacementPolicy::Fifo)]
#[case("LFU", ReplacementPolicy::Lfu)]
#[case("Lfu", ReplacementPolicy::Lfu)]
fn replacement_policy_names(#[case] name: &str, #[case] expected: ReplacementPolicy) {
    let json = format!(r#"{{ "memory": {{ "policy": "{name}" }} }}"#);
    let config: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(config.memory.policy, expected);
}

#[test]
fn traffic_modes_parse() {
    let config: Config =
        serde_json::from_str(r#"{ "memory": { "traffic": "EveryTickWithActiveUnit" } }"#)
            .unwrap();
    assert_eq!(config.memory.traffic, MemoryTraffic::EveryTickWithActiveUnit);
}

#[test]
fn unknown_policy_is_rejected() {
    let result: Result<Config, _> =
        serde_json::from_str(r#"{ "scheduler": { "policy": "Lottery" } }"#);
    assert!(result.is_err());
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(r#"{ "memory": { "frame_size": 0 } }"#)]
#[case(r#"{ "memory": { "page_count": 0 } }"#)]
#[case(r#"{ "memory": { "memory_size": 1, "frame_size": 2 } }"#)]
#[case(r#"{ "scheduler": { "policy": "RoundRobin", "quantum": 0 } }"#)]
fn invalid_configs_are_rejected(#[case] json: &str) {
    let config: Config = serde_json::from_str(json).unwrap();
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
}

#[test]
fn zero_quantum_is_fine_for_other_policies() {
    let config: Config =
        serde_json::from_str(r#"{ "scheduler": { "policy": "Sjf", "quantum": 0 } }"#).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn overflowing_virtual_size_is_rejected() {
    let mut config = Config::default();
    config.memory.page_count = usize::MAX / 2;
    config.memory.frame_size = 4;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    assert_eq!(config.memory.virtual_size(), usize::MAX);
}

#[rstest]
#[case(MAX_REGION_SIZE + 2, 2, 16)]
#[case(16, 2, MAX_REGION_SIZE / 2 + 1)]
fn regions_above_limit_are_rejected(
    #[case] memory_size: usize,
    #[case] frame_size: usize,
    #[case] page_count: usize,
) {
    let mut config = Config::default();
    config.memory.memory_size = memory_size;
    config.memory.frame_size = frame_size;
    config.memory.page_count = page_count;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
}

#[test]
fn regions_at_limit_are_accepted() {
    let mut config = Config::default();
    config.memory.memory_size = MAX_REGION_SIZE;
    config.memory.page_count = MAX_REGION_SIZE / config.memory.frame_size;
    assert!(config.validate().is_ok());
}
