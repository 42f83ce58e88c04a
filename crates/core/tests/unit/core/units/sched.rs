//! Scheduling Policy Tests.
//!
//! Dispatch order, round-robin preemption and SJF selection, driven through
//! the simulation so every decision happens inside a real tick.

use std::collections::VecDeque;

use pretty_assertions::assert_eq;
use rstest::rstest;
use schedsim_core::config::{SchedulerConfig, SchedulingPolicy as Kind};
use schedsim_core::core::cpu::ExecutionSlot;
use schedsim_core::core::units::sched::{
    Fcfs, Fcls, RoundRobin, SchedulerDispatch, SchedulingPolicy, Sjf,
};
use schedsim_core::process::{self, Process, ProcessRef, ProcessStatus, SimulationProcess};

use crate::common::harness::TestContext;

fn unit(name: &str, burst: u64) -> ProcessRef {
    process::shared(SimulationProcess::new(name, burst))
}

fn names(queue: &VecDeque<ProcessRef>) -> Vec<String> {
    queue.iter().map(|p| p.borrow().name().to_string()).collect()
}

// ══════════════════════════════════════════════════════════
// 1. Dispatch order
// ══════════════════════════════════════════════════════════

/// Three one-tick units arriving together start in policy order.
#[rstest]
#[case(Kind::RoundRobin, ["A", "B", "C"])]
#[case(Kind::Fcfs, ["A", "B", "C"])]
#[case(Kind::Fcls, ["C", "B", "A"])]
#[case(Kind::Sjf, ["A", "B", "C"])]
fn dispatch_order(#[case] policy: Kind, #[case] expected: [&str; 3]) {
    let mut ctx = TestContext::with_scheduler(policy);
    let units = [ctx.add("A", 1, 0), ctx.add("B", 1, 0), ctx.add("C", 1, 0)];
    ctx.run();

    let mut started: Vec<(u64, String)> = units
        .iter()
        .map(|u| {
            let u = u.borrow();
            (u.start_time.unwrap(), u.name().to_string())
        })
        .collect();
    started.sort();
    let order: Vec<&str> = started.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(order, expected);
    assert!(units.iter().all(|u| u.borrow().status() == ProcessStatus::Finished));
}

#[test]
fn fcfs_runs_to_completion_before_next() {
    let mut ctx = TestContext::with_scheduler(Kind::Fcfs);
    let a = ctx.add("A", 2, 0);
    let b = ctx.add("B", 1, 0);
    ctx.run();

    assert_eq!(a.borrow().finish_time, Some(2));
    assert_eq!(b.borrow().start_time, Some(2));
    assert_eq!(b.borrow().finish_time, Some(3));
    assert_eq!(ctx.pu().stats.preemptions, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Round-robin preemption
// ══════════════════════════════════════════════════════════

#[test]
fn round_robin_preempts_after_quantum() {
    let mut config = crate::common::harness::config(
        Kind::RoundRobin,
        schedsim_core::config::ReplacementPolicy::Fifo,
    );
    config.scheduler.quantum = 3;
    let mut ctx = TestContext::new(config);
    let a = ctx.add("A", 10, 0);
    let b = ctx.add("B", 10, 0);

    ctx.tick_n(3);
    assert_eq!(ctx.current_name().as_deref(), Some("A"));
    assert_eq!(a.borrow().running_time, 3);

    ctx.tick_n(1);
    assert_eq!(ctx.current_name().as_deref(), Some("B"));
    assert_eq!(ctx.queue_names(), vec!["A"]);
    assert_eq!(a.borrow().status(), ProcessStatus::Waiting);
    assert_eq!(a.borrow().running_time, 3);
    assert_eq!(b.borrow().start_time, Some(3));
    assert_eq!(ctx.pu().slot().preemptions(), 1);
}

#[test]
fn round_robin_alone_is_requeued_and_resumed() {
    let mut config = crate::common::harness::config(
        Kind::RoundRobin,
        schedsim_core::config::ReplacementPolicy::Fifo,
    );
    config.scheduler.quantum = 2;
    let mut ctx = TestContext::new(config);
    let a = ctx.add("A", 5, 0);
    ctx.run();

    let a = a.borrow();
    assert_eq!(a.status(), ProcessStatus::Finished);
    assert_eq!(a.start_time, Some(0));
    assert_eq!(a.finish_time, Some(5));
    assert_eq!(ctx.pu().stats.preemptions, 2);
    assert_eq!(ctx.pu().stats.dispatches, 3);
}

// ══════════════════════════════════════════════════════════
// 3. Shortest job first
// ══════════════════════════════════════════════════════════

#[test]
fn sjf_picks_shorter_burst() {
    let mut ctx = TestContext::with_scheduler(Kind::Sjf);
    let long = ctx.add("long", 7, 0);
    let short = ctx.add("short", 3, 0);
    ctx.tick_n(1);

    assert_eq!(ctx.current_name().as_deref(), Some("short"));
    ctx.run();
    assert_eq!(short.borrow().finish_time, Some(3));
    assert_eq!(long.borrow().start_time, Some(3));
}

#[test]
fn sjf_tie_goes_to_first_queued() {
    let mut slot = ExecutionSlot::new();
    let mut sjf = Sjf::new();
    sjf.add_to_queue(unit("X", 2));
    sjf.add_to_queue(unit("Y", 2));
    sjf.add_to_queue(unit("Z", 5));
    sjf.tick(&mut slot).unwrap();

    assert_eq!(slot.current().unwrap().borrow().name(), "X");
    assert_eq!(names(sjf.queue()), vec!["Y", "Z"]);
    assert!(sjf.is_busy());
}

// ══════════════════════════════════════════════════════════
// 4. Policy contract
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Kind::RoundRobin)]
#[case(Kind::Fcfs)]
#[case(Kind::Fcls)]
#[case(Kind::Sjf)]
fn empty_queue_is_a_no_op(#[case] policy: Kind) {
    let mut slot = ExecutionSlot::new();
    let mut sched = SchedulerDispatch::from_config(&SchedulerConfig {
        policy,
        quantum: 1,
    });
    sched.tick(&mut slot).unwrap();
    sched.tick(&mut slot).unwrap();
    assert!(!slot.is_occupied());
    assert!(sched.queue().is_empty());
}

#[test]
fn busy_policy_does_not_dispatch() {
    let mut slot = ExecutionSlot::new();
    let mut fcfs = Fcfs::new();
    fcfs.add_to_queue(unit("A", 1));
    fcfs.add_to_queue(unit("B", 1));
    fcfs.tick(&mut slot).unwrap();
    fcfs.tick(&mut slot).unwrap();
    assert_eq!(slot.dispatches(), 1);
    assert_eq!(names(fcfs.queue()), vec!["B"]);
}

#[test]
fn stop_requeues_and_frees_policy() {
    let mut slot = ExecutionSlot::new();
    let mut fcls = Fcls::new();
    fcls.add_to_queue(unit("A", 3));
    fcls.add_to_queue(unit("B", 3));
    fcls.tick(&mut slot).unwrap();

    let running = slot.stop_process().unwrap();
    fcls.stop_process(running);
    assert!(!fcls.is_busy());
    assert_eq!(names(fcls.queue()), vec!["A", "B"]);

    fcls.tick(&mut slot).unwrap();
    assert_eq!(slot.current().unwrap().borrow().name(), "B");
}

#[test]
fn drop_frees_policy() {
    let mut slot = ExecutionSlot::new();
    let mut rr = RoundRobin::new(4);
    rr.add_to_queue(unit("A", 1));
    rr.add_to_queue(unit("B", 1));
    rr.tick(&mut slot).unwrap();

    let done = slot.release().unwrap();
    rr.drop_process(&done);
    rr.tick(&mut slot).unwrap();
    assert_eq!(slot.current().unwrap().borrow().name(), "B");
    assert_eq!(rr.quantum(), 4);
}
