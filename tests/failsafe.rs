// tests/failsafe.rs

mod common;

use std::collections::BTreeMap;

use common::{init_tracing, run_to_completion, GraphBuilder, SimConfigBuilder};
use wfsim::catalog::workflow::reference;
use wfsim::engine::{DeadlineStatus, RunSetup, Simulation, SimulationClock};
use wfsim::types::Algorithm;

#[test]
fn tight_deadline_triggers_the_failsafe() {
    init_tracing();

    // Deadline 3.2s, ceiling 4.8s: nothing finishes before the ceiling.
    let mut sim = SimConfigBuilder::new().deadline_factor(0.1).build_simulation();
    let reports = run_to_completion(&mut sim, 1.0, 20);
    let last = reports.last().unwrap();

    assert!(last.failsafe_triggered);
    assert!(last.time > sim.failsafe_ceiling());
    assert!(last.time <= sim.failsafe_ceiling() + 1.0);

    for frame in &last.algorithms {
        assert_eq!(frame.deadline_status, DeadlineStatus::Missed);
        assert_eq!(frame.progress, 100.0);
    }
    assert!(sim.finalize().iter().all(|r| r.force_completed && !r.meets_deadline));
}

#[test]
fn deadlocked_graph_terminates() {
    init_tracing();

    // t1 and t2 wait on each other and can never resolve.
    let (graph, vms) = GraphBuilder::new()
        .task(1, 1, 0.0, 1.0, &[2])
        .task(2, 1, 0.0, 1.0, &[1])
        .build_with_vm(Algorithm::Dsaws);

    let setup = RunSetup {
        profile: reference(),
        deadline_factor: 1.5,
        deadline: 48.0,
        tasks_by_algorithm: BTreeMap::from([(Algorithm::Dsaws, graph)]),
        vms_by_algorithm: BTreeMap::from([(Algorithm::Dsaws, vms)]),
    };
    let mut sim = Simulation::new(setup, SimulationClock::new(1.0, false));

    let reports = run_to_completion(&mut sim, 5.0, 100);
    let last = reports.last().unwrap();

    assert!(last.failsafe_triggered);
    assert_eq!(last.time, 75.0);
    assert_eq!(last.algorithms[0].newly_completed, 2);
    assert_eq!(sim.finalize()[0].completion_time_secs, 75.0);
}
