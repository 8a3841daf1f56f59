// tests/resolver_gating.rs

mod common;

use std::collections::HashSet;

use common::GraphBuilder;
use wfsim::dag::TaskPhase;
use wfsim::engine::resolver::resolve;
use wfsim::types::{Algorithm, TaskId};

#[test]
fn dependents_wait_for_the_next_frame() {
    // t1 -> t2, both already elapsed at t=10.
    let (mut graph, mut vms) = GraphBuilder::new()
        .task(1, 1, 0.0, 2.0, &[])
        .task(2, 2, 0.0, 1.0, &[1])
        .build_with_vm(Algorithm::Dsaws);

    let first = resolve(&mut graph, &mut vms, 10.0);
    assert_eq!(first, vec![TaskId(1)]);
    assert_eq!(
        graph.get(TaskId(2)).unwrap().phase_at(10.0),
        TaskPhase::AwaitingDependencies
    );

    let second = resolve(&mut graph, &mut vms, 10.0);
    assert_eq!(second, vec![TaskId(2)]);
}

#[test]
fn tasks_never_complete_before_their_dependencies() {
    // Diamond: t1 -> {t2, t3} -> t4.
    let (mut graph, mut vms) = GraphBuilder::new()
        .task(1, 1, 0.0, 3.0, &[])
        .task(2, 2, 3.0, 2.0, &[1])
        .task(3, 2, 3.0, 6.0, &[1])
        .task(4, 3, 9.0, 1.0, &[2, 3])
        .build_with_vm(Algorithm::Cga);

    let mut completed_before: HashSet<TaskId> = HashSet::new();
    let mut now = 0.0;
    while !graph.all_completed() {
        now += 0.5;
        assert!(now < 100.0, "diamond never completed");

        for id in resolve(&mut graph, &mut vms, now) {
            let task = graph.get(id).unwrap();
            assert!(now >= task.end_time);
            for dep in &task.dependencies {
                assert!(
                    completed_before.contains(dep),
                    "{id} completed in the same frame as its dependency {dep}"
                );
            }
        }
        completed_before = graph
            .tasks()
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
    }
}

#[test]
fn vm_clock_is_monotonic_and_bounded_by_now() {
    let (mut graph, mut vms) = GraphBuilder::new()
        .task(1, 1, 0.0, 4.0, &[])
        .task(2, 2, 4.0, 4.0, &[1])
        .task(3, 3, 8.0, 4.0, &[2])
        .build_with_vm(Algorithm::Dyna);

    let mut previous = 0.0;
    for step in 1..=30 {
        let now = step as f64 * 0.7;
        resolve(&mut graph, &mut vms, now);
        let current = vms[0].current_time;
        assert!(current >= previous);
        assert!(current <= now);
        previous = current;
    }
    assert_eq!(previous, 12.0);
}
