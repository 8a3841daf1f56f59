// tests/cost_and_progress.rs

mod common;

use common::{costs_of, init_tracing, run_to_completion, SimConfigBuilder};
use wfsim::engine::cost::{billed_minutes, fleet_cost};
use wfsim::types::Algorithm;

#[test]
fn cost_never_decreases_over_a_run() {
    init_tracing();

    let mut sim = SimConfigBuilder::new()
        .workflow("montage")
        .task_count(400)
        .seed(17)
        .build_simulation();
    let reports = run_to_completion(&mut sim, 5.0, 10_000);

    for algorithm in Algorithm::ALL {
        let costs = costs_of(&reports, algorithm);
        assert!(!costs.is_empty());
        for pair in costs.windows(2) {
            assert!(pair[1] >= pair[0], "{algorithm} cost went down: {pair:?}");
        }
    }
}

#[test]
fn cost_is_at_least_one_minute_per_vm() {
    let sim = SimConfigBuilder::new()
        .workflow("ligo")
        .task_count(250)
        .build_simulation();

    for run in sim.runs() {
        let floor: f64 = run.vms.iter().map(|vm| vm.cost_per_minute).sum();
        assert!(fleet_cost(&run.vms, 0.0) >= floor - 1e-12);
        assert!(run.vms.iter().all(|vm| billed_minutes(vm, 0.0) == 1));
    }
}

#[test]
fn progress_is_bounded_and_monotonic() {
    let mut sim = SimConfigBuilder::new()
        .workflow("cybershake")
        .task_count(150)
        .seed(3)
        .build_simulation();
    let reports = run_to_completion(&mut sim, 10.0, 10_000);

    let mut previous = vec![0.0; 3];
    for report in &reports {
        for (i, frame) in report.algorithms.iter().enumerate() {
            assert!((0.0..=100.0).contains(&frame.progress));
            assert!(frame.progress >= previous[i]);
            previous[i] = frame.progress;
        }
        let avg = report.average_progress();
        assert!((0.0..=100.0).contains(&avg));
    }
    assert_eq!(reports.last().unwrap().average_progress(), 100.0);
}

#[test]
fn deadline_status_never_changes_once_settled() {
    let mut sim = SimConfigBuilder::new()
        .workflow("montage")
        .task_count(120)
        .build_simulation();
    let reports = run_to_completion(&mut sim, 2.0, 10_000);

    for algorithm in Algorithm::ALL {
        let statuses: Vec<_> = reports
            .iter()
            .filter_map(|r| r.algorithms.iter().find(|a| a.algorithm == algorithm))
            .map(|a| a.deadline_status)
            .collect();
        if let Some(first_settled) = statuses.iter().position(|s| s.is_settled()) {
            assert!(statuses[first_settled..].iter().all(|s| *s == statuses[first_settled]));
        }
    }
}
