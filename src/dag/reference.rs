// src/dag/reference.rs

//! The nine-task worked example from the structure-aware scheduling paper.
//!
//! Runtimes, ranks, dependencies and start times are literal values from the
//! publication; they double as a golden fixture for the engine.

use crate::dag::graph::TaskGraph;
use crate::dag::task::Task;
use crate::types::TaskId;

/// (id, runtime, rank, level, dependency, start time)
const REFERENCE_TASKS: [(u32, f64, u64, u32, Option<u32>, f64); 9] = [
    (1, 5.0, 31, 1, None, 2.0),
    (2, 4.0, 32, 1, None, 2.0),
    (3, 6.0, 30, 1, None, 2.0),
    (4, 8.0, 25, 2, Some(1), 7.0),
    (5, 9.0, 25, 2, Some(2), 6.0),
    (6, 5.0, 20, 2, Some(3), 8.0),
    (7, 10.0, 10, 3, Some(4), 15.0),
    (8, 14.0, 12, 3, Some(5), 15.0),
    (9, 14.0, 14, 3, Some(6), 13.0),
];

/// Build the reference graph with its published start and end times.
pub fn reference_graph() -> TaskGraph {
    let tasks = REFERENCE_TASKS
        .iter()
        .map(|&(id, runtime, rank, level, dep, start)| {
            let deps = dep.map(|d| vec![TaskId(d)]).unwrap_or_default();
            let mut task = Task::new(TaskId(id), level, runtime, rank, deps);
            task.start_time = start;
            task.end_time = start + runtime;
            task
        })
        .collect();

    TaskGraph::from_tasks(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_graph_matches_publication() {
        let graph = reference_graph();
        assert_eq!(graph.len(), 9);
        assert_eq!(graph.dependency_count(), 6);
        assert!(graph.verify().is_ok());

        let ends: Vec<f64> = graph.tasks().iter().map(|t| t.end_time).collect();
        assert_eq!(ends, vec![7.0, 6.0, 8.0, 15.0, 15.0, 13.0, 25.0, 29.0, 27.0]);
        assert_eq!(graph.makespan(), 29.0);
    }
}
