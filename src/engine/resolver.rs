// src/engine/resolver.rs

//! Dependency-gated task completion.

use tracing::trace;

use crate::dag::TaskGraph;
use crate::fleet::Vm;
use crate::types::TaskId;

/// Complete every task whose end time has elapsed and whose dependencies
/// were all completed before this frame began, then catch the VMs up.
///
/// Returns the ids completed in this frame. A chain therefore advances by
/// at most one link per frame.
pub fn resolve(graph: &mut TaskGraph, vms: &mut [Vm], now: f64) -> Vec<TaskId> {
    let snapshot = graph.completion_snapshot();

    let ready: Vec<TaskId> = graph
        .tasks()
        .iter()
        .filter(|task| !task.completed && now >= task.end_time)
        .filter(|task| {
            task.dependencies.iter().all(|dep| {
                graph
                    .position(*dep)
                    .map(|pos| snapshot[pos])
                    .unwrap_or(false)
            })
        })
        .map(|task| task.id)
        .collect();

    for id in &ready {
        if let Some(task) = graph.get_mut(*id) {
            task.completed = true;
            trace!(task = %id, vm = ?task.assigned_vm, at = now, "task completed");
        }
    }

    catch_up_vms(graph, vms, now);
    ready
}

/// Mark every remaining task completed. Returns how many were forced.
pub fn force_complete(graph: &mut TaskGraph, vms: &mut [Vm], now: f64) -> usize {
    let mut forced = 0;
    for task in graph.tasks_mut().iter_mut().filter(|t| !t.completed) {
        task.completed = true;
        forced += 1;
    }

    catch_up_vms(graph, vms, now);
    forced
}

/// Move each VM clock to the latest end time among its completed or
/// elapsed tasks, bounded by `now`.
pub fn catch_up_vms(graph: &TaskGraph, vms: &mut [Vm], now: f64) {
    for vm in vms.iter_mut() {
        let target = vm
            .task_ids
            .iter()
            .filter_map(|id| graph.get(*id))
            .filter(|task| task.completed || task.end_time <= now)
            .map(|task| task.end_time)
            .fold(vm.current_time, f64::max);
        vm.catch_up(target, now);
    }
}
