// src/dag/task.rs

//! Task records and their time-derived phases.

use serde::Serialize;

use crate::types::{TaskId, VmId};

/// One node of the workflow DAG.
///
/// Runtime, dependencies and timing are fixed once assignment has run; only
/// `completed` changes while the simulation advances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub runtime_secs: f64,
    /// Tasks at a strictly lower level that must complete first.
    pub dependencies: Vec<TaskId>,
    /// Priority; higher means more critical.
    pub rank: u64,
    pub completed: bool,
    pub start_time: f64,
    /// Always `start_time + runtime_secs`.
    pub end_time: f64,
    pub assigned_vm: Option<VmId>,
    /// 1-based topological tier.
    pub level: u32,
}

impl Task {
    /// A fresh, unassigned task.
    pub fn new(id: TaskId, level: u32, runtime_secs: f64, rank: u64, dependencies: Vec<TaskId>) -> Self {
        Self {
            id,
            name: format!("Task {}", id.0),
            runtime_secs,
            dependencies,
            rank,
            completed: false,
            start_time: 0.0,
            end_time: runtime_secs,
            assigned_vm: None,
            level,
        }
    }

    /// Place the task on `vm`, starting at `start_time`.
    pub fn schedule(&mut self, vm: VmId, start_time: f64) {
        self.assigned_vm = Some(vm);
        self.start_time = start_time;
        self.end_time = start_time + self.runtime_secs;
    }

    /// Where the task stands at simulation time `now`.
    pub fn phase_at(&self, now: f64) -> TaskPhase {
        if self.completed {
            TaskPhase::Completed
        } else if now < self.start_time {
            TaskPhase::Waiting
        } else if now < self.end_time {
            TaskPhase::Running
        } else {
            TaskPhase::AwaitingDependencies
        }
    }
}

/// Observable state of a task at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaskPhase {
    /// Start time not reached yet.
    Waiting,
    /// Between start and end time.
    Running,
    /// End time elapsed but an upstream task has not completed.
    AwaitingDependencies,
    Completed,
}

/// Number of tasks in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub waiting: usize,
    pub running: usize,
    pub awaiting_dependencies: usize,
    pub completed: usize,
}

impl PhaseCounts {
    pub fn add(&mut self, phase: TaskPhase) {
        match phase {
            TaskPhase::Waiting => self.waiting += 1,
            TaskPhase::Running => self.running += 1,
            TaskPhase::AwaitingDependencies => self.awaiting_dependencies += 1,
            TaskPhase::Completed => self.completed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.waiting + self.running + self.awaiting_dependencies + self.completed
    }
}
