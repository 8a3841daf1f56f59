// src/dag/graph.rs

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::dag::task::{PhaseCounts, Task};
use crate::errors::{Result, SimError};
use crate::types::TaskId;

/// Arena of tasks owned by one algorithm's run.
///
/// Tasks are stored in id order and addressed by [`TaskId`]; the graph also
/// keeps the reverse edges (dependents) and the task ids of each level.
/// Acyclicity holds by construction (dependencies always point to a lower
/// level); [`TaskGraph::verify`] exists for diagnostics and tests.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
    levels: BTreeMap<u32, Vec<TaskId>>,
    dependents: HashMap<TaskId, Vec<TaskId>>,
}

impl TaskGraph {
    /// Build a graph from generated tasks.
    ///
    /// Assumes ids are unique; a duplicate id shadows the earlier task in
    /// lookups and is reported.
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|t| t.id);

        let mut index = HashMap::with_capacity(tasks.len());
        let mut levels: BTreeMap<u32, Vec<TaskId>> = BTreeMap::new();
        let mut dependents: HashMap<TaskId, Vec<TaskId>> = HashMap::new();

        for (pos, task) in tasks.iter().enumerate() {
            if index.insert(task.id, pos).is_some() {
                warn!(task = %task.id, "duplicate task id in graph");
            }
            levels.entry(task.level).or_default().push(task.id);
            for dep in &task.dependencies {
                dependents.entry(*dep).or_default().push(task.id);
            }
        }

        Self {
            tasks,
            index,
            levels,
            dependents,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks, in id order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable access to task records; the set and order of tasks is fixed.
    pub fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&pos| &self.tasks[pos])
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        let pos = *self.index.get(&id)?;
        Some(&mut self.tasks[pos])
    }

    /// Position of `id` in [`TaskGraph::tasks`].
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Immediate dependencies of a task.
    pub fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        self.get(id)
            .map(|t| t.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list it as a dependency).
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.dependents
            .get(&id)
            .map(|d| d.as_slice())
            .unwrap_or(&[])
    }

    /// Levels in ascending order with the ids they contain.
    pub fn levels(&self) -> impl Iterator<Item = (u32, &[TaskId])> {
        self.levels.iter().map(|(l, ids)| (*l, ids.as_slice()))
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.tasks.iter().map(|t| t.dependencies.len()).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.completed)
    }

    /// Completion flags indexed like [`TaskGraph::tasks`].
    pub fn completion_snapshot(&self) -> Vec<bool> {
        self.tasks.iter().map(|t| t.completed).collect()
    }

    /// Tasks above level 1 without any dependency.
    pub fn isolated_tasks(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.level > 1 && t.dependencies.is_empty())
            .map(|t| t.id)
            .collect()
    }

    /// Latest end time of any task (0 for an empty graph).
    pub fn makespan(&self) -> f64 {
        self.tasks.iter().map(|t| t.end_time).fold(0.0, f64::max)
    }

    /// Count tasks per phase at time `now`.
    pub fn phase_counts(&self, now: f64) -> PhaseCounts {
        let mut counts = PhaseCounts::default();
        for task in &self.tasks {
            counts.add(task.phase_at(now));
        }
        counts
    }

    /// Structural check: every dependency exists, sits on a strictly lower
    /// level, and the dependency relation is acyclic.
    pub fn verify(&self) -> Result<()> {
        for task in &self.tasks {
            for dep in &task.dependencies {
                if self.get(*dep).is_none() {
                    return Err(SimError::ConfigError(format!(
                        "task '{}' depends on unknown task '{}'",
                        task.id, dep
                    )));
                }
            }
        }

        // Edge direction: dep -> task.
        let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();
        for task in &self.tasks {
            graph.add_node(task.id);
        }
        for task in &self.tasks {
            for dep in &task.dependencies {
                graph.add_edge(*dep, task.id, ());
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            return Err(SimError::DagCycle(format!(
                "cycle detected in task graph involving task '{}'",
                cycle.node_id()
            )));
        }

        for task in &self.tasks {
            for dep in &task.dependencies {
                let dep_level = self.get(*dep).map(|d| d.level).unwrap_or(0);
                if dep_level >= task.level {
                    return Err(SimError::ConfigError(format!(
                        "task '{}' (level {}) depends on '{}' at level {}",
                        task.id, task.level, dep, dep_level
                    )));
                }
            }
        }

        Ok(())
    }
}
