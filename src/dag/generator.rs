// src/dag/generator.rs

//! Task graph generation.
//!
//! The reference workflow yields the fixed published graph; every other
//! workflow is generated level by level from its profile.

use rand::Rng;
use tracing::debug;

use crate::catalog::WorkflowProfile;
use crate::dag::graph::TaskGraph;
use crate::dag::reference::reference_graph;
use crate::dag::task::Task;
use crate::types::{Algorithm, TaskId};

/// Maximum number of dependency candidates drawn per task.
const MAX_FAN_IN: usize = 3;

/// Largest task graph the generator builds; larger requests are clamped.
pub const MAX_TASKS: usize = 100_000;

/// Share of the critical-path rank assigned to a task.
const RANK_SCALE: f64 = 0.8;

/// Generate the task graph one algorithm will schedule.
///
/// `requested` is clamped to `1..=MAX_TASKS` and is ignored for the
/// reference workflow.
pub fn generate<R: Rng + ?Sized>(
    profile: &WorkflowProfile,
    requested: usize,
    algorithm: Algorithm,
    rng: &mut R,
) -> TaskGraph {
    if profile.is_reference() {
        return reference_graph();
    }

    let total = requested.clamp(1, MAX_TASKS);
    let level_count = profile.generated_level_count(total);
    let per_level = total.div_ceil(level_count);

    let mut tasks: Vec<Task> = Vec::with_capacity(total);
    let mut previous_level: Vec<TaskId> = Vec::new();
    let mut next_id: u32 = 1;

    for level in 1..=level_count {
        let remaining = total - tasks.len();
        if remaining == 0 {
            break;
        }

        let mut current_level = Vec::with_capacity(per_level.min(remaining));
        for _ in 0..per_level.min(remaining) {
            let id = TaskId(next_id);
            next_id += 1;

            let dependencies = draw_dependencies(&previous_level, rng);
            let runtime = task_runtime(profile, level, level_count, algorithm, rng);
            let rank = task_rank(profile, level, level_count, runtime);

            tasks.push(Task::new(id, level as u32, runtime, rank, dependencies));
            current_level.push(id);
        }

        previous_level = current_level;
    }

    debug!(
        workflow = profile.key,
        %algorithm,
        tasks = tasks.len(),
        levels = level_count,
        per_level,
        "generated procedural task graph"
    );

    TaskGraph::from_tasks(tasks)
}

/// Draw up to [`MAX_FAN_IN`] distinct dependencies from the prior level.
///
/// Every candidate comes from the immediately preceding level, so it always
/// precedes the current task; at least one is kept whenever that level is
/// non-empty.
fn draw_dependencies<R: Rng + ?Sized>(previous_level: &[TaskId], rng: &mut R) -> Vec<TaskId> {
    if previous_level.is_empty() {
        return Vec::new();
    }

    let draws = MAX_FAN_IN.min(previous_level.len());
    let mut deps: Vec<TaskId> = (0..draws)
        .map(|_| previous_level[rng.gen_range(0..previous_level.len())])
        .collect();
    deps.sort();
    deps.dedup();
    deps
}

/// `mean × level multiplier × variation × algorithm efficiency`.
fn task_runtime<R: Rng + ?Sized>(
    profile: &WorkflowProfile,
    level: usize,
    level_count: usize,
    algorithm: Algorithm,
    rng: &mut R,
) -> f64 {
    let (lo, hi) = profile.variation_band;
    let variation = if hi > lo { rng.gen_range(lo..=hi) } else { lo };

    profile.mean_runtime_secs
        * profile.level_multiplier(level, level_count)
        * variation
        * algorithm.efficiency_factor()
}

/// Rank from normalised level depth and runtime ratio, floored to 1.
fn task_rank(profile: &WorkflowProfile, level: usize, level_count: usize, runtime: f64) -> u64 {
    let levels_remaining = (level_count + 1 - level) as f64;
    let depth = levels_remaining / level_count as f64;
    let ratio = if profile.mean_runtime_secs > 0.0 {
        runtime / profile.mean_runtime_secs
    } else {
        1.0
    };

    let rank = (profile.max_rank as f64 * depth * ratio * RANK_SCALE).round();
    if rank.is_finite() && rank >= 1.0 {
        rank as u64
    } else {
        1
    }
}
