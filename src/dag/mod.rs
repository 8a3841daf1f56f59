// src/dag/mod.rs

//! Workflow DAG representation and generation.
//!
//! - [`task`] holds the task record and its time-derived phases.
//! - [`graph`] is the per-algorithm task arena with adjacency lookups.
//! - [`generator`] builds graphs procedurally from a workflow profile.
//! - [`reference`] provides the fixed published example graph.

pub mod generator;
pub mod graph;
pub mod reference;
pub mod task;

pub use generator::{generate, MAX_TASKS};
pub use graph::TaskGraph;
pub use reference::reference_graph;
pub use task::{PhaseCounts, Task, TaskPhase};
