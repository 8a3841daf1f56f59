// src/assign/mod.rs

//! Task-to-VM assignment.
//!
//! Every heuristic implements [`AssignmentPolicy`]: it fills each VM's task
//! list and each task's VM and start/end times. Runtimes and dependencies are
//! never touched.

use rand::RngCore;

use crate::catalog::WorkflowProfile;
use crate::dag::TaskGraph;
use crate::fleet::Vm;
use crate::types::{Algorithm, TaskId};

pub mod probabilistic;
pub mod reference;
pub mod structure_aware;
pub mod uniform;

pub use probabilistic::ProbabilisticAssignment;
pub use reference::ReferenceAssignment;
pub use structure_aware::StructureAwareAssignment;
pub use uniform::UniformAssignment;

/// A placement heuristic for one algorithm.
pub trait AssignmentPolicy {
    fn algorithm(&self) -> Algorithm;

    /// Place every task of `graph` on one of `vms`.
    fn assign(&self, graph: &mut TaskGraph, vms: &mut [Vm], rng: &mut dyn RngCore);
}

/// The policy `algorithm` uses for `profile`.
pub fn policy_for(profile: &WorkflowProfile, algorithm: Algorithm) -> Box<dyn AssignmentPolicy> {
    if profile.is_reference() {
        return Box::new(ReferenceAssignment::new(algorithm));
    }

    match algorithm {
        Algorithm::Dsaws => Box::new(StructureAwareAssignment),
        Algorithm::Cga => Box::new(UniformAssignment),
        Algorithm::Dyna => Box::new(ProbabilisticAssignment),
    }
}

/// Put `task` on `vms[vm_idx]` at the procedural start time of its level.
fn place(graph: &mut TaskGraph, vms: &mut [Vm], vm_idx: usize, task: TaskId, algorithm: Algorithm) {
    let Some(vm) = vms.get_mut(vm_idx) else {
        return;
    };
    let Some(task) = graph.get_mut(task) else {
        return;
    };

    let start = f64::from(task.level) * algorithm.base_offset();
    task.schedule(vm.id.clone(), start);
    vm.task_ids.push(task.id);
}
