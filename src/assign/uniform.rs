// src/assign/uniform.rs

use rand::RngCore;

use super::{place, AssignmentPolicy};
use crate::dag::TaskGraph;
use crate::fleet::Vm;
use crate::types::{Algorithm, TaskId};

/// CGA placement: task `i` (in id order) goes to VM `i mod k`, ignoring
/// structure and locality.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformAssignment;

impl AssignmentPolicy for UniformAssignment {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Cga
    }

    fn assign(&self, graph: &mut TaskGraph, vms: &mut [Vm], _rng: &mut dyn RngCore) {
        if vms.is_empty() {
            return;
        }

        let ids: Vec<TaskId> = graph.tasks().iter().map(|t| t.id).collect();
        for (i, id) in ids.into_iter().enumerate() {
            place(graph, vms, i % vms.len(), id, Algorithm::Cga);
        }
    }
}
