// src/assign/probabilistic.rs

use rand::{Rng, RngCore};

use super::{place, AssignmentPolicy};
use crate::dag::TaskGraph;
use crate::fleet::Vm;
use crate::types::{Algorithm, TaskId};

/// Dyna placement: VM index `floor(u^2 * k)` for uniform `u`, which skews
/// the load towards the first few VMs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilisticAssignment;

impl AssignmentPolicy for ProbabilisticAssignment {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dyna
    }

    fn assign(&self, graph: &mut TaskGraph, vms: &mut [Vm], rng: &mut dyn RngCore) {
        if vms.is_empty() {
            return;
        }

        let k = vms.len();
        let ids: Vec<TaskId> = graph.tasks().iter().map(|t| t.id).collect();
        for id in ids {
            let u: f64 = rng.r#gen();
            let idx = ((u * u * k as f64).floor() as usize).min(k - 1);
            place(graph, vms, idx, id, Algorithm::Dyna);
        }
    }
}
