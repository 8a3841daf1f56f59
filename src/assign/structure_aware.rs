// src/assign/structure_aware.rs

use rand::RngCore;
use tracing::trace;

use super::{place, AssignmentPolicy};
use crate::dag::TaskGraph;
use crate::fleet::Vm;
use crate::types::{Algorithm, TaskId};

/// DSAWS placement.
///
/// Levels are handled in order. Inside a level the tasks are sorted by
/// descending rank (ties by id) and dealt round-robin; the VM counter runs
/// on across levels, so the whole workflow forms one continuous sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureAwareAssignment;

impl AssignmentPolicy for StructureAwareAssignment {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dsaws
    }

    fn assign(&self, graph: &mut TaskGraph, vms: &mut [Vm], _rng: &mut dyn RngCore) {
        if vms.is_empty() {
            return;
        }

        let levels: Vec<(u32, Vec<TaskId>)> = graph
            .levels()
            .map(|(level, ids)| (level, ids.to_vec()))
            .collect();

        let mut next_vm = 0usize;
        for (level, mut ids) in levels {
            ids.sort_by(|a, b| {
                let rank_a = graph.get(*a).map(|t| t.rank).unwrap_or(0);
                let rank_b = graph.get(*b).map(|t| t.rank).unwrap_or(0);
                rank_b.cmp(&rank_a).then(a.cmp(b))
            });

            trace!(level, tasks = ids.len(), "assigning level");
            for id in ids {
                place(graph, vms, next_vm % vms.len(), id, Algorithm::Dsaws);
                next_vm += 1;
            }
        }
    }
}
