// src/assign/reference.rs

use rand::RngCore;
use tracing::warn;

use super::AssignmentPolicy;
use crate::dag::TaskGraph;
use crate::fleet::Vm;
use crate::types::{Algorithm, TaskId};

/// Published placements of the reference workflow, per VM slot.
const DSAWS_LAYOUT: &[&[u32]] = &[&[2, 5, 8], &[1, 4, 7], &[3, 6, 9]];
const CGA_LAYOUT: &[&[u32]] = &[&[1, 5, 8], &[2, 4, 7], &[3, 6, 9]];
const DYNA_LAYOUT: &[&[u32]] = &[&[1, 3, 6, 9], &[2, 4, 5, 7, 8]];

/// Literal placement for the reference workflow. Start and end times from
/// the reference graph are kept.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceAssignment {
    algorithm: Algorithm,
}

impl ReferenceAssignment {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    fn layout(&self) -> &'static [&'static [u32]] {
        match self.algorithm {
            Algorithm::Dsaws => DSAWS_LAYOUT,
            Algorithm::Cga => CGA_LAYOUT,
            Algorithm::Dyna => DYNA_LAYOUT,
        }
    }
}

impl AssignmentPolicy for ReferenceAssignment {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn assign(&self, graph: &mut TaskGraph, vms: &mut [Vm], _rng: &mut dyn RngCore) {
        for (slot, task_ids) in self.layout().iter().enumerate() {
            let vm_id = self.algorithm.vm_id(slot + 1);
            let Some(vm) = vms.iter_mut().find(|vm| vm.id == vm_id) else {
                warn!(algorithm = %self.algorithm, vm = %vm_id, "reference VM missing from fleet");
                continue;
            };

            for &n in task_ids.iter() {
                let id = TaskId(n);
                match graph.get_mut(id) {
                    Some(task) => {
                        task.assigned_vm = Some(vm.id.clone());
                        vm.task_ids.push(id);
                    }
                    None => warn!(task = %id, "reference task missing from graph"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::catalog::workflow::reference;
    use crate::dag::reference_graph;
    use crate::fleet::provision;

    #[test]
    fn dyna_reference_layout_keeps_published_times() {
        let mut rng = Pcg64::seed_from_u64(0);
        let mut graph = reference_graph();
        let mut vms = provision(reference(), 9, Algorithm::Dyna, &mut rng);

        ReferenceAssignment::new(Algorithm::Dyna).assign(&mut graph, &mut vms, &mut rng);

        assert_eq!(vms[0].task_ids, vec![TaskId(1), TaskId(3), TaskId(6), TaskId(9)]);
        assert_eq!(vms[1].task_ids.len(), 5);

        let t9 = graph.get(TaskId(9)).unwrap();
        assert_eq!(t9.assigned_vm.as_deref(), Some("dyna-1"));
        assert_eq!((t9.start_time, t9.end_time), (13.0, 27.0));
    }
}
