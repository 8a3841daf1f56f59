// src/fleet/vm.rs

use serde::Serialize;

use crate::catalog::VmTier;
use crate::types::{Algorithm, TaskId, VmId};

/// A provisioned virtual machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vm {
    pub id: VmId,
    pub tier_name: &'static str,
    pub cost_per_minute: f64,
    pub relative_speed: f64,
    /// Tasks placed on this VM, in assignment order.
    pub task_ids: Vec<TaskId>,
    pub provision_start: f64,
    /// Simulation time up to which this VM has caught up. Never decreases and
    /// never runs ahead of the clock.
    pub current_time: f64,
    pub algorithm: Algorithm,
}

impl Vm {
    /// VM for the 1-based fleet `slot` of `algorithm`, on `tier`.
    pub fn new(algorithm: Algorithm, slot: usize, tier: &VmTier) -> Self {
        Self {
            id: algorithm.vm_id(slot),
            tier_name: tier.name,
            cost_per_minute: tier.cost_per_minute,
            relative_speed: tier.relative_speed,
            task_ids: Vec::new(),
            provision_start: 0.0,
            current_time: 0.0,
            algorithm,
        }
    }

    /// Move the VM clock towards `target`, bounded by `now`.
    ///
    /// The clock never moves backwards.
    pub fn catch_up(&mut self, target: f64, now: f64) {
        let next = self.current_time.max(target).min(now);
        if next > self.current_time {
            self.current_time = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VM_TIERS;

    #[test]
    fn catch_up_is_monotonic_and_bounded() {
        let mut vm = Vm::new(Algorithm::Dsaws, 1, &VM_TIERS[1]);
        assert_eq!(vm.id, "vm1");

        vm.catch_up(7.0, 5.0);
        assert_eq!(vm.current_time, 5.0);

        vm.catch_up(3.0, 10.0);
        assert_eq!(vm.current_time, 5.0);

        vm.catch_up(8.0, 10.0);
        assert_eq!(vm.current_time, 8.0);
    }
}
