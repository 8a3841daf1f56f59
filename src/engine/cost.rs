// src/engine/cost.rs

//! Per-minute billing.

use crate::fleet::Vm;

/// Started minutes billed for `vm` at time `now`; at least one.
pub fn billed_minutes(vm: &Vm, now: f64) -> u64 {
    let elapsed = (now - vm.provision_start).min(now);
    let minutes = (elapsed / 60.0).ceil();
    if minutes.is_finite() && minutes > 1.0 {
        minutes as u64
    } else {
        1
    }
}

pub fn vm_cost(vm: &Vm, now: f64) -> f64 {
    vm.cost_per_minute * billed_minutes(vm, now) as f64
}

/// Total cost of a fleet at `now` (zero for an empty fleet).
pub fn fleet_cost(vms: &[Vm], now: f64) -> f64 {
    vms.iter().map(|vm| vm_cost(vm, now)).sum()
}
