// src/fleet/provisioner.rs

//! Fleet sizing and tier selection.
//!
//! Each algorithm sizes its fleet from the task count and picks a tier per
//! slot; the reference workflow uses a fixed fleet on a single tier.

use rand::Rng;
use tracing::debug;

use crate::catalog::vm_tier::{max_tier_index, REFERENCE_TIER};
use crate::catalog::{WorkflowProfile, VM_TIERS};
use crate::fleet::vm::Vm;
use crate::types::Algorithm;

/// Number of VMs `algorithm` provisions for `task_count` tasks.
pub fn fleet_size(profile: &WorkflowProfile, task_count: usize, algorithm: Algorithm) -> usize {
    if profile.is_reference() {
        return match algorithm {
            Algorithm::Dsaws | Algorithm::Cga => 3,
            Algorithm::Dyna => 2,
        };
    }

    let (floor, per_vm) = match algorithm {
        Algorithm::Dsaws => (3, 100),
        Algorithm::Cga => (3, 80),
        Algorithm::Dyna => (2, 120),
    };
    task_count.div_ceil(per_vm).max(floor)
}

/// Provision the fleet for one algorithm.
pub fn provision<R: Rng + ?Sized>(
    profile: &WorkflowProfile,
    task_count: usize,
    algorithm: Algorithm,
    rng: &mut R,
) -> Vec<Vm> {
    let size = fleet_size(profile, task_count, algorithm);

    if profile.is_reference() {
        let tier = &VM_TIERS[REFERENCE_TIER];
        return (1..=size).map(|slot| Vm::new(algorithm, slot, tier)).collect();
    }

    let cap = max_tier_index(task_count);
    let fleet: Vec<Vm> = (1..=size)
        .map(|slot| {
            let tier = select_tier(algorithm, slot, size, cap, rng);
            Vm::new(algorithm, slot, &VM_TIERS[tier])
        })
        .collect();

    debug!(
        %algorithm,
        vms = fleet.len(),
        max_tier = VM_TIERS[cap].name,
        "provisioned fleet"
    );

    fleet
}

/// Tier index for the 1-based `slot` of a fleet of `size` VMs.
fn select_tier<R: Rng + ?Sized>(
    algorithm: Algorithm,
    slot: usize,
    size: usize,
    cap: usize,
    rng: &mut R,
) -> usize {
    let bump = rng.gen_range(0..=1);
    match algorithm {
        Algorithm::Dsaws => {
            let percentile = slot as f64 / size as f64;
            let base = if percentile < 0.2 {
                3
            } else if percentile < 0.5 {
                2
            } else {
                1
            };
            (base + bump).min(cap)
        }
        Algorithm::Cga => (1 + rng.gen_range(0..cap.max(1))).min(cap),
        Algorithm::Dyna => {
            let base = if rng.gen_bool(0.2) { 2 } else { 1 };
            (base + bump).min(cap)
        }
    }
}
