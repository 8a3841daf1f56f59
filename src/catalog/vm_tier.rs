// src/catalog/vm_tier.rs

/// A VM tier as offered by the (simulated) cloud provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VmTier {
    pub name: &'static str,
    /// Relative speed in GCEU.
    pub relative_speed: f64,
    /// Price per started minute.
    pub cost_per_minute: f64,
}

/// Google Compute Engine n1-standard tiers, ordered by increasing speed.
pub const VM_TIERS: [VmTier; 7] = [
    VmTier { name: "n1-standard-1", relative_speed: 1.0, cost_per_minute: 0.00105 },
    VmTier { name: "n1-standard-2", relative_speed: 2.0, cost_per_minute: 0.0021 },
    VmTier { name: "n1-standard-4", relative_speed: 4.0, cost_per_minute: 0.0042 },
    VmTier { name: "n1-standard-8", relative_speed: 8.0, cost_per_minute: 0.0084 },
    VmTier { name: "n1-standard-16", relative_speed: 16.0, cost_per_minute: 0.0168 },
    VmTier { name: "n1-standard-32", relative_speed: 32.0, cost_per_minute: 0.0336 },
    VmTier { name: "n1-standard-64", relative_speed: 64.0, cost_per_minute: 0.0672 },
];

/// Tier used for every VM of the reference workflow.
pub const REFERENCE_TIER: usize = 1;

/// Highest tier index unlocked for a workflow of `task_count` tasks.
///
/// `min(len - 1, max(1, floor(log2(task_count / 10))))`; small workflows
/// (where the logarithm is below one or undefined) get index 1.
pub fn max_tier_index(task_count: usize) -> usize {
    let raw = (task_count as f64 / 10.0).log2().floor();
    let unlocked = if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    };
    unlocked.min(VM_TIERS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered_by_speed() {
        for pair in VM_TIERS.windows(2) {
            assert!(pair[0].relative_speed < pair[1].relative_speed);
            assert!(pair[0].cost_per_minute < pair[1].cost_per_minute);
        }
    }

    #[test]
    fn larger_workflows_unlock_higher_tiers() {
        assert_eq!(max_tier_index(0), 1);
        assert_eq!(max_tier_index(9), 1);
        assert_eq!(max_tier_index(40), 2);
        assert_eq!(max_tier_index(100), 3);
        assert_eq!(max_tier_index(1000), 6);
        assert_eq!(max_tier_index(1_000_000), 6);
    }
}
