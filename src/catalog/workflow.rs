// src/catalog/workflow.rs

//! Named workflow profiles.
//!
//! Each profile carries the published statistics of a scientific workflow
//! plus two knobs used by the procedural generator:
//! - a per-level runtime curve (seconds spent in each level), normalised into
//!   a level multiplier;
//! - a `[min, max]` band for the uniform per-task runtime variation.

use tracing::warn;

/// Key of the fixed nine-task reference workflow.
pub const REFERENCE_WORKFLOW: &str = "sample";

/// Smallest multiplier a level may contribute, so that empty levels in the
/// measured curve still produce non-zero runtimes.
const MIN_LEVEL_MULTIPLIER: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkflowProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub task_count: usize,
    pub level_count: usize,
    pub dependency_count: usize,
    pub mean_runtime_secs: f64,
    pub mean_data_size_mb: f64,
    pub max_rank: u64,
    /// Measured runtime per level, in seconds.
    pub level_runtime_curve: &'static [f64],
    /// Inclusive bounds of the uniform runtime variation factor.
    pub variation_band: (f64, f64),
}

pub const WORKFLOWS: [WorkflowProfile; 5] = [
    WorkflowProfile {
        key: REFERENCE_WORKFLOW,
        name: "Sample Workflow",
        task_count: 9,
        level_count: 3,
        dependency_count: 6,
        mean_runtime_secs: 8.33,
        mean_data_size_mb: 2.5,
        max_rank: 32,
        level_runtime_curve: &[15.0, 22.0, 38.0],
        variation_band: (0.8, 1.2),
    },
    WorkflowProfile {
        key: "montage",
        name: "Montage",
        task_count: 1000,
        level_count: 9,
        dependency_count: 4485,
        mean_runtime_secs: 11.37,
        mean_data_size_mb: 3.21,
        max_rank: 369,
        level_runtime_curve: &[42.0, 38.0, 75.0, 67.0, 15.0, 25.0, 30.0, 65.0, 12.0],
        variation_band: (0.5, 1.5),
    },
    WorkflowProfile {
        key: "cybershake",
        name: "CyberShake",
        task_count: 1000,
        level_count: 5,
        dependency_count: 3988,
        mean_runtime_secs: 22.75,
        mean_data_size_mb: 102.29,
        max_rank: 736,
        level_runtime_curve: &[25.0, 702.0, 650.0, 0.0, 10.0],
        variation_band: (0.5, 2.0),
    },
    WorkflowProfile {
        key: "ligo",
        name: "LIGO (Inspiral)",
        task_count: 1000,
        level_count: 6,
        dependency_count: 3246,
        mean_runtime_secs: 227.78,
        mean_data_size_mb: 8.9,
        max_rank: 625,
        level_runtime_curve: &[150.0, 180.0, 220.0, 250.0, 300.0, 15.0],
        variation_band: (0.33, 3.0),
    },
    WorkflowProfile {
        key: "epigenomics",
        name: "Epigenomics",
        task_count: 997,
        level_count: 8,
        dependency_count: 3228,
        mean_runtime_secs: 3866.4,
        mean_data_size_mb: 388.59,
        max_rank: 27232,
        // Level 5 holds almost all of the execution time.
        level_runtime_curve: &[2584.0, 3200.0, 3500.0, 3800.0, 27000.0, 4500.0, 5200.0, 120.0],
        variation_band: (0.01, 3.0),
    },
];

/// Look up a profile by key (case-insensitive).
pub fn lookup(key: &str) -> Option<&'static WorkflowProfile> {
    let key = key.trim();
    WORKFLOWS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

/// Look up a profile, falling back to the reference workflow for unknown keys.
pub fn resolve(key: &str) -> &'static WorkflowProfile {
    match lookup(key) {
        Some(profile) => profile,
        None => {
            warn!(
                workflow = %key,
                fallback = REFERENCE_WORKFLOW,
                "unknown workflow; using the reference workflow"
            );
            reference()
        }
    }
}

/// The reference workflow profile.
pub fn reference() -> &'static WorkflowProfile {
    &WORKFLOWS[0]
}

impl WorkflowProfile {
    pub fn is_reference(&self) -> bool {
        self.key == REFERENCE_WORKFLOW
    }

    /// Target completion time for a given deadline factor.
    pub fn deadline(&self, deadline_factor: f64) -> f64 {
        self.max_rank as f64 * deadline_factor
    }

    /// Number of levels generated for `requested` tasks.
    ///
    /// `max(1, min(level_count, ceil(sqrt(requested / 10))))`.
    pub fn generated_level_count(&self, requested: usize) -> usize {
        let estimate = (requested as f64 / 10.0).sqrt().ceil() as usize;
        estimate.min(self.level_count).max(1)
    }

    /// Runtime multiplier for `level` (1-based) of a graph with
    /// `level_count` levels.
    ///
    /// When fewer levels are generated than the profile has, levels are
    /// spread across the curve so that a dominant level is still sampled.
    pub fn level_multiplier(&self, level: usize, level_count: usize) -> f64 {
        let curve = self.level_runtime_curve;
        if curve.is_empty() || level == 0 || level_count == 0 {
            return 1.0;
        }

        let mean = curve.iter().sum::<f64>() / curve.len() as f64;
        if mean <= 0.0 {
            return 1.0;
        }

        let idx = ((level - 1) * curve.len() / level_count).min(curve.len() - 1);
        (curve[idx] / mean).max(MIN_LEVEL_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("Montage").map(|p| p.key), Some("montage"));
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn unknown_keys_resolve_to_reference() {
        assert!(resolve("does-not-exist").is_reference());
        assert_eq!(resolve("ligo").key, "ligo");
    }

    #[test]
    fn reference_deadline_matches_published_example() {
        assert_eq!(reference().deadline(1.5), 48.0);
    }

    #[test]
    fn level_count_is_capped_by_profile() {
        let montage = lookup("montage").unwrap();
        assert_eq!(montage.generated_level_count(1), 1);
        assert_eq!(montage.generated_level_count(100), 4);
        assert_eq!(montage.generated_level_count(1000), 9);
        let cybershake = lookup("cybershake").unwrap();
        assert_eq!(cybershake.generated_level_count(1000), 5);
    }

    #[test]
    fn dominant_level_is_sampled_when_levels_are_compressed() {
        let epi = lookup("epigenomics").unwrap();
        // Four generated levels map onto curve indices 0, 2, 4, 6.
        let multipliers: Vec<f64> = (1..=4).map(|l| epi.level_multiplier(l, 4)).collect();
        let max = multipliers.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(max, multipliers[2]);
        assert!(multipliers[2] > 4.0);
    }

    #[test]
    fn empty_levels_keep_a_floor_multiplier() {
        let cybershake = lookup("cybershake").unwrap();
        assert_eq!(cybershake.level_multiplier(4, 5), MIN_LEVEL_MULTIPLIER);
    }
}
