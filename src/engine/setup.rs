// src/engine/setup.rs

//! Building the per-algorithm task graphs and fleets for one run.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{info, warn};

use crate::assign::policy_for;
use crate::catalog::workflow::resolve;
use crate::catalog::WorkflowProfile;
use crate::dag::{generate, TaskGraph, MAX_TASKS};
use crate::fleet::{provision, Vm};
use crate::types::Algorithm;

/// Deadline factor used when the requested one is unusable.
pub const DEFAULT_DEADLINE_FACTOR: f64 = 1.5;

/// Odd constant used to spread per-algorithm seeds apart.
const STREAM_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// What to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub workflow: String,
    /// Requested task count; values below one are clamped to one.
    pub task_count: i64,
    pub deadline_factor: f64,
    pub seed: u64,
    pub algorithms: Vec<Algorithm>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            workflow: crate::catalog::REFERENCE_WORKFLOW.to_string(),
            task_count: 9,
            deadline_factor: DEFAULT_DEADLINE_FACTOR,
            seed: 0,
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

/// Freshly generated state for every enabled algorithm.
#[derive(Debug, Clone)]
pub struct RunSetup {
    pub profile: &'static WorkflowProfile,
    pub deadline_factor: f64,
    /// Target completion time in simulated seconds.
    pub deadline: f64,
    pub tasks_by_algorithm: BTreeMap<Algorithm, TaskGraph>,
    pub vms_by_algorithm: BTreeMap<Algorithm, Vec<Vm>>,
}

impl RunSetup {
    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.tasks_by_algorithm.keys().copied()
    }
}

/// Random stream for `algorithm` derived from the run seed.
pub fn algorithm_rng(seed: u64, algorithm: Algorithm) -> Pcg64 {
    let offset = (algorithm.index() as u64 + 1).wrapping_mul(STREAM_SPREAD);
    Pcg64::seed_from_u64(seed ^ offset)
}

/// Requested task count clamped to `1..=MAX_TASKS`.
fn clamp_task_count(requested: i64) -> usize {
    if requested < 1 {
        warn!(requested, "task count below one; using 1");
        return 1;
    }
    match usize::try_from(requested) {
        Ok(n) if n <= MAX_TASKS => n,
        _ => {
            warn!(requested, max = MAX_TASKS, "task count above the limit; clamping");
            MAX_TASKS
        }
    }
}

/// Generate graphs, provision fleets and assign tasks for every enabled
/// algorithm. Never fails: bad inputs fall back to defaults with a warning.
pub fn initialize_run(params: &RunParams) -> RunSetup {
    let profile = resolve(&params.workflow);

    let requested = clamp_task_count(params.task_count);

    let deadline_factor = if params.deadline_factor.is_finite() && params.deadline_factor > 0.0 {
        params.deadline_factor
    } else {
        warn!(
            requested = params.deadline_factor,
            fallback = DEFAULT_DEADLINE_FACTOR,
            "invalid deadline factor; using default"
        );
        DEFAULT_DEADLINE_FACTOR
    };

    let mut tasks_by_algorithm = BTreeMap::new();
    let mut vms_by_algorithm = BTreeMap::new();

    for &algorithm in &params.algorithms {
        if tasks_by_algorithm.contains_key(&algorithm) {
            continue;
        }

        let mut rng = algorithm_rng(params.seed, algorithm);
        let mut graph = generate(profile, requested, algorithm, &mut rng);
        let mut vms = provision(profile, graph.len(), algorithm, &mut rng);
        policy_for(profile, algorithm).assign(&mut graph, &mut vms, &mut rng);

        tasks_by_algorithm.insert(algorithm, graph);
        vms_by_algorithm.insert(algorithm, vms);
    }

    let deadline = profile.deadline(deadline_factor);
    info!(
        workflow = profile.key,
        tasks = requested,
        deadline,
        algorithms = tasks_by_algorithm.len(),
        seed = params.seed,
        "initialized simulation run"
    );

    RunSetup {
        profile,
        deadline_factor,
        deadline,
        tasks_by_algorithm,
        vms_by_algorithm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_run_has_published_shape() {
        let setup = initialize_run(&RunParams::default());
        assert_eq!(setup.deadline, 48.0);
        assert_eq!(setup.tasks_by_algorithm.len(), 3);
        assert_eq!(setup.vms_by_algorithm[&Algorithm::Dyna].len(), 2);
        assert!(setup.tasks_by_algorithm.values().all(|g| g.len() == 9));
    }

    #[test]
    fn bad_inputs_fall_back() {
        let setup = initialize_run(&RunParams {
            workflow: "unknown".into(),
            task_count: -4,
            deadline_factor: f64::NAN,
            seed: 1,
            algorithms: vec![Algorithm::Cga, Algorithm::Cga],
        });
        assert!(setup.profile.is_reference());
        assert_eq!(setup.deadline_factor, DEFAULT_DEADLINE_FACTOR);
        assert_eq!(setup.algorithms().collect::<Vec<_>>(), vec![Algorithm::Cga]);
    }

    #[test]
    fn huge_task_counts_are_clamped() {
        let setup = initialize_run(&RunParams {
            workflow: "montage".into(),
            task_count: i64::MAX,
            deadline_factor: 1.5,
            seed: 4,
            algorithms: vec![Algorithm::Cga],
        });
        assert_eq!(setup.tasks_by_algorithm[&Algorithm::Cga].len(), MAX_TASKS);
        assert_eq!(clamp_task_count(MAX_TASKS as i64 + 1), MAX_TASKS);
        assert_eq!(clamp_task_count(0), 1);
    }

    #[test]
    fn procedural_runs_assign_every_task() {
        let setup = initialize_run(&RunParams {
            workflow: "cybershake".into(),
            task_count: 300,
            deadline_factor: 2.0,
            seed: 9,
            algorithms: Algorithm::ALL.to_vec(),
        });
        assert_eq!(setup.deadline, 736.0 * 2.0);

        for (algorithm, graph) in &setup.tasks_by_algorithm {
            assert_eq!(graph.len(), 300);
            assert!(graph.tasks().iter().all(|t| t.assigned_vm.is_some()));

            let placed: usize = setup.vms_by_algorithm[algorithm]
                .iter()
                .map(|vm| vm.task_ids.len())
                .sum();
            assert_eq!(placed, 300);
        }
    }

    #[test]
    fn algorithms_draw_from_distinct_streams() {
        use rand::RngCore;
        let a = algorithm_rng(5, Algorithm::Dsaws).next_u64();
        let b = algorithm_rng(5, Algorithm::Cga).next_u64();
        assert_ne!(a, b);
        assert_eq!(a, algorithm_rng(5, Algorithm::Dsaws).next_u64());
    }
}
