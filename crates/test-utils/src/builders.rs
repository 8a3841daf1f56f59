#![allow(dead_code)]

use wfsim::catalog::VM_TIERS;
use wfsim::config::{RawConfigFile, SimConfig};
use wfsim::dag::{Task, TaskGraph};
use wfsim::engine::{initialize_run, RunParams, Simulation, SimulationClock};
use wfsim::fleet::Vm;
use wfsim::types::{Algorithm, TaskId};

/// Builder for `SimConfig` to simplify test setup.
pub struct SimConfigBuilder {
    config: RawConfigFile,
}

impl SimConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn workflow(mut self, key: &str) -> Self {
        self.config.simulation.workflow = key.to_string();
        self
    }

    pub fn task_count(mut self, n: i64) -> Self {
        self.config.simulation.task_count = n;
        self
    }

    pub fn deadline_factor(mut self, factor: f64) -> Self {
        self.config.simulation.deadline_factor = factor;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = seed;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.config.clock.speed = speed;
        self
    }

    pub fn fast_forward(mut self, enabled: bool) -> Self {
        self.config.clock.fast_forward = enabled;
        self
    }

    pub fn algorithms(mut self, algorithms: &[Algorithm]) -> Self {
        self.config.algorithms.set_enabled(algorithms);
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> SimConfig {
        SimConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }

    /// Validated config turned straight into a simulation.
    pub fn build_simulation(self) -> Simulation {
        let cfg = self.build();
        Simulation::new(initialize_run(&cfg.run_params()), cfg.build_clock())
    }
}

impl Default for SimConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulation of the reference workflow with every algorithm enabled.
pub fn reference_simulation(speed: f64) -> Simulation {
    Simulation::new(
        initialize_run(&RunParams::default()),
        SimulationClock::new(speed, false),
    )
}

/// Builder for hand-made task graphs placed on a single VM.
pub struct GraphBuilder {
    tasks: Vec<Task>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add task `id` at `level`, running over `[start, start + runtime)`.
    pub fn task(mut self, id: u32, level: u32, start: f64, runtime: f64, after: &[u32]) -> Self {
        let deps = after.iter().map(|d| TaskId(*d)).collect();
        let mut task = Task::new(TaskId(id), level, runtime, 1, deps);
        task.start_time = start;
        task.end_time = start + runtime;
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> TaskGraph {
        TaskGraph::from_tasks(self.tasks)
    }

    /// Graph plus a one-VM fleet holding every task.
    pub fn build_with_vm(self, algorithm: Algorithm) -> (TaskGraph, Vec<Vm>) {
        let mut graph = self.build();
        let mut vm = Vm::new(algorithm, 1, &VM_TIERS[1]);
        for task in graph.tasks_mut() {
            task.assigned_vm = Some(vm.id.clone());
            vm.task_ids.push(task.id);
        }
        (graph, vec![vm])
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
