// src/engine/core.rs

//! Pure simulation core.
//!
//! [`Simulation`] owns one [`AlgorithmRun`] per enabled algorithm and the
//! shared [`SimulationClock`]. A driver calls [`Simulation::advance`] once per
//! frame with the wall-clock delta; the core:
//! - advances the clock
//! - resolves task completions per algorithm, in algorithm order
//! - fires the failsafe once the clock passes the ceiling
//! - latches deadline status and builds each run record exactly once
//!
//! There is no IO, no Tokio and no self-scheduling here, so the whole
//! lifecycle can be driven frame by frame from tests.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::WorkflowProfile;
use crate::dag::{PhaseCounts, TaskGraph};
use crate::engine::clock::SimulationClock;
use crate::engine::cost::fleet_cost;
use crate::engine::progress::{average_progress, progress_percent, DeadlineStatus};
use crate::engine::recorder::{build_run, RunOutcome, SimulationRun};
use crate::engine::resolver::{force_complete, resolve};
use crate::engine::setup::RunSetup;
use crate::fleet::Vm;
use crate::types::Algorithm;

/// The failsafe fires once simulated time exceeds this multiple of the
/// deadline.
pub const FAILSAFE_FACTOR: f64 = 1.5;

/// State of one algorithm within a run.
#[derive(Debug, Clone)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    pub graph: TaskGraph,
    pub vms: Vec<Vm>,
    pub deadline_status: DeadlineStatus,
    /// Clock time of the frame in which the last task completed.
    pub completion_time: Option<f64>,
    pub force_completed: bool,
    record: Option<SimulationRun>,
}

impl AlgorithmRun {
    pub fn new(algorithm: Algorithm, graph: TaskGraph, vms: Vec<Vm>) -> Self {
        Self {
            algorithm,
            graph,
            vms,
            deadline_status: DeadlineStatus::Pending,
            completion_time: None,
            force_completed: false,
            record: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn progress(&self) -> f64 {
        progress_percent(self.graph.completed_count(), self.graph.len())
    }

    /// Fleet cost at `now`, frozen at the completion time once finished.
    pub fn cost(&self, now: f64) -> f64 {
        fleet_cost(&self.vms, self.completion_time.unwrap_or(now))
    }

    /// The finished-run record, if the run has completed.
    pub fn record(&self) -> Option<&SimulationRun> {
        self.record.as_ref()
    }
}

/// Per-algorithm slice of a [`FrameReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmFrame {
    pub algorithm: Algorithm,
    pub progress: f64,
    pub cost: f64,
    pub deadline_status: DeadlineStatus,
    pub completed: bool,
    /// Tasks completed during this frame.
    pub newly_completed: usize,
}

/// What one call to [`Simulation::advance`] observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub time: f64,
    pub algorithms: Vec<AlgorithmFrame>,
    pub is_complete: bool,
    pub failsafe_triggered: bool,
}

impl FrameReport {
    pub fn average_progress(&self) -> f64 {
        average_progress(self.algorithms.iter().map(|a| a.progress))
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    profile: &'static WorkflowProfile,
    deadline_factor: f64,
    deadline: f64,
    clock: SimulationClock,
    runs: Vec<AlgorithmRun>,
    /// Runs as they stood after setup; `reset` swaps copies of these in.
    initial_runs: Vec<AlgorithmRun>,
    failsafe_triggered: bool,
}

impl Simulation {
    pub fn new(setup: RunSetup, clock: SimulationClock) -> Self {
        let RunSetup {
            profile,
            deadline_factor,
            deadline,
            tasks_by_algorithm,
            mut vms_by_algorithm,
        } = setup;

        let runs: Vec<AlgorithmRun> = tasks_by_algorithm
            .into_iter()
            .map(|(algorithm, graph)| {
                let vms = vms_by_algorithm.remove(&algorithm).unwrap_or_default();
                AlgorithmRun::new(algorithm, graph, vms)
            })
            .collect();

        Self {
            profile,
            deadline_factor,
            deadline,
            clock,
            initial_runs: runs.clone(),
            runs,
            failsafe_triggered: false,
        }
    }

    pub fn profile(&self) -> &'static WorkflowProfile {
        self.profile
    }

    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    pub fn deadline_factor(&self) -> f64 {
        self.deadline_factor
    }

    /// Simulated time at which the failsafe fires.
    pub fn failsafe_ceiling(&self) -> f64 {
        FAILSAFE_FACTOR * self.deadline
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    /// Runs in algorithm order.
    pub fn runs(&self) -> &[AlgorithmRun] {
        &self.runs
    }

    pub fn run(&self, algorithm: Algorithm) -> Option<&AlgorithmRun> {
        self.runs.iter().find(|r| r.algorithm == algorithm)
    }

    pub fn failsafe_triggered(&self) -> bool {
        self.failsafe_triggered
    }

    pub fn is_complete(&self) -> bool {
        self.runs.iter().all(AlgorithmRun::is_complete)
    }

    /// Mean progress over the enabled algorithms.
    pub fn average_progress(&self) -> f64 {
        average_progress(self.runs.iter().map(AlgorithmRun::progress))
    }

    /// Task phases of `algorithm` at the current clock time.
    pub fn phase_counts(&self, algorithm: Algorithm) -> Option<PhaseCounts> {
        let now = self.now();
        self.run(algorithm).map(|r| r.graph.phase_counts(now))
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Replace every run with a fresh copy of its post-setup state and the
    /// clock with a new idle one at the same speed. The drawn graphs and
    /// fleets are the same; build a new [`RunSetup`] for a fresh draw.
    pub fn reset(&mut self) {
        self.clock = SimulationClock::new(self.clock.speed(), self.clock.fast_forward());
        self.failsafe_triggered = false;
        self.runs = self.initial_runs.clone();
        debug!(workflow = self.profile.key, "simulation reset");
    }

    /// Process one frame.
    pub fn advance(&mut self, wall_delta: f64) -> FrameReport {
        self.clock.tick(wall_delta);
        let now = self.clock.now();

        let mut newly: Vec<usize> = Vec::with_capacity(self.runs.len());
        for idx in 0..self.runs.len() {
            let run = &mut self.runs[idx];
            if run.is_complete() {
                newly.push(0);
                continue;
            }
            let completed = resolve(&mut run.graph, &mut run.vms, now);
            newly.push(completed.len());
            if run.graph.all_completed() {
                self.finish(idx, now, false);
            }
        }

        if !self.is_complete() && now > self.failsafe_ceiling() {
            self.trigger_failsafe(now, &mut newly);
        }

        let is_complete = self.is_complete();
        if is_complete {
            self.clock.stop();
        }

        let algorithms = self
            .runs
            .iter()
            .zip(newly)
            .map(|(run, newly_completed)| AlgorithmFrame {
                algorithm: run.algorithm,
                progress: run.progress(),
                cost: run.cost(now),
                deadline_status: run.deadline_status,
                completed: run.is_complete(),
                newly_completed,
            })
            .collect();

        FrameReport {
            time: now,
            algorithms,
            is_complete,
            failsafe_triggered: self.failsafe_triggered,
        }
    }

    /// Records for every completed algorithm. Calling this repeatedly
    /// returns identical records.
    pub fn finalize(&self) -> Vec<SimulationRun> {
        self.runs.iter().filter_map(|r| r.record.clone()).collect()
    }

    fn trigger_failsafe(&mut self, now: f64, newly: &mut [usize]) {
        warn!(
            now,
            ceiling = self.failsafe_ceiling(),
            "failsafe ceiling exceeded; force-completing remaining tasks"
        );
        self.failsafe_triggered = true;

        for idx in 0..self.runs.len() {
            if self.runs[idx].is_complete() {
                continue;
            }
            let run = &mut self.runs[idx];
            let forced = force_complete(&mut run.graph, &mut run.vms, now);
            newly[idx] += forced;
            warn!(algorithm = %run.algorithm, forced, "force-completed tasks");
            self.finish(idx, now, true);
        }
    }

    /// Latch status and build the record for `self.runs[idx]`.
    fn finish(&mut self, idx: usize, now: f64, forced: bool) {
        let deadline = self.deadline;
        let workflow = self.profile.key;
        let deadline_factor = self.deadline_factor;
        let run = &mut self.runs[idx];
        if run.is_complete() {
            return;
        }

        run.completion_time = Some(now);
        run.force_completed = forced;
        run.deadline_status = run.deadline_status.latch(run.progress(), now, deadline);

        let record = build_run(&RunOutcome {
            algorithm: run.algorithm,
            workflow,
            deadline_factor,
            completion_time: now,
            total_cost: run.cost(now),
            meets_deadline: run.deadline_status == DeadlineStatus::Met,
            vm_count: run.vms.len(),
            task_count: run.graph.len(),
            force_completed: forced,
        });

        info!(
            algorithm = %run.algorithm,
            completion_time = now,
            cost = record.total_cost,
            status = ?run.deadline_status,
            forced,
            "algorithm finished"
        );
        run.record = Some(record);
    }
}
