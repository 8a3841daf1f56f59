// src/config/model.rs

use serde::Deserialize;

use crate::engine::clock::SimulationClock;
use crate::engine::runtime::DEFAULT_FRAME_RATE;
use crate::engine::setup::{RunParams, DEFAULT_DEADLINE_FACTOR};
use crate::types::Algorithm;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [simulation]
/// workflow = "montage"
/// task_count = 500
/// deadline_factor = 1.5
/// seed = 7
///
/// [clock]
/// speed = 2.0
/// fast_forward = false
/// frame_rate = 60
///
/// [algorithms]
/// dsaws = true
/// cga = true
/// dyna = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub clock: ClockSection,

    #[serde(default)]
    pub algorithms: AlgorithmsSection,
}

/// `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSection {
    /// Workflow key (`sample`, `montage`, `cybershake`, `ligo`,
    /// `epigenomics`). Unknown keys fall back to `sample` at run time.
    #[serde(default = "default_workflow")]
    pub workflow: String,

    /// Requested task count; ignored for `sample`. Values below one are
    /// clamped to one.
    #[serde(default = "default_task_count")]
    pub task_count: i64,

    #[serde(default = "default_deadline_factor")]
    pub deadline_factor: f64,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_workflow() -> String {
    crate::catalog::REFERENCE_WORKFLOW.to_string()
}

fn default_task_count() -> i64 {
    100
}

fn default_deadline_factor() -> f64 {
    DEFAULT_DEADLINE_FACTOR
}

fn default_seed() -> u64 {
    42
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            workflow: default_workflow(),
            task_count: default_task_count(),
            deadline_factor: default_deadline_factor(),
            seed: default_seed(),
        }
    }
}

/// `[clock]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClockSection {
    /// Simulated seconds per wall-clock second.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Multiplies `speed` by ten.
    #[serde(default)]
    pub fast_forward: bool,

    /// Frames per second of the real-time driver.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

fn default_speed() -> f64 {
    1.0
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            fast_forward: false,
            frame_rate: default_frame_rate(),
        }
    }
}

/// `[algorithms]` section: which heuristics to simulate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlgorithmsSection {
    #[serde(default = "enabled")]
    pub dsaws: bool,
    #[serde(default = "enabled")]
    pub cga: bool,
    #[serde(default = "enabled")]
    pub dyna: bool,
}

fn enabled() -> bool {
    true
}

impl Default for AlgorithmsSection {
    fn default() -> Self {
        Self {
            dsaws: true,
            cga: true,
            dyna: true,
        }
    }
}

impl AlgorithmsSection {
    /// Enabled algorithms in engine order.
    pub fn enabled(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|a| match a {
                Algorithm::Dsaws => self.dsaws,
                Algorithm::Cga => self.cga,
                Algorithm::Dyna => self.dyna,
            })
            .collect()
    }

    /// Enable exactly the given algorithms.
    pub fn set_enabled(&mut self, algorithms: &[Algorithm]) {
        self.dsaws = algorithms.contains(&Algorithm::Dsaws);
        self.cga = algorithms.contains(&Algorithm::Cga);
        self.dyna = algorithms.contains(&Algorithm::Dyna);
    }
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workflow: Option<String>,
    pub task_count: Option<i64>,
    pub deadline_factor: Option<f64>,
    pub seed: Option<u64>,
    pub speed: Option<f64>,
    pub fast_forward: bool,
    pub algorithms: Option<Vec<Algorithm>>,
}

impl RawConfigFile {
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(workflow) = overrides.workflow {
            self.simulation.workflow = workflow;
        }
        if let Some(task_count) = overrides.task_count {
            self.simulation.task_count = task_count;
        }
        if let Some(factor) = overrides.deadline_factor {
            self.simulation.deadline_factor = factor;
        }
        if let Some(seed) = overrides.seed {
            self.simulation.seed = seed;
        }
        if let Some(speed) = overrides.speed {
            self.clock.speed = speed;
        }
        if overrides.fast_forward {
            self.clock.fast_forward = true;
        }
        if let Some(algorithms) = overrides.algorithms {
            self.algorithms.set_enabled(&algorithms);
        }
    }
}

/// Validated configuration.
///
/// Only produced through `TryFrom<RawConfigFile>`, so every value here has
/// passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    simulation: SimulationSection,
    clock: ClockSection,
    algorithms: Vec<Algorithm>,
}

impl SimConfig {
    /// Construct without validation. Reserved for `validate.rs`.
    pub(crate) fn new_unchecked(
        simulation: SimulationSection,
        clock: ClockSection,
        algorithms: Vec<Algorithm>,
    ) -> Self {
        Self {
            simulation,
            clock,
            algorithms,
        }
    }

    pub fn simulation(&self) -> &SimulationSection {
        &self.simulation
    }

    pub fn clock(&self) -> &ClockSection {
        &self.clock
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn run_params(&self) -> RunParams {
        RunParams {
            workflow: self.simulation.workflow.clone(),
            task_count: self.simulation.task_count,
            deadline_factor: self.simulation.deadline_factor,
            seed: self.simulation.seed,
            algorithms: self.algorithms.clone(),
        }
    }

    pub fn build_clock(&self) -> SimulationClock {
        SimulationClock::new(self.clock.speed, self.clock.fast_forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let raw: RawConfigFile = toml::from_str("").unwrap();
        assert_eq!(raw.simulation, SimulationSection::default());
        assert_eq!(raw.clock.frame_rate, 60);
        assert_eq!(raw.algorithms.enabled(), Algorithm::ALL.to_vec());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut raw: RawConfigFile = toml::from_str(
            r#"
            [simulation]
            workflow = "ligo"
            seed = 3
            "#,
        )
        .unwrap();

        raw.apply_overrides(ConfigOverrides {
            seed: Some(11),
            fast_forward: true,
            algorithms: Some(vec![Algorithm::Dyna]),
            ..ConfigOverrides::default()
        });

        assert_eq!(raw.simulation.workflow, "ligo");
        assert_eq!(raw.simulation.seed, 11);
        assert!(raw.clock.fast_forward);
        assert_eq!(raw.algorithms.enabled(), vec![Algorithm::Dyna]);
    }
}
