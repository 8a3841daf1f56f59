// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SimError;

/// The three scheduling heuristics under comparison.
///
/// Declaration order is the order in which the engine advances them within a
/// frame, and the order used for every per-algorithm collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Deadline and structure-aware scheduler.
    #[serde(rename = "DSAWS")]
    Dsaws,
    /// Coevolutionary genetic algorithm stand-in: uniform, locality-agnostic.
    #[serde(rename = "CGA")]
    Cga,
    /// Probabilistic scheduler that consolidates onto few VMs.
    #[serde(rename = "Dyna")]
    Dyna,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dsaws, Algorithm::Cga, Algorithm::Dyna];

    /// Display tag, matching the published names.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Dsaws => "DSAWS",
            Algorithm::Cga => "CGA",
            Algorithm::Dyna => "Dyna",
        }
    }

    /// VM id for the 1-based fleet slot `n`.
    pub fn vm_id(self, n: usize) -> String {
        match self {
            Algorithm::Dsaws => format!("vm{n}"),
            Algorithm::Cga => format!("cga-{n}"),
            Algorithm::Dyna => format!("dyna-{n}"),
        }
    }

    /// Relative scheduling overhead applied to generated runtimes.
    pub fn efficiency_factor(self) -> f64 {
        match self {
            Algorithm::Dsaws => 1.0,
            Algorithm::Cga => 1.2,
            Algorithm::Dyna => 1.1,
        }
    }

    /// Seconds per level used to derive procedural start times.
    pub fn base_offset(self) -> f64 {
        match self {
            Algorithm::Dsaws => 5.0,
            Algorithm::Cga => 6.0,
            Algorithm::Dyna => 5.5,
        }
    }

    /// Stable index, used to derive a per-algorithm random stream.
    pub fn index(self) -> usize {
        match self {
            Algorithm::Dsaws => 0,
            Algorithm::Cga => 1,
            Algorithm::Dyna => 2,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dsaws" => Ok(Algorithm::Dsaws),
            "cga" => Ok(Algorithm::Cga),
            "dyna" => Ok(Algorithm::Dyna),
            other => Err(SimError::UnknownAlgorithm(format!(
                "{other} (expected \"dsaws\", \"cga\" or \"dyna\")"
            ))),
        }
    }
}

/// Stable task identifier, displayed as `t<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// VM identifier (`vm3`, `cga-2`, `dyna-1`); unique within one algorithm's fleet.
pub type VmId = String;
