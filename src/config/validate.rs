// src/config/validate.rs

use tracing::warn;

use crate::catalog::workflow::lookup;
use crate::dag::MAX_TASKS;
use crate::config::model::{RawConfigFile, SimConfig};
use crate::errors::{Result, SimError};

impl TryFrom<RawConfigFile> for SimConfig {
    type Error = crate::errors::SimError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let algorithms = raw.algorithms.enabled();
        Ok(SimConfig::new_unchecked(raw.simulation, raw.clock, algorithms))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_simulation(cfg)?;
    validate_clock(cfg)?;
    ensure_has_algorithms(cfg)?;
    Ok(())
}

fn validate_simulation(cfg: &RawConfigFile) -> Result<()> {
    let sim = &cfg.simulation;

    ensure_positive("[simulation].deadline_factor", sim.deadline_factor)?;

    if sim.task_count < 1 {
        warn!(
            task_count = sim.task_count,
            "[simulation].task_count below 1; it will be clamped to 1"
        );
    } else if sim.task_count as u64 > MAX_TASKS as u64 {
        warn!(
            task_count = sim.task_count,
            max = MAX_TASKS,
            "[simulation].task_count above the limit; it will be clamped"
        );
    }

    if lookup(&sim.workflow).is_none() {
        warn!(
            workflow = %sim.workflow,
            "[simulation].workflow is not a known workflow; the reference workflow will be used"
        );
    }

    Ok(())
}

fn validate_clock(cfg: &RawConfigFile) -> Result<()> {
    ensure_positive("[clock].speed", cfg.clock.speed)?;

    if cfg.clock.frame_rate == 0 {
        return Err(SimError::ConfigError(
            "[clock].frame_rate must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn ensure_has_algorithms(cfg: &RawConfigFile) -> Result<()> {
    if cfg.algorithms.enabled().is_empty() {
        return Err(SimError::ConfigError(
            "[algorithms] must enable at least one of dsaws, cga, dyna".to_string(),
        ));
    }
    Ok(())
}

fn ensure_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimError::ConfigError(format!(
            "{field} must be a finite number > 0 (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Algorithm;

    fn parse(toml_src: &str) -> Result<SimConfig> {
        let raw: RawConfigFile = toml::from_str(toml_src)?;
        SimConfig::try_from(raw)
    }

    #[test]
    fn accepts_a_full_config() {
        let cfg = parse(
            r#"
            [simulation]
            workflow = "montage"
            task_count = 250
            deadline_factor = 2.0

            [clock]
            speed = 4.0

            [algorithms]
            cga = false
            "#,
        )
        .unwrap();

        assert_eq!(cfg.algorithms(), &[Algorithm::Dsaws, Algorithm::Dyna]);
        assert_eq!(cfg.run_params().task_count, 250);
        assert_eq!(cfg.build_clock().speed(), 4.0);
    }

    #[test]
    fn rejects_non_positive_deadline_factor() {
        let err = parse("[simulation]\ndeadline_factor = 0.0").unwrap_err();
        assert!(err.to_string().contains("deadline_factor"));
    }

    #[test]
    fn rejects_zero_frame_rate_and_bad_speed() {
        assert!(matches!(parse("[clock]\nframe_rate = 0"), Err(SimError::ConfigError(_))));
        assert!(matches!(parse("[clock]\nspeed = -2.0"), Err(SimError::ConfigError(_))));
    }

    #[test]
    fn rejects_all_algorithms_disabled() {
        let err = parse("[algorithms]\ndsaws = false\ncga = false\ndyna = false").unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn oversized_task_count_is_accepted() {
        let cfg = parse("[simulation]\ntask_count = 9223372036854775807").unwrap();
        assert_eq!(cfg.simulation().task_count, i64::MAX);
    }

    #[test]
    fn negative_task_count_is_accepted() {
        let cfg = parse("[simulation]\ntask_count = -5").unwrap();
        assert_eq!(cfg.simulation().task_count, -5);
    }
}
