//! Run configuration, read from YAML. Every key is optional; the defaults
//! reproduce the classic Euler/Lorenz run.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use stepflow_core::systems::{Lorenz, LORENZ_DIMENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepperKind {
    #[default]
    Euler,
    Midpoint,
    Rk4,
}

impl StepperKind {
    pub fn label(self) -> &'static str {
        match self {
            StepperKind::Euler => "Euler",
            StepperKind::Midpoint => "Midpoint",
            StepperKind::Rk4 => "RK4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub stepper: StepperKind,
    pub initial_state: Vec<f64>,
    pub t0: f64,
    pub t1: f64,
    pub dt: f64,
    pub lorenz: Lorenz,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            stepper: StepperKind::Euler,
            initial_state: vec![1.0, 0.0, 0.0],
            t0: 0.0,
            t1: 1.0,
            dt: 0.01,
            lorenz: Lorenz::default(),
            format: OutputFormat::Table,
        }
    }
}

impl RunConfig {
    /// Checks what the integrator itself cannot: the state has to fit the
    /// Lorenz system. Interval and step size are validated by `integrate`.
    pub fn validate(&self) -> Result<()> {
        if self.initial_state.len() != LORENZ_DIMENSION {
            bail!(
                "initial_state dimension mismatch. Expected {}, got {}.",
                LORENZ_DIMENSION,
                self.initial_state.len()
            );
        }
        if self.initial_state.iter().any(|v| !v.is_finite()) {
            bail!("initial_state must contain only finite values.");
        }
        let params = [
            ("sigma", self.lorenz.sigma),
            ("rho", self.lorenz.rho),
            ("beta", self.lorenz.beta),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                bail!("lorenz.{} must be finite, got {}.", name, value);
            }
        }
        Ok(())
    }
}

pub fn parse_config(text: &str) -> Result<RunConfig> {
    let config: RunConfig = serde_yaml::from_str(text).context("Invalid run configuration.")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<RunConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}.", path.display()))?;
    parse_config(&text).with_context(|| format!("Failed to load {}.", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{load_config, parse_config, OutputFormat, RunConfig, StepperKind};
    use std::path::Path;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = parse_config("{}").expect("empty mapping should parse");
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.stepper, StepperKind::Euler);
        assert_eq!(config.initial_state, vec![1.0, 0.0, 0.0]);
        assert_eq!(config.dt, 0.01);
        assert_eq!(config.lorenz.beta, 8.0 / 3.0);
    }

    #[test]
    fn parses_full_document() {
        let text = "\
stepper: rk4
initial_state: [0.5, -1.0, 2.0]
t0: 1.0
t1: 3.0
dt: 0.05
lorenz:
  rho: 14.0
format: csv
";
        let config = parse_config(text).expect("config should parse");
        assert_eq!(config.stepper, StepperKind::Rk4);
        assert_eq!(config.initial_state, vec![0.5, -1.0, 2.0]);
        assert_eq!((config.t0, config.t1, config.dt), (1.0, 3.0, 0.05));
        assert_eq!(config.lorenz.rho, 14.0);
        assert_eq!(config.lorenz.sigma, 10.0);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn rejects_wrong_dimension() {
        assert_err_contains(
            parse_config("initial_state: [1.0, 2.0]"),
            "dimension mismatch. Expected 3, got 2.",
        );
    }

    #[test]
    fn rejects_unknown_keys_and_steppers() {
        assert_err_contains(parse_config("stepsize: 0.1"), "unknown field");
        assert_err_contains(parse_config("stepper: leapfrog"), "unknown variant");
    }

    #[test]
    fn missing_file_names_the_path() {
        assert_err_contains(
            load_config(Path::new("/nonexistent/stepflow.yaml")),
            "/nonexistent/stepflow.yaml",
        );
    }
}
