use crate::config::{OutputFormat, RunConfig, StepperKind};
use crate::output::{CsvWriter, TableWriter};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use stepflow_core::integrate::integrate;
use stepflow_core::solvers::{Euler, Midpoint, Rk4};
use stepflow_core::traits::{DynamicalSystem, Stepper};

type State = Vec<f64>;

/// Runtime choice of solver, dispatching to the concrete steppers.
pub(crate) enum SolverType {
    Euler(Euler<State>),
    Midpoint(Midpoint<State>),
    Rk4(Rk4<State>),
}

impl SolverType {
    pub(crate) fn build(kind: StepperKind, reference: &State) -> Self {
        match kind {
            StepperKind::Euler => SolverType::Euler(Euler::with_reference(reference)),
            StepperKind::Midpoint => SolverType::Midpoint(Midpoint::with_reference(reference)),
            StepperKind::Rk4 => SolverType::Rk4(Rk4::with_reference(reference)),
        }
    }
}

impl Stepper<State> for SolverType {
    fn adjust_size(&mut self, reference: &State) {
        match self {
            SolverType::Euler(s) => s.adjust_size(reference),
            SolverType::Midpoint(s) => s.adjust_size(reference),
            SolverType::Rk4(s) => s.adjust_size(reference),
        }
    }

    fn step_with_derivative(
        &mut self,
        system: &impl DynamicalSystem<State>,
        x: &mut State,
        dxdt: &State,
        t: f64,
        dt: f64,
    ) {
        match self {
            SolverType::Euler(s) => s.step_with_derivative(system, x, dxdt, t, dt),
            SolverType::Midpoint(s) => s.step_with_derivative(system, x, dxdt, t, dt),
            SolverType::Rk4(s) => s.step_with_derivative(system, x, dxdt, t, dt),
        }
    }

    fn step(&mut self, system: &impl DynamicalSystem<State>, x: &mut State, t: f64, dt: f64) {
        match self {
            SolverType::Euler(s) => s.step(system, x, t, dt),
            SolverType::Midpoint(s) => s.step(system, x, t, dt),
            SolverType::Rk4(s) => s.step(system, x, t, dt),
        }
    }
}

/// Integrates the configured Lorenz run and writes every observation to `out`.
/// Returns the number of steps taken.
pub fn run<W: Write>(config: &RunConfig, out: W) -> Result<usize> {
    config.validate()?;
    debug!("run configuration: {:?}", config);

    let mut state = config.initial_state.clone();
    let mut stepper = SolverType::build(config.stepper, &state);

    let steps = match config.format {
        OutputFormat::Table => {
            let mut table = TableWriter::new(out);
            table.write_banner(&format!(
                "{} stepper to solve lorenz system",
                config.stepper.label()
            ))?;
            let steps = integrate(
                &mut stepper,
                &config.lorenz,
                &mut state,
                config.t0,
                config.t1,
                config.dt,
                &mut table,
            )
            .context("Integration failed.")?;
            table.finish()?;
            steps
        }
        OutputFormat::Csv => {
            let mut csv = CsvWriter::new(out, &["x", "y", "z"])?;
            let steps = integrate(
                &mut stepper,
                &config.lorenz,
                &mut state,
                config.t0,
                config.t1,
                config.dt,
                &mut csv,
            )
            .context("Integration failed.")?;
            csv.finish()?;
            steps
        }
    };

    info!("{} steps taken, final state {:?}", steps, state);
    Ok(steps)
}
