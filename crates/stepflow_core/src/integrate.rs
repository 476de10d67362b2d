use crate::container::StateContainer;
use crate::error::IntegrateError;
use crate::traits::{DynamicalSystem, Observer, Stepper};
use log::{debug, trace};

/// Integrates `state` over the half-open interval `[t0, t1)` with a fixed step
/// `dt`, calling `observer` after every step.
///
/// For each step the stepper advances `state` from `t` to `t + dt`, then the
/// observer sees the new state paired with the time the step started from
/// (`t`, not `t + dt`). Time is a running floating-point sum, so the number of
/// steps is whatever `t < t1` yields under accumulated rounding: `[0, 1)` with
/// `dt = 0.1` takes 11 steps in `f64`. A trailing partial interval is never
/// stepped.
///
/// Returns the number of steps taken. `t0 >= t1` takes none and leaves `state`
/// unchanged. `dt` must be finite, positive and large enough to move `t0`;
/// otherwise nothing is touched and `InvalidConfiguration` is returned. If the
/// running time later grows so large that `t + dt == t`, the run stops with
/// `InvalidConfiguration` before that step; earlier steps stay applied.
///
/// The first observer error stops the loop and is returned as `Observer`,
/// whose `source()` is the observer's error value as it was produced.
pub fn integrate<C, St, Sys, Obs>(
    stepper: &mut St,
    system: &Sys,
    state: &mut C,
    t0: C::Value,
    t1: C::Value,
    dt: C::Value,
    observer: &mut Obs,
) -> Result<usize, IntegrateError<Obs::Error>>
where
    C: StateContainer,
    St: Stepper<C>,
    Sys: DynamicalSystem<C>,
    Obs: Observer<C>,
{
    validate_interval(t0, t1, dt).map_err(IntegrateError::InvalidConfiguration)?;

    debug!(
        "integrating {} components over [{:?}, {:?}) with dt = {:?}",
        state.len(),
        t0,
        t1,
        dt
    );

    stepper.adjust_size(state);

    let mut t = t0;
    let mut steps = 0usize;
    while t < t1 {
        let next = t + dt;
        if next <= t {
            return Err(IntegrateError::InvalidConfiguration(format!(
                "time stalled at t = {:?}: dt = {:?} no longer advances it after {} steps",
                t, dt, steps
            )));
        }
        stepper.step(system, state, t, dt);
        observer
            .observe(state, t)
            .map_err(IntegrateError::Observer)?;
        trace!("step {} from t = {:?}", steps, t);
        t = next;
        steps += 1;
    }

    debug!("integration finished after {} steps at t = {:?}", steps, t);
    Ok(steps)
}

fn validate_interval<T: crate::traits::Scalar>(t0: T, t1: T, dt: T) -> Result<(), String> {
    if !t0.is_finite() || !t1.is_finite() {
        return Err(format!(
            "interval bounds must be finite, got [{:?}, {:?})",
            t0, t1
        ));
    }
    if !dt.is_finite() || dt <= T::zero() {
        return Err(format!("step size dt must be positive, got {:?}", dt));
    }
    if t0 + dt == t0 {
        return Err(format!(
            "step size dt = {:?} is too small to advance from t0 = {:?}",
            dt, t0
        ));
    }
    Ok(())
}
