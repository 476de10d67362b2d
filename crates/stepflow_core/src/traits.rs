use crate::container::StateContainer;
use num_traits::{Float, FromPrimitive};
use std::convert::Infallible;
use std::fmt::Debug;

/// A trait for types that can be used as scalars in our dynamical systems.
/// Must support basic arithmetic, debug printing, and conversion from f64.
/// Both state components and time are scalars.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Converts an f64 constant (method coefficients, model parameters) into `T`.
pub(crate) fn cast<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Right-hand side of an ODE, `dx/dt = f(x, t)`.
///
/// Any `Fn(&C, &mut C, T)` closure is a system.
pub trait DynamicalSystem<C: StateContainer> {
    /// Evaluates the vector field.
    /// x: current state (read only)
    /// out: buffer to write dx/dt into; every element must be written
    /// t: current time
    fn apply(&self, x: &C, out: &mut C, t: C::Value);
}

impl<C, F> DynamicalSystem<C> for F
where
    C: StateContainer,
    F: Fn(&C, &mut C, C::Value),
{
    fn apply(&self, x: &C, out: &mut C, t: C::Value) {
        self(x, out, t)
    }
}

/// Consumes the state after every integration step.
///
/// Any `FnMut(&C, T)` closure is an infallible observer. Observers that do I/O
/// implement the trait directly and report failures through `Error`; the
/// driver stops at the first error.
pub trait Observer<C: StateContainer> {
    type Error: std::error::Error + 'static;

    fn observe(&mut self, x: &C, t: C::Value) -> Result<(), Self::Error>;
}

impl<C, F> Observer<C> for F
where
    C: StateContainer,
    F: FnMut(&C, C::Value),
{
    type Error = Infallible;

    fn observe(&mut self, x: &C, t: C::Value) -> Result<(), Infallible> {
        self(x, t);
        Ok(())
    }
}

/// A fixed-step solver that advances a state in place.
///
/// Implementations own their scratch buffers and keep them sized like the
/// state they are stepping.
pub trait Stepper<C: StateContainer> {
    /// Resizes the internal buffers to match `reference`. No-op when they
    /// already do.
    fn adjust_size(&mut self, reference: &C);

    /// Performs one step of size dt given dx/dt already evaluated at (x, t).
    ///
    /// `x` and `dxdt` must have the same length. This is only checked in
    /// debug builds.
    fn step_with_derivative(
        &mut self,
        system: &impl DynamicalSystem<C>,
        x: &mut C,
        dxdt: &C,
        t: C::Value,
        dt: C::Value,
    );

    /// Performs one step of size dt, evaluating dx/dt through `system` into
    /// the stepper's own buffer. Time is not advanced; that is the caller's job.
    fn step(&mut self, system: &impl DynamicalSystem<C>, x: &mut C, t: C::Value, dt: C::Value);
}
