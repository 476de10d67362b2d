use crate::container::{increment, offset_into, StateContainer};
use crate::traits::{cast, DynamicalSystem, Stepper};

/// Explicit (forward) Euler solver: x(t + dt) = x(t) + dt * f(x, t).
///
/// First order. Holds a single derivative buffer, sized lazily to the state.
#[derive(Debug, Clone, Default)]
pub struct Euler<C> {
    dxdt: C,
}

impl<C: StateContainer + Default> Euler<C> {
    /// An Euler solver with an empty derivative buffer. The buffer is sized
    /// on the first `adjust_size` or `step`.
    pub fn new() -> Self {
        Self { dxdt: C::default() }
    }
}

impl<C: StateContainer> Euler<C> {
    /// An Euler solver whose buffer is already sized like `reference`.
    pub fn with_reference(reference: &C) -> Self {
        Self {
            dxdt: reference.zeros_like(),
        }
    }
}

impl<C: StateContainer> Stepper<C> for Euler<C> {
    fn adjust_size(&mut self, reference: &C) {
        self.dxdt.adjust_size(reference);
    }

    fn step_with_derivative(
        &mut self,
        _system: &impl DynamicalSystem<C>,
        x: &mut C,
        dxdt: &C,
        _t: C::Value,
        dt: C::Value,
    ) {
        euler_update(x, dxdt, dt);
    }

    fn step(&mut self, system: &impl DynamicalSystem<C>, x: &mut C, t: C::Value, dt: C::Value) {
        self.dxdt.adjust_size(x);
        system.apply(x, &mut self.dxdt, t);
        euler_update(x, &self.dxdt, dt);
    }
}

// Shared by both step forms.
fn euler_update<C: StateContainer>(x: &mut C, dxdt: &C, dt: C::Value) {
    increment(x, dxdt, dt);
}

/// Explicit midpoint solver (second order Runge-Kutta).
#[derive(Debug, Clone, Default)]
pub struct Midpoint<C> {
    k1: C,
    k2: C,
    tmp: C,
}

impl<C: StateContainer + Default> Midpoint<C> {
    pub fn new() -> Self {
        Self {
            k1: C::default(),
            k2: C::default(),
            tmp: C::default(),
        }
    }
}

impl<C: StateContainer> Midpoint<C> {
    pub fn with_reference(reference: &C) -> Self {
        Self {
            k1: reference.zeros_like(),
            k2: reference.zeros_like(),
            tmp: reference.zeros_like(),
        }
    }
}

fn midpoint_update<C: StateContainer>(
    system: &impl DynamicalSystem<C>,
    x: &mut C,
    k1: &C,
    k2: &mut C,
    tmp: &mut C,
    t: C::Value,
    dt: C::Value,
) {
    let half = dt * cast::<C::Value>(0.5);

    // k2 = f(t + dt/2, y + dt*k1/2)
    offset_into(tmp, x, k1, half);
    system.apply(tmp, k2, t + half);

    // y_next = y + dt*k2
    increment(x, k2, dt);
}

impl<C: StateContainer> Stepper<C> for Midpoint<C> {
    fn adjust_size(&mut self, reference: &C) {
        self.k1.adjust_size(reference);
        self.k2.adjust_size(reference);
        self.tmp.adjust_size(reference);
    }

    fn step_with_derivative(
        &mut self,
        system: &impl DynamicalSystem<C>,
        x: &mut C,
        dxdt: &C,
        t: C::Value,
        dt: C::Value,
    ) {
        self.adjust_size(x);
        midpoint_update(system, x, dxdt, &mut self.k2, &mut self.tmp, t, dt);
    }

    fn step(&mut self, system: &impl DynamicalSystem<C>, x: &mut C, t: C::Value, dt: C::Value) {
        self.adjust_size(x);
        system.apply(x, &mut self.k1, t);
        midpoint_update(system, x, &self.k1, &mut self.k2, &mut self.tmp, t, dt);
    }
}

/// Classic Runge-Kutta 4th Order Solver
#[derive(Debug, Clone, Default)]
pub struct Rk4<C> {
    k1: C,
    k2: C,
    k3: C,
    k4: C,
    tmp: C,
}

impl<C: StateContainer + Default> Rk4<C> {
    pub fn new() -> Self {
        Self {
            k1: C::default(),
            k2: C::default(),
            k3: C::default(),
            k4: C::default(),
            tmp: C::default(),
        }
    }
}

impl<C: StateContainer> Rk4<C> {
    pub fn with_reference(reference: &C) -> Self {
        Self {
            k1: reference.zeros_like(),
            k2: reference.zeros_like(),
            k3: reference.zeros_like(),
            k4: reference.zeros_like(),
            tmp: reference.zeros_like(),
        }
    }
}

struct Rk4Stages<'a, C> {
    k2: &'a mut C,
    k3: &'a mut C,
    k4: &'a mut C,
    tmp: &'a mut C,
}

fn rk4_update<C: StateContainer>(
    system: &impl DynamicalSystem<C>,
    x: &mut C,
    k1: &C,
    stages: Rk4Stages<'_, C>,
    t: C::Value,
    dt: C::Value,
) {
    let Rk4Stages { k2, k3, k4, tmp } = stages;
    let half = cast::<C::Value>(0.5);
    let sixth = cast::<C::Value>(1.0 / 6.0);
    let two = cast::<C::Value>(2.0);

    // k2 = f(t + dt/2, y + dt*k1/2)
    offset_into(tmp, x, k1, dt * half);
    system.apply(tmp, k2, t + dt * half);

    // k3 = f(t + dt/2, y + dt*k2/2)
    offset_into(tmp, x, k2, dt * half);
    system.apply(tmp, k3, t + dt * half);

    // k4 = f(t + dt, y + dt*k3)
    offset_into(tmp, x, k3, dt);
    system.apply(tmp, k4, t + dt);

    // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
    let stages = k1.iter().zip(k2.iter()).zip(k3.iter()).zip(k4.iter());
    for (xi, (((&a, &b), &c), &d)) in x.iter_mut().zip(stages) {
        *xi = *xi + dt * sixth * (a + two * b + two * c + d);
    }
}

impl<C: StateContainer> Stepper<C> for Rk4<C> {
    fn adjust_size(&mut self, reference: &C) {
        self.k1.adjust_size(reference);
        self.k2.adjust_size(reference);
        self.k3.adjust_size(reference);
        self.k4.adjust_size(reference);
        self.tmp.adjust_size(reference);
    }

    fn step_with_derivative(
        &mut self,
        system: &impl DynamicalSystem<C>,
        x: &mut C,
        dxdt: &C,
        t: C::Value,
        dt: C::Value,
    ) {
        self.adjust_size(x);
        let stages = Rk4Stages {
            k2: &mut self.k2,
            k3: &mut self.k3,
            k4: &mut self.k4,
            tmp: &mut self.tmp,
        };
        rk4_update(system, x, dxdt, stages, t, dt);
    }

    fn step(&mut self, system: &impl DynamicalSystem<C>, x: &mut C, t: C::Value, dt: C::Value) {
        self.adjust_size(x);
        system.apply(x, &mut self.k1, t);
        let stages = Rk4Stages {
            k2: &mut self.k2,
            k3: &mut self.k3,
            k4: &mut self.k4,
            tmp: &mut self.tmp,
        };
        rk4_update(system, x, &self.k1, stages, t, dt);
    }
}
