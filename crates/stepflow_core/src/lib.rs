//! The `stepflow_core` crate provides generic fixed-step integration of
//! ordinary differential equations. Solvers are written once against the
//! `StateContainer` abstraction and run on any state representation that
//! implements it (`Vec<T>`, `[T; N]`, `nalgebra::DVector<T>`), for any
//! floating-point scalar.
//!
//! Key components:
//! - **Container**: `StateContainer` (length, iteration, resize-on-mismatch) and the
//!   element-wise kernels.
//! - **Traits**: `Scalar`, `DynamicalSystem` (the ODE right-hand side), `Observer`, `Stepper`.
//! - **Solvers**: fixed-step `Euler`, `Midpoint` and `Rk4`.
//! - **Integrate**: the `integrate` driver over a half-open time interval.
//! - **Observers / Systems**: `Trajectory` recorder and the `Lorenz` system.
pub mod container;
pub mod error;
pub mod integrate;
pub mod observers;
pub mod solvers;
pub mod systems;
pub mod traits;
